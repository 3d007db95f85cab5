// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_engine_bridge --heading-base-level=0

//! Understory Engine Bridge: the boundary between touch arbitration and a downstream engine.
//!
//! ## Overview
//!
//! A downstream engine (a game loop, an emulator, a remote session) consumes two things from
//! the arbitration layer: normalized [`TouchFrame`]s for the touches nobody else claimed, and
//! synthesized [`InputEvent`]s from virtual controls.
//! This crate defines that protocol and the [`EngineBridge`] trait a host implements to deliver it.
//!
//! The bridge is best-effort.
//! Native symbols may be missing, the engine may not be initialized yet, or there may be no
//! engine at all.
//! Arbitration state must stay correct regardless, so callers never talk to an
//! [`EngineBridge`] directly. They go through a [`GuardedBridge`], which:
//!
//! - probes the bridge once on first use and caches the answer for its lifetime,
//! - turns every call into a no-op when the probe failed,
//! - absorbs call failures, logging each (operation, failure kind) pair at most once.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use understory_engine_bridge::{
//!     GuardedBridge, InputEvent, KeyCode, NullBridge, Record, RecordingBridge,
//! };
//!
//! // Nothing backs the bridge: calls are silently dropped.
//! let offline = GuardedBridge::new(Arc::new(NullBridge));
//! offline.emit_input_event(InputEvent::Key { code: KeyCode::SPACE, down: true });
//! assert!(!offline.is_available());
//!
//! // An in-memory bridge records what would reach the engine.
//! let recording = Arc::new(RecordingBridge::new());
//! let bridge = GuardedBridge::new(recording.clone());
//! bridge.notify_claim(3);
//! assert_eq!(recording.records(), vec![Record::Claim(3)]);
//! ```
//!
//! ## Protocol
//!
//! - [`TouchFrame`]: up to [`MAX_TOUCH_POINTS`] [`TouchSample`]s in `[0, 1]` screen space, plus the
//!   screen size they were normalized against.
//! - [`InputEvent`]: keyboard, mouse, gamepad and text-input events. Axis values are clamped by
//!   their producers (`[-1, 1]` for sticks, `[0, 1]` for triggers).
//! - Claim notifications mirror the pointer-ownership registry for engines that keep a side table.
//!
//! ## Features
//!
//! - `serde`: derives `Serialize` and `Deserialize` for [`KeyCode`], [`MouseButton`],
//!   [`StickId`], [`TriggerId`] and [`GamepadButton`].

mod bridge;
mod error;
mod event;
mod guard;
mod recording;
mod types;

pub use bridge::{EngineBridge, NullBridge, Operations};
pub use error::{BridgeError, FailureKind};
pub use event::{GamepadButton, InputEvent, KeyCode, MouseButton, StickId, TriggerId};
pub use guard::GuardedBridge;
pub use recording::{Record, RecordingBridge};
pub use types::{MAX_TOUCH_POINTS, PointerId, TouchFrame, TouchSample};
