// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_input_arbiter --heading-base-level=0

//! Understory Input Arbiter: one touch stream, several consumers, one owner per finger.
//!
//! ## Overview
//!
//! [`InputArbiter`] wires the Understory input crates together for one input session:
//!
//! - a [`GestureRouter`](understory_gesture_router::router::GestureRouter) that picks the
//!   overlay, the control layer, or pass-through once per gesture,
//! - a shared [`PointerClaims`](understory_pointer_claims::PointerClaims) registry for the
//!   fingers virtual controls hold,
//! - a [`TouchBridge`](understory_touch_bridge::TouchBridge) that forwards every unclaimed
//!   finger to the engine,
//! - a [`ControlInput`](understory_control_input::ControlInput) for synthesized key, mouse and
//!   gamepad events.
//!
//! The platform layer creates one arbiter per session and feeds it raw pointer events with
//! [`InputArbiter::on_pointer_event`]; [`InputArbiter::teardown`] ends the session.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use kurbo::Point;
//! use understory_engine_bridge::RecordingBridge;
//! use understory_gesture_router::types::{PointerEvent, RouteTarget, TouchPhase};
//! use understory_input_arbiter::{ArbiterConfig, InputArbiter};
//!
//! let engine = Arc::new(RecordingBridge::new());
//! let mut arbiter = InputArbiter::new(engine.clone(), ArbiterConfig::with_screen(1920, 1080));
//!
//! // Neither the overlay nor the control layer wants the touch.
//! let mut overlay = |_: &PointerEvent<i32>| false;
//! let mut controls = |_: &PointerEvent<i32>| false;
//!
//! let down = PointerEvent::single(TouchPhase::Down, 0, Point::new(960.0, 540.0));
//! let out = arbiter.on_pointer_event(&down, &mut overlay, &mut controls);
//!
//! // So the engine gets it.
//! assert_eq!(out.routed.target, RouteTarget::PassThrough);
//! assert_eq!(out.frame.samples()[0].x, 0.5);
//! assert_eq!(engine.frames().len(), 1);
//!
//! arbiter.teardown();
//! assert!(arbiter.touch_bridge().latest().is_empty());
//! ```
//!
//! ## Features
//!
//! - `serde`: derives `Serialize` and `Deserialize` for [`ArbiterConfig`].

mod arbiter;
mod config;

pub use arbiter::{Arbitrated, InputArbiter};
pub use config::ArbiterConfig;
