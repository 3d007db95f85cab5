// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_control_input --heading-base-level=0

//! Understory Control Input: virtual-control actions as engine input events.
//!
//! ## Overview
//!
//! On-screen controls (buttons, sticks, touch pads) decide *what* the player did; this crate
//! turns that into the keyboard, mouse and gamepad events the downstream engine understands.
//!
//! - [`ControlInput`] emits one [`InputEvent`](understory_engine_bridge::InputEvent) per call,
//!   clamping analog values into their protocol ranges.
//! - [`VirtualAim`] turns a stick into an absolute mouse cursor that moves at a configurable
//!   speed inside an [`AimRange`] of the screen.
//! - [`KeyStick`] turns a stick into eight-way directional key presses (WASD by default).
//! - [`AttackAim`] layers a fire button over a [`VirtualAim`]: held, or clicked repeatedly,
//!   while the stick is deflected.
//! - [`MouseStick`] turns a stick into relative mouse motion.
//!
//! Everything goes through a [`GuardedBridge`](understory_engine_bridge::GuardedBridge), so a
//! missing engine makes every call a silent no-op.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use understory_control_input::{ControlInput, KeyStick, KeyStickConfig};
//! use understory_engine_bridge::{
//!     GuardedBridge, InputEvent, KeyCode, RecordingBridge, StickId,
//! };
//!
//! let recording = Arc::new(RecordingBridge::new());
//! let input = ControlInput::new(GuardedBridge::new(recording.clone()));
//!
//! // Analog values are clamped.
//! input.send_stick(StickId::Left, 2.0, -0.5);
//!
//! // A stick pushed up holds W.
//! let mut stick = KeyStick::new(input, KeyStickConfig::default());
//! stick.set_stick(0.0, -1.0);
//!
//! assert_eq!(
//!     recording.events(),
//!     vec![
//!         InputEvent::StickAxis { stick: StickId::Left, x: 1.0, y: -0.5 },
//!         InputEvent::Key { code: KeyCode::W, down: true },
//!     ]
//! );
//! ```
//!
//! ## Features
//!
//! - `serde`: derives `Serialize` and `Deserialize` for [`AimConfig`], [`AimRange`],
//!   [`AttackConfig`], [`AttackMode`], [`KeyStickConfig`] and [`MouseStickConfig`], so hosts
//!   can keep them with their other settings.

mod aim;
mod attack;
mod input;
mod key_stick;
mod mouse_stick;

pub use aim::{AimConfig, AimRange, AimState, VirtualAim};
pub use attack::{AttackAim, AttackConfig, AttackMode};
pub use input::ControlInput;
pub use key_stick::{Direction, DirectionKeys, KeyStick, KeyStickConfig};
pub use mouse_stick::{MouseStick, MouseStickConfig};
