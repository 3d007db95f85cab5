// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_touch_bridge --heading-base-level=0

//! Understory Touch Bridge: forwards unclaimed touches to a downstream engine.
//!
//! ## Overview
//!
//! Every raw pointer event is turned into one [`TouchFrame`](understory_engine_bridge::TouchFrame):
//! the fingers that are down, minus those a virtual control has claimed, normalized to `[0, 1]`
//! screen space and truncated to
//! [`MAX_TOUCH_POINTS`](understory_engine_bridge::MAX_TOUCH_POINTS).
//! The frame is published through a [`GuardedBridge`](understory_engine_bridge::GuardedBridge)
//! and kept as [`TouchBridge::latest`] for engines that poll.
//!
//! Gesture routing and frame building are independent. A finger routed to the overlay but never
//! claimed still reaches the engine; a claimed finger never does, whatever the routing said.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use kurbo::Point;
//! use understory_engine_bridge::{GuardedBridge, RecordingBridge};
//! use understory_gesture_router::types::{PointerEvent, TouchPhase};
//! use understory_pointer_claims::PointerClaims;
//! use understory_touch_bridge::TouchBridge;
//!
//! let recording = Arc::new(RecordingBridge::new());
//! let bridge = GuardedBridge::new(recording.clone());
//! let claims = Arc::new(PointerClaims::new(bridge.clone()));
//! let touch = TouchBridge::new(claims.clone(), bridge);
//!
//! // A joystick holds finger 3.
//! claims.claim(3);
//!
//! let event = PointerEvent::new(
//!     TouchPhase::Move,
//!     [
//!         (1, Point::new(100.0, 100.0)),
//!         (2, Point::new(200.0, 200.0)),
//!         (3, Point::new(300.0, 300.0)),
//!     ],
//! );
//! let frame = touch.process(&event, 1000, 1000);
//! let ids: Vec<i32> = frame.samples().iter().map(|s| s.pointer_id).collect();
//! assert_eq!(ids, vec![1, 2]);
//! assert_eq!(recording.frames().len(), 1);
//! ```

mod bridge;
pub mod normalize;

pub use bridge::TouchBridge;
