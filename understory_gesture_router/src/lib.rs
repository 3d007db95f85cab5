// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture_router --heading-base-level=0

//! Understory Gesture Router: a deterministic, `no_std` once-per-gesture touch router.
//!
//! ## Overview
//!
//! A touch screen running a game under an on-screen UI has several would-be owners for every
//! finger: a floating overlay (menus, a floating button), a virtual-control layer (buttons and
//! sticks, editable in a layout mode), and the game itself.
//! This crate decides, once per gesture, which of them gets the touch sequence.
//!
//! It does not perform hit testing inside the consumers.
//! Each consumer is a [`TouchConsumer`](crate::types::TouchConsumer) that accepts or declines
//! the opening event; the router only orders the offers and remembers the answer.
//!
//! ## Inputs
//!
//! - [`PointerEvent`](crate::types::PointerEvent)s in arrival order: a
//!   [`TouchPhase`](crate::types::TouchPhase), the fingers down, and which finger changed.
//! - An optional active region (a [`kurbo::Rect`] in overlay coordinates) that gives the
//!   overlay first refusal for touches inside it, e.g. while a menu is open.
//! - An edit-mode flag that lets the control layer take touches for layout editing.
//!
//! ## Ordering
//!
//! See [`router`] for the decision order. If no consumer accepts, the gesture is pass-through:
//! it is forwarded to neither consumer and is left for the engine's raw touch stream.
//!
//! ## Sessions
//!
//! A session spans from `Down` to `Up` or `Cancel`. Its target is fixed when it opens; later
//! events, including extra fingers, go to the same target. `Cancel` closes the session
//! without any undo. Pointer claims made by consumers are theirs to release.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_gesture_router::router::GestureRouter;
//! use understory_gesture_router::types::{PointerEvent, RouteTarget, TouchPhase};
//!
//! let mut router = GestureRouter::new();
//! router.set_active_region(Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
//!
//! // The overlay takes anything offered to it; the control layer takes nothing.
//! let mut overlay = |_: &PointerEvent<i32>| true;
//! let mut controls = |_: &PointerEvent<i32>| false;
//!
//! let down = PointerEvent::single(TouchPhase::Down, 1, Point::new(50.0, 50.0));
//! let routed = router.handle(&down, &mut overlay, &mut controls);
//! assert_eq!(routed.target, RouteTarget::Overlay);
//!
//! // The decision sticks even when the finger leaves the region.
//! let moved = PointerEvent::single(TouchPhase::Move, 1, Point::new(500.0, 500.0));
//! assert_eq!(router.handle(&moved, &mut overlay, &mut controls).target, RouteTarget::Overlay);
//!
//! let up = PointerEvent::single(TouchPhase::Up, 1, Point::new(500.0, 500.0));
//! assert!(router.handle(&up, &mut overlay, &mut controls).session_ended);
//! assert!(router.session().is_none());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for `kurbo`'s floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod router;
pub mod types;
