// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame touch bridge.

use std::sync::{Arc, Mutex, PoisonError};

use kurbo::Size;
use understory_engine_bridge::{GuardedBridge, PointerId, TouchFrame, TouchSample};
use understory_gesture_router::types::{PointerEvent, TouchPhase};
use understory_pointer_claims::{ClaimedSet, PointerClaims};

use crate::normalize::normalize;

/// Filters claimed pointers out of every input frame and publishes the rest.
///
/// ## Usage
///
/// - Build one per input session with [`TouchBridge::new`], sharing the
///   [`PointerClaims`] the widgets write to.
/// - Call [`TouchBridge::process`] for every raw pointer event, whoever the gesture was
///   routed to.
/// - An engine that pulls instead of being pushed to calls [`TouchBridge::latest`] from its own
///   thread.
///
/// The bridge is independent of gesture routing: a pass-through gesture shows up here simply
/// because nobody claimed its pointers.
#[derive(Debug)]
pub struct TouchBridge {
    claims: Arc<PointerClaims>,
    bridge: GuardedBridge,
    latest: Mutex<Arc<TouchFrame>>,
}

impl TouchBridge {
    /// Create a bridge that filters against `claims` and publishes through `bridge`.
    pub fn new(claims: Arc<PointerClaims>, bridge: GuardedBridge) -> Self {
        Self {
            claims,
            bridge,
            latest: Mutex::new(Arc::new(TouchFrame::default())),
        }
    }

    /// Build, store and publish the frame for one raw pointer event.
    ///
    /// - `Up` and `Cancel` publish an empty frame.
    /// - Otherwise every finger still down is considered in event order; claimed fingers and
    ///   the finger lifting on a `PointerUp` are skipped, and the first
    ///   [`MAX_TOUCH_POINTS`](understory_engine_bridge::MAX_TOUCH_POINTS) remaining ones are
    ///   normalized against the screen size.
    ///
    /// The claim registry stays locked while the frame is built, stored and published, so a
    /// pointer claimed from another thread either makes it into no frame at all or is claimed
    /// only after that frame has reached the engine. Publishing is a no-op when the engine
    /// bridge is unavailable.
    pub fn process(
        &self,
        event: &PointerEvent<PointerId>,
        screen_width: u32,
        screen_height: u32,
    ) -> Arc<TouchFrame> {
        if event.phase.is_terminal() {
            return self.clear(screen_width, screen_height);
        }
        self.claims.with_claimed(|claimed| {
            self.store_and_publish(build_frame(event, claimed, screen_width, screen_height))
        })
    }

    /// Publish an empty frame, e.g. when the input session is torn down mid-gesture.
    pub fn clear(&self, screen_width: u32, screen_height: u32) -> Arc<TouchFrame> {
        self.store_and_publish(TouchFrame::empty(screen_width, screen_height))
    }

    /// The most recently built frame. Safe to call from any thread.
    pub fn latest(&self) -> Arc<TouchFrame> {
        Arc::clone(&self.latest.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn store_and_publish(&self, frame: TouchFrame) -> Arc<TouchFrame> {
        let frame = Arc::new(frame);
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&frame);
        self.bridge.publish_touch_frame(&frame);
        frame
    }
}

fn build_frame(
    event: &PointerEvent<PointerId>,
    claimed: ClaimedSet<'_>,
    screen_width: u32,
    screen_height: u32,
) -> TouchFrame {
    let mut frame = TouchFrame::empty(screen_width, screen_height);
    let screen = Size::new(f64::from(screen_width), f64::from(screen_height));
    if screen.is_zero_area() {
        log::debug!("touch frame dropped: screen size is {screen_width}x{screen_height}");
        return frame;
    }

    let lifting = match event.phase {
        TouchPhase::PointerUp => event.action_pointer().map(|p| p.id),
        _ => None,
    };

    for pointer in &event.pointers {
        if Some(pointer.id) == lifting || claimed.contains(pointer.id) {
            continue;
        }
        let Some(n) = normalize(pointer.position, screen) else {
            continue;
        };
        if !frame.push(TouchSample {
            pointer_id: pointer.id,
            x: unit_f32(n.x),
            y: unit_f32(n.y),
        }) {
            break;
        }
    }
    frame
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Values are clamped to [0, 1], well within f32 precision."
)]
fn unit_f32(v: f64) -> f32 {
    v.clamp(0.0, 1.0) as f32
}
