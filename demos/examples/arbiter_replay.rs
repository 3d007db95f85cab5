// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replay a short multi-touch session through `understory_input_arbiter`.
//!
//! This example shows how to combine:
//! - a host [`EngineBridge`] that prints what the engine would receive,
//! - an overlay with a menu button and a control layer with an on-screen joystick,
//! - `understory_pointer_claims` so the joystick finger never reaches the engine, even though
//!   its gesture is routed to pass-through,
//! - `understory_control_input` to turn the joystick into a virtual mouse cursor.
//!
//! Run:
//! - `cargo run -p understory_demos --example arbiter_replay`

use std::sync::Arc;
use std::time::Duration;

use kurbo::{Circle, Point, Rect, Shape};
use understory_control_input::{AimConfig, VirtualAim};
use understory_engine_bridge::{BridgeError, EngineBridge, InputEvent, PointerId, TouchFrame};
use understory_gesture_router::types::{PointerEvent, TouchPhase};
use understory_input_arbiter::{ArbiterConfig, InputArbiter};
use understory_pointer_claims::PointerClaims;

const SCREEN_W: u32 = 1280;
const SCREEN_H: u32 = 720;

/// Stand-in engine that prints everything it is sent.
#[derive(Debug)]
struct PrintingEngine;

impl EngineBridge for PrintingEngine {
    fn probe(&self) -> Result<(), BridgeError> {
        Ok(())
    }

    fn publish_touch_frame(&self, frame: &TouchFrame) -> Result<(), BridgeError> {
        let samples: Vec<String> = frame
            .samples()
            .iter()
            .map(|s| format!("#{}@({:.3}, {:.3})", s.pointer_id, s.x, s.y))
            .collect();
        println!("  engine <- frame [{}]", samples.join(", "));
        Ok(())
    }

    fn emit_input_event(&self, event: InputEvent) -> Result<(), BridgeError> {
        println!("  engine <- {event:?}");
        Ok(())
    }

    fn notify_claim(&self, pointer_id: PointerId) -> Result<(), BridgeError> {
        println!("  engine <- claim #{pointer_id}");
        Ok(())
    }

    fn notify_release(&self, pointer_id: PointerId) -> Result<(), BridgeError> {
        println!("  engine <- release #{pointer_id}");
        Ok(())
    }
}

/// On-screen joystick: claims the finger that lands on it and steers a virtual cursor.
struct Joystick {
    pad: Circle,
    claims: Arc<PointerClaims>,
    aim: VirtualAim,
    finger: Option<PointerId>,
}

impl Joystick {
    fn handle(&mut self, event: &PointerEvent<PointerId>) {
        let Some(action) = event.action_pointer() else {
            return;
        };
        match event.phase {
            TouchPhase::Down | TouchPhase::PointerDown => {
                if self.finger.is_some() || !self.pad.contains(action.position) {
                    return;
                }
                self.claims.claim(action.id);
                self.finger = Some(action.id);
            }
            TouchPhase::Up | TouchPhase::PointerUp | TouchPhase::Cancel => {
                if self.finger == Some(action.id) || event.phase == TouchPhase::Cancel {
                    if let Some(id) = self.finger.take() {
                        self.claims.release(id);
                    }
                    self.aim.set_stick(0.0, 0.0);
                }
            }
            TouchPhase::Move => {}
        }
        if let Some(id) = self.finger
            && let Some(p) = event.pointers.iter().find(|p| p.id == id)
        {
            let d = (p.position - self.pad.center) / self.pad.radius;
            self.aim.set_stick(d.x, d.y);
        }
    }
}

fn main() {
    let mut arbiter = InputArbiter::new(
        Arc::new(PrintingEngine),
        ArbiterConfig::with_screen(SCREEN_W, SCREEN_H),
    );

    let menu_button = Rect::new(1180.0, 20.0, 1260.0, 80.0);
    let mut overlay = |e: &PointerEvent<PointerId>| {
        e.action_pointer()
            .is_some_and(|p| menu_button.contains(p.position))
    };

    let aim = VirtualAim::new(
        arbiter.input().clone(),
        AimConfig {
            speed: 400.0,
            ..AimConfig::default()
        },
        arbiter.config().screen_size(),
    );
    let mut joystick = Joystick {
        pad: Circle::new((1100.0, 600.0), 80.0),
        claims: Arc::clone(arbiter.claims()),
        aim,
        finger: None,
    };

    // Outside layout edit mode the router never offers touches to the control layer. On-screen
    // controls see raw touches on their own and claim what they take; the router only decides
    // between the overlay and the engine.
    let mut controls = |_: &PointerEvent<PointerId>| false;

    let steps: Vec<(&str, PointerEvent<PointerId>)> = vec![
        (
            "tap the menu button",
            PointerEvent::single(TouchPhase::Down, 0, Point::new(1200.0, 50.0)),
        ),
        (
            "lift",
            PointerEvent::single(TouchPhase::Up, 0, Point::new(1200.0, 50.0)),
        ),
        (
            "thumb on the joystick",
            PointerEvent::single(TouchPhase::Down, 1, Point::new(1100.0, 600.0)),
        ),
        (
            "push right",
            PointerEvent::single(TouchPhase::Move, 1, Point::new(1170.0, 600.0)),
        ),
        (
            "second finger taps the game",
            PointerEvent::new(
                TouchPhase::PointerDown,
                [(1, Point::new(1170.0, 600.0)), (2, Point::new(400.0, 300.0))],
            )
            .with_action_index(1),
        ),
        (
            "second finger lifts",
            PointerEvent::new(
                TouchPhase::PointerUp,
                [(1, Point::new(1170.0, 600.0)), (2, Point::new(400.0, 300.0))],
            )
            .with_action_index(1),
        ),
        (
            "thumb lifts",
            PointerEvent::single(TouchPhase::Up, 1, Point::new(1170.0, 600.0)),
        ),
    ];

    for (label, event) in steps {
        println!("\n== {label} ({:?}) ==", event.phase);
        // Before arbitration, so the frame built for this event already leaves its finger out.
        joystick.handle(&event);
        let out = arbiter.on_pointer_event(&event, &mut overlay, &mut controls);
        println!(
            "  routed to {:?} (handled: {})",
            out.routed.target, out.routed.handled
        );
        if joystick.finger.is_some() {
            // Two display frames of cursor motion while the thumb is held.
            for _ in 0..2 {
                joystick.aim.tick(Duration::from_millis(16));
            }
        }
    }

    println!("\n== teardown ==");
    arbiter.teardown();
}
