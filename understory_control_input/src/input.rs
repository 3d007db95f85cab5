// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event emission for virtual controls.

use understory_engine_bridge::{
    GamepadButton, GuardedBridge, InputEvent, KeyCode, MouseButton, StickId, TriggerId,
};

/// Sends synthesized input to the downstream engine.
///
/// Each method emits exactly one [`InputEvent`] and returns whether the engine accepted it.
/// Delivery is best-effort: with an unavailable or failing bridge every call is a no-op.
///
/// Cloning is cheap; all clones share the same [`GuardedBridge`].
#[derive(Clone, Debug)]
pub struct ControlInput {
    bridge: GuardedBridge,
}

impl ControlInput {
    /// Create a control bridge that emits through `bridge`.
    pub fn new(bridge: GuardedBridge) -> Self {
        Self { bridge }
    }

    /// Key press or release.
    pub fn send_key(&self, code: KeyCode, down: bool) -> bool {
        self.emit(InputEvent::Key { code, down })
    }

    /// Button edge at `(x, y)`.
    ///
    /// The warp and the edge travel as a single event, so no other pointer motion can land
    /// between them.
    pub fn send_mouse_button(&self, button: MouseButton, down: bool, x: f32, y: f32) -> bool {
        self.emit(InputEvent::MouseButton { button, down, x, y })
    }

    /// Relative pointer motion.
    pub fn send_mouse_move(&self, dx: f32, dy: f32) -> bool {
        self.emit(InputEvent::MouseMove { dx, dy })
    }

    /// Wheel scroll; positive scrolls up.
    pub fn send_mouse_wheel(&self, dy: f32) -> bool {
        self.emit(InputEvent::MouseWheel { dy })
    }

    /// Absolute pointer warp.
    pub fn send_mouse_position(&self, x: f32, y: f32) -> bool {
        self.emit(InputEvent::MousePosition { x, y })
    }

    /// Stick deflection. Each axis is clamped to `[-1, 1]`; `NaN` becomes `0`.
    pub fn send_stick(&self, stick: StickId, x: f32, y: f32) -> bool {
        self.emit(InputEvent::StickAxis {
            stick,
            x: clamp_axis(x, -1.0, 1.0),
            y: clamp_axis(y, -1.0, 1.0),
        })
    }

    /// Gamepad button edge.
    pub fn send_gamepad_button(&self, button: GamepadButton, down: bool) -> bool {
        self.emit(InputEvent::GamepadButton { button, down })
    }

    /// Trigger pull, clamped to `[0, 1]`; `NaN` becomes `0`.
    pub fn send_trigger(&self, trigger: TriggerId, value: f32) -> bool {
        self.emit(InputEvent::Trigger {
            trigger,
            value: clamp_axis(value, 0.0, 1.0),
        })
    }

    /// Ask the engine to start text input, e.g. when a soft keyboard opens.
    pub fn start_text_input(&self) -> bool {
        self.emit(InputEvent::TextInput { active: true })
    }

    /// Ask the engine to stop text input.
    pub fn stop_text_input(&self) -> bool {
        self.emit(InputEvent::TextInput { active: false })
    }

    fn emit(&self, event: InputEvent) -> bool {
        log::trace!("emit {event:?}");
        self.bridge.emit_input_event(event)
    }
}

fn clamp_axis(v: f32, min: f32, max: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(min, max) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use understory_engine_bridge::{Operations, RecordingBridge};

    fn recorded() -> (ControlInput, Arc<RecordingBridge>) {
        let recording = Arc::new(RecordingBridge::new());
        (
            ControlInput::new(GuardedBridge::new(recording.clone())),
            recording,
        )
    }

    #[test]
    fn each_call_emits_one_event() {
        let (input, recording) = recorded();
        assert!(input.send_key(KeyCode::SPACE, true));
        input.send_mouse_button(MouseButton::Left, true, 640.0, 360.0);
        input.send_mouse_move(3.0, -2.0);
        input.send_mouse_wheel(1.0);
        input.send_mouse_position(10.0, 20.0);
        input.send_gamepad_button(GamepadButton::A, false);
        input.start_text_input();
        input.stop_text_input();

        assert_eq!(
            recording.events(),
            vec![
                InputEvent::Key {
                    code: KeyCode::SPACE,
                    down: true,
                },
                InputEvent::MouseButton {
                    button: MouseButton::Left,
                    down: true,
                    x: 640.0,
                    y: 360.0,
                },
                InputEvent::MouseMove { dx: 3.0, dy: -2.0 },
                InputEvent::MouseWheel { dy: 1.0 },
                InputEvent::MousePosition { x: 10.0, y: 20.0 },
                InputEvent::GamepadButton {
                    button: GamepadButton::A,
                    down: false,
                },
                InputEvent::TextInput { active: true },
                InputEvent::TextInput { active: false },
            ]
        );
    }

    #[test]
    fn stick_axes_are_clamped() {
        let (input, recording) = recorded();
        input.send_stick(StickId::Left, 1.7, -3.0);
        input.send_stick(StickId::Right, f32::NAN, 0.25);
        assert_eq!(
            recording.events(),
            vec![
                InputEvent::StickAxis {
                    stick: StickId::Left,
                    x: 1.0,
                    y: -1.0,
                },
                InputEvent::StickAxis {
                    stick: StickId::Right,
                    x: 0.0,
                    y: 0.25,
                },
            ]
        );
    }

    #[test]
    fn triggers_are_clamped() {
        let (input, recording) = recorded();
        input.send_trigger(TriggerId::Left, -0.5);
        input.send_trigger(TriggerId::Right, 2.0);
        input.send_trigger(TriggerId::Right, f32::NAN);
        let values: Vec<f32> = recording
            .events()
            .iter()
            .filter_map(|e| match e {
                InputEvent::Trigger { value, .. } => Some(*value),
                _ => None,
            })
            .collect();
        assert_eq!(values, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn failing_engine_is_absorbed() {
        let recording = Arc::new(RecordingBridge::failing(Operations::EMIT_INPUT_EVENT));
        let input = ControlInput::new(GuardedBridge::new(recording.clone()));
        assert!(!input.send_key(KeyCode::W, true));
        assert!(!input.send_key(KeyCode::W, false));
        assert!(recording.events().is_empty());
    }

    #[test]
    fn unavailable_engine_is_a_no_op() {
        let recording = Arc::new(RecordingBridge::unavailable());
        let input = ControlInput::new(GuardedBridge::new(recording.clone()));
        assert!(!input.send_mouse_wheel(-1.0));
        assert!(recording.records().is_empty());
    }
}
