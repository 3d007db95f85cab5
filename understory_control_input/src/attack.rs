// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aim stick that also fires.
//!
//! [`AttackAim`] wraps a [`VirtualAim`]: pushing the stick out of its deadzone both steers the
//! cursor and presses the left mouse button at the cursor, and letting go releases it.

use std::time::Duration;

use kurbo::Point;
use understory_engine_bridge::MouseButton;

use crate::aim::{AimState, VirtualAim, to_f32};

/// How the left button behaves while the stick is deflected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackMode {
    /// Pressed once and held until the stick returns to rest.
    #[default]
    Hold,
    /// Clicked repeatedly, see [`AttackConfig::click_interval`].
    Click,
}

/// Tuning for [`AttackAim`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackConfig {
    /// Button behavior.
    pub mode: AttackMode,
    /// Time between presses in [`AttackMode::Click`].
    pub click_interval: Duration,
    /// How long each click holds the button down in [`AttackMode::Click`].
    pub click_press: Duration,
}

impl Default for AttackConfig {
    /// Hold mode; clicks every 100 ms, each held for 50 ms.
    fn default() -> Self {
        Self {
            mode: AttackMode::Hold,
            click_interval: Duration::from_millis(100),
            click_press: Duration::from_millis(50),
        }
    }
}

/// A [`VirtualAim`] whose deflection also holds or repeatedly clicks the left mouse button.
///
/// Button events are sent at the current cursor position. The wrapped aim keeps its own rules:
/// it still emits nothing when the stick returns to rest, only the button release is sent.
#[derive(Clone, Debug)]
pub struct AttackAim {
    aim: VirtualAim,
    config: AttackConfig,
    firing: bool,
    button_down: bool,
    since_press: Duration,
}

impl AttackAim {
    /// Wrap `aim`. Nothing is pressed until the stick leaves the deadzone.
    pub fn new(aim: VirtualAim, config: AttackConfig) -> Self {
        Self {
            aim,
            config,
            firing: false,
            button_down: false,
            since_press: Duration::ZERO,
        }
    }

    /// The wrapped cursor.
    pub fn aim(&self) -> &VirtualAim {
        &self.aim
    }

    /// Active configuration.
    pub fn config(&self) -> &AttackConfig {
        &self.config
    }

    /// Whether the stick is deflected and the attack is running.
    pub fn is_firing(&self) -> bool {
        self.firing
    }

    /// Whether the left button is currently held.
    pub fn is_button_down(&self) -> bool {
        self.button_down
    }

    /// Update the deflection. Entering the active zone presses the button, leaving it releases.
    pub fn set_stick(&mut self, x: f64, y: f64) -> AimState {
        let state = self.aim.set_stick(x, y);
        match (state, self.firing) {
            (AimState::Active, false) => {
                log::debug!("attack started ({:?})", self.config.mode);
                self.firing = true;
                self.since_press = Duration::ZERO;
                self.button(true);
            }
            (AimState::Idle, true) => {
                log::debug!("attack stopped");
                self.firing = false;
                if self.button_down {
                    self.button(false);
                }
            }
            _ => {}
        }
        state
    }

    /// Advance by `dt`: move the cursor, then drive the click cycle in [`AttackMode::Click`].
    ///
    /// Returns the cursor position if the aim emitted one.
    pub fn tick(&mut self, dt: Duration) -> Option<Point> {
        let moved = self.aim.tick(dt);
        if self.firing && self.config.mode == AttackMode::Click {
            self.since_press += dt;
            if self.button_down && self.since_press >= self.config.click_press {
                self.button(false);
            }
            if self.since_press >= self.config.click_interval {
                self.since_press = Duration::ZERO;
                if self.button_down {
                    self.button(false);
                }
                self.button(true);
            }
        }
        moved
    }

    /// Let go of the stick, releasing the button if it is held.
    pub fn release(&mut self) {
        self.set_stick(0.0, 0.0);
    }

    fn button(&mut self, down: bool) {
        let (x, y) = to_f32(self.aim.position());
        self.aim
            .input()
            .send_mouse_button(MouseButton::Left, down, x, y);
        self.button_down = down;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aim::AimConfig;
    use crate::input::ControlInput;
    use kurbo::Size;
    use std::sync::Arc;
    use understory_engine_bridge::{GuardedBridge, InputEvent, RecordingBridge};

    fn attack(mode: AttackMode) -> (AttackAim, Arc<RecordingBridge>) {
        let recording = Arc::new(RecordingBridge::new());
        let input = ControlInput::new(GuardedBridge::new(recording.clone()));
        let aim = VirtualAim::new(input, AimConfig::default(), Size::new(800.0, 600.0));
        let config = AttackConfig {
            mode,
            ..AttackConfig::default()
        };
        (AttackAim::new(aim, config), recording)
    }

    fn button_edges(recording: &RecordingBridge) -> Vec<bool> {
        recording
            .events()
            .into_iter()
            .filter_map(|e| match e {
                InputEvent::MouseButton {
                    button: MouseButton::Left,
                    down,
                    ..
                } => Some(down),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn hold_presses_at_cursor_and_releases_at_rest() {
        let (mut attack, recording) = attack(AttackMode::Hold);
        attack.set_stick(1.0, 0.0);
        assert!(attack.is_firing());
        attack.tick(Duration::from_secs(1));
        attack.release();

        assert_eq!(
            recording.events(),
            vec![
                InputEvent::MouseButton {
                    button: MouseButton::Left,
                    down: true,
                    x: 400.0,
                    y: 300.0,
                },
                InputEvent::MousePosition { x: 480.0, y: 300.0 },
                InputEvent::MouseButton {
                    button: MouseButton::Left,
                    down: false,
                    x: 480.0,
                    y: 300.0,
                },
            ]
        );
        assert!(!attack.is_button_down());
    }

    #[test]
    fn deflection_inside_deadzone_never_fires() {
        let (mut attack, recording) = attack(AttackMode::Hold);
        attack.set_stick(0.01, 0.0);
        attack.tick(Duration::from_secs(1));
        attack.release();
        assert!(recording.events().is_empty());
    }

    #[test]
    fn hold_ignores_ticks() {
        let (mut attack, recording) = attack(AttackMode::Hold);
        attack.set_stick(0.5, 0.0);
        attack.set_stick(0.7, 0.0);
        for _ in 0..10 {
            attack.tick(Duration::from_millis(50));
        }
        assert_eq!(button_edges(&recording), vec![true]);
    }

    #[test]
    fn click_mode_repeats_until_release() {
        let (mut attack, recording) = attack(AttackMode::Click);
        attack.set_stick(1.0, 0.0);
        for _ in 0..4 {
            attack.tick(Duration::from_millis(50));
        }
        assert_eq!(button_edges(&recording), vec![true, false, true, false, true]);

        attack.release();
        assert_eq!(
            button_edges(&recording),
            vec![true, false, true, false, true, false]
        );
    }

    #[test]
    fn click_mode_release_between_clicks_sends_nothing_more() {
        let (mut attack, recording) = attack(AttackMode::Click);
        attack.set_stick(1.0, 0.0);
        attack.tick(Duration::from_millis(60));
        attack.release();
        assert_eq!(button_edges(&recording), vec![true, false]);
    }
}
