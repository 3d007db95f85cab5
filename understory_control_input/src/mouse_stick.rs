// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stick as a relative mouse.

use kurbo::Vec2;

use crate::aim::{axis, to_f32};
use crate::input::ControlInput;

/// Tuning for [`MouseStick`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MouseStickConfig {
    /// Stick magnitude the deflection must exceed to move the mouse.
    pub deadzone: f64,
    /// Mouse motion, in pixels, per stick sample at full deflection.
    pub sensitivity: f64,
}

impl Default for MouseStickConfig {
    fn default() -> Self {
        Self {
            deadzone: 0.05,
            sensitivity: 15.0,
        }
    }
}

/// Turns every stick sample into a relative mouse move.
///
/// Unlike [`VirtualAim`](crate::VirtualAim) there is no cursor state: the engine moves its own
/// pointer by the emitted delta.
#[derive(Clone, Debug)]
pub struct MouseStick {
    input: ControlInput,
    config: MouseStickConfig,
}

impl MouseStick {
    /// Create a mapper emitting through `input`.
    pub fn new(input: ControlInput, config: MouseStickConfig) -> Self {
        Self { input, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &MouseStickConfig {
        &self.config
    }

    /// Emit a `MouseMove` for one stick sample (`y` pointing down).
    ///
    /// Returns the delta sent, or `None` inside the deadzone.
    pub fn set_stick(&self, x: f64, y: f64) -> Option<Vec2> {
        let stick = Vec2::new(axis(x), axis(y));
        if stick.hypot() <= self.config.deadzone {
            return None;
        }
        let delta = stick * self.config.sensitivity;
        let (dx, dy) = to_f32(delta.to_point());
        self.input.send_mouse_move(dx, dy);
        Some(delta)
    }
}
