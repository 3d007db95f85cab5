// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual mouse aim driven by a stick.
//!
//! A stick deflected past its deadzone moves an on-screen cursor at a constant rate per unit
//! of deflection. The cursor is state: it stays where it was left when the stick returns to
//! rest, and the next deflection continues from there.
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use kurbo::{Point, Size};
//! use understory_control_input::{AimConfig, AimState, ControlInput, VirtualAim};
//! use understory_engine_bridge::{GuardedBridge, InputEvent, RecordingBridge};
//!
//! let recording = Arc::new(RecordingBridge::new());
//! let input = ControlInput::new(GuardedBridge::new(recording.clone()));
//! let mut aim = VirtualAim::new(input, AimConfig::default(), Size::new(800.0, 600.0));
//! assert_eq!(aim.position(), Point::new(400.0, 300.0));
//!
//! aim.set_stick(1.0, 0.0);
//! assert_eq!(aim.state(), AimState::Active);
//! aim.tick(Duration::from_millis(500));
//! assert_eq!(recording.events(), vec![InputEvent::MousePosition { x: 440.0, y: 300.0 }]);
//! ```

use std::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};

use crate::input::ControlInput;

/// Part of the screen the aim cursor may reach, as fractions of the screen size.
///
/// Each field is how far the box extends from the screen center towards that edge: `1.0`
/// reaches the edge, `0.0` stays on the center line. With `left = 0.5` the cursor cannot move
/// further left than a quarter of the screen width.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AimRange {
    /// Extent towards the left edge.
    pub left: f64,
    /// Extent towards the top edge.
    pub top: f64,
    /// Extent towards the right edge.
    pub right: f64,
    /// Extent towards the bottom edge.
    pub bottom: f64,
}

impl AimRange {
    /// The whole screen.
    pub const FULL: Self = Self {
        left: 1.0,
        top: 1.0,
        right: 1.0,
        bottom: 1.0,
    };

    /// This range, or [`AimRange::FULL`] if any extent lies outside `[0, 1]`.
    pub fn sanitized(self) -> Self {
        let valid = [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| (0.0..=1.0).contains(v));
        if valid {
            self
        } else {
            log::warn!("aim range {self:?} outside [0, 1]; using the full screen");
            Self::FULL
        }
    }

    /// Pixel bounds of the range on a screen of the given size.
    ///
    /// A box with no extent on either axis collapses to the screen center.
    pub fn bounds(self, screen: Size) -> Rect {
        let r = self.sanitized();
        let (x0, x1) = (
            (0.5 - r.left / 2.0) * screen.width,
            (0.5 + r.right / 2.0) * screen.width,
        );
        let (y0, y1) = (
            (0.5 - r.top / 2.0) * screen.height,
            (0.5 + r.bottom / 2.0) * screen.height,
        );
        if x0 >= x1 || y0 >= y1 {
            return Rect::from_center_size(screen.to_rect().center(), Size::ZERO);
        }
        Rect::new(x0, y0, x1, y1)
    }
}

impl Default for AimRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// Tuning for [`VirtualAim`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AimConfig {
    /// Stick magnitude, in `[0, 1]`, the deflection must exceed to move the cursor.
    pub deadzone: f64,
    /// Cursor speed in pixels per second at full deflection.
    pub speed: f64,
    /// Reachable part of the screen.
    pub range: AimRange,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            deadzone: 0.05,
            speed: 80.0,
            range: AimRange::FULL,
        }
    }
}

/// Whether the aim stick is currently steering the cursor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AimState {
    /// Stick at rest; ticks emit nothing.
    #[default]
    Idle,
    /// Stick deflected; every tick moves the cursor and emits its position.
    Active,
}

/// Stick-driven absolute mouse cursor.
///
/// The cursor is kept inside [`VirtualAim::bounds`] and on the last on-screen pixel row and
/// column, so it never reaches `x = width` or `y = height`.
#[derive(Clone, Debug)]
pub struct VirtualAim {
    input: ControlInput,
    config: AimConfig,
    screen: Size,
    bounds: Rect,
    position: Point,
    stick: Vec2,
    state: AimState,
}

impl VirtualAim {
    /// Create an idle aim with the cursor at the center of its bounds.
    pub fn new(input: ControlInput, config: AimConfig, screen: Size) -> Self {
        let bounds = config.range.bounds(screen);
        let mut aim = Self {
            input,
            config,
            screen,
            bounds,
            position: bounds.center(),
            stick: Vec2::ZERO,
            state: AimState::Idle,
        };
        aim.position = aim.clamp(aim.position);
        aim
    }

    /// Current state.
    pub fn state(&self) -> AimState {
        self.state
    }

    /// Current cursor position in pixels.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Pixel box of the configured [`AimRange`].
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Active configuration.
    pub fn config(&self) -> &AimConfig {
        &self.config
    }

    /// Recompute the bounds for a new screen size, keeping the cursor inside them.
    pub fn set_screen_size(&mut self, screen: Size) {
        self.screen = screen;
        self.bounds = self.config.range.bounds(screen);
        self.position = self.clamp(self.position);
    }

    /// Replace the configuration, keeping the cursor inside the new range.
    pub fn set_config(&mut self, config: AimConfig) {
        self.config = config;
        self.set_screen_size(self.screen);
    }

    /// Move the cursor without emitting anything.
    pub fn set_position(&mut self, position: Point) {
        self.position = self.clamp(position);
    }

    /// Update the stick deflection, each axis in `[-1, 1]` with `y` pointing down.
    ///
    /// Out-of-range values are clamped and `NaN` counts as rest. Returns the resulting state.
    pub fn set_stick(&mut self, x: f64, y: f64) -> AimState {
        self.stick = Vec2::new(axis(x), axis(y));
        let next = if self.stick.hypot() > self.config.deadzone {
            AimState::Active
        } else {
            AimState::Idle
        };
        if next != self.state {
            log::debug!("virtual aim {:?} -> {next:?}", self.state);
            self.state = next;
        }
        next
    }

    /// Advance by `dt`. While active, moves the cursor and emits a `MousePosition`.
    ///
    /// Returns the new position if one was emitted.
    pub fn tick(&mut self, dt: Duration) -> Option<Point> {
        if self.state == AimState::Idle {
            return None;
        }
        let step = self.stick * (self.config.speed * dt.as_secs_f64());
        self.position = self.clamp(self.position + step);
        let (x, y) = to_f32(self.position);
        self.input.send_mouse_position(x, y);
        Some(self.position)
    }

    pub(crate) fn input(&self) -> &ControlInput {
        &self.input
    }

    fn clamp(&self, p: Point) -> Point {
        let last_x = (self.screen.width - 1.0).max(0.0);
        let last_y = (self.screen.height - 1.0).max(0.0);
        Point::new(
            p.x.clamp(self.bounds.x0, self.bounds.x1).clamp(0.0, last_x),
            p.y.clamp(self.bounds.y0, self.bounds.y1).clamp(0.0, last_y),
        )
    }
}

pub(crate) fn axis(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Screen coordinates are far below the range where f32 loses whole pixels."
)]
pub(crate) fn to_f32(p: Point) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}
