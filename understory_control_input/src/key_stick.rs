// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stick-to-keyboard mapping for games without gamepad support.

use bitflags::bitflags;
use understory_engine_bridge::KeyCode;

use crate::input::ControlInput;

bitflags! {
    /// Directional keys held for a [`Direction`].
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct DirectionKeys: u8 {
        /// Up key.
        const UP = 1 << 0;
        /// Right key.
        const RIGHT = 1 << 1;
        /// Down key.
        const DOWN = 1 << 2;
        /// Left key.
        const LEFT = 1 << 3;
    }
}

/// One of eight 45° sectors, counter-clockwise from the right.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Centered on 0°.
    Right,
    /// Centered on 45°.
    UpRight,
    /// Centered on 90°.
    Up,
    /// Centered on 135°.
    UpLeft,
    /// Centered on 180°.
    Left,
    /// Centered on 225°.
    DownLeft,
    /// Centered on 270°.
    Down,
    /// Centered on 315°.
    DownRight,
}

impl Direction {
    const SECTORS: [Self; 8] = [
        Self::Right,
        Self::UpRight,
        Self::Up,
        Self::UpLeft,
        Self::Left,
        Self::DownLeft,
        Self::Down,
        Self::DownRight,
    ];

    /// Sector of a stick deflection (`y` pointing down), or `None` inside `deadzone`.
    ///
    /// Each sector spans ±22.5° around its center, so `Right` covers `[-22.5°, 22.5°)`.
    pub fn from_stick(x: f64, y: f64, deadzone: f64) -> Option<Self> {
        if x.is_nan() || y.is_nan() || x.hypot(y) < deadzone {
            return None;
        }
        let mut angle = (-y).atan2(x).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "The quotient is in [0, 8.5), so the integer part fits any usize."
        )]
        let sector = ((angle + 22.5) / 45.0) as usize % 8;
        Some(Self::SECTORS[sector])
    }

    /// Keys held for this direction.
    pub fn keys(self) -> DirectionKeys {
        match self {
            Self::Right => DirectionKeys::RIGHT,
            Self::UpRight => DirectionKeys::UP | DirectionKeys::RIGHT,
            Self::Up => DirectionKeys::UP,
            Self::UpLeft => DirectionKeys::UP | DirectionKeys::LEFT,
            Self::Left => DirectionKeys::LEFT,
            Self::DownLeft => DirectionKeys::DOWN | DirectionKeys::LEFT,
            Self::Down => DirectionKeys::DOWN,
            Self::DownRight => DirectionKeys::DOWN | DirectionKeys::RIGHT,
        }
    }
}

/// Key bindings and deadzone for a [`KeyStick`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyStickConfig {
    /// Key for up.
    pub up: KeyCode,
    /// Key for right.
    pub right: KeyCode,
    /// Key for down.
    pub down: KeyCode,
    /// Key for left.
    pub left: KeyCode,
    /// Deflection below which no key is held.
    pub deadzone: f64,
}

impl Default for KeyStickConfig {
    /// WASD with a 0.3 deadzone.
    fn default() -> Self {
        Self {
            up: KeyCode::W,
            right: KeyCode::D,
            down: KeyCode::S,
            left: KeyCode::A,
            deadzone: 0.3,
        }
    }
}

impl KeyStickConfig {
    /// Keys for `keys`, vertical before horizontal.
    fn codes(&self, keys: DirectionKeys) -> impl Iterator<Item = KeyCode> {
        [
            (DirectionKeys::UP, self.up),
            (DirectionKeys::DOWN, self.down),
            (DirectionKeys::RIGHT, self.right),
            (DirectionKeys::LEFT, self.left),
        ]
        .into_iter()
        .filter(move |(flag, _)| keys.contains(*flag))
        .map(|(_, code)| code)
    }
}

/// Eight-way stick that holds directional keys.
///
/// Only direction changes produce events: the keys of the old direction are released, then the
/// keys of the new one are pressed. A key shared by both directions is released and pressed
/// again.
#[derive(Clone, Debug)]
pub struct KeyStick {
    input: ControlInput,
    config: KeyStickConfig,
    direction: Option<Direction>,
}

impl KeyStick {
    /// Create a centered stick.
    pub fn new(input: ControlInput, config: KeyStickConfig) -> Self {
        Self {
            input,
            config,
            direction: None,
        }
    }

    /// Direction currently held, if any.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Key bindings.
    pub fn config(&self) -> &KeyStickConfig {
        &self.config
    }

    /// Update the deflection (`y` pointing down) and emit key edges for a direction change.
    pub fn set_stick(&mut self, x: f64, y: f64) -> Option<Direction> {
        let next = Direction::from_stick(x, y, self.config.deadzone);
        if next != self.direction {
            log::debug!("key stick {:?} -> {next:?}", self.direction);
            if let Some(old) = self.direction {
                for code in self.config.codes(old.keys()) {
                    self.input.send_key(code, false);
                }
            }
            if let Some(new) = next {
                for code in self.config.codes(new.keys()) {
                    self.input.send_key(code, true);
                }
            }
            self.direction = next;
        }
        next
    }

    /// Let go of the stick, releasing any held keys.
    pub fn release(&mut self) {
        self.set_stick(0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use understory_engine_bridge::{GuardedBridge, InputEvent, Record, RecordingBridge};

    fn stick() -> (KeyStick, Arc<RecordingBridge>) {
        let recording = Arc::new(RecordingBridge::new());
        let input = ControlInput::new(GuardedBridge::new(recording.clone()));
        (KeyStick::new(input, KeyStickConfig::default()), recording)
    }

    fn key_edges(recording: &RecordingBridge) -> Vec<(KeyCode, bool)> {
        recording
            .take()
            .into_iter()
            .filter_map(|r| match r {
                Record::Event(InputEvent::Key { code, down }) => Some((code, down)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn sectors_cover_the_circle() {
        let cases = [
            ((1.0, 0.0), Direction::Right),
            ((1.0, -1.0), Direction::UpRight),
            ((0.0, -1.0), Direction::Up),
            ((-1.0, -1.0), Direction::UpLeft),
            ((-1.0, 0.0), Direction::Left),
            ((-1.0, 1.0), Direction::DownLeft),
            ((0.0, 1.0), Direction::Down),
            ((1.0, 1.0), Direction::DownRight),
            // 20° below the horizontal still counts as right.
            ((0.94, 0.34), Direction::Right),
        ];
        for ((x, y), expected) in cases {
            assert_eq!(
                Direction::from_stick(x, y, 0.3),
                Some(expected),
                "({x}, {y})"
            );
        }
    }

    #[test]
    fn deadzone_holds_nothing() {
        assert_eq!(Direction::from_stick(0.2, 0.2, 0.3), None);
        assert_eq!(Direction::from_stick(f64::NAN, 1.0, 0.3), None);
    }

    #[test]
    fn diagonal_presses_both_keys() {
        let (mut stick, recording) = stick();
        stick.set_stick(0.7, 0.7);
        assert_eq!(
            key_edges(&recording),
            vec![(KeyCode::S, true), (KeyCode::D, true)]
        );
    }

    #[test]
    fn direction_change_releases_then_presses() {
        let (mut stick, recording) = stick();
        stick.set_stick(0.0, -1.0);
        recording.take();

        stick.set_stick(0.7, -0.7);
        assert_eq!(
            key_edges(&recording),
            vec![
                (KeyCode::W, false),
                (KeyCode::W, true),
                (KeyCode::D, true),
            ]
        );
    }

    #[test]
    fn same_direction_emits_nothing() {
        let (mut stick, recording) = stick();
        stick.set_stick(1.0, 0.0);
        recording.take();
        stick.set_stick(0.6, 0.1);
        assert!(key_edges(&recording).is_empty());
        assert_eq!(stick.direction(), Some(Direction::Right));
    }

    #[test]
    fn release_lets_go_of_held_keys() {
        let (mut stick, recording) = stick();
        stick.set_stick(-0.7, -0.7);
        recording.take();
        stick.release();
        assert_eq!(
            key_edges(&recording),
            vec![(KeyCode::W, false), (KeyCode::A, false)]
        );
        assert_eq!(stick.direction(), None);
    }
}
