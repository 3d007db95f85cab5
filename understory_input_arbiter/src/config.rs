// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session configuration.

use kurbo::Size;
use understory_control_input::{AimConfig, AttackConfig, KeyStickConfig, MouseStickConfig};

/// Settings for one [`InputArbiter`](crate::InputArbiter) session.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArbiterConfig {
    /// Screen width in physical pixels, used to normalize touch frames.
    pub screen_width: u32,
    /// Screen height in physical pixels.
    pub screen_height: u32,
    /// Tuning for the stick-driven mouse cursor.
    pub aim: AimConfig,
    /// Fire button behavior of the aim stick.
    pub attack: AttackConfig,
    /// Bindings for the stick-to-keys mapping.
    pub key_stick: KeyStickConfig,
    /// Tuning for the relative-mouse stick.
    pub mouse_stick: MouseStickConfig,
}

impl ArbiterConfig {
    /// Default tuning for a screen of the given size.
    pub fn with_screen(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            ..Self::default()
        }
    }

    /// Screen size as a [`Size`].
    pub fn screen_size(&self) -> Size {
        Size::new(f64::from(self.screen_width), f64::from(self.screen_height))
    }
}

impl Default for ArbiterConfig {
    /// No screen size yet (every touch frame is empty until one is set) and default tuning.
    fn default() -> Self {
        Self {
            screen_width: 0,
            screen_height: 0,
            aim: AimConfig::default(),
            attack: AttackConfig::default(),
            key_stick: KeyStickConfig::default(),
            mouse_stick: MouseStickConfig::default(),
        }
    }
}
