// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthesized input protocol.

/// Keyboard scancode, using USB HID usage ids (the numbering SDL scancodes follow).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyCode(pub u16);

impl KeyCode {
    /// `A`.
    pub const A: Self = Self(4);
    /// `D`.
    pub const D: Self = Self(7);
    /// `S`.
    pub const S: Self = Self(22);
    /// `W`.
    pub const W: Self = Self(26);
    /// Return / Enter.
    pub const ENTER: Self = Self(40);
    /// Escape.
    pub const ESCAPE: Self = Self(41);
    /// Tab.
    pub const TAB: Self = Self(43);
    /// Space bar.
    pub const SPACE: Self = Self(44);
    /// Right arrow.
    pub const RIGHT: Self = Self(79);
    /// Left arrow.
    pub const LEFT: Self = Self(80);
    /// Down arrow.
    pub const DOWN: Self = Self(81);
    /// Up arrow.
    pub const UP: Self = Self(82);
    /// Left control.
    pub const LEFT_CTRL: Self = Self(224);
    /// Left shift.
    pub const LEFT_SHIFT: Self = Self(225);
}

/// Mouse button.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
}

impl MouseButton {
    /// One-based button index as used by SDL (`1` left, `2` middle, `3` right).
    pub const fn index(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Middle => 2,
            Self::Right => 3,
        }
    }
}

/// Analog stick of the virtual gamepad.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StickId {
    /// Left stick, usually movement.
    Left,
    /// Right stick, usually camera or aim.
    Right,
}

/// Analog trigger of the virtual gamepad.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerId {
    /// Left trigger.
    Left,
    /// Right trigger.
    Right,
}

/// Digital button of the virtual gamepad (Xbox layout).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamepadButton {
    /// A (south).
    A,
    /// B (east).
    B,
    /// X (west).
    X,
    /// Y (north).
    Y,
    /// Back / View.
    Back,
    /// Guide / Home.
    Guide,
    /// Start / Menu.
    Start,
    /// Left stick click.
    LeftStick,
    /// Right stick click.
    RightStick,
    /// Left bumper.
    LeftShoulder,
    /// Right bumper.
    RightShoulder,
    /// D-pad up.
    DpadUp,
    /// D-pad down.
    DpadDown,
    /// D-pad left.
    DpadLeft,
    /// D-pad right.
    DpadRight,
}

/// One synthesized input event bound for the downstream engine.
///
/// Coordinates are in screen pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Key edge.
    Key {
        /// Scancode.
        code: KeyCode,
        /// `true` on press, `false` on release.
        down: bool,
    },
    /// Button edge together with an absolute warp to `(x, y)`.
    ///
    /// The engine must apply the warp and the edge as one event so a tap cannot interleave
    /// with other pointer motion.
    MouseButton {
        /// Button.
        button: MouseButton,
        /// `true` on press, `false` on release.
        down: bool,
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Relative pointer motion.
    MouseMove {
        /// Horizontal delta.
        dx: f32,
        /// Vertical delta.
        dy: f32,
    },
    /// Signed wheel scroll; positive scrolls up.
    MouseWheel {
        /// Scroll delta.
        dy: f32,
    },
    /// Absolute warp with no button change.
    MousePosition {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Stick deflection in `[-1, 1]` per axis.
    StickAxis {
        /// Stick.
        stick: StickId,
        /// Horizontal deflection, positive right.
        x: f32,
        /// Vertical deflection, positive down.
        y: f32,
    },
    /// Gamepad button edge.
    GamepadButton {
        /// Button.
        button: GamepadButton,
        /// `true` on press, `false` on release.
        down: bool,
    },
    /// Trigger pull in `[0, 1]`.
    Trigger {
        /// Trigger.
        trigger: TriggerId,
        /// Pull amount.
        value: f32,
    },
    /// Start or stop engine-side text input (soft keyboard composition).
    TextInput {
        /// `true` to start, `false` to stop.
        active: bool,
    },
}
