// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine-facing trait.

use crate::error::BridgeError;
use crate::event::InputEvent;
use crate::types::{PointerId, TouchFrame};

bitflags::bitflags! {
    /// Set of bridge operations.
    ///
    /// Used to track which operations already reported a failure and, in
    /// [`RecordingBridge`](crate::RecordingBridge), which operations should fail.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Operations: u8 {
        /// [`EngineBridge::publish_touch_frame`].
        const PUBLISH_TOUCH_FRAME = 0b0000_0001;
        /// [`EngineBridge::emit_input_event`].
        const EMIT_INPUT_EVENT    = 0b0000_0010;
        /// [`EngineBridge::notify_claim`].
        const NOTIFY_CLAIM        = 0b0000_0100;
        /// [`EngineBridge::notify_release`].
        const NOTIFY_RELEASE      = 0b0000_1000;
        /// [`EngineBridge::notify_clear`].
        const NOTIFY_CLEAR        = 0b0001_0000;
    }
}

impl Operations {
    pub(crate) fn label(self) -> &'static str {
        if self == Self::PUBLISH_TOUCH_FRAME {
            "publish_touch_frame"
        } else if self == Self::EMIT_INPUT_EVENT {
            "emit_input_event"
        } else if self == Self::NOTIFY_CLAIM {
            "notify_claim"
        } else if self == Self::NOTIFY_RELEASE {
            "notify_release"
        } else if self == Self::NOTIFY_CLEAR {
            "notify_clear"
        } else {
            "bridge operation"
        }
    }
}

/// Delivery channel to a downstream engine.
///
/// Implemented by the host's native-interop adapter. Every method may fail; callers in
/// this workspace wrap implementations in a [`GuardedBridge`](crate::GuardedBridge) so a
/// failure never escapes into arbitration state.
///
/// Implementations are called from the UI thread and from whatever thread publishes touch
/// frames, so they must not block. Touch frames and claim notifications are delivered while
/// the pointer-claim registry is locked; an implementation must not call back into it.
pub trait EngineBridge: Send + Sync {
    /// Make a harmless call to find out whether the engine side is wired up.
    ///
    /// Called at most once per [`GuardedBridge`](crate::GuardedBridge).
    fn probe(&self) -> Result<(), BridgeError>;

    /// Deliver the pass-through touches of one input frame.
    fn publish_touch_frame(&self, frame: &TouchFrame) -> Result<(), BridgeError>;

    /// Deliver one synthesized input event.
    fn emit_input_event(&self, event: InputEvent) -> Result<(), BridgeError>;

    /// Mirror a new pointer claim.
    fn notify_claim(&self, pointer_id: PointerId) -> Result<(), BridgeError>;

    /// Mirror a pointer release.
    fn notify_release(&self, pointer_id: PointerId) -> Result<(), BridgeError>;

    /// Mirror the removal of every claim at once.
    ///
    /// Engines without a side table can rely on the default, which does nothing.
    fn notify_clear(&self) -> Result<(), BridgeError> {
        Ok(())
    }
}

/// A bridge with nothing behind it.
///
/// The probe fails, so a [`GuardedBridge`](crate::GuardedBridge) over it never forwards
/// anything. Useful for hosts running the UI without an engine, and for tests.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullBridge;

impl EngineBridge for NullBridge {
    fn probe(&self) -> Result<(), BridgeError> {
        Err(BridgeError::Unavailable)
    }

    fn publish_touch_frame(&self, _frame: &TouchFrame) -> Result<(), BridgeError> {
        Err(BridgeError::Unavailable)
    }

    fn emit_input_event(&self, _event: InputEvent) -> Result<(), BridgeError> {
        Err(BridgeError::Unavailable)
    }

    fn notify_claim(&self, _pointer_id: PointerId) -> Result<(), BridgeError> {
        Err(BridgeError::Unavailable)
    }

    fn notify_release(&self, _pointer_id: PointerId) -> Result<(), BridgeError> {
        Err(BridgeError::Unavailable)
    }

    fn notify_clear(&self) -> Result<(), BridgeError> {
        Err(BridgeError::Unavailable)
    }
}
