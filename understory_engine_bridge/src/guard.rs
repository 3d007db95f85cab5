// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Probe-gated wrapper that never lets a bridge failure escape.

use core::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

use crate::bridge::{EngineBridge, Operations};
use crate::error::{BridgeError, FailureKind};
use crate::event::InputEvent;
use crate::types::{PointerId, TouchFrame};

/// Shared, failure-absorbing handle to an [`EngineBridge`].
///
/// ## Semantics
///
/// - The wrapped bridge is probed on the first call that needs it (or on
///   [`GuardedBridge::is_available`]). The answer is cached for the lifetime of the
///   handle and of all its clones; the probe never runs twice.
/// - When the probe failed, every call is a silent no-op.
/// - When a call fails, the failure is logged the first time that operation fails with that
///   [`FailureKind`] and swallowed afterwards. Failures never disable the bridge.
///
/// Every method returns whether the engine accepted the call. Callers are free to ignore it;
/// local state is always updated before the bridge is consulted.
///
/// Clones share the probe result and the failure log, so one handle can be handed to the
/// claim registry, the touch bridge and the control bridge.
#[derive(Clone)]
pub struct GuardedBridge {
    inner: Arc<dyn EngineBridge>,
    state: Arc<GuardState>,
}

struct GuardState {
    available: OnceLock<bool>,
    // Indexed by `FailureKind::slot`, each entry holds the operations already logged.
    reported: [AtomicU8; FailureKind::COUNT],
}

impl core::fmt::Debug for GuardedBridge {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GuardedBridge")
            .field("available", &self.state.available.get())
            .finish_non_exhaustive()
    }
}

impl GuardedBridge {
    /// Wrap a bridge. The probe is deferred until first use.
    pub fn new(inner: Arc<dyn EngineBridge>) -> Self {
        Self {
            inner,
            state: Arc::new(GuardState {
                available: OnceLock::new(),
                reported: [const { AtomicU8::new(0) }; FailureKind::COUNT],
            }),
        }
    }

    /// Whether the probe succeeded, running it if it has not run yet.
    pub fn is_available(&self) -> bool {
        *self
            .state
            .available
            .get_or_init(|| match self.inner.probe() {
                Ok(()) => {
                    log::debug!("engine bridge probe succeeded");
                    true
                }
                Err(err) => {
                    log::info!("engine bridge probe failed ({err}); engine delivery disabled");
                    false
                }
            })
    }

    /// Whether a failure of `op` with `kind` has been logged already.
    pub fn failure_reported(&self, op: Operations, kind: FailureKind) -> bool {
        self.state.reported[kind.slot()].load(Ordering::Relaxed) & op.bits() != 0
    }

    /// Publish a touch frame.
    pub fn publish_touch_frame(&self, frame: &TouchFrame) -> bool {
        self.call(Operations::PUBLISH_TOUCH_FRAME, |b| b.publish_touch_frame(frame))
    }

    /// Emit one input event.
    pub fn emit_input_event(&self, event: InputEvent) -> bool {
        self.call(Operations::EMIT_INPUT_EVENT, |b| b.emit_input_event(event))
    }

    /// Mirror a claim.
    pub fn notify_claim(&self, pointer_id: PointerId) -> bool {
        self.call(Operations::NOTIFY_CLAIM, |b| b.notify_claim(pointer_id))
    }

    /// Mirror a release.
    pub fn notify_release(&self, pointer_id: PointerId) -> bool {
        self.call(Operations::NOTIFY_RELEASE, |b| b.notify_release(pointer_id))
    }

    /// Mirror a full clear.
    pub fn notify_clear(&self) -> bool {
        self.call(Operations::NOTIFY_CLEAR, |b| b.notify_clear())
    }

    fn call(
        &self,
        op: Operations,
        f: impl FnOnce(&dyn EngineBridge) -> Result<(), BridgeError>,
    ) -> bool {
        if !self.is_available() {
            return false;
        }
        match f(&*self.inner) {
            Ok(()) => true,
            Err(err) => {
                self.report(op, &err);
                false
            }
        }
    }

    fn report(&self, op: Operations, err: &BridgeError) {
        let kind = err.kind();
        let prev = self.state.reported[kind.slot()].fetch_or(op.bits(), Ordering::Relaxed);
        if prev & op.bits() == 0 {
            log::warn!(
                "engine bridge {} failed: {err}; further {kind:?} failures of this call are silenced",
                op.label()
            );
        }
    }
}
