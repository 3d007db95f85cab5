// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory bridge for headless hosts, replay tools, and tests.

use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::bridge::{EngineBridge, Operations};
use crate::error::BridgeError;
use crate::event::InputEvent;
use crate::types::{PointerId, TouchFrame};

/// One call that reached a [`RecordingBridge`].
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    /// [`EngineBridge::publish_touch_frame`].
    Frame(TouchFrame),
    /// [`EngineBridge::emit_input_event`].
    Event(InputEvent),
    /// [`EngineBridge::notify_claim`].
    Claim(PointerId),
    /// [`EngineBridge::notify_release`].
    Release(PointerId),
    /// [`EngineBridge::notify_clear`].
    Clear,
}

/// A bridge that appends every accepted call to a log.
///
/// It can be built unavailable (the probe fails) or with a set of operations that fail with
/// [`BridgeError::Rejected`]; failed calls are not recorded.
#[derive(Debug)]
pub struct RecordingBridge {
    available: bool,
    failing: Operations,
    probes: AtomicUsize,
    log: Mutex<Vec<Record>>,
}

impl RecordingBridge {
    /// An available bridge on which every call succeeds.
    pub fn new() -> Self {
        Self::build(true, Operations::empty())
    }

    /// A bridge whose probe fails.
    pub fn unavailable() -> Self {
        Self::build(false, Operations::empty())
    }

    /// An available bridge on which the given operations fail.
    pub fn failing(ops: Operations) -> Self {
        Self::build(true, ops)
    }

    fn build(available: bool, failing: Operations) -> Self {
        Self {
            available,
            failing,
            probes: AtomicUsize::new(0),
            log: Mutex::new(Vec::new()),
        }
    }

    /// How many times [`EngineBridge::probe`] ran.
    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::Relaxed)
    }

    /// Snapshot of every recorded call, oldest first.
    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Recorded touch frames, oldest first.
    pub fn frames(&self) -> Vec<TouchFrame> {
        self.lock()
            .iter()
            .filter_map(|r| match r {
                Record::Frame(f) => Some(f.clone()),
                _ => None,
            })
            .collect()
    }

    /// Recorded input events, oldest first.
    pub fn events(&self) -> Vec<InputEvent> {
        self.lock()
            .iter()
            .filter_map(|r| match r {
                Record::Event(e) => Some(*e),
                _ => None,
            })
            .collect()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<Record> {
        core::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, op: Operations, record: Record) -> Result<(), BridgeError> {
        if self.failing.contains(op) {
            return Err(BridgeError::Rejected(format!("{} is configured to fail", op.label())));
        }
        self.lock().push(record);
        Ok(())
    }
}

impl Default for RecordingBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBridge for RecordingBridge {
    fn probe(&self) -> Result<(), BridgeError> {
        self.probes.fetch_add(1, Ordering::Relaxed);
        if self.available {
            Ok(())
        } else {
            Err(BridgeError::Unavailable)
        }
    }

    fn publish_touch_frame(&self, frame: &TouchFrame) -> Result<(), BridgeError> {
        self.record(Operations::PUBLISH_TOUCH_FRAME, Record::Frame(frame.clone()))
    }

    fn emit_input_event(&self, event: InputEvent) -> Result<(), BridgeError> {
        self.record(Operations::EMIT_INPUT_EVENT, Record::Event(event))
    }

    fn notify_claim(&self, pointer_id: PointerId) -> Result<(), BridgeError> {
        self.record(Operations::NOTIFY_CLAIM, Record::Claim(pointer_id))
    }

    fn notify_release(&self, pointer_id: PointerId) -> Result<(), BridgeError> {
        self.record(Operations::NOTIFY_RELEASE, Record::Release(pointer_id))
    }

    fn notify_clear(&self) -> Result<(), BridgeError> {
        self.record(Operations::NOTIFY_CLEAR, Record::Clear)
    }
}
