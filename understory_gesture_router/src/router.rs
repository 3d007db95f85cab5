// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Decides once per gesture which consumer owns the touch sequence, then forwards every later
//! event of that gesture to the same consumer.
//!
//! ## Target Selection
//!
//! Runs on the `Down` that opens a session, in this order:
//!
//! - If an active region is set and contains the touch, offer the event to the overlay.
//! - Otherwise, in edit mode, offer it to the control layer.
//! - Otherwise offer it to the overlay again (floating affordances live outside any region).
//! - If nobody accepted, the session is pass-through.
//!
//! The overlay can be asked twice for one `Down` when the touch is inside the active region,
//! the overlay declines there, and edit mode is off or the control layer declines too.
//!
//! ## Stickiness
//!
//! Nothing re-runs the decision until the session ends. A second finger landing inside a
//! region that became active mid-gesture still goes to the session's target.

use kurbo::Rect;
use smallvec::SmallVec;

use crate::types::{PointerEvent, RouteTarget, Routed, TouchConsumer, TouchPhase};

/// Bookkeeping for one gesture: the fingers down since the opening `Down`, and where they go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GestureSession<P> {
    target: RouteTarget,
    pointers: SmallVec<[P; 10]>,
}

impl<P: Copy + Eq> GestureSession<P> {
    /// Resolved target of the session.
    pub fn target(&self) -> RouteTarget {
        self.target
    }

    /// Fingers currently down in the session.
    pub fn pointers(&self) -> &[P] {
        &self.pointers
    }

    /// Whether `id` is part of the session.
    pub fn contains(&self, id: P) -> bool {
        self.pointers.contains(&id)
    }

    fn add(&mut self, id: P) {
        if !self.pointers.contains(&id) {
            self.pointers.push(id);
        }
    }

    fn remove(&mut self, id: P) {
        self.pointers.retain(|p| *p != id);
    }
}

/// Once-per-gesture router between an overlay, a control layer, and pass-through.
///
/// ## Usage
///
/// - Construct with [`GestureRouter::new`].
/// - Keep the UI signals current:
///   - [`GestureRouter::set_active_region`] whenever the overlay's interactive area changes
///     (a menu opens or closes). The region is replaced wholesale.
///   - [`GestureRouter::set_edit_mode`] when layout editing starts or stops.
/// - Call [`GestureRouter::handle`] for every raw pointer event, in arrival order, passing the
///   two candidate consumers.
///
/// The router is single-threaded state, owned by the UI dispatch context.
/// It never touches pointer claims; releasing them is the job of whoever claimed them.
#[derive(Clone, Debug)]
pub struct GestureRouter<P> {
    active_region: Option<Rect>,
    edit_mode: bool,
    session: Option<GestureSession<P>>,
}

impl<P: Copy + Eq + core::fmt::Debug> Default for GestureRouter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Copy + Eq + core::fmt::Debug> GestureRouter<P> {
    /// Create a router with no active region, edit mode off, and no open session.
    pub fn new() -> Self {
        Self {
            active_region: None,
            edit_mode: false,
            session: None,
        }
    }

    /// Replace the active region. `None` means no region has first refusal.
    ///
    /// Only consulted when a session opens.
    pub fn set_active_region(&mut self, region: Option<Rect>) {
        self.active_region = region;
    }

    /// Current active region.
    pub fn active_region(&self) -> Option<Rect> {
        self.active_region
    }

    /// Enable or disable layout edit mode.
    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.edit_mode = edit_mode;
    }

    /// Whether layout edit mode is on.
    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// The open session, if any.
    pub fn session(&self) -> Option<&GestureSession<P>> {
        self.session.as_ref()
    }

    /// Target of the open session, or [`RouteTarget::Unresolved`] when none is open.
    pub fn target(&self) -> RouteTarget {
        self.session
            .as_ref()
            .map_or(RouteTarget::Unresolved, |s| s.target)
    }

    /// Target that events naming `id` currently go to, if `id` is in the open session.
    pub fn target_for(&self, id: P) -> Option<RouteTarget> {
        self.session
            .as_ref()
            .filter(|s| s.contains(id))
            .map(|s| s.target)
    }

    /// Drop the open session without forwarding anything, e.g. when the window loses focus.
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Route one pointer event.
    ///
    /// A `Down` opens a session and resolves its target. Every other phase is forwarded to the
    /// open session's target without re-running the decision; `Up` and `Cancel` then close the
    /// session. Events that arrive with no open session are treated as pass-through and reach
    /// neither consumer.
    pub fn handle(
        &mut self,
        event: &PointerEvent<P>,
        overlay: &mut impl TouchConsumer<P>,
        controls: &mut impl TouchConsumer<P>,
    ) -> Routed {
        if event.phase == TouchPhase::Down {
            if let Some(stale) = self.session.take() {
                log::warn!(
                    "gesture session {:?} never saw its terminal event; discarding it",
                    stale.pointers
                );
            }
            let (target, handled) = self.resolve(event, overlay, controls);
            log::debug!("gesture session {:?} routed to {target:?}", event.pointers);
            self.session = Some(GestureSession {
                target,
                pointers: event.ids().collect(),
            });
            return Routed {
                target,
                handled,
                session_ended: false,
            };
        }

        let Some(session) = self.session.as_mut() else {
            return Routed {
                target: RouteTarget::PassThrough,
                handled: false,
                session_ended: false,
            };
        };

        match event.phase {
            TouchPhase::PointerDown => {
                if let Some(p) = event.action_pointer() {
                    session.add(p.id);
                }
            }
            TouchPhase::PointerUp => {
                if let Some(p) = event.action_pointer() {
                    session.remove(p.id);
                }
            }
            _ => {}
        }

        let target = session.target;
        let handled = match target {
            RouteTarget::Overlay => overlay.try_handle(event),
            RouteTarget::ControlLayer => controls.try_handle(event),
            RouteTarget::PassThrough | RouteTarget::Unresolved => false,
        };

        let session_ended = event.phase.is_terminal();
        if session_ended {
            self.session = None;
        }
        Routed {
            target,
            handled,
            session_ended,
        }
    }

    fn resolve(
        &self,
        event: &PointerEvent<P>,
        overlay: &mut impl TouchConsumer<P>,
        controls: &mut impl TouchConsumer<P>,
    ) -> (RouteTarget, bool) {
        if let Some(region) = self.active_region
            && let Some(p) = event.action_pointer()
            && region.contains(p.position)
            && overlay.try_handle(event)
        {
            return (RouteTarget::Overlay, true);
        }
        if self.edit_mode && controls.try_handle(event) {
            return (RouteTarget::ControlLayer, true);
        }
        if overlay.try_handle(event) {
            return (RouteTarget::Overlay, true);
        }
        // Fail open: the engine is the receiver of last resort.
        (RouteTarget::PassThrough, false)
    }
}
