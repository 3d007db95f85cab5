// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: pointer events, route targets, and consumer callbacks.

use kurbo::Point;
use smallvec::SmallVec;

/// Phase of a raw pointer event.
///
/// Follows the usual platform model: `Down` starts a gesture with its first finger,
/// `PointerDown`/`PointerUp` add and remove further fingers, and `Up` lifts the last one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// First finger of a gesture touched down.
    Down,
    /// One or more fingers moved.
    Move,
    /// Last finger lifted; the gesture is over.
    Up,
    /// Another finger touched down during a gesture.
    PointerDown,
    /// A finger lifted while others remain down.
    PointerUp,
    /// The platform aborted the gesture.
    Cancel,
}

impl TouchPhase {
    /// Whether the phase ends the gesture (`Up` or `Cancel`).
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Up | Self::Cancel)
    }
}

/// One pointer's position within a [`PointerEvent`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSample<P> {
    /// Pointer id from the touch driver.
    pub id: P,
    /// Position in physical pixels.
    pub position: Point,
}

/// A raw pointer event, decoupled from any windowing toolkit.
///
/// `pointers` lists every finger that is down for this event, in driver order. For
/// `PointerDown` and `PointerUp`, `action_index` names the finger that changed; for the other
/// phases it is `0`.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent<P> {
    /// What happened.
    pub phase: TouchPhase,
    /// Fingers down for this event.
    pub pointers: SmallVec<[PointerSample<P>; 4]>,
    /// Index into `pointers` of the finger the phase refers to.
    pub action_index: usize,
}

impl<P: Copy> PointerEvent<P> {
    /// Create an event with `action_index` 0.
    pub fn new(phase: TouchPhase, pointers: impl IntoIterator<Item = (P, Point)>) -> Self {
        Self {
            phase,
            pointers: pointers
                .into_iter()
                .map(|(id, position)| PointerSample { id, position })
                .collect(),
            action_index: 0,
        }
    }

    /// Create a single-finger event.
    pub fn single(phase: TouchPhase, id: P, position: Point) -> Self {
        Self::new(phase, [(id, position)])
    }

    /// Set the index of the finger the phase refers to.
    pub fn with_action_index(mut self, action_index: usize) -> Self {
        self.action_index = action_index;
        self
    }

    /// The finger the phase refers to, if `action_index` is in range.
    pub fn action_pointer(&self) -> Option<&PointerSample<P>> {
        self.pointers.get(self.action_index)
    }

    /// Ids of all fingers in the event.
    pub fn ids(&self) -> impl Iterator<Item = P> + '_ {
        self.pointers.iter().map(|s| s.id)
    }
}

/// Consumer a gesture session was routed to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum RouteTarget {
    /// No decision yet (no session is open).
    #[default]
    Unresolved,
    /// The floating UI overlay.
    Overlay,
    /// The virtual-control layer.
    ControlLayer,
    /// Nobody in the UI; the touches are left for the downstream engine.
    PassThrough,
}

/// A candidate consumer of pointer events.
///
/// Implemented for any `FnMut(&PointerEvent<P>) -> bool`, so closures work directly.
pub trait TouchConsumer<P> {
    /// Offer `event` to the consumer. Return `true` if it handled the event.
    ///
    /// During routing of a `Down`, returning `false` lets the router try the next candidate.
    /// After routing, the return value is reported but does not change the route.
    fn try_handle(&mut self, event: &PointerEvent<P>) -> bool;
}

impl<P, F> TouchConsumer<P> for F
where
    F: FnMut(&PointerEvent<P>) -> bool,
{
    fn try_handle(&mut self, event: &PointerEvent<P>) -> bool {
        self(event)
    }
}

/// Outcome of routing one event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Routed {
    /// Where the event went.
    pub target: RouteTarget,
    /// What the target's handler returned. Always `false` for [`RouteTarget::PassThrough`].
    pub handled: bool,
    /// The event closed its gesture session.
    pub session_ended: bool,
}
