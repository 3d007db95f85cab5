// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-session facade.

use std::sync::Arc;

use kurbo::Rect;
use understory_control_input::{AttackAim, ControlInput, KeyStick, MouseStick, VirtualAim};
use understory_engine_bridge::{EngineBridge, GuardedBridge, PointerId, TouchFrame};
use understory_gesture_router::router::GestureRouter;
use understory_gesture_router::types::{PointerEvent, RouteTarget, Routed, TouchConsumer};
use understory_pointer_claims::PointerClaims;
use understory_touch_bridge::TouchBridge;

use crate::config::ArbiterConfig;

/// Result of [`InputArbiter::on_pointer_event`].
#[derive(Clone, Debug, PartialEq)]
pub struct Arbitrated {
    /// What the gesture router did with the event.
    pub routed: Routed,
    /// The touch frame built from the same event.
    pub frame: Arc<TouchFrame>,
}

/// Owns the input arbitration state for one session.
///
/// All components share one [`GuardedBridge`], so the engine is probed once per session.
///
/// ## Threads
///
/// The arbiter itself lives on the UI thread. [`InputArbiter::claims`] and
/// [`InputArbiter::touch_bridge`] hand out shared handles that may be used from other threads,
/// e.g. by an engine thread polling [`TouchBridge::latest`].
#[derive(Debug)]
pub struct InputArbiter {
    config: ArbiterConfig,
    bridge: GuardedBridge,
    claims: Arc<PointerClaims>,
    router: GestureRouter<PointerId>,
    touch: Arc<TouchBridge>,
    input: ControlInput,
}

impl InputArbiter {
    /// Create a session that delivers to `engine`.
    pub fn new(engine: Arc<dyn EngineBridge>, config: ArbiterConfig) -> Self {
        Self::with_bridge(GuardedBridge::new(engine), config)
    }

    /// Create a session on an existing guarded handle, sharing its probe result.
    pub fn with_bridge(bridge: GuardedBridge, config: ArbiterConfig) -> Self {
        let claims = Arc::new(PointerClaims::new(bridge.clone()));
        let touch = Arc::new(TouchBridge::new(Arc::clone(&claims), bridge.clone()));
        Self {
            config,
            input: ControlInput::new(bridge.clone()),
            bridge,
            claims,
            router: GestureRouter::new(),
            touch,
        }
    }

    /// Route one raw pointer event, then build and publish its touch frame.
    ///
    /// Routing runs first, so a pointer claimed by a consumer while it handles the event is
    /// already missing from the frame built for that same event.
    pub fn on_pointer_event(
        &mut self,
        event: &PointerEvent<PointerId>,
        overlay: &mut impl TouchConsumer<PointerId>,
        controls: &mut impl TouchConsumer<PointerId>,
    ) -> Arbitrated {
        let routed = self.router.handle(event, overlay, controls);
        let frame = self
            .touch
            .process(event, self.config.screen_width, self.config.screen_height);
        Arbitrated { routed, frame }
    }

    /// Replace the overlay's active region.
    pub fn set_active_region(&mut self, region: Option<Rect>) {
        self.router.set_active_region(region);
    }

    /// Enable or disable layout edit mode.
    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.router.set_edit_mode(edit_mode);
    }

    /// Update the screen size used for normalization.
    ///
    /// Aims already handed out keep their own size; call
    /// [`VirtualAim::set_screen_size`] on them too.
    pub fn set_screen_size(&mut self, screen_width: u32, screen_height: u32) {
        self.config.screen_width = screen_width;
        self.config.screen_height = screen_height;
    }

    /// Target of the open gesture session.
    pub fn target(&self) -> RouteTarget {
        self.router.target()
    }

    /// The gesture router.
    pub fn router(&self) -> &GestureRouter<PointerId> {
        &self.router
    }

    /// Shared claim registry, for virtual controls to claim and release fingers.
    pub fn claims(&self) -> &Arc<PointerClaims> {
        &self.claims
    }

    /// Shared touch bridge, for engines that poll [`TouchBridge::latest`].
    pub fn touch_bridge(&self) -> &Arc<TouchBridge> {
        &self.touch
    }

    /// Control input emitter.
    pub fn input(&self) -> &ControlInput {
        &self.input
    }

    /// A stick-driven cursor using the session's aim tuning and screen size.
    pub fn virtual_aim(&self) -> VirtualAim {
        VirtualAim::new(
            self.input.clone(),
            self.config.aim,
            self.config.screen_size(),
        )
    }

    /// A firing cursor using the session's aim and attack tuning.
    pub fn attack_aim(&self) -> AttackAim {
        AttackAim::new(self.virtual_aim(), self.config.attack)
    }

    /// A stick-to-keys mapper using the session's bindings.
    pub fn key_stick(&self) -> KeyStick {
        KeyStick::new(self.input.clone(), self.config.key_stick)
    }

    /// A relative-mouse stick using the session's tuning.
    pub fn mouse_stick(&self) -> MouseStick {
        MouseStick::new(self.input.clone(), self.config.mouse_stick)
    }

    /// Current configuration.
    pub fn config(&self) -> &ArbiterConfig {
        &self.config
    }

    /// Whether the engine answered the probe.
    pub fn is_engine_available(&self) -> bool {
        self.bridge.is_available()
    }

    /// End the session: drop the open gesture, every claim, and publish an empty frame.
    pub fn teardown(&mut self) {
        log::debug!("input session torn down with {} claims", self.claims.count());
        self.router.reset();
        self.claims.clear_all();
        self.touch
            .clear(self.config.screen_width, self.config.screen_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use understory_engine_bridge::{Record, RecordingBridge};
    use understory_gesture_router::types::TouchPhase;

    const W: u32 = 1000;
    const H: u32 = 1000;

    fn session() -> (InputArbiter, Arc<RecordingBridge>) {
        let recording = Arc::new(RecordingBridge::new());
        let arbiter = InputArbiter::new(recording.clone(), ArbiterConfig::with_screen(W, H));
        (arbiter, recording)
    }

    fn ids(frame: &TouchFrame) -> Vec<PointerId> {
        frame.samples().iter().map(|s| s.pointer_id).collect()
    }

    fn never(_: &PointerEvent<PointerId>) -> bool {
        false
    }

    #[test]
    fn overlay_keeps_gesture_that_leaves_region() {
        let (mut arbiter, _) = session();
        arbiter.set_active_region(Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let mut seen = Vec::new();
        let mut overlay = |e: &PointerEvent<PointerId>| {
            seen.push(e.phase);
            true
        };

        let steps = [
            (TouchPhase::Down, Point::new(50.0, 50.0)),
            (TouchPhase::Move, Point::new(500.0, 500.0)),
            (TouchPhase::Up, Point::new(500.0, 500.0)),
        ];
        for (phase, at) in steps {
            let out = arbiter.on_pointer_event(
                &PointerEvent::single(phase, 1, at),
                &mut overlay,
                &mut never,
            );
            assert_eq!(out.routed.target, RouteTarget::Overlay);
        }
        assert_eq!(seen, vec![TouchPhase::Down, TouchPhase::Move, TouchPhase::Up]);
        assert_eq!(arbiter.target(), RouteTarget::Unresolved);
    }

    #[test]
    fn declined_touch_passes_through_to_frame() {
        let (mut arbiter, recording) = session();
        let out = arbiter.on_pointer_event(
            &PointerEvent::single(TouchPhase::Down, 4, Point::new(10.0, 10.0)),
            &mut never,
            &mut never,
        );
        assert_eq!(out.routed.target, RouteTarget::PassThrough);
        assert_eq!(ids(&out.frame), vec![4]);
        assert_eq!(out.frame.samples()[0].x, 0.01);
        assert_eq!(recording.frames().len(), 1);
    }

    #[test]
    fn claim_during_routing_hides_pointer_from_same_frame() {
        let (mut arbiter, _) = session();
        arbiter.set_edit_mode(true);
        let claims = Arc::clone(arbiter.claims());
        let mut controls = |e: &PointerEvent<PointerId>| {
            if let Some(p) = e.action_pointer() {
                claims.claim(p.id);
            }
            true
        };

        let out = arbiter.on_pointer_event(
            &PointerEvent::single(TouchPhase::Down, 2, Point::new(300.0, 300.0)),
            &mut never,
            &mut controls,
        );
        assert_eq!(out.routed.target, RouteTarget::ControlLayer);
        assert!(out.frame.is_empty());
    }

    #[test]
    fn control_claim_outside_edit_mode_hides_pass_through_finger() {
        let (mut arbiter, recording) = session();
        let down = PointerEvent::single(TouchPhase::Down, 7, Point::new(900.0, 900.0));
        let moved = PointerEvent::single(TouchPhase::Move, 7, Point::new(950.0, 900.0));

        // A joystick sees the raw touch itself and claims it before arbitration.
        arbiter.claims().claim(7);
        for event in [&down, &moved] {
            let out = arbiter.on_pointer_event(event, &mut never, &mut never);
            assert_eq!(out.routed.target, RouteTarget::PassThrough);
            assert!(out.frame.is_empty());
        }
        assert!(recording.frames().iter().all(|f| !f.contains(7)));
    }

    #[test]
    fn claimed_pointer_is_filtered_from_multi_touch() {
        let (mut arbiter, _) = session();
        arbiter.claims().claim(3);
        arbiter.on_pointer_event(
            &PointerEvent::single(TouchPhase::Down, 1, Point::new(100.0, 100.0)),
            &mut never,
            &mut never,
        );
        let event = PointerEvent::new(
            TouchPhase::Move,
            [
                (1, Point::new(100.0, 100.0)),
                (2, Point::new(200.0, 200.0)),
                (3, Point::new(300.0, 300.0)),
            ],
        );
        let out = arbiter.on_pointer_event(&event, &mut never, &mut never);
        assert_eq!(ids(&out.frame), vec![1, 2]);
        assert_eq!(ids(&arbiter.touch_bridge().latest()), vec![1, 2]);
    }

    #[test]
    fn cancel_keeps_claims() {
        let (mut arbiter, _) = session();
        arbiter.claims().claim(1);
        arbiter.on_pointer_event(
            &PointerEvent::single(TouchPhase::Down, 1, Point::new(1.0, 1.0)),
            &mut never,
            &mut never,
        );
        let out = arbiter.on_pointer_event(
            &PointerEvent::single(TouchPhase::Cancel, 1, Point::new(1.0, 1.0)),
            &mut never,
            &mut never,
        );
        assert!(out.routed.session_ended);
        assert!(out.frame.is_empty());
        assert!(arbiter.claims().is_claimed(1));
    }

    #[test]
    fn teardown_clears_claims_and_frame() {
        let (mut arbiter, recording) = session();
        arbiter.claims().claim(1);
        arbiter.on_pointer_event(
            &PointerEvent::new(
                TouchPhase::Down,
                [(1, Point::new(1.0, 1.0)), (2, Point::new(2.0, 2.0))],
            ),
            &mut never,
            &mut never,
        );
        recording.take();

        arbiter.teardown();
        assert_eq!(arbiter.claims().count(), 0);
        assert!(arbiter.router().session().is_none());
        assert!(arbiter.touch_bridge().latest().is_empty());
        assert_eq!(
            recording.records(),
            vec![Record::Clear, Record::Frame(TouchFrame::empty(W, H))]
        );
    }

    #[test]
    fn offline_engine_leaves_arbitration_intact() {
        let recording = Arc::new(RecordingBridge::unavailable());
        let mut arbiter = InputArbiter::new(recording.clone(), ArbiterConfig::with_screen(W, H));

        assert!(arbiter.claims().claim(5));
        assert!(arbiter.claims().is_claimed(5));
        let out = arbiter.on_pointer_event(
            &PointerEvent::new(
                TouchPhase::Down,
                [(5, Point::new(1.0, 1.0)), (6, Point::new(2.0, 2.0))],
            ),
            &mut never,
            &mut never,
        );
        assert_eq!(ids(&out.frame), vec![6]);
        assert!(!arbiter.input().start_text_input());
        assert!(!arbiter.is_engine_available());
        assert!(recording.records().is_empty());
        assert_eq!(recording.probe_count(), 1);
    }

    #[test]
    fn aim_and_key_stick_use_session_config() {
        let (arbiter, _) = session();
        let aim = arbiter.virtual_aim();
        assert_eq!(aim.position(), Point::new(500.0, 500.0));
        assert_eq!(aim.config().speed, 80.0);
        assert_eq!(arbiter.key_stick().config().deadzone, 0.3);
        assert_eq!(arbiter.mouse_stick().config().sensitivity, 15.0);

        let attack = arbiter.attack_aim();
        assert_eq!(attack.aim().position(), Point::new(500.0, 500.0));
        assert!(!attack.is_firing());
    }
}
