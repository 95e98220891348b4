//! Scripted camera pans.
//!
//! A pan takes the camera over for a fixed duration and smoothly moves it (and
//! optionally its zoom) between two points tied to a world entity, e.g. from an
//! overview of a submarine to the character the player controls. It runs as a
//! scheduled task tagged `CAMERA_PAN_TAG`, so starting a pan stops any other.
//!
//! Lifecycle: `Idle -> Panning -> Settling -> Finished`. Panning includes the
//! hold phase (elapsed time starts at `-wait_duration`). Settling is a short
//! delay before control is handed back.

use crate::components::{world_extent, world_position};
use crate::constants::*;
use crate::control::Screen;
use crate::events::CameraEvent;
use crate::input::CameraAction;
use crate::math::{smoothstep, smoothstep_vec2};
use crate::scheduler::{Coroutine, CoroutineManager, CoroutineStatus, TaskId, TickContext};
use glam::Vec2;
use hecs::Entity;
use std::cell::RefCell;
use std::rc::Rc;

/// How a pan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanOutcome {
    /// Ran for its full duration
    Completed,
    /// The player pressed the interrupt key
    Interrupted,
    /// Stopped from outside, or replaced by another pan
    Cancelled,
    /// The gameplay screen was left mid-pan
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanPhase {
    Idle,
    Panning,
    Settling,
    Finished,
}

/// Parameters of a scripted pan
#[derive(Debug, Clone)]
pub struct PanParams {
    pub target: Option<Entity>,
    /// Relative position in the target's bounds to start from. Defaults to the
    /// current camera position, carried along with the target's motion.
    pub start_anchor: Option<Vec2>,
    /// Relative position in the target's bounds to end at. Defaults to the
    /// controlled entity, or the target itself.
    pub end_anchor: Option<Vec2>,
    pub fade_out: bool,
    pub los_fade_in: bool,
    pub wait_duration: f32,
    pub pan_duration: f32,
    pub start_zoom: Option<f32>,
    pub end_zoom: Option<f32>,
    pub allow_interrupt: bool,
    pub remove_control_from_character: bool,
}

impl PanParams {
    pub fn new(target: Option<Entity>) -> Self {
        Self {
            target,
            start_anchor: None,
            end_anchor: None,
            fade_out: true,
            los_fade_in: false,
            wait_duration: 0.0,
            pan_duration: PAN_DEFAULT_DURATION,
            start_zoom: None,
            end_zoom: None,
            allow_interrupt: false,
            remove_control_from_character: true,
        }
    }

    pub fn start_anchor(mut self, anchor: impl Into<Vec2>) -> Self {
        self.start_anchor = Some(anchor.into());
        self
    }

    pub fn end_anchor(mut self, anchor: impl Into<Vec2>) -> Self {
        self.end_anchor = Some(anchor.into());
        self
    }

    pub fn fade_out(mut self, fade_out: bool) -> Self {
        self.fade_out = fade_out;
        self
    }

    pub fn los_fade_in(mut self, los_fade_in: bool) -> Self {
        self.los_fade_in = los_fade_in;
        self
    }

    pub fn wait_duration(mut self, seconds: f32) -> Self {
        self.wait_duration = seconds.max(0.0);
        self
    }

    pub fn pan_duration(mut self, seconds: f32) -> Self {
        self.pan_duration = seconds.max(0.0);
        self
    }

    pub fn zoom(mut self, start: Option<f32>, end: Option<f32>) -> Self {
        self.start_zoom = start;
        self.end_zoom = end;
        self
    }

    pub fn allow_interrupt(mut self, allow: bool) -> Self {
        self.allow_interrupt = allow;
        self
    }

    pub fn remove_control_from_character(mut self, remove: bool) -> Self {
        self.remove_control_from_character = remove;
        self
    }
}

pub struct ScriptedCameraPan {
    params: PanParams,
    phase: PanPhase,
    outcome: Option<PanOutcome>,
    elapsed: f32,
    settle_remaining: f32,
    saved_controlled: Option<Entity>,
    initial_camera_pos: Vec2,
    initial_target_pos: Option<Vec2>,
    initial_zoom: f32,
    resolved_end: Option<Vec2>,
}

impl ScriptedCameraPan {
    fn new(params: PanParams) -> Self {
        Self {
            elapsed: -params.wait_duration,
            params,
            phase: PanPhase::Idle,
            outcome: None,
            settle_remaining: PAN_SETTLE_DELAY,
            saved_controlled: None,
            initial_camera_pos: Vec2::ZERO,
            initial_target_pos: None,
            initial_zoom: CAMERA_DEFAULT_ZOOM,
            resolved_end: None,
        }
    }

    /// Create a pan and schedule it immediately, stopping any pan already running.
    ///
    /// A pan whose target is missing or already removed finishes on the spot.
    pub fn start(
        params: PanParams,
        manager: &mut CoroutineManager,
        ctx: &mut TickContext<'_>,
    ) -> PanHandle {
        let mut pan = Self::new(params);
        manager.stop_tagged(CAMERA_PAN_TAG, ctx);

        let target = pan.params.target.filter(|&t| ctx.world.contains(t));
        let Some(target) = target else {
            tracing::debug!("Scripted pan has no target, finishing immediately");
            pan.phase = PanPhase::Finished;
            pan.outcome = Some(PanOutcome::Completed);
            return PanHandle {
                pan: Rc::new(RefCell::new(pan)),
                task: None,
            };
        };

        pan.begin(target, ctx);

        let shared = Rc::new(RefCell::new(pan));
        let task = manager.start(CAMERA_PAN_TAG, Box::new(SharedPan(shared.clone())), ctx);
        PanHandle {
            pan: shared,
            task: Some(task),
        }
    }

    pub fn phase(&self) -> PanPhase {
        self.phase
    }

    /// True until the camera motion ends. The settle delay after it does not count.
    pub fn is_running(&self) -> bool {
        self.phase == PanPhase::Panning
    }

    pub fn outcome(&self) -> Option<PanOutcome> {
        self.outcome
    }

    pub fn saved_controlled(&self) -> Option<Entity> {
        self.saved_controlled
    }

    /// Camera end position from the most recent tick
    pub fn resolved_end(&self) -> Option<Vec2> {
        self.resolved_end
    }

    pub fn params(&self) -> &PanParams {
        &self.params
    }

    /// End the pan now. Does nothing if it already ended.
    pub fn stop(&mut self, ctx: &mut TickContext<'_>) {
        if matches!(self.phase, PanPhase::Panning | PanPhase::Settling) {
            self.finish(PanOutcome::Cancelled, ctx);
        }
    }

    fn begin(&mut self, target: Entity, ctx: &mut TickContext<'_>) {
        self.saved_controlled = ctx.control.controlled;
        if self.params.remove_control_from_character {
            ctx.control.controlled = None;
        }
        ctx.effects.set_los_enabled(false);
        ctx.camera.set_driven(true);

        self.initial_camera_pos = ctx.camera.position();
        self.initial_target_pos = world_position(ctx.world, target);
        self.initial_zoom = ctx.camera.zoom();
        self.elapsed = -self.params.wait_duration;
        self.phase = PanPhase::Panning;

        tracing::debug!(
            ?target,
            wait = self.params.wait_duration,
            duration = self.params.pan_duration,
            "Scripted pan started"
        );
        ctx.events.push(CameraEvent::PanStarted { target });
    }

    fn progress(&self) -> f32 {
        if self.params.pan_duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.params.pan_duration).clamp(0.0, 1.0)
        }
    }

    fn tick(&mut self, ctx: &mut TickContext<'_>, dt: f32) -> CoroutineStatus {
        if ctx.screen != Screen::Game {
            self.finish(PanOutcome::Aborted, ctx);
            return CoroutineStatus::Success;
        }

        // Control may have been handed to someone else mid-pan (death, respawn)
        if let Some(current) = ctx.control.controlled {
            if self.saved_controlled != Some(current) {
                self.saved_controlled = Some(current);
                if self.params.remove_control_from_character {
                    ctx.control.controlled = None;
                }
            }
        }
        if let Some(saved) = self.saved_controlled {
            if !ctx.world.contains(saved) {
                self.saved_controlled = None;
            }
        }

        if self.params.allow_interrupt && ctx.input.was_pressed(CameraAction::Interrupt) {
            tracing::debug!(elapsed = self.elapsed, "Scripted pan interrupted");
            self.enter_settling(PanOutcome::Interrupted);
            return CoroutineStatus::Running;
        }

        if !self.apply(ctx, self.progress()) {
            // Target vanished; keep the camera where it is
            self.enter_settling(PanOutcome::Completed);
            return CoroutineStatus::Running;
        }
        self.apply_effects(ctx);

        self.elapsed += dt;
        if self.elapsed >= self.params.pan_duration {
            self.apply(ctx, 1.0);
            self.apply_effects(ctx);
            self.enter_settling(PanOutcome::Completed);
        }
        CoroutineStatus::Running
    }

    /// Move the camera to progress `t`. Returns false if the target is gone.
    fn apply(&mut self, ctx: &mut TickContext<'_>, t: f32) -> bool {
        let Some(target) = self.params.target else {
            return false;
        };
        let (Some(extent), Some(target_pos)) =
            (world_extent(ctx.world, target), world_position(ctx.world, target))
        else {
            return false;
        };

        let start = match self.params.start_anchor {
            Some(anchor) => extent.at_fraction(anchor),
            None => match self.initial_target_pos {
                Some(initial) => self.initial_camera_pos + (target_pos - initial),
                None => self.initial_camera_pos,
            },
        };
        let end = match self.params.end_anchor {
            Some(anchor) => extent.at_fraction(anchor),
            None => self
                .saved_controlled
                .and_then(|e| world_position(ctx.world, e))
                .unwrap_or(target_pos),
        };
        self.resolved_end = Some(end);

        let camera_pos = smoothstep_vec2(start, end, t);
        ctx.camera.translate(camera_pos - ctx.camera.position());

        if self.params.start_zoom.is_some() || self.params.end_zoom.is_some() {
            let start_zoom = self.params.start_zoom.unwrap_or(self.initial_zoom);
            let end_zoom = self.params.end_zoom.unwrap_or(PAN_CLOSE_UP_ZOOM);
            ctx.camera.set_zoom(smoothstep(start_zoom, end_zoom, t));
        }
        true
    }

    fn apply_effects(&self, ctx: &mut TickContext<'_>) {
        let duration = self.params.pan_duration;

        if self.params.fade_out {
            let fade = duration * PAN_FADE_OUT_FRACTION;
            if let Some(t) = window_progress(self.elapsed, duration, fade) {
                ctx.effects.on_fade_progress(t);
            }
        }

        if self.params.los_fade_in {
            let fade = duration * PAN_LOS_FADE_FRACTION;
            if let Some(t) = window_progress(self.elapsed, duration, fade) {
                ctx.effects.on_los_progress(t, self.saved_controlled);
            }
        }
    }

    fn enter_settling(&mut self, outcome: PanOutcome) {
        self.phase = PanPhase::Settling;
        self.outcome = Some(outcome);
        self.settle_remaining = PAN_SETTLE_DELAY;
    }

    fn settle(&mut self, ctx: &mut TickContext<'_>, dt: f32) -> CoroutineStatus {
        self.settle_remaining -= dt;
        if self.settle_remaining > 0.0 {
            return CoroutineStatus::Running;
        }
        let outcome = self.outcome.unwrap_or(PanOutcome::Completed);
        self.finish(outcome, ctx);
        CoroutineStatus::Success
    }

    /// Hand everything back: overlays, camera, control.
    fn finish(&mut self, outcome: PanOutcome, ctx: &mut TickContext<'_>) {
        if self.phase == PanPhase::Finished {
            return;
        }
        self.phase = PanPhase::Finished;
        self.outcome = Some(outcome);

        if self.params.fade_out {
            ctx.effects.on_fade_progress(0.0);
        }
        ctx.effects.set_los_enabled(true);
        ctx.camera.set_driven(false);

        let restored = self.saved_controlled.filter(|&e| ctx.world.contains(e));
        if let Some(entity) = restored {
            ctx.control.controlled = Some(entity);
        }

        tracing::debug!(?outcome, ?restored, "Scripted pan finished");
        ctx.events.push(CameraEvent::PanFinished { outcome, restored });
    }
}

/// Progress through the final `window` seconds of `duration`, or `None` before it starts.
fn window_progress(elapsed: f32, duration: f32, window: f32) -> Option<f32> {
    if window <= 0.0 || elapsed <= duration - window {
        return None;
    }
    Some(((elapsed - (duration - window)) / window).clamp(0.0, 1.0))
}

impl Coroutine for ScriptedCameraPan {
    fn resume(&mut self, ctx: &mut TickContext<'_>, dt: f32) -> CoroutineStatus {
        match self.phase {
            PanPhase::Idle | PanPhase::Finished => CoroutineStatus::Success,
            PanPhase::Panning => self.tick(ctx, dt),
            PanPhase::Settling => self.settle(ctx, dt),
        }
    }

    fn cancel(&mut self, ctx: &mut TickContext<'_>) {
        self.stop(ctx);
    }
}

/// Scheduler-side view of a pan shared with its `PanHandle`
struct SharedPan(Rc<RefCell<ScriptedCameraPan>>);

impl Coroutine for SharedPan {
    fn resume(&mut self, ctx: &mut TickContext<'_>, dt: f32) -> CoroutineStatus {
        self.0.borrow_mut().resume(ctx, dt)
    }

    fn cancel(&mut self, ctx: &mut TickContext<'_>) {
        self.0.borrow_mut().cancel(ctx);
    }
}

/// Caller-side handle to a started pan
#[derive(Clone)]
pub struct PanHandle {
    pan: Rc<RefCell<ScriptedCameraPan>>,
    task: Option<TaskId>,
}

impl PanHandle {
    pub fn is_running(&self) -> bool {
        self.pan.borrow().is_running()
    }

    pub fn phase(&self) -> PanPhase {
        self.pan.borrow().phase()
    }

    pub fn outcome(&self) -> Option<PanOutcome> {
        self.pan.borrow().outcome()
    }

    pub fn resolved_end(&self) -> Option<Vec2> {
        self.pan.borrow().resolved_end()
    }

    pub fn saved_controlled(&self) -> Option<Entity> {
        self.pan.borrow().saved_controlled()
    }

    pub fn task(&self) -> Option<TaskId> {
        self.task
    }

    /// Stop the pan. Safe to call any number of times, in any phase.
    pub fn stop(&self, manager: &mut CoroutineManager, ctx: &mut TickContext<'_>) {
        if let Some(task) = self.task {
            manager.stop(task, ctx);
        }
        self.pan.borrow_mut().stop(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::components::{Character, Submarine, WorldPosition};
    use crate::config::CameraConfig;
    use crate::control::Control;
    use crate::effects::ScreenEffects;
    use crate::events::EventQueue;
    use crate::input::InputState;
    use crate::math::{Alignment, WorldRect};
    use glam::UVec2;
    use hecs::World;
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    const DT: f32 = FIXED_TIMESTEP;

    fn approx_vec(a: Vec2, b: Vec2, eps: f32) -> bool {
        (a - b).abs().max_element() <= eps
    }

    struct Scene {
        camera: Camera,
        world: World,
        control: Control,
        screen: Screen,
        input: InputState,
        effects: ScreenEffects,
        events: EventQueue,
        manager: CoroutineManager,
        sub: Entity,
        diver: Entity,
    }

    impl Scene {
        fn new() -> Self {
            let mut world = World::new();
            let hull = WorldRect::centered(Vec2::ZERO, 2000.0, 1000.0);
            let sub = world.spawn((WorldPosition::new(0.0, 0.0), Submarine::new(hull)));
            let diver = world.spawn((WorldPosition::new(300.0, -100.0), Character::new()));

            let mut camera = Camera::with_seed(UVec2::new(1920, 1080), &CameraConfig::default(), 3);
            camera.set_position(Vec2::new(-2000.0, 500.0));

            Self {
                camera,
                world,
                control: Control::new(Some(diver)),
                screen: Screen::Game,
                input: InputState::new(),
                effects: ScreenEffects::new(),
                events: EventQueue::new(),
                manager: CoroutineManager::new(),
                sub,
                diver,
            }
        }

        fn start(&mut self, params: PanParams) -> PanHandle {
            let mut ctx = TickContext {
                camera: &mut self.camera,
                world: &self.world,
                control: &mut self.control,
                screen: self.screen,
                input: &self.input,
                effects: &mut self.effects,
                events: &mut self.events,
            };
            ScriptedCameraPan::start(params, &mut self.manager, &mut ctx)
        }

        fn stop(&mut self, handle: &PanHandle) {
            let mut ctx = TickContext {
                camera: &mut self.camera,
                world: &self.world,
                control: &mut self.control,
                screen: self.screen,
                input: &self.input,
                effects: &mut self.effects,
                events: &mut self.events,
            };
            handle.stop(&mut self.manager, &mut ctx);
        }

        fn tick(&mut self) {
            let mut ctx = TickContext {
                camera: &mut self.camera,
                world: &self.world,
                control: &mut self.control,
                screen: self.screen,
                input: &self.input,
                effects: &mut self.effects,
                events: &mut self.events,
            };
            self.manager.update(&mut ctx, DT);
        }

        fn run(&mut self, seconds: f32) {
            let ticks = (seconds / DT).ceil() as usize;
            for _ in 0..ticks {
                self.tick();
            }
        }
    }

    #[test]
    fn test_pan_completes_at_end_position() {
        let mut scene = Scene::new();
        let handle = scene.start(
            PanParams::new(Some(scene.sub))
                .pan_duration(2.0)
                .fade_out(false),
        );
        assert!(handle.is_running());
        assert_eq!(scene.control.controlled, None);
        assert!(scene.camera.is_driven());

        scene.run(2.0 + PAN_SETTLE_DELAY + 0.2);

        assert!(!handle.is_running());
        assert_eq!(handle.outcome(), Some(PanOutcome::Completed));
        let end = handle.resolved_end().unwrap();
        assert!(approx_vec(end, Vec2::new(300.0, -100.0), 1e-3));
        assert!(approx_vec(scene.camera.position(), end, 1e-2));
        assert_eq!(scene.control.controlled, Some(scene.diver));
        assert!(!scene.camera.is_driven());
        assert!(scene.manager.is_empty());
    }

    #[test]
    fn test_running_clears_before_control_returns() {
        let mut scene = Scene::new();
        let handle = scene.start(
            PanParams::new(Some(scene.sub))
                .pan_duration(2.0)
                .fade_out(false),
        );
        scene.run(2.0 + DT);
        assert!(!handle.is_running());
        assert_eq!(handle.phase(), PanPhase::Settling);
        assert_eq!(scene.control.controlled, None);

        scene.run(PAN_SETTLE_DELAY + 0.05);
        assert_eq!(handle.phase(), PanPhase::Finished);
        assert_eq!(scene.control.controlled, Some(scene.diver));
    }

    #[test]
    fn test_pan_starts_from_camera_and_eases() {
        let mut scene = Scene::new();
        scene.start(PanParams::new(Some(scene.sub)).pan_duration(2.0));

        scene.tick();
        assert!(approx_vec(scene.camera.position(), Vec2::new(-2000.0, 500.0), 1e-3));

        // Halfway through, smoothstep sits exactly at the midpoint
        scene.run(1.0 - DT);
        let mid = (Vec2::new(-2000.0, 500.0) + Vec2::new(300.0, -100.0)) / 2.0;
        assert!(approx_vec(scene.camera.position(), mid, 60.0));
    }

    #[test]
    fn test_wait_duration_holds_start() {
        let mut scene = Scene::new();
        let handle = scene.start(
            PanParams::new(Some(scene.sub))
                .wait_duration(1.0)
                .pan_duration(1.0),
        );
        scene.run(0.9);
        assert!(approx_vec(scene.camera.position(), Vec2::new(-2000.0, 500.0), 1e-3));
        assert!(handle.is_running());
        scene.run(1.3);
        assert!(!handle.is_running());
    }

    #[test]
    fn test_anchors_use_target_bounds() {
        let mut scene = Scene::new();
        let handle = scene.start(
            PanParams::new(Some(scene.sub))
                .start_anchor(Alignment::TopLeft)
                .end_anchor(Alignment::BottomCenter)
                .pan_duration(1.0),
        );
        scene.tick();
        assert!(approx_vec(scene.camera.position(), Vec2::new(-1000.0, 500.0), 1e-3));
        scene.run(1.2);
        assert_eq!(handle.resolved_end(), Some(Vec2::new(0.0, -500.0)));
        assert!(approx_vec(scene.camera.position(), Vec2::new(0.0, -500.0), 1e-2));
    }

    #[test]
    fn test_start_tracks_moving_target() {
        let mut scene = Scene::new();
        scene.start(PanParams::new(Some(scene.sub)).pan_duration(5.0));
        scene.world.get::<&mut WorldPosition>(scene.sub).unwrap().0 = Vec2::new(100.0, 0.0);
        scene.tick();
        // t = 0: camera start carried along with the submarine
        assert!(approx_vec(scene.camera.position(), Vec2::new(-1900.0, 500.0), 1e-3));
    }

    #[test]
    fn test_zoom_interpolates() {
        let mut scene = Scene::new();
        scene.start(
            PanParams::new(Some(scene.sub))
                .pan_duration(1.0)
                .zoom(Some(0.5), None),
        );
        scene.tick();
        assert!((scene.camera.zoom() - 0.5).abs() < 1e-4);
        scene.run(1.2);
        assert!((scene.camera.zoom() - PAN_CLOSE_UP_ZOOM).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_untouched_without_zoom_params() {
        let mut scene = Scene::new();
        scene.camera.set_zoom(0.7);
        scene.start(PanParams::new(Some(scene.sub)).pan_duration(1.0));
        scene.run(1.5);
        assert_eq!(scene.camera.zoom(), 0.7);
    }

    #[test]
    fn test_interrupt_stops_and_restores() {
        let mut scene = Scene::new();
        let handle = scene.start(
            PanParams::new(Some(scene.sub))
                .pan_duration(5.0)
                .allow_interrupt(true),
        );
        scene.run(1.0);
        scene.input.process_key(KeyCode::Escape, ElementState::Pressed);
        scene.tick();
        let stopped_at = scene.camera.position();
        scene.run(PAN_SETTLE_DELAY + 0.05);

        assert!(!handle.is_running());
        assert_eq!(handle.outcome(), Some(PanOutcome::Interrupted));
        assert_eq!(scene.control.controlled, Some(scene.diver));
        assert_eq!(scene.camera.position(), stopped_at);
    }

    #[test]
    fn test_held_interrupt_key_does_not_stop_new_pan() {
        let mut scene = Scene::new();
        scene.input.process_key(KeyCode::Escape, ElementState::Pressed);
        scene.input.end_frame();

        let handle = scene.start(
            PanParams::new(Some(scene.sub))
                .pan_duration(5.0)
                .allow_interrupt(true),
        );
        scene.run(0.5);
        assert!(handle.is_running());
        assert_eq!(handle.outcome(), None);

        // Releasing and pressing again is a fresh press
        scene.input.process_key(KeyCode::Escape, ElementState::Released);
        scene.input.process_key(KeyCode::Escape, ElementState::Pressed);
        scene.tick();
        assert!(!handle.is_running());
        assert_eq!(handle.outcome(), Some(PanOutcome::Interrupted));
    }

    #[test]
    fn test_interrupt_ignored_when_not_allowed() {
        let mut scene = Scene::new();
        let handle = scene.start(PanParams::new(Some(scene.sub)).pan_duration(5.0));
        scene.input.process_key(KeyCode::Escape, ElementState::Pressed);
        scene.run(1.0);
        assert!(handle.is_running());
    }

    #[test]
    fn test_new_pan_cancels_previous() {
        let mut scene = Scene::new();
        let first = scene.start(PanParams::new(Some(scene.sub)).pan_duration(5.0));
        scene.run(0.5);
        let second = scene.start(PanParams::new(Some(scene.diver)).pan_duration(5.0));

        assert!(!first.is_running());
        assert_eq!(first.outcome(), Some(PanOutcome::Cancelled));
        assert!(second.is_running());
        // The first pan handed control back before the second took it again
        assert_eq!(second.saved_controlled(), Some(scene.diver));
        assert_eq!(scene.control.controlled, None);
        assert_eq!(scene.manager.len(), 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut scene = Scene::new();
        let handle = scene.start(PanParams::new(Some(scene.sub)).pan_duration(5.0));
        scene.run(0.5);
        scene.stop(&handle);
        assert!(!handle.is_running());
        assert_eq!(scene.control.controlled, Some(scene.diver));

        // A later control change must survive a second stop
        scene.control.controlled = None;
        scene.stop(&handle);
        assert_eq!(scene.control.controlled, None);
        assert_eq!(handle.outcome(), Some(PanOutcome::Cancelled));
    }

    #[test]
    fn test_missing_target_finishes_immediately() {
        let mut scene = Scene::new();
        let removed = scene.world.spawn((WorldPosition::new(0.0, 0.0),));
        scene.world.despawn(removed).unwrap();

        let handle = scene.start(PanParams::new(Some(removed)));
        assert!(!handle.is_running());
        assert_eq!(handle.outcome(), Some(PanOutcome::Completed));
        assert!(scene.manager.is_empty());

        let none = scene.start(PanParams::new(None));
        assert!(!none.is_running());
        assert_eq!(none.outcome(), Some(PanOutcome::Completed));
    }

    #[test]
    fn test_missing_target_still_cancels_running_pan() {
        let mut scene = Scene::new();
        let first = scene.start(PanParams::new(Some(scene.sub)).pan_duration(5.0));
        scene.run(0.5);

        let second = scene.start(PanParams::new(None));
        assert!(!first.is_running());
        assert_eq!(first.outcome(), Some(PanOutcome::Cancelled));
        assert!(!second.is_running());
        assert!(!scene.manager.is_tag_running(CAMERA_PAN_TAG));
        // The cancelled pan handed control back
        assert_eq!(scene.control.controlled, Some(scene.diver));
        assert!(!scene.camera.is_driven());
    }

    #[test]
    fn test_screen_change_aborts() {
        let mut scene = Scene::new();
        let handle = scene.start(PanParams::new(Some(scene.sub)).pan_duration(5.0));
        scene.run(0.5);
        scene.screen = Screen::Lobby;
        scene.tick();

        assert!(!handle.is_running());
        assert_eq!(handle.outcome(), Some(PanOutcome::Aborted));
        assert_eq!(scene.effects.overlay_alpha, 0.0);
        assert!(scene.effects.los_enabled);
        assert_eq!(scene.control.controlled, Some(scene.diver));
    }

    #[test]
    fn test_control_change_mid_pan_is_restored() {
        let mut scene = Scene::new();
        let replacement = scene.world.spawn((WorldPosition::new(-50.0, 50.0), Character::new()));
        let handle = scene.start(PanParams::new(Some(scene.sub)).pan_duration(1.0));
        scene.run(0.3);

        scene.control.controlled = Some(replacement);
        scene.tick();
        assert_eq!(scene.control.controlled, None);
        assert_eq!(handle.saved_controlled(), Some(replacement));

        scene.run(1.0);
        assert_eq!(scene.control.controlled, Some(replacement));
        assert!(approx_vec(scene.camera.position(), Vec2::new(-50.0, 50.0), 1e-2));
    }

    #[test]
    fn test_removed_controlled_is_not_restored() {
        let mut scene = Scene::new();
        let handle = scene.start(PanParams::new(Some(scene.sub)).pan_duration(1.0));
        scene.run(0.3);
        scene.world.despawn(scene.diver).unwrap();
        scene.tick();
        assert_eq!(handle.saved_controlled(), None);

        scene.run(1.0);
        assert!(!handle.is_running());
        assert_eq!(scene.control.controlled, None);
        // With nothing to end on, the pan ends on the target itself
        assert!(approx_vec(scene.camera.position(), Vec2::ZERO, 1e-2));
    }

    #[test]
    fn test_keep_control_when_configured() {
        let mut scene = Scene::new();
        scene.start(
            PanParams::new(Some(scene.sub))
                .pan_duration(1.0)
                .remove_control_from_character(false),
        );
        assert_eq!(scene.control.controlled, Some(scene.diver));
        scene.tick();
        assert_eq!(scene.control.controlled, Some(scene.diver));
    }

    #[test]
    fn test_fade_out_ramps_then_clears() {
        let mut scene = Scene::new();
        scene.start(
            PanParams::new(Some(scene.sub))
                .pan_duration(2.0)
                .fade_out(true),
        );

        scene.run(1.7);
        assert_eq!(scene.effects.overlay_alpha, 0.0);
        scene.run(0.2);
        assert!(scene.effects.overlay_alpha > 0.0 && scene.effects.overlay_alpha < 1.0);
        scene.run(0.15);
        assert_eq!(scene.effects.overlay_alpha, 1.0);

        scene.run(PAN_SETTLE_DELAY + 0.05);
        assert_eq!(scene.effects.overlay_alpha, 0.0);
    }

    #[test]
    fn test_los_fades_in_toward_restore_target() {
        let mut scene = Scene::new();
        scene.start(
            PanParams::new(Some(scene.sub))
                .pan_duration(2.0)
                .fade_out(false)
                .los_fade_in(true),
        );
        scene.tick();
        assert!(!scene.effects.los_enabled);

        scene.run(1.8);
        assert!(scene.effects.los_enabled);
        assert!(scene.effects.los_alpha > 0.0 && scene.effects.los_alpha < 1.0);
        assert_eq!(scene.effects.los_view_target, Some(scene.diver));

        scene.run(0.5);
        assert!(scene.effects.los_enabled);
        assert_eq!(scene.effects.los_alpha, 1.0);
    }

    #[test]
    fn test_lifecycle_events() {
        let mut scene = Scene::new();
        scene.start(PanParams::new(Some(scene.sub)).pan_duration(0.5));
        scene.run(1.0);

        let events: Vec<_> = scene.events.drain().collect();
        assert_eq!(events.first(), Some(&CameraEvent::PanStarted { target: scene.sub }));
        assert_eq!(
            events.last(),
            Some(&CameraEvent::PanFinished {
                outcome: PanOutcome::Completed,
                restored: Some(scene.diver),
            })
        );
    }

    #[test]
    fn test_zero_duration_snaps_to_end() {
        let mut scene = Scene::new();
        let handle = scene.start(
            PanParams::new(Some(scene.sub))
                .pan_duration(0.0)
                .fade_out(true),
        );
        scene.tick();
        assert!(approx_vec(scene.camera.position(), Vec2::new(300.0, -100.0), 1e-2));
        scene.run(PAN_SETTLE_DELAY + 0.05);
        assert!(!handle.is_running());
    }
}
