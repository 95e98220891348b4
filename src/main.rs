//! Headless camera demo.
//!
//! Runs an opening pan from the submarine overview down to the player's
//! character, then hands the camera back for a few seconds of free look while
//! the character dies and the camera starts spectating.
//!
//! Usage: `sub-camera [--profile] [config.json]`

use glam::{UVec2, Vec2};
use hecs::{Entity, World};
use std::path::PathBuf;
use sub_camera::components::{Character, Submarine, WorldPosition};
use sub_camera::constants::*;
use sub_camera::effects::ScreenEffects;
use sub_camera::input::InputState;
use sub_camera::listener::{ListenerPosition, ListenerUpdate};
use sub_camera::math::{Alignment, WorldRect};
use sub_camera::net::OutgoingMessage;
use sub_camera::{
    Camera, CameraConfig, CameraEvent, Control, CoroutineManager, EventQueue, MoveOptions,
    PanHandle, PanParams, Screen, ScriptedCameraPan, TickContext,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Simulated render frame length, not a multiple of the tick
const FRAME_TIME: f32 = 1.0 / 45.0;
/// How long the demo runs (seconds)
const DEMO_LENGTH: f32 = 12.0;
/// When the player's character dies (seconds)
const DEATH_TIME: f32 = 9.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config_path = PathBuf::from("camera.json");
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--profile" => puffin::set_scopes_on(true),
            _ => config_path = PathBuf::from(arg),
        }
    }

    let config = CameraConfig::load_or_default(&config_path);
    let mut demo = Demo::new(&config);
    demo.run();
    Ok(())
}

struct Demo {
    camera: Camera,
    world: World,
    control: Control,
    screen: Screen,
    input: InputState,
    effects: ScreenEffects,
    events: EventQueue,
    coroutines: CoroutineManager,
    listener: ListenerPosition,
    outgoing: OutgoingMessage,

    sub: Entity,
    diver: Entity,
    pan: Option<PanHandle>,
}

impl Demo {
    fn new(config: &CameraConfig) -> Self {
        let mut world = World::new();
        let hull = WorldRect::centered(Vec2::ZERO, 3200.0, 1400.0);
        let sub = world.spawn((WorldPosition::new(0.0, 0.0), Submarine::new(hull)));
        let diver = world.spawn((WorldPosition::new(420.0, -380.0), Character::new()));

        let mut camera = Camera::new(UVec2::new(1920, 1080), config);
        camera.set_position(Vec2::new(0.0, 600.0));

        Self {
            camera,
            world,
            control: Control::new(Some(diver)),
            screen: Screen::Game,
            input: InputState::new(),
            effects: ScreenEffects::new(),
            events: EventQueue::new(),
            coroutines: CoroutineManager::new(),
            listener: ListenerPosition::default(),
            outgoing: OutgoingMessage::new(),
            sub,
            diver,
            pan: None,
        }
    }

    fn ctx(&mut self) -> TickContext<'_> {
        TickContext {
            camera: &mut self.camera,
            world: &self.world,
            control: &mut self.control,
            screen: self.screen,
            input: &self.input,
            effects: &mut self.effects,
            events: &mut self.events,
        }
    }

    fn run(&mut self) {
        let params = PanParams::new(Some(self.sub))
            .start_anchor(Alignment::Center)
            .end_anchor(Alignment::BottomCenter)
            .pan_duration(5.0)
            .zoom(Some(0.5), Some(1.0))
            .allow_interrupt(true);
        let mut coroutines = std::mem::take(&mut self.coroutines);
        self.pan = Some(ScriptedCameraPan::start(params, &mut coroutines, &mut self.ctx()));
        self.coroutines = coroutines;

        // The window was resized while loading
        let scale = self.camera.set_resolution(UVec2::new(2560, 1440));
        self.events.push(CameraEvent::ResolutionChanged {
            resolution: self.camera.resolution(),
            global_zoom_scale: scale,
        });

        let mut elapsed = 0.0;
        let mut accumulator = 0.0;
        while elapsed < DEMO_LENGTH {
            puffin::GlobalProfiler::lock().new_frame();
            accumulator += FRAME_TIME.min(MAX_FRAME_TIME);

            while accumulator >= FIXED_TIMESTEP {
                self.tick(elapsed);
                accumulator -= FIXED_TIMESTEP;
                elapsed += FIXED_TIMESTEP;
            }

            let focus = self
                .control
                .controlled_in(&self.world)
                .and_then(|e| self.world.get::<&WorldPosition>(e).ok().map(|p| p.0));
            let listener = ListenerUpdate::new(&mut self.listener, focus);
            self.camera
                .update_transform(true, accumulator / FIXED_TIMESTEP, Some(listener));

            self.process_events();
        }

        tracing::info!(
            position = ?self.camera.position(),
            zoom = self.camera.zoom(),
            listener = ?self.listener.0,
            bytes_sent = self.outgoing.len(),
            "Demo finished"
        );
    }

    fn tick(&mut self, elapsed: f32) {
        if elapsed >= DEATH_TIME {
            if let Ok(mut character) = self.world.get::<&mut Character>(self.diver) {
                if character.alive {
                    character.alive = false;
                    tracing::info!("Character died, spectating");
                }
            }
        }

        // Sweep the cursor around once the pan is over
        let pan_running = self.pan.as_ref().is_some_and(|p| p.is_running());
        if !pan_running {
            let t = elapsed * 0.5;
            self.input.process_cursor(960.0 + t.cos() * 600.0, 540.0 + t.sin() * 300.0);
        }

        let spectating = self.control.is_spectating(&self.world);
        let target = if spectating {
            None
        } else {
            self.control
                .controlled_in(&self.world)
                .and_then(|e| self.world.get::<&WorldPosition>(e).ok().map(|p| p.0))
        };
        self.camera.set_target_pos(target);
        self.camera
            .move_camera(FIXED_TIMESTEP, &self.input, MoveOptions::default(), &self.world);

        let mut coroutines = std::mem::take(&mut self.coroutines);
        coroutines.update(&mut self.ctx(), FIXED_TIMESTEP);
        self.coroutines = coroutines;

        self.camera.client_write(&mut self.outgoing, spectating);
        self.input.end_frame();
    }

    fn process_events(&mut self) {
        for event in self.events.drain() {
            match event {
                CameraEvent::PanStarted { target } => {
                    tracing::info!(?target, "Camera pan started");
                }
                CameraEvent::PanFinished { outcome, restored } => {
                    tracing::info!(?outcome, ?restored, "Camera pan finished");
                }
                CameraEvent::ResolutionChanged {
                    resolution,
                    global_zoom_scale,
                } => {
                    tracing::info!(%resolution, global_zoom_scale, "Resolution changed");
                }
            }
        }
    }
}
