use crate::components::find_follow_sub;
use crate::config::CameraConfig;
use crate::constants::*;
use crate::input::{CameraAction, InputState};
use crate::listener::ListenerUpdate;
use crate::math::{clamp_range, lerp, WorldRect};
use crate::net::{ClientNetObject, OutgoingMessage};
use glam::{Mat4, UVec2, Vec2, Vec3};
use hecs::World;
use noise::{NoiseFn, Perlin};

/// Per-tick options for `Camera::move_camera`
#[derive(Debug, Clone, Copy)]
pub struct MoveOptions {
    pub allow_move: bool,
    pub allow_zoom: bool,
    /// Overrides the configured submarine-follow setting for this tick
    pub follow_sub: Option<bool>,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            allow_move: true,
            allow_zoom: true,
            follow_sub: None,
        }
    }
}

pub struct Camera {
    position: Vec2,
    zoom: f32,
    rotation: f32,
    angular_velocity: f32,
    // Smooth zooming
    target_zoom: f32,
    // Render interpolation (values at the start of the current tick)
    prev_position: Vec2,
    prev_zoom: f32,

    resolution: UVec2,
    world_view: WorldRect,
    global_zoom_scale: f32,

    view_matrix: Mat4,
    transform: Mat4,
    inverse_transform: Mat4,
    shader_transform: Mat4,

    // Tuning
    free_cam_move_speed: f32,
    min_zoom: f32,
    max_zoom: f32,
    default_zoom: f32,
    zoom_smoothness: f32,
    move_smoothness: f32,
    offset_amount: f32,
    follow_sub: bool,
    enable_mouse_look: bool,
    /// Debug drawing relaxes the minimum zoom
    debug_draw: bool,

    // Free camera
    velocity: Vec2,

    // Free-look around a target
    target_pos: Option<Vec2>,
    prev_offset: Vec2,
    /// Hold the current free-look offset for this tick. Cleared at the end of every `move_camera`.
    pub freeze: bool,
    /// A scripted pan owns position and zoom
    driven: bool,

    // Shake
    shake: f32,
    shake_timer: f32,
    shake_offset: Vec2,
    noise: Perlin,
}

impl Camera {
    pub fn new(resolution: UVec2, config: &CameraConfig) -> Self {
        Self::with_seed(resolution, config, rand::random())
    }

    /// Camera with a fixed shake-noise seed
    pub fn with_seed(resolution: UVec2, config: &CameraConfig, seed: u32) -> Self {
        let mut camera = Self {
            position: Vec2::ZERO,
            zoom: CAMERA_DEFAULT_ZOOM,
            rotation: 0.0,
            angular_velocity: 0.0,
            target_zoom: CAMERA_DEFAULT_ZOOM,
            prev_position: Vec2::ZERO,
            prev_zoom: CAMERA_DEFAULT_ZOOM,
            resolution: UVec2::ONE,
            world_view: WorldRect::default(),
            global_zoom_scale: 0.0,
            view_matrix: Mat4::IDENTITY,
            transform: Mat4::IDENTITY,
            inverse_transform: Mat4::IDENTITY,
            shader_transform: Mat4::IDENTITY,
            free_cam_move_speed: 1.0,
            min_zoom: CAMERA_MIN_ZOOM,
            max_zoom: CAMERA_MAX_ZOOM,
            default_zoom: CAMERA_DEFAULT_ZOOM,
            zoom_smoothness: CAMERA_ZOOM_SMOOTHNESS,
            move_smoothness: CAMERA_MOVE_SMOOTHNESS,
            offset_amount: 0.0,
            follow_sub: true,
            enable_mouse_look: true,
            debug_draw: false,
            velocity: Vec2::ZERO,
            target_pos: None,
            prev_offset: Vec2::ZERO,
            freeze: false,
            driven: false,
            shake: 0.0,
            shake_timer: 0.0,
            shake_offset: Vec2::ZERO,
            noise: Perlin::new(seed),
        };
        camera.set_resolution(resolution);
        camera.apply_config(config);
        camera.set_zoom(camera.default_zoom);
        camera.target_zoom = camera.zoom;
        camera.prev_zoom = camera.zoom;
        camera.update_transform(false, 1.0, None);
        camera
    }

    /// Apply tuning values from a configuration (each clamped by its setter).
    pub fn apply_config(&mut self, config: &CameraConfig) {
        self.set_max_zoom(config.max_zoom);
        self.set_min_zoom(config.min_zoom);
        self.set_default_zoom(config.default_zoom);
        self.set_free_cam_move_speed(config.free_cam_move_speed);
        self.set_zoom_smoothness(config.zoom_smoothness);
        self.set_move_smoothness(config.move_smoothness);
        self.set_offset_amount(config.offset_amount);
        self.follow_sub = config.follow_sub;
        self.enable_mouse_look = config.enable_mouse_look;
    }

    // =========================================================================
    // STATE ACCESS
    // =========================================================================

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Ignores non-finite positions.
    pub fn set_position(&mut self, position: Vec2) {
        if !position.is_finite() {
            tracing::trace!(?position, "Rejected non-finite camera position");
            return;
        }
        self.position = position;
        self.refresh_world_view();
    }

    pub fn translate(&mut self, amount: Vec2) {
        self.set_position(self.position + amount);
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom, clamped to the valid range, and resize the world view to match.
    pub fn set_zoom(&mut self, zoom: f32) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = clamp_range(zoom, (self.zoom_lower_bound(), self.max_zoom));
        self.refresh_world_view();
    }

    pub fn target_zoom(&self) -> f32 {
        self.target_zoom
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Ignores non-finite rotations.
    pub fn set_rotation(&mut self, rotation: f32) {
        if rotation.is_finite() {
            self.rotation = rotation;
        }
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    /// Ignores non-finite velocities.
    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        if angular_velocity.is_finite() {
            self.angular_velocity = angular_velocity;
        }
    }

    pub fn shake(&self) -> f32 {
        self.shake
    }

    pub fn set_shake(&mut self, shake: f32) {
        if shake.is_finite() {
            self.shake = shake.max(0.0);
        }
    }

    pub fn shake_offset(&self) -> Vec2 {
        self.shake_offset
    }

    pub fn resolution(&self) -> UVec2 {
        self.resolution
    }

    pub fn world_view(&self) -> WorldRect {
        self.world_view
    }

    pub fn world_view_center(&self) -> Vec2 {
        self.world_view.center()
    }

    pub fn global_zoom_scale(&self) -> f32 {
        self.global_zoom_scale
    }

    /// World to screen transform
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Transform for screen-space shader effects
    pub fn shader_transform(&self) -> Mat4 {
        self.shader_transform
    }

    /// Free-look target. `None` switches back to the free camera.
    pub fn target_pos(&self) -> Option<Vec2> {
        self.target_pos
    }

    pub fn set_target_pos(&mut self, target: Option<Vec2>) {
        self.target_pos = target.filter(|t| t.is_finite());
    }

    pub fn is_driven(&self) -> bool {
        self.driven
    }

    /// Hand position and zoom over to a scripted pan (or take them back).
    pub fn set_driven(&mut self, driven: bool) {
        self.driven = driven;
        if !driven {
            self.target_zoom = self.zoom;
            self.velocity = Vec2::ZERO;
        }
    }

    // =========================================================================
    // TUNING
    // =========================================================================

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    pub fn set_min_zoom(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        self.min_zoom = clamp_range(value, CAMERA_MIN_ZOOM_RANGE).min(self.max_zoom);
        self.set_zoom(self.zoom);
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    pub fn set_max_zoom(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        self.max_zoom = clamp_range(value, CAMERA_MAX_ZOOM_RANGE);
        self.min_zoom = self.min_zoom.min(self.max_zoom);
        self.set_zoom(self.zoom);
    }

    pub fn default_zoom(&self) -> f32 {
        self.default_zoom
    }

    pub fn set_default_zoom(&mut self, value: f32) {
        if value.is_finite() {
            self.default_zoom = clamp_range(value, (self.min_zoom, self.max_zoom));
        }
    }

    pub fn free_cam_move_speed(&self) -> f32 {
        self.free_cam_move_speed
    }

    pub fn set_free_cam_move_speed(&mut self, value: f32) {
        if value.is_finite() {
            self.free_cam_move_speed = clamp_range(value, CAMERA_MOVE_SPEED_RANGE);
        }
    }

    pub fn zoom_smoothness(&self) -> f32 {
        self.zoom_smoothness
    }

    pub fn set_zoom_smoothness(&mut self, value: f32) {
        if value.is_finite() {
            self.zoom_smoothness = clamp_range(value, CAMERA_SMOOTHNESS_RANGE);
        }
    }

    pub fn move_smoothness(&self) -> f32 {
        self.move_smoothness
    }

    pub fn set_move_smoothness(&mut self, value: f32) {
        if value.is_finite() {
            self.move_smoothness = clamp_range(value, CAMERA_SMOOTHNESS_RANGE);
        }
    }

    pub fn offset_amount(&self) -> f32 {
        self.offset_amount
    }

    pub fn set_offset_amount(&mut self, value: f32) {
        if value.is_finite() {
            self.offset_amount = clamp_range(value, CAMERA_OFFSET_AMOUNT_RANGE);
        }
    }

    pub fn debug_draw(&self) -> bool {
        self.debug_draw
    }

    /// Toggle debug drawing. Zoom is re-clamped, so leaving debug mode pulls it
    /// back inside the normal range.
    pub fn set_debug_draw(&mut self, enabled: bool) {
        self.debug_draw = enabled;
        self.set_zoom(self.zoom);
    }

    pub fn set_follow_sub(&mut self, follow: bool) {
        self.follow_sub = follow;
    }

    pub fn set_enable_mouse_look(&mut self, enabled: bool) {
        self.enable_mouse_look = enabled;
    }

    fn zoom_lower_bound(&self) -> f32 {
        if self.debug_draw {
            self.min_zoom * CAMERA_DEBUG_MIN_ZOOM_FACTOR
        } else {
            self.min_zoom
        }
    }

    fn refresh_world_view(&mut self) {
        let size = self.resolution.as_vec2() / self.zoom;
        self.world_view = WorldRect::centered(self.position, size.x, size.y);
    }

    // =========================================================================
    // RESOLUTION
    // =========================================================================

    /// Called by the owning screen whenever the window resolution changes.
    ///
    /// Zoom is rescaled by the change in global zoom scale so the visible world
    /// area stays the same. Returns the new global zoom scale.
    pub fn set_resolution(&mut self, resolution: UVec2) -> f32 {
        if resolution.x == 0 || resolution.y == 0 {
            tracing::debug!(?resolution, "Ignoring degenerate camera resolution");
            return self.global_zoom_scale;
        }

        self.resolution = resolution;
        self.view_matrix = Mat4::from_translation((resolution.as_vec2() / 2.0).extend(0.0));

        let reference = UVec2::new(CAMERA_REFERENCE_RESOLUTION.0, CAMERA_REFERENCE_RESOLUTION.1);
        let new_scale = resolution.as_vec2().length() / reference.as_vec2().length();
        if self.global_zoom_scale > 0.0 {
            let ratio = new_scale / self.global_zoom_scale;
            self.target_zoom *= ratio;
            self.prev_zoom *= ratio;
            self.set_zoom(self.zoom * ratio);
        }
        self.global_zoom_scale = new_scale;
        self.refresh_world_view();

        tracing::info!(
            width = resolution.x,
            height = resolution.y,
            global_zoom_scale = new_scale,
            "Camera resolution changed"
        );
        new_scale
    }

    // =========================================================================
    // PER-TICK UPDATE
    // =========================================================================

    /// Advance the camera by one simulation tick.
    pub fn move_camera(
        &mut self,
        dt: f32,
        input: &InputState,
        options: MoveOptions,
        world: &World,
    ) {
        puffin::profile_function!();

        self.prev_position = self.position;
        self.prev_zoom = self.zoom;

        let mut move_cam = Vec2::ZERO;
        if self.driven {
            // Position and zoom belong to the scripted pan
        } else if let Some(target) = self.target_pos {
            if options.allow_move {
                move_cam = self.free_look(target, input);
            }
        } else {
            move_cam = self.free_cam(dt, input, options, world);
        }

        // Rotation springs back toward zero
        self.set_rotation(self.rotation + self.angular_velocity * dt);
        self.set_angular_velocity(self.angular_velocity * (1.0 - CAMERA_ROTATION_DAMPING));
        self.set_angular_velocity(self.angular_velocity - self.rotation * CAMERA_ROTATION_SPRING);

        self.update_shake(dt);

        self.translate(move_cam + self.shake_offset);
        self.freeze = false;
    }

    fn free_cam(
        &mut self,
        dt: f32,
        input: &InputState,
        options: MoveOptions,
        world: &World,
    ) -> Vec2 {
        let mut move_cam = Vec2::ZERO;

        if options.allow_move && !self.freeze {
            let mut move_speed = CAMERA_FREE_MOVE_BASE_SPEED / self.zoom;
            let mut move_input = Vec2::ZERO;
            if !input.text_input_focused {
                if input.is_down(CameraAction::Fast) {
                    move_speed *= CAMERA_FAST_MULTIPLIER;
                }
                if input.is_down(CameraAction::Slow) {
                    move_speed *= CAMERA_SLOW_MULTIPLIER;
                }
                move_input = input.move_input();
            }

            let t = (dt * CAMERA_INPUT_SMOOTHING_RATE).min(1.0);
            self.velocity = self.velocity.lerp(move_input, t);
            move_cam = self.velocity
                * move_speed
                * dt
                * self.free_cam_move_speed
                * CAMERA_REFERENCE_TICK_RATE;

            if options.follow_sub.unwrap_or(self.follow_sub) {
                let center = self.world_view_center();
                if let Some((_, sub)) = find_follow_sub(world, center, CAMERA_SUB_FOLLOW_MARGIN) {
                    move_cam += sub.velocity * dt * PHYSICS_TO_DISPLAY;
                }
            }
        }

        if options.allow_zoom {
            let mouse_in_world = self.screen_to_world(input.mouse_pos);
            let diff_view_center = (mouse_in_world - self.position) * self.zoom;

            self.target_zoom = clamp_range(
                self.target_zoom + input.scroll_delta / CAMERA_SCROLL_ZOOM_DIVISOR * self.zoom,
                (self.zoom_lower_bound(), self.max_zoom),
            );

            if input.is_down(CameraAction::PreciseZoom) {
                let step = (self.target_zoom - self.zoom)
                    / (self.zoom_smoothness * CAMERA_PRECISE_ZOOM_FACTOR);
                self.set_zoom(self.zoom + step);
            } else {
                let t = (dt * CAMERA_ZOOM_EASE_RATE).min(1.0);
                self.set_zoom(lerp(self.zoom, self.target_zoom, t));
            }

            // Keep the world point under the cursor fixed while zooming
            if !input.is_down(CameraAction::LockView) {
                self.set_position(mouse_in_world - diff_view_center / self.zoom);
            }
        }

        move_cam
    }

    fn free_look(&mut self, target: Vec2, input: &InputState) -> Vec2 {
        let res = self.resolution.as_vec2();
        let mut offset = input.mouse_pos - res / 2.0;
        offset.x /= res.x * CAMERA_OFFSET_SCREEN_FRACTION_X;
        offset.y = -offset.y / (res.y * CAMERA_OFFSET_SCREEN_FRACTION_Y);
        if offset.length_squared() > 1.0 {
            offset = offset.normalize();
        }
        offset *= self.offset_amount;

        if input.mouse_over_ui && self.offset_amount > 0.0 {
            self.freeze = true;
        }
        // Modal windows win over the UI-hover freeze
        if input.modal_open {
            offset = Vec2::ZERO;
            self.freeze = false;
        }

        if self.freeze {
            offset = self.prev_offset;
        } else {
            self.prev_offset = offset;
        }

        let zoom_out_amount = (offset.length() / CAMERA_ZOOM_OUT_DISTANCE).min(1.0);
        let unscaled_zoom = lerp(self.default_zoom, self.min_zoom, zoom_out_amount);
        let scaled_zoom = unscaled_zoom * self.global_zoom_scale;
        let blend = if self.enable_mouse_look {
            zoom_out_amount.sqrt()
        } else {
            CAMERA_RESOLUTION_ZOOM_BLEND
        };
        let new_zoom = lerp(unscaled_zoom, scaled_zoom, blend);
        self.set_zoom(self.zoom + (new_zoom - self.zoom) / self.zoom_smoothness);
        // Switching back to the free camera must not jump
        self.target_zoom = self.zoom;

        (target + offset - self.position) / self.move_smoothness
    }

    fn update_shake(&mut self, dt: f32) {
        if self.shake < CAMERA_SHAKE_THRESHOLD {
            self.shake = 0.0;
            self.shake_timer = 0.0;
            self.shake_offset = Vec2::ZERO;
            return;
        }

        self.shake_timer += dt * CAMERA_SHAKE_TIMER_RATE;
        let t = self.shake_timer as f64;
        let noise = Vec2::new(
            self.noise.get([t, t]) as f32,
            self.noise.get([t, t + CAMERA_SHAKE_AXIS_OFFSET]) as f32,
        ) * 0.5;
        self.shake_offset = noise * self.shake * CAMERA_SHAKE_SCALE;
        self.shake = lerp(self.shake, 0.0, (dt * CAMERA_SHAKE_DECAY_RATE).min(1.0));
    }

    // =========================================================================
    // TRANSFORMS
    // =========================================================================

    /// Rebuild the view transforms.
    ///
    /// With `interpolate`, position and zoom are blended between the start of the
    /// tick and now by `alpha` (the render frame's fraction of a tick). Without it,
    /// the current values become the new tick-start snapshot.
    pub fn update_transform(
        &mut self,
        interpolate: bool,
        alpha: f32,
        listener: Option<ListenerUpdate<'_>>,
    ) {
        puffin::profile_function!();

        let (position, zoom) = if interpolate {
            let alpha = alpha.clamp(0.0, 1.0);
            (
                self.prev_position.lerp(self.position, alpha),
                lerp(self.prev_zoom, self.zoom, alpha),
            )
        } else {
            (self.position, self.zoom)
        };

        let res = self.resolution.as_vec2();
        self.world_view = WorldRect::centered(position, res.x / zoom, res.y / zoom);

        let scale = Mat4::from_scale(Vec3::new(zoom, zoom, 1.0));
        self.transform = self.view_matrix
            * Mat4::from_rotation_z(self.rotation)
            * scale
            * Mat4::from_translation(Vec3::new(-position.x, position.y, 0.0));
        self.inverse_transform = self.transform.inverse();

        let half_view = res / zoom / 2.0;
        self.shader_transform = Mat4::from_rotation_z(-self.rotation)
            * self.view_matrix
            * scale
            * Mat4::from_translation(Vec3::new(
                -position.x - half_view.x,
                -position.y - half_view.y,
                0.0,
            ));

        if let Some(update) = listener {
            let center = update.focus.unwrap_or_else(|| self.world_view_center());
            update.listener.set_listener_position(Vec3::new(
                center.x,
                center.y,
                -(CAMERA_LISTENER_DEPTH / self.zoom),
            ));
        }

        if !interpolate {
            self.prev_position = self.position;
            self.prev_zoom = self.zoom;
        }
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let world = self.inverse_transform.transform_point3(screen.extend(0.0));
        Vec2::new(world.x, -world.y)
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.transform
            .transform_point3(Vec3::new(world.x, -world.y, 0.0))
            .truncate()
    }

    // =========================================================================
    // NETWORK
    // =========================================================================

    /// Write the spectating position update. Only spectators send their camera
    /// position; returns whether anything was written.
    pub fn client_write(&self, msg: &mut OutgoingMessage, spectating: bool) -> bool {
        if !spectating {
            return false;
        }
        msg.write_tag(ClientNetObject::SpectatingPos);
        msg.write_f32(self.position.x);
        msg.write_f32(self.position.y);
        true
    }
}
