//! 3D audio listener placement driven by the camera.

use glam::{Vec2, Vec3};

/// Anything that can act as the positional-audio listener.
pub trait AudioListener {
    fn set_listener_position(&mut self, position: Vec3);
}

/// Plain listener state for mixers that poll a position each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListenerPosition(pub Vec3);

impl AudioListener for ListenerPosition {
    fn set_listener_position(&mut self, position: Vec3) {
        self.0 = position;
    }
}

/// Listener to move during `Camera::update_transform`.
pub struct ListenerUpdate<'a> {
    pub listener: &'a mut dyn AudioListener,
    /// World position of the controlled entity; the view center is used when `None`
    pub focus: Option<Vec2>,
}

impl<'a> ListenerUpdate<'a> {
    pub fn new(listener: &'a mut dyn AudioListener, focus: Option<Vec2>) -> Self {
        Self { listener, focus }
    }
}
