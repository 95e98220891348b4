//! Input state sampled by the camera each tick.
//!
//! The window layer forwards key, cursor and wheel events here; the camera only
//! reads the resulting snapshot, so it can be driven headlessly in tests.

use glam::Vec2;
use std::collections::{HashMap, HashSet};
use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::KeyCode;

/// Wheel units reported per line of scrolling
const SCROLL_UNITS_PER_LINE: f32 = 120.0;

/// Camera actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraAction {
    Up,
    Down,
    Left,
    Right,
    /// Double free camera speed
    Fast,
    /// Halve free camera speed
    Slow,
    /// Step zoom slowly instead of easing
    PreciseZoom,
    /// Zoom around the view center instead of the cursor
    LockView,
    /// Abort an interruptible scripted pan
    Interrupt,
}

/// Key bindings for camera actions
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<CameraAction, Vec<KeyCode>>,
}

impl KeyBindings {
    pub fn keys(&self, action: CameraAction) -> &[KeyCode] {
        self.bindings.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the keys bound to an action
    pub fn bind(&mut self, action: CameraAction, keys: Vec<KeyCode>) {
        self.bindings.insert(action, keys);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            (CameraAction::Up, vec![KeyCode::KeyW, KeyCode::ArrowUp]),
            (CameraAction::Down, vec![KeyCode::KeyS, KeyCode::ArrowDown]),
            (CameraAction::Left, vec![KeyCode::KeyA, KeyCode::ArrowLeft]),
            (CameraAction::Right, vec![KeyCode::KeyD, KeyCode::ArrowRight]),
            (CameraAction::Fast, vec![KeyCode::ShiftLeft]),
            (CameraAction::Slow, vec![KeyCode::ControlLeft]),
            (CameraAction::PreciseZoom, vec![KeyCode::ControlLeft]),
            (CameraAction::LockView, vec![KeyCode::KeyF]),
            (CameraAction::Interrupt, vec![KeyCode::Escape]),
        ]);
        Self { bindings }
    }
}

/// Input state tracking
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub bindings: KeyBindings,
    /// Keys currently held
    pub keys_down: HashSet<KeyCode>,
    /// Keys pressed since the last `end_frame`
    pub keys_pressed: HashSet<KeyCode>,
    /// Cursor position in screen pixels
    pub mouse_pos: Vec2,
    /// Wheel movement since the last `end_frame` (positive = zoom in)
    pub scroll_delta: f32,
    /// A text field owns the keyboard
    pub text_input_focused: bool,
    /// The cursor is over a UI element
    pub mouse_over_ui: bool,
    /// A modal window (health, command interface, dialog) is open
    pub modal_open: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.keys_down.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            ElementState::Released => {
                self.keys_down.remove(&key);
            }
        }
    }

    pub fn process_cursor(&mut self, x: f32, y: f32) {
        self.mouse_pos = Vec2::new(x, y);
    }

    pub fn process_wheel(&mut self, delta: MouseScrollDelta) {
        self.scroll_delta += match delta {
            MouseScrollDelta::LineDelta(_, y) => y * SCROLL_UNITS_PER_LINE,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
        };
    }

    /// Clear per-frame state (presses and wheel movement)
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.scroll_delta = 0.0;
    }

    pub fn is_down(&self, action: CameraAction) -> bool {
        self.bindings
            .keys(action)
            .iter()
            .any(|key| self.keys_down.contains(key))
    }

    pub fn was_pressed(&self, action: CameraAction) -> bool {
        self.bindings
            .keys(action)
            .iter()
            .any(|key| self.keys_pressed.contains(key))
    }

    /// Directional input as a vector (world axes, +Y up)
    pub fn move_input(&self) -> Vec2 {
        let mut input = Vec2::ZERO;
        if self.is_down(CameraAction::Left) {
            input.x -= 1.0;
        }
        if self.is_down(CameraAction::Right) {
            input.x += 1.0;
        }
        if self.is_down(CameraAction::Up) {
            input.y += 1.0;
        }
        if self.is_down(CameraAction::Down) {
            input.y -= 1.0;
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::new();
        input.process_key(KeyCode::KeyW, ElementState::Pressed);
        assert!(input.is_down(CameraAction::Up));
        assert!(input.was_pressed(CameraAction::Up));

        input.end_frame();
        assert!(input.is_down(CameraAction::Up));
        assert!(!input.was_pressed(CameraAction::Up));

        input.process_key(KeyCode::KeyW, ElementState::Released);
        assert!(!input.is_down(CameraAction::Up));
    }

    #[test]
    fn test_move_input_opposite_keys_cancel() {
        let mut input = InputState::new();
        input.process_key(KeyCode::KeyA, ElementState::Pressed);
        input.process_key(KeyCode::ArrowRight, ElementState::Pressed);
        input.process_key(KeyCode::KeyW, ElementState::Pressed);
        assert_eq!(input.move_input(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_wheel_accumulates_until_end_frame() {
        let mut input = InputState::new();
        input.process_wheel(MouseScrollDelta::LineDelta(0.0, 1.0));
        input.process_wheel(MouseScrollDelta::LineDelta(0.0, 0.5));
        assert_eq!(input.scroll_delta, 180.0);
        input.end_frame();
        assert_eq!(input.scroll_delta, 0.0);
    }

    #[test]
    fn test_rebind() {
        let mut input = InputState::new();
        input.bindings.bind(CameraAction::Interrupt, vec![KeyCode::Space]);
        input.process_key(KeyCode::Escape, ElementState::Pressed);
        assert!(!input.was_pressed(CameraAction::Interrupt));
        input.process_key(KeyCode::Space, ElementState::Pressed);
        assert!(input.was_pressed(CameraAction::Interrupt));
    }
}
