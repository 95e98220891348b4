//! Presentation effects driven by scripted pans (screen fade, line-of-sight overlay).
//!
//! These are separate from the pan math - the pan reports progress, the
//! renderer reads the resulting overlay state.

use hecs::Entity;

/// Effects a scripted pan drives while it runs.
pub trait PresentationEffects {
    /// Black screen overlay, 0.0 = transparent, 1.0 = fully black
    fn on_fade_progress(&mut self, t: f32);

    /// Line-of-sight overlay fading in, 0.0 = hidden, 1.0 = fully visible
    fn on_los_progress(&mut self, t: f32, view_target: Option<Entity>);

    fn set_los_enabled(&mut self, enabled: bool);
}

/// Overlay state read by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenEffects {
    pub overlay_alpha: f32,
    pub los_enabled: bool,
    pub los_alpha: f32,
    pub los_view_target: Option<Entity>,
}

impl ScreenEffects {
    pub fn new() -> Self {
        Self {
            overlay_alpha: 0.0,
            los_enabled: true,
            los_alpha: 1.0,
            los_view_target: None,
        }
    }
}

impl Default for ScreenEffects {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationEffects for ScreenEffects {
    fn on_fade_progress(&mut self, t: f32) {
        self.overlay_alpha = t.clamp(0.0, 1.0);
    }

    fn on_los_progress(&mut self, t: f32, view_target: Option<Entity>) {
        self.los_enabled = true;
        self.los_alpha = t.clamp(0.0, 1.0);
        self.los_view_target = view_target;
    }

    fn set_los_enabled(&mut self, enabled: bool) {
        self.los_enabled = enabled;
        if enabled {
            self.los_alpha = 1.0;
        }
    }
}
