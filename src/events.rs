//! Camera event queue for decoupled communication with the owning screen.
//!
//! The camera and scripted pans push events while updating; the owner drains
//! them once per frame (HUD toggles, logging, audio cues).

use crate::transition::PanOutcome;
use glam::UVec2;
use hecs::Entity;

/// Events emitted by the camera and scripted pans
#[derive(Debug, Clone, PartialEq)]
pub enum CameraEvent {
    /// A scripted pan took over the camera
    PanStarted {
        target: Entity,
    },
    /// A scripted pan released the camera
    PanFinished {
        outcome: PanOutcome,
        /// Entity control was handed back to, if any
        restored: Option<Entity>,
    },
    /// The camera's resolution changed
    ResolutionChanged {
        resolution: UVec2,
        global_zoom_scale: f32,
    },
}

/// Simple event queue - events are pushed during update, processed at end of frame
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<CameraEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: CameraEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = CameraEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
