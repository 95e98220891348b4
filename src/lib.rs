//! Game camera for a 2D submarine game: free and follow camera movement,
//! zoom, shake, view transforms, and scripted camera pans.

pub mod camera;
pub mod components;
pub mod config;
pub mod constants;
pub mod control;
pub mod effects;
pub mod error;
pub mod events;
pub mod input;
pub mod listener;
pub mod math;
pub mod net;
pub mod scheduler;
pub mod transition;

pub use camera::{Camera, MoveOptions};
pub use config::CameraConfig;
pub use control::{Control, Screen};
pub use error::ConfigError;
pub use events::{CameraEvent, EventQueue};
pub use scheduler::{CoroutineManager, TickContext};
pub use transition::{PanHandle, PanOutcome, PanParams, ScriptedCameraPan};
