//! Camera constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.

mod camera;
mod time;
mod transition;

pub use camera::*;
pub use time::*;
pub use transition::*;
