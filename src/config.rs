//! Camera configuration.
//!
//! Loaded from a JSON file; every field falls back to its default when missing.
//! Values are clamped by the camera setters when applied, so a hand-edited file
//! can never push the camera outside its valid ranges.

use crate::constants::*;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Free camera speed multiplier
    pub free_cam_move_speed: f32,

    /// Zoom the free-look camera returns to when the cursor is centered
    pub default_zoom: f32,

    /// Furthest-out zoom
    pub min_zoom: f32,

    /// Furthest-in zoom
    pub max_zoom: f32,

    /// Divisor applied to zoom changes (higher = smoother)
    pub zoom_smoothness: f32,

    /// Divisor applied to free-look movement (higher = smoother)
    pub move_smoothness: f32,

    /// How far (world units) the free-look camera leads toward the cursor
    pub offset_amount: f32,

    /// Ride along with the closest submarine while in free camera mode
    pub follow_sub: bool,

    /// Zoom out further the further the cursor is from the screen center
    pub enable_mouse_look: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            free_cam_move_speed: 1.0,
            default_zoom: CAMERA_DEFAULT_ZOOM,
            min_zoom: CAMERA_MIN_ZOOM,
            max_zoom: CAMERA_MAX_ZOOM,
            zoom_smoothness: CAMERA_ZOOM_SMOOTHNESS,
            move_smoothness: CAMERA_MOVE_SMOOTHNESS,
            offset_amount: 0.0,
            follow_sub: true,
            enable_mouse_look: true,
        }
    }
}

impl CameraConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %path.display(), "Loaded camera configuration");
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::info!(
                    path = %path.display(),
                    "No camera configuration found, using defaults"
                );
                Self::default()
            }
            Err(err) => {
                tracing::warn!("{err}; using default camera configuration");
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
