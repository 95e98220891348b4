//! Scripted camera pan constants.

/// Scheduler tag shared by all scripted pans (one active pan per tag)
pub const CAMERA_PAN_TAG: &str = "camera_pan";
/// Default pan duration (seconds)
pub const PAN_DEFAULT_DURATION: f32 = 10.0;
/// Zoom a pan ends at when only a start zoom is given
pub const PAN_CLOSE_UP_ZOOM: f32 = 1.5;
/// Delay after the pan loop before control is restored (seconds)
pub const PAN_SETTLE_DELAY: f32 = 0.1;
/// Final fraction of the pan over which the screen fades to black
pub const PAN_FADE_OUT_FRACTION: f32 = 0.1;
/// Final fraction of the pan over which line of sight fades in
pub const PAN_LOS_FADE_FRACTION: f32 = 0.2;
