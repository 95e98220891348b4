//! Camera-related constants.

/// Default zoom level (1.0 = one world unit per screen pixel)
pub const CAMERA_DEFAULT_ZOOM: f32 = 1.0;
/// Minimum zoom level (furthest out)
pub const CAMERA_MIN_ZOOM: f32 = 0.1;
/// Maximum zoom level (furthest in)
pub const CAMERA_MAX_ZOOM: f32 = 2.0;
/// Fraction of the minimum zoom allowed while debug drawing is on
pub const CAMERA_DEBUG_MIN_ZOOM_FACTOR: f32 = 0.1;

/// Accepted range for the minimum zoom setting
pub const CAMERA_MIN_ZOOM_RANGE: (f32, f32) = (0.001, 10.0);
/// Accepted range for the maximum zoom setting
pub const CAMERA_MAX_ZOOM_RANGE: (f32, f32) = (1.0, 10.0);
/// Accepted range for the free camera speed multiplier
pub const CAMERA_MOVE_SPEED_RANGE: (f32, f32) = (0.01, 10.0);
/// Accepted range for zoom / move smoothness (divisors, so never below 1)
pub const CAMERA_SMOOTHNESS_RANGE: (f32, f32) = (1.0, 100.0);
/// Accepted range for the free-look offset distance
pub const CAMERA_OFFSET_AMOUNT_RANGE: (f32, f32) = (0.0, 10_000.0);

/// Default zoom smoothing divisor
pub const CAMERA_ZOOM_SMOOTHNESS: f32 = 8.0;
/// Default movement smoothing divisor
pub const CAMERA_MOVE_SMOOTHNESS: f32 = 8.0;

/// Free camera speed in world units per tick at zoom 1.0
pub const CAMERA_FREE_MOVE_BASE_SPEED: f32 = 20.0;
/// Speed multiplier while the fast modifier is held
pub const CAMERA_FAST_MULTIPLIER: f32 = 2.0;
/// Speed multiplier while the slow modifier is held
pub const CAMERA_SLOW_MULTIPLIER: f32 = 0.5;
/// Rate at which the free camera velocity follows raw input
pub const CAMERA_INPUT_SMOOTHING_RATE: f32 = 10.0;
/// Movement values are expressed per tick at this rate
pub const CAMERA_REFERENCE_TICK_RATE: f32 = 60.0;

/// Scroll wheel units per full zoom step
pub const CAMERA_SCROLL_ZOOM_DIVISOR: f32 = 1000.0;
/// Extra smoothing divisor applied while precise zoom is held
pub const CAMERA_PRECISE_ZOOM_FACTOR: f32 = 10.0;
/// Rate at which zoom eases toward the target zoom
pub const CAMERA_ZOOM_EASE_RATE: f32 = 10.0;

/// Horizontal screen fraction that maps to a full free-look offset
pub const CAMERA_OFFSET_SCREEN_FRACTION_X: f32 = 0.4;
/// Vertical screen fraction that maps to a full free-look offset
pub const CAMERA_OFFSET_SCREEN_FRACTION_Y: f32 = 0.3;
/// Offset distance at which the free-look camera is fully zoomed out
pub const CAMERA_ZOOM_OUT_DISTANCE: f32 = 1000.0;
/// Resolution blend used for free-look zoom when mouse-look is off
pub const CAMERA_RESOLUTION_ZOOM_BLEND: f32 = 0.3;

/// Rotation velocity damping per tick
pub const CAMERA_ROTATION_DAMPING: f32 = 0.05;
/// Rotation spring strength per tick
pub const CAMERA_ROTATION_SPRING: f32 = 0.2;

/// Shake magnitude below which shake stops entirely
pub const CAMERA_SHAKE_THRESHOLD: f32 = 0.01;
/// Shake noise timer speed
pub const CAMERA_SHAKE_TIMER_RATE: f32 = 5.0;
/// Shake decay rate toward zero
pub const CAMERA_SHAKE_DECAY_RATE: f32 = 2.0;
/// Shake offset scale relative to shake magnitude
pub const CAMERA_SHAKE_SCALE: f32 = 2.0;
/// Noise-space offset of the second shake axis
pub const CAMERA_SHAKE_AXIS_OFFSET: f64 = 0.5;

/// Audio listener depth at zoom 1.0 (listener sits at -depth / zoom)
pub const CAMERA_LISTENER_DEPTH: f32 = 100.0;

/// Resolution the global zoom scale is normalized against
pub const CAMERA_REFERENCE_RESOLUTION: (u32, u32) = (1920, 1080);

/// Physics-to-display unit conversion for followed submarine motion
pub const PHYSICS_TO_DISPLAY: f32 = 100.0;
/// Margin around a submarine's borders within which the camera follows it
pub const CAMERA_SUB_FOLLOW_MARGIN: f32 = 500.0;
