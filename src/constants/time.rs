//! Simulation timing constants.

/// Fixed simulation step (seconds)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
/// Upper bound on accumulated frame time per render frame (seconds)
pub const MAX_FRAME_TIME: f32 = 0.25;
