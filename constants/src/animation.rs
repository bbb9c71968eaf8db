/// Rotation added to the spin target's X and Y Euler angles each live frame.
pub const SPIN_STEP_RADIANS: f32 = 0.01;
