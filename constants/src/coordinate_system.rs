use bevy::math::Quat;

/// Loaded models arrive upside down relative to the viewer's Y-up frame;
/// every point cloud entity is rotated by this angle about X.
pub const MODEL_CORRECTION_X_RADIANS: f32 = std::f32::consts::PI;

/// Model correction as a rotation (180° about X: Y = -Y, Z = -Z).
pub fn model_correction() -> Quat {
    Quat::from_rotation_x(MODEL_CORRECTION_X_RADIANS)
}
