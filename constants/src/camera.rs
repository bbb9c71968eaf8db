/// Vertical field of view of every viewer camera, in degrees.
pub const FIELD_OF_VIEW_DEGREES: f32 = 75.0;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// Viewports are square: the container width is used for both dimensions.
pub const INITIAL_ASPECT_RATIO: f32 = 1.0;

/// Initial camera distance along +Z, applied whether or not the model loads.
pub const INITIAL_CAMERA_DISTANCE: f32 = 5.0;

/// Orbit dolly bounds. Stored as given; the lower bound is never reached
/// because dolly is multiplicative.
pub const ORBIT_MIN_DISTANCE: f32 = -1.0;
pub const ORBIT_MAX_DISTANCE: f32 = 50.0;

pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;

/// Per wheel-line dolly factor.
pub const ORBIT_DOLLY_BASE: f32 = 0.95;

/// Pixel-unit wheel events are scaled down to roughly one line per 20px.
pub const ORBIT_PIXEL_SCROLL_SCALE: f32 = 0.05;

/// Keeps the polar angle away from the poles so `look_at` stays defined.
pub const ORBIT_POLAR_EPSILON: f32 = 1.0e-6;

/// Squared-distance / quaternion threshold below which an update is not a change.
pub const ORBIT_CHANGE_EPSILON: f32 = 1.0e-6;
