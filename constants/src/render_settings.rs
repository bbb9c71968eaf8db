use bevy::color::Color;

pub const BACKGROUND_COLOR: Color = Color::WHITE;

/// Point sprite edge length in world units.
pub const POINT_SIZE: f32 = 0.05;

/// Colour given to points when the source file carries none.
pub const DEFAULT_POINT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Container width used natively, where a viewer owns a whole OS window.
pub const DEFAULT_CONTAINER_WIDTH: f32 = 512.0;

/// Fractions of the browser window used by the window-fraction resize policy.
pub const WINDOW_FRACTION_WIDTH: f32 = 0.5;
pub const WINDOW_FRACTION_HEIGHT: f32 = 0.25;

/// Load progress is logged each time it crosses another step of this size.
pub const PROGRESS_LOG_STEP_PERCENT: f32 = 10.0;

/// Chunk size used when streaming model bytes from the asset reader.
pub const LOAD_CHUNK_BYTES: usize = 64 * 1024;

/// Reactive wait while a model is still loading and no frame loop is live.
pub const MODEL_LOAD_POLL_MILLIS: u64 = 50;
