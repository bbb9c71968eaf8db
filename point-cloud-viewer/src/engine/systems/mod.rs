//! Per-frame systems shared by every viewer.

/// Spin target rotation and lazy parameter panel creation.
pub mod animation;

/// Frame time statistics overlay updates.
pub mod fps_tracking;

/// Resize policy application to surfaces and camera aspect.
pub mod resize;
