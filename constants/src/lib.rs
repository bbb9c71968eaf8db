//! Shared compile-time settings for the point cloud viewer.
//!
//! Grouped by the concern that reads them: camera setup, lighting, point
//! rendering, the coordinate correction applied to loaded models, the
//! optional frame loop and the in-viewport overlays.

pub mod animation;
pub mod camera;
pub mod coordinate_system;
pub mod lighting;
pub mod overlay;
pub mod render_settings;
