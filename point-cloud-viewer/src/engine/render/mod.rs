//! Point sprite rendering and per-viewer render requests.

/// Expands each point into a camera-facing quad.
pub mod point_mesh;

/// Unlit per-vertex colour material for point sprites.
pub mod points_material;

/// Render request events, per-viewer accounting and redraw scheduling.
pub mod render_requests;
