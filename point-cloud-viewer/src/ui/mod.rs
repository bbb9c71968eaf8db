//! Overlay widgets drawn inside each viewer's surface.

/// Lazily created translation sliders for the spin target.
pub mod parameter_panel;

/// Frame time panel anchored bottom-left.
pub mod stats_overlay;
