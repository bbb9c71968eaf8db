/// Per-viewer directional light.
pub mod lighting;
