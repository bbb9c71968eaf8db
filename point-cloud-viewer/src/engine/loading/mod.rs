//! Asynchronous point cloud loading.
//!
//! Model files are decoded on the asset server's IO task pool by the PLY and
//! LAS loaders. Each viewer polls its own handle once per frame and spawns the
//! point sprite entity when the asset arrives.

/// LAS and LAZ decoding through the `las` crate.
pub mod las_loader;

/// Per-viewer load polling and point cloud entity creation.
///
/// Failures are logged once and leave the viewer with an empty scene.
pub mod model_spawner;

/// Page URL to asset path mapping for browser-hosted models.
pub mod model_url;

/// ASCII and binary PLY decoding.
pub mod ply_loader;

/// The decoded point cloud asset and its load error.
pub mod point_cloud_model;

/// Chunked byte reading with percentage logging.
pub mod progress;
