//! Side-by-side point cloud viewports.
//!
//! Every page container (or, natively, every model given on the command
//! line) gets its own independent viewer: window surface, camera with orbit
//! controls, lighting, an asynchronously loaded point cloud, a stats overlay
//! and a lazily created parameter panel.

pub mod engine;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use engine::core::app_setup::create_app;
pub use engine::core::settings::{ConfigError, Launch, ResizePolicy, ViewerSettings};
pub use engine::viewer::{ContainerRef, ViewerConfig, ViewerConfigs, ViewerPlugin};
