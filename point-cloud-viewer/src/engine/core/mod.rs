//! Application setup, runtime settings and window configuration.
//!
//! Handles plugin wiring for both native and WASM targets and turns the
//! launch sources (DOM attributes, command line, JSON manifest) into
//! `ViewerSettings` and per-viewer configs.

/// Plugin configuration and app construction for the Bevy engine.
pub mod app_setup;

/// Native command line parsing.
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;

/// JSON manifest describing viewers for native launches.
pub mod manifest;

/// Runtime settings shared by all viewers and the errors raised while reading them.
pub mod settings;

/// Platform-specific window configuration for native and WASM builds.
///
/// Binds each viewer to its container canvas on the web, or to a titled OS window natively.
pub mod window_config;
