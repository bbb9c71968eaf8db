//! Browser page integration.
//!
//! Containers are discovered once, before the app starts, through their
//! `data-model-path` attribute. Each gets a canvas for its viewer's window.
//! Resize listeners are scoped to their viewer: DOM callbacks only push into
//! a shared queue that an ECS system drains.

pub mod containers;
pub mod listeners;

use bevy::prelude::*;
use thiserror::Error;

use crate::engine::core::settings::ConfigError;
use crate::engine::loading::model_url::ModelUrlError;
use crate::engine::systems::resize::apply_resize_policy;
use crate::engine::viewer::scoped::add_viewer_scoped;
use listeners::{ResizeQueue, ScopedResizeListener, drain_resize_queue};

#[derive(Debug, Error)]
pub enum DomError {
    #[error("no browser window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("document has no body")]
    NoBody,

    #[error("{action} failed: {message}")]
    Js {
        action: &'static str,
        message: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    ModelUrl(#[from] ModelUrlError),
}

impl DomError {
    pub fn js(action: &'static str) -> impl FnOnce(wasm_bindgen::JsValue) -> DomError {
        move |value| DomError::Js {
            action,
            message: value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        }
    }
}

pub struct DomPlugin;

impl Plugin for DomPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ResizeQueue>()
            .add_systems(Update, drain_resize_queue.before(apply_resize_policy));
        add_viewer_scoped::<ScopedResizeListener>(app);
    }
}
