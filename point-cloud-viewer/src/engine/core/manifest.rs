use std::path::Path;

use constants::render_settings::DEFAULT_CONTAINER_WIDTH;
use serde::{Deserialize, Serialize};

use crate::engine::core::settings::{ConfigError, Launch, ResizePolicy, ViewerSettings};
use crate::engine::viewer::{ContainerRef, ViewerConfig};

/// Viewer list read from a JSON file, e.g.
///
/// ```json
/// {
///   "live_animation": false,
///   "resize_policy": "square",
///   "viewers": [
///     { "model_path": "models/bunny.ply", "width": 480 },
///     { "model_path": "models/street.laz", "container": "street" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerManifest {
    #[serde(default)]
    pub live_animation: Option<bool>,
    #[serde(default)]
    pub resize_policy: Option<ResizePolicy>,
    pub viewers: Vec<ManifestViewer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestViewer {
    pub model_path: String,
    /// Container id; defaults to `viewer-<n>`.
    #[serde(default)]
    pub container: Option<String>,
    #[serde(default)]
    pub width: Option<f32>,
}

impl ViewerManifest {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::ManifestIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Apply manifest values over `settings` and build the viewer configs.
    pub fn into_launch(self, mut settings: ViewerSettings) -> Result<Launch, ConfigError> {
        if let Some(live_animation) = self.live_animation {
            settings.live_animation = live_animation;
        }
        if let Some(policy) = self.resize_policy {
            settings.resize_policy = policy;
        }

        let configs = self
            .viewers
            .into_iter()
            .enumerate()
            .map(|(index, viewer)| {
                let container = ContainerRef::new(
                    viewer
                        .container
                        .unwrap_or_else(|| default_container_id(index)),
                    viewer.width.unwrap_or(DEFAULT_CONTAINER_WIDTH),
                );
                ViewerConfig::new(index, viewer.model_path, container)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Launch { settings, configs })
    }
}

/// Container id used when the source does not name one.
pub fn default_container_id(index: usize) -> String {
    format!("viewer-{}", index + 1)
}
