use std::str::FromStr;

use bevy::prelude::*;
use constants::render_settings::{
    BACKGROUND_COLOR, WINDOW_FRACTION_HEIGHT, WINDOW_FRACTION_WIDTH,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::viewer::ViewerConfig;

/// Errors raised while assembling the launch configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown resize policy '{0}' (expected 'square' or 'window-fraction')")]
    UnknownResizePolicy(String),

    #[error("'{value}' is not a boolean for {key}")]
    InvalidBoolean { key: &'static str, value: String },

    #[error("viewer {index} has an empty model path")]
    EmptyModelPath { index: usize },

    #[error("viewer {index} has an unusable container width {width}")]
    InvalidContainerWidth { index: usize, width: f32 },

    #[error("could not read manifest {path}: {source}")]
    ManifestIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed manifest: {0}")]
    ManifestFormat(#[from] serde_json::Error),

    #[error("no viewers configured")]
    NoViewers,
}

/// How a viewer's render surface follows browser resizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizePolicy {
    /// Surface is container width by container width.
    #[default]
    #[serde(rename = "square")]
    SquareByContainerWidth,
    /// Surface is half the window width by a quarter of its height.
    WindowFraction,
}

impl ResizePolicy {
    /// Surface size for the given container width and browser window size.
    pub fn surface_size(&self, container_width: f32, window_size: Vec2) -> Vec2 {
        match self {
            ResizePolicy::SquareByContainerWidth => Vec2::splat(container_width),
            ResizePolicy::WindowFraction => Vec2::new(
                window_size.x * WINDOW_FRACTION_WIDTH,
                window_size.y * WINDOW_FRACTION_HEIGHT,
            ),
        }
    }
}

impl FromStr for ResizePolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "square" => Ok(ResizePolicy::SquareByContainerWidth),
            "window-fraction" => Ok(ResizePolicy::WindowFraction),
            other => Err(ConfigError::UnknownResizePolicy(other.to_string())),
        }
    }
}

/// Page-wide settings applied to every viewer.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewerSettings {
    /// Drive frames continuously and spin bound targets. Off unless asked for.
    pub live_animation: bool,
    pub resize_policy: ResizePolicy,
    pub background: Color,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            live_animation: false,
            resize_policy: ResizePolicy::default(),
            background: BACKGROUND_COLOR,
        }
    }
}

/// Everything needed to build the app: page settings plus one config per viewer.
#[derive(Debug, Clone, Default)]
pub struct Launch {
    pub settings: ViewerSettings,
    pub configs: Vec<ViewerConfig>,
}

/// Parse the boolean spellings accepted in data attributes and manifests.
pub fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBoolean {
            key,
            value: value.to_string(),
        }),
    }
}

/// Run condition for the frame loop.
pub fn live_animation_enabled(settings: Res<ViewerSettings>) -> bool {
    settings.live_animation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_the_frame_loop_dormant() {
        let settings = ViewerSettings::default();
        assert!(!settings.live_animation);
        assert_eq!(settings.resize_policy, ResizePolicy::SquareByContainerWidth);
        assert_eq!(settings.background, Color::WHITE);
    }

    #[test]
    fn square_policy_uses_container_width_twice() {
        let size =
            ResizePolicy::SquareByContainerWidth.surface_size(320.0, Vec2::new(1920.0, 1080.0));
        assert_eq!(size, Vec2::new(320.0, 320.0));
    }

    #[test]
    fn window_fraction_policy_ignores_container() {
        let size = ResizePolicy::WindowFraction.surface_size(320.0, Vec2::new(1600.0, 800.0));
        assert_eq!(size, Vec2::new(800.0, 200.0));
    }

    #[test]
    fn resize_policy_parses_known_names() {
        assert_eq!(
            "square".parse::<ResizePolicy>().ok(),
            Some(ResizePolicy::SquareByContainerWidth)
        );
        assert_eq!(
            " window-fraction ".parse::<ResizePolicy>().ok(),
            Some(ResizePolicy::WindowFraction)
        );
        assert!(matches!(
            "diagonal".parse::<ResizePolicy>(),
            Err(ConfigError::UnknownResizePolicy(name)) if name == "diagonal"
        ));
    }

    #[test]
    fn resize_policy_round_trips_through_json_names() {
        let policy: ResizePolicy = serde_json::from_str("\"window-fraction\"").unwrap();
        assert_eq!(policy, ResizePolicy::WindowFraction);
        assert_eq!(
            serde_json::to_string(&ResizePolicy::SquareByContainerWidth).unwrap(),
            "\"square\""
        );
    }

    #[test]
    fn flags_accept_attribute_spellings() {
        assert!(parse_flag("live-animation", "").unwrap());
        assert!(parse_flag("live-animation", "Yes").unwrap());
        assert!(!parse_flag("live-animation", "off").unwrap());
        assert!(parse_flag("live-animation", "maybe").is_err());
    }
}
