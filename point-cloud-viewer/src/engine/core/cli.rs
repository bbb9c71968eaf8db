use std::path::PathBuf;

use clap::Parser;
use constants::render_settings::DEFAULT_CONTAINER_WIDTH;

use crate::engine::core::manifest::{ManifestViewer, ViewerManifest, default_container_id};
use crate::engine::core::settings::{ConfigError, Launch, ResizePolicy, ViewerSettings};

#[derive(Parser, Debug)]
#[command(
    name = "point-cloud-viewer",
    about = "Open one orbit-controlled viewport per point cloud model"
)]
pub struct Cli {
    /// JSON manifest listing viewers; models given on the command line are appended
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Drive frames continuously instead of rendering on demand
    #[arg(long)]
    pub animate: bool,

    /// Surface sizing on resize: square | window-fraction
    #[arg(long, default_value = "square")]
    pub resize_policy: ResizePolicy,

    /// Viewport width in pixels for models given on the command line
    #[arg(long, default_value_t = DEFAULT_CONTAINER_WIDTH)]
    pub width: f32,

    /// Model paths (.ply, .las, .laz), relative to the asset directory
    pub models: Vec<String>,
}

/// Merge the manifest (if any) with command line models and flags.
pub fn launch_from_cli(cli: Cli) -> Result<Launch, ConfigError> {
    let mut settings = ViewerSettings {
        resize_policy: cli.resize_policy,
        ..ViewerSettings::default()
    };

    let mut manifest = match &cli.manifest {
        Some(path) => ViewerManifest::read(path)?,
        None => ViewerManifest {
            live_animation: None,
            resize_policy: None,
            viewers: Vec::new(),
        },
    };

    let offset = manifest.viewers.len();
    manifest
        .viewers
        .extend(cli.models.into_iter().enumerate().map(|(i, model_path)| ManifestViewer {
            model_path,
            container: Some(default_container_id(offset + i)),
            width: Some(cli.width),
        }));

    // The flag can only switch the loop on; the manifest decides otherwise.
    if cli.animate {
        settings.live_animation = true;
        manifest.live_animation = Some(true);
    }

    let launch = manifest.into_launch(settings)?;
    if launch.configs.is_empty() {
        return Err(ConfigError::NoViewers);
    }
    Ok(launch)
}
