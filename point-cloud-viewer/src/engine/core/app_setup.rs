use bevy::asset::AssetMetaCheck;
#[cfg(target_arch = "wasm32")]
use bevy::asset::io::AssetSourceBuilder;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::ExitCondition;
use bevy::winit::WinitSettings;

use crate::engine::core::settings::{Launch, ViewerSettings};
use crate::engine::loading::model_spawner::loading_winit_settings;
use crate::engine::render::points_material::PointsMaterial;
use crate::engine::viewer::{ViewerConfigs, ViewerPlugin};

#[cfg(target_arch = "wasm32")]
use crate::dom::DomPlugin;
#[cfg(target_arch = "wasm32")]
use crate::engine::loading::model_url::PAGE_ASSET_SOURCE;

const LOG_FILTER: &str = "wgpu=error,naga=warn,point_cloud_viewer=debug";

pub fn create_app(launch: Launch) -> App {
    let mut app = App::new();

    // Model URLs from the page are fetched relative to the site root, not
    // the bundled `assets/` directory. Sources must exist before AssetPlugin.
    #[cfg(target_arch = "wasm32")]
    app.register_asset_source(PAGE_ASSET_SOURCE, AssetSourceBuilder::platform_default("/", None));

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Point sprites are unlit and never cast or receive shadows.
        .add_plugins(MaterialPlugin::<PointsMaterial> {
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        })
        .insert_resource(create_winit_settings(&launch.settings))
        .insert_resource(launch.settings)
        .insert_resource(ViewerConfigs(launch.configs))
        .add_plugins(ViewerPlugin);

    #[cfg(target_arch = "wasm32")]
    app.add_plugins(DomPlugin);

    app
}

/// Continuous frames only when the frame loop is live. Otherwise frames are
/// produced by input and explicit redraw requests, with short polling while
/// the initial model loads are in flight (see `pace_pending_loads`).
fn create_winit_settings(settings: &ViewerSettings) -> WinitSettings {
    if settings.live_animation {
        WinitSettings::game()
    } else {
        loading_winit_settings()
    }
}

fn create_default_plugins() -> impl PluginGroup {
    // Viewer windows are spawned per container, so there is no primary window.
    let window_config = WindowPlugin {
        primary_window: None,
        exit_condition: ExitCondition::OnAllClosed,
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.into(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
