use bevy::prelude::*;

use crate::engine::camera::spawn_viewer_camera;
use crate::engine::core::settings::ViewerSettings;
use crate::engine::core::window_config::create_viewer_window;
use crate::engine::loading::model_spawner::ModelLoad;
use crate::engine::render::render_requests::RenderCount;
use crate::engine::scene::lighting::spawn_viewer_lighting;
use crate::engine::viewer::{
    PanelGate, Viewer, ViewerConfig, ViewerConfigs, ViewerHandles, ViewerOf,
};
use crate::ui::stats_overlay::spawn_stats_overlay;

/// Create one independent viewer per configured container.
pub fn spawn_viewers(
    mut commands: Commands,
    configs: Res<ViewerConfigs>,
    settings: Res<ViewerSettings>,
    asset_server: Res<AssetServer>,
) {
    for (index, config) in configs.0.iter().enumerate() {
        let viewer = spawn_viewer(&mut commands, &asset_server, &settings, index, config);
        info!(
            "Viewer {} created for '{}' in #{} ({:?})",
            index,
            config.model_path(),
            config.container().id(),
            viewer
        );
    }
}

/// Scene, surface, camera, lights, overlay and model request for one container.
pub fn spawn_viewer(
    commands: &mut Commands,
    asset_server: &AssetServer,
    settings: &ViewerSettings,
    index: usize,
    config: &ViewerConfig,
) -> Entity {
    let viewer_component = Viewer::new(index, config.clone());
    let layers = viewer_component.render_layers();

    let viewer = commands
        .spawn((
            Name::new(format!("Viewer[{index}]")),
            viewer_component,
            PanelGate::default(),
            RenderCount::default(),
        ))
        .id();

    let window = commands
        .spawn((
            Name::new(format!("ViewerSurface[{index}]")),
            create_viewer_window(config),
            ViewerOf(viewer),
        ))
        .id();

    let camera = spawn_viewer_camera(commands, viewer, window, index, settings, &layers);
    spawn_viewer_lighting(commands, viewer, &layers);
    let stats = spawn_stats_overlay(commands, viewer, camera);

    // The load runs on the asset server's task pool; `spawn_loaded_models` polls it.
    let handle = asset_server.load(config.model_path().to_string());

    commands.entity(viewer).insert((
        ViewerHandles {
            window,
            camera,
            stats,
            point_cloud: None,
            spin_target: None,
            panel: None,
        },
        ModelLoad::new(handle, config.model_path()),
    ));

    viewer
}
