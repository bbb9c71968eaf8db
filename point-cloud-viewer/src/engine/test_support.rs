//! Headless app harness for system tests.

use std::time::Duration;

use bevy::diagnostic::DiagnosticsStore;
use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::window::ExitCondition;
use constants::render_settings::DEFAULT_CONTAINER_WIDTH;

use crate::engine::core::settings::ViewerSettings;
use crate::engine::render::points_material::PointsMaterial;
use crate::engine::viewer::{ContainerRef, Viewer, ViewerConfig, ViewerConfigs, ViewerPlugin};

/// Viewer plugin on top of minimal plugins, assets and input, with no
/// renderer and no OS windows.
pub fn headless_app(settings: ViewerSettings, configs: Vec<ViewerConfig>) -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        AssetPlugin::default(),
        InputPlugin,
        WindowPlugin {
            primary_window: None,
            exit_condition: ExitCondition::DontExit,
            close_when_requested: false,
            ..default()
        },
    ))
    .init_asset::<Mesh>()
    .init_asset::<PointsMaterial>()
    .init_resource::<DiagnosticsStore>()
    .insert_resource(settings)
    .insert_resource(ViewerConfigs(configs))
    .add_plugins(ViewerPlugin);
    app
}

pub fn test_config(index: usize, model_path: &str) -> ViewerConfig {
    ViewerConfig::new(
        index,
        model_path,
        ContainerRef::new(format!("container{}", index + 1), DEFAULT_CONTAINER_WIDTH),
    )
    .unwrap()
}

/// Viewer entity with index 0.
pub fn first_viewer(app: &mut App) -> Entity {
    let world = app.world_mut();
    world
        .query::<(Entity, &Viewer)>()
        .iter(world)
        .find(|(_, viewer)| viewer.index() == 0)
        .map(|(entity, _)| entity)
        .unwrap()
}

/// Update until `done` holds, giving IO tasks time to finish. False on timeout.
pub fn update_until(app: &mut App, mut done: impl FnMut(&mut World) -> bool) -> bool {
    for _ in 0..500 {
        app.update();
        if done(app.world_mut()) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    false
}
