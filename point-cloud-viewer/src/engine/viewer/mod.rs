//! Viewer instance management.
//!
//! One viewer per configured container. Each viewer is an entity holding its
//! immutable `ViewerConfig` plus handles to the entities that make up its
//! scene: window surface, camera, lights, loaded point cloud, overlays. The
//! parts are linked back with the `ViewerOf` relationship so despawning a
//! viewer tears its whole scene down.
//!
//! Viewers never reference each other. Each owns a private render layer, so
//! its camera only sees its own lights and model.

/// Startup creation of all configured viewers.
pub mod spawn;

/// Handles that live exactly as long as their viewer.
pub mod scoped;

/// Explicit spin target binding used by the frame loop and parameter panel.
pub mod spin_target;

use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use bevy::window::RequestRedraw;

use crate::engine::camera::orbit_controls::{ControlsChanged, orbit_controls_input};
use crate::engine::core::settings::{ConfigError, ViewerSettings, live_animation_enabled};
use crate::engine::loading::las_loader::LasLoader;
use crate::engine::loading::model_spawner::{pace_pending_loads, spawn_loaded_models};
use crate::engine::loading::ply_loader::PlyLoader;
use crate::engine::loading::point_cloud_model::PointCloudModel;
use crate::engine::render::render_requests::{
    RenderRequest, flush_render_requests, render_on_controls_change,
};
use crate::engine::systems::animation::advance_frame;
use crate::engine::systems::fps_tracking::update_stats_overlays;
use crate::engine::systems::resize::{ViewportResized, apply_resize_policy};
use crate::ui::parameter_panel::{drag_panel_sliders, sync_panel_sliders};

use spawn::spawn_viewers;
use spin_target::{BindSpinTarget, bind_spin_targets};

/// Host element a viewer renders into.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerRef {
    id: String,
    width: f32,
}

impl ContainerRef {
    pub fn new(id: impl Into<String>, width: f32) -> Self {
        Self {
            id: id.into(),
            width,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Width measured when the container was discovered.
    pub fn width(&self) -> f32 {
        self.width
    }
}

/// Model source and container of one viewer. Immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    model_path: String,
    container: ContainerRef,
}

impl ViewerConfig {
    /// `index` only labels errors.
    pub fn new(
        index: usize,
        model_path: impl Into<String>,
        container: ContainerRef,
    ) -> Result<Self, ConfigError> {
        let model_path = model_path.into().trim().to_string();
        if model_path.is_empty() {
            return Err(ConfigError::EmptyModelPath { index });
        }
        if !container.width.is_finite() || container.width <= 0.0 {
            return Err(ConfigError::InvalidContainerWidth {
                index,
                width: container.width,
            });
        }
        Ok(Self {
            model_path,
            container,
        })
    }

    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    pub fn container(&self) -> &ContainerRef {
        &self.container
    }

    /// Id of the canvas appended to the container.
    pub fn canvas_id(&self) -> String {
        format!("{}-canvas", self.container.id)
    }
}

/// Configs discovered at startup, in page order.
#[derive(Resource, Debug, Clone, Default)]
pub struct ViewerConfigs(pub Vec<ViewerConfig>);

/// Root entity of one viewer.
#[derive(Component, Debug)]
pub struct Viewer {
    index: usize,
    config: ViewerConfig,
}

impl Viewer {
    pub fn new(index: usize, config: ViewerConfig) -> Self {
        Self { index, config }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Private render layer; layer 0 is left to anything not owned by a viewer.
    pub fn render_layers(&self) -> RenderLayers {
        RenderLayers::layer(self.index + 1)
    }
}

/// Entities making up a viewer's scene.
#[derive(Component, Debug, Clone)]
pub struct ViewerHandles {
    pub window: Entity,
    pub camera: Entity,
    pub stats: Entity,
    pub point_cloud: Option<Entity>,
    pub spin_target: Option<Entity>,
    pub panel: Option<Entity>,
}

/// Set once the parameter panel exists; checked every live frame.
#[derive(Component, Debug, Default)]
pub struct PanelGate {
    pub created: bool,
}

/// Marks an entity as part of a viewer's scene.
#[derive(Component, Debug)]
#[relationship(relationship_target = ViewerParts)]
pub struct ViewerOf(pub Entity);

/// Every entity linked to a viewer; despawned with it.
#[derive(Component, Debug)]
#[relationship_target(relationship = ViewerOf, linked_spawn)]
pub struct ViewerParts(Vec<Entity>);

/// Registers viewer creation, model loading, controls, resize, the optional
/// frame loop and overlay systems.
pub struct ViewerPlugin;

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<PointCloudModel>()
            .register_asset_loader(PlyLoader)
            .register_asset_loader(LasLoader)
            .init_resource::<ViewerSettings>()
            .init_resource::<ViewerConfigs>()
            .add_event::<RenderRequest>()
            .add_event::<ControlsChanged>()
            .add_event::<ViewportResized>()
            .add_event::<BindSpinTarget>()
            .add_event::<RequestRedraw>()
            .add_systems(Startup, spawn_viewers)
            .add_systems(
                Update,
                (
                    spawn_loaded_models,
                    pace_pending_loads,
                    orbit_controls_input,
                    render_on_controls_change,
                    apply_resize_policy,
                    bind_spin_targets,
                    (advance_frame, update_stats_overlays)
                        .chain()
                        .run_if(live_animation_enabled),
                    drag_panel_sliders,
                    sync_panel_sliders,
                    flush_render_requests,
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_trims_and_keeps_values() {
        let config =
            ViewerConfig::new(0, "  models/a.ply ", ContainerRef::new("container1", 400.0))
                .unwrap();
        assert_eq!(config.model_path(), "models/a.ply");
        assert_eq!(config.container().id(), "container1");
        assert_eq!(config.canvas_id(), "container1-canvas");
    }

    #[test]
    fn config_rejects_empty_path() {
        let result = ViewerConfig::new(3, "", ContainerRef::new("c", 400.0));
        assert!(matches!(result, Err(ConfigError::EmptyModelPath { index: 3 })));
    }

    #[test]
    fn config_rejects_collapsed_container() {
        for width in [0.0, -10.0, f32::NAN] {
            let result = ViewerConfig::new(1, "a.ply", ContainerRef::new("c", width));
            assert!(matches!(
                result,
                Err(ConfigError::InvalidContainerWidth { index: 1, .. })
            ));
        }
    }

    #[test]
    fn viewers_get_distinct_layers() {
        let config = ViewerConfig::new(0, "a.ply", ContainerRef::new("c", 10.0)).unwrap();
        let first = Viewer::new(0, config.clone());
        let second = Viewer::new(1, config);
        assert_ne!(first.render_layers(), second.render_layers());
        assert!(!first.render_layers().intersects(&second.render_layers()));
    }
}
