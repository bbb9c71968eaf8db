use std::time::Duration;

use bevy::asset::LoadState;
use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use bevy::winit::{UpdateMode, WinitSettings};
use constants::coordinate_system::model_correction;
use constants::render_settings::{MODEL_LOAD_POLL_MILLIS, POINT_SIZE};

use crate::engine::core::settings::ViewerSettings;

use crate::engine::loading::point_cloud_model::PointCloudModel;
use crate::engine::render::point_mesh::build_point_sprite_mesh;
use crate::engine::render::points_material::PointsMaterial;
use crate::engine::render::render_requests::RenderRequest;
use crate::engine::viewer::{Viewer, ViewerHandles, ViewerOf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Spawned(Entity),
    Failed,
}

/// A viewer's in-flight (or settled) model request.
#[derive(Component, Debug)]
pub struct ModelLoad {
    handle: Handle<PointCloudModel>,
    path: String,
    status: LoadStatus,
}

impl ModelLoad {
    pub fn new(handle: Handle<PointCloudModel>, path: &str) -> Self {
        Self {
            handle,
            path: path.to_string(),
            status: LoadStatus::Pending,
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }
}

/// The rendered point cloud of a viewer.
#[derive(Component, Debug)]
pub struct PointCloud {
    pub points: usize,
}

/// Poll every pending load. Success spawns the point sprite entity and asks
/// for one render; failure is logged once and the viewer stays empty.
pub fn spawn_loaded_models(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    models: Res<Assets<PointCloudModel>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<PointsMaterial>>,
    mut viewers: Query<(Entity, &Viewer, &mut ModelLoad, &mut ViewerHandles)>,
    mut render_requests: EventWriter<RenderRequest>,
) {
    for (entity, viewer, mut load, mut handles) in &mut viewers {
        if load.status != LoadStatus::Pending {
            continue;
        }

        if let Some(model) = models.get(&load.handle) {
            let point_cloud = commands
                .spawn((
                    Name::new(format!("PointCloud[{}]", viewer.index())),
                    Mesh3d(meshes.add(build_point_sprite_mesh(model))),
                    MeshMaterial3d(materials.add(PointsMaterial::new(POINT_SIZE))),
                    // Half turn about X into the camera's Y-up frame.
                    Transform::from_rotation(model_correction()),
                    viewer.render_layers(),
                    NoFrustumCulling,
                    NotShadowCaster,
                    NotShadowReceiver,
                    PointCloud { points: model.len() },
                    ViewerOf(entity),
                ))
                .id();

            handles.point_cloud = Some(point_cloud);
            load.status = LoadStatus::Spawned(point_cloud);
            render_requests.write(RenderRequest { viewer: entity });
            let (min, max) = model.bounds();
            info!(
                "Viewer {}: {} points from {}, bounds {} .. {}",
                viewer.index(),
                model.len(),
                load.path,
                min,
                max
            );
            continue;
        }

        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&load.handle) {
            warn!(
                "Viewer {}: failed to load {}: {}",
                viewer.index(),
                load.path,
                err
            );
            load.status = LoadStatus::Failed;
        }
    }
}

/// Short reactive wait for both focus states. A load finishing on the IO
/// task pool does not wake the event loop by itself.
pub fn loading_winit_settings() -> WinitSettings {
    let poll = UpdateMode::reactive(Duration::from_millis(MODEL_LOAD_POLL_MILLIS));
    WinitSettings {
        focused_mode: poll,
        unfocused_mode: poll,
    }
}

/// Poll the event loop while any viewer is still waiting on its model, then
/// fall back to purely reactive frames. A live frame loop is left alone.
pub fn pace_pending_loads(
    loads: Query<&ModelLoad>,
    settings: Res<ViewerSettings>,
    winit: Option<ResMut<WinitSettings>>,
) {
    let Some(mut winit) = winit else {
        return;
    };
    if settings.live_animation {
        return;
    }

    let pending = loads.iter().any(|load| load.status == LoadStatus::Pending);
    let wanted = if pending {
        loading_winit_settings()
    } else {
        WinitSettings::desktop_app()
    };
    if winit.focused_mode != wanted.focused_mode || winit.unfocused_mode != wanted.unfocused_mode
    {
        debug!("Model loads pending: {pending}, switching update mode");
        *winit = wanted;
    }
}
