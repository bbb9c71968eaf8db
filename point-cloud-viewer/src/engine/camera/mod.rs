//! Viewer cameras and orbit navigation.
//!
//! Each viewer owns one perspective camera rendering into its own window
//! surface, restricted to the viewer's render layer.

/// Orbit controls component, input system and change events.
pub mod orbit_controls;

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::render::camera::{ClearColorConfig, RenderTarget};
use bevy::render::view::RenderLayers;
use bevy::window::WindowRef;
use constants::camera::{
    FAR_PLANE, FIELD_OF_VIEW_DEGREES, INITIAL_ASPECT_RATIO, INITIAL_CAMERA_DISTANCE, NEAR_PLANE,
    ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE,
};
use constants::lighting::{
    AMBIENT_BRIGHTNESS_PER_UNIT, AMBIENT_LIGHT_COLOR, AMBIENT_LIGHT_INTENSITY,
};

use crate::engine::core::settings::ViewerSettings;
use crate::engine::viewer::ViewerOf;
use orbit_controls::OrbitControls;

/// Links a camera to its viewer and the window it renders into.
#[derive(Component, Debug, Clone, Copy)]
pub struct ViewerCamera {
    pub viewer: Entity,
    pub window: Entity,
}

pub fn viewer_projection() -> Projection {
    Projection::Perspective(PerspectiveProjection {
        fov: FIELD_OF_VIEW_DEGREES.to_radians(),
        near: NEAR_PLANE,
        far: FAR_PLANE,
        aspect_ratio: INITIAL_ASPECT_RATIO,
    })
}

/// Perspective camera at +Z looking at the origin, with orbit controls and
/// the viewer's ambient light attached.
pub fn spawn_viewer_camera(
    commands: &mut Commands,
    viewer: Entity,
    window: Entity,
    index: usize,
    settings: &ViewerSettings,
    layers: &RenderLayers,
) -> Entity {
    commands
        .spawn((
            Name::new(format!("ViewerCamera[{index}]")),
            Camera3d::default(),
            Camera {
                target: RenderTarget::Window(WindowRef::Entity(window)),
                clear_color: ClearColorConfig::Custom(settings.background),
                order: index as isize,
                ..default()
            },
            viewer_projection(),
            // Point colours are shown as decoded.
            Tonemapping::None,
            Transform::from_xyz(0.0, 0.0, INITIAL_CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
            OrbitControls::with_distance_bounds(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE),
            AmbientLight {
                color: AMBIENT_LIGHT_COLOR,
                brightness: AMBIENT_LIGHT_INTENSITY * AMBIENT_BRIGHTNESS_PER_UNIT,
                ..default()
            },
            layers.clone(),
            ViewerCamera { viewer, window },
            ViewerOf(viewer),
        ))
        .id()
}
