use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use constants::lighting::{
    DIRECTIONAL_LIGHT_COLOR, DIRECTIONAL_LIGHT_INTENSITY, DIRECTIONAL_LUX_PER_UNIT,
};

use crate::engine::viewer::ViewerOf;

/// White directional light on +Z aimed at the origin. The ambient term rides
/// on the viewer's camera.
pub fn spawn_viewer_lighting(
    commands: &mut Commands,
    viewer: Entity,
    layers: &RenderLayers,
) -> Entity {
    commands
        .spawn((
            Name::new("ViewerLight"),
            DirectionalLight {
                color: DIRECTIONAL_LIGHT_COLOR,
                illuminance: DIRECTIONAL_LIGHT_INTENSITY * DIRECTIONAL_LUX_PER_UNIT,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
            layers.clone(),
            ViewerOf(viewer),
        ))
        .id()
}
