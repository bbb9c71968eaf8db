use bevy::prelude::*;
use constants::overlay::{STATS_FONT_SIZE, STATS_WIDTH};

use crate::engine::viewer::ViewerOf;

#[derive(Component, Debug)]
pub struct StatsOverlay;

/// Frame statistics panel pinned to the bottom-left corner of the viewer's
/// surface. Filled in by the live frame loop.
pub fn spawn_stats_overlay(commands: &mut Commands, viewer: Entity, camera: Entity) -> Entity {
    commands
        .spawn((
            Name::new("StatsOverlay"),
            Text::new(""),
            TextFont {
                font_size: STATS_FONT_SIZE,
                ..default()
            },
            TextColor(Color::srgb(0.0, 1.0, 1.0)),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                bottom: Val::Px(0.0),
                width: Val::Px(STATS_WIDTH),
                padding: UiRect::all(Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.133, 0.9)),
            UiTargetCamera(camera),
            StatsOverlay,
            ViewerOf(viewer),
        ))
        .id()
}
