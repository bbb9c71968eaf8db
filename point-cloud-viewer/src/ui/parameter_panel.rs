use bevy::prelude::*;
use bevy::ui::RelativeCursorPosition;
use constants::overlay::{
    PANEL_FONT_SIZE, PANEL_ROW_HEIGHT, PANEL_SLIDER_MAX, PANEL_SLIDER_MIN, PANEL_TRACK_WIDTH,
    PANEL_WIDTH,
};

use crate::engine::render::render_requests::RenderRequest;
use crate::engine::viewer::ViewerOf;
use crate::engine::viewer::spin_target::SpinTarget;

#[derive(Component, Debug)]
pub struct ParameterPanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderAxis {
    X,
    Y,
    Z,
}

impl SliderAxis {
    pub const ALL: [SliderAxis; 3] = [SliderAxis::X, SliderAxis::Y, SliderAxis::Z];

    pub fn label(&self) -> &'static str {
        match self {
            SliderAxis::X => "x",
            SliderAxis::Y => "y",
            SliderAxis::Z => "z",
        }
    }

    pub fn get(&self, translation: Vec3) -> f32 {
        match self {
            SliderAxis::X => translation.x,
            SliderAxis::Y => translation.y,
            SliderAxis::Z => translation.z,
        }
    }

    pub fn set(&self, translation: &mut Vec3, value: f32) {
        match self {
            SliderAxis::X => translation.x = value,
            SliderAxis::Y => translation.y = value,
            SliderAxis::Z => translation.z = value,
        }
    }
}

/// One translation axis of a spin target bound to a slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderBinding {
    pub target: Entity,
    pub axis: SliderAxis,
    pub min: f32,
    pub max: f32,
}

/// Draggable slider track.
#[derive(Component, Debug)]
pub struct PanelSlider {
    pub viewer: Entity,
    pub binding: SliderBinding,
}

/// Filled portion of a slider track.
#[derive(Component, Debug)]
pub struct SliderFill(pub SliderBinding);

/// Numeric value shown next to a slider.
#[derive(Component, Debug)]
pub struct SliderReadout(pub SliderBinding);

/// Map `RelativeCursorPosition::normalized.x` (centre-relative) to 0..1.
pub fn fraction_from_normalized(normalized_x: f32) -> f32 {
    (normalized_x + 0.5).clamp(0.0, 1.0)
}

pub fn value_from_fraction(fraction: f32, min: f32, max: f32) -> f32 {
    min + (max - min) * fraction.clamp(0.0, 1.0)
}

pub fn fraction_from_value(value: f32, min: f32, max: f32) -> f32 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Three sliders (x, y, z in -1..1) live-bound to the target's translation,
/// anchored top-right of the viewer's surface.
pub fn spawn_parameter_panel(
    commands: &mut Commands,
    viewer: Entity,
    camera: Entity,
    target: Entity,
) -> Entity {
    commands
        .spawn((
            Name::new("ParameterPanel"),
            ParameterPanel,
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.9)),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                right: Val::Px(0.0),
                width: Val::Px(PANEL_WIDTH),
                padding: UiRect::all(Val::Px(4.0)),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(2.0),
                ..default()
            },
            UiTargetCamera(camera),
            ViewerOf(viewer),
        ))
        .with_children(|panel| {
            for axis in SliderAxis::ALL {
                let binding = SliderBinding {
                    target,
                    axis,
                    min: PANEL_SLIDER_MIN,
                    max: PANEL_SLIDER_MAX,
                };
                spawn_slider_row(panel, viewer, binding);
            }
        })
        .id()
}

fn spawn_slider_row(panel: &mut ChildSpawnerCommands, viewer: Entity, binding: SliderBinding) {
    let text_font = TextFont {
        font_size: PANEL_FONT_SIZE,
        ..default()
    };

    panel
        .spawn(Node {
            height: Val::Px(PANEL_ROW_HEIGHT),
            display: Display::Flex,
            align_items: AlignItems::Center,
            column_gap: Val::Px(6.0),
            ..default()
        })
        .with_children(|row| {
            row.spawn((
                Text::new(binding.axis.label()),
                text_font.clone(),
                TextColor(Color::srgb(0.93, 0.93, 0.93)),
                Node {
                    width: Val::Px(12.0),
                    ..default()
                },
            ));

            row.spawn((
                Name::new(format!("Slider[{}]", binding.axis.label())),
                Button,
                RelativeCursorPosition::default(),
                PanelSlider { viewer, binding },
                BackgroundColor(Color::srgb(0.18, 0.18, 0.18)),
                Node {
                    width: Val::Px(PANEL_TRACK_WIDTH),
                    height: Val::Percent(70.0),
                    ..default()
                },
            ))
            .with_children(|track| {
                track.spawn((
                    SliderFill(binding),
                    BackgroundColor(Color::srgb(0.18, 0.53, 0.85)),
                    Node {
                        width: Val::Percent(50.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                ));
            });

            row.spawn((
                SliderReadout(binding),
                Text::new(""),
                text_font,
                TextColor(Color::srgb(0.18, 0.53, 0.85)),
            ));
        });
}

/// Pressed slider tracks set their axis from the cursor position.
pub fn drag_panel_sliders(
    sliders: Query<(&Interaction, &RelativeCursorPosition, &PanelSlider)>,
    mut targets: Query<&mut Transform, With<SpinTarget>>,
    mut render_requests: EventWriter<RenderRequest>,
) {
    for (interaction, cursor, slider) in &sliders {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Some(normalized) = cursor.normalized else {
            continue;
        };
        let Ok(mut transform) = targets.get_mut(slider.binding.target) else {
            continue;
        };

        let SliderBinding { axis, min, max, .. } = slider.binding;
        let value = value_from_fraction(fraction_from_normalized(normalized.x), min, max);
        if axis.get(transform.translation) != value {
            axis.set(&mut transform.translation, value);
            render_requests.write(RenderRequest {
                viewer: slider.viewer,
            });
        }
    }
}

/// Reflect the target's current translation in fills and readouts.
pub fn sync_panel_sliders(
    targets: Query<&Transform, With<SpinTarget>>,
    mut fills: Query<(&SliderFill, &mut Node)>,
    mut readouts: Query<(&SliderReadout, &mut Text)>,
) {
    for (SliderFill(binding), mut node) in &mut fills {
        let Ok(transform) = targets.get(binding.target) else {
            continue;
        };
        let value = binding.axis.get(transform.translation);
        let fraction = fraction_from_value(value, binding.min, binding.max);
        let width = Val::Percent(fraction * 100.0);
        if node.width != width {
            node.width = width;
        }
    }

    for (SliderReadout(binding), mut text) in &mut readouts {
        let Ok(transform) = targets.get(binding.target) else {
            continue;
        };
        let label = format!("{:.2}", binding.axis.get(transform.translation));
        if text.0 != label {
            text.0 = label;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::settings::ViewerSettings;
    use crate::engine::test_support::{first_viewer, headless_app, test_config};
    use crate::engine::viewer::ViewerHandles;
    use crate::engine::viewer::spin_target::BindSpinTarget;
    use approx::assert_relative_eq;

    #[test]
    fn cursor_maps_onto_slider_range() {
        assert_relative_eq!(fraction_from_normalized(-0.5), 0.0);
        assert_relative_eq!(fraction_from_normalized(0.0), 0.5);
        assert_relative_eq!(fraction_from_normalized(0.9), 1.0);
        assert_relative_eq!(value_from_fraction(0.0, -1.0, 1.0), -1.0);
        assert_relative_eq!(value_from_fraction(0.75, -1.0, 1.0), 0.5);
        assert_relative_eq!(fraction_from_value(0.5, -1.0, 1.0), 0.75);
        assert_relative_eq!(fraction_from_value(7.0, -1.0, 1.0), 1.0);
    }

    #[test]
    fn axes_address_their_component() {
        let mut translation = Vec3::ZERO;
        SliderAxis::Y.set(&mut translation, 0.25);
        assert_eq!(translation, Vec3::new(0.0, 0.25, 0.0));
        assert_eq!(SliderAxis::Y.get(translation), 0.25);
        assert_eq!(SliderAxis::Z.get(translation), 0.0);
    }

    fn app_with_panel() -> (App, Entity, Entity) {
        let settings = ViewerSettings {
            live_animation: true,
            ..ViewerSettings::default()
        };
        let mut app = headless_app(settings, vec![test_config(0, "a.ply")]);
        app.update();
        let viewer = first_viewer(&mut app);
        let cube = app
            .world_mut()
            .spawn(Transform::from_xyz(0.5, -0.5, 0.0))
            .id();
        app.world_mut().send_event(BindSpinTarget {
            viewer,
            target: cube,
        });
        app.update();
        app.update();
        (app, viewer, cube)
    }

    #[test]
    fn panel_has_three_sliders_on_the_target() {
        let (mut app, viewer, cube) = app_with_panel();

        let world = app.world_mut();
        let handles = world.get::<ViewerHandles>(viewer).unwrap().clone();
        let panel = handles.panel.unwrap();
        assert_eq!(world.get::<UiTargetCamera>(panel).unwrap().entity(), handles.camera);
        let node = world.get::<Node>(panel).unwrap();
        assert_eq!(node.top, Val::Px(0.0));
        assert_eq!(node.right, Val::Px(0.0));

        let mut axes: Vec<&'static str> = world
            .query::<&PanelSlider>()
            .iter(world)
            .map(|slider| {
                assert_eq!(slider.binding.target, cube);
                assert_eq!((slider.binding.min, slider.binding.max), (-1.0, 1.0));
                slider.binding.axis.label()
            })
            .collect();
        axes.sort();
        assert_eq!(axes, ["x", "y", "z"]);
    }

    #[test]
    fn readouts_follow_the_target() {
        let (mut app, _, cube) = app_with_panel();
        app.world_mut()
            .get_mut::<Transform>(cube)
            .unwrap()
            .translation
            .z = 1.0;
        app.update();

        let world = app.world_mut();
        let mut readouts: Vec<(&'static str, String)> = world
            .query::<(&SliderReadout, &Text)>()
            .iter(world)
            .map(|(readout, text)| (readout.0.axis.label(), text.0.clone()))
            .collect();
        readouts.sort();
        assert_eq!(
            readouts,
            [
                ("x", "0.50".to_string()),
                ("y", "-0.50".to_string()),
                ("z", "1.00".to_string())
            ]
        );

        let x_fill = world
            .query::<(&SliderFill, &Node)>()
            .iter(world)
            .find(|(fill, _)| fill.0.axis == SliderAxis::X)
            .map(|(_, node)| node.width)
            .unwrap();
        assert_eq!(x_fill, Val::Percent(75.0));
    }

    #[test]
    fn pressing_a_track_moves_the_target() {
        let (mut app, _, cube) = app_with_panel();
        let world = app.world_mut();
        let x_slider = world
            .query::<(Entity, &PanelSlider)>()
            .iter(world)
            .find(|(_, slider)| slider.binding.axis == SliderAxis::X)
            .map(|(entity, _)| entity)
            .unwrap();
        world.entity_mut(x_slider).insert((
            Interaction::Pressed,
            RelativeCursorPosition {
                normalized: Some(Vec2::new(-0.25, 0.0)),
                ..default()
            },
        ));
        app.update();

        let translation = app.world().get::<Transform>(cube).unwrap().translation;
        assert_relative_eq!(translation.x, -0.5);
        assert_relative_eq!(translation.y, -0.5);
    }
}
