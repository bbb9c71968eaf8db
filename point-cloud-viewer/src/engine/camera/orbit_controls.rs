use std::f32::consts::TAU;

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::camera::{
    FIELD_OF_VIEW_DEGREES, ORBIT_CHANGE_EPSILON, ORBIT_DOLLY_BASE, ORBIT_PAN_SPEED,
    ORBIT_PIXEL_SCROLL_SCALE, ORBIT_POLAR_EPSILON, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};

use crate::engine::camera::ViewerCamera;
use crate::ui::parameter_panel::PanelSlider;

/// Emitted once per control update that actually moved a viewer's camera.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsChanged {
    pub viewer: Entity,
}

/// Orbit navigation around `target`: left drag rotates, right or middle drag
/// pans, the wheel dollies.
///
/// Distance bounds are stored exactly as configured; they are only applied
/// as `max(min, min(max, d))` while dollying, so a negative minimum or an
/// inverted pair is accepted without complaint.
#[derive(Component, Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    last_cursor: Option<Vec2>,
}

impl OrbitControls {
    pub fn with_distance_bounds(min_distance: f32, max_distance: f32) -> Self {
        Self {
            min_distance,
            max_distance,
            ..default()
        }
    }

    /// Cursor delta since the previous position seen in this viewer's window.
    pub fn track_cursor(&mut self, position: Vec2) -> Vec2 {
        let delta = self
            .last_cursor
            .map_or(Vec2::ZERO, |last| position - last);
        self.last_cursor = Some(position);
        delta
    }

    /// Apply one frame of input to `transform`. Returns whether the camera moved.
    pub fn apply(
        &mut self,
        transform: &mut Transform,
        input: &OrbitInput,
        viewport_height: f32,
        fov: f32,
    ) -> bool {
        if input.is_empty() || viewport_height <= 0.0 {
            return false;
        }

        let last_position = transform.translation;
        let last_rotation = transform.rotation;

        let offset = transform.translation - self.target;
        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius > f32::EPSILON {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, std::f32::consts::FRAC_PI_2)
        };

        // Full viewport height of drag is one turn.
        theta -= TAU * input.rotate.x / viewport_height * self.rotate_speed;
        phi -= TAU * input.rotate.y / viewport_height * self.rotate_speed;
        phi = phi.clamp(ORBIT_POLAR_EPSILON, std::f32::consts::PI - ORBIT_POLAR_EPSILON);

        if input.scroll != 0.0 {
            radius *= ORBIT_DOLLY_BASE.powf(input.scroll * self.zoom_speed);
            radius = radius.min(self.max_distance).max(self.min_distance);
        }

        if input.pan != Vec2::ZERO {
            // World units per pixel at the target's depth.
            let target_distance = offset.length() * (fov * 0.5).tan();
            let scale = 2.0 * target_distance / viewport_height * self.pan_speed;
            let right = transform.right();
            let up = transform.up();
            self.target += (-*right * input.pan.x + *up * input.pan.y) * scale;
        }

        let spherical = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        transform.translation = self.target + spherical;
        transform.look_at(self.target, Vec3::Y);

        last_position.distance_squared(transform.translation) > ORBIT_CHANGE_EPSILON
            || 8.0 * (1.0 - last_rotation.dot(transform.rotation)) > ORBIT_CHANGE_EPSILON
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            last_cursor: None,
        }
    }
}

/// Input gathered for one camera in one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct OrbitInput {
    /// Rotation drag in logical pixels.
    pub rotate: Vec2,
    /// Pan drag in logical pixels.
    pub pan: Vec2,
    /// Wheel lines; positive zooms in.
    pub scroll: f32,
}

impl OrbitInput {
    pub fn is_empty(&self) -> bool {
        self.rotate == Vec2::ZERO && self.pan == Vec2::ZERO && self.scroll == 0.0
    }
}

/// Gather this frame's cursor and wheel input per viewer window. A viewer
/// whose panel slider is being dragged keeps tracking the cursor but does not
/// move its camera.
pub fn orbit_controls_input(
    mut cameras: Query<(&ViewerCamera, &mut OrbitControls, &mut Transform, &Projection)>,
    windows: Query<&Window>,
    sliders: Query<(&Interaction, &PanelSlider)>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut scroll_events: EventReader<MouseWheel>,
    mut changes: EventWriter<ControlsChanged>,
) {
    let moves: Vec<&CursorMoved> = cursor_moved.read().collect();
    let wheels: Vec<&MouseWheel> = scroll_events.read().collect();
    if moves.is_empty() && wheels.is_empty() {
        return;
    }

    let rotating = mouse_button.pressed(MouseButton::Left);
    let panning = mouse_button.any_pressed([MouseButton::Right, MouseButton::Middle]);
    let grabbed: Vec<Entity> = sliders
        .iter()
        .filter(|(interaction, _)| **interaction == Interaction::Pressed)
        .map(|(_, slider)| slider.viewer)
        .collect();

    for (viewer_camera, mut controls, mut transform, projection) in &mut cameras {
        let Ok(window) = windows.get(viewer_camera.window) else {
            continue;
        };

        let mut input = OrbitInput::default();
        for moved in moves.iter().filter(|m| m.window == viewer_camera.window) {
            let delta = controls.track_cursor(moved.position);
            if rotating {
                input.rotate += delta;
            } else if panning {
                input.pan += delta;
            }
        }

        for wheel in wheels.iter().filter(|w| w.window == viewer_camera.window) {
            input.scroll += match wheel.unit {
                MouseScrollUnit::Line => wheel.y,
                MouseScrollUnit::Pixel => wheel.y * ORBIT_PIXEL_SCROLL_SCALE,
            };
        }

        if grabbed.contains(&viewer_camera.viewer) {
            continue;
        }

        let fov = match projection {
            Projection::Perspective(perspective) => perspective.fov,
            _ => FIELD_OF_VIEW_DEGREES.to_radians(),
        };

        if controls.apply(&mut transform, &input, window.height(), fov) {
            changes.write(ControlsChanged {
                viewer: viewer_camera.viewer,
            });
        }
    }
}
