use bevy::prelude::*;
use constants::animation::SPIN_STEP_RADIANS;

use crate::engine::render::render_requests::RenderRequest;
use crate::engine::viewer::spin_target::SpinTarget;
use crate::engine::viewer::{PanelGate, ViewerHandles};
use crate::ui::parameter_panel::spawn_parameter_panel;

/// One tick of the live frame loop for every viewer: spin the bound target,
/// create the parameter panel the first time a target is seen, render.
pub fn advance_frame(
    mut commands: Commands,
    mut viewers: Query<(Entity, &mut ViewerHandles, &mut PanelGate)>,
    mut targets: Query<(&mut SpinTarget, &mut Transform)>,
    mut render_requests: EventWriter<RenderRequest>,
) {
    for (viewer, mut handles, mut gate) in &mut viewers {
        if let Some(target) = handles.spin_target {
            if let Ok((mut spin, mut transform)) = targets.get_mut(target) {
                spin.euler.x += SPIN_STEP_RADIANS;
                spin.euler.y += SPIN_STEP_RADIANS;
                transform.rotation = spin.rotation();

                if !gate.created {
                    let panel =
                        spawn_parameter_panel(&mut commands, viewer, handles.camera, target);
                    handles.panel = Some(panel);
                    gate.created = true;
                }
            }
        }

        render_requests.write(RenderRequest { viewer });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::settings::ViewerSettings;
    use crate::engine::render::render_requests::RenderCount;
    use crate::engine::test_support::{first_viewer, headless_app, test_config};
    use crate::engine::viewer::spin_target::BindSpinTarget;
    use crate::ui::parameter_panel::ParameterPanel;
    use approx::assert_relative_eq;

    fn live() -> ViewerSettings {
        ViewerSettings {
            live_animation: true,
            ..ViewerSettings::default()
        }
    }

    fn bind_cube(app: &mut App) -> (Entity, Entity) {
        let viewer = first_viewer(app);
        let cube = app.world_mut().spawn((Name::new("cube"), Transform::default())).id();
        app.world_mut().send_event(BindSpinTarget {
            viewer,
            target: cube,
        });
        (viewer, cube)
    }

    #[test]
    fn panel_is_created_once_over_many_frames() {
        let mut app = headless_app(live(), vec![test_config(0, "a.ply")]);
        app.update();
        let (viewer, _) = bind_cube(&mut app);

        for _ in 0..10_000 {
            app.update();
        }

        let world = app.world_mut();
        assert_eq!(world.query::<&ParameterPanel>().iter(world).count(), 1);
        let handles = world.get::<ViewerHandles>(viewer).unwrap();
        assert!(handles.panel.is_some());
        assert!(world.get::<PanelGate>(viewer).unwrap().created);
    }

    #[test]
    fn target_spins_on_x_and_y_each_frame() {
        let mut app = headless_app(live(), vec![test_config(0, "a.ply")]);
        app.update();
        let (_, cube) = bind_cube(&mut app);

        for _ in 0..50 {
            app.update();
        }

        let spin = app.world().get::<SpinTarget>(cube).unwrap();
        assert_relative_eq!(spin.euler.x, 0.5, epsilon = 1e-4);
        assert_relative_eq!(spin.euler.y, 0.5, epsilon = 1e-4);
        assert_relative_eq!(spin.euler.z, 0.0);
        let transform = app.world().get::<Transform>(cube).unwrap();
        assert!(transform.rotation.abs_diff_eq(spin.rotation(), 1e-6));
    }

    #[test]
    fn live_loop_renders_every_frame() {
        let mut app = headless_app(live(), vec![test_config(0, "a.ply")]);
        for _ in 0..5 {
            app.update();
        }
        let world = app.world_mut();
        let count = world.query::<&RenderCount>().single(world).unwrap();
        assert_eq!(count.0, 5);
    }

    #[test]
    fn dormant_loop_leaves_target_alone() {
        let mut app = headless_app(ViewerSettings::default(), vec![test_config(0, "a.ply")]);
        app.update();
        let (_, cube) = bind_cube(&mut app);

        for _ in 0..100 {
            app.update();
        }

        let world = app.world_mut();
        assert_eq!(world.query::<&ParameterPanel>().iter(world).count(), 0);
        assert_eq!(world.get::<SpinTarget>(cube).unwrap().euler, Vec3::ZERO);
        assert_eq!(world.query::<&RenderCount>().single(world).unwrap().0, 0);
    }
}
