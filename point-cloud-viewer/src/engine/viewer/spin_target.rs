use bevy::prelude::*;

use crate::engine::viewer::{Viewer, ViewerHandles, ViewerOf};

/// An entity in a viewer's scene driven by the frame loop and parameter panel.
///
/// Rotation is kept as XYZ Euler angles and accumulated directly, so the spin
/// never folds through a quaternion round trip.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpinTarget {
    pub euler: Vec3,
}

impl SpinTarget {
    pub fn from_rotation(rotation: Quat) -> Self {
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        Self {
            euler: Vec3::new(x, y, z),
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.euler.x, self.euler.y, self.euler.z)
    }
}

/// Make `target` the spin target of `viewer`. The target joins the viewer's
/// render layer and is despawned with it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindSpinTarget {
    pub viewer: Entity,
    pub target: Entity,
}

pub fn bind_spin_targets(
    mut commands: Commands,
    mut bindings: EventReader<BindSpinTarget>,
    mut viewers: Query<(&Viewer, &mut ViewerHandles)>,
    transforms: Query<&Transform>,
) {
    for binding in bindings.read() {
        let Ok((viewer, mut handles)) = viewers.get_mut(binding.viewer) else {
            warn!("Spin target {:?} bound to unknown viewer {:?}", binding.target, binding.viewer);
            continue;
        };
        let Ok(transform) = transforms.get(binding.target) else {
            warn!(
                "Viewer {}: spin target {:?} has no transform",
                viewer.index(),
                binding.target
            );
            continue;
        };

        commands.entity(binding.target).insert((
            SpinTarget::from_rotation(transform.rotation),
            viewer.render_layers(),
            ViewerOf(binding.viewer),
        ));
        handles.spin_target = Some(binding.target);
        debug!("Viewer {}: spin target {:?}", viewer.index(), binding.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::settings::ViewerSettings;
    use crate::engine::test_support::{first_viewer, headless_app, test_config};
    use bevy::render::view::RenderLayers;

    #[test]
    fn nothing_is_bound_by_default() {
        let mut app = headless_app(ViewerSettings::default(), vec![test_config(0, "a.ply")]);
        app.update();
        let world = app.world_mut();
        let handles = world.query::<&ViewerHandles>().single(world).unwrap();
        assert_eq!(handles.spin_target, None);
    }

    #[test]
    fn binding_joins_the_viewer_scene() {
        let mut app = headless_app(ViewerSettings::default(), vec![test_config(0, "a.ply")]);
        app.update();

        let viewer = first_viewer(&mut app);
        let target = app
            .world_mut()
            .spawn(Transform::from_rotation(Quat::from_rotation_y(0.3)))
            .id();
        app.world_mut().send_event(BindSpinTarget { viewer, target });
        app.update();

        let world = app.world();
        assert_eq!(
            world.get::<ViewerHandles>(viewer).unwrap().spin_target,
            Some(target)
        );
        assert_eq!(
            *world.get::<RenderLayers>(target).unwrap(),
            RenderLayers::layer(1)
        );
        let spin = world.get::<SpinTarget>(target).unwrap();
        assert!(spin.rotation().abs_diff_eq(Quat::from_rotation_y(0.3), 1e-6));
    }

    #[test]
    fn unknown_viewer_is_ignored() {
        let mut app = headless_app(ViewerSettings::default(), vec![test_config(0, "a.ply")]);
        app.update();
        let stray = app.world_mut().spawn_empty().id();
        let target = app.world_mut().spawn(Transform::default()).id();
        app.world_mut().send_event(BindSpinTarget {
            viewer: stray,
            target,
        });
        app.update();
        assert!(app.world().get::<SpinTarget>(target).is_none());
    }
}
