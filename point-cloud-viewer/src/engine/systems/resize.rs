use bevy::prelude::*;

use crate::engine::core::settings::ViewerSettings;
use crate::engine::render::render_requests::RenderRequest;
use crate::engine::viewer::ViewerHandles;

/// Browser resize observed for one viewer's container.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ViewportResized {
    pub viewer: Entity,
    pub container_width: f32,
    pub window_size: Vec2,
}

/// Resize the viewer's surface per the active policy and keep its camera
/// aspect in step.
pub fn apply_resize_policy(
    settings: Res<ViewerSettings>,
    mut resized: EventReader<ViewportResized>,
    viewers: Query<&ViewerHandles>,
    mut windows: Query<&mut Window>,
    mut projections: Query<&mut Projection>,
    mut render_requests: EventWriter<RenderRequest>,
) {
    for event in resized.read() {
        let Ok(handles) = viewers.get(event.viewer) else {
            continue;
        };

        let size = settings
            .resize_policy
            .surface_size(event.container_width, event.window_size);
        if !(size.x > 0.0 && size.y > 0.0) {
            debug!("Ignoring collapsed surface size {size} for {:?}", event.viewer);
            continue;
        }

        if let Ok(mut window) = windows.get_mut(handles.window) {
            window.resolution.set(size.x, size.y);
        }
        if let Ok(mut projection) = projections.get_mut(handles.camera) {
            if let Projection::Perspective(perspective) = projection.as_mut() {
                perspective.aspect_ratio = size.x / size.y;
            }
        }

        render_requests.write(RenderRequest {
            viewer: event.viewer,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::settings::ResizePolicy;
    use crate::engine::render::render_requests::RenderCount;
    use crate::engine::test_support::{first_viewer, headless_app, test_config};
    use approx::assert_relative_eq;

    fn resize(policy: ResizePolicy, container_width: f32, window_size: Vec2) -> (Vec2, f32, u64) {
        let settings = ViewerSettings {
            resize_policy: policy,
            ..ViewerSettings::default()
        };
        let mut app = headless_app(settings, vec![test_config(0, "a.ply")]);
        app.update();

        let viewer = first_viewer(&mut app);
        app.world_mut().send_event(ViewportResized {
            viewer,
            container_width,
            window_size,
        });
        app.update();

        let world = app.world();
        let handles = world.get::<ViewerHandles>(viewer).unwrap();
        let window = world.get::<Window>(handles.window).unwrap();
        let Projection::Perspective(perspective) = world.get::<Projection>(handles.camera).unwrap()
        else {
            panic!("viewer camera must be perspective");
        };
        (
            Vec2::new(window.resolution.width(), window.resolution.height()),
            perspective.aspect_ratio,
            world.get::<RenderCount>(viewer).unwrap().0,
        )
    }

    #[test]
    fn square_policy_tracks_container_width() {
        let (size, aspect, renders) = resize(
            ResizePolicy::SquareByContainerWidth,
            640.0,
            Vec2::new(1920.0, 1080.0),
        );
        assert_eq!(size, Vec2::new(640.0, 640.0));
        assert_relative_eq!(aspect, 1.0);
        assert_eq!(renders, 1);
    }

    #[test]
    fn window_fraction_policy_updates_aspect() {
        let (size, aspect, renders) =
            resize(ResizePolicy::WindowFraction, 640.0, Vec2::new(1600.0, 800.0));
        assert_eq!(size, Vec2::new(800.0, 200.0));
        assert_relative_eq!(aspect, 4.0);
        assert_eq!(renders, 1);
    }

    #[test]
    fn collapsed_container_is_ignored() {
        let (size, aspect, renders) = resize(
            ResizePolicy::SquareByContainerWidth,
            0.0,
            Vec2::new(1600.0, 800.0),
        );
        assert_eq!(size, Vec2::new(512.0, 512.0));
        assert_relative_eq!(aspect, 1.0);
        assert_eq!(renders, 0);
    }
}
