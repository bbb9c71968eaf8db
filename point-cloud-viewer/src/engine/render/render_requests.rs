use bevy::prelude::*;
use bevy::window::RequestRedraw;

use crate::engine::camera::orbit_controls::ControlsChanged;

/// Ask for one frame of a viewer to be rendered.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    pub viewer: Entity,
}

/// Render requests served for a viewer so far.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderCount(pub u64);

/// Every control change renders its viewer once, with or without the frame loop.
pub fn render_on_controls_change(
    mut changes: EventReader<ControlsChanged>,
    mut render_requests: EventWriter<RenderRequest>,
) {
    for change in changes.read() {
        render_requests.write(RenderRequest {
            viewer: change.viewer,
        });
    }
}

/// Count this frame's requests per viewer and wake the reactive event loop.
pub fn flush_render_requests(
    mut render_requests: EventReader<RenderRequest>,
    mut counts: Query<&mut RenderCount>,
    mut redraw: EventWriter<RequestRedraw>,
) {
    let mut requested = false;
    for request in render_requests.read() {
        if let Ok(mut count) = counts.get_mut(request.viewer) {
            count.0 += 1;
            requested = true;
        }
    }
    if requested {
        redraw.write(RequestRedraw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::settings::ViewerSettings;
    use crate::engine::test_support::{headless_app, test_config};
    use crate::engine::viewer::Viewer;

    fn viewer_counts(app: &mut App) -> Vec<(usize, Entity, u64)> {
        let world = app.world_mut();
        let mut counts: Vec<_> = world
            .query::<(Entity, &Viewer, &RenderCount)>()
            .iter(world)
            .map(|(entity, viewer, count)| (viewer.index(), entity, count.0))
            .collect();
        counts.sort_by_key(|(index, _, _)| *index);
        counts
    }

    #[test]
    fn each_control_change_is_one_render() {
        let mut app = headless_app(
            ViewerSettings::default(),
            vec![test_config(0, "a.ply"), test_config(1, "b.ply")],
        );
        app.update();

        let counts = viewer_counts(&mut app);
        let (first, second) = (counts[0].1, counts[1].1);
        for _ in 0..25 {
            app.world_mut().send_event(ControlsChanged { viewer: first });
        }
        app.update();

        let counts = viewer_counts(&mut app);
        assert_eq!(counts[0], (0, first, 25));
        assert_eq!(counts[1], (1, second, 0));
    }

    #[test]
    fn requests_are_spread_over_frames_exactly() {
        let mut app = headless_app(ViewerSettings::default(), vec![test_config(0, "a.ply")]);
        app.update();
        let viewer = viewer_counts(&mut app)[0].1;

        for _ in 0..7 {
            app.world_mut().send_event(ControlsChanged { viewer });
            app.update();
        }
        // No frame loop running and nothing else moving: counts match changes.
        assert_eq!(viewer_counts(&mut app)[0].2, 7);
    }

    #[test]
    fn requests_for_unknown_viewers_are_ignored() {
        let mut app = headless_app(ViewerSettings::default(), vec![test_config(0, "a.ply")]);
        app.update();
        let stray = app.world_mut().spawn_empty().id();
        app.world_mut().send_event(RenderRequest { viewer: stray });
        app.update();
        assert_eq!(viewer_counts(&mut app)[0].2, 0);
    }
}
