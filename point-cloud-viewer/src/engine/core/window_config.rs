use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use crate::engine::viewer::ViewerConfig;

/// Window bound to the canvas appended to the viewer's container.
/// The surface starts square: container width for both dimensions.
#[cfg(target_arch = "wasm32")]
pub fn create_viewer_window(config: &ViewerConfig) -> Window {
    let width = config.container().width();
    Window {
        canvas: Some(format!("#{}", config.canvas_id())),
        resolution: WindowResolution::new(width, width),
        fit_canvas_to_parent: false,
        // Wheel zoom must not scroll the page.
        prevent_default_event_handling: true,
        present_mode: PresentMode::AutoVsync,
        ..default()
    }
}

/// Natively every viewer gets its own OS window titled after its model.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_viewer_window(config: &ViewerConfig) -> Window {
    let width = config.container().width();
    Window {
        title: format!(
            "{} ({})",
            config.container().id(),
            config.model_path()
        ),
        resolution: WindowResolution::new(width, width),
        present_mode: PresentMode::AutoVsync,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::viewer::ContainerRef;

    #[test]
    fn window_starts_square() {
        let config =
            ViewerConfig::new(0, "models/a.ply", ContainerRef::new("container1", 300.0)).unwrap();
        let window = create_viewer_window(&config);
        assert_eq!(window.resolution.width(), 300.0);
        assert_eq!(window.resolution.height(), 300.0);
    }
}
