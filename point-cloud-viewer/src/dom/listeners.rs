use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::dom::DomError;
use crate::dom::containers::{container_width, document};
use crate::engine::systems::resize::ViewportResized;
use crate::engine::viewer::Viewer;
use crate::engine::viewer::scoped::ViewerScoped;

/// `resize` listener on the browser window, removed again when dropped.
pub struct ScopedResizeListener {
    window: web_sys::Window,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl ScopedResizeListener {
    pub fn listen(
        window: &web_sys::Window,
        mut on_resize: impl FnMut() + 'static,
    ) -> Result<Self, DomError> {
        let closure = Closure::wrap(
            Box::new(move |_event: web_sys::Event| on_resize()) as Box<dyn FnMut(web_sys::Event)>
        );
        window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(DomError::js("resize listener"))?;

        Ok(Self {
            window: window.clone(),
            closure,
        })
    }
}

impl Drop for ScopedResizeListener {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.closure.as_ref().unchecked_ref());
    }
}

/// Resizes observed by DOM callbacks, waiting for the next frame.
#[derive(Resource, Default, Clone)]
pub struct ResizeQueue(Arc<Mutex<Vec<ViewportResized>>>);

/// Each viewer measures its own container when the browser window resizes.
impl ViewerScoped for ScopedResizeListener {
    type Context = ResizeQueue;
    type Error = DomError;

    fn attach(entity: Entity, viewer: &Viewer, queue: &ResizeQueue) -> Result<Self, DomError> {
        let window = web_sys::window().ok_or(DomError::NoWindow)?;
        let container_id = viewer.config().container().id().to_string();
        let fallback_width = viewer.config().container().width();
        let queue = queue.clone();
        let browser = window.clone();

        ScopedResizeListener::listen(&window, move || {
            let container_width = document()
                .ok()
                .and_then(|document| container_width(&document, &container_id))
                .unwrap_or(fallback_width);
            let window_size = Vec2::new(
                browser.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0) as f32,
                browser.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0) as f32,
            );

            if let Ok(mut pending) = queue.0.lock() {
                pending.push(ViewportResized {
                    viewer: entity,
                    container_width,
                    window_size,
                });
            }
        })
    }
}

pub fn drain_resize_queue(queue: Res<ResizeQueue>, mut resized: EventWriter<ViewportResized>) {
    let pending = match queue.0.lock() {
        Ok(mut pending) => std::mem::take(&mut *pending),
        Err(_) => Vec::new(),
    };
    for event in pending {
        resized.write(event);
    }
}
