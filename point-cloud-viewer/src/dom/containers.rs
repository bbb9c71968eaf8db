use std::str::FromStr;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

use crate::dom::DomError;
use crate::engine::core::manifest::default_container_id;
use crate::engine::core::settings::{Launch, ResizePolicy, ViewerSettings, parse_flag};
use crate::engine::loading::model_url::PageLocation;
use crate::engine::viewer::{ContainerRef, ViewerConfig};

const CONTAINER_SELECTOR: &str = "[data-model-path]";

pub fn document() -> Result<Document, DomError> {
    web_sys::window()
        .ok_or(DomError::NoWindow)?
        .document()
        .ok_or(DomError::NoDocument)
}

/// Read page settings from `<body>` and prepare every container on the page.
/// Containers that cannot host a viewer are skipped with a console warning.
pub fn discover_launch() -> Result<Launch, DomError> {
    let document = document()?;
    let settings = read_page_settings(&document)?;
    let page = page_location(&document)?;

    let nodes = document
        .query_selector_all(CONTAINER_SELECTOR)
        .map_err(DomError::js("container query"))?;

    let mut configs = Vec::new();
    for position in 0..nodes.length() {
        let Some(element) = nodes
            .item(position)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };

        match prepare_container(&document, &page, &element, position as usize, configs.len()) {
            Ok(config) => configs.push(config),
            Err(err) => web_sys::console::warn_1(
                &format!("point-cloud-viewer: skipping container {position}: {err}").into(),
            ),
        }
    }

    Ok(Launch { settings, configs })
}

/// `<body data-live-animation=".." data-resize-policy="..">`, both optional.
pub fn read_page_settings(document: &Document) -> Result<ViewerSettings, DomError> {
    let body = document.body().ok_or(DomError::NoBody)?;
    let dataset = body.dataset();
    let mut settings = ViewerSettings::default();

    if let Some(value) = dataset.get("liveAnimation") {
        settings.live_animation = parse_flag("data-live-animation", &value)?;
    }
    if let Some(value) = dataset.get("resizePolicy") {
        settings.resize_policy = ResizePolicy::from_str(&value)?;
    }

    Ok(settings)
}

pub fn page_location(document: &Document) -> Result<PageLocation, DomError> {
    let location = document.location().ok_or(DomError::NoDocument)?;
    Ok(PageLocation {
        origin: location.origin().map_err(DomError::js("location origin"))?,
        path: location.pathname().map_err(DomError::js("location pathname"))?,
    })
}

/// Validate one container and give it a canvas sized width by width.
fn prepare_container(
    document: &Document,
    page: &PageLocation,
    element: &HtmlElement,
    position: usize,
    index: usize,
) -> Result<ViewerConfig, DomError> {
    let url = element.dataset().get("modelPath").unwrap_or_default();
    // Empty URLs fall through to the config's own validation.
    let model_path = if url.trim().is_empty() {
        url
    } else {
        page.model_asset_path(&url)?
    };

    if element.id().is_empty() {
        element.set_id(&default_container_id(position));
    }
    let container = ContainerRef::new(element.id(), element.client_width() as f32);
    let config = ViewerConfig::new(index, model_path, container)?;

    element
        .style()
        .set_property("position", "relative")
        .map_err(DomError::js("container style"))?;

    if document.get_element_by_id(&config.canvas_id()).is_none() {
        let canvas = document
            .create_element("canvas")
            .map_err(DomError::js("canvas creation"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| DomError::Js {
                action: "canvas creation",
                message: "element is not a canvas".to_string(),
            })?;
        let width = config.container().width() as u32;
        canvas.set_id(&config.canvas_id());
        canvas.set_width(width);
        canvas.set_height(width);
        element
            .append_child(&canvas)
            .map_err(DomError::js("canvas insertion"))?;
    }

    Ok(config)
}

/// Current client width of a container, if it is still on the page.
pub fn container_width(document: &Document, id: &str) -> Option<f32> {
    document
        .get_element_by_id(id)
        .map(|element| element.client_width() as f32)
}
