//! Map widgets mounted into page elements, keyed by element id.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use runtime::{AcquireLibrary, LibraryLoader};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;
use widgets::{MapController, MapTarget, WidgetState, WidgetView};

use crate::dom::{self, DocumentStylesheets};
use crate::mapbox::{MapboxLibrary, MapboxSource};

type Loader = LibraryLoader<MapboxSource, DocumentStylesheets>;

const CANVAS_CLASS: &str = "map-canvas";

thread_local! {
    static LOADER: RefCell<Option<Loader>> = const { RefCell::new(None) };
    static MAPS: RefCell<HashMap<String, MapController<MapboxLibrary>>> = RefCell::new(HashMap::new());
}

/// The process-wide loader, created from the configuration current at first use.
fn loader() -> Loader {
    LOADER.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| {
                let maps = crate::config().maps;
                if !maps.has_access_token() {
                    warn!("no map access token configured; map tiles will not load");
                }
                LibraryLoader::new(MapboxSource::new(&maps.module_url), DocumentStylesheets, &maps)
            })
            .clone()
    })
}

/// Config changes after the first mount cannot reach the loader.
pub fn loader_started() -> bool {
    LOADER.with(|slot| slot.borrow().is_some())
}

fn render_view(frame: &HtmlElement, view: &WidgetView) {
    match view {
        WidgetView::Fallback(fallback) => match fallback.render() {
            Ok(html) => {
                frame.set_inner_html(&html);
                let _ = frame.set_attribute("data-map-state", "fallback");
            }
            Err(err) => warn!("fallback render failed: {err}"),
        },
        WidgetView::Live { loading } => {
            let state = if *loading { "loading" } else { "ready" };
            let _ = frame.set_attribute("data-map-state", state);
        }
    }
}

fn prepare_canvas(frame: &HtmlElement) -> Result<HtmlElement, JsValue> {
    let canvas = dom::document()?.create_element("div")?;
    canvas.set_class_name(CANVAS_CLASS);
    frame.set_inner_html("");
    frame.append_child(&canvas)?;
    canvas
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str("map canvas is not an HTML element"))
}

pub fn mount(element_id: &str, target: MapTarget) -> Result<(), JsValue> {
    unmount(element_id);
    let frame = dom::element_by_id(element_id)?;
    let library: Rc<dyn AcquireLibrary<MapboxLibrary>> = Rc::new(loader());
    let controller = MapController::new(target, library, crate::config().maps.style_url);

    let observed = frame.clone();
    controller.set_observer(Some(Rc::new(move |view: &WidgetView| {
        render_view(&observed, view)
    })));

    let container = if controller.target().is_resolved() {
        Some(prepare_canvas(&frame)?)
    } else {
        None
    };
    let task = controller.mount(container);
    render_view(&frame, &controller.view());

    debug!(element_id, "map widget mounted");
    MAPS.with(|maps| {
        maps.borrow_mut().insert(element_id.to_string(), controller)
    });
    if let Some(task) = task {
        spawn_local(task);
    }
    Ok(())
}

pub fn unmount(element_id: &str) -> bool {
    let removed = MAPS.with(|maps| maps.borrow_mut().remove(element_id));
    match removed {
        Some(controller) => {
            controller.unmount();
            debug!(element_id, "map widget unmounted");
            true
        }
        None => false,
    }
}

pub fn state(element_id: &str) -> WidgetState {
    MAPS.with(|maps| {
        maps.borrow()
            .get(element_id)
            .map(MapController::state)
            .unwrap_or(WidgetState::Unmounted)
    })
}
