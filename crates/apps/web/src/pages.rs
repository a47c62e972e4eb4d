//! Content pages and navigation chrome bound to DOM elements.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use askama::Template;
use content::views::ArchiveFooterTemplate;
use content::views::HeaderTemplate;
use content::{
    ContentError, ContentSource, HeaderState, JourneyFilter, JourneysPage, PlacePage, Site,
};
use futures_util::future::{FutureExt, LocalBoxFuture};
use gloo_net::http::Request;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, EventTarget, HtmlElement};

use crate::dom;

/// `fetch` via gloo-net. Error statuses still carry a JSON body, so only
/// transport failures are errors here.
pub struct GlooFetch;

impl ContentSource for GlooFetch {
    fn get_text(&self, url: &str) -> LocalBoxFuture<'static, Result<String, ContentError>> {
        let url = url.to_string();
        async move {
            let resp = Request::get(&url)
                .send()
                .await
                .map_err(|e| ContentError::Http(e.to_string()))?;
            if !resp.ok() {
                debug!(status = resp.status(), url = %url, "non-success response");
            }
            resp.text()
                .await
                .map_err(|e| ContentError::Http(e.to_string()))
        }
        .boxed_local()
    }
}

/// A DOM listener removed again when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new(
        target: EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target,
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

fn render_into(root: &HtmlElement, rendered: Result<String, askama::Error>) {
    match rendered {
        Ok(html) => root.set_inner_html(&html),
        Err(err) => warn!("page render failed: {err}"),
    }
}

struct MountedJourneys {
    page: JourneysPage,
    root: HtmlElement,
    _clicks: Listener,
}

struct MountedHeader {
    site: Site,
    state: HeaderState,
    root: HtmlElement,
    _listeners: Vec<Listener>,
}

thread_local! {
    static JOURNEYS: RefCell<HashMap<String, MountedJourneys>> = RefCell::new(HashMap::new());
    static HEADERS: RefCell<HashMap<String, MountedHeader>> = RefCell::new(HashMap::new());
    static PLACE_GENERATION: Cell<u64> = const { Cell::new(0) };
}

pub fn mount_journeys(element_id: &str) -> Result<(), JsValue> {
    let root = dom::element_by_id(element_id)?;
    let config = crate::config();
    let page = JourneysPage::new(config.currency);
    render_into(&root, page.render());

    let id = element_id.to_string();
    let clicks = Listener::new(root.clone().into(), "click", move |event: Event| {
        let Some(button) = dom::closest_with(event.target(), "data-filter") else {
            return;
        };
        let filter = button.get_attribute("data-filter").unwrap_or_default();
        if let Err(err) = set_journey_filter(&id, &filter) {
            warn!("{}", crate::mapbox::describe(&err));
        }
    })?;

    let previous = JOURNEYS.with(|pages| {
        pages.borrow_mut().insert(
            element_id.to_string(),
            MountedJourneys {
                page,
                root,
                _clicks: clicks,
            },
        )
    });
    drop(previous);

    let id = element_id.to_string();
    spawn_local(async move {
        let result = content::load_journeys(&GlooFetch, &config.api).await;
        JOURNEYS.with(|pages| {
            if let Some(mounted) = pages.borrow_mut().get_mut(&id) {
                mounted.page.finish(result);
                render_into(&mounted.root, mounted.page.render());
            }
        });
    });
    Ok(())
}

pub fn set_journey_filter(element_id: &str, filter_id: &str) -> Result<(), JsValue> {
    let filter = JourneyFilter::from_id(filter_id)
        .ok_or_else(|| JsValue::from_str(&format!("unknown journey filter: {filter_id}")))?;
    JOURNEYS.with(|pages| {
        let mut pages = pages.borrow_mut();
        let mounted = pages
            .get_mut(element_id)
            .ok_or_else(|| JsValue::from_str(&format!("no journeys page in #{element_id}")))?;
        mounted.page.set_filter(filter);
        render_into(&mounted.root, mounted.page.render());
        Ok(())
    })
}

/// The most recent mount wins; earlier requests still in flight are discarded.
pub fn mount_place(element_id: &str, slug: &str) -> Result<(), JsValue> {
    let root = dom::element_by_id(element_id)?;
    render_into(&root, PlacePage::Loading.render());

    let generation = PLACE_GENERATION.with(|g| {
        g.set(g.get() + 1);
        g.get()
    });
    let api = crate::config().api;
    let slug = slug.to_string();
    spawn_local(async move {
        let fetched = content::load_place(&GlooFetch, &api, &slug).await;
        if PLACE_GENERATION.with(Cell::get) != generation {
            debug!(slug = %slug, "discarding superseded place response");
            return;
        }
        render_into(&root, PlacePage::from_fetch(fetched).render());
    });
    Ok(())
}

fn render_header(mounted: &MountedHeader) {
    render_into(
        &mounted.root,
        HeaderTemplate::new(mounted.site, mounted.state).render(),
    );
}

fn with_header(element_id: &str, update: impl FnOnce(&mut HeaderState) -> bool) {
    HEADERS.with(|headers| {
        if let Some(mounted) = headers.borrow_mut().get_mut(element_id) {
            if update(&mut mounted.state) {
                render_header(mounted);
            }
        }
    });
}

pub fn mount_header(element_id: &str, site: Site) -> Result<(), JsValue> {
    let root = dom::element_by_id(element_id)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let mut state = HeaderState::default();
    state.on_scroll(window.scroll_y().unwrap_or(0.0));

    let id = element_id.to_string();
    let clicks = Listener::new(root.clone().into(), "click", move |event: Event| {
        let target = event.target();
        if dom::closest_with(target.clone(), "data-menu-toggle").is_some() {
            with_header(&id, |state| {
                state.toggle_menu();
                true
            });
        } else if dom::closest_with(target, "data-menu-link").is_some() {
            with_header(&id, |state| {
                let was_open = state.is_menu_open();
                state.on_link_click();
                was_open
            });
        }
    })?;

    let id = element_id.to_string();
    let scroll_window = window.clone();
    let scrolls = Listener::new(window.into(), "scroll", move |_event: Event| {
        let y = scroll_window.scroll_y().unwrap_or(0.0);
        with_header(&id, |state| state.on_scroll(y));
    })?;

    let mounted = MountedHeader {
        site,
        state,
        root,
        _listeners: vec![clicks, scrolls],
    };
    render_header(&mounted);
    let previous = HEADERS.with(|headers| {
        headers
            .borrow_mut()
            .insert(element_id.to_string(), mounted)
    });
    drop(previous);
    Ok(())
}

pub fn mount_archive_footer(element_id: &str) -> Result<(), JsValue> {
    let root = dom::element_by_id(element_id)?;
    render_into(&root, ArchiveFooterTemplate::default().render());
    Ok(())
}
