//! Per-widget map lifecycle.
//!
//! A controller owns at most one map instance. `mount` hands back the
//! asynchronous part of the sequence for the caller to spawn; `unmount` is
//! valid at any point and invalidates whatever that task resolves to later.
//! Layer, fog and marker mutations only ever run from the engine's load event.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use futures_util::future::{FutureExt, LocalBoxFuture};
use layers::{BuildingExtrusion, Fog, LayerPlacement, MarkerStyle};
use runtime::{AcquireLibrary, LoadError};
use tracing::{debug, warn};

use crate::engine::{MapError, MapInstance, MapLibrary, MapOptions};
use crate::fallback::Fallback;
use crate::target::MapTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Unmounted,
    Loading,
    Ready,
    Errored,
}

impl WidgetState {
    fn can_enter(self, next: WidgetState) -> bool {
        matches!(
            (self, next),
            (WidgetState::Loading, WidgetState::Ready)
                | (WidgetState::Loading, WidgetState::Errored)
                | (WidgetState::Ready, WidgetState::Errored)
        )
    }
}

/// What the owning view should draw.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetView {
    Fallback(Fallback),
    Live { loading: bool },
}

pub type ViewObserver = Rc<dyn Fn(&WidgetView)>;

struct Inner<L: MapLibrary> {
    target: MapTarget,
    state: WidgetState,
    container: Option<L::Container>,
    map: Option<Rc<L::Map>>,
    /// Bumped on every mount and unmount; async work carries the value it
    /// started with and gives up when it no longer matches.
    session: u64,
    loaded: bool,
    markers_placed: usize,
    observer: Option<ViewObserver>,
}

impl<L: MapLibrary> Inner<L> {
    fn view(&self) -> WidgetView {
        if !self.target.is_resolved() || self.state == WidgetState::Errored {
            WidgetView::Fallback(self.target.fallback())
        } else {
            WidgetView::Live {
                loading: self.state != WidgetState::Ready,
            }
        }
    }

    fn is_current(&self, session: u64) -> bool {
        self.session == session && self.state != WidgetState::Unmounted
    }
}

pub struct MapController<L: MapLibrary> {
    inner: Rc<RefCell<Inner<L>>>,
    library: Rc<dyn AcquireLibrary<L>>,
    style_url: String,
}

impl<L: MapLibrary> MapController<L> {
    pub fn new(
        target: MapTarget,
        library: Rc<dyn AcquireLibrary<L>>,
        style_url: impl Into<String>,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                target,
                state: WidgetState::Unmounted,
                container: None,
                map: None,
                session: 0,
                loaded: false,
                markers_placed: 0,
                observer: None,
            })),
            library,
            style_url: style_url.into(),
        }
    }

    pub fn city(
        place: &str,
        library: Rc<dyn AcquireLibrary<L>>,
        style_url: impl Into<String>,
    ) -> Self {
        Self::new(MapTarget::city(place), library, style_url)
    }

    pub fn overview(library: Rc<dyn AcquireLibrary<L>>, style_url: impl Into<String>) -> Self {
        Self::new(MapTarget::overview(), library, style_url)
    }

    /// Called after asynchronous state changes (load, error).
    pub fn set_observer(&self, observer: Option<ViewObserver>) {
        self.inner.borrow_mut().observer = observer;
    }

    pub fn state(&self) -> WidgetState {
        self.inner.borrow().state
    }

    pub fn view(&self) -> WidgetView {
        self.inner.borrow().view()
    }

    pub fn target(&self) -> MapTarget {
        self.inner.borrow().target.clone()
    }

    pub fn has_map(&self) -> bool {
        self.inner.borrow().map.is_some()
    }

    pub fn markers_placed(&self) -> usize {
        self.inner.borrow().markers_placed
    }

    /// Start the mount sequence.
    ///
    /// Returns `None` without side effects when already mounted, when there
    /// is no container yet, or when the target has no coordinates.
    pub fn mount(&self, container: Option<L::Container>) -> Option<LocalBoxFuture<'static, ()>> {
        let mut inner = self.inner.borrow_mut();
        if inner.map.is_some() || inner.state != WidgetState::Unmounted {
            debug!("mount ignored: widget already mounted");
            return None;
        }
        let container = container?;
        let Some(camera) = inner.target.camera() else {
            debug!(target = ?inner.target, "no coordinates; rendering fallback");
            return None;
        };

        inner.session += 1;
        inner.state = WidgetState::Loading;
        inner.container = Some(container);
        inner.loaded = false;
        let session = inner.session;
        drop(inner);

        let options = MapOptions::decorative(&self.style_url, camera);
        let acquire = self.library.acquire_library();
        let weak = Rc::downgrade(&self.inner);
        Some(
            async move {
                let library = acquire.await;
                let Some(cell) = weak.upgrade() else {
                    return;
                };
                attach(&cell, session, library, &options);
            }
            .boxed_local(),
        )
    }

    /// Destroy the map (if any) and return to `Unmounted`.
    pub fn unmount(&self) {
        let map = {
            let mut inner = self.inner.borrow_mut();
            inner.session += 1;
            inner.state = WidgetState::Unmounted;
            inner.container = None;
            inner.loaded = false;
            inner.markers_placed = 0;
            inner.map.take()
        };
        if let Some(map) = map {
            debug!("removing map instance");
            map.remove();
        }
    }
}

impl<L: MapLibrary> Drop for MapController<L> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn attach<L: MapLibrary>(
    cell: &Rc<RefCell<Inner<L>>>,
    session: u64,
    library: Result<L, LoadError>,
    options: &MapOptions,
) {
    let container = {
        let inner = cell.borrow();
        if !inner.is_current(session) {
            debug!("stale mount resolved after unmount; ignoring");
            return;
        }
        match &inner.container {
            Some(container) => container.clone(),
            None => return,
        }
    };

    let library = match library {
        Ok(library) => library,
        Err(err) => {
            warn!("map widget unavailable: {err}");
            transition(cell, session, WidgetState::Errored);
            return;
        }
    };

    let map = match library.create_map(&container, options) {
        Ok(map) => Rc::new(map),
        Err(err) => {
            warn!("map widget unavailable: {err}");
            transition(cell, session, WidgetState::Errored);
            return;
        }
    };
    cell.borrow_mut().map = Some(Rc::clone(&map));

    let weak = Rc::downgrade(cell);
    map.on_error(Box::new({
        let weak = Weak::clone(&weak);
        move |err: MapError| {
            if let Some(cell) = weak.upgrade() {
                warn!("{err}");
                transition(&cell, session, WidgetState::Errored);
            }
        }
    }));
    map.on_load(Box::new(move || {
        if let Some(cell) = weak.upgrade() {
            finish_load(&cell, session);
        }
    }));
}

fn finish_load<L: MapLibrary>(cell: &Rc<RefCell<Inner<L>>>, session: u64) {
    let (map, target) = {
        let mut inner = cell.borrow_mut();
        if inner.session != session || inner.state != WidgetState::Loading || inner.loaded {
            return;
        }
        let Some(map) = inner.map.clone() else {
            return;
        };
        inner.loaded = true;
        (map, inner.target.clone())
    };

    // No borrow is held here: the engine may emit events synchronously.
    let placed = decorate(map.as_ref(), &target);

    {
        let mut inner = cell.borrow_mut();
        if inner.session == session {
            inner.markers_placed = placed;
        }
    }
    transition(cell, session, WidgetState::Ready);
}

/// Add derived layers, fog and markers. Returns the number of markers placed.
///
/// A style without a label layer still gets the extrusion, appended on top
/// instead of being skipped.
fn decorate<M: MapInstance + ?Sized>(map: &M, target: &MapTarget) -> usize {
    match target {
        MapTarget::City {
            coords: Some(coords),
            ..
        } => {
            let placement = LayerPlacement::below_labels(map.style().as_ref());
            let buildings = BuildingExtrusion::default().to_layer_json();
            if let Err(err) = map.add_layer(&buildings, placement.before_id()) {
                warn!("{err}");
            }
            if let Err(err) = map.set_fog(&Fog::city()) {
                warn!("{err}");
            }
            place_markers(map, [coords.position], &MarkerStyle::city())
        }
        MapTarget::City { coords: None, .. } => 0,
        MapTarget::Overview(_) => {
            if let Err(err) = map.set_fog(&Fog::overview()) {
                warn!("{err}");
            }
            let positions = catalog::distinct_locations().map(|city| city.coords().position);
            place_markers(map, positions, &MarkerStyle::overview())
        }
    }
}

fn place_markers<M: MapInstance + ?Sized>(
    map: &M,
    positions: impl IntoIterator<Item = foundation::LngLat>,
    style: &MarkerStyle,
) -> usize {
    let mut placed = 0;
    for position in positions {
        match map.add_marker(position, style) {
            Ok(()) => placed += 1,
            Err(err) => warn!("{err}"),
        }
    }
    placed
}

fn transition<L: MapLibrary>(cell: &Rc<RefCell<Inner<L>>>, session: u64, next: WidgetState) {
    let notify = {
        let mut inner = cell.borrow_mut();
        if inner.session != session || !inner.state.can_enter(next) {
            return;
        }
        debug!(from = ?inner.state, to = ?next, "map widget state");
        inner.state = next;
        inner.observer.clone().map(|observer| (observer, inner.view()))
    };
    if let Some((observer, view)) = notify {
        observer(&view);
    }
}
