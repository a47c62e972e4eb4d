//! In-memory map engine that records every call.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use foundation::LngLat;
use futures_util::future::{FutureExt, LocalBoxFuture};
use layers::{Fog, MarkerStyle, StyleDocument};
use runtime::{AcquireLibrary, LibrarySource, LoadError, StylesheetHost};
use serde_json::Value;
use tokio::sync::oneshot;

use crate::engine::{MapError, MapInstance, MapLibrary, MapOptions};

#[derive(Default)]
pub struct Recorder {
    pub maps: RefCell<Vec<Rc<FakeMapState>>>,
}

impl Recorder {
    pub fn map(&self, idx: usize) -> Rc<FakeMapState> {
        Rc::clone(&self.maps.borrow()[idx])
    }

    pub fn map_count(&self) -> usize {
        self.maps.borrow().len()
    }
}

#[derive(Clone)]
pub struct FakeLibrary {
    pub recorder: Rc<Recorder>,
    pub style: Option<StyleDocument>,
    pub fail_construct: bool,
}

impl FakeLibrary {
    pub fn with_style(style_json: &str) -> Self {
        Self {
            recorder: Rc::new(Recorder::default()),
            style: Some(StyleDocument::from_json_str(style_json).unwrap()),
            fail_construct: false,
        }
    }
}

impl MapLibrary for FakeLibrary {
    type Container = String;
    type Map = FakeMap;

    fn create_map(&self, container: &String, options: &MapOptions) -> Result<FakeMap, MapError> {
        if self.fail_construct {
            return Err(MapError::Construct("webgl unavailable".to_string()));
        }
        let state = Rc::new(FakeMapState {
            container: container.clone(),
            options: options.clone(),
            style: self.style.clone(),
            load: RefCell::default(),
            error: RefCell::default(),
            layers: RefCell::default(),
            fogs: RefCell::default(),
            markers: RefCell::default(),
            removed: Cell::new(false),
        });
        self.recorder.maps.borrow_mut().push(Rc::clone(&state));
        Ok(FakeMap(state))
    }
}

pub struct FakeMapState {
    pub container: String,
    pub options: MapOptions,
    style: Option<StyleDocument>,
    load: RefCell<Vec<Box<dyn FnMut()>>>,
    error: RefCell<Vec<Box<dyn FnMut(MapError)>>>,
    pub layers: RefCell<Vec<(Value, Option<String>)>>,
    pub fogs: RefCell<Vec<Fog>>,
    pub markers: RefCell<Vec<LngLat>>,
    pub removed: Cell<bool>,
}

impl FakeMapState {
    pub fn emit_load(&self) {
        let mut handlers = std::mem::take(&mut *self.load.borrow_mut());
        for handler in handlers.iter_mut() {
            handler();
        }
        self.load.borrow_mut().extend(handlers);
    }

    pub fn emit_error(&self, msg: &str) {
        let mut handlers = std::mem::take(&mut *self.error.borrow_mut());
        for handler in handlers.iter_mut() {
            handler(MapError::Runtime(msg.to_string()));
        }
        self.error.borrow_mut().extend(handlers);
    }

    pub fn mutations(&self) -> usize {
        self.layers.borrow().len() + self.fogs.borrow().len() + self.markers.borrow().len()
    }
}

pub struct FakeMap(pub Rc<FakeMapState>);

impl MapInstance for FakeMap {
    fn on_load(&self, handler: Box<dyn FnMut()>) {
        self.0.load.borrow_mut().push(handler);
    }

    fn on_error(&self, handler: Box<dyn FnMut(MapError)>) {
        self.0.error.borrow_mut().push(handler);
    }

    fn style(&self) -> Option<StyleDocument> {
        self.0.style.clone()
    }

    fn add_layer(&self, layer: &Value, before_id: Option<&str>) -> Result<(), MapError> {
        self.0
            .layers
            .borrow_mut()
            .push((layer.clone(), before_id.map(str::to_string)));
        Ok(())
    }

    fn set_fog(&self, fog: &Fog) -> Result<(), MapError> {
        self.0.fogs.borrow_mut().push(fog.clone());
        Ok(())
    }

    fn add_marker(&self, at: LngLat, _style: &MarkerStyle) -> Result<(), MapError> {
        self.0.markers.borrow_mut().push(at);
        Ok(())
    }

    fn remove(&self) {
        self.0.removed.set(true);
    }
}

/// Acquisition that resolves immediately, fails, or waits on a gate.
pub struct FakeAcquire {
    pub library: FakeLibrary,
    pub calls: Cell<u32>,
    outcomes: RefCell<VecDeque<Result<(), LoadError>>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl FakeAcquire {
    pub fn new(library: FakeLibrary) -> Self {
        Self {
            library,
            calls: Cell::new(0),
            outcomes: RefCell::default(),
            gate: RefCell::default(),
        }
    }

    pub fn failing_once(self, err: LoadError) -> Self {
        self.outcomes.borrow_mut().push_back(Err(err));
        self
    }

    /// The next acquisition waits until the returned sender fires.
    pub fn gated(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }
}

impl AcquireLibrary<FakeLibrary> for FakeAcquire {
    fn acquire_library(&self) -> LocalBoxFuture<'static, Result<FakeLibrary, LoadError>> {
        self.calls.set(self.calls.get() + 1);
        let outcome = self.outcomes.borrow_mut().pop_front().unwrap_or(Ok(()));
        let gate = self.gate.borrow_mut().take();
        let library = self.library.clone();
        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            outcome.map(|_| library)
        }
        .boxed_local()
    }
}

/// Library source for driving controllers through the real loader.
pub struct FakeSource {
    pub library: FakeLibrary,
    pub fetches: Rc<Cell<u32>>,
}

impl LibrarySource for FakeSource {
    type Library = FakeLibrary;

    fn fetch(&self) -> LocalBoxFuture<'static, Result<FakeLibrary, LoadError>> {
        self.fetches.set(self.fetches.get() + 1);
        let library = self.library.clone();
        async move {
            tokio::task::yield_now().await;
            Ok(library)
        }
        .boxed_local()
    }

    fn configure(&self, _library: &FakeLibrary, _access_token: &str) -> Result<(), LoadError> {
        Ok(())
    }
}

pub struct NoDocument;

impl StylesheetHost for NoDocument {
    fn has_element(&self, _id: &str) -> bool {
        true
    }

    fn append_stylesheet(&self, _id: &str, _href: &str) -> Result<(), LoadError> {
        Ok(())
    }
}
