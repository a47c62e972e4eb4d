//! Process-wide, load-once holder for the external mapping library.
//!
//! The first `acquire` starts a single load-and-configure sequence; callers
//! arriving while it is in flight await the same pending operation. A failed
//! attempt resets the loader so a later caller can try again.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures_util::future::{self, FutureExt, LocalBoxFuture, Shared};
use tracing::{debug, warn};

use crate::config::MapConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    Fetch(String),
    Configure(String),
    Stylesheet(String),
    /// The loader was dropped before the fetch finished.
    Abandoned,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Fetch(msg) => write!(f, "map library fetch failed: {msg}"),
            LoadError::Configure(msg) => write!(f, "map library configuration failed: {msg}"),
            LoadError::Stylesheet(msg) => write!(f, "map stylesheet injection failed: {msg}"),
            LoadError::Abandoned => write!(f, "map library loader dropped mid-load"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Fetches and configures the library module.
pub trait LibrarySource: 'static {
    type Library: Clone + 'static;

    fn fetch(&self) -> LocalBoxFuture<'static, Result<Self::Library, LoadError>>;

    fn configure(&self, library: &Self::Library, access_token: &str) -> Result<(), LoadError>;
}

/// The document the library stylesheet is injected into.
pub trait StylesheetHost: 'static {
    fn has_element(&self, id: &str) -> bool;

    fn append_stylesheet(&self, id: &str, href: &str) -> Result<(), LoadError>;
}

/// What a widget needs from the loader.
pub trait AcquireLibrary<L> {
    fn acquire_library(&self) -> LocalBoxFuture<'static, Result<L, LoadError>>;
}

pub type PendingLoad<L> = Shared<LocalBoxFuture<'static, Result<L, LoadError>>>;

enum LoadState<L: Clone> {
    Unloaded,
    Loading(PendingLoad<L>),
    Loaded(L),
}

struct LoaderShared<S: LibrarySource, H: StylesheetHost> {
    source: S,
    host: H,
    access_token: String,
    stylesheet_id: String,
    stylesheet_href: String,
    state: RefCell<LoadState<S::Library>>,
    loads_started: Cell<u32>,
}

impl<S: LibrarySource, H: StylesheetHost> LoaderShared<S, H> {
    fn configure(&self, library: S::Library) -> Result<S::Library, LoadError> {
        self.source.configure(&library, &self.access_token)?;
        if self.host.has_element(&self.stylesheet_id) {
            debug!(id = %self.stylesheet_id, "map stylesheet already present");
        } else {
            self.host
                .append_stylesheet(&self.stylesheet_id, &self.stylesheet_href)?;
        }
        Ok(library)
    }

    fn settle(&self, outcome: &Result<S::Library, LoadError>) {
        let next = match outcome {
            Ok(library) => {
                debug!("map library loaded");
                LoadState::Loaded(library.clone())
            }
            Err(err) => {
                warn!("map library load failed: {err}");
                LoadState::Unloaded
            }
        };
        *self.state.borrow_mut() = next;
    }
}

/// Cheap to clone; clones share one load state.
pub struct LibraryLoader<S: LibrarySource, H: StylesheetHost> {
    shared: Rc<LoaderShared<S, H>>,
}

impl<S: LibrarySource, H: StylesheetHost> Clone for LibraryLoader<S, H> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<S: LibrarySource, H: StylesheetHost> LibraryLoader<S, H> {
    pub fn new(source: S, host: H, config: &MapConfig) -> Self {
        Self {
            shared: Rc::new(LoaderShared {
                source,
                host,
                access_token: config.access_token.clone(),
                stylesheet_id: config.stylesheet_id.clone(),
                stylesheet_href: config.stylesheet_href.clone(),
                state: RefCell::new(LoadState::Unloaded),
                loads_started: Cell::new(0),
            }),
        }
    }

    /// Resolve to the shared library handle, loading it on first use.
    /// The attempt is joined at call time: callers made while a load is in
    /// flight all observe that attempt's outcome.
    pub fn acquire(&self) -> LocalBoxFuture<'static, Result<S::Library, LoadError>> {
        let mut state = self.shared.state.borrow_mut();
        let pending = match &*state {
            LoadState::Loaded(library) => {
                return future::ready(Ok(library.clone())).boxed_local();
            }
            LoadState::Loading(pending) => pending.clone(),
            LoadState::Unloaded => {
                let pending = start_load(&self.shared);
                *state = LoadState::Loading(pending.clone());
                pending
            }
        };
        pending.boxed_local()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(*self.shared.state.borrow(), LoadState::Loaded(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.shared.state.borrow(), LoadState::Loading(_))
    }

    /// Number of load-and-configure sequences begun so far.
    pub fn loads_started(&self) -> u32 {
        self.shared.loads_started.get()
    }
}

impl<S: LibrarySource, H: StylesheetHost> AcquireLibrary<S::Library> for LibraryLoader<S, H> {
    fn acquire_library(&self) -> LocalBoxFuture<'static, Result<S::Library, LoadError>> {
        self.acquire()
    }
}

fn start_load<S: LibrarySource, H: StylesheetHost>(
    shared: &Rc<LoaderShared<S, H>>,
) -> PendingLoad<S::Library> {
    let attempt = shared.loads_started.get() + 1;
    shared.loads_started.set(attempt);
    debug!(attempt, "loading map library");

    // A pending load must not keep the loader alive.
    let fetch = shared.source.fetch();
    let weak = Rc::downgrade(shared);
    async move {
        let outcome = match fetch.await {
            Ok(library) => match weak.upgrade() {
                Some(shared) => shared.configure(library),
                None => Err(LoadError::Abandoned),
            },
            Err(err) => Err(err),
        };
        if let Some(shared) = weak.upgrade() {
            shared.settle(&outcome);
        }
        outcome
    }
    .boxed_local()
    .shared()
}
