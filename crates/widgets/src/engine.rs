//! The seam between widget controllers and a concrete map engine.

use foundation::{CameraPose, LngLat};
use layers::{Fog, MarkerStyle, StyleDocument};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    Construct(String),
    Runtime(String),
    Layer(String),
    Fog(String),
    Marker(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::Construct(msg) => write!(f, "map construction failed: {msg}"),
            MapError::Runtime(msg) => write!(f, "map runtime error: {msg}"),
            MapError::Layer(msg) => write!(f, "add layer failed: {msg}"),
            MapError::Fog(msg) => write!(f, "set fog failed: {msg}"),
            MapError::Marker(msg) => write!(f, "add marker failed: {msg}"),
        }
    }
}

impl std::error::Error for MapError {}

/// Construction options, serialized with the engine's option names.
/// The container is passed separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub style: String,
    pub center: [f64; 2],
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub antialias: bool,
    pub interactive: bool,
    pub attribution_control: bool,
}

impl MapOptions {
    /// A non-navigable map: no user interaction, no attribution control.
    pub fn decorative(style_url: &str, camera: CameraPose) -> Self {
        Self {
            style: style_url.to_string(),
            center: camera.center.to_array(),
            zoom: camera.zoom,
            pitch: camera.pitch_deg,
            bearing: camera.bearing_deg,
            antialias: true,
            interactive: false,
            attribution_control: false,
        }
    }
}

/// A loaded library able to construct maps.
pub trait MapLibrary: Clone + 'static {
    type Container: Clone + 'static;
    type Map: MapInstance + 'static;

    fn create_map(
        &self,
        container: &Self::Container,
        options: &MapOptions,
    ) -> Result<Self::Map, MapError>;
}

/// One live map bound to a container.
pub trait MapInstance {
    fn on_load(&self, handler: Box<dyn FnMut()>);

    fn on_error(&self, handler: Box<dyn FnMut(MapError)>);

    /// The current style, if the engine can report one.
    fn style(&self) -> Option<StyleDocument>;

    fn add_layer(&self, layer: &Value, before_id: Option<&str>) -> Result<(), MapError>;

    fn set_fog(&self, fog: &Fog) -> Result<(), MapError>;

    fn add_marker(&self, at: LngLat, style: &MarkerStyle) -> Result<(), MapError>;

    /// Destroy the map and release everything it holds.
    fn remove(&self);
}
