use std::cell::{Cell, RefCell};

use content::{ApiConfig, Currency, Site};
use runtime::{ConfigError, MapConfig};
use serde::Deserialize;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use widgets::{MapTarget, WidgetState};

mod dom;
mod logging;
mod mapbox;
mod maps;
mod pages;

/// Everything the host page can set through `configure`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub maps: MapConfig,
    pub api: ApiConfig,
    pub currency: Currency,
    /// `EnvFilter` directives, e.g. `"info,widgets=debug"`.
    pub log_filter: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            maps: MapConfig::default(),
            api: ApiConfig::default(),
            currency: Currency::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl WebConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

thread_local! {
    static CONFIG: RefCell<WebConfig> = RefCell::new(WebConfig::default());
    static LOGGING: Cell<bool> = const { Cell::new(false) };
}

pub(crate) fn config() -> WebConfig {
    CONFIG.with(|c| c.borrow().clone())
}

fn ensure_logging() {
    if !LOGGING.with(|flag| flag.replace(true)) {
        logging::init(&config().log_filter);
    }
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_site(site: &str) -> Result<Site, JsValue> {
    serde_json::from_value(serde_json::Value::from(site))
        .map_err(|_| JsValue::from_str(&format!("unknown site: {site}")))
}

fn state_name(state: WidgetState) -> &'static str {
    match state {
        WidgetState::Unmounted => "unmounted",
        WidgetState::Loading => "loading",
        WidgetState::Ready => "ready",
        WidgetState::Errored => "errored",
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Apply a (partial) JSON configuration. Call before mounting anything;
/// map settings are fixed once the library starts loading.
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let parsed = WebConfig::from_json_str(json).map_err(js_err)?;
    let maps_changed = parsed.maps != config().maps;
    CONFIG.with(|c| *c.borrow_mut() = parsed);
    ensure_logging();
    if maps_changed && maps::loader_started() {
        warn!("map settings changed after the library started loading; ignoring");
    }
    info!("configured");
    Ok(())
}

#[wasm_bindgen]
pub fn mount_city_map(element_id: &str, place: &str) -> Result<(), JsValue> {
    ensure_logging();
    maps::mount(element_id, MapTarget::city(place))
}

#[wasm_bindgen]
pub fn mount_overview_map(element_id: &str) -> Result<(), JsValue> {
    ensure_logging();
    maps::mount(element_id, MapTarget::overview())
}

/// Returns false when nothing was mounted there.
#[wasm_bindgen]
pub fn unmount_map(element_id: &str) -> bool {
    maps::unmount(element_id)
}

#[wasm_bindgen]
pub fn map_state(element_id: &str) -> String {
    state_name(maps::state(element_id)).to_string()
}

#[wasm_bindgen]
pub fn mount_journeys_page(element_id: &str) -> Result<(), JsValue> {
    ensure_logging();
    pages::mount_journeys(element_id)
}

#[wasm_bindgen]
pub fn set_journey_filter(element_id: &str, filter: &str) -> Result<(), JsValue> {
    pages::set_journey_filter(element_id, filter)
}

#[wasm_bindgen]
pub fn mount_place_page(element_id: &str, slug: &str) -> Result<(), JsValue> {
    ensure_logging();
    pages::mount_place(element_id, slug)
}

/// `site` is `"travel"` or `"art-archive"`.
#[wasm_bindgen]
pub fn mount_header(element_id: &str, site: &str) -> Result<(), JsValue> {
    ensure_logging();
    pages::mount_header(element_id, parse_site(site)?)
}

#[wasm_bindgen]
pub fn mount_archive_footer(element_id: &str) -> Result<(), JsValue> {
    pages::mount_archive_footer(element_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = WebConfig::from_json_str(
            r#"{"maps":{"access_token":"pk.abc"},"api":{"base_url":"https://slowmorocco.com"},"currency":"GBP"}"#,
        )
        .unwrap();
        assert_eq!(config.maps.access_token, "pk.abc");
        assert_eq!(config.maps.stylesheet_id, "mapbox-gl-css");
        assert_eq!(config.api.journeys_url(), "https://slowmorocco.com/api/journeys");
        assert_eq!(config.currency, Currency::Gbp);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn rejects_malformed_config() {
        assert!(matches!(
            WebConfig::from_json_str("{maps:"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn widget_states_have_stable_names() {
        assert_eq!(state_name(WidgetState::Errored), "errored");
        assert_eq!(state_name(WidgetState::Unmounted), "unmounted");
    }
}
