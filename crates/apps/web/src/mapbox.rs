//! Bindings to the mapping library, loaded as an ES module at runtime.

use std::cell::RefCell;

use foundation::LngLat;
use futures_util::future::{FutureExt, LocalBoxFuture};
use js_sys::{Array, Function, Object, Reflect};
use layers::{Fog, MarkerStyle, StyleDocument};
use runtime::{LibrarySource, LoadError};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlElement;
use widgets::{MapError, MapInstance, MapLibrary, MapOptions};

#[wasm_bindgen(inline_js = "
export function maps_import_module(url) {
    return import(url);
}

export function maps_default_export(module) {
    return module && module.default ? module.default : module;
}
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn maps_import_module(url: &str) -> Result<js_sys::Promise, JsValue>;

    fn maps_default_export(module: &JsValue) -> JsValue;
}

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    pub type GlMap;

    #[wasm_bindgen(method, catch)]
    fn on(this: &GlMap, event: &str, handler: &Function) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getStyle)]
    fn get_style(this: &GlMap) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addLayer)]
    fn add_layer(this: &GlMap, layer: &JsValue, before_id: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setFog)]
    fn set_fog(this: &GlMap, fog: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = remove)]
    fn remove_map(this: &GlMap);

    pub type GlMarker;

    #[wasm_bindgen(method, catch, js_name = setLngLat)]
    fn set_lng_lat(this: &GlMarker, lng_lat: &JsValue) -> Result<GlMarker, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addTo)]
    fn add_to(this: &GlMarker, map: &GlMap) -> Result<GlMarker, JsValue>;

    #[wasm_bindgen(method, js_name = remove)]
    fn remove_marker(this: &GlMarker);
}

pub fn describe(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    // Engine error events wrap the cause in `.error`.
    let inner = Reflect::get(err, &JsValue::from_str("error")).unwrap_or(JsValue::UNDEFINED);
    let source = if inner.is_undefined() { err } else { &inner };
    Reflect::get(source, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{source:?}"))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, String> {
    let json = serde_json::to_string(value).map_err(|e| e.to_string())?;
    js_sys::JSON::parse(&json).map_err(|e| describe(&e))
}

fn constructor(module: &JsValue, name: &str) -> Result<Function, String> {
    Reflect::get(module, &JsValue::from_str(name))
        .map_err(|e| describe(&e))?
        .dyn_into::<Function>()
        .map_err(|_| format!("library has no {name} constructor"))
}

/// The library's default export.
#[derive(Clone)]
pub struct MapboxLibrary {
    module: JsValue,
}

impl MapLibrary for MapboxLibrary {
    type Container = HtmlElement;
    type Map = WebMap;

    fn create_map(&self, container: &HtmlElement, options: &MapOptions) -> Result<WebMap, MapError> {
        let construct = || -> Result<GlMap, String> {
            let ctor = constructor(&self.module, "Map")?;
            let opts = to_js(options)?;
            Reflect::set(&opts, &JsValue::from_str("container"), container)
                .map_err(|e| describe(&e))?;
            let map = Reflect::construct(&ctor, &Array::of1(&opts)).map_err(|e| describe(&e))?;
            Ok(map.unchecked_into::<GlMap>())
        };
        let map = construct().map_err(MapError::Construct)?;
        Ok(WebMap {
            map,
            library: self.clone(),
            markers: RefCell::default(),
            handlers: RefCell::default(),
        })
    }
}

/// Fetches the library module by dynamic import.
pub struct MapboxSource {
    module_url: String,
}

impl MapboxSource {
    pub fn new(module_url: impl Into<String>) -> Self {
        Self {
            module_url: module_url.into(),
        }
    }
}

impl LibrarySource for MapboxSource {
    type Library = MapboxLibrary;

    fn fetch(&self) -> LocalBoxFuture<'static, Result<MapboxLibrary, LoadError>> {
        let url = self.module_url.clone();
        async move {
            let promise = maps_import_module(&url).map_err(|e| LoadError::Fetch(describe(&e)))?;
            let module = JsFuture::from(promise)
                .await
                .map_err(|e| LoadError::Fetch(describe(&e)))?;
            let module = maps_default_export(&module);
            if !module.is_object() && !module.is_function() {
                return Err(LoadError::Fetch(format!("{url} has no default export")));
            }
            Ok(MapboxLibrary { module })
        }
        .boxed_local()
    }

    fn configure(&self, library: &MapboxLibrary, access_token: &str) -> Result<(), LoadError> {
        Reflect::set(
            &library.module,
            &JsValue::from_str("accessToken"),
            &JsValue::from_str(access_token),
        )
        .map(|_| ())
        .map_err(|e| LoadError::Configure(describe(&e)))
    }
}

/// A live map plus the JS callbacks and markers it owns.
pub struct WebMap {
    map: GlMap,
    library: MapboxLibrary,
    markers: RefCell<Vec<GlMarker>>,
    handlers: RefCell<Vec<Closure<dyn FnMut(JsValue)>>>,
}

impl WebMap {
    fn listen(&self, event: &str, handler: Box<dyn FnMut(JsValue)>) {
        let closure = Closure::wrap(handler);
        if let Err(err) = self.map.on(event, closure.as_ref().unchecked_ref()) {
            tracing::warn!("could not subscribe to map {event}: {}", describe(&err));
            return;
        }
        self.handlers.borrow_mut().push(closure);
    }

    fn build_marker(&self, at: LngLat, style: &MarkerStyle) -> Result<GlMarker, String> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "no document".to_string())?;
        let element = document.create_element("div").map_err(|e| describe(&e))?;
        element.set_class_name("map-marker");
        element.set_inner_html(&style.to_html());

        let options = Object::new();
        Reflect::set(&options, &JsValue::from_str("element"), &element).map_err(|e| describe(&e))?;
        let ctor = constructor(&self.library.module, "Marker")?;
        let marker = Reflect::construct(&ctor, &Array::of1(&options))
            .map_err(|e| describe(&e))?
            .unchecked_into::<GlMarker>();

        let position = Array::of2(&JsValue::from_f64(at.lng), &JsValue::from_f64(at.lat));
        marker.set_lng_lat(&position).map_err(|e| describe(&e))?;
        marker.add_to(&self.map).map_err(|e| describe(&e))?;
        Ok(marker)
    }
}

impl MapInstance for WebMap {
    fn on_load(&self, mut handler: Box<dyn FnMut()>) {
        self.listen("load", Box::new(move |_event: JsValue| handler()));
    }

    fn on_error(&self, mut handler: Box<dyn FnMut(MapError)>) {
        self.listen(
            "error",
            Box::new(move |event: JsValue| handler(MapError::Runtime(describe(&event)))),
        );
    }

    fn style(&self) -> Option<StyleDocument> {
        let style = self.map.get_style().ok()?;
        let json = js_sys::JSON::stringify(&style).ok()?.as_string()?;
        StyleDocument::from_json_str(&json).ok()
    }

    fn add_layer(&self, layer: &Value, before_id: Option<&str>) -> Result<(), MapError> {
        let layer = to_js(layer).map_err(MapError::Layer)?;
        let before = before_id.map_or(JsValue::UNDEFINED, JsValue::from_str);
        self.map
            .add_layer(&layer, &before)
            .map(|_| ())
            .map_err(|e| MapError::Layer(describe(&e)))
    }

    fn set_fog(&self, fog: &Fog) -> Result<(), MapError> {
        let fog = to_js(fog).map_err(MapError::Fog)?;
        self.map
            .set_fog(&fog)
            .map(|_| ())
            .map_err(|e| MapError::Fog(describe(&e)))
    }

    fn add_marker(&self, at: LngLat, style: &MarkerStyle) -> Result<(), MapError> {
        let marker = self.build_marker(at, style).map_err(MapError::Marker)?;
        self.markers.borrow_mut().push(marker);
        Ok(())
    }

    fn remove(&self) {
        for marker in self.markers.borrow_mut().drain(..) {
            marker.remove_marker();
        }
        self.map.remove_map();
    }
}
