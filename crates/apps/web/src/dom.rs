use runtime::{LoadError, StylesheetHost};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::mapbox::describe;

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn element_by_id(id: &str) -> Result<HtmlElement, JsValue> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{id}")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not an HTML element")))
}

/// Walk up from an event target to the nearest element carrying `attr`.
pub fn closest_with(target: Option<web_sys::EventTarget>, attr: &str) -> Option<web_sys::Element> {
    let element = target?.dyn_into::<web_sys::Element>().ok()?;
    element.closest(&format!("[{attr}]")).ok().flatten()
}

/// The live document `<head>`.
pub struct DocumentStylesheets;

impl StylesheetHost for DocumentStylesheets {
    fn has_element(&self, id: &str) -> bool {
        document()
            .map(|d| d.get_element_by_id(id).is_some())
            .unwrap_or(false)
    }

    fn append_stylesheet(&self, id: &str, href: &str) -> Result<(), LoadError> {
        let stylesheet = || -> Result<(), JsValue> {
            let document = document()?;
            let link = document.create_element("link")?;
            link.set_id(id);
            link.set_attribute("rel", "stylesheet")?;
            link.set_attribute("href", href)?;
            let head = document
                .head()
                .ok_or_else(|| JsValue::from_str("document has no <head>"))?;
            head.append_child(&link)?;
            Ok(())
        };
        stylesheet().map_err(|e| LoadError::Stylesheet(describe(&e)))
    }
}
