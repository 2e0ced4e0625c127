//! Small helpers over `web-sys` for working with the host page.
//!
//! Every lookup is fallible and returns `Option`/`Result`; callers decide
//! whether a missing node disables their component or is simply skipped.

use thiserror::Error;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, NodeList};

/// Ожидаемый элемент страницы отсутствует
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required element `{0}` not found")]
pub struct MissingElement(pub String);

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

pub fn body() -> Option<HtmlElement> {
    document().and_then(|d| d.body())
}

pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub fn query_within(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    document()
        .and_then(|d| d.query_selector_all(selector).ok())
        .map(elements)
        .unwrap_or_default()
}

pub fn query_all_within(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

/// Like [`query`], but a missing element is an error.
pub fn require(selector: &str) -> Result<Element, MissingElement> {
    query(selector).ok_or_else(|| MissingElement(selector.to_string()))
}

pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn require_by_id<T: JsCast>(id: &str) -> Result<T, MissingElement> {
    by_id(id).ok_or_else(|| MissingElement(format!("#{}", id)))
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Set an inline style property; an empty value removes it.
pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let style = html.style();
        let _ = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
    }
}

pub fn set_display(el: &Element, display: &str) {
    set_style(el, "display", display);
}

pub fn add_class(el: &Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

pub fn remove_class(el: &Element, class: &str) {
    let _ = el.class_list().remove_1(class);
}

pub fn text_of(el: &Element) -> String {
    el.text_content().unwrap_or_default()
}

/// Element the event was dispatched on, if it is an `Element`.
pub fn event_element(ev: &web_sys::Event) -> Option<Element> {
    ev.target().and_then(|t| t.dyn_into::<Element>().ok())
}

/// Attach `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    if let Err(err) =
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("failed to attach `{}` listener: {:?}", event, err);
    }
    closure.forget();
}

pub fn inner_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or_default()
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Lock or unlock page scrolling via `body { overflow }`.
pub fn lock_scroll(locked: bool) {
    if let Some(body) = body() {
        set_style(&body, "overflow", if locked { "hidden" } else { "" });
    }
}

pub fn navigate(href: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(href) {
            log::error!("navigation to {} failed: {:?}", href, err);
        }
    }
}

pub fn reload() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}
