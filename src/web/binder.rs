//! The `css` and `callbacks` options applied to the whole page.
//!
//! In the browser, selectors go through `querySelectorAll` on the document,
//! so they reach elements outside the split table and accept the full
//! selector grammar of the page.

use js_sys::{Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use super::EventClosure;
use crate::error::{PanesError, Result};
use crate::options::{CallbackSpec, CssMap, OneOrMany, Rules};

/// Elements matching `selector` in document order.
fn select_all(document: &web_sys::Document, selector: &str) -> Result<Vec<Element>> {
    let list = document
        .query_selector_all(selector)
        .map_err(|_| PanesError::Selector(selector.to_string()))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Reject selectors the page cannot parse before anything is touched.
pub(crate) fn check_selectors<'a>(
    document: &web_sys::Document,
    selectors: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    for selector in selectors {
        document
            .query_selector(selector)
            .map_err(|_| PanesError::Selector(selector.to_string()))?;
    }
    Ok(())
}

/// Set every property of every rule on the matching page elements. Returns
/// the number of elements touched, counting repeats.
pub(crate) fn apply_page_css(document: &web_sys::Document, css: &Rules<CssMap>) -> Result<usize> {
    let mut touched = 0;
    for (selector, properties) in css.iter() {
        for element in select_all(document, selector)? {
            let Some(html) = element.dyn_ref::<HtmlElement>() else {
                continue;
            };
            let style = html.style();
            for (property, value) in properties.iter() {
                style.set_property(property, &value.to_css(property))?;
            }
            touched += 1;
        }
    }
    Ok(touched)
}

/// A callback descriptor with its function looked up on the global object.
struct Resolved {
    selector: String,
    event: String,
    func: Function,
    data: JsValue,
}

/// Callbacks resolved before the split so a missing function fails it
/// early; listeners are attached once the panes are in the page.
pub(crate) struct PageCallbacks {
    resolved: Vec<Resolved>,
}

impl PageCallbacks {
    pub(crate) fn resolve(callbacks: &Rules<OneOrMany<CallbackSpec>>) -> Result<Self> {
        let mut resolved = Vec::new();
        for (selector, specs) in callbacks.iter() {
            for spec in specs.as_slice() {
                let func = Reflect::get(&js_sys::global(), &JsValue::from_str(&spec.func))?
                    .dyn_into::<Function>()
                    .map_err(|_| PanesError::Other(format!("`{}` is not a global function", spec.func)))?;
                let data = match &spec.data {
                    Some(data) => serde_wasm_bindgen::to_value(data)
                        .map_err(|e| PanesError::Other(e.to_string()))?,
                    None => JsValue::UNDEFINED,
                };
                resolved.push(Resolved {
                    selector: selector.to_string(),
                    event: spec.event.clone(),
                    func,
                    data,
                });
            }
        }
        Ok(Self { resolved })
    }

    /// Attach every callback to every element its selector matches. The
    /// handler is called with the element as `this`, the event, and the
    /// descriptor's data.
    pub(crate) fn attach(self, document: &web_sys::Document) -> Result<Vec<EventClosure>> {
        let mut closures = Vec::new();
        for Resolved {
            selector,
            event,
            func,
            data,
        } in self.resolved
        {
            let elements = select_all(document, &selector)?;
            if elements.is_empty() {
                tracing::debug!(%selector, "callback matches nothing");
            }
            for element in elements {
                let target = element.clone();
                let func = func.clone();
                let data = data.clone();
                let closure = Closure::wrap(Box::new(move |ev: web_sys::Event| {
                    if let Err(err) = func.call2(&target, &ev, &data) {
                        web_sys::console::error_1(&err);
                    }
                }) as Box<dyn FnMut(web_sys::Event)>);
                element.add_event_listener_with_callback(&event, closure.as_ref().unchecked_ref())?;
                closures.push(closure);
            }
        }
        Ok(closures)
    }
}
