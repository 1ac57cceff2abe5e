//! Browser bridge: split a live `<table>` in place.
//!
//! The table is read into an arena, split there with [`LayoutHost`] using
//! the rendered cell sizes, and the result is mirrored back into the page.
//! Original cell elements are moved, never recreated, so their content and
//! listeners survive. After write-back the live elements take over
//! measuring: fit and scroll clamping use [`host::DomHost`].
//!
//! ```javascript
//! import init, { TablePanes } from 'tablepanes';
//! await init();
//! const panes = TablePanes.split(table, 2, 1, { fit: true, "display-method": "flex" });
//! const all = TablePanes.splitAll([...document.querySelectorAll('table.report')], 1, 1);
//! ```
//!
//! The `css` and `callbacks` options are applied to the whole page once the
//! panes are in place, with the page's own selector engine.

mod binder;
mod host;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlTableElement};

use self::binder::{apply_page_css, check_selectors, PageCallbacks};
use self::host::DomHost;
use crate::dom::Document;
use crate::error::Result;
use crate::export::PaneSetSnapshot;
use crate::layout::LayoutHost;
use crate::options::{Rules, SplitOptions};
use crate::panes::{self, PaneSet, SCROLL_LINKS};
use crate::present::{BindingLog, Fit};
use crate::types::{Quadrant, ScrollOffset};

type EventClosure = Closure<dyn FnMut(web_sys::Event)>;

#[allow(clippy::cast_possible_truncation)]
fn scroll_left_f32(element: &HtmlElement) -> f32 {
    Reflect::get(element.as_ref(), &JsValue::from_str("scrollLeft"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(f64::from(element.scroll_left())) as f32
}

#[allow(clippy::cast_possible_truncation)]
fn scroll_top_f32(element: &HtmlElement) -> f32 {
    Reflect::get(element.as_ref(), &JsValue::from_str("scrollTop"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(f64::from(element.scroll_top())) as f32
}

#[allow(clippy::cast_possible_truncation)]
fn apply_offset(element: &HtmlElement, offset: ScrollOffset) {
    element.set_scroll_left(offset.left.round() as i32);
    element.set_scroll_top(offset.top.round() as i32);
}

fn parse_options(options: JsValue) -> std::result::Result<SplitOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(SplitOptions::default());
    }
    if let Some(json) = options.as_string() {
        return Ok(SplitOptions::from_json(&json)?);
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn quadrant_named(name: &str) -> std::result::Result<Quadrant, JsValue> {
    Quadrant::ALL
        .into_iter()
        .find(|q| q.id_suffix() == name)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown pane: {name}")))
}

/// State shared with the event closures.
struct SharedState {
    doc: Document,
    host: DomHost,
    panes: PaneSet,
}

impl SharedState {
    fn pane_element(&self, quadrant: Quadrant) -> Option<HtmlElement> {
        self.host.element(self.panes.pane(quadrant)).cloned()
    }

    /// Measure the fit overheads on the live elements and resize.
    fn refit(&mut self) -> Result<()> {
        self.panes.fit = Some(Fit::measure(&self.host, &self.doc, &self.panes));
        self.panes.resize(&mut self.host, &mut self.doc)?;
        Ok(())
    }

    /// Scroll one pane and move its followers in the page.
    fn scroll(&mut self, quadrant: Quadrant, offset: ScrollOffset) {
        for follower in self.panes.scroll(quadrant, offset).into_iter().skip(1) {
            if let Some(element) = self.host.element(self.panes.pane(follower)) {
                apply_offset(element, self.panes.offset(follower));
            }
        }
    }
}

/// A table split in the page.
#[wasm_bindgen]
pub struct TablePanes {
    state: Rc<RefCell<SharedState>>,
    #[allow(dead_code)]
    scroll_closures: Vec<EventClosure>,
    #[allow(dead_code)]
    callback_closures: Vec<EventClosure>,
    resize_closure: Option<EventClosure>,
}

#[wasm_bindgen]
impl TablePanes {
    /// Split `table` in place. `options` is an object or a JSON string.
    /// Returns `undefined` when the table was split before.
    ///
    /// # Errors
    /// Returns an error for cuts outside the grid, bad options, or a
    /// callback naming something that is not a global function.
    pub fn split(
        table: HtmlTableElement,
        col_cut: i32,
        row_cut: i32,
        options: JsValue,
    ) -> std::result::Result<Option<TablePanes>, JsValue> {
        let options = parse_options(options)?;
        Self::split_at(table, 0, col_cut, row_cut, &options)
    }

    /// Split every table of `tables` with the same cuts and options. Tables
    /// without identifier are numbered by their position. The result holds
    /// one entry per table, `undefined` where it was split before.
    ///
    /// # Errors
    /// Fails on the first item that is not a table or cannot be split.
    #[wasm_bindgen(js_name = splitAll)]
    pub fn split_all(
        tables: js_sys::Array,
        col_cut: i32,
        row_cut: i32,
        options: JsValue,
    ) -> std::result::Result<js_sys::Array, JsValue> {
        let options = parse_options(options)?;
        let out = js_sys::Array::new();
        for (index, item) in tables.iter().enumerate() {
            let table = item
                .dyn_into::<HtmlTableElement>()
                .map_err(|_| JsValue::from_str(&format!("Item {index} is not a table")))?;
            let panes = Self::split_at(table, index, col_cut, row_cut, &options)?;
            out.push(&panes.map_or(JsValue::UNDEFINED, JsValue::from));
        }
        Ok(out)
    }

    /// Size the scrolling panes to the container and keep them sized on
    /// window resize. Calling it again only re-fits.
    ///
    /// # Errors
    /// Returns an error if the resize listener cannot be registered.
    pub fn fit(&mut self) -> std::result::Result<(), JsValue> {
        self.state.borrow_mut().refit()?;
        self.install_resize_listener()
    }

    /// Freeze column widths again from the rendered cells.
    ///
    /// # Errors
    /// Returns an error if a grid node is missing.
    #[wasm_bindgen(js_name = refixColumnWidths)]
    pub fn refix_column_widths(&mut self) -> std::result::Result<(), JsValue> {
        let mut s = self.state.borrow_mut();
        let s = &mut *s;
        s.panes.refix_column_widths(&mut s.host, &mut s.doc)?;
        Ok(())
    }

    /// Scroll a pane (`"bottom-right"` and so on) and its followers.
    ///
    /// # Errors
    /// Returns an error for an unknown pane name.
    #[wasm_bindgen(js_name = scrollTo)]
    pub fn scroll_to(&mut self, pane: &str, left: f32, top: f32) -> std::result::Result<(), JsValue> {
        let quadrant = quadrant_named(pane)?;
        let mut s = self.state.borrow_mut();
        if let Some(element) = s.pane_element(quadrant) {
            apply_offset(&element, ScrollOffset::new(left, top));
        }
        s.scroll(quadrant, ScrollOffset::new(left, top));
        Ok(())
    }

    /// Identifier of the outer wrapper.
    #[wasm_bindgen(js_name = containerId)]
    pub fn container_id(&self) -> String {
        format!("{}-table4panes", self.state.borrow().panes.grid_id)
    }

    /// The pane set as a plain object (same shape as the JSON snapshot).
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be converted.
    pub fn snapshot(&self) -> std::result::Result<JsValue, JsValue> {
        let s = self.state.borrow();
        let snapshot = PaneSetSnapshot::capture(&s.doc, &s.panes)?;
        serde_wasm_bindgen::to_value(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl TablePanes {
    fn split_at(
        table: HtmlTableElement,
        index: usize,
        col_cut: i32,
        row_cut: i32,
        options: &SplitOptions,
    ) -> std::result::Result<Option<TablePanes>, JsValue> {
        console_error_panic_hook::set_once();
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("No document"))?;
        let grid_id = panes::grid_identifier(Some(&table.id()), options.prefix(), index);
        if document
            .get_element_by_id(&format!("{grid_id}-table4panes"))
            .is_some()
        {
            return Ok(None);
        }
        let parent = table
            .parent_node()
            .ok_or_else(|| JsValue::from_str("Table is not attached"))?;
        let next = table.next_sibling();

        // Page rules are checked up front and applied after write-back.
        check_selectors(
            &document,
            options
                .css
                .iter()
                .map(|(selector, _)| selector)
                .chain(options.callbacks.iter().map(|(selector, _)| selector)),
        )?;
        let callbacks = PageCallbacks::resolve(&options.callbacks)?;
        let arena_options = SplitOptions {
            css: Rules::default(),
            callbacks: Rules::default(),
            ..options.clone()
        };

        let mut doc = Document::new();
        let mut host = DomHost::default();
        let root = host.import(&mut doc, &table)?;
        let outcome = panes::split_indexed(
            &mut doc,
            &mut LayoutHost::default(),
            &mut BindingLog::default(),
            index,
            root,
            col_cut.into(),
            row_cut.into(),
            &arena_options,
        )?;
        let Some(panes) = outcome.applied() else {
            return Ok(None);
        };

        let container = host.write_back(&document, &doc, panes.container)?;
        parent.insert_before(&container, next.as_ref())?;
        host.remove_orphans(&doc, panes.container);

        let mut state = SharedState { doc, host, panes };
        if options.fit {
            state.refit()?;
        }
        apply_page_css(&document, &options.css)?;
        let callback_closures = callbacks.attach(&document)?;
        state.panes.refresh_viewports(&state.host, &state.doc);
        tracing::debug!(grid = %state.panes.grid_id, "written back");

        let mut this = Self {
            state: Rc::new(RefCell::new(state)),
            scroll_closures: Vec::new(),
            callback_closures,
            resize_closure: None,
        };
        this.install_scroll_sync()?;
        if options.fit {
            this.install_resize_listener()?;
        }
        Ok(Some(this))
    }

    fn install_scroll_sync(&mut self) -> std::result::Result<(), JsValue> {
        let mut sources: Vec<Quadrant> = SCROLL_LINKS.iter().map(|l| l.source).collect();
        sources.sort();
        sources.dedup();
        for source in sources {
            let Some(pane) = self.state.borrow().pane_element(source) else {
                continue;
            };
            let shared = Rc::clone(&self.state);
            let target = pane.clone();
            let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                // Re-entrant events are dropped.
                let Ok(mut s) = shared.try_borrow_mut() else {
                    return;
                };
                let offset = ScrollOffset::new(scroll_left_f32(&target), scroll_top_f32(&target));
                s.scroll(source, offset);
            }) as Box<dyn FnMut(web_sys::Event)>);
            pane.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
            self.scroll_closures.push(closure);
        }
        Ok(())
    }

    fn install_resize_listener(&mut self) -> std::result::Result<(), JsValue> {
        if self.resize_closure.is_some() {
            return Ok(());
        }
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let shared = Rc::clone(&self.state);
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let Ok(mut s) = shared.try_borrow_mut() else {
                return;
            };
            let s = &mut *s;
            if let Err(e) = s.panes.resize(&mut s.host, &mut s.doc) {
                web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        self.resize_closure = Some(closure);
        Ok(())
    }
}
