//! tablepanes - frozen headers for spanning-cell tables
//!
//! Splits a table at a column cut and a row cut into four grids laid out as
//! quadrants, keeps their row heights and column widths aligned, and links
//! their scroll positions so the top row and left column stay in view:
//! - Row and column spans straddling a cut are accounted for, never split
//! - Column widths frozen from a band of rows or from a probe row
//! - Display method, sizes, fit-to-container, CSS and callback options
//! - Native (arena + layout host) and in-page (WebAssembly) operation
//!
//! # Usage (Rust)
//!
//! ```
//! use tablepanes::{split_table_value, GridDef, SplitOptions};
//!
//! let grid = GridDef::from_rows(&[&[(1, 1), (1, 1)], &[(1, 1), (1, 1)]]);
//! let snapshot = split_table_value(&grid, 1, 1, &SplitOptions::default()).unwrap();
//! assert_eq!(snapshot.quadrants.len(), 4);
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { TablePanes } from 'tablepanes';
//! await init();
//! const panes = TablePanes.split(document.getElementById('prices'), 1, 2, { fit: true });
//! ```

pub mod dom;
pub mod error;
pub mod export;
pub mod import;
pub mod layout;
pub mod options;
pub mod panes;
pub mod present;
pub mod split;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

pub use dom::Document;
pub use error::{PanesError, Result};
pub use export::PaneSetSnapshot;
pub use import::{CellDef, GridDef, SectionDef};
pub use layout::{Host, LayoutHost, TextMetrics};
pub use options::SplitOptions;
pub use panes::{split, split_all, split_indexed, PaneSet, SplitOutcome};
#[cfg(target_arch = "wasm32")]
pub use web::TablePanes;

pub use types::*;

/// Build `grid`, split it with the layout host, and capture the result.
///
/// # Errors
/// Returns [`PanesError::InvalidCut`] for cuts outside the grid, or a
/// selector error from the `css`/`callbacks` options.
pub fn split_table_value(
    grid: &GridDef,
    col_cut: i64,
    row_cut: i64,
    options: &SplitOptions,
) -> Result<PaneSetSnapshot> {
    let (doc, panes) = split_grid(grid, col_cut, row_cut, options)?;
    PaneSetSnapshot::capture(&doc, &panes)
}

/// Like [`split_table_value`], returning the container HTML instead.
///
/// # Errors
/// Same as [`split_table_value`].
pub fn split_table_html(
    grid: &GridDef,
    col_cut: i64,
    row_cut: i64,
    options: &SplitOptions,
) -> Result<String> {
    let (doc, panes) = split_grid(grid, col_cut, row_cut, options)?;
    Ok(export::to_html(&doc, &panes))
}

fn split_grid(
    grid: &GridDef,
    col_cut: i64,
    row_cut: i64,
    options: &SplitOptions,
) -> Result<(Document, PaneSet)> {
    let mut doc = Document::new();
    let table = grid.build(&mut doc)?;
    let mut host = LayoutHost::default();
    match split(&mut doc, &mut host, table, col_cut, row_cut, options)? {
        SplitOutcome::Applied(panes) => Ok((doc, *panes)),
        SplitOutcome::AlreadySplit { .. } => Err(PanesError::Other(
            "A freshly built grid cannot be split already".to_string(),
        )),
    }
}

fn options_from_json(options: &str) -> Result<SplitOptions> {
    if options.trim().is_empty() {
        Ok(SplitOptions::default())
    } else {
        SplitOptions::from_json(options)
    }
}

/// Split a grid definition and return the pane set snapshot as JSON
///
/// # Arguments
/// * `grid` - Grid definition JSON
/// * `col_cut`, `row_cut` - Number of frozen columns and rows
/// * `options` - Options JSON (may be empty)
///
/// # Errors
/// Returns an error for malformed JSON or cuts outside the grid.
#[wasm_bindgen]
pub fn split_table_json(
    grid: &str,
    col_cut: i32,
    row_cut: i32,
    options: &str,
) -> std::result::Result<String, JsValue> {
    let grid = GridDef::from_json(grid).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let options = options_from_json(options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let snapshot = split_table_value(&grid, col_cut.into(), row_cut.into(), &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&snapshot)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Split a grid definition and return the snapshot as a `JsValue`
///
/// This is more efficient than `split_table_json` when the result will be
/// used directly in JavaScript.
///
/// # Errors
/// Returns an error for malformed JSON or cuts outside the grid.
#[wasm_bindgen]
pub fn split_table_to_js(
    grid: &str,
    col_cut: i32,
    row_cut: i32,
    options: &str,
) -> std::result::Result<JsValue, JsValue> {
    let grid = GridDef::from_json(grid).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let options = options_from_json(options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let snapshot = split_table_value(&grid, col_cut.into(), row_cut.into(), &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&snapshot)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
