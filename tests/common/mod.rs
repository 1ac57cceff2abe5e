//! Common test utilities and assertion helpers.
//!
//! Splits run natively against [`LayoutHost`], so every measurement here is
//! deterministic: a character is 8px wide and a text line 18px high.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use tablepanes::layout::TableLayout;
use tablepanes::{
    split, Document, GridDef, LayoutHost, NodeId, PaneSet, Quadrant, SplitOptions, SplitOutcome,
    TextMetrics,
};

// ============================================================================
// Splitting
// ============================================================================

/// Build `grid` into a fresh document and split it; panics unless applied.
pub fn split_with(
    grid: &GridDef,
    col_cut: i64,
    row_cut: i64,
    options: &SplitOptions,
) -> (Document, PaneSet) {
    let mut doc = Document::new();
    let table = grid.build(&mut doc).unwrap();
    let mut host = LayoutHost::default();
    match split(&mut doc, &mut host, table, col_cut, row_cut, options).unwrap() {
        SplitOutcome::Applied(panes) => (doc, *panes),
        SplitOutcome::AlreadySplit { .. } => panic!("fresh grid reported as already split"),
    }
}

/// Split with default options.
pub fn split_default(grid: &GridDef, col_cut: i64, row_cut: i64) -> (Document, PaneSet) {
    split_with(grid, col_cut, row_cut, &SplitOptions::default())
}

pub fn options(json: &str) -> SplitOptions {
    SplitOptions::from_json(json).unwrap()
}

// ============================================================================
// Grid inspection
// ============================================================================

/// Rows of `table` that came from the source grid (probe rows skipped).
pub fn real_rows(doc: &Document, table: NodeId) -> Vec<NodeId> {
    doc.rows(table)
        .into_iter()
        .filter(|r| !doc.node(*r).unwrap().synthetic)
        .collect()
}

/// Cell text of every real row.
pub fn texts(doc: &Document, table: NodeId) -> Vec<Vec<String>> {
    real_rows(doc, table)
        .into_iter()
        .map(|r| {
            doc.children(r)
                .iter()
                .map(|c| doc.node(*c).unwrap().text.clone())
                .collect()
        })
        .collect()
}

/// Text of the grid in `quadrant`.
pub fn quadrant_texts(doc: &Document, panes: &PaneSet, quadrant: Quadrant) -> Vec<Vec<String>> {
    texts(doc, panes.table(quadrant))
}

/// Every real cell of the four grids.
pub fn all_cells(doc: &Document, panes: &PaneSet) -> Vec<NodeId> {
    Quadrant::ALL
        .into_iter()
        .flat_map(|q| doc.cells(panes.table(q)))
        .filter(|c| !doc.node(*c).unwrap().synthetic)
        .collect()
}

/// Forced height of every real row, in pixels.
pub fn forced_row_heights(doc: &Document, table: NodeId) -> Vec<Option<f32>> {
    real_rows(doc, table)
        .into_iter()
        .map(|r| {
            doc.node(r)
                .unwrap()
                .fixed_height
                .as_ref()
                .and_then(tablepanes::Length::as_px)
        })
        .collect()
}

/// Column widths the layout host gives `table`.
pub fn column_widths(doc: &Document, table: NodeId) -> Vec<f32> {
    TableLayout::compute(doc, table, &TextMetrics::default()).col_widths
}

/// Identifier of a node, empty when it has none.
pub fn id_of(doc: &Document, node: NodeId) -> String {
    doc.node(node).unwrap().id.clone().unwrap_or_default()
}

pub fn has_class(doc: &Document, node: NodeId, class: &str) -> bool {
    doc.node(node).unwrap().has_class(class)
}
