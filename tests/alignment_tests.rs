//! Row height and column width alignment across the four grids.
//!
//! Row heights are measured once on the whole grid and forced on every row
//! of both halves. Column widths are frozen either on a band of real rows or
//! through a synthetic probe row inserted at the top of every grid.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use common::{column_widths, forced_row_heights, options, real_rows, split_default, split_with};
use fixtures::{cell, GridBuilder};
use tablepanes::layout::RowBand;
use tablepanes::{GridDef, LayoutHost, Length, Quadrant};
use test_case::test_case;

/// 5x5 grid where `r3c4` is 40px high and `r4c0` is 100px wide.
fn uneven() -> GridDef {
    let mut builder = GridBuilder::new();
    for r in 0..5 {
        let cells = (0..5)
            .map(|c| {
                let text = format!("r{r}c{c}");
                match (r, c) {
                    (3, 4) => cell(&text).size(32.0, 40.0),
                    (4, 0) => cell(&text).size(100.0, 18.0),
                    _ => cell(&text),
                }
            })
            .collect();
        builder = builder.row(cells);
    }
    builder.build()
}

fn fixed_width(doc: &tablepanes::Document, node: tablepanes::NodeId) -> Option<Length> {
    doc.node(node).unwrap().fixed_width.clone()
}

// ============================================================================
// ROWS
// ============================================================================

#[test]
fn test_row_heights_are_measured_on_the_whole_grid() {
    let (_, panes) = split_default(&uneven(), 2, 2);
    assert_eq!(panes.row_heights, vec![18.0, 18.0, 18.0, 40.0, 18.0]);
}

#[test]
fn test_rows_line_up_across_halves() {
    let (doc, panes) = split_default(&uneven(), 2, 2);

    let top = vec![Some(18.0), Some(18.0)];
    let bottom = vec![Some(18.0), Some(40.0), Some(18.0)];
    assert_eq!(forced_row_heights(&doc, panes.table(Quadrant::TopLeft)), top);
    assert_eq!(forced_row_heights(&doc, panes.table(Quadrant::TopRight)), top);
    assert_eq!(forced_row_heights(&doc, panes.table(Quadrant::BottomLeft)), bottom);
    assert_eq!(forced_row_heights(&doc, panes.table(Quadrant::BottomRight)), bottom);
}

#[test]
fn test_rows_left_empty_by_a_span_keep_their_height() {
    let (doc, panes) = split_default(&fixtures::corner_span(), 2, 1);
    let bottom_left = panes.table(Quadrant::BottomLeft);

    let rows = real_rows(&doc, bottom_left);
    assert!(doc.children(rows[0]).is_empty());
    assert_eq!(forced_row_heights(&doc, bottom_left), vec![Some(18.0), Some(18.0)]);
}

// ============================================================================
// COLUMNS (BAND)
// ============================================================================

#[test]
fn test_columns_line_up_with_default_band() {
    let (doc, panes) = split_default(&uneven(), 2, 2);

    assert_eq!(column_widths(&doc, panes.table(Quadrant::TopLeft)), vec![100.0, 32.0]);
    assert_eq!(column_widths(&doc, panes.table(Quadrant::BottomLeft)), vec![100.0, 32.0]);
    assert_eq!(column_widths(&doc, panes.table(Quadrant::TopRight)), vec![32.0; 3]);
    assert_eq!(column_widths(&doc, panes.table(Quadrant::BottomRight)), vec![32.0; 3]);
}

#[test]
fn test_default_band_freezes_rows_up_to_the_cut() {
    let (doc, panes) = split_default(&uneven(), 2, 2);

    for &row in &real_rows(&doc, panes.table(Quadrant::TopLeft)) {
        for &c in doc.children(row) {
            assert!(fixed_width(&doc, c).is_some());
        }
    }
    let bottom = real_rows(&doc, panes.table(Quadrant::BottomLeft));
    assert_eq!(fixed_width(&doc, doc.children(bottom[0])[0]), Some(Length::Px(100.0)));
    assert_eq!(fixed_width(&doc, doc.children(bottom[1])[0]), None);
}

#[test]
fn test_explicit_band_freezes_only_its_rows() {
    let (doc, panes) = split_with(&uneven(), 2, 2, &options(r#"{"fix-width-rows": [3, 4]}"#));

    for q in [Quadrant::TopLeft, Quadrant::TopRight] {
        assert!(doc.cells(panes.table(q)).iter().all(|c| fixed_width(&doc, *c).is_none()));
    }
    let rows = real_rows(&doc, panes.table(Quadrant::BottomRight));
    assert!(doc.children(rows[0]).iter().all(|c| fixed_width(&doc, *c).is_none()));
    assert!(doc.children(rows[1]).iter().all(|c| fixed_width(&doc, *c).is_some()));
    assert!(doc.children(rows[2]).iter().all(|c| fixed_width(&doc, *c).is_some()));
}

#[test_case("[0, 2]", Quadrant::TopLeft, Some(RowBand::new(0, 1)))]
#[test_case("[0, 2]", Quadrant::BottomRight, Some(RowBand::new(0, 0)))]
#[test_case("[3, 4]", Quadrant::TopRight, None)]
#[test_case("[3, 4]", Quadrant::BottomLeft, Some(RowBand::new(1, 2)))]
#[test_case("\"probe\"", Quadrant::TopLeft, Some(RowBand::new(0, 0)))]
fn test_band_maps_into_each_grid(band: &str, quadrant: Quadrant, expected: Option<RowBand>) {
    let json = format!(r#"{{"fix-width-rows": {band}}}"#);
    let (_, panes) = split_with(&uneven(), 2, 2, &options(&json));
    assert_eq!(panes.band_for(quadrant), expected);
}

#[test]
fn test_refix_freezes_current_widths() {
    let (mut doc, panes) = split_default(&uneven(), 2, 2);
    let top_left = panes.table(Quadrant::TopLeft);
    for c in doc.cells(top_left) {
        doc.node_mut(c).unwrap().fixed_width = None;
    }

    panes.refix_column_widths(&mut LayoutHost::default(), &mut doc).unwrap();

    // The top-left grid alone no longer holds the wide cell.
    let widths: Vec<Option<Length>> = doc.cells(top_left).into_iter().map(|c| fixed_width(&doc, c)).collect();
    assert_eq!(widths, vec![Some(Length::Px(32.0)); 4]);
    assert_eq!(column_widths(&doc, panes.table(Quadrant::BottomLeft)), vec![100.0, 32.0]);
}

// ============================================================================
// COLUMNS (PROBE ROW)
// ============================================================================

#[test_case("probe")]
#[test_case("dummy")]
fn test_probe_row_heads_every_grid(keyword: &str) {
    let json = format!(r#"{{"fix-width-rows": "{keyword}"}}"#);
    let (doc, panes) = split_with(&uneven(), 2, 2, &options(&json));

    assert_eq!(
        panes.probe_widths,
        Some((vec![100.0, 32.0], vec![32.0, 32.0, 32.0]))
    );
    let mut probes = Vec::new();
    for q in Quadrant::ALL {
        let first = doc.rows(panes.table(q))[0];
        let row = doc.node(first).unwrap();
        assert!(row.synthetic, "{q} should start with the probe row");
        let widths: Vec<Option<Length>> = doc.children(first).iter().map(|c| fixed_width(&doc, *c)).collect();
        let expected: Vec<Option<Length>> = if q.is_left() {
            vec![Some(Length::Px(100.0)), Some(Length::Px(32.0))]
        } else {
            vec![Some(Length::Px(32.0)); 3]
        };
        assert_eq!(widths, expected);
        probes.push(first);
    }
    // Bottom grids get their own copies.
    probes.sort();
    probes.dedup();
    assert_eq!(probes.len(), 4);
}

#[test]
fn test_probe_leaves_real_cells_unfrozen() {
    let (doc, panes) = split_with(&uneven(), 2, 2, &options(r#"{"fix-width-rows": "probe"}"#));

    for q in Quadrant::ALL {
        for row in real_rows(&doc, panes.table(q)) {
            assert!(doc.children(row).iter().all(|c| fixed_width(&doc, *c).is_none()));
        }
    }
    assert_eq!(column_widths(&doc, panes.table(Quadrant::TopLeft)), vec![100.0, 32.0]);
    assert_eq!(column_widths(&doc, panes.table(Quadrant::BottomLeft)), vec![100.0, 32.0]);
}

#[test]
fn test_probe_covers_spanned_columns() {
    let (doc, panes) = split_with(&fixtures::corner_span(), 2, 1, &options(r#"{"fix-width-rows": "probe"}"#));

    let (left, right) = panes.probe_widths.clone().unwrap();
    assert_eq!((left.len(), right.len()), (2, 3));
    let top_right = doc.rows(panes.table(Quadrant::TopRight))[0];
    assert_eq!(doc.children(top_right).len(), 3);
}
