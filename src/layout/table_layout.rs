//! Automatic table layout.
//!
//! Column widths and row heights are derived from cell content the way a
//! browser sizes an auto-layout table, with forced sizes taking precedence:
//!
//! - a column is as wide as its widest single-column cell; if any such cell
//!   has a forced width the column takes the largest forced width instead,
//! - spanning cells widen the non-forced columns they cover, evenly, when the
//!   columns are too narrow for them,
//! - rows follow the same rules with heights, and a row with a forced height
//!   keeps exactly that height.

use super::TextMetrics;
use crate::dom::Document;
use crate::split::GridMap;
use crate::types::{Node, NodeId};

/// Resolved geometry of one table.
#[derive(Debug, Clone)]
pub struct TableLayout {
    /// Cumulative column positions (`col_positions[i]` = x of column i's left edge)
    pub col_positions: Vec<f32>,
    /// Cumulative row positions (`row_positions[i]` = y of row i's top edge)
    pub row_positions: Vec<f32>,
    pub col_widths: Vec<f32>,
    pub row_heights: Vec<f32>,
    pub grid: GridMap,
}

/// Rectangle representing a cell's bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One axis worth of sizing input.
struct Track {
    natural: Vec<f32>,
    forced: Vec<Option<f32>>,
}

impl Track {
    fn new(len: usize) -> Self {
        Self {
            natural: vec![0.0; len],
            forced: vec![None; len],
        }
    }

    fn offer(&mut self, index: usize, natural: f32, forced: Option<f32>) {
        match forced {
            Some(f) => {
                if let Some(slot) = self.forced.get_mut(index) {
                    *slot = Some(slot.map_or(f, |prev| prev.max(f)));
                }
            }
            None => {
                if let Some(slot) = self.natural.get_mut(index) {
                    *slot = slot.max(natural);
                }
            }
        }
    }

    fn sizes(&self) -> Vec<f32> {
        self.natural
            .iter()
            .zip(&self.forced)
            .map(|(n, f)| f.unwrap_or(*n))
            .collect()
    }

    /// Grow the non-forced entries of `range` so they add up to `required`.
    fn widen(&self, sizes: &mut [f32], start: usize, span: usize, required: f32) {
        let end = (start + span).min(sizes.len());
        let Some(covered) = sizes.get(start..end) else {
            return;
        };
        let current: f32 = covered.iter().sum();
        let flexible: Vec<usize> = (start..end)
            .filter(|i| self.forced.get(*i).is_some_and(Option::is_none))
            .collect();
        if required <= current || flexible.is_empty() {
            return;
        }
        let share = (required - current) / flexible.len() as f32;
        for i in flexible {
            if let Some(size) = sizes.get_mut(i) {
                *size += share;
            }
        }
    }
}

fn cumulative(sizes: &[f32]) -> Vec<f32> {
    let mut positions = Vec::with_capacity(sizes.len() + 1);
    let mut at = 0.0;
    positions.push(at);
    for size in sizes {
        at += size;
        positions.push(at);
    }
    positions
}

impl TableLayout {
    pub fn compute(doc: &Document, table: NodeId, metrics: &TextMetrics) -> Self {
        let grid = GridMap::build(doc, table);
        let mut cols = Track::new(grid.col_count as usize);
        let mut rows = Track::new(grid.rows.len());

        for (i, row) in grid.rows.iter().enumerate() {
            if let Some(h) = doc.get(*row).and_then(|n| n.fixed_height.as_ref()).and_then(|l| l.as_px()) {
                rows.offer(i, 0.0, Some(h));
            }
        }

        for p in &grid.placements {
            let Some(cell) = doc.get(p.cell) else {
                continue;
            };
            if p.col_span == 1 {
                cols.offer(p.col as usize, metrics.content_width(cell), forced_width(cell));
            }
            if p.row_span == 1 && rows.forced.get(p.row as usize).is_some_and(Option::is_none) {
                rows.offer(p.row as usize, metrics.content_height(cell), forced_height(cell));
            }
        }

        let mut col_widths = cols.sizes();
        let mut row_heights = rows.sizes();
        for p in &grid.placements {
            let Some(cell) = doc.get(p.cell) else {
                continue;
            };
            if p.col_span > 1 {
                let required = forced_width(cell).unwrap_or_else(|| metrics.content_width(cell));
                cols.widen(&mut col_widths, p.col as usize, p.col_span as usize, required);
            }
            if p.row_span > 1 {
                let required = forced_height(cell).unwrap_or_else(|| metrics.content_height(cell));
                rows.widen(&mut row_heights, p.row as usize, p.row_span as usize, required);
            }
        }

        Self {
            col_positions: cumulative(&col_widths),
            row_positions: cumulative(&row_heights),
            col_widths,
            row_heights,
            grid,
        }
    }

    /// Bounds of a cell, covering every column and row it spans.
    pub fn cell_rect(&self, cell: NodeId) -> Option<CellRect> {
        let p = self.grid.placement(cell)?;
        let x = self.col_positions.get(p.col as usize).copied()?;
        let y = self.row_positions.get(p.row as usize).copied()?;
        let right = self
            .col_positions
            .get((p.col + p.col_span) as usize)
            .copied()
            .unwrap_or(x);
        let bottom = self
            .row_positions
            .get((p.row + p.row_span) as usize)
            .copied()
            .unwrap_or(y);
        Some(CellRect {
            x,
            y,
            width: right - x,
            height: bottom - y,
        })
    }

    pub fn row_height_of(&self, row: NodeId) -> Option<f32> {
        let index = self.grid.rows.iter().position(|r| *r == row)?;
        self.row_heights.get(index).copied()
    }

    /// Get total width of the table
    pub fn total_width(&self) -> f32 {
        self.col_positions.last().copied().unwrap_or(0.0)
    }

    /// Get total height of the table
    pub fn total_height(&self) -> f32 {
        self.row_positions.last().copied().unwrap_or(0.0)
    }
}

fn forced_width(cell: &Node) -> Option<f32> {
    cell.fixed_width.as_ref().and_then(|l| l.as_px())
}

fn forced_height(cell: &Node) -> Option<f32> {
    cell.fixed_height.as_ref().and_then(|l| l.as_px())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use crate::import::{CellDef, GridDef};

    fn metrics() -> TextMetrics {
        TextMetrics::default()
    }

    #[test]
    fn test_basic_layout() {
        let mut doc = Document::new();
        let def = GridDef {
            rows: vec![
                vec![CellDef::new("ab"), CellDef::new("abcd")],
                vec![CellDef::new("abc"), CellDef::new("a")],
            ],
            ..GridDef::default()
        };
        let table = def.build(&mut doc).unwrap();
        let layout = TableLayout::compute(&doc, table, &metrics());
        let cw = metrics().char_width;

        assert_eq!(layout.col_widths, vec![3.0 * cw, 4.0 * cw]);
        assert_eq!(layout.total_width(), 7.0 * cw);
        assert_eq!(layout.total_height(), 2.0 * metrics().line_height);
    }

    #[test]
    fn test_forced_width_wins_over_content() {
        let mut doc = Document::new();
        let table = GridDef {
            rows: vec![vec![CellDef::new("abcdefgh")], vec![CellDef::new("a")]],
            ..GridDef::default()
        }
        .build(&mut doc)
        .unwrap();
        let first = doc.cells(table)[1];
        doc.fix_width(first, 20.0_f32).unwrap();

        let layout = TableLayout::compute(&doc, table, &metrics());
        assert_eq!(layout.col_widths, vec![20.0]);
    }

    #[test]
    fn test_spanning_cell_widens_columns() {
        let mut doc = Document::new();
        let mut wide = CellDef::new("").span(2, 1);
        wide.width = Some(100.0);
        let table = GridDef {
            rows: vec![vec![wide], vec![CellDef::new("a"), CellDef::new("b")]],
            ..GridDef::default()
        }
        .build(&mut doc)
        .unwrap();
        let layout = TableLayout::compute(&doc, table, &metrics());
        let cell = doc.cells(table)[0];

        assert_eq!(layout.total_width(), 100.0);
        assert_eq!(layout.cell_rect(cell).unwrap().width, 100.0);
    }

    #[test]
    fn test_forced_row_height() {
        let mut doc = Document::new();
        let table = GridDef::from_rows(&[&[(1, 1)], &[(1, 1)]]).build(&mut doc).unwrap();
        let row = doc.rows(table)[1];
        doc.fix_height(row, 33.0_f32).unwrap();

        let layout = TableLayout::compute(&doc, table, &metrics());
        assert_eq!(layout.row_height_of(row), Some(33.0));
        assert_eq!(layout.row_heights[0], metrics().line_height);
    }
}
