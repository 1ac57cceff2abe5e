//! Placement of cells on the logical row/column grid.
//!
//! Cells are placed the way tables place them: each cell takes the first
//! column position of its row not already covered by a row-spanning cell
//! above it. Row spans never leave their row group (section).

use std::collections::HashSet;

use crate::dom::Document;
use crate::types::{Axis, Diagnostic, NodeId};

/// Position of one cell on the logical grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub cell: NodeId,
    pub row: u32,
    pub col: u32,
    /// Row span clipped to the cell's row group
    pub row_span: u32,
    pub col_span: u32,
}

/// Logical grid of a table.
#[derive(Debug, Clone, Default)]
pub struct GridMap {
    /// Rows in document order
    pub rows: Vec<NodeId>,
    /// Placements in document order
    pub placements: Vec<Placement>,
    /// Number of column positions covered by the widest row
    pub col_count: u32,
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl GridMap {
    pub fn build(doc: &Document, table: NodeId) -> Self {
        let rows = doc.rows(table);
        let mut map = Self {
            rows: rows.clone(),
            ..Self::default()
        };

        let mut start = 0;
        while start < rows.len() {
            let group_parent = rows.get(start).and_then(|r| doc.parent(*r));
            let len = rows
                .iter()
                .skip(start)
                .take_while(|r| doc.parent(**r) == group_parent)
                .count();
            map.place_group(doc, &rows, start, len);
            start += len.max(1);
        }
        map
    }

    fn place_group(&mut self, doc: &Document, rows: &[NodeId], start: usize, len: usize) {
        let mut occupied: HashSet<(usize, u32)> = HashSet::new();
        for offset in 0..len {
            let Some(&row) = rows.get(start + offset) else {
                break;
            };
            let mut col = 0u32;
            for &cell in doc.children(row) {
                let Some(node) = doc.get(cell) else {
                    continue;
                };
                if !node.kind.is_cell() {
                    continue;
                }
                while occupied.contains(&(offset, col)) {
                    col += 1;
                }
                let col_span = node.col_span.max(1);
                let row_span = node.row_span.max(1).min(to_u32(len - offset));
                for r in offset..offset + row_span as usize {
                    for c in col..col + col_span {
                        occupied.insert((r, c));
                    }
                }
                self.placements.push(Placement {
                    cell,
                    row: to_u32(start + offset),
                    col,
                    row_span,
                    col_span,
                });
                col += col_span;
            }
            let covered = occupied
                .iter()
                .filter(|(r, _)| *r == offset)
                .map(|(_, c)| c + 1)
                .max()
                .unwrap_or(0);
            self.col_count = self.col_count.max(covered);
        }
    }

    pub fn row_count(&self) -> u32 {
        to_u32(self.rows.len())
    }

    /// Largest cut the grid supports along `axis`.
    pub fn capacity(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Row => self.row_count(),
            Axis::Column => self.col_count,
        }
    }

    pub fn placement(&self, cell: NodeId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.cell == cell)
    }

    /// Spanning cells whose footprint crosses `cut` along `axis`.
    pub fn overruns(&self, axis: Axis, cut: u32) -> Vec<Diagnostic> {
        self.placements
            .iter()
            .filter_map(|p| {
                let (start, span) = match axis {
                    Axis::Row => (p.row, p.row_span),
                    Axis::Column => (p.col, p.col_span),
                };
                (start < cut && cut < start + span).then_some(Diagnostic::SpanOverrun {
                    axis,
                    cell: p.cell,
                    start,
                    span,
                    cut,
                })
            })
            .collect()
    }
}
