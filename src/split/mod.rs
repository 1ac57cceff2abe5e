//! Structural splitting of a grid along a row or column cut.
//!
//! [`extract`] moves the leading rows (row axis) or the leading column units
//! of every row (column axis) out of a sub-tree into a fresh clone of it.
//! Cells are moved, never copied; only containers are cloned, and clones
//! never inherit the source identifier.

mod occupancy;
mod span_budget;

pub use occupancy::{GridMap, Placement};
pub use span_budget::span_budgets;

use crate::dom::Document;
use crate::error::Result;
use crate::types::{Axis, NodeId, NodeKind};

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Move the first `budget` rows or column units of `node` into a new,
/// detached node of the same kind and return it.
///
/// - Tables and sections (and rows, on the column axis) are recursed into in
///   order. On the column axis every row receives its own budget from
///   [`span_budgets`], computed once per container.
/// - Rows (row axis) and cells (column axis) are moved whole; a cell consumes
///   `col_span` units, so the budget may end negative.
/// - A section left without rows is removed from the source. Rows are never
///   removed by a column split, so both halves keep one row per source row.
/// - A budget of zero or less returns the empty clone.
pub fn extract(doc: &mut Document, node: NodeId, axis: Axis, budget: i64) -> Result<NodeId> {
    let dst = doc.shallow_clone(node)?;
    if budget <= 0 {
        return Ok(dst);
    }

    let mut remaining = budget;
    let mut row_budgets: Option<Vec<i64>> = None;
    let mut i = 0;
    while let Some(child) = doc.child_at(node, i) {
        let kind = doc.node(child)?.kind;
        match (kind, axis) {
            (NodeKind::Section(_), _) | (NodeKind::Row, Axis::Column) => {
                let child_budget = if kind == NodeKind::Row {
                    row_budgets
                        .get_or_insert_with(|| span_budgets(doc, node, remaining))
                        .get(i)
                        .copied()
                        .unwrap_or(remaining)
                } else {
                    remaining
                };
                let part = extract(doc, child, axis, child_budget)?;
                doc.append_child(dst, part)?;
                if axis == Axis::Row {
                    remaining -= to_i64(doc.children(part).len());
                }
                if kind.is_section() && doc.children(child).is_empty() {
                    doc.detach(child)?;
                } else {
                    i += 1;
                }
                if axis == Axis::Row && remaining <= 0 {
                    break;
                }
            }
            (NodeKind::Row, Axis::Row) | (NodeKind::Cell { .. }, Axis::Column) => {
                let units = i64::from(doc.node(child)?.col_span.max(1));
                doc.append_child(dst, child)?;
                remaining -= if axis == Axis::Row { 1 } else { units };
                if remaining <= 0 {
                    break;
                }
            }
            _ => i += 1,
        }
    }
    tracing::trace!(%axis, budget, remaining, "extracted {} from {}", dst, node);
    Ok(dst)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::import::{CellDef, GridDef, SectionDef};
    use crate::types::SectionKind;

    fn texts(doc: &Document, root: NodeId) -> Vec<Vec<String>> {
        doc.rows(root)
            .into_iter()
            .map(|r| {
                doc.children(r)
                    .iter()
                    .map(|c| doc.node(*c).unwrap().text.clone())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_column_extract_keeps_every_row() {
        let mut doc = Document::new();
        let table = GridDef::from_rows(&[&[(1, 1); 3], &[(1, 1); 3]]).build(&mut doc).unwrap();
        let left = extract(&mut doc, table, Axis::Column, 1).unwrap();

        assert_eq!(texts(&doc, left), vec![vec!["r0c0"], vec!["r1c0"]]);
        assert_eq!(texts(&doc, table), vec![vec!["r0c1", "r0c2"], vec!["r1c1", "r1c2"]]);
    }

    #[test]
    fn test_column_extract_uses_span_budgets() {
        let mut doc = Document::new();
        let table = GridDef::from_rows(&[&[(2, 2), (1, 1)], &[(1, 1), (1, 1)]]).build(&mut doc).unwrap();
        let left = extract(&mut doc, table, Axis::Column, 2).unwrap();

        // The second row's first two units are covered from above.
        assert_eq!(texts(&doc, left), vec![vec!["r0c0"], vec![]]);
        assert_eq!(texts(&doc, table), vec![vec!["r0c1"], vec!["r1c0", "r1c1"]]);
    }

    #[test]
    fn test_row_extract_prunes_emptied_sections() {
        let row = |t: &str| vec![CellDef::new(t)];
        let def = GridDef {
            sections: vec![
                SectionDef { kind: SectionKind::Head, rows: vec![row("h")] },
                SectionDef { kind: SectionKind::Body, rows: vec![row("a"), row("b")] },
            ],
            ..GridDef::default()
        };
        let mut doc = Document::new();
        let table = def.build(&mut doc).unwrap();
        let top = extract(&mut doc, table, Axis::Row, 2).unwrap();

        assert_eq!(texts(&doc, top), vec![vec!["h"], vec!["a"]]);
        assert_eq!(texts(&doc, table), vec![vec!["b"]]);
        // The head section went to the top half entirely and is gone from the source.
        assert_eq!(doc.children(table).len(), 1);
        assert_eq!(doc.children(top).len(), 2);
    }

    #[test]
    fn test_row_extract_prunes_last_section_when_budget_runs_out() {
        let mut doc = Document::new();
        let table = GridDef::from_rows(&[&[(1, 1)], &[(1, 1)]]).build(&mut doc).unwrap();
        let top = extract(&mut doc, table, Axis::Row, 2).unwrap();

        assert_eq!(doc.rows(top).len(), 2);
        assert!(doc.children(table).is_empty());
    }

    #[test]
    fn test_zero_budget_returns_empty_clone_without_id() {
        let mut doc = Document::new();
        let table = GridDef::from_rows(&[&[(1, 1)]]).build(&mut doc).unwrap();
        doc.set_id(table, "grid").unwrap();
        let left = extract(&mut doc, table, Axis::Column, 0).unwrap();

        assert!(doc.children(left).is_empty());
        assert!(doc.node(left).unwrap().id.is_none());
        assert_eq!(doc.cells(table).len(), 1);
    }

    #[test]
    fn test_wide_cell_overshoots_budget() {
        let mut doc = Document::new();
        let table = GridDef::from_rows(&[&[(1, 1), (3, 1), (1, 1)]]).build(&mut doc).unwrap();
        let left = extract(&mut doc, table, Axis::Column, 2).unwrap();

        assert_eq!(texts(&doc, left), vec![vec!["r0c0", "r0c1"]]);
        assert_eq!(texts(&doc, table), vec![vec!["r0c2"]]);
    }
}
