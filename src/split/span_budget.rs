//! Per-row extraction budgets for a column split.
//!
//! A column split asks every row of a container for the same number of
//! column units. Cells spanning several rows already occupy their columns in
//! the rows below them, so those rows owe fewer units of their own.

use crate::dom::Document;
use crate::types::{NodeId, NodeKind};

/// Corrected budget for every child row of `container`.
///
/// Starts at `budget` for each row, then walks the rows top to bottom. Every
/// cell that row `i` will hand over (its starting unit lies below the row's
/// own budget) and that spans `n > 1` rows subtracts its `col_span` from the
/// budgets of rows `i + 1 ..= i + n - 1`, clipped to the container.
///
/// Budgets may become zero or negative; a row with a non-positive budget
/// hands over nothing.
pub fn span_budgets(doc: &Document, container: NodeId, budget: i64) -> Vec<i64> {
    let rows = doc.children(container);
    let mut budgets = vec![budget; rows.len()];

    for (i, &row) in rows.iter().enumerate() {
        if doc.kind(row) != Some(NodeKind::Row) {
            continue;
        }
        let own = budgets.get(i).copied().unwrap_or(budget);
        let mut used: i64 = 0;
        for &cell in doc.children(row) {
            if used >= own {
                break;
            }
            let Some(node) = doc.get(cell) else {
                continue;
            };
            let col_span = i64::from(node.col_span.max(1));
            used += col_span;
            let row_span = node.row_span as usize;
            for below in budgets.iter_mut().skip(i + 1).take(row_span.saturating_sub(1)) {
                *below -= col_span;
            }
        }
    }
    budgets
}
