use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Axis, NodeId};

/// Non-fatal findings produced while splitting.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// A spanning cell crosses the cut. It moves whole, by its starting
    /// position, so alignment of the covered columns/rows is not guaranteed.
    #[serde(rename_all = "camelCase")]
    SpanOverrun {
        axis: Axis,
        cell: NodeId,
        /// First row or column the cell occupies
        start: u32,
        span: u32,
        cut: u32,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpanOverrun {
                axis,
                cell,
                start,
                span,
                cut,
            } => write!(
                f,
                "cell {cell} spans {axis}s {start}..{} across the {axis} cut at {cut}",
                start + span
            ),
        }
    }
}
