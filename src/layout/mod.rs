//! Measuring and freezing node sizes.
//!
//! This module handles:
//! - The [`Host`] seam: "measure the rendered size of a node" and "force the
//!   size of a node"
//! - [`LayoutHost`], a deterministic host backed by automatic table layout
//! - Row height and column width synchronization across a split

mod dimensions;
mod edges;
mod table_layout;

pub use dimensions::{
    apply_row_heights, fix_column_widths, freeze_row_widths, measure_row_heights,
    refix_column_widths, ProbeRow, RowBand,
};
pub use edges::BoxEdges;
pub use table_layout::{CellRect, TableLayout};

use crate::dom::Document;
use crate::error::Result;
use crate::types::{Length, NodeId, NodeKind};

/// Rendering environment primitives used by the synchronizer and the fit
/// collaborator.
pub trait Host {
    /// Rendered content width of a node.
    fn width(&self, doc: &Document, node: NodeId) -> f32;

    /// Rendered content height of a node.
    fn height(&self, doc: &Document, node: NodeId) -> f32;

    /// Width including margins, borders and padding.
    fn outer_width(&self, doc: &Document, node: NodeId) -> f32 {
        self.width(doc, node)
    }

    /// Height including margins, borders and padding.
    fn outer_height(&self, doc: &Document, node: NodeId) -> f32 {
        self.height(doc, node)
    }

    /// Force width, min-width and max-width.
    fn force_width(&mut self, doc: &mut Document, node: NodeId, value: Length) -> Result<()> {
        doc.fix_width(node, value)
    }

    /// Force height, min-height and max-height.
    fn force_height(&mut self, doc: &mut Document, node: NodeId, value: Length) -> Result<()> {
        doc.fix_height(node, value)
    }
}

/// Text measurement used when a cell carries no intrinsic size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Advance of one character in pixels
    pub char_width: f32,
    /// Height of one text line in pixels
    pub line_height: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 18.0,
        }
    }
}

impl TextMetrics {
    pub fn content_width(&self, node: &crate::types::Node) -> f32 {
        node.content_width.unwrap_or_else(|| {
            let widest = node.text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            widest as f32 * self.char_width
        })
    }

    pub fn content_height(&self, node: &crate::types::Node) -> f32 {
        node.content_height
            .unwrap_or_else(|| node.text.lines().count() as f32 * self.line_height)
    }
}

/// Host that lays tables out itself instead of asking a renderer.
///
/// Divs stack their children vertically unless the div is a flex or table
/// container, or a child is inline-block, a table cell, or floated, in which
/// case children sit side by side.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutHost {
    pub metrics: TextMetrics,
}

impl LayoutHost {
    pub fn new(metrics: TextMetrics) -> Self {
        Self { metrics }
    }

    fn enclosing_table(doc: &Document, node: NodeId) -> Option<NodeId> {
        std::iter::once(node)
            .chain(doc.ancestors(node))
            .find(|id| doc.kind(*id) == Some(NodeKind::Table))
    }

    fn is_hidden(doc: &Document, node: NodeId) -> bool {
        std::iter::once(node)
            .chain(doc.ancestors(node))
            .any(|id| doc.get(id).is_some_and(crate::types::Node::is_hidden))
    }

    fn horizontal(doc: &Document, div: NodeId) -> bool {
        if matches!(doc.style(div, "display"), Some("flex" | "table")) {
            return true;
        }
        doc.children(div).iter().any(|c| {
            matches!(doc.style(*c, "display"), Some("inline-block" | "table-cell"))
                || doc.style(*c, "float").is_some_and(|f| f != "none")
        })
    }

    fn parent_width(&self, doc: &Document, node: NodeId) -> Option<f32> {
        doc.parent(node).map(|p| self.width(doc, p))
    }

    fn parent_height(&self, doc: &Document, node: NodeId) -> Option<f32> {
        let parent = doc.parent(node)?;
        doc.get(parent)?.fixed_height.as_ref()?;
        Some(self.height(doc, parent))
    }

    fn table_measure(&self, doc: &Document, node: NodeId, width: bool) -> f32 {
        let Some(table) = Self::enclosing_table(doc, node) else {
            return doc.get(node).map_or(0.0, |n| {
                if width {
                    self.metrics.content_width(n)
                } else {
                    self.metrics.content_height(n)
                }
            });
        };
        let layout = TableLayout::compute(doc, table, &self.metrics);
        match doc.kind(node) {
            Some(NodeKind::Cell { .. }) => layout
                .cell_rect(node)
                .map_or(0.0, |r| if width { r.width } else { r.height }),
            Some(NodeKind::Row) if !width => layout.row_height_of(node).unwrap_or(0.0),
            Some(NodeKind::Section(_)) if !width => doc
                .rows(node)
                .iter()
                .filter_map(|r| layout.row_height_of(*r))
                .sum(),
            _ if width => layout.total_width(),
            _ => layout.total_height(),
        }
    }
}

impl Host for LayoutHost {
    fn width(&self, doc: &Document, node: NodeId) -> f32 {
        let Some(n) = doc.get(node) else {
            return 0.0;
        };
        if Self::is_hidden(doc, node) {
            return 0.0;
        }
        if n.kind != NodeKind::Div {
            return self.table_measure(doc, node, true);
        }
        if let Some(fixed) = &n.fixed_width {
            if let Some(px) = fixed.resolve(self.parent_width(doc, node)) {
                return px;
            }
        }
        let widths = n.children.iter().map(|c| self.outer_width(doc, *c));
        if Self::horizontal(doc, node) {
            widths.sum()
        } else {
            widths.fold(0.0, f32::max)
        }
    }

    fn height(&self, doc: &Document, node: NodeId) -> f32 {
        let Some(n) = doc.get(node) else {
            return 0.0;
        };
        if Self::is_hidden(doc, node) {
            return 0.0;
        }
        if n.kind != NodeKind::Div {
            return self.table_measure(doc, node, false);
        }
        if let Some(fixed) = &n.fixed_height {
            if let Some(px) = fixed.resolve(self.parent_height(doc, node)) {
                return px;
            }
        }
        let heights = n.children.iter().map(|c| self.outer_height(doc, *c));
        if Self::horizontal(doc, node) {
            heights.fold(0.0, f32::max)
        } else {
            heights.sum()
        }
    }
}
