//! Grid definitions: the JSON shape of an unsplit table.
//!
//! ```json
//! {
//!   "id": "prices",
//!   "sections": [
//!     { "kind": "head", "rows": [[{ "text": "Item", "header": true, "rowSpan": 2 }]] },
//!     { "kind": "body", "rows": [[{ "text": "Apple", "width": 48 }]] }
//!   ]
//! }
//! ```
//!
//! A definition may list `rows` directly instead of `sections`; those rows
//! are placed straight under the table.

use serde::{Deserialize, Serialize};

use crate::dom::Document;
use crate::error::Result;
use crate::types::{Node, NodeId, NodeKind, SectionKind};

/// One cell of a grid definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellDef {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col_span: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,
    pub header: bool,
    /// Intrinsic content width in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Intrinsic content height in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

/// A row group of a grid definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionDef {
    pub kind: SectionKind,
    pub rows: Vec<Vec<CellDef>>,
}

/// A whole table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub sections: Vec<SectionDef>,
    pub rows: Vec<Vec<CellDef>>,
}

impl CellDef {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn span(mut self, col_span: u32, row_span: u32) -> Self {
        self.col_span = Some(col_span);
        self.row_span = Some(row_span);
        self
    }

    fn to_node(&self) -> Node {
        let mut node = Node::cell(
            self.text.clone(),
            self.col_span.unwrap_or(1),
            self.row_span.unwrap_or(1),
        );
        node.kind = NodeKind::Cell {
            header: self.header,
        };
        node.content_width = self.width;
        node.content_height = self.height;
        node
    }
}

impl GridDef {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Single-body grid from `(col_span, row_span)` pairs; cell text is `r{row}c{index}`.
    pub fn from_rows(rows: &[&[(u32, u32)]]) -> Self {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(r, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(|(c, (cs, rs))| CellDef::new(format!("r{r}c{c}")).span(*cs, *rs))
                    .collect()
            })
            .collect();
        Self {
            sections: vec![SectionDef {
                kind: SectionKind::Body,
                rows,
            }],
            ..Self::default()
        }
    }

    /// Build the table into `doc` and return the (detached) table node.
    pub fn build(&self, doc: &mut Document) -> Result<NodeId> {
        let table = doc.create_element(NodeKind::Table);
        if let Some(id) = &self.id {
            doc.set_id(table, id.clone())?;
        }
        Self::build_rows(doc, table, &self.rows)?;
        for section in &self.sections {
            let group = doc.create_element(NodeKind::Section(section.kind));
            doc.append_child(table, group)?;
            Self::build_rows(doc, group, &section.rows)?;
        }
        Ok(table)
    }

    fn build_rows(doc: &mut Document, parent: NodeId, rows: &[Vec<CellDef>]) -> Result<()> {
        for cells in rows {
            let row = doc.create_element(NodeKind::Row);
            doc.append_child(parent, row)?;
            for cell in cells {
                let node = doc.create(cell.to_node());
                doc.append_child(row, node)?;
            }
        }
        Ok(())
    }
}
