//! Serializable view of a split grid.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dom::Document;
use crate::error::Result;
use crate::panes::PaneSet;
use crate::present::Binding;
use crate::types::{Diagnostic, Length, NodeId, NodeKind, Quadrant, ScrollOffset, SectionKind};

fn is_one(n: &u32) -> bool {
    *n == 1
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// One cell of a derived grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellSnapshot {
    pub text: String,
    #[serde(default = "one", skip_serializing_if = "is_one")]
    pub col_span: u32,
    #[serde(default = "one", skip_serializing_if = "is_one")]
    pub row_span: u32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub header: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Length>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub synthetic: bool,
}

fn one() -> u32 {
    1
}

/// One row with its forced height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Length>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub synthetic: bool,
    pub cells: Vec<CellSnapshot>,
}

/// A row group. `kind` is absent for rows placed directly under the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SectionKind>,
    pub rows: Vec<RowSnapshot>,
}

/// One derived grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub sections: Vec<SectionSnapshot>,
}

impl GridSnapshot {
    pub fn capture(doc: &Document, table: NodeId) -> Result<Self> {
        let node = doc.node(table)?;
        let mut sections: Vec<SectionSnapshot> = Vec::new();
        for &child in &node.children {
            match doc.node(child)?.kind {
                NodeKind::Section(kind) => sections.push(SectionSnapshot {
                    kind: Some(kind),
                    rows: doc
                        .children(child)
                        .iter()
                        .map(|r| capture_row(doc, *r))
                        .collect::<Result<_>>()?,
                }),
                NodeKind::Row => {
                    let row = capture_row(doc, child)?;
                    match sections.last_mut() {
                        Some(group) if group.kind.is_none() => group.rows.push(row),
                        _ => sections.push(SectionSnapshot {
                            kind: None,
                            rows: vec![row],
                        }),
                    }
                }
                _ => {}
            }
        }
        Ok(Self {
            id: node.id.clone(),
            classes: node.classes.clone(),
            sections,
        })
    }

    /// Every row in order, across sections.
    pub fn rows(&self) -> impl Iterator<Item = &RowSnapshot> {
        self.sections.iter().flat_map(|s| s.rows.iter())
    }

    /// Text of every cell, row by row.
    pub fn texts(&self) -> Vec<Vec<String>> {
        self.rows()
            .map(|r| r.cells.iter().map(|c| c.text.clone()).collect())
            .collect()
    }
}

fn capture_row(doc: &Document, row: NodeId) -> Result<RowSnapshot> {
    let node = doc.node(row)?;
    let cells = node
        .children
        .iter()
        .map(|c| {
            let cell = doc.node(*c)?;
            Ok(CellSnapshot {
                text: cell.text.clone(),
                col_span: cell.col_span,
                row_span: cell.row_span,
                header: cell.kind == NodeKind::Cell { header: true },
                width: cell.fixed_width.clone(),
                synthetic: cell.synthetic,
            })
        })
        .collect::<Result<_>>()?;
    Ok(RowSnapshot {
        height: node.fixed_height.clone(),
        synthetic: node.synthetic,
        cells,
    })
}

/// One pane: its wrapper and the grid inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantSnapshot {
    pub quadrant: Quadrant,
    pub id: String,
    pub classes: Vec<String>,
    pub style: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Length>,
    pub offset: ScrollOffset,
    pub grid: GridSnapshot,
}

/// The whole split grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaneSetSnapshot {
    pub container: String,
    pub left: String,
    pub right: String,
    pub prefix: String,
    pub row_heights: Vec<f32>,
    pub quadrants: Vec<QuadrantSnapshot>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

impl PaneSetSnapshot {
    pub fn capture(doc: &Document, panes: &PaneSet) -> Result<Self> {
        let id_of = |node: NodeId| -> Result<String> {
            Ok(doc.node(node)?.id.clone().unwrap_or_default())
        };
        let quadrants = Quadrant::ALL
            .into_iter()
            .map(|q| {
                let pane = doc.node(panes.pane(q))?;
                Ok(QuadrantSnapshot {
                    quadrant: q,
                    id: pane.id.clone().unwrap_or_default(),
                    classes: pane.classes.clone(),
                    style: pane.style.clone(),
                    width: pane.fixed_width.clone(),
                    height: pane.fixed_height.clone(),
                    offset: panes.offset(q),
                    grid: GridSnapshot::capture(doc, panes.table(q))?,
                })
            })
            .collect::<Result<_>>()?;
        Ok(Self {
            container: id_of(panes.container)?,
            left: id_of(panes.left)?,
            right: id_of(panes.right)?,
            prefix: panes.prefix.clone(),
            row_heights: panes.row_heights.clone(),
            quadrants,
            diagnostics: panes.diagnostics.clone(),
            bindings: panes.bindings.clone(),
        })
    }

    pub fn quadrant(&self, quadrant: Quadrant) -> Option<&QuadrantSnapshot> {
        self.quadrants.iter().find(|q| q.quadrant == quadrant)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::import::GridDef;

    #[test]
    fn test_direct_rows_are_grouped() {
        let mut doc = Document::new();
        let def = GridDef::from_json(
            r#"{"rows":[[{"text":"a"}],[{"text":"b","header":true,"colSpan":2}]],
                "sections":[{"kind":"foot","rows":[[{"text":"f"}]]}]}"#,
        )
        .unwrap();
        let table = def.build(&mut doc).unwrap();
        let grid = GridSnapshot::capture(&doc, table).unwrap();

        assert_eq!(grid.sections.len(), 2);
        assert_eq!(grid.sections[0].kind, None);
        assert_eq!(grid.sections[1].kind, Some(SectionKind::Foot));
        assert_eq!(grid.texts(), vec![vec!["a"], vec!["b"], vec!["f"]]);
        let b = &grid.sections[0].rows[1].cells[0];
        assert!(b.header);
        assert_eq!(b.col_span, 2);
    }

    #[test]
    fn test_default_spans_are_omitted() {
        let cell = CellSnapshot {
            text: "x".into(),
            col_span: 1,
            row_span: 3,
            header: false,
            width: None,
            synthetic: false,
        };
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json, serde_json::json!({"text": "x", "rowSpan": 3}));
    }
}
