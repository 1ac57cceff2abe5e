//! Live elements behind arena nodes.

use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlTableCellElement, HtmlTableElement};

use crate::dom::Document;
use crate::error::Result;
use crate::layout::{BoxEdges, Host};
use crate::types::{Length, Node, NodeId, NodeKind, SectionKind};

/// Host that measures and sizes the rendered elements mirrored by the
/// arena. Nodes without an element measure as zero.
#[derive(Debug, Default)]
pub(crate) struct DomHost {
    elements: HashMap<NodeId, HtmlElement>,
}

impl DomHost {
    pub(crate) fn element(&self, node: NodeId) -> Option<&HtmlElement> {
        self.elements.get(&node)
    }

    /// Read `table` into `doc`. Cell content sizes are taken from the
    /// rendered cells so the layout host sees the same columns the browser
    /// drew.
    pub(crate) fn import(&mut self, doc: &mut Document, table: &HtmlTableElement) -> Result<NodeId> {
        let root = self.adopt(doc, table, Node::new(NodeKind::Table));
        let children = table.children();
        for i in 0..children.length() {
            let Some(child) = children.item(i) else {
                continue;
            };
            let kind = match child.tag_name().to_ascii_lowercase().as_str() {
                "thead" => NodeKind::Section(SectionKind::Head),
                "tbody" => NodeKind::Section(SectionKind::Body),
                "tfoot" => NodeKind::Section(SectionKind::Foot),
                "tr" => {
                    self.import_row(doc, root, &child)?;
                    continue;
                }
                _ => continue,
            };
            let section = self.adopt(doc, &child, Node::new(kind));
            doc.append_child(root, section)?;
            let rows = child.children();
            for r in 0..rows.length() {
                if let Some(row) = rows.item(r) {
                    self.import_row(doc, section, &row)?;
                }
            }
        }
        Ok(root)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn import_row(&mut self, doc: &mut Document, parent: NodeId, row: &Element) -> Result<()> {
        if !row.tag_name().eq_ignore_ascii_case("tr") {
            return Ok(());
        }
        let row_id = self.adopt(doc, row, Node::new(NodeKind::Row));
        doc.append_child(parent, row_id)?;
        let cells = row.children();
        for c in 0..cells.length() {
            let Some(cell) = cells.item(c) else {
                continue;
            };
            let Some(td) = cell.dyn_ref::<HtmlTableCellElement>() else {
                continue;
            };
            let rect = cell.get_bounding_client_rect();
            let mut node = Node::cell(
                cell.text_content().unwrap_or_default(),
                td.col_span(),
                td.row_span(),
            );
            node.kind = NodeKind::Cell {
                header: cell.tag_name().eq_ignore_ascii_case("th"),
            };
            // Widths are frozen as content box. Heights stay border box:
            // they only feed row heights, which cover padding and borders.
            let (width, _) = edges(&cell).content_of_border_box(rect.width() as f32, 0.0);
            node.content_width = Some(width);
            node.content_height = Some(rect.height() as f32);
            let id = self.adopt(doc, &cell, node);
            doc.append_child(row_id, id)?;
        }
        Ok(())
    }

    fn adopt(&mut self, doc: &mut Document, element: &Element, mut node: Node) -> NodeId {
        let id = element.id();
        if !id.is_empty() {
            node.id = Some(id);
        }
        node.classes = element
            .class_name()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let node_id = doc.create(node);
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            self.elements.insert(node_id, html.clone());
        }
        node_id
    }

    /// Mirror the sub-tree at `root` into live elements, creating elements
    /// for nodes that have none and moving existing ones into place. Cell
    /// content is never touched.
    pub(crate) fn write_back(
        &mut self,
        document: &web_sys::Document,
        doc: &Document,
        root: NodeId,
    ) -> std::result::Result<HtmlElement, JsValue> {
        let node = doc.node(root)?;
        let element = match self.elements.get(&root) {
            Some(element) => element.clone(),
            None => {
                let element: HtmlElement = document.create_element(node.kind.tag())?.dyn_into()?;
                if node.kind.is_cell() {
                    element.set_text_content(Some(&node.text));
                }
                self.elements.insert(root, element.clone());
                element
            }
        };
        if let Some(id) = &node.id {
            element.set_id(id);
        } else {
            element.remove_attribute("id")?;
        }
        if !node.classes.is_empty() {
            element.set_class_name(&node.classes.join(" "));
        }
        if let Some(td) = element.dyn_ref::<HtmlTableCellElement>() {
            td.set_col_span(node.col_span);
            td.set_row_span(node.row_span);
        }
        let style = element.style();
        for (property, value) in &node.style {
            style.set_property(property, value)?;
        }
        if let Some(width) = &node.fixed_width {
            set_size(&element, "width", width)?;
        }
        if let Some(height) = &node.fixed_height {
            set_size(&element, "height", height)?;
        }
        if !node.kind.is_cell() {
            for &child in &node.children {
                let child = self.write_back(document, doc, child)?;
                element.append_child(&child)?;
            }
        }
        Ok(element)
    }

    /// Remove elements whose nodes were pruned from the tree.
    pub(crate) fn remove_orphans(&self, doc: &Document, keep: NodeId) {
        for (&node, element) in &self.elements {
            if node != keep && doc.parent(node).is_none() {
                element.remove();
            }
        }
    }
}

/// Set a dimension and its min/max bounds at once.
fn set_size(element: &HtmlElement, dimension: &str, value: &Length) -> std::result::Result<(), JsValue> {
    let value = value.to_string();
    let style = element.style();
    style.set_property(dimension, &value)?;
    style.set_property(&format!("min-{dimension}"), &value)?;
    style.set_property(&format!("max-{dimension}"), &value)
}

/// Padding and border widths from the element's computed style.
fn edges(element: &Element) -> BoxEdges {
    let Some(style) = web_sys::window().and_then(|w| w.get_computed_style(element).ok().flatten())
    else {
        return BoxEdges::default();
    };
    BoxEdges::from_computed(|property| style.get_property_value(property).ok())
}

/// Content box of an element: its padding box minus the padding.
fn content_size(element: &HtmlElement) -> (f32, f32) {
    edges(element).content_of_padding_box(
        element.client_width() as f32,
        element.client_height() as f32,
    )
}

impl Host for DomHost {
    fn width(&self, _doc: &Document, node: NodeId) -> f32 {
        self.element(node).map_or(0.0, |e| content_size(e).0)
    }

    fn height(&self, _doc: &Document, node: NodeId) -> f32 {
        self.element(node).map_or(0.0, |e| content_size(e).1)
    }

    fn outer_width(&self, _doc: &Document, node: NodeId) -> f32 {
        self.element(node).map_or(0.0, |e| e.offset_width() as f32)
    }

    fn outer_height(&self, _doc: &Document, node: NodeId) -> f32 {
        self.element(node).map_or(0.0, |e| e.offset_height() as f32)
    }

    fn force_width(&mut self, doc: &mut Document, node: NodeId, value: Length) -> Result<()> {
        if let Some(element) = self.element(node) {
            set_size(element, "width", &value)?;
        }
        doc.fix_width(node, value)
    }

    fn force_height(&mut self, doc: &mut Document, node: NodeId, value: Length) -> Result<()> {
        if let Some(element) = self.element(node) {
            set_size(element, "height", &value)?;
        }
        doc.fix_height(node, value)
    }
}
