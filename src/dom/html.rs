//! HTML serialization of a sub-tree.

use std::fmt::Write;

use super::Document;
use crate::types::{Node, NodeId};

/// Serialize `root` and everything below it.
pub fn to_html(doc: &Document, root: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, root, 0, &mut out);
    out
}

fn write_node(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = doc.get(id) else {
        return;
    };
    let tag = node.kind.tag();
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}<{tag}{}>", attributes(node));
    if node.children.is_empty() {
        let _ = writeln!(out, "{}</{tag}>", escape(&node.text));
        return;
    }
    out.push('\n');
    for child in &node.children {
        write_node(doc, *child, depth + 1, out);
    }
    let _ = writeln!(out, "{indent}</{tag}>");
}

fn attributes(node: &Node) -> String {
    let mut attrs = String::new();
    if let Some(id) = &node.id {
        let _ = write!(attrs, " id=\"{}\"", escape(id));
    }
    if !node.classes.is_empty() {
        let _ = write!(attrs, " class=\"{}\"", escape(&node.classes.join(" ")));
    }
    if node.col_span > 1 {
        let _ = write!(attrs, " colspan=\"{}\"", node.col_span);
    }
    if node.row_span > 1 {
        let _ = write!(attrs, " rowspan=\"{}\"", node.row_span);
    }
    let style = style_attribute(node);
    if !style.is_empty() {
        let _ = write!(attrs, " style=\"{}\"", escape(&style));
    }
    attrs
}

/// Inline style text: forced sizes first, then the free-form properties.
pub(crate) fn style_attribute(node: &Node) -> String {
    let mut decls = Vec::new();
    if let Some(w) = &node.fixed_width {
        decls.push(format!("width: {w}; min-width: {w}; max-width: {w}"));
    }
    if let Some(h) = &node.fixed_height {
        decls.push(format!("height: {h}; min-height: {h}; max-height: {h}"));
    }
    decls.extend(node.style.iter().map(|(k, v)| format!("{k}: {v}")));
    decls.join("; ")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
