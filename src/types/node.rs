use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::Length;

/// Index of a node in a [`crate::dom::Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a row group.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Head,
    #[default]
    Body,
    Foot,
}

impl SectionKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Head => "thead",
            Self::Body => "tbody",
            Self::Foot => "tfoot",
        }
    }
}

/// Structural kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Plain block container (pane wrappers).
    Div,
    Table,
    Section(SectionKind),
    Row,
    /// Table cell; `true` for a header cell.
    Cell { header: bool },
}

impl NodeKind {
    /// HTML tag name, also used by selector matching.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Table => "table",
            Self::Section(kind) => kind.tag(),
            Self::Row => "tr",
            Self::Cell { header: true } => "th",
            Self::Cell { header: false } => "td",
        }
    }

    pub fn is_section(self) -> bool {
        matches!(self, Self::Section(_))
    }

    pub fn is_cell(self) -> bool {
        matches!(self, Self::Cell { .. })
    }
}

/// A single node of the arena.
///
/// Parent and children are indices into the owning document; a detached node
/// has no parent.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Unique identifier (the `id` attribute)
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Columns covered by a cell (1 for every other kind)
    pub col_span: u32,
    /// Rows covered by a cell (1 for every other kind)
    pub row_span: u32,
    pub text: String,
    /// Intrinsic content width reported by the host.
    /// When absent the layout host derives it from `text`.
    pub content_width: Option<f32>,
    /// Intrinsic content height reported by the host.
    pub content_height: Option<f32>,
    /// Free-form style properties (overflow, display, css map entries)
    pub style: BTreeMap<String, String>,
    /// Forced width (width, min-width and max-width at once)
    pub fixed_width: Option<Length>,
    /// Forced height (height, min-height and max-height at once)
    pub fixed_height: Option<Length>,
    /// Set on probe rows and their cells.
    pub synthetic: bool,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: None,
            classes: Vec::new(),
            parent: None,
            children: Vec::new(),
            col_span: 1,
            row_span: 1,
            text: String::new(),
            content_width: None,
            content_height: None,
            style: BTreeMap::new(),
            fixed_width: None,
            fixed_height: None,
            synthetic: false,
        }
    }

    /// Create a cell node with the given spans (clamped to at least 1).
    pub fn cell(text: impl Into<String>, col_span: u32, row_span: u32) -> Self {
        Self {
            col_span: col_span.max(1),
            row_span: row_span.max(1),
            text: text.into(),
            ..Self::new(NodeKind::Cell { header: false })
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Copy of the node without identifier, parent or children.
    pub fn shallow_clone(&self) -> Self {
        Self {
            id: None,
            parent: None,
            children: Vec::new(),
            ..self.clone()
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.style.get("display").is_some_and(|d| d == "none")
    }
}
