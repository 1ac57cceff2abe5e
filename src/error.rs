//! Structured error types for tablepanes.

use crate::types::{Axis, NodeId};

/// All errors that can occur while building, splitting or presenting a grid.
#[derive(Debug, thiserror::Error)]
pub enum PanesError {
    /// A cut is negative or larger than the grid can provide after span accounting.
    #[error("Invalid {axis} cut {requested}: grid provides {capacity}")]
    InvalidCut {
        axis: Axis,
        requested: i64,
        capacity: u32,
    },

    /// The node passed as a grid is not a table.
    #[error("Node {0} is not a table")]
    NotATable(NodeId),

    /// The node index does not exist in the document.
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// Unparsable selector in a css or callbacks map.
    #[error("Invalid selector: {0}")]
    Selector(String),

    /// Grid definition or options JSON error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for host-side failures.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PanesError>;

impl From<String> for PanesError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for PanesError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<PanesError> for wasm_bindgen::JsValue {
    fn from(e: PanesError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for PanesError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Other(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
