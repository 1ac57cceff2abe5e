//! Selector-keyed CSS properties and event bindings.

use serde::{Deserialize, Serialize};

use crate::dom::{Document, Selector};
use crate::error::Result;
use crate::options::{CallbackSpec, CssMap, OneOrMany, Rules};
use crate::types::NodeId;

/// Set every property of every rule on the nodes its selector matches
/// under `root`. Returns the number of nodes touched, counting repeats.
pub fn apply_css(doc: &mut Document, root: NodeId, css: &Rules<CssMap>) -> Result<usize> {
    let mut touched = 0;
    for (source, properties) in css.iter() {
        let selector = Selector::parse(source)?;
        for node in selector.select(doc, root) {
            for (property, value) in properties.iter() {
                doc.set_style(node, property, value.to_css(property))?;
            }
            touched += 1;
        }
    }
    Ok(touched)
}

/// Receives one call per matched node and callback descriptor.
pub trait EventBinder {
    fn bind(&mut self, doc: &Document, node: NodeId, callback: &CallbackSpec) -> Result<()>;
}

/// One recorded binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub node: NodeId,
    pub event: String,
    pub func: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Binder that only records what it was asked to bind.
#[derive(Debug, Clone, Default)]
pub struct BindingLog {
    pub bindings: Vec<Binding>,
}

impl EventBinder for BindingLog {
    fn bind(&mut self, _doc: &Document, node: NodeId, callback: &CallbackSpec) -> Result<()> {
        self.bindings.push(Binding {
            node,
            event: callback.event.clone(),
            func: callback.func.clone(),
            data: callback.data.clone(),
        });
        Ok(())
    }
}

/// Hand every callback descriptor to `binder`, once per matched node.
pub fn bind_callbacks(
    doc: &Document,
    root: NodeId,
    callbacks: &Rules<OneOrMany<CallbackSpec>>,
    binder: &mut dyn EventBinder,
) -> Result<()> {
    for (source, specs) in callbacks.iter() {
        let selector = Selector::parse(source)?;
        let nodes = selector.select(doc, root);
        for spec in specs.as_slice() {
            for &node in &nodes {
                binder.bind(doc, node, spec)?;
            }
        }
    }
    Ok(())
}
