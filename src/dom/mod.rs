//! Arena-backed node tree.
//!
//! Nodes are addressed by [`NodeId`] and never freed; detaching a node only
//! unlinks it from its parent. "Moving" a node is a detach followed by an
//! append, which rewrites the parent index and splices both child lists.

mod html;
mod selector;

pub use html::to_html;
pub use selector::Selector;

use crate::error::{PanesError, Result};
use crate::types::{Length, Node, NodeId, NodeKind};

/// Owner of every node of one or more tables and their pane wrappers.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever created (attached or not).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a detached node to the arena.
    pub fn create(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn create_element(&mut self, kind: NodeKind) -> NodeId {
        self.create(Node::new(kind))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(PanesError::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(PanesError::UnknownNode(id))
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(|n| n.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of `id`; empty for unknown nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Unlink `id` from its parent. Detached nodes are left untouched.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|c| *c != id);
            self.node_mut(id)?.parent = None;
        }
        Ok(())
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.check_link(parent, child)?;
        self.detach(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(child)
    }

    /// Move `child` to the front of `parent`'s children.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.check_link(parent, child)?;
        self.detach(child)?;
        self.node_mut(parent)?.children.insert(0, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(child)
    }

    /// Move `node` right before `reference` under the same parent.
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) -> Result<()> {
        let parent = self
            .node(reference)?
            .parent
            .ok_or_else(|| PanesError::Other(format!("node {reference} has no parent")))?;
        self.insert_at(parent, node, |children| {
            children.iter().position(|c| *c == reference)
        })
    }

    /// Move `node` right after `reference` under the same parent.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> Result<()> {
        let parent = self
            .node(reference)?
            .parent
            .ok_or_else(|| PanesError::Other(format!("node {reference} has no parent")))?;
        self.insert_at(parent, node, |children| {
            children.iter().position(|c| *c == reference).map(|i| i + 1)
        })
    }

    fn insert_at(
        &mut self,
        parent: NodeId,
        node: NodeId,
        position: impl Fn(&[NodeId]) -> Option<usize>,
    ) -> Result<()> {
        self.check_link(parent, node)?;
        self.detach(node)?;
        let children = &mut self.node_mut(parent)?.children;
        let at = position(children).unwrap_or(children.len());
        children.insert(at, node);
        self.node_mut(node)?.parent = Some(parent);
        Ok(())
    }

    /// Put `wrapper` in `node`'s place and move `node` inside it.
    pub fn wrap(&mut self, node: NodeId, wrapper: NodeId) -> Result<NodeId> {
        if self.node(node)?.parent.is_some() {
            self.insert_before(node, wrapper)?;
        }
        self.append_child(wrapper, node)?;
        Ok(wrapper)
    }

    fn check_link(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(child)?;
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(PanesError::Other(format!(
                "cannot move {child} under its own descendant {parent}"
            )));
        }
        Ok(())
    }

    /// Detached copy of `id` without identifier or children.
    pub fn shallow_clone(&mut self, id: NodeId) -> Result<NodeId> {
        let copy = self.node(id)?.shallow_clone();
        Ok(self.create(copy))
    }

    /// Detached copy of the whole sub-tree. Identifiers are not copied.
    pub fn deep_clone(&mut self, id: NodeId) -> Result<NodeId> {
        let copy = self.shallow_clone(id)?;
        let children = self.children(id).to_vec();
        for child in children {
            let child_copy = self.deep_clone(child)?;
            self.append_child(copy, child_copy)?;
        }
        Ok(copy)
    }

    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |p| self.parent(*p))
    }

    /// Topmost ancestor of `id` (itself when detached).
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// All nodes below `root` in document order, excluding `root`.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Every row below `root` in document order.
    pub fn rows(&self, root: NodeId) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.kind(*id) == Some(NodeKind::Row))
            .collect()
    }

    pub fn row_at(&self, root: NodeId, index: usize) -> Option<NodeId> {
        self.rows(root).get(index).copied()
    }

    /// Every cell below `root` in document order.
    pub fn cells(&self, root: NodeId) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.kind(*id).is_some_and(NodeKind::is_cell))
            .collect()
    }

    /// Look up a node by identifier.
    pub fn find_by_id(&self, ident: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .find(|(_, n)| n.id.as_deref() == Some(ident))
            .map(|(i, _)| NodeId(i))
    }

    pub fn set_id(&mut self, id: NodeId, ident: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.id = Some(ident.into());
        Ok(())
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        self.node_mut(id)?.add_class(class);
        Ok(())
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: impl Into<String>) -> Result<()> {
        self.node_mut(id)?
            .style
            .insert(property.to_string(), value.into());
        Ok(())
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.get(id)
            .and_then(|n| n.style.get(property))
            .map(String::as_str)
    }

    /// Force width, min-width and max-width of a node.
    pub fn fix_width(&mut self, id: NodeId, value: impl Into<Length>) -> Result<()> {
        self.node_mut(id)?.fixed_width = Some(value.into());
        Ok(())
    }

    /// Force height, min-height and max-height of a node.
    pub fn fix_height(&mut self, id: NodeId, value: impl Into<Length>) -> Result<()> {
        self.node_mut(id)?.fixed_height = Some(value.into());
        Ok(())
    }
}
