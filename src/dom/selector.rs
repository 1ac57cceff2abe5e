//! Minimal selector matching for the css and callbacks maps.
//!
//! Supported: `*`, tag names, `#id`, `.class`, compounds such as `div.pane`,
//! the descendant (` `) and child (`>`) combinators, and comma lists.
//! Anything else (attributes, pseudo-classes) is a [`PanesError::Selector`].
//!
//! Matching is scoped to the split container's tree. The browser bridge
//! skips this module and hands the rules to the page's own selector engine.

use super::Document;
use crate::error::{PanesError, Result};
use crate::types::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// One selector of a comma list: compounds joined by combinators,
/// stored right to left for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    subject: Compound,
    ancestors: Vec<(Combinator, Compound)>,
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Complex>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self> {
        let alternatives = source
            .split(',')
            .map(|part| parse_complex(part).ok_or_else(|| PanesError::Selector(source.to_string())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { alternatives })
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.alternatives.iter().any(|c| c.matches(doc, node))
    }

    /// Matching nodes under `root` (inclusive) in document order.
    pub fn select(&self, doc: &Document, root: NodeId) -> Vec<NodeId> {
        std::iter::once(root)
            .chain(doc.descendants(root))
            .filter(|id| self.matches(doc, *id))
            .collect()
    }
}

fn parse_complex(source: &str) -> Option<Complex> {
    let spaced = source.replace('>', " > ");
    let mut parts = Vec::new();
    let mut links = Vec::new();
    let mut pending = None;
    for token in spaced.split_whitespace() {
        if token == ">" {
            if parts.is_empty() || pending.is_some() {
                return None;
            }
            pending = Some(Combinator::Child);
            continue;
        }
        if !parts.is_empty() {
            links.push(pending.take().unwrap_or(Combinator::Descendant));
        }
        parts.push(parse_compound(token)?);
    }
    if pending.is_some() {
        return None;
    }
    let subject = parts.pop()?;
    // links[i] joins parts[i] to parts[i + 1]; walk them towards the root.
    let ancestors = links.into_iter().zip(parts).rev().collect();
    Some(Complex { subject, ancestors })
}

fn parse_compound(token: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut rest = token;
    let head_len = rest.find(['#', '.']).unwrap_or(rest.len());
    let (head, tail) = rest.split_at(head_len);
    if !head.is_empty() && head != "*" {
        if !head.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        compound.tag = Some(head.to_ascii_lowercase());
    }
    rest = tail;
    while let Some(marker) = rest.chars().next() {
        let body = rest.get(1..)?;
        let len = body.find(['#', '.']).unwrap_or(body.len());
        let (name, next) = body.split_at(len);
        if name.is_empty() {
            return None;
        }
        match marker {
            '#' => compound.id = Some(name.to_string()),
            _ => compound.classes.push(name.to_string()),
        }
        rest = next;
    }
    Some(compound)
}

impl Compound {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(n) = doc.get(node) else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|t| t != n.kind.tag()) {
            return false;
        }
        if self.id.is_some() && self.id != n.id {
            return false;
        }
        self.classes.iter().all(|c| n.has_class(c))
    }
}

impl Complex {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.subject.matches(doc, node) && Self::match_ancestors(&self.ancestors, doc, node)
    }

    fn match_ancestors(rest: &[(Combinator, Compound)], doc: &Document, node: NodeId) -> bool {
        let Some(((combinator, compound), remaining)) = rest.split_first() else {
            return true;
        };
        match combinator {
            Combinator::Child => doc.parent(node).is_some_and(|p| {
                compound.matches(doc, p) && Self::match_ancestors(remaining, doc, p)
            }),
            Combinator::Descendant => doc
                .ancestors(node)
                .any(|a| compound.matches(doc, a) && Self::match_ancestors(remaining, doc, a)),
        }
    }
}
