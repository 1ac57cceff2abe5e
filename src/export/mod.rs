//! Export of a split grid.
//!
//! Two forms are produced: a serializable snapshot of the pane set
//! ([`PaneSetSnapshot`]) and the HTML of the whole container.

mod snapshot;

pub use snapshot::{CellSnapshot, GridSnapshot, PaneSetSnapshot, QuadrantSnapshot, RowSnapshot, SectionSnapshot};

use crate::dom::{self, Document};
use crate::panes::PaneSet;

/// HTML of the container and everything inside it.
pub fn to_html(doc: &Document, panes: &PaneSet) -> String {
    dom::to_html(doc, panes.container)
}
