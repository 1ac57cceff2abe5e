//! Fitting the scrolling panes into the container.
//!
//! The bottom-right pane takes whatever the container has left after the
//! left column and the top row. The horizontal and vertical overheads of the
//! wrappers (borders, scrollbars) are measured once when fit is installed
//! and subtracted on every resize.

use serde::{Deserialize, Serialize};

use crate::dom::Document;
use crate::error::Result;
use crate::layout::Host;
use crate::panes::PaneSet;
use crate::types::{Length, Quadrant};

/// Overheads measured when fit was installed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Fit {
    /// Right wrapper outer width minus the top-right pane width
    pub dw: f32,
    /// Bottom-left pane outer height minus its inner height
    pub dh: f32,
}

impl Fit {
    pub fn measure<H: Host + ?Sized>(host: &H, doc: &Document, panes: &PaneSet) -> Self {
        let bottom_left = panes.pane(Quadrant::BottomLeft);
        Self {
            dw: host.outer_width(doc, panes.right) - host.width(doc, panes.pane(Quadrant::TopRight)),
            dh: host.outer_height(doc, bottom_left) - host.height(doc, bottom_left),
        }
    }

    /// Recompute the scrolling pane sizes from the container size. Returns
    /// the new `(width, height)`; negative results are clamped to zero.
    pub fn resize<H: Host + ?Sized>(
        &self,
        host: &mut H,
        doc: &mut Document,
        panes: &PaneSet,
    ) -> Result<(f32, f32)> {
        let w = host.width(doc, panes.container)
            - host.outer_width(doc, panes.left)
            - self.dw;
        let h = host.height(doc, panes.container)
            - host.outer_height(doc, panes.pane(Quadrant::TopLeft))
            - self.dh;
        let (w, h) = (w.max(0.0), h.max(0.0));

        for q in [Quadrant::TopRight, Quadrant::BottomRight] {
            host.force_width(doc, panes.pane(q), Length::Px(w))?;
        }
        for q in [Quadrant::BottomLeft, Quadrant::BottomRight] {
            host.force_height(doc, panes.pane(q), Length::Px(h))?;
        }
        tracing::debug!(grid = %panes.grid_id, width = w, height = h, "fit panes");
        Ok((w, h))
    }
}
