//! Scroll synchronization between the four panes.
//!
//! The panes form a directed acyclic observer graph. A scroll on a pane runs
//! that pane's handler, which pushes one axis of its position to each
//! follower. A follower whose position actually changed runs its own handler
//! in turn. BottomRight has no incoming edge, so nothing ever scrolls it
//! programmatically.

use std::collections::VecDeque;

use super::viewport::PaneViewport;
use crate::types::{Quadrant, ScrollAxis, ScrollOffset};

/// One edge of the scroll graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollLink {
    pub source: Quadrant,
    pub target: Quadrant,
    pub axis: ScrollAxis,
}

impl ScrollLink {
    const fn new(source: Quadrant, target: Quadrant, axis: ScrollAxis) -> Self {
        Self {
            source,
            target,
            axis,
        }
    }
}

/// The edges installed between the panes of every split grid.
pub static SCROLL_LINKS: [ScrollLink; 4] = [
    ScrollLink::new(Quadrant::BottomRight, Quadrant::BottomLeft, ScrollAxis::Vertical),
    ScrollLink::new(Quadrant::BottomRight, Quadrant::TopRight, ScrollAxis::Horizontal),
    ScrollLink::new(Quadrant::TopRight, Quadrant::TopLeft, ScrollAxis::Vertical),
    ScrollLink::new(Quadrant::BottomLeft, Quadrant::TopLeft, ScrollAxis::Horizontal),
];

/// Edges leaving `source`.
pub fn followers(source: Quadrant) -> impl Iterator<Item = &'static ScrollLink> {
    SCROLL_LINKS.iter().filter(move |link| link.source == source)
}

/// Whether `links` contain no cycle.
pub fn is_acyclic(links: &[ScrollLink]) -> bool {
    let mut remaining: Vec<ScrollLink> = links.to_vec();
    loop {
        let before = remaining.len();
        // Drop edges whose source has no incoming edge left.
        let sources: Vec<Quadrant> = remaining
            .iter()
            .map(|l| l.source)
            .filter(|s| !remaining.iter().any(|l| l.target == *s))
            .collect();
        remaining.retain(|l| !sources.contains(&l.source));
        if remaining.is_empty() {
            return true;
        }
        if remaining.len() == before {
            return false;
        }
    }
}

/// Scroll positions and handler bookkeeping of one pane set.
#[derive(Debug, Clone, Default)]
pub struct ScrollSync {
    viewports: [PaneViewport; 4],
    handler_calls: [u32; 4],
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self, quadrant: Quadrant) -> PaneViewport {
        self.viewports
            .get(quadrant.index())
            .copied()
            .unwrap_or_default()
    }

    pub fn viewport_mut(&mut self, quadrant: Quadrant) -> Option<&mut PaneViewport> {
        self.viewports.get_mut(quadrant.index())
    }

    pub fn offset(&self, quadrant: Quadrant) -> ScrollOffset {
        self.viewport(quadrant).offset
    }

    /// How many times the pane's scroll handler ran.
    pub fn handler_calls(&self, quadrant: Quadrant) -> u32 {
        self.handler_calls
            .get(quadrant.index())
            .copied()
            .unwrap_or(0)
    }

    /// A user scroll on `quadrant`. Returns the panes whose handlers ran, in
    /// dispatch order. Nothing runs when the position did not change.
    pub fn scroll(&mut self, quadrant: Quadrant, offset: ScrollOffset) -> Vec<Quadrant> {
        let moved = self
            .viewport_mut(quadrant)
            .is_some_and(|vp| vp.set_offset(offset));
        if !moved {
            return Vec::new();
        }
        self.dispatch(quadrant)
    }

    /// Run the handler of `origin` and everything it triggers.
    ///
    /// A follower is queued only when its clamped position changed, the way
    /// a browser fires `scroll` only on a real move. The top-left pane copies
    /// the vertical position of the top-right and the horizontal position of
    /// the bottom-left, while those two only ever take the other axis from
    /// the bottom-right. A bottom-right scroll therefore never moves the
    /// top-left, and its handler runs zero times rather than once through
    /// either neighbour.
    pub fn dispatch(&mut self, origin: Quadrant) -> Vec<Quadrant> {
        let mut ran = Vec::new();
        let mut queue = VecDeque::from([origin]);
        while let Some(source) = queue.pop_front() {
            if let Some(calls) = self.handler_calls.get_mut(source.index()) {
                *calls += 1;
            }
            ran.push(source);
            let position = self.offset(source);
            for link in followers(source) {
                let moved = self
                    .viewport_mut(link.target)
                    .is_some_and(|vp| vp.set_scroll(link.axis, position.get(link.axis)));
                if moved {
                    queue.push_back(link.target);
                }
            }
        }
        tracing::trace!(%origin, handlers = ran.len(), "scroll dispatched");
        ran
    }

    /// Bring every follower in line with its source after a resize.
    pub fn resync(&mut self) {
        for link in &SCROLL_LINKS {
            let position = self.offset(link.source).get(link.axis);
            if let Some(vp) = self.viewport_mut(link.target) {
                vp.set_scroll(link.axis, position);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn sync() -> ScrollSync {
        let mut sync = ScrollSync::new();
        for q in Quadrant::ALL {
            if let Some(vp) = sync.viewport_mut(q) {
                *vp = PaneViewport::new(100.0, 100.0, 500.0, 500.0);
            }
        }
        sync
    }

    #[test]
    fn test_graph_is_acyclic() {
        assert!(is_acyclic(&SCROLL_LINKS));
        let mut cyclic = SCROLL_LINKS.to_vec();
        cyclic.push(ScrollLink::new(Quadrant::TopLeft, Quadrant::BottomRight, ScrollAxis::Vertical));
        assert!(!is_acyclic(&cyclic));
    }

    #[test]
    fn test_nothing_targets_bottom_right() {
        assert!(SCROLL_LINKS.iter().all(|l| l.target != Quadrant::BottomRight));
    }

    #[test]
    fn test_bottom_right_scroll_moves_its_followers() {
        let mut sync = sync();
        let ran = sync.scroll(Quadrant::BottomRight, ScrollOffset::new(40.0, 70.0));

        assert_eq!(ran, vec![Quadrant::BottomRight, Quadrant::BottomLeft, Quadrant::TopRight]);
        assert_eq!(sync.offset(Quadrant::BottomLeft), ScrollOffset::new(0.0, 70.0));
        assert_eq!(sync.offset(Quadrant::TopRight), ScrollOffset::new(40.0, 0.0));
        // Neither follower moved along the axis it forwards to TopLeft.
        assert_eq!(sync.offset(Quadrant::TopLeft), ScrollOffset::default());
        assert_eq!(sync.handler_calls(Quadrant::TopLeft), 0);
    }

    #[test]
    fn test_chain_reaches_top_left() {
        let mut sync = sync();
        let ran = sync.scroll(Quadrant::BottomLeft, ScrollOffset::new(25.0, 0.0));

        assert_eq!(ran, vec![Quadrant::BottomLeft, Quadrant::TopLeft]);
        assert_eq!(sync.offset(Quadrant::TopLeft), ScrollOffset::new(25.0, 0.0));
        assert_eq!(sync.handler_calls(Quadrant::BottomRight), 0);
    }

    #[test]
    fn test_unchanged_follower_stops_propagation() {
        let mut sync = sync();
        sync.scroll(Quadrant::BottomRight, ScrollOffset::new(0.0, 30.0));
        // TopRight's horizontal position is already 0.
        assert_eq!(sync.handler_calls(Quadrant::TopRight), 0);
        assert_eq!(sync.handler_calls(Quadrant::BottomLeft), 1);
    }

    #[test]
    fn test_no_move_no_dispatch() {
        let mut sync = sync();
        assert!(sync.scroll(Quadrant::TopLeft, ScrollOffset::default()).is_empty());
        assert_eq!(sync.handler_calls(Quadrant::TopLeft), 0);
    }
}
