//! Scroll state of one pane.

use crate::types::{ScrollAxis, ScrollOffset};

/// Visible area of a pane over its grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaneViewport {
    /// Current scroll position in grid coordinates
    pub offset: ScrollOffset,
    /// Viewport width in pixels
    pub width: f32,
    /// Viewport height in pixels
    pub height: f32,
    /// Width of the grid inside the pane
    pub content_width: f32,
    /// Height of the grid inside the pane
    pub content_height: f32,
}

impl PaneViewport {
    pub fn new(width: f32, height: f32, content_width: f32, content_height: f32) -> Self {
        Self {
            offset: ScrollOffset::default(),
            width,
            height,
            content_width,
            content_height,
        }
    }

    /// Largest scroll position along `axis`; zero when the content fits.
    pub fn max_scroll(&self, axis: ScrollAxis) -> f32 {
        match axis {
            ScrollAxis::Horizontal => (self.content_width - self.width).max(0.0),
            ScrollAxis::Vertical => (self.content_height - self.height).max(0.0),
        }
    }

    /// Clamp scroll position to valid range.
    pub fn clamp_scroll(&mut self) {
        self.offset.left = self.offset.left.clamp(0.0, self.max_scroll(ScrollAxis::Horizontal));
        self.offset.top = self.offset.top.clamp(0.0, self.max_scroll(ScrollAxis::Vertical));
    }

    /// Set the scroll position along one axis. Returns whether it moved.
    pub fn set_scroll(&mut self, axis: ScrollAxis, value: f32) -> bool {
        let before = self.offset.get(axis);
        self.offset.set(axis, value);
        self.clamp_scroll();
        (self.offset.get(axis) - before).abs() > f32::EPSILON
    }

    /// Set absolute scroll position. Returns whether it moved.
    pub fn set_offset(&mut self, offset: ScrollOffset) -> bool {
        let moved_x = self.set_scroll(ScrollAxis::Horizontal, offset.left);
        let moved_y = self.set_scroll(ScrollAxis::Vertical, offset.top);
        moved_x || moved_y
    }

    /// Scroll by delta amounts. Returns whether it moved.
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) -> bool {
        let target = ScrollOffset::new(self.offset.left + delta_x, self.offset.top + delta_y);
        self.set_offset(target)
    }

    /// Resize the viewport and its content, keeping the position in range.
    pub fn resize(&mut self, width: f32, height: f32, content_width: f32, content_height: f32) {
        self.width = width;
        self.height = height;
        self.content_width = content_width;
        self.content_height = content_height;
        self.clamp_scroll();
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_to_content() {
        let mut vp = PaneViewport::new(100.0, 50.0, 300.0, 80.0);
        assert!(vp.set_offset(ScrollOffset::new(500.0, -10.0)));
        assert_eq!(vp.offset, ScrollOffset::new(200.0, 0.0));
        assert!(!vp.set_scroll(ScrollAxis::Vertical, -5.0));
    }

    #[test]
    fn test_fitting_content_never_scrolls() {
        let mut vp = PaneViewport::new(100.0, 100.0, 60.0, 60.0);
        assert!(!vp.scroll_by(10.0, 10.0));
        assert_eq!(vp.max_scroll(ScrollAxis::Horizontal), 0.0);
    }

    #[test]
    fn test_resize_pulls_offset_back() {
        let mut vp = PaneViewport::new(100.0, 100.0, 400.0, 400.0);
        vp.set_offset(ScrollOffset::new(300.0, 300.0));
        vp.resize(200.0, 350.0, 400.0, 400.0);
        assert_eq!(vp.offset, ScrollOffset::new(200.0, 50.0));
    }
}
