use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a cut.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    /// Move whole rows (horizontal cut)
    Row,
    /// Move leading cells of every row (vertical cut)
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Row => "row",
            Self::Column => "column",
        })
    }
}

/// One of the four derived panes.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Suffix appended to the grid identifier for the pane wrapper.
    pub fn id_suffix(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id_suffix())
    }
}

/// Scroll direction carried by a sync edge.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ScrollAxis {
    /// `scrollLeft`
    Horizontal,
    /// `scrollTop`
    Vertical,
}

/// Scroll position of a pane in pixels.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub left: f32,
    pub top: f32,
}

impl ScrollOffset {
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }

    pub fn get(self, axis: ScrollAxis) -> f32 {
        match axis {
            ScrollAxis::Horizontal => self.left,
            ScrollAxis::Vertical => self.top,
        }
    }

    pub fn set(&mut self, axis: ScrollAxis, value: f32) {
        match axis {
            ScrollAxis::Horizontal => self.left = value,
            ScrollAxis::Vertical => self.top = value,
        }
    }
}
