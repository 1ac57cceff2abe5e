//! Padding and border widths around a rendered box.
//!
//! Rendered sizes come in two flavours: the border box (bounding rectangles,
//! `offsetWidth`) and the padding box (`clientWidth`). Frozen widths and
//! heights are content-box values, so both have to be reduced.

use crate::types::Length;

/// Padding and border of one box, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxEdges {
    pub padding_left: f32,
    pub padding_right: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
    pub border_left: f32,
    pub border_right: f32,
    pub border_top: f32,
    pub border_bottom: f32,
}

impl BoxEdges {
    /// Read the edges from computed style values. `lookup` receives CSS
    /// property names such as `padding-left` or `border-top-width`; missing
    /// or non-pixel values count as zero.
    pub fn from_computed(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let px = |property: &str| {
            lookup(property)
                .and_then(|value| Length::parse(&value).as_px())
                .filter(|v| v.is_finite())
                .map_or(0.0, |v| v.max(0.0))
        };
        Self {
            padding_left: px("padding-left"),
            padding_right: px("padding-right"),
            padding_top: px("padding-top"),
            padding_bottom: px("padding-bottom"),
            border_left: px("border-left-width"),
            border_right: px("border-right-width"),
            border_top: px("border-top-width"),
            border_bottom: px("border-bottom-width"),
        }
    }

    pub fn horizontal_padding(&self) -> f32 {
        self.padding_left + self.padding_right
    }

    pub fn vertical_padding(&self) -> f32 {
        self.padding_top + self.padding_bottom
    }

    pub fn horizontal(&self) -> f32 {
        self.horizontal_padding() + self.border_left + self.border_right
    }

    pub fn vertical(&self) -> f32 {
        self.vertical_padding() + self.border_top + self.border_bottom
    }

    /// Content size of a border box of `width` x `height`.
    pub fn content_of_border_box(&self, width: f32, height: f32) -> (f32, f32) {
        ((width - self.horizontal()).max(0.0), (height - self.vertical()).max(0.0))
    }

    /// Content size of a padding box of `width` x `height`.
    pub fn content_of_padding_box(&self, width: f32, height: f32) -> (f32, f32) {
        (
            (width - self.horizontal_padding()).max(0.0),
            (height - self.vertical_padding()).max(0.0),
        )
    }
}
