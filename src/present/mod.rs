//! Presentation applied to a freshly split grid.
//!
//! None of this feeds back into the split itself. The coordinator runs the
//! steps in a fixed order: display method, sizes, fit, CSS rules, callbacks.

mod fit;
mod rules;

pub use fit::Fit;
pub use rules::{apply_css, bind_callbacks, Binding, BindingLog, EventBinder};

use crate::dom::Document;
use crate::error::Result;
use crate::layout::Host;
use crate::options::{DisplayMethod, SplitOptions};
use crate::panes::PaneSet;
use crate::types::Quadrant;

/// Put the left and right halves side by side.
pub fn apply_display_method(doc: &mut Document, panes: &PaneSet, method: DisplayMethod) -> Result<()> {
    match method {
        DisplayMethod::InlineBlock => {
            doc.set_style(panes.left, "display", "inline-block")?;
            doc.set_style(panes.right, "display", "inline-block")?;
        }
        DisplayMethod::TableCell => {
            doc.set_style(panes.container, "display", "table")?;
            doc.set_style(panes.container, "table-layout", "fixed")?;
            doc.set_style(panes.container, "margin", "0 auto")?;
            doc.set_style(panes.left, "display", "table-cell")?;
            doc.set_style(panes.right, "display", "table-cell")?;
        }
        DisplayMethod::Flex => doc.set_style(panes.container, "display", "flex")?,
        DisplayMethod::Float => doc.set_style(panes.left, "float", "left")?,
    }
    Ok(())
}

/// Force the configured sizes in the order height, width, top-height,
/// bottom-height, left-width, right-width.
pub fn apply_sizes<H: Host + ?Sized>(
    host: &mut H,
    doc: &mut Document,
    panes: &PaneSet,
    options: &SplitOptions,
) -> Result<()> {
    use Quadrant::{BottomLeft, BottomRight, TopLeft, TopRight};

    let container = [panes.container];
    let steps = [
        (&options.height, Dimension::Height, container.to_vec()),
        (&options.width, Dimension::Width, container.to_vec()),
        (&options.top_height, Dimension::Height, panes.panes_of(&[TopLeft, TopRight])),
        (&options.bottom_height, Dimension::Height, panes.panes_of(&[BottomLeft, BottomRight])),
        (&options.left_width, Dimension::Width, panes.panes_of(&[TopLeft, BottomLeft])),
        (&options.right_width, Dimension::Width, panes.panes_of(&[TopRight, BottomRight])),
    ];
    for (value, dimension, nodes) in steps {
        let Some(value) = value else {
            continue;
        };
        for node in nodes {
            match dimension {
                Dimension::Width => host.force_width(doc, node, value.clone())?,
                Dimension::Height => host.force_height(doc, node, value.clone())?,
            }
        }
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Dimension {
    Width,
    Height,
}
