//! Data types shared by the splitter, synchronizer and presentation layers.

mod diagnostic;
mod length;
mod node;
mod quadrant;

pub use diagnostic::*;
pub use length::*;
pub use node::*;
pub use quadrant::*;
