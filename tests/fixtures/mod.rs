//! Test fixtures for building grid definitions in memory.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::{cell, GridBuilder};
//!
//! let grid = GridBuilder::new()
//!     .id("prices")
//!     .section(SectionKind::Head)
//!     .row(vec![cell("Item").header(), cell("Price").span(2, 1)])
//!     .section(SectionKind::Body)
//!     .row(vec![cell("Apple"), cell("1"), cell("2")])
//!     .build();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use tablepanes::{CellDef, GridDef, SectionDef, SectionKind};

/// Builder for [`GridDef`] values.
#[derive(Debug, Default)]
pub struct GridBuilder {
    def: GridDef,
}

impl GridBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.def.id = Some(id.to_string());
        self
    }

    /// Start a new row group; following rows go into it.
    #[must_use]
    pub fn section(mut self, kind: SectionKind) -> Self {
        self.def.sections.push(SectionDef {
            kind,
            rows: Vec::new(),
        });
        self
    }

    /// Add a row to the current row group (a body group is opened if none).
    #[must_use]
    pub fn row(mut self, cells: Vec<CellBuilder>) -> Self {
        if self.def.sections.is_empty() {
            self = self.section(SectionKind::Body);
        }
        let cells = cells.into_iter().map(CellBuilder::build).collect();
        self.def.sections.last_mut().unwrap().rows.push(cells);
        self
    }

    /// Add a row placed directly under the table.
    #[must_use]
    pub fn bare_row(mut self, cells: Vec<CellBuilder>) -> Self {
        self.def
            .rows
            .push(cells.into_iter().map(CellBuilder::build).collect());
        self
    }

    #[must_use]
    pub fn build(self) -> GridDef {
        self.def
    }
}

/// Builder for one cell.
#[derive(Debug, Clone)]
pub struct CellBuilder {
    def: CellDef,
}

/// Start a cell with `text`.
#[must_use]
pub fn cell(text: &str) -> CellBuilder {
    CellBuilder {
        def: CellDef::new(text),
    }
}

impl CellBuilder {
    #[must_use]
    pub fn span(mut self, col_span: u32, row_span: u32) -> Self {
        self.def = self.def.span(col_span, row_span);
        self
    }

    #[must_use]
    pub fn header(mut self) -> Self {
        self.def.header = true;
        self
    }

    /// Intrinsic content size in pixels.
    #[must_use]
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.def.width = Some(width);
        self.def.height = Some(height);
        self
    }

    #[must_use]
    pub fn build(self) -> CellDef {
        self.def
    }
}

/// `rows` x `cols` grid without spans; cell text is `r{row}c{col}`.
#[must_use]
pub fn uniform(rows: usize, cols: usize) -> GridDef {
    let mut builder = GridBuilder::new();
    for r in 0..rows {
        builder = builder.row((0..cols).map(|c| cell(&format!("r{r}c{c}"))).collect());
    }
    builder.build()
}

/// Grid whose first cell spans two columns and two rows:
///
/// ```text
/// +-------+----+----+----+
/// | r0c0  |r0c1|r0c2|r0c3|
/// |       +----+----+----+
/// |       |r1c0|r1c1|r1c2|
/// +--+----+----+----+----+
/// |r2c0|r2c1|r2c2|r2c3|r2c4|
/// ```
#[must_use]
pub fn corner_span() -> GridDef {
    GridDef::from_rows(&[
        &[(2, 2), (1, 1), (1, 1), (1, 1)],
        &[(1, 1), (1, 1), (1, 1)],
        &[(1, 1), (1, 1), (1, 1), (1, 1), (1, 1)],
    ])
}

/// Grid with head, body and foot groups, three columns each.
#[must_use]
pub fn sectioned() -> GridDef {
    let row = |prefix: &str| (0..3).map(|c| cell(&format!("{prefix}{c}"))).collect();
    GridBuilder::new()
        .section(SectionKind::Head)
        .row(row("h"))
        .section(SectionKind::Body)
        .row(row("a"))
        .row(row("b"))
        .section(SectionKind::Foot)
        .row(row("f"))
        .build()
}
