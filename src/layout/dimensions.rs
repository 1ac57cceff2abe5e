//! Row height and column width synchronization.
//!
//! Before a grid is split every row height is measured and the widths of a
//! band of rows are frozen, so the derived grids keep the geometry of the
//! whole. Two width strategies exist: freezing the cells of a band of real
//! rows ([`fix_column_widths`]), or measuring a synthetic probe row of
//! single-unit cells and inserting copies of it at the top of every derived
//! grid ([`ProbeRow`]).

use serde::{Deserialize, Serialize};

use super::Host;
use crate::dom::Document;
use crate::error::Result;
use crate::split::GridMap;
use crate::types::{Length, Node, NodeId, NodeKind};

/// Inclusive range of row indices whose cells get their widths frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct RowBand {
    pub start: usize,
    pub end: usize,
}

impl RowBand {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Rows of `rows` covered by the band, clipped to the slice.
    fn select<'a>(&self, rows: &'a [NodeId]) -> &'a [NodeId] {
        if self.start > self.end || self.start >= rows.len() {
            return &[];
        }
        let end = self.end.min(rows.len() - 1);
        rows.get(self.start..=end).unwrap_or(&[])
    }
}

impl From<[usize; 2]> for RowBand {
    fn from([start, end]: [usize; 2]) -> Self {
        Self { start, end }
    }
}

impl From<RowBand> for [usize; 2] {
    fn from(band: RowBand) -> Self {
        [band.start, band.end]
    }
}

/// Round a measurement up to whole pixels. Non-positive sizes pass through.
fn round_up(size: f32) -> f32 {
    if size > 0.0 {
        size.ceil()
    } else {
        size
    }
}

/// Height of every row of `table` in document order.
pub fn measure_row_heights<H: Host + ?Sized>(host: &H, doc: &Document, table: NodeId) -> Vec<f32> {
    doc.rows(table)
        .into_iter()
        .map(|row| round_up(host.height(doc, row)))
        .collect()
}

/// Force the height of every row of `table` to the recorded value at the
/// same index. Rows past the end of `heights` are left alone.
pub fn apply_row_heights<H: Host + ?Sized>(
    host: &mut H,
    doc: &mut Document,
    table: NodeId,
    heights: &[f32],
) -> Result<()> {
    for (row, height) in doc.rows(table).into_iter().zip(heights) {
        host.force_height(doc, row, Length::Px(*height))?;
    }
    Ok(())
}

/// Freeze each cell of the rows in `band` at its current width.
pub fn fix_column_widths<H: Host + ?Sized>(
    host: &mut H,
    doc: &mut Document,
    table: NodeId,
    band: RowBand,
) -> Result<()> {
    let rows = doc.rows(table);
    for &row in band.select(&rows) {
        let cells: Vec<NodeId> = doc.children(row).to_vec();
        let widths: Vec<f32> = cells
            .iter()
            .map(|cell| round_up(host.width(doc, *cell)))
            .collect();
        for (cell, width) in cells.into_iter().zip(widths) {
            host.force_width(doc, cell, Length::Px(width))?;
        }
    }
    tracing::debug!(table = %table, start = band.start, end = band.end, "froze column widths");
    Ok(())
}

/// Freeze widths again on a grid that has already been split, after the
/// rendering environment changed (fonts loaded, styles applied).
pub fn refix_column_widths<H: Host + ?Sized>(
    host: &mut H,
    doc: &mut Document,
    table: NodeId,
    band: RowBand,
) -> Result<()> {
    fix_column_widths(host, doc, table, band)
}

/// Force the cells of `row`, in order, to `widths`.
pub fn freeze_row_widths<H: Host + ?Sized>(
    host: &mut H,
    doc: &mut Document,
    row: NodeId,
    widths: &[f32],
) -> Result<()> {
    let cells: Vec<NodeId> = doc.children(row).to_vec();
    for (cell, width) in cells.into_iter().zip(widths) {
        host.force_width(doc, cell, Length::Px(*width))?;
    }
    Ok(())
}

/// A measured row of empty single-unit cells, split at the column cut.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRow {
    pub left_widths: Vec<f32>,
    pub right_widths: Vec<f32>,
    /// Detached row holding the first `col_cut` probe cells
    pub left_row: NodeId,
    /// Detached row holding the remaining probe cells
    pub right_row: NodeId,
}

impl ProbeRow {
    /// Measure one probe cell per column of `table` and split them at
    /// `col_cut`. The table is left exactly as it was.
    pub fn create<H: Host + ?Sized>(
        host: &H,
        doc: &mut Document,
        table: NodeId,
        col_cut: usize,
    ) -> Result<Self> {
        let columns = GridMap::build(doc, table).col_count;
        let mut synthetic = Node::new(NodeKind::Row);
        synthetic.synthetic = true;
        let row = doc.create(synthetic);
        for _ in 0..columns {
            let mut cell = Node::cell("", 1, 1);
            cell.synthetic = true;
            let cell = doc.create(cell);
            doc.append_child(row, cell)?;
        }

        match doc.rows(table).last() {
            Some(&last) => doc.insert_after(last, row)?,
            None => {
                doc.append_child(table, row)?;
            }
        }
        let widths: Vec<f32> = doc
            .children(row)
            .iter()
            .map(|cell| host.width(doc, *cell))
            .collect();
        doc.detach(row)?;

        let left_row = doc.shallow_clone(row)?;
        let left: Vec<NodeId> = doc.children(row).iter().take(col_cut).copied().collect();
        for cell in left {
            doc.append_child(left_row, cell)?;
        }
        let split_at = col_cut.min(widths.len());
        let (left_widths, right_widths) = widths.split_at(split_at);
        tracing::debug!(table = %table, columns, col_cut, "measured probe row");

        Ok(Self {
            left_widths: left_widths.to_vec(),
            right_widths: right_widths.to_vec(),
            left_row,
            right_row: row,
        })
    }

    /// Insert the probe rows as the first row of each derived grid and
    /// freeze them. The bottom grids receive copies.
    pub fn install<H: Host + ?Sized>(
        &self,
        host: &mut H,
        doc: &mut Document,
        tables: [NodeId; 4],
    ) -> Result<()> {
        let [top_left, top_right, bottom_left, bottom_right] = tables;
        let bottom_left_row = doc.deep_clone(self.left_row)?;
        let bottom_right_row = doc.deep_clone(self.right_row)?;
        let placements = [
            (top_left, self.left_row, &self.left_widths),
            (bottom_left, bottom_left_row, &self.left_widths),
            (top_right, self.right_row, &self.right_widths),
            (bottom_right, bottom_right_row, &self.right_widths),
        ];
        for (table, row, widths) in placements {
            insert_first_row(doc, table, row)?;
            freeze_row_widths(host, doc, row, widths)?;
        }
        Ok(())
    }
}

fn insert_first_row(doc: &mut Document, table: NodeId, row: NodeId) -> Result<()> {
    match doc.rows(table).first() {
        Some(&first) => doc.insert_before(first, row),
        None => doc.append_child(table, row).map(|_| ()),
    }
}
