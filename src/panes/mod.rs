//! Splitting a grid into four synchronized panes.
//!
//! ```text
//! +-------------------------------------------------+
//! | <id>-table4panes                  .prefix       |
//! | +---------------------+ +---------------------+ |
//! | | <id>-left           | | <id>-right          | |
//! | | +-----------------+ | | +-----------------+ | |
//! | | | <id>-top-left   | | | | <id>-top-right  | | |
//! | | +-----------------+ | | +-----------------+ | |
//! | | +-----------------+ | | +-----------------+ | |
//! | | | <id>-bottom-left| | | | <id>-bottom-    | | |
//! | | |                 | | | |   right         | | |
//! | | +-----------------+ | | +-----------------+ | |
//! | +---------------------+ +---------------------+ |
//! +-------------------------------------------------+
//! ```
//!
//! The original table becomes the bottom-right grid and keeps its
//! identifier; the other three grids are clones holding the moved cells.

mod scroll;
mod viewport;

pub use scroll::{followers, is_acyclic, ScrollLink, ScrollSync, SCROLL_LINKS};
pub use viewport::PaneViewport;

use crate::dom::Document;
use crate::error::{PanesError, Result};
use crate::layout::{
    apply_row_heights, fix_column_widths, measure_row_heights, refix_column_widths, Host,
    ProbeRow, RowBand,
};
use crate::options::{FixWidthRows, SplitOptions};
use crate::present::{self, Binding, BindingLog, EventBinder, Fit};
use crate::split::{extract, GridMap};
use crate::types::{Axis, Diagnostic, NodeId, NodeKind, Quadrant, ScrollOffset};

/// One value per quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quads<T> {
    pub top_left: T,
    pub top_right: T,
    pub bottom_left: T,
    pub bottom_right: T,
}

impl<T> Quads<T> {
    pub fn get(&self, quadrant: Quadrant) -> &T {
        match quadrant {
            Quadrant::TopLeft => &self.top_left,
            Quadrant::TopRight => &self.top_right,
            Quadrant::BottomLeft => &self.bottom_left,
            Quadrant::BottomRight => &self.bottom_right,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, &T)> {
        Quadrant::ALL.into_iter().map(move |q| (q, self.get(q)))
    }
}

/// Result of a split request.
#[derive(Debug)]
pub enum SplitOutcome {
    Applied(Box<PaneSet>),
    /// The grid was split before; `container` is the existing outer wrapper.
    AlreadySplit { container: NodeId },
}

impl SplitOutcome {
    pub fn applied(self) -> Option<PaneSet> {
        match self {
            Self::Applied(panes) => Some(*panes),
            Self::AlreadySplit { .. } => None,
        }
    }
}

/// The four grids of a split table and everything needed to keep them
/// aligned.
#[derive(Debug, Clone)]
pub struct PaneSet {
    /// Identifier of the original grid
    pub grid_id: String,
    pub prefix: String,
    pub col_cut: usize,
    pub row_cut: usize,
    /// Outer wrapper, `<id>-table4panes`
    pub container: NodeId,
    /// Wrapper of the two left panes
    pub left: NodeId,
    /// Wrapper of the two right panes
    pub right: NodeId,
    /// Pane wrappers, `<id>-top-left` and so on
    pub panes: Quads<NodeId>,
    /// Derived grids; the bottom-right one is the original table
    pub tables: Quads<NodeId>,
    /// Row heights of the unsplit grid
    pub row_heights: Vec<f32>,
    pub width_strategy: FixWidthRows,
    /// Probe widths `(left, right)` when the probe strategy was used
    pub probe_widths: Option<(Vec<f32>, Vec<f32>)>,
    pub diagnostics: Vec<Diagnostic>,
    /// Bindings recorded by the default binder
    pub bindings: Vec<Binding>,
    pub fit: Option<Fit>,
    pub sync: ScrollSync,
}

impl PaneSet {
    pub fn pane(&self, quadrant: Quadrant) -> NodeId {
        *self.panes.get(quadrant)
    }

    pub fn table(&self, quadrant: Quadrant) -> NodeId {
        *self.tables.get(quadrant)
    }

    pub fn panes_of(&self, quadrants: &[Quadrant]) -> Vec<NodeId> {
        quadrants.iter().map(|q| self.pane(*q)).collect()
    }

    /// Pane identifier, `<id>-<quadrant>`.
    pub fn pane_id(&self, quadrant: Quadrant) -> String {
        format!("{}-{}", self.grid_id, quadrant.id_suffix())
    }

    /// A user scroll on one pane. Returns the panes whose handlers ran.
    pub fn scroll(&mut self, quadrant: Quadrant, offset: ScrollOffset) -> Vec<Quadrant> {
        self.sync.scroll(quadrant, offset)
    }

    pub fn offset(&self, quadrant: Quadrant) -> ScrollOffset {
        self.sync.offset(quadrant)
    }

    pub fn handler_calls(&self, quadrant: Quadrant) -> u32 {
        self.sync.handler_calls(quadrant)
    }

    /// Re-measure every pane and its grid for scrolling.
    pub fn refresh_viewports<H: Host + ?Sized>(&mut self, host: &H, doc: &Document) {
        for q in Quadrant::ALL {
            let (pane, table) = (self.pane(q), self.table(q));
            if let Some(vp) = self.sync.viewport_mut(q) {
                vp.resize(
                    host.width(doc, pane),
                    host.height(doc, pane),
                    host.width(doc, table),
                    host.height(doc, table),
                );
            }
        }
        self.sync.resync();
    }

    /// React to a size change of the environment. With fit enabled the
    /// scrolling panes are resized first. Returns the fitted size, if any.
    pub fn resize<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        doc: &mut Document,
    ) -> Result<Option<(f32, f32)>> {
        let fitted = match self.fit {
            Some(fit) => Some(fit.resize(host, doc, self)?),
            None => None,
        };
        self.refresh_viewports(host, doc);
        Ok(fitted)
    }

    /// Rows of `quadrant`'s grid that correspond to the width band.
    pub fn band_for(&self, quadrant: Quadrant) -> Option<RowBand> {
        match self.width_strategy {
            FixWidthRows::Probe => Some(RowBand::new(0, 0)),
            FixWidthRows::Band(band) if quadrant.is_top() => {
                let end = band.end.min(self.row_cut.checked_sub(1)?);
                (band.start <= end).then_some(RowBand::new(band.start, end))
            }
            FixWidthRows::Band(band) => {
                let end = band.end.checked_sub(self.row_cut)?;
                Some(RowBand::new(band.start.saturating_sub(self.row_cut), end))
            }
        }
    }

    /// Freeze column widths again on all four grids.
    pub fn refix_column_widths<H: Host + ?Sized>(
        &self,
        host: &mut H,
        doc: &mut Document,
    ) -> Result<()> {
        for q in Quadrant::ALL {
            if let Some(band) = self.band_for(q) {
                refix_column_widths(host, doc, self.table(q), band)?;
            }
        }
        Ok(())
    }
}

/// Split `table` at `col_cut` columns and `row_cut` rows.
pub fn split<H: Host + ?Sized>(
    doc: &mut Document,
    host: &mut H,
    table: NodeId,
    col_cut: i64,
    row_cut: i64,
    options: &SplitOptions,
) -> Result<SplitOutcome> {
    let mut log = BindingLog::default();
    let outcome = split_indexed(doc, host, &mut log, 0, table, col_cut, row_cut, options)?;
    Ok(with_bindings(outcome, log))
}

/// Split several tables with the same cuts and options. A table without
/// identifier gets `<prefix><index>`.
pub fn split_all<H: Host + ?Sized>(
    doc: &mut Document,
    host: &mut H,
    tables: &[NodeId],
    col_cut: i64,
    row_cut: i64,
    options: &SplitOptions,
) -> Result<Vec<SplitOutcome>> {
    let mut outcomes = Vec::with_capacity(tables.len());
    for (index, &table) in tables.iter().enumerate() {
        let mut log = BindingLog::default();
        let outcome = split_indexed(doc, host, &mut log, index, table, col_cut, row_cut, options)?;
        outcomes.push(with_bindings(outcome, log));
    }
    Ok(outcomes)
}

fn with_bindings(outcome: SplitOutcome, log: BindingLog) -> SplitOutcome {
    match outcome {
        SplitOutcome::Applied(mut panes) => {
            panes.bindings = log.bindings;
            SplitOutcome::Applied(panes)
        }
        other => other,
    }
}

/// Identifier of the `index`-th grid of a batch: its own when it has a
/// non-empty one, `<prefix><index>` otherwise.
pub fn grid_identifier(id: Option<&str>, prefix: &str, index: usize) -> String {
    match id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => format!("{prefix}{index}"),
    }
}

/// A cut must lie within `0..=capacity`; it is never clamped.
fn check_cut(axis: Axis, requested: i64, grid: &GridMap) -> Result<u32> {
    let capacity = grid.capacity(axis);
    u32::try_from(requested)
        .ok()
        .filter(|cut| *cut <= capacity)
        .ok_or(PanesError::InvalidCut {
            axis,
            requested,
            capacity,
        })
}

/// Split with a caller-provided event binder.
#[allow(clippy::too_many_arguments)]
pub fn split_indexed<H: Host + ?Sized>(
    doc: &mut Document,
    host: &mut H,
    binder: &mut dyn EventBinder,
    index: usize,
    table: NodeId,
    col_cut: i64,
    row_cut: i64,
    options: &SplitOptions,
) -> Result<SplitOutcome> {
    if doc.node(table)?.kind != NodeKind::Table {
        return Err(PanesError::NotATable(table));
    }
    let prefix = options.prefix().to_string();
    let grid_id = grid_identifier(doc.node(table)?.id.as_deref(), &prefix, index);
    let container_id = format!("{grid_id}-table4panes");
    if let Some(container) = doc.find_by_id(&container_id) {
        tracing::debug!(grid = %grid_id, "already split");
        return Ok(SplitOutcome::AlreadySplit { container });
    }

    let grid = GridMap::build(doc, table);
    let cols = check_cut(Axis::Column, col_cut, &grid)?;
    let rows = check_cut(Axis::Row, row_cut, &grid)?;
    let mut diagnostics = grid.overruns(Axis::Column, cols);
    diagnostics.extend(grid.overruns(Axis::Row, rows));
    for diagnostic in &diagnostics {
        tracing::warn!(grid = %grid_id, "{diagnostic}");
    }
    doc.set_id(table, grid_id.clone())?;
    tracing::debug!(grid = %grid_id, col_cut, row_cut, "splitting");

    // Freeze the geometry of the whole grid.
    doc.add_class(table, "pane")?;
    doc.set_style(table, "table-layout", "fixed")?;
    let width_strategy = options.width_strategy(rows as usize);
    let probe = match width_strategy {
        FixWidthRows::Band(band) => {
            fix_column_widths(host, doc, table, band)?;
            None
        }
        FixWidthRows::Probe => Some(ProbeRow::create(host, doc, table, cols as usize)?),
    };
    let row_heights = measure_row_heights(host, doc, table);

    // Column split, then row split of each half.
    let container = wrapper(doc, &container_id)?;
    doc.wrap(table, container)?;
    let bottom_right = table;
    let bottom_left = extract(doc, bottom_right, Axis::Column, i64::from(cols))?;
    let right = wrapper(doc, &format!("{grid_id}-right"))?;
    doc.wrap(bottom_right, right)?;
    let left = wrapper(doc, &format!("{grid_id}-left"))?;
    doc.wrap(bottom_left, left)?;
    apply_row_heights(host, doc, bottom_right, &row_heights)?;
    apply_row_heights(host, doc, bottom_left, &row_heights)?;
    let top_right = extract(doc, bottom_right, Axis::Row, i64::from(rows))?;
    let top_left = extract(doc, bottom_left, Axis::Row, i64::from(rows))?;
    doc.insert_before(bottom_right, top_right)?;
    doc.insert_before(bottom_left, top_left)?;
    doc.insert_before(right, left)?;

    let tables = Quads {
        top_left,
        top_right,
        bottom_left,
        bottom_right,
    };
    if let Some(probe) = &probe {
        probe.install(host, doc, [top_left, top_right, bottom_left, bottom_right])?;
    }

    // Pane wrappers, classes and overflow.
    doc.add_class(container, &prefix)?;
    doc.add_class(left, &format!("{prefix}-left"))?;
    doc.add_class(right, &format!("{prefix}-right"))?;
    let pane_ids = Quads {
        top_left: wrap_pane(doc, &grid_id, &prefix, Quadrant::TopLeft, top_left)?,
        top_right: wrap_pane(doc, &grid_id, &prefix, Quadrant::TopRight, top_right)?,
        bottom_left: wrap_pane(doc, &grid_id, &prefix, Quadrant::BottomLeft, bottom_left)?,
        bottom_right: wrap_pane(doc, &grid_id, &prefix, Quadrant::BottomRight, bottom_right)?,
    };

    let mut panes = PaneSet {
        grid_id,
        prefix,
        col_cut: cols as usize,
        row_cut: rows as usize,
        container,
        left,
        right,
        panes: pane_ids,
        tables,
        row_heights,
        width_strategy,
        probe_widths: probe.map(|p| (p.left_widths, p.right_widths)),
        diagnostics,
        bindings: Vec::new(),
        fit: None,
        sync: ScrollSync::new(),
    };

    present::apply_display_method(doc, &panes, options.display_method)?;
    present::apply_sizes(host, doc, &panes, options)?;
    if options.fit {
        let fit = Fit::measure(host, doc, &panes);
        panes.fit = Some(fit);
        fit.resize(host, doc, &panes)?;
    }
    let root = doc.root_of(container);
    present::apply_css(doc, root, &options.css)?;
    present::bind_callbacks(doc, root, &options.callbacks, binder)?;

    panes.refresh_viewports(host, doc);
    tracing::debug!(grid = %panes.grid_id, diagnostics = panes.diagnostics.len(), "split done");
    Ok(SplitOutcome::Applied(Box::new(panes)))
}

fn wrapper(doc: &mut Document, id: &str) -> Result<NodeId> {
    let div = doc.create_element(NodeKind::Div);
    doc.set_id(div, id)?;
    Ok(div)
}

fn wrap_pane(
    doc: &mut Document,
    grid_id: &str,
    prefix: &str,
    quadrant: Quadrant,
    table: NodeId,
) -> Result<NodeId> {
    let pane = wrapper(doc, &format!("{grid_id}-{}", quadrant.id_suffix()))?;
    doc.wrap(table, pane)?;
    let band = if quadrant.is_top() { "top" } else { "bottom" };
    doc.add_class(pane, &format!("{prefix}-{band}"))?;
    let (overflow_x, overflow_y) = overflow(quadrant);
    doc.set_style(pane, "overflow-x", overflow_x)?;
    doc.set_style(pane, "overflow-y", overflow_y)?;
    Ok(pane)
}

/// `(overflow-x, overflow-y)` of a pane.
fn overflow(quadrant: Quadrant) -> (&'static str, &'static str) {
    match quadrant {
        Quadrant::BottomRight => ("scroll", "scroll"),
        Quadrant::TopRight => ("hidden", "scroll"),
        Quadrant::BottomLeft => ("scroll", "hidden"),
        Quadrant::TopLeft => ("hidden", "hidden"),
    }
}
