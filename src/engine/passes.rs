use std::ops::Range;

use crate::buffer::view::{PixelView, PixelViewMut};
use crate::engine::bands::{Composite, reconstruct_line};
use crate::foundation::abort::AbortSignal;
use crate::foundation::core::RectI;
use crate::foundation::error::{DebandError, DebandResult};
use crate::foundation::pixel::Pixel;

/// Which scan axes run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Passes {
    /// Row pass, then a column pass averaged against it.
    #[default]
    Both,
    /// Horizontal bands only.
    RowsOnly,
    /// Vertical bands only, written directly.
    ColumnsOnly,
}

impl Passes {
    pub fn rows(self) -> bool {
        matches!(self, Self::Both | Self::RowsOnly)
    }

    pub fn columns(self) -> bool {
        matches!(self, Self::Both | Self::ColumnsOnly)
    }
}

/// Counters for one pass over one window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Lines fully processed.
    pub lines: usize,
    /// Bands reconstructed.
    pub bands: usize,
    /// The abort signal cut the pass short.
    pub aborted: bool,
}

/// Counters for both passes over one window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowStats {
    pub rows: PassStats,
    pub columns: PassStats,
}

impl WindowStats {
    pub fn aborted(&self) -> bool {
        self.rows.aborted || self.columns.aborted
    }
}

/// Debands every row of `window`, left to right.
pub fn row_pass<P: Pixel>(
    src: &PixelView<'_, P>,
    dst: &mut PixelViewMut<'_, P>,
    window: RectI,
    abort: &dyn AbortSignal,
) -> DebandResult<PassStats> {
    let mut stats = PassStats::default();
    for y in window.rows() {
        if abort.is_aborted() {
            stats.aborted = true;
            break;
        }
        let line = src
            .row(y, window.columns())
            .ok_or_else(|| DebandError::evaluation(format!("source row {y} outside its rect")))?;
        let out = dst.row_mut(y, window.columns()).ok_or_else(|| {
            DebandError::evaluation(format!("destination row {y} outside its rect"))
        })?;
        stats.bands += reconstruct_line(line, out, 0..line.len(), Composite::Replace);
        stats.lines += 1;
    }
    Ok(stats)
}

/// Debands every column of `window`, top to bottom.
///
/// Bands are detected over `scan_rows`, which must contain `window`'s rows; only the window's
/// rows are written. Passing the window's own rows gives strip-local detection.
pub fn column_pass<P: Pixel>(
    src: &PixelView<'_, P>,
    dst: &mut PixelViewMut<'_, P>,
    window: RectI,
    scan_rows: Range<i32>,
    composite: Composite,
    abort: &dyn AbortSignal,
) -> DebandResult<PassStats> {
    if window.y1 < scan_rows.start || window.y2 > scan_rows.end {
        return Err(DebandError::validation(format!(
            "column scan rows {}..{} do not cover window rows {}..{}",
            scan_rows.start, scan_rows.end, window.y1, window.y2
        )));
    }
    let write = (window.y1 - scan_rows.start) as usize..(window.y2 - scan_rows.start) as usize;

    let mut stats = PassStats::default();
    for x in window.columns() {
        if abort.is_aborted() {
            stats.aborted = true;
            break;
        }
        let line = src.column(x, scan_rows.clone()).ok_or_else(|| {
            DebandError::evaluation(format!("source column {x} outside its rect"))
        })?;
        let mut out = dst.column_mut(x, window.rows()).ok_or_else(|| {
            DebandError::evaluation(format!("destination column {x} outside its rect"))
        })?;
        stats.bands += reconstruct_line(&line, &mut out, write.clone(), composite);
        stats.lines += 1;
    }
    Ok(stats)
}

/// Runs the configured passes over one work window.
///
/// The column pass averages against the row pass when both run; on its own it writes its
/// values directly. An aborted row pass ends the window: the column pass never starts.
pub fn deband_window<P: Pixel>(
    src: &PixelView<'_, P>,
    dst: &mut PixelViewMut<'_, P>,
    window: RectI,
    column_scan_rows: Range<i32>,
    passes: Passes,
    abort: &dyn AbortSignal,
) -> DebandResult<WindowStats> {
    let mut stats = WindowStats::default();
    if window.is_empty() {
        return Ok(stats);
    }
    if passes.rows() {
        stats.rows = row_pass(src, dst, window, abort)?;
        if stats.rows.aborted {
            return Ok(stats);
        }
    }
    if passes.columns() {
        let composite = if passes.rows() {
            Composite::Average
        } else {
            Composite::Replace
        };
        stats.columns = column_pass(src, dst, window, column_scan_rows, composite, abort)?;
    }
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/passes.rs"]
mod tests;
