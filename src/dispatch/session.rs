use std::ops::Range;

use rayon::prelude::*;

use crate::buffer::view::{PixelView, PixelViewMut};
use crate::dispatch::opts::{ColumnExtent, DebandOpts};
use crate::dispatch::strips::strip_rows;
use crate::engine::passes::{WindowStats, deband_window};
use crate::foundation::abort::AbortSignal;
use crate::foundation::core::RectI;
use crate::foundation::error::{DebandError, DebandResult};
use crate::foundation::pixel::Pixel;
use crate::host::frame::{ImageMut, ImageRef, RenderArgs};

/// Frame render statistics, summed over all strips.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Strips dispatched (equal to the thread count).
    pub strips: usize,
    /// Rows fully processed by the row pass.
    pub rows_scanned: usize,
    /// Columns fully processed by the column pass, counted once per strip.
    pub columns_scanned: usize,
    /// Horizontal bands rebuilt.
    pub row_bands: usize,
    /// Vertical bands rebuilt, counted once per strip they were written in.
    pub column_bands: usize,
    /// The abort signal fired; the destination holds a partial result.
    pub aborted: bool,
}

impl RenderStats {
    fn add(&mut self, w: &WindowStats) {
        self.rows_scanned += w.rows.lines;
        self.columns_scanned += w.columns.lines;
        self.row_bands += w.rows.bands;
        self.column_bands += w.columns.bands;
        self.aborted |= w.aborted();
    }
}

/// A debanding context scoped to one host session.
///
/// Holds the validated options and, for more than one thread, a dedicated worker pool sized
/// to the strip count. No per-frame state is kept between renders.
pub struct DebandSession {
    opts: DebandOpts,
    pool: Option<rayon::ThreadPool>,
}

impl DebandSession {
    pub fn new(opts: DebandOpts) -> DebandResult<Self> {
        opts.validate()?;
        let pool = if opts.threads > 1 {
            Some(build_thread_pool(opts.threads)?)
        } else {
            None
        };
        Ok(Self { opts, pool })
    }

    pub fn opts(&self) -> &DebandOpts {
        &self.opts
    }

    /// Deband one frame as handed over by a host.
    ///
    /// Formats are checked first; a mismatch fails the frame without writing anything.
    pub fn render(
        &self,
        args: RenderArgs<'_>,
        abort: &dyn AbortSignal,
    ) -> DebandResult<RenderStats> {
        args.check_formats()?;
        if args.mask.is_some() {
            tracing::debug!("mask clip connected; masking is not applied");
        }
        match (args.src, args.dst) {
            (ImageRef::Rgba(src), ImageMut::Rgba(dst)) => {
                self.render_plane(src, dst, args.window, abort)
            }
            (ImageRef::Alpha(src), ImageMut::Alpha(dst)) => {
                self.render_plane(src, dst, args.window, abort)
            }
            (src, dst) => Err(DebandError::format(format!(
                "source is {} but destination is {}",
                src.layout(),
                dst.layout()
            ))),
        }
    }

    /// Deband `window` of `src` into `dst`, one strip per worker.
    ///
    /// Each worker owns a disjoint row range of `dst`. Cancellation is polled before every
    /// row and column; an aborted frame returns `Ok` with [`RenderStats::aborted`] set.
    #[tracing::instrument(skip(self, src, dst, abort), fields(threads = self.opts.threads))]
    pub fn render_plane<'d, P: Pixel>(
        &self,
        src: PixelView<'_, P>,
        dst: PixelViewMut<'d, P>,
        window: RectI,
        abort: &dyn AbortSignal,
    ) -> DebandResult<RenderStats> {
        if !src.bounds().contains_rect(window) {
            return Err(DebandError::validation(format!(
                "render window {window:?} is outside the source rect {:?}",
                src.bounds()
            )));
        }
        if !dst.bounds().contains_rect(window) {
            return Err(DebandError::validation(format!(
                "render window {window:?} is outside the destination rect {:?}",
                dst.bounds()
            )));
        }

        let mut stats = RenderStats {
            strips: self.opts.threads,
            ..RenderStats::default()
        };
        if window.is_empty() {
            return Ok(stats);
        }

        let rows = strip_rows(window, self.opts.threads);
        let views = dst.split_rows(&rows)?;
        let jobs: Vec<(RectI, PixelViewMut<'d, P>)> = rows
            .into_iter()
            .map(|r| window.with_rows(r))
            .zip(views)
            .collect();

        let run = |(strip, mut view): (RectI, PixelViewMut<'d, P>)| {
            tracing::debug!(y1 = strip.y1, y2 = strip.y2, "deband strip");
            let scan = self.column_scan_rows(window, strip);
            deband_window(&src, &mut view, strip, scan, self.opts.passes, abort)
        };

        let results: Vec<DebandResult<WindowStats>> = match &self.pool {
            Some(pool) => pool.install(|| jobs.into_par_iter().map(run).collect()),
            None => jobs.into_iter().map(run).collect(),
        };
        for r in results {
            stats.add(&r?);
        }

        if stats.aborted {
            tracing::info!(
                rows = stats.rows_scanned,
                columns = stats.columns_scanned,
                "deband aborted; destination is partial"
            );
        } else {
            tracing::debug!(
                row_bands = stats.row_bands,
                column_bands = stats.column_bands,
                "deband complete"
            );
        }
        Ok(stats)
    }

    fn column_scan_rows(&self, window: RectI, strip: RectI) -> Range<i32> {
        match self.opts.column_extent {
            ColumnExtent::Strip => strip.rows(),
            ColumnExtent::Window => window.rows(),
        }
    }
}

fn build_thread_pool(threads: usize) -> DebandResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("deband-{i}"))
        .build()
        .map_err(|e| DebandError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/session.rs"]
mod tests;
