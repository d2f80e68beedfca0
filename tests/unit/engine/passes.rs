use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::*;
use crate::foundation::abort::NeverAbort;
use crate::foundation::pixel::AlphaF32;

const SENTINEL: f32 = -7.0;

/// Fires once more than `n` lines have been started.
struct AbortAfter {
    polled: AtomicUsize,
    n: usize,
}

impl AbortSignal for AbortAfter {
    fn is_aborted(&self) -> bool {
        self.polled.fetch_add(1, Ordering::Relaxed) >= self.n
    }
}

/// Fires on exactly one poll, then reads clear again.
struct FiresOnce {
    polled: AtomicUsize,
    at: usize,
}

impl AbortSignal for FiresOnce {
    fn is_aborted(&self) -> bool {
        self.polled.fetch_add(1, Ordering::Relaxed) == self.at
    }
}

fn plane(w: usize, rows: &[&[f32]]) -> Vec<AlphaF32> {
    let out: Vec<AlphaF32> = rows.iter().flat_map(|r| r.iter().copied().map(AlphaF32)).collect();
    assert_eq!(out.len(), w * rows.len());
    out
}

fn run(src: &[AlphaF32], w: u32, h: u32, passes: Passes) -> Vec<f32> {
    let rect = RectI::from_size(w, h).unwrap();
    let view = PixelView::packed(src, rect).unwrap();
    let mut out = vec![AlphaF32(SENTINEL); src.len()];
    let mut dst = PixelViewMut::packed(&mut out, rect).unwrap();
    deband_window(&view, &mut dst, rect, rect.rows(), passes, &NeverAbort).unwrap();
    out.into_iter().map(|p| p.0).collect()
}

fn transpose(src: &[AlphaF32], w: usize, h: usize) -> Vec<AlphaF32> {
    let mut out = vec![AlphaF32(0.0); src.len()];
    for y in 0..h {
        for x in 0..w {
            out[x * h + y] = src[y * w + x];
        }
    }
    out
}

fn sample() -> Vec<AlphaF32> {
    plane(
        5,
        &[
            &[0.0, 0.0, 0.0, 0.5, 0.5],
            &[0.0, 0.25, 0.25, 0.5, 1.0],
            &[0.0, 0.75, 0.1, 0.5, 0.9],
            &[1.0, 0.75, 0.1, 0.2, 0.9],
        ],
    )
}

#[test]
fn row_pass_fills_every_pixel_of_the_window() {
    let src = sample();
    let out = run(&src, 5, 4, Passes::RowsOnly);
    assert!(out.iter().all(|&v| v != SENTINEL));
}

#[test]
fn row_only_output_ignores_other_rows() {
    let src = sample();
    let mut altered = src.clone();
    for p in &mut altered[5..] {
        p.0 += 3.0;
    }
    let a = run(&src, 5, 4, Passes::RowsOnly);
    let b = run(&altered, 5, 4, Passes::RowsOnly);
    assert_eq!(&a[..5], &b[..5]);
}

#[test]
fn column_only_is_row_only_on_the_transpose() {
    let src = sample();
    let cols = run(&src, 5, 4, Passes::ColumnsOnly);
    let rows_t = run(&transpose(&src, 5, 4), 4, 5, Passes::RowsOnly);
    let rows_t: Vec<AlphaF32> = rows_t.into_iter().map(AlphaF32).collect();
    let back: Vec<f32> = transpose(&rows_t, 4, 5).into_iter().map(|p| p.0).collect();
    assert_eq!(cols, back);
}

#[test]
fn combined_is_mean_of_single_axis_results() {
    let src = sample();
    let rows = run(&src, 5, 4, Passes::RowsOnly);
    let cols = run(&src, 5, 4, Passes::ColumnsOnly);
    let both = run(&src, 5, 4, Passes::Both);
    for i in 0..both.len() {
        assert_eq!(both[i], (rows[i] + cols[i]) / 2.0, "pixel {i}");
    }
}

#[test]
fn pass_stats_count_lines_and_bands() {
    let src = sample();
    let rect = RectI::from_size(5, 4).unwrap();
    let view = PixelView::packed(&src, rect).unwrap();
    let mut out = vec![AlphaF32(0.0); src.len()];
    let mut dst = PixelViewMut::packed(&mut out, rect).unwrap();
    let stats = deband_window(&view, &mut dst, rect, rect.rows(), Passes::Both, &NeverAbort)
        .unwrap();

    assert_eq!(stats.rows.lines, 4);
    assert_eq!(stats.columns.lines, 5);
    // rows: [0,2]+[3,4], [1,2], none, none
    assert_eq!(stats.rows.bands, 3);
    // columns: x0 [0,2], x1 [2,3], x2 [2,3], x3 [0,2], x4 [2,3]
    assert_eq!(stats.columns.bands, 5);
    assert!(!stats.aborted());
}

#[test]
fn raised_flag_leaves_destination_untouched() {
    let src = sample();
    let rect = RectI::from_size(5, 4).unwrap();
    let view = PixelView::packed(&src, rect).unwrap();
    let mut out = vec![AlphaF32(SENTINEL); src.len()];
    let mut dst = PixelViewMut::packed(&mut out, rect).unwrap();
    let flag = AtomicBool::new(true);

    let stats = deband_window(&view, &mut dst, rect, rect.rows(), Passes::Both, &flag).unwrap();
    assert!(stats.rows.aborted);
    assert_eq!(stats.rows.lines, 0);
    assert_eq!(stats.columns, PassStats::default());
    assert!(out.iter().all(|p| p.0 == SENTINEL));
}

#[test]
fn abort_mid_pass_keeps_finished_rows() {
    let src = sample();
    let rect = RectI::from_size(5, 4).unwrap();
    let view = PixelView::packed(&src, rect).unwrap();
    let mut out = vec![AlphaF32(SENTINEL); src.len()];
    let mut dst = PixelViewMut::packed(&mut out, rect).unwrap();
    let abort = AbortAfter {
        polled: AtomicUsize::new(0),
        n: 2,
    };

    let stats = deband_window(&view, &mut dst, rect, rect.rows(), Passes::Both, &abort).unwrap();
    assert_eq!(stats.rows.lines, 2);
    assert!(stats.rows.aborted);
    assert_eq!(stats.columns.lines, 0);

    let full = run(&src, 5, 4, Passes::RowsOnly);
    let got: Vec<f32> = out.iter().map(|p| p.0).collect();
    assert_eq!(&got[..10], &full[..10]);
    assert!(got[10..].iter().all(|&v| v == SENTINEL));
}

#[test]
fn column_scan_must_cover_the_window() {
    let src = sample();
    let rect = RectI::from_size(5, 4).unwrap();
    let view = PixelView::packed(&src, rect).unwrap();
    let mut out = vec![AlphaF32(0.0); src.len()];
    let mut dst = PixelViewMut::packed(&mut out, rect).unwrap();
    let err = column_pass(&view, &mut dst, rect, 1..4, Composite::Replace, &NeverAbort);
    assert!(err.is_err());
}

#[test]
fn column_pass_is_skipped_after_row_abort_even_if_signal_clears() {
    let src = sample();
    let rect = RectI::from_size(5, 4).unwrap();
    let view = PixelView::packed(&src, rect).unwrap();
    let mut out = vec![AlphaF32(SENTINEL); src.len()];
    let mut dst = PixelViewMut::packed(&mut out, rect).unwrap();
    let abort = FiresOnce {
        polled: AtomicUsize::new(0),
        at: 1,
    };

    let stats = deband_window(&view, &mut dst, rect, rect.rows(), Passes::Both, &abort).unwrap();
    assert_eq!(stats.rows.lines, 1);
    assert!(stats.rows.aborted);
    assert_eq!(stats.columns, PassStats::default());

    let full = run(&src, 5, 4, Passes::RowsOnly);
    let got: Vec<f32> = out.iter().map(|p| p.0).collect();
    assert_eq!(&got[..5], &full[..5]);
    assert!(got[5..].iter().all(|&v| v == SENTINEL), "{got:?}");
}
