use std::ops::Range;

use crate::foundation::core::RectI;

/// Row ranges of the `n` horizontal strips covering `window`.
///
/// Strip `i` spans `y1 + i*dy/n .. y1 + min((i+1)*dy/n, dy)`, so the strips are contiguous,
/// disjoint and gap-free. Strips may be empty when `n` exceeds the window height.
pub fn strip_rows(window: RectI, n: usize) -> Vec<Range<i32>> {
    let n = n.max(1) as u64;
    let dy = window.height() as u64;
    (0..n)
        .map(|i| {
            let lo = i * dy / n;
            let hi = ((i + 1) * dy / n).min(dy);
            (window.y1 + lo as i32)..(window.y1 + hi as i32)
        })
        .collect()
}

/// The strips as rectangles sharing the window's horizontal extent.
pub fn strip_windows(window: RectI, n: usize) -> Vec<RectI> {
    strip_rows(window, n)
        .into_iter()
        .map(|rows| window.with_rows(rows))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/strips.rs"]
mod tests;
