//! Band detection and ramp reconstruction along a single scan line.
//!
//! Everything here is axis-agnostic: the row pass feeds slices, the column pass feeds strided
//! columns.

use std::marker::PhantomData;
use std::ops::Range;

use crate::buffer::line::{Line, LineMut};
use crate::foundation::pixel::{Pixel, lerp_steps, mean, midpoint};

/// A maximal run of at least two adjacent-equal pixels, `start..=end` along the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Band {
    pub start: usize,
    pub end: usize,
}

impl Band {
    #[allow(clippy::len_without_is_empty)]
    pub fn len(self) -> usize {
        self.end - self.start + 1
    }
}

/// How reconstructed values land in the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Composite {
    /// Overwrite.
    Replace,
    /// Per-channel mean with whatever the destination already holds.
    Average,
}

/// Iterator over the bands of a line, left to right.
pub struct Bands<'l, P, L: ?Sized> {
    line: &'l L,
    pos: usize,
    _pixel: PhantomData<P>,
}

impl<'l, P, L> Bands<'l, P, L>
where
    P: Pixel,
    L: Line<P> + ?Sized,
{
    pub fn new(line: &'l L) -> Self {
        Self {
            line,
            pos: 0,
            _pixel: PhantomData,
        }
    }
}

impl<P, L> Iterator for Bands<'_, P, L>
where
    P: Pixel,
    L: Line<P> + ?Sized,
{
    type Item = Band;

    fn next(&mut self) -> Option<Band> {
        let n = self.line.len();
        let mut start = self.pos;
        while start + 1 < n && self.line.at(start) != self.line.at(start + 1) {
            start += 1;
        }
        if start + 1 >= n {
            self.pos = n;
            return None;
        }

        let value = self.line.at(start);
        let mut end = start + 1;
        while end + 1 < n && self.line.at(end + 1) == value {
            end += 1;
        }
        self.pos = end + 1;
        Some(Band { start, end })
    }
}

/// Colors the ramp runs between: each band edge half-blended with its outside neighbour,
/// or the edge itself where the line ends.
pub fn boundary_colors<P, L>(line: &L, band: Band) -> (P, P)
where
    P: Pixel,
    L: Line<P> + ?Sized,
{
    let first = line.at(band.start);
    let left = match band.start.checked_sub(1) {
        Some(outside) => midpoint(line.at(outside), first),
        None => first,
    };

    let last = line.at(band.end);
    let right = if band.end + 1 < line.len() {
        midpoint(line.at(band.end + 1), last)
    } else {
        last
    };

    (left, right)
}

/// Value of the ramp at line position `i` inside `band`.
///
/// The denominator is one more than the band length so neither end reaches its boundary
/// color.
#[inline]
pub fn ramp_value<P: Pixel>(left: P, right: P, band: Band, i: usize) -> P {
    lerp_steps(left, right, i - band.start + 1, band.len() + 1)
}

#[inline]
fn emit<P: Pixel, D: LineMut<P> + ?Sized>(dst: &mut D, at: usize, value: P, composite: Composite) {
    let slot = dst.slot(at);
    *slot = match composite {
        Composite::Replace => value,
        Composite::Average => mean(*slot, value),
    };
}

/// Rebuild one line: bands become ramps, every other pixel is copied.
///
/// Detection reads all of `src`; only positions in `write` reach `dst`, whose index 0 is
/// `write.start`. Returns the number of bands that overlapped `write`.
pub fn reconstruct_line<P, L, D>(
    src: &L,
    dst: &mut D,
    write: Range<usize>,
    composite: Composite,
) -> usize
where
    P: Pixel,
    L: Line<P> + ?Sized,
    D: LineMut<P> + ?Sized,
{
    debug_assert!(write.end <= src.len());
    debug_assert_eq!(dst.len(), write.len());
    if write.is_empty() {
        return 0;
    }

    let mut copy_from = 0;
    let mut bands = 0;

    for band in Bands::new(src) {
        if band.start >= write.end {
            break;
        }
        for i in copy_from.max(write.start)..band.start.min(write.end) {
            emit(dst, i - write.start, src.at(i), composite);
        }
        copy_from = band.end + 1;
        if band.end < write.start {
            continue;
        }

        let (left, right) = boundary_colors(src, band);
        // A band covering the whole line has no outside neighbours: both ends are its value.
        let spans_line = band.start == 0 && band.end + 1 == src.len();
        for i in band.start.max(write.start)..=band.end.min(write.end - 1) {
            let value = if spans_line {
                left
            } else {
                ramp_value(left, right, band, i)
            };
            emit(dst, i - write.start, value, composite);
        }
        bands += 1;
    }

    for i in copy_from.max(write.start)..write.end {
        emit(dst, i - write.start, src.at(i), composite);
    }
    bands
}

#[cfg(test)]
#[path = "../../tests/unit/engine/bands.rs"]
mod tests;
