use std::mem::size_of;
use std::ops::Range;

use crate::buffer::line::{Column, ColumnMut};
use crate::foundation::core::RectI;
use crate::foundation::error::{DebandError, DebandResult};
use crate::foundation::pixel::Pixel;

/// Stride and minimum slice length for a rect, shared by both view kinds.
fn layout<P: Pixel>(bounds: RectI, stride_bytes: usize, data_len: usize) -> DebandResult<usize> {
    let px = size_of::<P>();
    if stride_bytes % px != 0 {
        return Err(DebandError::validation(format!(
            "row stride {stride_bytes} bytes is not a whole number of {px}-byte pixels"
        )));
    }
    let stride = stride_bytes / px;
    let width = bounds.width();
    if stride < width {
        return Err(DebandError::validation(format!(
            "row stride of {stride} pixels is narrower than the rect width {width}"
        )));
    }
    let required = if bounds.is_empty() {
        0
    } else {
        (bounds.height() - 1)
            .checked_mul(stride)
            .and_then(|v| v.checked_add(width))
            .ok_or_else(|| DebandError::validation("buffer size overflow"))?
    };
    if data_len < required {
        return Err(DebandError::validation(format!(
            "buffer holds {data_len} pixels, rect {}x{} with stride {stride} needs {required}",
            bounds.width(),
            bounds.height()
        )));
    }
    Ok(stride)
}

fn offset(bounds: RectI, stride: usize, x: i32, y: i32) -> Option<usize> {
    if !bounds.contains(x, y) {
        return None;
    }
    let dx = (x - bounds.x1) as usize;
    let dy = (y - bounds.y1) as usize;
    Some(dy * stride + dx)
}

/// Checks `span` lies inside `[lo, hi)` and returns it as offsets from `lo`.
fn local_span(span: Range<i32>, lo: i32, hi: i32) -> Option<Range<usize>> {
    if span.start > span.end || span.start < lo || span.end > hi {
        return None;
    }
    Some((span.start - lo) as usize..(span.end - lo) as usize)
}

/// Read-only view over caller-owned pixels covering `bounds`.
///
/// Row `y` starts at `(y - bounds.y1) * stride`; the stride is given in bytes at construction
/// to match how hosts describe their images.
#[derive(Clone, Copy, Debug)]
pub struct PixelView<'a, P> {
    data: &'a [P],
    bounds: RectI,
    stride: usize,
}

impl<'a, P: Pixel> PixelView<'a, P> {
    pub fn new(data: &'a [P], bounds: RectI, stride_bytes: usize) -> DebandResult<Self> {
        let stride = layout::<P>(bounds, stride_bytes, data.len())?;
        Ok(Self {
            data,
            bounds,
            stride,
        })
    }

    /// Tightly packed rows.
    pub fn packed(data: &'a [P], bounds: RectI) -> DebandResult<Self> {
        Self::new(data, bounds, bounds.width() * size_of::<P>())
    }

    pub fn bounds(&self) -> RectI {
        self.bounds
    }

    /// Row stride in pixels.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The pixel at `(x, y)`, or `None` outside `bounds`.
    pub fn get(&self, x: i32, y: i32) -> Option<P> {
        offset(self.bounds, self.stride, x, y).map(|i| self.data[i])
    }

    /// Pixels `cols` of row `y`.
    pub fn row(&self, y: i32, cols: Range<i32>) -> Option<&'a [P]> {
        let cols = local_span(cols, self.bounds.x1, self.bounds.x2)?;
        if !(self.bounds.y1..self.bounds.y2).contains(&y) {
            return None;
        }
        let base = (y - self.bounds.y1) as usize * self.stride;
        self.data.get(base + cols.start..base + cols.end)
    }

    /// Pixels `rows` of column `x`, top to bottom in buffer order.
    pub fn column(&self, x: i32, rows: Range<i32>) -> Option<Column<'a, P>> {
        let rows = local_span(rows, self.bounds.y1, self.bounds.y2)?;
        if !(self.bounds.x1..self.bounds.x2).contains(&x) {
            return None;
        }
        let start = rows.start * self.stride + (x - self.bounds.x1) as usize;
        Column::new(self.data, start, self.stride, rows.len())
    }
}

/// Mutable view over caller-owned pixels covering `bounds`.
#[derive(Debug)]
pub struct PixelViewMut<'a, P> {
    data: &'a mut [P],
    bounds: RectI,
    stride: usize,
}

impl<'a, P: Pixel> PixelViewMut<'a, P> {
    pub fn new(data: &'a mut [P], bounds: RectI, stride_bytes: usize) -> DebandResult<Self> {
        let stride = layout::<P>(bounds, stride_bytes, data.len())?;
        Ok(Self {
            data,
            bounds,
            stride,
        })
    }

    pub fn packed(data: &'a mut [P], bounds: RectI) -> DebandResult<Self> {
        let stride_bytes = bounds.width() * size_of::<P>();
        Self::new(data, bounds, stride_bytes)
    }

    pub fn bounds(&self) -> RectI {
        self.bounds
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn as_view(&self) -> PixelView<'_, P> {
        PixelView {
            data: &*self.data,
            bounds: self.bounds,
            stride: self.stride,
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<P> {
        offset(self.bounds, self.stride, x, y).map(|i| self.data[i])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut P> {
        offset(self.bounds, self.stride, x, y).map(|i| &mut self.data[i])
    }

    pub fn row_mut(&mut self, y: i32, cols: Range<i32>) -> Option<&mut [P]> {
        let cols = local_span(cols, self.bounds.x1, self.bounds.x2)?;
        if !(self.bounds.y1..self.bounds.y2).contains(&y) {
            return None;
        }
        let base = (y - self.bounds.y1) as usize * self.stride;
        self.data.get_mut(base + cols.start..base + cols.end)
    }

    pub fn column_mut(&mut self, x: i32, rows: Range<i32>) -> Option<ColumnMut<'_, P>> {
        let rows = local_span(rows, self.bounds.y1, self.bounds.y2)?;
        if !(self.bounds.x1..self.bounds.x2).contains(&x) {
            return None;
        }
        let start = rows.start * self.stride + (x - self.bounds.x1) as usize;
        ColumnMut::new(self.data, start, self.stride, rows.len())
    }

    /// Split into one view per row range, each owning only its own rows.
    ///
    /// Ranges must be ascending, non-overlapping and inside `bounds`; gaps are allowed and
    /// their rows are simply not handed out.
    pub fn split_rows(self, strips: &[Range<i32>]) -> DebandResult<Vec<PixelViewMut<'a, P>>> {
        let Self {
            data,
            bounds,
            stride,
        } = self;
        let mut out = Vec::with_capacity(strips.len());
        let mut rest: &'a mut [P] = data;
        let mut cursor = bounds.y1;

        for rows in strips {
            if rows.start > rows.end || rows.start < cursor || rows.end > bounds.y2 {
                return Err(DebandError::validation(format!(
                    "strip rows {}..{} are out of order or outside {}..{}",
                    rows.start, rows.end, bounds.y1, bounds.y2
                )));
            }

            let skip = ((rows.start - cursor) as usize * stride).min(rest.len());
            let (_, tail) = std::mem::take(&mut rest).split_at_mut(skip);

            let take = ((rows.end - rows.start) as usize * stride).min(tail.len());
            let (strip, tail) = tail.split_at_mut(take);
            rest = tail;
            cursor = rows.end;

            out.push(PixelViewMut {
                data: strip,
                bounds: bounds.with_rows(rows.clone()),
                stride,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/view.rs"]
mod tests;
