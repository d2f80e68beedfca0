//! One-dimensional scan lines over a buffer: rows are plain slices, columns are strided.
//!
//! The band engine only ever walks a [`Line`] and writes a [`LineMut`], so the row pass and
//! the column pass share one implementation.

/// Read access to a scan line.
///
/// `at` indexes like a slice: `i` must be `< len()`.
pub trait Line<P> {
    fn len(&self) -> usize;

    fn at(&self, i: usize) -> P;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write access to a scan line.
pub trait LineMut<P> {
    fn len(&self) -> usize;

    fn slot(&mut self, i: usize) -> &mut P;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P: Copy> Line<P> for [P] {
    #[inline]
    fn len(&self) -> usize {
        <[P]>::len(self)
    }

    #[inline]
    fn at(&self, i: usize) -> P {
        self[i]
    }
}

impl<P> LineMut<P> for [P] {
    #[inline]
    fn len(&self) -> usize {
        <[P]>::len(self)
    }

    #[inline]
    fn slot(&mut self, i: usize) -> &mut P {
        &mut self[i]
    }
}

/// A vertical run of pixels: element `i` lives at `start + i * stride`.
#[derive(Clone, Copy, Debug)]
pub struct Column<'a, P> {
    data: &'a [P],
    start: usize,
    stride: usize,
    len: usize,
}

impl<'a, P: Copy> Column<'a, P> {
    /// Returns `None` if the last element would fall outside `data`.
    pub(crate) fn new(data: &'a [P], start: usize, stride: usize, len: usize) -> Option<Self> {
        if len > 0 {
            let last = (len - 1).checked_mul(stride)?.checked_add(start)?;
            if last >= data.len() {
                return None;
            }
        }
        Some(Self {
            data,
            start,
            stride,
            len,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = P> + '_ {
        (0..self.len).map(|i| self.at(i))
    }
}

impl<P: Copy> Line<P> for Column<'_, P> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn at(&self, i: usize) -> P {
        debug_assert!(i < self.len);
        self.data[self.start + i * self.stride]
    }
}

/// Mutable counterpart of [`Column`].
#[derive(Debug)]
pub struct ColumnMut<'a, P> {
    data: &'a mut [P],
    start: usize,
    stride: usize,
    len: usize,
}

impl<'a, P> ColumnMut<'a, P> {
    pub(crate) fn new(data: &'a mut [P], start: usize, stride: usize, len: usize) -> Option<Self> {
        if len > 0 {
            let last = (len - 1).checked_mul(stride)?.checked_add(start)?;
            if last >= data.len() {
                return None;
            }
        }
        Some(Self {
            data,
            start,
            stride,
            len,
        })
    }
}

impl<P> LineMut<P> for ColumnMut<'_, P> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn slot(&mut self, i: usize) -> &mut P {
        debug_assert!(i < self.len);
        &mut self.data[self.start + i * self.stride]
    }
}
