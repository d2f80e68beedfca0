use std::ops::Range;

use crate::foundation::error::{DebandError, DebandResult};

/// Integer pixel rectangle, `x1 <= x < x2` and `y1 <= y < y2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RectI {
    /// Left edge (inclusive).
    pub x1: i32,
    /// Bottom/top edge (inclusive), whichever the host counts from.
    pub y1: i32,
    /// Right edge (exclusive).
    pub x2: i32,
    /// Opposite vertical edge (exclusive).
    pub y2: i32,
}

impl RectI {
    /// Build a rectangle, rejecting inverted edges.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> DebandResult<Self> {
        if x1 > x2 || y1 > y2 {
            return Err(DebandError::validation(format!(
                "rect edges must satisfy x1<=x2 and y1<=y2 (got x={x1}..{x2}, y={y1}..{y2})"
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Rectangle anchored at the origin.
    pub fn from_size(width: u32, height: u32) -> DebandResult<Self> {
        let w = i32::try_from(width)
            .map_err(|_| DebandError::validation("rect width does not fit in i32"))?;
        let h = i32::try_from(height)
            .map_err(|_| DebandError::validation("rect height does not fit in i32"))?;
        Self::new(0, 0, w, h)
    }

    pub fn width(self) -> usize {
        (i64::from(self.x2) - i64::from(self.x1)).max(0) as usize
    }

    pub fn height(self) -> usize {
        (i64::from(self.y2) - i64::from(self.y1)).max(0) as usize
    }

    pub fn is_empty(self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(self, x: i32, y: i32) -> bool {
        self.x1 <= x && x < self.x2 && self.y1 <= y && y < self.y2
    }

    /// Whether `other` lies entirely inside `self`. Empty rectangles are contained anywhere.
    pub fn contains_rect(self, other: RectI) -> bool {
        other.is_empty()
            || (self.x1 <= other.x1
                && other.x2 <= self.x2
                && self.y1 <= other.y1
                && other.y2 <= self.y2)
    }

    /// Same horizontal extent, vertical extent replaced by `rows`.
    pub fn with_rows(self, rows: Range<i32>) -> Self {
        Self {
            y1: rows.start,
            y2: rows.end,
            ..self
        }
    }

    pub fn rows(self) -> Range<i32> {
        self.y1..self.y2
    }

    pub fn columns(self) -> Range<i32> {
        self.x1..self.x2
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
