/// A float pixel the band engine can scan.
///
/// Equality is the derived `PartialEq`: exact per-channel float comparison, no tolerance.
/// All blending goes through [`Pixel::zip_map`] so the engine is written once for every
/// channel count.
pub trait Pixel: Copy + PartialEq + Send + Sync + 'static {
    /// Combine two pixels channel by channel.
    fn zip_map(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self;
}

/// Straight RGBA, one `f32` per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct RgbaF32 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl RgbaF32 {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray.
    pub const fn gray(v: f32) -> Self {
        Self::new(v, v, v, 1.0)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f32; 4]> for RgbaF32 {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl Pixel for RgbaF32 {
    #[inline]
    fn zip_map(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self {
            r: f(self.r, other.r),
            g: f(self.g, other.g),
            b: f(self.b, other.b),
            a: f(self.a, other.a),
        }
    }
}

/// Single-channel alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(transparent)]
pub struct AlphaF32(pub f32);

impl Pixel for AlphaF32 {
    #[inline]
    fn zip_map(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self(f(self.0, other.0))
    }
}

/// Per-channel `(a + b) * 0.5`.
#[inline]
pub fn midpoint<P: Pixel>(a: P, b: P) -> P {
    a.zip_map(b, |x, y| (x + y) * 0.5)
}

/// Per-channel `(a + b) / 2`, the two-pass combine.
#[inline]
pub fn mean<P: Pixel>(a: P, b: P) -> P {
    a.zip_map(b, |x, y| (x + y) / 2.0)
}

/// Per-channel `left*(denom-numer)/denom + right*numer/denom`.
#[inline]
pub fn lerp_steps<P: Pixel>(left: P, right: P, numer: usize, denom: usize) -> P {
    let d = denom as f32;
    let wl = (denom - numer) as f32;
    let wr = numer as f32;
    left.zip_map(right, |l, r| l * wl / d + r * wr / d)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/pixel.rs"]
mod tests;
