//! Debander removes quantization banding from float images.
//!
//! Low bit-depth encodes turn smooth gradients into runs of identical pixels. This crate finds
//! those runs ("bands") along every row and every column and rebuilds each one as a linear
//! ramp between its boundary colors, where a boundary color is the band edge half-blended with
//! the neighbouring pixel outside the band.
//!
//! # Pipeline overview
//!
//! 1. **Partition**: the render window is cut into `threads` horizontal strips.
//! 2. **Row pass**: each worker rebuilds the horizontal bands of its strip.
//! 3. **Column pass**: the same worker rebuilds vertical bands and averages them with the
//!    row pass result.
//!
//! Workers write disjoint row ranges of the destination, so no locking is involved. By default
//! column bands are detected inside each strip only, which means a vertical band crossing a
//! strip boundary is rebuilt as two bands and the output depends on the thread count. Set
//! [`ColumnExtent::Window`] to detect over the whole window height instead.
//!
//! Cancellation is cooperative: an [`AbortSignal`] is polled before every row and column and
//! an aborted render leaves the destination partially written.
//!
//! Only 32-bit float images are supported, as RGBA ([`RgbaF32`]) or a single alpha channel
//! ([`AlphaF32`]); both run through the same generic engine.
#![forbid(unsafe_code)]

mod buffer;
mod dispatch;
mod engine;
mod foundation;
mod host;

pub use buffer::line::{Column, ColumnMut, Line, LineMut};
pub use buffer::view::{PixelView, PixelViewMut};
pub use dispatch::opts::{ColumnExtent, DebandOpts};
pub use dispatch::session::{DebandSession, RenderStats};
pub use dispatch::strips::{strip_rows, strip_windows};
pub use engine::bands::{Band, Bands, Composite, boundary_colors, ramp_value, reconstruct_line};
pub use engine::passes::{Passes, PassStats, WindowStats, column_pass, deband_window, row_pass};
pub use foundation::abort::{AbortSignal, NeverAbort};
pub use foundation::core::RectI;
pub use foundation::error::{DebandError, DebandResult};
pub use foundation::pixel::{AlphaF32, Pixel, RgbaF32};
pub use host::frame::{ImageMut, ImageRef, PixelLayout, RenderArgs};
