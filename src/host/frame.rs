//! The shape of one render call as a host hands it over.
//!
//! A host owns the image memory, fetches it for each frame and releases it once
//! [`DebandSession::render`](crate::DebandSession::render) returns. The enum variant of each
//! image is its component/depth tag; only 32-bit float layouts exist, so integer images are
//! turned away before they can be described.

use std::fmt;

use crate::buffer::view::{PixelView, PixelViewMut};
use crate::foundation::core::RectI;
use crate::foundation::error::{DebandError, DebandResult};
use crate::foundation::pixel::{AlphaF32, RgbaF32};

/// Components of a float image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// Four channels: r, g, b, a.
    Rgba,
    /// A single alpha channel.
    Alpha,
}

impl fmt::Display for PixelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgba => f.write_str("RGBA f32"),
            Self::Alpha => f.write_str("alpha f32"),
        }
    }
}

/// A read-only host image.
#[derive(Clone, Copy, Debug)]
pub enum ImageRef<'a> {
    Rgba(PixelView<'a, RgbaF32>),
    Alpha(PixelView<'a, AlphaF32>),
}

impl ImageRef<'_> {
    pub fn layout(&self) -> PixelLayout {
        match self {
            Self::Rgba(_) => PixelLayout::Rgba,
            Self::Alpha(_) => PixelLayout::Alpha,
        }
    }

    pub fn bounds(&self) -> RectI {
        match self {
            Self::Rgba(v) => v.bounds(),
            Self::Alpha(v) => v.bounds(),
        }
    }
}

/// A writable host image.
#[derive(Debug)]
pub enum ImageMut<'a> {
    Rgba(PixelViewMut<'a, RgbaF32>),
    Alpha(PixelViewMut<'a, AlphaF32>),
}

impl ImageMut<'_> {
    pub fn layout(&self) -> PixelLayout {
        match self {
            Self::Rgba(_) => PixelLayout::Rgba,
            Self::Alpha(_) => PixelLayout::Alpha,
        }
    }

    pub fn bounds(&self) -> RectI {
        match self {
            Self::Rgba(v) => v.bounds(),
            Self::Alpha(v) => v.bounds(),
        }
    }
}

/// Everything one frame render needs.
#[derive(Debug)]
pub struct RenderArgs<'a> {
    pub src: ImageRef<'a>,
    pub dst: ImageMut<'a>,
    /// Optional mask clip. It is checked for format but not applied.
    pub mask: Option<ImageRef<'a>>,
    /// The render window to fill.
    pub window: RectI,
}

impl<'a> RenderArgs<'a> {
    pub fn new(src: ImageRef<'a>, dst: ImageMut<'a>, window: RectI) -> Self {
        Self {
            src,
            dst,
            mask: None,
            window,
        }
    }

    pub fn with_mask(mut self, mask: ImageRef<'a>) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Format agreement between the clips, checked before any pixel is touched.
    pub fn check_formats(&self) -> DebandResult<()> {
        if let Some(mask) = &self.mask
            && mask.layout() != PixelLayout::Alpha
        {
            return Err(DebandError::format(format!(
                "mask must be a single-channel image, got {}",
                mask.layout()
            )));
        }
        let (src, dst) = (self.src.layout(), self.dst.layout());
        if src != dst {
            return Err(DebandError::format(format!(
                "source is {src} but destination is {dst}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/frame.rs"]
mod tests;
