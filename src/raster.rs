//! SVG rasterization and raster-buffer normalization.
//!
//! [`rasterize`] renders recolored vector bytes into a fixed-size RGBA
//! square. [`RasterImage`] keeps an explicit row stride because raster
//! backends are free to pad rows for alignment; [`RasterImage::tighten`]
//! produces the stride-free [`TightBuffer`] that the raw export and the
//! atlas packer require. Swapping the rendering backend must not touch
//! anything downstream of `tighten`.

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::Error;

/// A straight-alpha RGBA8 raster with an explicit row stride in bytes.
///
/// `stride >= width * 4`; bytes past `width * 4` in each row are padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wraps raw backend output. Panics if the buffer does not hold
    /// `height` rows of `stride` bytes or the stride is too small.
    pub fn from_raw(width: u32, height: u32, stride: usize, data: Vec<u8>) -> Self {
        assert!(stride >= width as usize * 4, "stride smaller than a row");
        assert_eq!(data.len(), stride * height as usize, "buffer/stride mismatch");
        Self {
            width,
            height,
            stride,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Copies each row's leading `width * 4` bytes into a contiguous
    /// buffer, discarding per-row padding.
    pub fn tighten(&self) -> TightBuffer {
        let row_len = self.width as usize * 4;
        let mut bytes = Vec::with_capacity(row_len * self.height as usize);
        for row in self.data.chunks_exact(self.stride) {
            bytes.extend_from_slice(&row[..row_len]);
        }
        TightBuffer {
            width: self.width,
            height: self.height,
            bytes,
        }
    }
}

/// Stride-free, row-major RGBA8 pixel data of exact known length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TightBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl TightBuffer {
    /// Builds a buffer from raw parts. Pipeline code obtains tight buffers
    /// via [`RasterImage::tighten`]; this exists for callers assembling
    /// atlases from externally produced pixel data.
    pub fn new(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bytes,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Renders SVG bytes into a `size_px x size_px` straight-alpha RGBA square.
///
/// The canvas starts fully transparent and the content is scaled
/// independently on each axis to exactly fill the target, matching how the
/// consumer expects icons to occupy their whole cell. Rendering is
/// anti-aliased and deterministic for identical input.
///
/// Returns [`Error::Render`] if the bytes are rejected by the SVG backend;
/// well-formed XML can still fail here (e.g. an `svg` element with no
/// usable size).
pub fn rasterize(svg: &[u8], size_px: u32) -> Result<RasterImage, Error> {
    let tree = Tree::from_data(svg, &Options::default())?;

    let mut pixmap =
        Pixmap::new(size_px, size_px).ok_or(Error::Render(resvg::usvg::Error::InvalidSize))?;

    let svg_size = tree.size();
    let transform = Transform::from_scale(
        size_px as f32 / svg_size.width(),
        size_px as f32 / svg_size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia pixels are premultiplied; exported buffers are straight alpha.
    let mut data = Vec::with_capacity(size_px as usize * size_px as usize * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    Ok(RasterImage::from_raw(
        size_px,
        size_px,
        size_px as usize * 4,
        data,
    ))
}
