use alloc::vec;
use alloc::vec::Vec;

use crate::error::BmpError;
use crate::pixel::Pixel;

/// Owned RGBA image, stored top-down in row-major order.
///
/// Row 0 is the visual top row regardless of how the image was stored on
/// disk. Dropping the buffer releases its storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Allocate a `width` x `height` buffer with every cell set to `fill`.
    ///
    /// Returns [`BmpError::Allocation`] for a zero dimension or a pixel count
    /// that does not fit in memory.
    pub fn new(width: u32, height: u32, fill: Pixel) -> Result<Self, BmpError> {
        let len = checked_len(width, height).ok_or(BmpError::Allocation { width, height })?;
        Ok(Self {
            width,
            height,
            pixels: vec![fill; len],
        })
    }

    /// Wrap existing top-down pixels. `pixels.len()` must equal `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, BmpError> {
        match checked_len(width, height) {
            Some(len) if len == pixels.len() => Ok(Self {
                width,
                height,
                pixels,
            }),
            _ => Err(BmpError::Allocation { width, height }),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` addresses a cell of this buffer.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.index(x, y)]
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
        let idx = self.index(x, y);
        self.pixels[idx] = pixel;
    }

    /// Bounds-checked read with signed coordinates, for drawing callbacks.
    pub fn get_checked(&self, x: i64, y: i64) -> Option<Pixel> {
        if self.contains(x, y) {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// All pixels, top row first.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> core::slice::ChunksExact<'_, Pixel> {
        self.pixels.chunks_exact(self.width as usize)
    }

    /// Give up the buffer and return its storage.
    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Pixel> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }

    /// Zero-copy mutable view as an [`imgref::ImgRefMut`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref_mut(&mut self) -> imgref::ImgRefMut<'_, Pixel> {
        imgref::ImgRefMut::new(&mut self.pixels, self.width as usize, self.height as usize)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} buffer",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }
}

fn checked_len(width: u32, height: u32) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    (width as usize).checked_mul(height as usize)
}
