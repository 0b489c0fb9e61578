use crate::error::BmpError;

/// Resource caps applied to a BMP header before any pixels are decoded.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the decoded [`PixelBuffer`](crate::PixelBuffer).
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Reject a `width` x `height` image before the decoder allocates for it.
    ///
    /// Memory is counted at 4 bytes per pixel, the size of a decoded [`Pixel`](crate::Pixel).
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BmpError> {
        let pixels = u64::from(width) * u64::from(height);
        let checks = [
            ("width", u64::from(width), self.max_width),
            ("height", u64::from(height), self.max_height),
            ("pixel count", pixels, self.max_pixels),
            ("decoded size in bytes", pixels.saturating_mul(4), self.max_memory_bytes),
        ];
        for (what, value, limit) in checks {
            if let Some(limit) = limit.filter(|&limit| value > limit) {
                return Err(BmpError::LimitExceeded(alloc::format!(
                    "{what} {value} exceeds limit {limit}"
                )));
            }
        }
        Ok(())
    }
}
