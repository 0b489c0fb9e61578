use alloc::vec::Vec;
use enough::{Stop, Unstoppable};

use crate::bmp::{self, ChannelDepth};
use crate::buffer::PixelBuffer;
use crate::error::BmpError;

/// Encode `buffer` as BMP with the given per-channel bit widths.
///
/// Supported `(red, green, blue, alpha)` combinations are `(5,5,5,0)`,
/// `(5,6,5,0)`, `(8,8,8,0)` and `(8,8,8,8)`; anything else is
/// [`BmpError::NotSupported`]. Use `8, 8, 8, 0` when in doubt.
pub fn encode(
    buffer: &PixelBuffer,
    red_bits: u8,
    green_bits: u8,
    blue_bits: u8,
    alpha_bits: u8,
) -> Result<Vec<u8>, BmpError> {
    EncodeRequest::from_bits(red_bits, green_bits, blue_bits, alpha_bits)?
        .encode(buffer, Unstoppable)
}

/// BMP encode configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeRequest {
    depth: ChannelDepth,
}

impl EncodeRequest {
    pub fn new(depth: ChannelDepth) -> Self {
        Self { depth }
    }

    /// Opaque 24-bit output, readable everywhere.
    pub fn rgb888() -> Self {
        Self::new(ChannelDepth::Rgb888)
    }

    /// 32-bit output keeping alpha.
    pub fn rgba8888() -> Self {
        Self::new(ChannelDepth::Rgba8888)
    }

    pub fn from_bits(
        red_bits: u8,
        green_bits: u8,
        blue_bits: u8,
        alpha_bits: u8,
    ) -> Result<Self, BmpError> {
        ChannelDepth::from_bits(red_bits, green_bits, blue_bits, alpha_bits).map(Self::new)
    }

    pub fn depth(&self) -> ChannelDepth {
        self.depth
    }

    /// Encode, polling `stop` between rows.
    pub fn encode(&self, buffer: &PixelBuffer, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
        bmp::encode(buffer, self.depth, &stop)
    }
}
