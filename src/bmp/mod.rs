//! BMP codec (internal).
//!
//! Use top-level [`crate::decode`], [`crate::encode`], [`crate::DecodeRequest`]
//! and [`crate::EncodeRequest`].

mod decode;
mod encode;
mod mask;

pub use decode::BmpInfo;
pub use mask::{ChannelDepth, ChannelMask};

use crate::buffer::PixelBuffer;
use crate::error::BmpError;
use crate::limits::Limits;
use alloc::vec::Vec;
use enough::Stop;

/// Decode BMP data into a top-down pixel buffer.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BmpError> {
    let info = decode::parse_header(data)?;
    if let Some(limits) = limits {
        limits.check(info.width, info.height)?;
    }
    stop.check()?;
    decode::decode_pixels(data, &info, stop)
}

/// Parse headers only.
pub(crate) fn probe(data: &[u8]) -> Result<BmpInfo, BmpError> {
    decode::parse_header(data)
}

/// Encode to BMP.
pub(crate) fn encode(
    buffer: &PixelBuffer,
    depth: ChannelDepth,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    encode::encode_bmp(buffer, depth, stop)
}

/// Bytes per stored row: `ceil(width * bpp / 32) * 4`.
pub(crate) fn row_size(width: u32, height: u32, bpp: u16) -> Result<usize, BmpError> {
    let bytes = (u64::from(width) * u64::from(bpp)).div_ceil(32) * 4;
    usize::try_from(bytes).map_err(|_| BmpError::DimensionsTooLarge { width, height })
}
