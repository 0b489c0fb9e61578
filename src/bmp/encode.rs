//! BMP encoder: 16-bit 5-5-5 / 5-6-5, 24-bit 8-8-8 and 32-bit 8-8-8-8.

use alloc::vec::Vec;
use enough::Stop;
use log::debug;

use super::mask::{ChannelDepth, quantize};
use crate::buffer::PixelBuffer;
use crate::error::BmpError;

/// BITMAPINFOHEADER.
const INFO_HEADER_SIZE: u32 = 40;
/// BITMAPV3INFOHEADER: info header plus red, green, blue and alpha masks.
const V3_INFO_HEADER_SIZE: u32 = 56;

const BI_RGB: u32 = 0;
const BI_BITFIELDS: u32 = 3;

/// 72 DPI in pixels per meter.
const RESOLUTION: i32 = 2835;

/// Encode a buffer as a bottom-up BMP at the given channel depth.
pub(crate) fn encode_bmp(
    buffer: &PixelBuffer,
    depth: ChannelDepth,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    let width = buffer.width();
    let height = buffer.height();
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(BmpError::DimensionsTooLarge { width, height });
    }

    let bpp = depth.bits_per_pixel();
    let bytes_per_pixel = usize::from(bpp / 8);
    let row_size = super::row_size(width, height, bpp)?;
    let bitmap_size = row_size
        .checked_mul(height as usize)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;

    let header_size = if depth.uses_bitfields() {
        V3_INFO_HEADER_SIZE
    } else {
        INFO_HEADER_SIZE
    };
    let data_offset = 14 + header_size;
    let file_size = bitmap_size
        .checked_add(data_offset as usize)
        .filter(|&size| u32::try_from(size).is_ok())
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;

    debug!("encoding {width}x{height} BMP as {depth:?} ({bpp} bpp), {file_size} bytes");

    let mut out = Vec::with_capacity(file_size);
    write_bmp_header(
        &mut out,
        file_size as u32,
        bitmap_size as u32,
        data_offset,
        header_size,
        width,
        height,
        depth,
    );

    let (red_bits, green_bits, blue_bits, alpha_bits) = depth.bits();
    let green_shift = blue_bits;
    let red_shift = blue_bits + green_bits;
    let alpha_shift = blue_bits + green_bits + red_bits;
    let pad_bytes = row_size - width as usize * bytes_per_pixel;

    // Bottom row first.
    for (i, row) in buffer.rows().rev().enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            let word = quantize(px.blue, blue_bits)
                | quantize(px.green, green_bits) << green_shift
                | quantize(px.red, red_bits) << red_shift
                | quantize(px.alpha, alpha_bits) << alpha_shift;
            out.extend_from_slice(&word.to_le_bytes()[..bytes_per_pixel]);
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    Ok(out)
}

#[allow(clippy::too_many_arguments)]
fn write_bmp_header(
    out: &mut Vec<u8>,
    file_size: u32,
    bitmap_size: u32,
    data_offset: u32,
    header_size: u32,
    width: u32,
    height: u32,
    depth: ChannelDepth,
) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&data_offset.to_le_bytes());

    // Info header (40 bytes)
    out.extend_from_slice(&header_size.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&depth.bits_per_pixel().to_le_bytes());
    let compression = if depth.uses_bitfields() {
        BI_BITFIELDS
    } else {
        BI_RGB
    };
    out.extend_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(&bitmap_size.to_le_bytes());
    out.extend_from_slice(&RESOLUTION.to_le_bytes()); // h resolution
    out.extend_from_slice(&RESOLUTION.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors

    // V3 extension: masks in red, green, blue, alpha order
    if depth.uses_bitfields() {
        for mask in depth.mask().to_array() {
            out.extend_from_slice(&mask.to_le_bytes());
        }
    }
}
