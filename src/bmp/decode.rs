//! BMP decoder for uncompressed and bitfield-packed 16/24/32-bit images.
//!
//! Every read is bounds-checked; truncated input fails instead of reading
//! past the end of the buffer.

use enough::Stop;
use log::{debug, warn};

use super::mask::{Channel, ChannelMask};
use crate::buffer::PixelBuffer;
use crate::error::BmpError;
use crate::pixel::Pixel;

/// `BM` file header.
const FILE_HEADER_SIZE: u32 = 14;
/// BITMAPINFOHEADER, the smallest info header accepted.
const INFO_HEADER_SIZE: u32 = 40;
/// Bitfield masks follow the core info header.
const MASKS_OFFSET: usize = (FILE_HEADER_SIZE + INFO_HEADER_SIZE) as usize;

const BI_RGB: u32 = 0;
const BI_BITFIELDS: u32 = 3;
const BI_ALPHABITFIELDS: u32 = 6;

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn eof(&self, wanted: usize) -> BmpError {
        BmpError::InvalidHeader(alloc::format!(
            "unexpected end of data: need {wanted} bytes at offset {}, have {}",
            self.pos,
            self.data.len()
        ))
    }

    fn set_position(&mut self, pos: usize) -> Result<(), BmpError> {
        if pos > self.data.len() {
            return Err(self.eof(pos.saturating_sub(self.pos)));
        }
        self.pos = pos;
        Ok(())
    }

    fn skip(&mut self, n: usize) -> Result<(), BmpError> {
        let new_pos = self.pos.checked_add(n).ok_or_else(|| self.eof(n))?;
        if new_pos > self.data.len() {
            return Err(self.eof(n));
        }
        self.pos = new_pos;
        Ok(())
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let bytes = self
            .data
            .get(self.pos..self.pos + N)
            .ok_or_else(|| self.eof(N))?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos += N;
        Ok(buf)
    }

    fn get_u16_le(&mut self) -> Result<u16, BmpError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    fn get_u32_le(&mut self) -> Result<u32, BmpError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    fn get_i32_le(&mut self) -> Result<i32, BmpError> {
        self.read_fixed_bytes().map(i32::from_le_bytes)
    }
}

// ── Parsed BMP header info ──────────────────────────────────────────

/// Header summary of a BMP file, available without decoding pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct BmpInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    /// Raw compression field: 0 (none), 3 or 6 (bitfields).
    pub compression: u32,
    /// Channel masks in effect, explicit or implied by the bit depth.
    pub mask: ChannelMask,
    /// Byte offset of the first (bottom) pixel row.
    pub data_offset: u32,
}

/// Parse the file and info headers and resolve the channel masks.
pub(crate) fn parse_header(data: &[u8]) -> Result<BmpInfo, BmpError> {
    if data.len() < 2 || &data[..2] != b"BM" {
        return Err(BmpError::NotABitmap);
    }

    let mut bytes = Cursor::new(data);
    bytes.skip(2)?;
    let _file_size = bytes.get_u32_le()?;
    bytes.skip(4)?; // reserved
    let data_offset = bytes.get_u32_le()?;

    let header_size = bytes.get_u32_le()?;
    if header_size < INFO_HEADER_SIZE {
        return Err(BmpError::InvalidHeader(alloc::format!(
            "unsupported info header size: {header_size}"
        )));
    }
    if u64::from(data_offset) < u64::from(FILE_HEADER_SIZE) + u64::from(header_size) {
        return Err(BmpError::InvalidHeader(alloc::format!(
            "pixel data offset {data_offset} overlaps the {header_size}-byte info header"
        )));
    }

    let width = bytes.get_i32_le()?;
    let height = bytes.get_i32_le()?;
    let _planes = bytes.get_u16_le()?;
    let bpp = bytes.get_u16_le()?;
    let compression = bytes.get_u32_le()?;
    let _bitmap_size = bytes.get_u32_le()?;
    bytes.skip(16)?; // x/y resolution, palette count, important colors

    if width <= 0 {
        return Err(BmpError::InvalidHeader(alloc::format!(
            "BMP width is {width}"
        )));
    }
    if height == 0 {
        return Err(BmpError::InvalidHeader("BMP height is zero".into()));
    }
    if height < 0 {
        return Err(BmpError::NotSupported(
            "top-down BMP (negative height)".into(),
        ));
    }

    let mask = match compression {
        BI_RGB => default_mask(bpp)?,
        BI_BITFIELDS | BI_ALPHABITFIELDS => {
            bytes.set_position(MASKS_OFFSET)?;
            let red = bytes.get_u32_le()?;
            let green = bytes.get_u32_le()?;
            let blue = bytes.get_u32_le()?;
            // A bare BITMAPINFOHEADER carries only three masks; the fourth
            // word is present when the header or the pre-pixel gap covers it.
            let has_alpha_word = compression == BI_ALPHABITFIELDS
                || FILE_HEADER_SIZE + header_size >= MASKS_OFFSET as u32 + 16
                || data_offset as usize >= MASKS_OFFSET + 16;
            let alpha = if has_alpha_word {
                bytes.get_u32_le()?
            } else {
                0
            };

            if red == 0 && green == 0 && blue == 0 {
                warn!("BMP bitfield masks are empty, using defaults for {bpp} bpp");
                default_mask(bpp)?
            } else {
                ChannelMask {
                    red,
                    green,
                    blue,
                    alpha,
                }
            }
        }
        other => {
            return Err(BmpError::NotSupported(alloc::format!(
                "BMP compression type {other}"
            )));
        }
    };

    if !matches!(bpp, 16 | 24 | 32) {
        return Err(BmpError::InvalidHeader(alloc::format!(
            "BMP bit depth {bpp} unsupported"
        )));
    }
    mask.validate(bpp)?;

    debug!(
        "BMP header: {width}x{height}, {bpp} bpp, compression {compression}, masks {:08x?}, data at {data_offset}",
        mask.to_array()
    );

    Ok(BmpInfo {
        width: width as u32,
        height: height as u32,
        bits_per_pixel: bpp,
        compression,
        mask,
        data_offset,
    })
}

fn default_mask(bpp: u16) -> Result<ChannelMask, BmpError> {
    ChannelMask::default_for_bpp(bpp).ok_or_else(|| {
        BmpError::InvalidHeader(alloc::format!(
            "no default channel mask for {bpp} bits per pixel"
        ))
    })
}

// ── Full decode ─────────────────────────────────────────────────────

/// Decode the pixel rows described by `info` into a top-down buffer.
pub(crate) fn decode_pixels(
    data: &[u8],
    info: &BmpInfo,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BmpError> {
    let (width, height) = (info.width, info.height);
    let w = width as usize;
    let h = height as usize;
    let bytes_per_pixel = usize::from(info.bits_per_pixel / 8);
    let row_size = super::row_size(width, height, info.bits_per_pixel)?;
    let row_bytes = w
        .checked_mul(bytes_per_pixel)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;

    let shifts = info.mask.shifts();
    let red = Channel::new(info.mask.red, shifts[0]);
    let green = Channel::new(info.mask.green, shifts[1]);
    let blue = Channel::new(info.mask.blue, shifts[2]);
    let alpha = Channel::new(info.mask.alpha, shifts[3]);

    let start = info.data_offset as usize;
    let needed = (h - 1)
        .checked_mul(row_size)
        .and_then(|n| n.checked_add(start))
        .and_then(|n| n.checked_add(row_bytes))
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    if needed > data.len() {
        return Err(BmpError::InvalidHeader(alloc::format!(
            "pixel data truncated: need {needed} bytes, have {}",
            data.len()
        )));
    }

    let mut buffer = PixelBuffer::new(width, height, Pixel::TRANSPARENT)?;

    for disk_row in 0..h {
        if disk_row % 16 == 0 {
            stop.check()?;
        }
        let row = disk_row
            .checked_mul(row_size)
            .and_then(|off| off.checked_add(start))
            .and_then(|off| data.get(off..off.checked_add(row_bytes)?))
            .ok_or_else(|| {
                BmpError::InvalidHeader(alloc::format!(
                    "pixel data truncated at row {disk_row} of {h}"
                ))
            })?;

        // Rows are stored bottom-up.
        let y = h - 1 - disk_row;
        let out = &mut buffer.pixels_mut()[y * w..(y + 1) * w];
        for (px, src) in out.iter_mut().zip(row.chunks_exact(bytes_per_pixel)) {
            let mut word = [0u8; 4];
            word[..bytes_per_pixel].copy_from_slice(src);
            let word = u32::from_le_bytes(word);
            *px = Pixel {
                red: red.extract(word),
                green: green.extract(word),
                blue: blue.extract(word),
                alpha: if alpha.is_present() {
                    alpha.extract(word)
                } else {
                    0xFF
                },
            };
        }
    }

    Ok(buffer)
}
