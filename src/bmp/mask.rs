//! Channel bitmasks, bit-depth presets and channel quantization.

use crate::error::BmpError;

/// Bit positions of each channel inside a packed little-endian pixel word.
///
/// A zero mask means the channel is absent. Masks are contiguous runs of set
/// bits and never overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChannelMask {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub alpha: u32,
}

impl ChannelMask {
    /// 16-bit 5-5-5, top bit unused.
    pub const RGB555: ChannelMask = ChannelMask::packed(5, 5, 5, 0);
    /// 16-bit 5-6-5.
    pub const RGB565: ChannelMask = ChannelMask::packed(5, 6, 5, 0);
    /// 24-bit 8-8-8.
    pub const RGB888: ChannelMask = ChannelMask::packed(8, 8, 8, 0);
    /// 32-bit 8-8-8-8.
    pub const RGBA8888: ChannelMask = ChannelMask::packed(8, 8, 8, 8);

    /// Masks for channels packed blue-first from bit 0, then green, red, alpha.
    pub const fn packed(red_bits: u32, green_bits: u32, blue_bits: u32, alpha_bits: u32) -> Self {
        Self {
            red: low_bits(red_bits) << (blue_bits + green_bits),
            green: low_bits(green_bits) << blue_bits,
            blue: low_bits(blue_bits),
            alpha: low_bits(alpha_bits) << (blue_bits + green_bits + red_bits),
        }
    }

    /// Implied masks for a bit depth without explicit bitfields.
    pub const fn default_for_bpp(bpp: u16) -> Option<Self> {
        match bpp {
            16 => Some(Self::RGB555),
            24 => Some(Self::RGB888),
            32 => Some(Self::RGBA8888),
            _ => None,
        }
    }

    /// Masks in on-disk order: red, green, blue, alpha.
    pub const fn to_array(self) -> [u32; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha != 0
    }

    /// Check the masks are contiguous, disjoint, and fit in a `bpp`-bit word.
    pub fn validate(&self, bpp: u16) -> Result<(), BmpError> {
        let word = if bpp >= 32 {
            u32::MAX
        } else {
            (1u32 << bpp) - 1
        };
        let mut seen = 0u32;
        for (name, mask) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !is_contiguous(mask) {
                return Err(BmpError::InvalidHeader(alloc::format!(
                    "{name} mask {mask:#010x} is not contiguous"
                )));
            }
            if mask & !word != 0 {
                return Err(BmpError::InvalidHeader(alloc::format!(
                    "{name} mask {mask:#010x} exceeds {bpp}-bit pixel"
                )));
            }
            if mask & seen != 0 {
                return Err(BmpError::InvalidHeader(alloc::format!(
                    "{name} mask {mask:#010x} overlaps another channel"
                )));
            }
            seen |= mask;
        }
        Ok(())
    }

    /// Right-shift for each channel, in red, green, blue, alpha order.
    ///
    /// Each shift is the index of the mask's lowest set bit. Without an alpha
    /// mask the RGB shifts are re-based on blue, whose shift becomes 0. With
    /// an alpha mask no re-basing happens.
    pub(crate) fn shifts(&self) -> [u32; 4] {
        let mut shifts = self.to_array().map(lowest_bit);
        if self.alpha == 0 {
            let base = shifts[2];
            shifts[0] = shifts[0].saturating_sub(base);
            shifts[1] = shifts[1].saturating_sub(base);
            shifts[2] = 0;
        }
        shifts
    }
}

/// Per-channel bit widths accepted by the encoder.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelDepth {
    /// 5-5-5-0, stored at 16 bits per pixel.
    Rgb555,
    /// 5-6-5-0.
    Rgb565,
    /// 8-8-8-0.
    Rgb888,
    /// 8-8-8-8.
    Rgba8888,
}

impl ChannelDepth {
    /// Map `(red, green, blue, alpha)` bit widths to a preset.
    pub fn from_bits(
        red_bits: u8,
        green_bits: u8,
        blue_bits: u8,
        alpha_bits: u8,
    ) -> Result<Self, BmpError> {
        match (red_bits, green_bits, blue_bits, alpha_bits) {
            (5, 5, 5, 0) => Ok(Self::Rgb555),
            (5, 6, 5, 0) => Ok(Self::Rgb565),
            (8, 8, 8, 0) => Ok(Self::Rgb888),
            (8, 8, 8, 8) => Ok(Self::Rgba8888),
            (r, g, b, a) => Err(BmpError::NotSupported(alloc::format!(
                "channel depth {r}-{g}-{b}-{a}"
            ))),
        }
    }

    /// `(red, green, blue, alpha)` bit widths.
    pub const fn bits(self) -> (u32, u32, u32, u32) {
        match self {
            Self::Rgb555 => (5, 5, 5, 0),
            Self::Rgb565 => (5, 6, 5, 0),
            Self::Rgb888 => (8, 8, 8, 0),
            Self::Rgba8888 => (8, 8, 8, 8),
        }
    }

    /// Stored bits per pixel. 5-5-5 rounds up to 16.
    pub const fn bits_per_pixel(self) -> u16 {
        match self {
            Self::Rgb555 | Self::Rgb565 => 16,
            Self::Rgb888 => 24,
            Self::Rgba8888 => 32,
        }
    }

    pub const fn mask(self) -> ChannelMask {
        match self {
            Self::Rgb555 => ChannelMask::RGB555,
            Self::Rgb565 => ChannelMask::RGB565,
            Self::Rgb888 => ChannelMask::RGB888,
            Self::Rgba8888 => ChannelMask::RGBA8888,
        }
    }

    /// Whether the file needs an explicit bitfield header.
    /// Opaque 8-8-8 is written as plain BI_RGB.
    pub const fn uses_bitfields(self) -> bool {
        !matches!(self, Self::Rgb888)
    }
}

/// Extraction parameters for one channel of a decoded word.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Channel {
    mask: u32,
    shift: u32,
    /// Largest value the mask can hold, `2^bits - 1`.
    max: u32,
}

impl Channel {
    pub(crate) fn new(mask: u32, shift: u32) -> Self {
        Self {
            mask,
            shift,
            max: mask >> lowest_bit(mask),
        }
    }

    pub(crate) fn is_present(&self) -> bool {
        self.mask != 0
    }

    /// `(word & mask) >> shift`, scaled from the channel width to 8 bits.
    #[inline]
    pub(crate) fn extract(&self, word: u32) -> u8 {
        let v = (word & self.mask) >> self.shift;
        expand(v, self.max)
    }
}

/// Scale an `n`-bit value with maximum `max` to 0..=255, rounding to nearest.
#[inline]
pub(crate) fn expand(v: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    if max == 255 {
        return v.min(255) as u8;
    }
    let (v, max) = (u64::from(v), u64::from(max));
    ((2 * v * 255 + max) / (2 * max)).min(255) as u8
}

/// `round(c / 255 * (2^bits - 1))`.
#[inline]
pub(crate) fn quantize(c: u8, bits: u32) -> u32 {
    let max = low_bits(bits);
    (2 * u32::from(c) * max + 255) / 510
}

const fn low_bits(bits: u32) -> u32 {
    if bits >= 32 { u32::MAX } else { (1u32 << bits) - 1 }
}

fn lowest_bit(mask: u32) -> u32 {
    if mask == 0 { 0 } else { mask.trailing_zeros() }
}

fn is_contiguous(mask: u32) -> bool {
    if mask == 0 {
        return true;
    }
    let run = mask >> mask.trailing_zeros();
    run & run.wrapping_add(1) == 0
}
