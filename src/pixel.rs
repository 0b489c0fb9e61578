/// 8-bit RGBA pixel, straight (non-premultiplied) alpha.
///
/// `Default` is fully transparent black.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0, 0xFF);
    pub const WHITE: Pixel = Pixel::new(0xFF, 0xFF, 0xFF, 0xFF);
    pub const RED: Pixel = Pixel::new(0xFF, 0, 0, 0xFF);
    pub const GREEN: Pixel = Pixel::new(0, 0xFF, 0, 0xFF);
    pub const BLUE: Pixel = Pixel::new(0, 0, 0xFF, 0xFF);
    pub const YELLOW: Pixel = Pixel::new(0xFF, 0xFF, 0, 0xFF);
    pub const CYAN: Pixel = Pixel::new(0, 0xFF, 0xFF, 0xFF);
    pub const MAGENTA: Pixel = Pixel::new(0xFF, 0, 0xFF, 0xFF);

    pub const BLACK_TRANSPARENT: Pixel = Pixel::BLACK.with_alpha(0);
    pub const WHITE_TRANSPARENT: Pixel = Pixel::WHITE.with_alpha(0);
    pub const RED_TRANSPARENT: Pixel = Pixel::RED.with_alpha(0);
    pub const GREEN_TRANSPARENT: Pixel = Pixel::GREEN.with_alpha(0);
    pub const BLUE_TRANSPARENT: Pixel = Pixel::BLUE.with_alpha(0);
    pub const YELLOW_TRANSPARENT: Pixel = Pixel::YELLOW.with_alpha(0);
    pub const CYAN_TRANSPARENT: Pixel = Pixel::CYAN.with_alpha(0);
    pub const MAGENTA_TRANSPARENT: Pixel = Pixel::MAGENTA.with_alpha(0);
    /// Alias for [`Pixel::BLACK_TRANSPARENT`].
    pub const TRANSPARENT: Pixel = Pixel::BLACK_TRANSPARENT;

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Pixel from `0xRRGGBBAA`.
    pub const fn rgba(hex: u32) -> Self {
        Self::new(
            (hex >> 24) as u8,
            (hex >> 16) as u8,
            (hex >> 8) as u8,
            hex as u8,
        )
    }

    /// Opaque pixel from `0xRRGGBB`. Bits above 24 are ignored.
    pub const fn rgb(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 0xFF)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self { alpha, ..self }
    }

    pub const fn is_opaque(&self) -> bool {
        self.alpha == 0xFF
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGBA8> for Pixel {
    fn from(p: rgb::RGBA8) -> Self {
        Pixel::new(p.r, p.g, p.b, p.a)
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::RGBA8 {
    fn from(p: Pixel) -> Self {
        rgb::RGBA8::new(p.red, p.green, p.blue, p.alpha)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Pixel {
    fn from(p: rgb::RGB8) -> Self {
        Pixel::new(p.r, p.g, p.b, 0xFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_constructors() {
        assert_eq!(Pixel::rgba(0x11223344), Pixel::new(0x11, 0x22, 0x33, 0x44));
        assert_eq!(Pixel::rgb(0xAABBCC), Pixel::new(0xAA, 0xBB, 0xCC, 0xFF));
        assert_eq!(Pixel::rgb(0xFF00_0000), Pixel::BLACK);
    }

    #[test]
    fn transparent_variants_keep_color() {
        assert_eq!(Pixel::CYAN_TRANSPARENT, Pixel::new(0, 0xFF, 0xFF, 0));
        assert_eq!(Pixel::TRANSPARENT, Pixel::default());
        assert!(!Pixel::TRANSPARENT.is_opaque());
        assert!(Pixel::MAGENTA.is_opaque());
    }

    #[cfg(feature = "rgb")]
    #[test]
    fn rgb_conversions() {
        let px = Pixel::new(10, 20, 30, 40);
        let typed: rgb::RGBA8 = px.into();
        assert_eq!(typed, rgb::RGBA8::new(10, 20, 30, 40));
        assert_eq!(Pixel::from(typed), px);
        assert_eq!(Pixel::from(rgb::RGB8::new(1, 2, 3)), Pixel::new(1, 2, 3, 0xFF));
    }
}

