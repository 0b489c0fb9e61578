//! Hand-built and malformed BMP files.

use zenbmp::*;

/// Assemble a BMP: 14-byte file header, 40-byte core info header, `masks`
/// appended right after it, then `pixel_data` at offset `54 + 4 * masks.len()`.
fn bmp_file(
    width: i32,
    height: i32,
    bpp: u16,
    compression: u32,
    header_size: u32,
    masks: &[u32],
    pixel_data: &[u8],
) -> Vec<u8> {
    let offset = 54 + 4 * masks.len() as u32;
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(offset + pixel_data.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&offset.to_le_bytes());
    out.extend_from_slice(&header_size.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(&(pixel_data.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0; 16]);
    for mask in masks {
        out.extend_from_slice(&mask.to_le_bytes());
    }
    out.extend_from_slice(pixel_data);
    out
}

fn assert_invalid_header(result: Result<PixelBuffer, BmpError>) {
    match result {
        Err(BmpError::InvalidHeader(_)) => {}
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}

fn assert_not_supported(result: Result<PixelBuffer, BmpError>) {
    match result {
        Err(BmpError::NotSupported(_)) => {}
        other => panic!("expected NotSupported, got {other:?}"),
    }
}

// ── Magic ────────────────────────────────────────────────────────────

#[test]
fn wrong_magic_is_not_a_bitmap() {
    for data in [&b"PK\x03\x04 some zip"[..], b"B", b"", b"MB\x00\x00"] {
        match decode(data) {
            Err(BmpError::NotABitmap) => {}
            other => panic!("expected NotABitmap for {data:?}, got {other:?}"),
        }
    }
    assert!(matches!(probe(b"GIF89a"), Err(BmpError::NotABitmap)));
}

// ── Default masks ────────────────────────────────────────────────────

#[test_log::test]
fn rgb16_defaults_to_555() {
    // 2 px * 2 bytes = 4 bytes per row, no padding
    let data = bmp_file(2, 1, 16, 0, 40, &[], &[0x00, 0x7C, 0x1F, 0x00]);
    let decoded = decode(&data).unwrap();
    assert_eq!(decoded.get(0, 0), Pixel::RED);
    assert_eq!(decoded.get(1, 0), Pixel::BLUE);
}

#[test]
fn rgb24_defaults_to_888() {
    // 1 px, 3 bytes + 1 padding per row; bottom row first
    let data = bmp_file(1, 2, 24, 0, 40, &[], &[0, 0xFF, 0, 0, 0x10, 0x20, 0x30, 0]);
    let decoded = decode(&data).unwrap();
    assert_eq!(decoded.get(0, 1), Pixel::GREEN);
    assert_eq!(decoded.get(0, 0), Pixel::new(0x30, 0x20, 0x10, 255));
}

#[test]
fn rgb32_defaults_to_8888() {
    let data = bmp_file(1, 1, 32, 0, 40, &[], &[0x10, 0x20, 0x30, 0x40]);
    let decoded = decode(&data).unwrap();
    assert_eq!(decoded.get(0, 0), Pixel::new(0x30, 0x20, 0x10, 0x40));
    assert_eq!(probe(&data).unwrap().mask, ChannelMask::RGBA8888);
}

#[test]
fn unsupported_bpp_without_masks() {
    for bpp in [1, 4, 8, 15, 48] {
        let data = bmp_file(1, 1, bpp, 0, 40, &[], &[0; 8]);
        assert_invalid_header(decode(&data));
    }
}

// ── Explicit bitfields ───────────────────────────────────────────────

#[test]
fn bitfields_565_three_masks() {
    // BITMAPINFOHEADER + three masks; row = 2 bytes + 2 padding
    let masks = [0xF800, 0x07E0, 0x001F];
    let data = bmp_file(1, 2, 16, 3, 40, &masks, &[0xE0, 0x07, 0, 0, 0x00, 0xF8, 0, 0]);
    let info = probe(&data).unwrap();
    assert_eq!(info.mask, ChannelMask::RGB565);
    assert_eq!(info.data_offset, 66);

    let decoded = decode(&data).unwrap();
    assert_eq!(decoded.get(0, 0), Pixel::RED);
    assert_eq!(decoded.get(0, 1), Pixel::GREEN);
}

#[test]
fn bitfields_with_alpha_mask() {
    // 4-4-4-4 at 16 bpp: a=0xF000 r=0x0F00 g=0x00F0 b=0x000F
    let masks = [0x0F00, 0x00F0, 0x000F, 0xF000];
    let data = bmp_file(1, 1, 16, 3, 56, &masks, &[0x5F, 0x8F, 0, 0]);
    let decoded = decode(&data).unwrap();
    // r=0xF, g=0x5, b=0xF, a=0x8 scaled by 17
    assert_eq!(decoded.get(0, 0), Pixel::new(255, 85, 255, 136));
}

#[test]
fn empty_bitfields_fall_back_to_default() {
    let data = bmp_file(1, 1, 24, 3, 56, &[0, 0, 0, 0], &[1, 2, 3, 0]);
    let decoded = decode(&data).unwrap();
    assert_eq!(decoded.get(0, 0), Pixel::new(3, 2, 1, 255));
}

#[test]
fn shifts_rebase_on_blue_without_alpha() {
    // 5-5-5 moved up one bit. Without alpha the shifts are re-based on
    // blue, so every channel reads one bit too high.
    let masks = [0xF800, 0x07C0, 0x003E];
    let data = bmp_file(1, 1, 16, 3, 40, &masks, &[0x02, 0x00, 0, 0]);
    let decoded = decode(&data).unwrap();
    // raw blue field 1 is read as 2: round(2 * 255 / 31)
    assert_eq!(decoded.get(0, 0), Pixel::new(0, 0, 16, 255));
}

#[test]
fn shifts_not_rebased_with_alpha() {
    let masks = [0xF800, 0x07C0, 0x003E, 0x0001];
    let data = bmp_file(1, 1, 16, 3, 56, &masks, &[0x03, 0x00, 0, 0]);
    let decoded = decode(&data).unwrap();
    // blue field 1 -> round(255 / 31), alpha bit set -> 255
    assert_eq!(decoded.get(0, 0), Pixel::new(0, 0, 8, 255));
}

#[test]
fn malformed_masks_are_rejected() {
    // non-contiguous red
    let data = bmp_file(1, 1, 16, 3, 56, &[0xF0F0, 0, 0x000F, 0], &[0; 4]);
    assert_invalid_header(decode(&data));
    // overlapping red and green
    let data = bmp_file(1, 1, 16, 3, 56, &[0xFF00, 0x0FF0, 0, 0], &[0; 4]);
    assert_invalid_header(decode(&data));
    // mask outside a 16-bit word
    let data = bmp_file(1, 1, 16, 3, 56, &[0xFF_0000, 0, 0, 0], &[0; 4]);
    assert_invalid_header(decode(&data));
}

// ── Structural errors ────────────────────────────────────────────────

#[test]
fn truncated_headers() {
    let image = PixelBuffer::new(4, 4, Pixel::WHITE).unwrap();
    let encoded = encode(&image, 5, 6, 5, 0).unwrap();
    for len in [2, 10, 14, 30, 53, 60] {
        assert_invalid_header(decode(&encoded[..len]));
    }
}

#[test]
fn truncated_pixel_data() {
    let image = PixelBuffer::new(4, 4, Pixel::WHITE).unwrap();
    let encoded = encode(&image, 8, 8, 8, 0).unwrap();
    assert_invalid_header(decode(&encoded[..encoded.len() - 5]));
    assert_invalid_header(decode(&encoded[..60]));
}

#[test]
fn offset_inside_headers() {
    let mut data = bmp_file(1, 1, 24, 0, 40, &[], &[0; 4]);
    data[10..14].copy_from_slice(&20u32.to_le_bytes());
    assert_invalid_header(decode(&data));
}

#[test]
fn small_info_header() {
    // OS/2 BITMAPCOREHEADER
    let data = bmp_file(1, 1, 24, 0, 12, &[], &[0; 4]);
    assert_invalid_header(decode(&data));
}

#[test]
fn bad_dimensions() {
    assert_invalid_header(decode(&bmp_file(0, 1, 24, 0, 40, &[], &[0; 4])));
    assert_invalid_header(decode(&bmp_file(-3, 1, 24, 0, 40, &[], &[0; 4])));
    assert_invalid_header(decode(&bmp_file(1, 0, 24, 0, 40, &[], &[0; 4])));
}

#[test]
fn top_down_is_not_supported() {
    assert_not_supported(decode(&bmp_file(1, -1, 24, 0, 40, &[], &[0; 4])));
}

#[test]
fn rle_is_not_supported() {
    assert_not_supported(decode(&bmp_file(1, 1, 8, 1, 40, &[], &[0; 4])));
    assert_not_supported(decode(&bmp_file(1, 1, 4, 2, 40, &[], &[0; 4])));
}

// ── Files ────────────────────────────────────────────────────────────

#[cfg(feature = "std")]
mod files {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("zenbmp-{}-{name}", std::process::id()))
    }

    #[test_log::test]
    fn save_then_load() {
        let path = temp_path("roundtrip.bmp");
        let mut image = PixelBuffer::new(6, 3, Pixel::CYAN).unwrap();
        image.circle(3, 1, 1, Pixel::MAGENTA);
        save(&path, &image, 8, 8, 8, 8).unwrap();
        let loaded = load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn unsupported_depth_creates_no_file() {
        let path = temp_path("unsupported.bmp");
        let image = PixelBuffer::new(1, 1, Pixel::WHITE).unwrap();
        assert!(matches!(
            save(&path, &image, 8, 8, 8, 1),
            Err(BmpError::NotSupported(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn missing_paths_are_file_errors() {
        let missing = temp_path("does-not-exist.bmp");
        assert!(matches!(load(&missing), Err(BmpError::FileError(_))));

        let image = PixelBuffer::new(1, 1, Pixel::WHITE).unwrap();
        let bad_dir = temp_path("no-such-dir").join("out.bmp");
        assert!(matches!(
            save(&bad_dir, &image, 8, 8, 8, 0),
            Err(BmpError::FileError(_))
        ));
    }
}
