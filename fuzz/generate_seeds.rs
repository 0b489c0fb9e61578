#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: i32, height: i32, bpp: u16, compression: u32, dib: u32, masks: &[u32], data_len: usize) -> Vec<u8> {
    let offset = 14 + dib.max(40) + if dib < 56 { 4 * masks.len() as u32 } else { 0 };
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(offset + data_len as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&offset.to_le_bytes());
    out.extend_from_slice(&dib.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(&(data_len as u32).to_le_bytes());
    out.extend_from_slice(&[0; 16]);
    for mask in masks {
        out.extend_from_slice(&mask.to_le_bytes());
    }
    out.resize(offset as usize, 0);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 24-bit 1x1, BGR + 1 padding byte
    let mut bmp = header(1, 1, 24, 0, 40, &[], 4);
    bmp.extend_from_slice(&[0xff, 0x00, 0x00, 0x00]);
    fs::write(format!("{dir}/rgb888_1x1.bmp"), bmp).unwrap();

    // 16-bit 5-5-5 2x1
    let mut bmp = header(2, 1, 16, 0, 40, &[], 4);
    bmp.extend_from_slice(&[0x00, 0x7c, 0x1f, 0x00]);
    fs::write(format!("{dir}/rgb555_2x1.bmp"), bmp).unwrap();

    // 16-bit 5-6-5 bitfields, V3 header
    let mut bmp = header(1, 2, 16, 3, 56, &[0xf800, 0x07e0, 0x001f, 0], 8);
    bmp.extend_from_slice(&[0xe0, 0x07, 0, 0, 0x00, 0xf8, 0, 0]);
    fs::write(format!("{dir}/rgb565_1x2.bmp"), bmp).unwrap();

    // 32-bit 8-8-8-8 bitfields, V3 header
    let mut bmp = header(1, 1, 32, 3, 56, &[0xff_0000, 0xff00, 0xff, 0xff00_0000], 4);
    bmp.extend_from_slice(&[0x10, 0x20, 0x30, 0x80]);
    fs::write(format!("{dir}/rgba8888_1x1.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/top_down.bin"), header(1, -1, 24, 0, 40, &[], 0)).unwrap();
    fs::write(format!("{dir}/no_pixels.bin"), header(4, 4, 32, 0, 40, &[], 64)).unwrap();

    println!("Generated seed corpus in {dir}/");
}
