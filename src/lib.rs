//! # zenbmp
//!
//! BMP encoder and decoder with per-channel bit depths, an RGBA pixel buffer,
//! and alpha-composited drawing primitives.
//!
//! ## Supported Formats
//!
//! Uncompressed and bitfield BMP, bottom-up, at:
//! - **16-bit 5-5-5** and **16-bit 5-6-5** (no alpha)
//! - **24-bit 8-8-8** (no alpha)
//! - **32-bit 8-8-8-8**
//!
//! Decoding also accepts any other non-overlapping contiguous bitfield layout
//! at 16, 24 or 32 bits per pixel. Narrow channels are scaled to 8 bits.
//!
//! ## Drawing
//!
//! [`PixelBuffer`] has `fill`, `rect`, `circle`, `line`, `draw` (predicate),
//! `turtle` (stateful walk) and `copy`. All of them composite with
//! Porter-Duff [`over`] and clip silently at the buffer edges.
//!
//! ## Non-Goals
//!
//! - RLE compression, palettes, top-down (negative height) files
//! - Animated formats
//! - Color management
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{Pixel, PixelBuffer};
//!
//! let mut image = PixelBuffer::new(64, 32, Pixel::WHITE)?;
//! image.rect(4, 4, 16, 8, Pixel::BLUE);
//! image.line(0, 31, 63, 0, 1, Pixel::RED.with_alpha(128));
//!
//! let bytes = zenbmp::encode(&image, 8, 8, 8, 0)?;
//! let decoded = zenbmp::decode(&bytes)?;
//! assert_eq!(decoded.width(), 64);
//! # Ok::<(), zenbmp::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod buffer;
mod composite;
mod error;
mod limits;
mod pixel;
mod raster;

mod decode;
mod encode;

#[cfg(feature = "std")]
mod file;

// Re-exports
pub use bmp::{BmpInfo, ChannelDepth, ChannelMask};
pub use buffer::PixelBuffer;
pub use composite::{blend, over};
pub use decode::{DecodeRequest, decode, probe};
pub use encode::{EncodeRequest, encode};
pub use enough::{Stop, Unstoppable};
pub use error::BmpError;
pub use limits::Limits;
pub use pixel::Pixel;

#[cfg(feature = "std")]
pub use file::{load, save};
