//! Filesystem helpers (`std` only).

use std::path::Path;

use log::debug;

use crate::buffer::PixelBuffer;
use crate::encode::EncodeRequest;
use crate::error::BmpError;

/// Read and decode a BMP file.
pub fn load(path: impl AsRef<Path>) -> Result<PixelBuffer, BmpError> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| file_error(path, e))?;
    debug!("read {} bytes from {}", data.len(), path.display());
    crate::decode(&data)
}

/// Encode `buffer` and write it to `path`.
///
/// The bit depth is checked before the file is created, so an unsupported
/// combination leaves the filesystem untouched.
pub fn save(
    path: impl AsRef<Path>,
    buffer: &PixelBuffer,
    red_bits: u8,
    green_bits: u8,
    blue_bits: u8,
    alpha_bits: u8,
) -> Result<(), BmpError> {
    let path = path.as_ref();
    let bytes = EncodeRequest::from_bits(red_bits, green_bits, blue_bits, alpha_bits)?
        .encode(buffer, enough::Unstoppable)?;
    std::fs::write(path, &bytes).map_err(|e| file_error(path, e))?;
    debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn file_error(path: &Path, e: std::io::Error) -> BmpError {
    BmpError::FileError(alloc::format!("{}: {e}", path.display()))
}
