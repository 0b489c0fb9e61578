use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding/encoding and pixel buffer construction.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("file error: {0}")]
    FileError(String),

    #[error("not a BMP file")]
    NotABitmap,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("not supported: {0}")]
    NotSupported(String),

    #[error("cannot allocate a {width}x{height} pixel buffer")]
    Allocation { width: u32, height: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
