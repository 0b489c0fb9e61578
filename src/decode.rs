use enough::{Stop, Unstoppable};

use crate::bmp::{self, BmpInfo};
use crate::buffer::PixelBuffer;
use crate::error::BmpError;
use crate::limits::Limits;

/// Decode a BMP file with default settings.
///
/// Returns [`BmpError::NotABitmap`] without allocating anything if `data`
/// does not start with `BM`.
pub fn decode(data: &[u8]) -> Result<PixelBuffer, BmpError> {
    DecodeRequest::new(data).decode(Unstoppable)
}

/// Read width, height, bit depth and channel masks without decoding pixels.
pub fn probe(data: &[u8]) -> Result<BmpInfo, BmpError> {
    bmp::probe(data)
}

/// Builder for a decode with resource limits and cancellation.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images exceeding `limits` before allocating.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode, polling `stop` between rows.
    pub fn decode(self, stop: impl Stop) -> Result<PixelBuffer, BmpError> {
        bmp::decode(self.data, self.limits, &stop)
    }
}
