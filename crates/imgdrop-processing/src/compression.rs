use bytes::Bytes;
use image::{DynamicImage, GenericImageView};
use std::io::Cursor;

use crate::transcoder::TranscodeError;

/// Default lossy WebP quality (0-100)
pub const DEFAULT_WEBP_QUALITY: f32 = 50.0;

/// Lossy WebP encoder with a fixed quality
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebpCompressor {
    quality: f32,
}

impl Default for WebpCompressor {
    fn default() -> Self {
        Self::new(DEFAULT_WEBP_QUALITY)
    }
}

impl WebpCompressor {
    pub fn new(quality: f32) -> Self {
        Self {
            quality: quality.clamp(0.0, 100.0),
        }
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// Decode any supported raster format and re-encode it as WebP.
    ///
    /// The source format is sniffed from the bytes; the uploader's declared
    /// MIME type is not trusted.
    pub fn compress(&self, data: &[u8]) -> Result<Bytes, TranscodeError> {
        let img = image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| TranscodeError::Decode(e.to_string()))?
            .decode()
            .map_err(|e| TranscodeError::Decode(e.to_string()))?;

        self.encode(&img)
    }

    /// Encode a decoded image as lossy WebP
    pub fn encode(&self, img: &DynamicImage) -> Result<Bytes, TranscodeError> {
        let (width, height) = img.dimensions();

        // Convert to RGBA for WebP encoding
        let rgba_img = img.to_rgba8();

        let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
        let webp_data = encoder
            .encode_simple(false, self.quality)
            .map_err(|e| TranscodeError::Encode(format!("{:?}", e)))?;

        tracing::debug!(
            width,
            height,
            quality = self.quality,
            output_bytes = webp_data.len(),
            "Encoded WebP"
        );

        Ok(Bytes::copy_from_slice(&webp_data))
    }
}
