//! Image transcoder - turns a stored upload into a WebP derivative

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::compression::WebpCompressor;

#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transcode task failed: {0}")]
    Join(String),
}

/// Converts a file on disk into a compressed derivative in `output_dir`.
#[async_trait]
pub trait ImageTranscoder: Send + Sync {
    /// Transcode `input` and return the path of the written derivative.
    ///
    /// The input file is left in place; removing it is the caller's concern.
    async fn transcode(&self, input: &Path, output_dir: &Path) -> Result<PathBuf, TranscodeError>;
}

/// Lossy WebP transcoder
#[derive(Debug, Clone, Default)]
pub struct WebpTranscoder {
    compressor: WebpCompressor,
}

impl WebpTranscoder {
    pub fn new(quality: f32) -> Self {
        Self {
            compressor: WebpCompressor::new(quality),
        }
    }

    pub fn quality(&self) -> f32 {
        self.compressor.quality()
    }

    /// `{output_dir}/{input stem}.webp`
    ///
    /// An input already carrying a `.webp` extension, in any case, keeps its
    /// own name so the derivative replaces it.
    pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
        let is_webp_named = input
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("webp"));
        if let (true, Some(name)) = (is_webp_named, input.file_name()) {
            return output_dir.join(name);
        }

        let stem = input.file_stem().unwrap_or(input.as_os_str());
        let mut name = stem.to_os_string();
        name.push(".webp");
        output_dir.join(name)
    }
}

#[async_trait]
impl ImageTranscoder for WebpTranscoder {
    async fn transcode(&self, input: &Path, output_dir: &Path) -> Result<PathBuf, TranscodeError> {
        let start = std::time::Instant::now();
        let data = tokio::fs::read(input).await?;
        let input_bytes = data.len();

        let compressor = self.compressor;
        let webp = tokio::task::spawn_blocking(move || compressor.compress(&data))
            .await
            .map_err(|e| TranscodeError::Join(e.to_string()))??;

        let output = Self::output_path(input, output_dir);
        tokio::fs::write(&output, &webp).await?;

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            input_bytes,
            output_bytes = webp.len(),
            quality = compressor.quality(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Image transcoded to WebP"
        );

        Ok(output)
    }
}
