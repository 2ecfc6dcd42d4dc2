//! Which uploads are transcoded.

/// Outcome of inspecting an upload's declared MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscodeDecision {
    /// Raster image: convert to WebP and drop the original.
    Transcode,
    /// SVG or already WebP: keep the upload as-is.
    Keep,
    /// Not an image: the upload is not retained.
    Reject,
}

/// MIME-based transcode policy.
pub struct TranscodePolicy;

impl TranscodePolicy {
    /// Types stored without conversion.
    const PASSTHROUGH: [&'static str; 2] = ["image/svg+xml", "image/webp"];

    pub fn decide(content_type: &str) -> TranscodeDecision {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if !essence.starts_with("image/") {
            return TranscodeDecision::Reject;
        }

        if Self::PASSTHROUGH.contains(&essence.as_str()) {
            TranscodeDecision::Keep
        } else {
            TranscodeDecision::Transcode
        }
    }
}
