//! imgdrop processing library
//!
//! Decides which uploads get transcoded and turns raster images into lossy
//! WebP derivatives.

pub mod compression;
pub mod policy;
pub mod transcoder;

pub use compression::WebpCompressor;
pub use policy::{TranscodeDecision, TranscodePolicy};
pub use transcoder::{ImageTranscoder, TranscodeError, WebpTranscoder};
