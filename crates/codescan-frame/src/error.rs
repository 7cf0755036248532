//! Error types for frame acquisition and recognition.

use std::time::Duration;

use thiserror::Error;

/// Video source failure. Always fatal to the scan loop.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("capture command failed: {0}")]
    CommandFailed(String),

    #[error("frame decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("no more frames")]
    Exhausted,

    #[error("source already released")]
    Released,

    #[error("frame io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Recognizer failure for a single frame. Recovered by the loop as
/// "no candidate this frame".
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("recognizer command failed: {0}")]
    CommandFailed(String),

    #[error("region {0} lies outside the frame")]
    EmptyRegion(crate::Region),

    #[error("frame encode failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("recognition timed out after {0:?}")]
    Timeout(Duration),

    #[error("recognizer io error: {0}")]
    Io(#[from] std::io::Error),
}
