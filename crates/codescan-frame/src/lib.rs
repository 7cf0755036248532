//! codescan-frame: frame acquisition and recognition IO boundary.
//! Capability traits for the video source and the recognizer, the reusable
//! drawing surface, and subprocess-backed implementations. No decision logic.

pub mod error;
pub mod recognizer;
pub mod region;
pub mod source;
pub mod surface;

pub use error::{FrameError, RecognitionError};
pub use recognizer::{DIGIT_WHITELIST, Recognizer, TesseractRecognizer};
pub use region::{DEFAULT_CANVAS, DEFAULT_REGION, Region};
pub use source::{CommandFrameSource, DirFrameSource, FrameSource};
pub use surface::Surface;

pub use image::RgbaImage;
