//! Recognizer trait and the tesseract CLI backend.

use std::io::{Cursor, Write};
use std::process::{Command, Stdio};

use image::{ImageFormat, RgbaImage, imageops};

use crate::error::RecognitionError;
use crate::region::Region;

/// Characters the engine is allowed to emit.
pub const DIGIT_WHITELIST: &str = "0123456789";

/// Opaque image-to-text capability. Implementations may block; the loop
/// runs them off the async executor.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, image: &RgbaImage, region: Region) -> Result<String, RecognitionError>;
}

impl<T: Recognizer + ?Sized> Recognizer for &T {
    fn recognize(&self, image: &RgbaImage, region: Region) -> Result<String, RecognitionError> {
        (**self).recognize(image, region)
    }
}

/// Crop `region` out of `image`, clamped to the image bounds.
pub fn crop(image: &RgbaImage, region: Region) -> Result<RgbaImage, RecognitionError> {
    let (w, h) = image.dimensions();
    let r = region
        .clamp_to(w, h)
        .ok_or(RecognitionError::EmptyRegion(region))?;
    Ok(imageops::crop_imm(image, r.left, r.top, r.width, r.height).to_image())
}

/// Runs the `tesseract` binary with stdin/stdout piping.
pub struct TesseractRecognizer {
    tesseract_bin: String,
    lang: String,
    /// Page segmentation mode; `None` keeps tesseract's default.
    psm: Option<u8>,
}

impl TesseractRecognizer {
    pub fn new(tesseract_bin: impl Into<String>) -> Self {
        Self {
            tesseract_bin: tesseract_bin.into(),
            lang: "eng".to_string(),
            psm: None,
        }
    }

    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    #[must_use]
    pub fn with_psm(mut self, psm: u8) -> Self {
        self.psm = Some(psm);
        self
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.lang.clone(),
        ];
        if let Some(psm) = self.psm {
            args.push("--psm".to_string());
            args.push(psm.to_string());
        }
        args.push("-c".to_string());
        args.push(format!("tessedit_char_whitelist={DIGIT_WHITELIST}"));
        args
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl Recognizer for TesseractRecognizer {
    fn recognize(&self, image: &RgbaImage, region: Region) -> Result<String, RecognitionError> {
        let cropped = crop(image, region)?;
        let mut png = Vec::new();
        cropped.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        let mut child = Command::new(&self.tesseract_bin)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        // Reap the child before reporting a failed write; an engine that
        // exits without reading closes the pipe early.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&png),
            None => Ok(()),
        };
        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognitionError::CommandFailed(format!(
                "exit code {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }
        written?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
