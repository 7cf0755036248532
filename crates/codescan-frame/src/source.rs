//! FrameSource trait and its subprocess / directory implementations.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::FrameError;
use crate::surface::Surface;

/// Extensions `DirFrameSource` picks up.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "pgm", "ppm"];

/// A video source queried once per iteration for its current frame.
///
/// `release` stops acquisition; it must be idempotent, and `draw` after
/// release fails with [`FrameError::Released`].
pub trait FrameSource: Send {
    fn draw(&mut self, surface: &mut Surface) -> Result<(), FrameError>;

    fn release(&mut self);

    fn is_live(&self) -> bool;
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn draw(&mut self, surface: &mut Surface) -> Result<(), FrameError> {
        (**self).draw(surface)
    }

    fn release(&mut self) {
        (**self).release();
    }

    fn is_live(&self) -> bool {
        (**self).is_live()
    }
}

// ─── Command source ──────────────────────────────────────────────

/// Runs a capture command per frame; the command must write one encoded
/// image to stdout (e.g. `ffmpeg -f v4l2 -i /dev/video0 -frames:v 1 -f image2pipe -`).
pub struct CommandFrameSource {
    program: String,
    args: Vec<String>,
    live: bool,
}

impl CommandFrameSource {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            live: true,
        }
    }

    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Split a shell-like command line on whitespace. No quoting support.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program).with_args(parts))
    }

    fn capture(&self) -> Result<Vec<u8>, FrameError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(FrameError::Io)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FrameError::CommandFailed(format!(
                "exit code {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }
        if output.stdout.is_empty() {
            return Err(FrameError::CommandFailed(format!(
                "{} produced no image data",
                self.program
            )));
        }
        Ok(output.stdout)
    }
}

impl FrameSource for CommandFrameSource {
    fn draw(&mut self, surface: &mut Surface) -> Result<(), FrameError> {
        if !self.live {
            return Err(FrameError::Released);
        }
        let bytes = self.capture()?;
        let frame = image::load_from_memory(&bytes)?.into_rgba8();
        surface.draw(&frame);
        Ok(())
    }

    fn release(&mut self) {
        if self.live {
            tracing::debug!("releasing capture command {}", self.program);
            self.live = false;
        }
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

// ─── Directory source ────────────────────────────────────────────

/// Replays image files from a directory in lexical order.
pub struct DirFrameSource {
    frames: Vec<PathBuf>,
    next: usize,
    repeat: bool,
    live: bool,
}

impl DirFrameSource {
    pub fn open(dir: &Path) -> Result<Self, FrameError> {
        let mut frames = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            if is_image && path.is_file() {
                frames.push(path);
            }
        }
        frames.sort();
        tracing::debug!("{} frames found in {}", frames.len(), dir.display());
        Ok(Self {
            frames,
            next: 0,
            repeat: false,
            live: true,
        })
    }

    /// Start over from the first frame instead of failing when exhausted.
    #[must_use]
    pub fn repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for DirFrameSource {
    fn draw(&mut self, surface: &mut Surface) -> Result<(), FrameError> {
        if !self.live {
            return Err(FrameError::Released);
        }
        if self.next >= self.frames.len() {
            if !self.repeat || self.frames.is_empty() {
                return Err(FrameError::Exhausted);
            }
            self.next = 0;
        }
        let path = &self.frames[self.next];
        self.next += 1;
        let frame = image::open(path)?.into_rgba8();
        surface.draw(&frame);
        Ok(())
    }

    fn release(&mut self) {
        self.live = false;
    }

    fn is_live(&self) -> bool {
        self.live
    }
}
