//! Reusable RGBA canvas the source draws each frame into.

use std::path::Path;

use image::{Rgba, RgbaImage, imageops};

use crate::region::Region;

/// Overlay marker colour.
const MARK: Rgba<u8> = Rgba([0, 255, 0, 255]);

/// Drawing surface shared across iterations.
///
/// Frames are painted at the origin, clipped to the surface size, without
/// clearing: a smaller frame leaves the previous pixels around it.
#[derive(Debug, Clone)]
pub struct Surface {
    canvas: RgbaImage,
    frames_drawn: u64,
    marked: Option<Region>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: RgbaImage::new(width, height),
            frames_drawn: 0,
            marked: None,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    /// Paint `frame` at (0, 0). Clears any previous overlay state.
    pub fn draw(&mut self, frame: &RgbaImage) {
        if frame.dimensions() == self.canvas.dimensions() {
            self.canvas.copy_from_slice(frame.as_raw());
        } else {
            imageops::replace(&mut self.canvas, frame, 0, 0);
        }
        self.frames_drawn += 1;
        self.marked = None;
    }

    /// Stroke a one-pixel outline around `region`, clipped to the canvas.
    pub fn mark(&mut self, region: Region) {
        let (w, h) = self.canvas.dimensions();
        let Some(r) = region.clamp_to(w, h) else {
            return;
        };
        let (right, bottom) = (r.right() - 1, r.bottom() - 1);
        for x in r.left..=right {
            self.canvas.put_pixel(x, r.top, MARK);
            self.canvas.put_pixel(x, bottom, MARK);
        }
        for y in r.top..=bottom {
            self.canvas.put_pixel(r.left, y, MARK);
            self.canvas.put_pixel(right, y, MARK);
        }
        self.marked = Some(r);
    }

    /// Region marked since the last draw, if any.
    pub fn marked(&self) -> Option<Region> {
        self.marked
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn image(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Owned copy of the current canvas for handing to the recognizer.
    pub fn snapshot(&self) -> RgbaImage {
        self.canvas.clone()
    }

    /// Write the canvas as PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), image::ImageError> {
        self.canvas.save_with_format(path, image::ImageFormat::Png)
    }
}
