//! Region of interest: the fixed rectangle the recognizer reads and the
//! overlay marks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default capture size (width, height).
pub const DEFAULT_CANVAS: (u32, u32) = (640, 480);

/// 300×200 centered on the default canvas.
pub const DEFAULT_REGION: Region = Region::centered(DEFAULT_CANVAS.0, DEFAULT_CANVAS.1, 300, 200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Region {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A `width`×`height` rectangle centered on a canvas. Sizes larger than
    /// the canvas are pinned to the origin.
    pub const fn centered(canvas_w: u32, canvas_h: u32, width: u32, height: u32) -> Self {
        Self {
            left: canvas_w.saturating_sub(width) / 2,
            top: canvas_h.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    /// Intersect with a `width`×`height` image. `None` if nothing overlaps.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Self> {
        if self.left >= width || self.top >= height {
            return None;
        }
        let w = self.width.min(width - self.left);
        let h = self.height.min(height - self.top);
        (w > 0 && h > 0).then_some(Self::new(self.left, self.top, w, h))
    }

    pub fn right(&self) -> u32 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

impl Default for Region {
    fn default() -> Self {
        DEFAULT_REGION
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.top, self.width, self.height)
    }
}

/// Parses `left,top,width,height`.
impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [left, top, width, height] = parts[..] else {
            return Err(format!("expected left,top,width,height, got '{s}'"));
        };
        let num = |v: &str, name: &str| {
            v.parse::<u32>()
                .map_err(|e| format!("invalid {name} '{v}': {e}"))
        };
        let region = Self::new(
            num(left, "left")?,
            num(top, "top")?,
            num(width, "width")?,
            num(height, "height")?,
        );
        if region.width == 0 || region.height == 0 {
            return Err(format!("region '{s}' has zero area"));
        }
        Ok(region)
    }
}
