//! Popup placement policies.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Pixel box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Placement {
    /// Fill a fraction of the viewport, docked to the right edge and centred vertically.
    DockRight {
        width_fraction: f64,
        height_fraction: f64,
    },
    /// Fixed-size box next to the pointer, flipped and clamped to stay on screen.
    NearCursor { width: f64, height: f64, offset: f64 },
}

impl Default for Placement {
    fn default() -> Self {
        Self::DockRight {
            width_fraction: 0.5,
            height_fraction: 0.9,
        }
    }
}

fn clamp_axis(start: f64, size: f64, limit: f64) -> f64 {
    start.min(limit - size).max(0.0)
}

fn beside(pointer: f64, size: f64, offset: f64, limit: f64) -> f64 {
    let after = pointer + offset;
    if after + size <= limit {
        after
    } else {
        clamp_axis(pointer - offset - size, size, limit)
    }
}

impl Placement {
    #[must_use]
    pub fn place(&self, viewport: Viewport, pointer: Point) -> Rect {
        match *self {
            Self::DockRight {
                width_fraction,
                height_fraction,
            } => {
                let width = viewport.width * width_fraction;
                let height = viewport.height * height_fraction;
                Rect {
                    left: (viewport.width - width).max(0.0),
                    top: ((viewport.height - height) / 2.0).max(0.0),
                    width,
                    height,
                }
            }
            Self::NearCursor {
                width,
                height,
                offset,
            } => {
                let width = width.min(viewport.width);
                let height = height.min(viewport.height);
                Rect {
                    left: beside(pointer.x, width, offset, viewport.width),
                    top: clamp_axis(pointer.y - height / 2.0, height, viewport.height),
                    width,
                    height,
                }
            }
        }
    }

    /// Fractions must lie in `(0, 1]` and sizes must be positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match *self {
            Self::DockRight {
                width_fraction,
                height_fraction,
            } => [width_fraction, height_fraction]
                .iter()
                .all(|f| *f > 0.0 && *f <= 1.0),
            Self::NearCursor {
                width,
                height,
                offset,
            } => width > 0.0 && height > 0.0 && offset >= 0.0,
        }
    }
}
