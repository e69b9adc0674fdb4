use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A rectangle in percentages (0 to 100) of the source frame.
///
/// Produced by the analysis collaborator and never mutated afterwards.
/// `x + width <= 100` and `y + height <= 100` are expected but not enforced;
/// consumers must tolerate rectangles that run past the frame edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct CropRect {
    /// Left edge (0 = left, 100 = right)
    #[serde(default)]
    pub x: f64,
    /// Top edge (0 = top, 100 = bottom)
    #[serde(default)]
    pub y: f64,
    /// Width as a percentage of the frame width
    #[serde(default)]
    pub width: f64,
    /// Height as a percentage of the frame height
    #[serde(default)]
    pub height: f64,
}

impl CropRect {
    /// The whole frame.
    pub const FULL_FRAME: CropRect = CropRect {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 100.0,
    };

    /// Create a new crop rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle has no usable area (zero, negative or non-finite size)
    /// or a non-finite origin. Such rectangles cannot be mapped to a viewport.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
            && self.x.is_finite()
            && self.y.is_finite())
    }

    /// Check if the rectangle lies within the frame.
    pub fn is_within_frame(&self) -> bool {
        !self.is_degenerate()
            && self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= 100.001 // float slack
            && self.y + self.height <= 100.001
    }

    /// Center point in frame percentages.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}
