//! # Image Geometry
//!
//! Value types for image and key-frame regions. Both are `Copy`: a box
//! handed to a builder is copied into literals, never shared.

use crate::AifError;

/// A pixel position. Coordinates are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Result<Self, AifError> {
        if x < 0 {
            return Err(AifError::NegativeCoordinate(x));
        }
        if y < 0 {
            return Err(AifError::NegativeCoordinate(y));
        }
        Ok(Self { x, y })
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }
}

/// An axis-aligned region. The upper-left corner is componentwise less
/// than or equal to the lower-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    upper_left: Point,
    lower_right: Point,
}

impl BoundingBox {
    pub fn new(upper_left: Point, lower_right: Point) -> Result<Self, AifError> {
        if upper_left.x > lower_right.x || upper_left.y > lower_right.y {
            return Err(AifError::InvertedBoundingBox {
                ulx: upper_left.x,
                uly: upper_left.y,
                lrx: lower_right.x,
                lry: lower_right.y,
            });
        }
        Ok(Self {
            upper_left,
            lower_right,
        })
    }

    /// Build a box straight from raw coordinates.
    pub fn from_coords(ulx: i32, uly: i32, lrx: i32, lry: i32) -> Result<Self, AifError> {
        Self::new(Point::new(ulx, uly)?, Point::new(lrx, lry)?)
    }

    #[must_use]
    pub const fn upper_left(self) -> Point {
        self.upper_left
    }

    #[must_use]
    pub const fn lower_right(self) -> Point {
        self.lower_right
    }
}
