/*!
 * Pixel geometry for text containers.
 *
 * Coordinates follow image conventions: the origin is the upper left corner
 * and Y grows towards the bottom of the page.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ModelError;

/// Axis-aligned box given by its upper-left and lower-right corners.
///
/// Persisted as `[[x0, y0], [x1, y1]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[[i64; 2]; 2]", into = "[[i64; 2]; 2]")]
pub struct BoundingBox {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl BoundingBox {
    /// Create a box, rejecting inverted corners.
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Result<Self, ModelError> {
        if x0 > x1 || y0 > y1 {
            return Err(ModelError::InvalidBoundingBox { x0, y0, x1, y1 });
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    pub fn width(&self) -> i64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i64 {
        self.y1 - self.y0
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Smallest box covering every box of `boxes`, or `None` if there are none.
    pub fn enclosing<'a, I>(boxes: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        boxes
            .into_iter()
            .fold(None, |acc: Option<BoundingBox>, b| match acc {
                Some(acc) => Some(acc.union(b)),
                None => Some(*b),
            })
    }

    /// Whether `(x, y)` lies inside the box, borders included.
    pub fn contains_point(&self, x: i64, y: i64) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }

    /// The two corners as persisted.
    pub fn corners(&self) -> [[i64; 2]; 2] {
        [[self.x0, self.y0], [self.x1, self.y1]]
    }
}

impl TryFrom<[[i64; 2]; 2]> for BoundingBox {
    type Error = ModelError;

    fn try_from(corners: [[i64; 2]; 2]) -> Result<Self, Self::Error> {
        let [[x0, y0], [x1, y1]] = corners;
        Self::new(x0, y0, x1, y1)
    }
}

impl From<BoundingBox> for [[i64; 2]; 2] {
    fn from(bbox: BoundingBox) -> Self {
        bbox.corners()
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[[{}, {}], [{}, {}]]", self.x0, self.y0, self.x1, self.y1)
    }
}
