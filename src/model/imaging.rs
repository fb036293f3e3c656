/*!
 * Imaging collaborator seam.
 *
 * Decoding and cropping pixels is left to an external imaging library. The
 * model only needs to load a page image and crop it to a box.
 */

use std::ops::Range;
use std::path::Path;

use super::geometry::BoundingBox;
use crate::errors::ModelError;

/// Loads and crops page images on behalf of the model.
pub trait ImageBackend {
    /// Decoded pixel matrix
    type Matrix;

    /// Decode the image stored at `path`.
    fn load(&self, path: &Path) -> Result<Self::Matrix, ModelError>;

    /// Cut `bbox`, grown by `margin` pixels on every side, out of `matrix`.
    fn crop(&self, matrix: &Self::Matrix, bbox: &BoundingBox, margin: i64) -> Self::Matrix;
}

/// Row and column ranges of a crop, clamped to a `width` x `height` matrix.
///
/// Rows come first, matching the `(height, width)` layout of pixel matrices.
pub fn crop_window(bbox: &BoundingBox, margin: i64, width: usize, height: usize) -> (Range<usize>, Range<usize>) {
    let clamp = |value: i64, max: usize| value.clamp(0, max as i64) as usize;
    let rows = clamp(bbox.y0 - margin, height)..clamp(bbox.y1 + margin, height);
    let cols = clamp(bbox.x0 - margin, width)..clamp(bbox.x1 + margin, width);
    (rows, cols)
}
