// pose2csv · AGPL-3.0 License

//! Per-image feature extraction.
//!
//! Turns one image file into the flat landmark values of a dataset row, or
//! into nothing at all: an image that fails to decode or yields no pose is
//! skipped with a diagnostic, never a partially-filled row.

use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::error::Result;
use crate::estimator::PoseEstimator;
use crate::landmark::{Keypoint, LandmarkSchema, Pose};
use crate::warn;

/// Coordinate space used for the `_x`/`_y` columns. Never affects scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateSpace {
    /// Image-relative coordinates in `[0, 1]`, as produced by the estimator.
    #[default]
    Normalized,
    /// Pixel coordinates derived from the source image dimensions.
    Pixels,
}

/// Successful extraction for one image.
///
/// Carries the decoded image and pose alongside the row values so the
/// debug renderer can reuse them without decoding or detecting twice.
/// Class fields are attached by the dataset builder, not here.
#[derive(Debug)]
pub struct Extraction {
    /// Source path, as recorded in the `filename` column.
    pub filename: String,
    /// The 3-per-landmark values in schema order: x, y, score.
    pub values: Vec<f32>,
    /// The decoded source image.
    pub image: DynamicImage,
    /// The detected pose.
    pub pose: Pose,
}

/// Extract the landmark values for one image file.
///
/// Returns `Ok(None)` when the image can't be decoded or the estimator
/// finds no pose; both cases log a diagnostic naming the file and are
/// per-file conditions. Estimator failures propagate as run-level errors.
///
/// # Errors
///
/// Returns an error if the estimator backend fails.
pub fn extract<E: PoseEstimator + ?Sized>(
    estimator: &mut E,
    schema: &LandmarkSchema,
    path: &Path,
    space: CoordinateSpace,
) -> Result<Option<Extraction>> {
    let image = match image::open(path) {
        Ok(image) => image,
        Err(e) => {
            warn!("Unable to decode image file: {}: {e}", path.display());
            return Ok(None);
        }
    };

    let Some(pose) = estimator.detect(&image)? else {
        warn!("Unable to read pose landmarks from file: {}", path.display());
        return Ok(None);
    };

    let (width, height) = image.dimensions();
    let mut values = Vec::with_capacity(3 * schema.landmarks().len());
    for &landmark in schema.landmarks() {
        let kp = pose.get(landmark);
        let (x, y) = project(kp, space, width, height);
        values.push(x);
        values.push(y);
        values.push(kp.visibility);
    }

    Ok(Some(Extraction {
        filename: path.to_string_lossy().to_string(),
        values,
        image,
        pose,
    }))
}

/// Map a normalized keypoint into the requested coordinate space.
///
/// Pixel mode multiplies x by the image height and y by the image width.
/// This mirrors the axes convention the existing training tables were
/// collected with and is deliberately not the renderer's mapping; changing
/// it would silently break every downstream consumer.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn project(kp: Keypoint, space: CoordinateSpace, width: u32, height: u32) -> (f32, f32) {
    match space {
        CoordinateSpace::Normalized => (kp.x, kp.y),
        CoordinateSpace::Pixels => (kp.x * height as f32, kp.y * width as f32),
    }
}
