// pose2csv · AGPL-3.0 License

//! Pose estimator seam.
//!
//! The pose model is a black-box capability behind [`PoseEstimator`]: given
//! a decoded image it returns zero or one poses. Any conforming backend can
//! be substituted without touching the feature extractor; tests use a mock.

use image::DynamicImage;

use crate::error::Result;
use crate::landmark::Pose;

/// Per-image pose detection contract.
pub trait PoseEstimator {
    /// Detect at most one pose in the image.
    ///
    /// Returns `Ok(None)` when no pose is found. The input image is never
    /// mutated.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend itself fails (a run-level condition,
    /// distinct from "no pose found").
    fn detect(&mut self, image: &DynamicImage) -> Result<Option<Pose>>;

    /// Release backend resources.
    ///
    /// Called by the dataset builder once, after the full traversal,
    /// including when processing failed midway. Backends whose resources
    /// are released on drop may leave this as the default no-op.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
