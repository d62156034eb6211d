// pose2csv · AGPL-3.0 License

//! Debug rendering of detected joints.
//!
//! Draws a filled marker at each landmark on a copy of the source image and
//! persists the copy into a dedicated debug directory, one flat-named
//! artifact per successfully-extracted image.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgb};
use imageproc::drawing::draw_filled_circle_mut;

use crate::error::Result;
use crate::landmark::Pose;

/// Radius of the joint markers, in pixels.
pub const MARKER_RADIUS: i32 = 8;

/// Marker color (from the pose palette).
pub const MARKER_COLOR: Rgb<u8> = Rgb([255, 68, 79]); // #ff444f

/// Draw a filled marker at each landmark's pixel position on a copy of the
/// image. Uses the conventional mapping (`x · width`, `y · height`)
/// regardless of the coordinate space selected for the CSV. The source
/// image is never mutated.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
#[must_use]
pub fn annotate_pose(image: &DynamicImage, pose: &Pose) -> DynamicImage {
    let mut img = image.to_rgb8();
    let (width, height) = img.dimensions();

    for kp in pose.keypoints() {
        let cx = (kp.x * width as f32) as i32;
        let cy = (kp.y * height as f32) as i32;
        draw_filled_circle_mut(&mut img, (cx, cy), MARKER_RADIUS, MARKER_COLOR);
    }

    DynamicImage::ImageRgb8(img)
}

/// Owns the debug output directory for one run.
///
/// The directory is destroyed and recreated empty on creation, so a debug
/// run never mixes artifacts with a previous one.
#[derive(Debug)]
pub struct DebugWriter {
    dir: PathBuf,
}

impl DebugWriter {
    /// Recreate `dir` empty and return a writer for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory can't be removed or created.
    pub fn create<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();

        match fs::remove_dir_all(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    /// Directory the artifacts land in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Annotate the image with the pose and persist it under a flat name
    /// derived from the source path (separators replaced with `_`).
    ///
    /// # Errors
    ///
    /// Returns an error if the annotated image can't be written.
    pub fn render(&self, source: &Path, image: &DynamicImage, pose: &Pose) -> Result<PathBuf> {
        let annotated = annotate_pose(image, pose);
        let flat = source.to_string_lossy().replace(['/', '\\'], "_");
        let out = self.dir.join(flat);
        annotated.save(&out)?;
        Ok(out)
    }
}
