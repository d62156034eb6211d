// pose2csv · AGPL-3.0 License

//! # pose2csv
//!
//! Converts a labeled directory of exercise-form images into a tabular
//! dataset of body-landmark coordinates and confidence scores, suitable for
//! training a form classifier.
//!
//! Given a root laid out as `<root>/(train|test)/(good|bad)/<images>`, the
//! pipeline runs a pose-estimation model on every image, extracts a fixed
//! set of 13 body joints (nose, shoulders, elbows, wrists, hips, knees,
//! ankles) and writes one CSV row per detected pose: the filename, an
//! `_x`/`_y`/`_score` triple per joint, and the binary class label. Images
//! where no pose is found are skipped with a diagnostic and contribute no
//! row.
//!
//! ## Quick start (library)
//!
//! ```no_run
//! use std::path::Path;
//! use pose2csv::{CoordinateSpace, DatasetBuilder, PoseModel, Split, write_table};
//!
//! fn main() -> pose2csv::Result<()> {
//!     let mut model = PoseModel::load("yolo11n-pose.onnx")?;
//!
//!     let table = DatasetBuilder::new(Split::Train, CoordinateSpace::Normalized)
//!         .build(&mut model, Path::new("squats"))?;
//!
//!     write_table(&table, "squats.csv")?;
//!     Ok(())
//! }
//! ```
//!
//! ## CLI usage
//!
//! ```bash
//! # Build squats.csv from squats/train/{good,bad}
//! pose2csv squats
//!
//! # Test split, pixel coordinates, per-file progress
//! pose2csv squats --test-data --pixels --logs
//!
//! # Annotated copies of each processed image land in ./debug
//! pose2csv squats --debug
//! ```
//!
//! ## Module overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`landmark`] | Landmark set, [`LandmarkSchema`] column layout, [`Pose`] result |
//! | [`estimator`] | [`PoseEstimator`] trait — the black-box model seam |
//! | [`model`] | [`PoseModel`], the ONNX-backed estimator |
//! | [`extract`] | Per-image feature extraction and the coordinate-space policy |
//! | [`annotate`] | Debug rendering of detected joints |
//! | [`dataset`] | [`DatasetBuilder`]: class traversal, labeling, table assembly |
//! | [`table`] | CSV output |
//! | [`error`] | [`DatasetError`] and the [`Result`] alias |

// Modules
pub mod annotate;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod estimator;
pub mod extract;
pub mod landmark;
pub mod model;
pub mod table;

// Re-export main types for convenience
pub use dataset::{Class, DatasetBuilder, DatasetTable, FeatureRow, Split};
pub use error::{DatasetError, Result};
pub use estimator::PoseEstimator;
pub use extract::{CoordinateSpace, Extraction, extract};
pub use landmark::{Keypoint, Landmark, LandmarkSchema, NUM_LANDMARKS, Pose};
pub use model::{EstimatorConfig, PoseModel};
pub use table::write_table;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
