// pose2csv · AGPL-3.0 License

//! Dataset construction.
//!
//! Walks the two class subdirectories of a split, drives the feature
//! extractor (and optionally the debug renderer) per file, attaches class
//! labels, and assembles the full row table in a deterministic order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::annotate::DebugWriter;
use crate::error::Result;
use crate::estimator::PoseEstimator;
use crate::extract::{CoordinateSpace, extract};
use crate::landmark::LandmarkSchema;
use crate::{verbose, warn};

/// Default debug artifact directory, relative to the working directory.
pub const DEBUG_DIR: &str = "debug";

/// File names that are filesystem metadata noise, skipped silently.
fn is_noise(name: &str) -> bool {
    name.starts_with('.') || name == "Thumbs.db"
}

/// The train/test partition of the dataset root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Split {
    /// The `train` subdirectory.
    #[default]
    Train,
    /// The `test` subdirectory.
    Test,
}

impl Split {
    /// Subdirectory name under the dataset root.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Test => "test",
        }
    }
}

/// Binary form class, determined by which subdirectory an image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    /// Correct exercise form.
    Good,
    /// Incorrect exercise form.
    Bad,
}

impl Class {
    /// Processing order: good first, then bad.
    pub const ALL: [Self; 2] = [Self::Good, Self::Bad];

    /// Numeric label for the `class_no` column.
    #[must_use]
    pub const fn class_no(self) -> u8 {
        match self {
            Self::Good => 1,
            Self::Bad => 0,
        }
    }

    /// Name for the `class_name` column, also the subdirectory name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }
}

/// One row of the output table.
///
/// Constructed once per successfully processed image, appended to the
/// table, never mutated afterward.
#[derive(Debug, Clone)]
pub struct FeatureRow {
    /// Source path of the image.
    pub filename: String,
    /// The 3-per-landmark values in schema order.
    pub values: Vec<f32>,
    /// Class label.
    pub class: Class,
}

impl FeatureRow {
    /// Serialize to a CSV record: filename, landmark values, class fields.
    #[must_use]
    pub fn to_record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(1 + self.values.len() + 2);
        record.push(self.filename.clone());
        for value in &self.values {
            record.push(value.to_string());
        }
        record.push(self.class.class_no().to_string());
        record.push(self.class.name().to_string());
        record
    }
}

/// The assembled dataset: header plus rows in emission order.
#[derive(Debug, Clone)]
pub struct DatasetTable {
    /// Column names, derived from the landmark schema.
    pub header: Vec<String>,
    /// Feature rows, all "good" rows before all "bad" rows.
    pub rows: Vec<FeatureRow>,
}

impl DatasetTable {
    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Orchestrates one dataset build.
#[derive(Debug)]
pub struct DatasetBuilder {
    schema: LandmarkSchema,
    split: Split,
    space: CoordinateSpace,
    debug_dir: Option<PathBuf>,
}

impl DatasetBuilder {
    /// Create a builder for the given split and coordinate space, with the
    /// default landmark schema and debug rendering disabled.
    #[must_use]
    pub fn new(split: Split, space: CoordinateSpace) -> Self {
        Self {
            schema: LandmarkSchema::default(),
            split,
            space,
            debug_dir: None,
        }
    }

    /// Enable or disable debug rendering into [`DEBUG_DIR`].
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug_dir = debug.then(|| PathBuf::from(DEBUG_DIR));
        self
    }

    /// Enable debug rendering into a specific directory.
    #[must_use]
    pub fn with_debug_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.debug_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// The landmark schema in use.
    #[must_use]
    pub const fn schema(&self) -> &LandmarkSchema {
        &self.schema
    }

    /// Build the dataset table for `root`.
    ///
    /// Resolves `<root>/<split>`, processes `good` then `bad`, and releases
    /// the estimator afterwards even when the traversal failed.
    ///
    /// # Errors
    ///
    /// Returns an error if a class directory is missing or unreadable, the
    /// debug directory can't be prepared, or the estimator fails.
    pub fn build<E: PoseEstimator + ?Sized>(
        &self,
        estimator: &mut E,
        root: &Path,
    ) -> Result<DatasetTable> {
        let outcome = self.traverse(estimator, &root.join(self.split.as_str()));

        if let Err(e) = estimator.close() {
            warn!("Failed to release pose estimator: {e}");
        }

        outcome
    }

    fn traverse<E: PoseEstimator + ?Sized>(
        &self,
        estimator: &mut E,
        dir: &Path,
    ) -> Result<DatasetTable> {
        let debug_writer = self
            .debug_dir
            .as_ref()
            .map(DebugWriter::create)
            .transpose()?;

        let mut table = DatasetTable {
            header: self.schema.header(),
            rows: Vec::new(),
        };

        for class in Class::ALL {
            let class_dir = dir.join(class.name());
            for path in list_files(&class_dir)? {
                let Some(extraction) = extract(estimator, &self.schema, &path, self.space)?
                else {
                    continue;
                };

                if let Some(writer) = &debug_writer {
                    if let Err(e) = writer.render(&path, &extraction.image, &extraction.pose) {
                        warn!("Failed to write debug image for {}: {e}", path.display());
                    }
                }

                table.rows.push(FeatureRow {
                    filename: extraction.filename,
                    values: extraction.values,
                    class,
                });

                verbose!(
                    "Successfully finished {}",
                    path.file_name().unwrap_or_default().to_string_lossy()
                );
            }
        }

        Ok(table)
    }
}

/// List the files of a class directory in filesystem enumeration order.
///
/// The order is deliberately not re-sorted: re-running on an unchanged
/// directory must reproduce the same row order, and that order is whatever
/// the enumeration yields.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if is_noise(&name.to_string_lossy()) {
            continue;
        }
        if entry.file_type()?.is_file() {
            paths.push(entry.path());
        }
    }
    Ok(paths)
}
