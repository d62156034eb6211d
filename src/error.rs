// pose2csv · AGPL-3.0 License

//! Error types for the dataset pipeline.

use std::fmt;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Main error type for the dataset pipeline.
///
/// Per-file conditions (an image that fails to decode, or one where the
/// estimator finds no pose) are not represented here: they are skipped with
/// a diagnostic and never abort a run. Everything below is run-level.
#[derive(Debug)]
pub enum DatasetError {
    /// Error loading the ONNX pose model.
    ModelLoad(String),
    /// Error while running pose estimation.
    Estimator(String),
    /// Error processing an image.
    Image(String),
    /// Invalid configuration provided.
    Config(String),
    /// Wrapped `std::io::Error`.
    Io(std::io::Error),
    /// Error writing the output table.
    Csv(csv::Error),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelLoad(msg) => write!(f, "Model load error: {msg}"),
            Self::Estimator(msg) => write!(f, "Pose estimation error: {msg}"),
            Self::Image(msg) => write!(f, "Image error: {msg}"),
            Self::Config(msg) => write!(f, "Config error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::Csv(err) => write!(f, "CSV error: {err}"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<image::ImageError> for DatasetError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err.to_string())
    }
}
