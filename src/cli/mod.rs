// pose2csv · AGPL-3.0 License

//! Command-line interface.
//!
//! Argument parsing and the wiring that turns parsed arguments into a
//! dataset build.

// Modules
/// CLI arguments.
pub mod args;

/// Extraction run logic.
pub mod extract;

/// Verbosity state behind the logging macros.
pub mod logging;
