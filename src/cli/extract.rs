// pose2csv · AGPL-3.0 License

use std::path::Path;
use std::process;

use crate::cli::args::Cli;
use crate::cli::logging::set_verbose;
use crate::dataset::{DatasetBuilder, Split};
use crate::extract::CoordinateSpace;
use crate::model::{EstimatorConfig, PoseModel};
use crate::table::write_table;
use crate::{error, success};

/// Run the full extraction: model load, dataset build, table write.
///
/// Per-file failures are diagnosed and skipped inside the builder;
/// run-level failures print an error and exit non-zero before any partial
/// table is left behind (the table is written once, after the traversal).
pub fn run_extraction(args: &Cli) {
    set_verbose(args.logs);

    let config = EstimatorConfig::new().with_confidence(args.conf);
    let mut model = match PoseModel::load_with_config(&args.model, config) {
        Ok(m) => m,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let split = if args.test_data {
        Split::Test
    } else {
        Split::Train
    };
    let space = if args.pixels {
        CoordinateSpace::Pixels
    } else {
        CoordinateSpace::Normalized
    };

    let builder = DatasetBuilder::new(split, space).with_debug(args.debug);
    let table = match builder.build(&mut model, Path::new(&args.directory)) {
        Ok(t) => t,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_name(&args.directory));

    if let Err(e) = write_table(&table, &output) {
        error!("{e}");
        process::exit(1);
    }

    success!("Wrote {} rows to {output}", table.len());
}

/// Default output filename: the dataset root's name with a `.csv` suffix.
fn default_output_name(directory: &str) -> String {
    format!("{}.csv", directory.trim_end_matches(['/', '\\']))
}
