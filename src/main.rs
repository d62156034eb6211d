// pose2csv · AGPL-3.0 License

use clap::Parser;

use pose2csv::cli::args::Cli;
use pose2csv::cli::extract::run_extraction;

fn main() {
    let cli = Cli::parse();
    run_extraction(&cli);
}
