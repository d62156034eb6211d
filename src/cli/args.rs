// pose2csv · AGPL-3.0 License

use clap::Parser;

/// Default pose model path, used when `--model` is not supplied.
pub const DEFAULT_MODEL: &str = "yolo11n-pose.onnx";

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(
    about = "Runs a pose detection model on every image of a labeled \
             good/bad directory and collects the landmark positions into a \
             CSV file named after the directory."
)]
#[command(after_help = r"Examples:
    pose2csv squats
    pose2csv squats --test-data --output squats_test.csv
    pose2csv squats --pixels --logs
    pose2csv squats --debug --model yolo11s-pose.onnx")]
pub struct Cli {
    /// Dataset root directory containing train/ and test/ splits
    pub directory: String,

    /// Name of the csv file to output
    #[arg(short, long, value_name = "FILENAME")]
    pub output: Option<String>,

    /// Path to the pose detection ONNX model
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Detection confidence threshold
    #[arg(long, default_value_t = 0.25)]
    pub conf: f32,

    /// Store the landmark positions in pixels instead of normalized
    /// coordinates
    #[arg(short, long, default_value_t = false)]
    pub pixels: bool,

    /// Print a progress line per processed file
    #[arg(short, long, default_value_t = false)]
    pub logs: bool,

    /// Select the test directory instead of train
    #[arg(short, long, default_value_t = false)]
    pub test_data: bool,

    /// Write images with the detected joints drawn into a debug directory
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,
}
