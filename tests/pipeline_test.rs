// pose2csv · AGPL-3.0 License

//! End-to-end pipeline tests over a synthetic labeled directory, with a
//! mock estimator standing in for the pose model.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView, RgbImage};

use pose2csv::{
    Class, CoordinateSpace, DatasetBuilder, Keypoint, NUM_LANDMARKS, Pose, PoseEstimator, Result,
    Split, write_table,
};

/// Width that makes the mock report "no pose found".
const UNDETECTABLE_WIDTH: u32 = 7;

/// Mock estimator: returns a fixed pose unless the image has the
/// undetectable width. Tracks detect/close calls.
struct MockEstimator {
    pose: Pose,
    detect_calls: usize,
    closed: bool,
}

impl MockEstimator {
    fn new() -> Self {
        let mut points = [Keypoint::new(0.5, 0.5, 0.9); NUM_LANDMARKS];
        points[0] = Keypoint::new(0.25, 0.75, 1.0); // nose
        Self {
            pose: Pose::new(points),
            detect_calls: 0,
            closed: false,
        }
    }
}

impl PoseEstimator for MockEstimator {
    fn detect(&mut self, image: &DynamicImage) -> Result<Option<Pose>> {
        self.detect_calls += 1;
        if image.width() == UNDETECTABLE_WIDTH {
            Ok(None)
        } else {
            Ok(Some(self.pose.clone()))
        }
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

/// Write a blank image of the given size at `path`.
fn write_image(path: &Path, width: u32, height: u32) {
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .save(path)
        .unwrap();
}

/// Build `<root>/train/{good,bad}` with one detectable good image, one
/// detectable bad image, and one undetectable bad image.
fn build_fixture(root: &Path) -> (PathBuf, PathBuf) {
    let good = root.join("train").join("good");
    let bad = root.join("train").join("bad");
    fs::create_dir_all(&good).unwrap();
    fs::create_dir_all(&bad).unwrap();

    write_image(&good.join("a.png"), 40, 20);
    write_image(&bad.join("b.png"), 40, 20);
    write_image(&bad.join("c.png"), UNDETECTABLE_WIDTH, 20);

    // Metadata noise must be skipped silently.
    fs::write(good.join(".DS_Store"), b"noise").unwrap();

    (good, bad)
}

#[test]
fn end_to_end_two_rows_and_one_skip() {
    let tmp = tempfile::tempdir().unwrap();
    build_fixture(tmp.path());

    let mut estimator = MockEstimator::new();
    let builder = DatasetBuilder::new(Split::Train, CoordinateSpace::Normalized);
    let table = builder.build(&mut estimator, tmp.path()).unwrap();

    // c.png detected nothing, so it contributes zero rows.
    assert_eq!(table.len(), 2);
    assert_eq!(estimator.detect_calls, 3);
    assert!(estimator.closed);

    // Good rows precede bad rows, with the matching labels.
    assert_eq!(table.rows[0].class, Class::Good);
    assert!(table.rows[0].filename.ends_with("a.png"));
    assert_eq!(table.rows[1].class, Class::Bad);
    assert!(table.rows[1].filename.ends_with("b.png"));

    // Every record matches the header's column count.
    assert_eq!(table.header.len(), 41);
    for row in &table.rows {
        assert_eq!(row.to_record().len(), table.header.len());
    }

    // Normalized mode keeps every coordinate in [0, 1].
    for row in &table.rows {
        for value in &row.values {
            assert!((0.0..=1.0).contains(value));
        }
    }
}

#[test]
fn pixel_mode_scales_x_by_height_and_y_by_width() {
    let tmp = tempfile::tempdir().unwrap();
    build_fixture(tmp.path());

    let mut estimator = MockEstimator::new();
    let builder = DatasetBuilder::new(Split::Train, CoordinateSpace::Pixels);
    let table = builder.build(&mut estimator, tmp.path()).unwrap();

    // Images are 40 wide, 20 high; the mock puts the nose at (0.25, 0.75).
    let row = &table.rows[0];
    let nose_x = row.values[0];
    let nose_y = row.values[1];
    let nose_score = row.values[2];
    assert!((nose_x - 0.25 * 20.0).abs() < f32::EPSILON);
    assert!((nose_y - 0.75 * 40.0).abs() < f32::EPSILON);
    // Visibility is never rescaled.
    assert!((nose_score - 1.0).abs() < f32::EPSILON);

    for row in &table.rows {
        for triple in row.values.chunks(3) {
            assert!((0.0..=20.0).contains(&triple[0]));
            assert!((0.0..=40.0).contains(&triple[1]));
            assert!((0.0..=1.0).contains(&triple[2]));
        }
    }
}

#[test]
fn repeated_runs_produce_identical_output() {
    let tmp = tempfile::tempdir().unwrap();
    build_fixture(tmp.path());

    let builder = DatasetBuilder::new(Split::Train, CoordinateSpace::Normalized);

    let first = tmp.path().join("first.csv");
    let second = tmp.path().join("second.csv");

    let mut estimator = MockEstimator::new();
    write_table(&builder.build(&mut estimator, tmp.path()).unwrap(), &first).unwrap();
    let mut estimator = MockEstimator::new();
    write_table(&builder.build(&mut estimator, tmp.path()).unwrap(), &second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn debug_mode_writes_one_artifact_per_row() {
    let tmp = tempfile::tempdir().unwrap();
    build_fixture(tmp.path());
    let debug_dir = tmp.path().join("debug");

    let mut estimator = MockEstimator::new();
    let builder = DatasetBuilder::new(Split::Train, CoordinateSpace::Normalized)
        .with_debug_dir(&debug_dir);
    let table = builder.build(&mut estimator, tmp.path()).unwrap();

    let artifacts: Vec<_> = fs::read_dir(&debug_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(artifacts.len(), table.len());
    // Flat names: no path separators survive.
    for name in &artifacts {
        assert!(!name.contains('/'));
        assert!(name.ends_with(".png"));
    }
}

#[test]
fn debug_mode_off_leaves_no_debug_directory() {
    let tmp = tempfile::tempdir().unwrap();
    build_fixture(tmp.path());

    let mut estimator = MockEstimator::new();
    let builder = DatasetBuilder::new(Split::Train, CoordinateSpace::Normalized);
    builder.build(&mut estimator, tmp.path()).unwrap();

    assert!(!tmp.path().join("debug").exists());
}

#[test]
fn test_split_selects_test_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let good = tmp.path().join("test").join("good");
    let bad = tmp.path().join("test").join("bad");
    fs::create_dir_all(&good).unwrap();
    fs::create_dir_all(&bad).unwrap();
    write_image(&good.join("t.png"), 40, 20);

    let mut estimator = MockEstimator::new();
    let builder = DatasetBuilder::new(Split::Test, CoordinateSpace::Normalized);
    let table = builder.build(&mut estimator, tmp.path()).unwrap();

    assert_eq!(table.len(), 1);
    assert!(table.rows[0].filename.ends_with("t.png"));
}

#[test]
fn missing_class_directory_aborts_but_still_closes_estimator() {
    let tmp = tempfile::tempdir().unwrap();
    // Only good/ exists; bad/ is missing -> run-level failure.
    let good = tmp.path().join("train").join("good");
    fs::create_dir_all(&good).unwrap();
    write_image(&good.join("a.png"), 40, 20);

    let mut estimator = MockEstimator::new();
    let builder = DatasetBuilder::new(Split::Train, CoordinateSpace::Normalized);
    let result = builder.build(&mut estimator, tmp.path());

    assert!(result.is_err());
    assert!(estimator.closed);
}

#[test]
fn undecodable_file_is_skipped_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let (good, _bad) = build_fixture(tmp.path());
    fs::write(good.join("broken.png"), b"not an image").unwrap();

    let mut estimator = MockEstimator::new();
    let builder = DatasetBuilder::new(Split::Train, CoordinateSpace::Normalized);
    let table = builder.build(&mut estimator, tmp.path()).unwrap();

    // broken.png decodes to nothing and is never sent to the estimator.
    assert_eq!(table.len(), 2);
    assert_eq!(estimator.detect_calls, 3);
}
