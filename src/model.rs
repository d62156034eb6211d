// pose2csv · AGPL-3.0 License

//! ONNX-backed pose estimator.
//!
//! Wraps an ONNX Runtime session around a YOLO-pose style model export
//! (COCO 17-keypoint head) and decodes its raw output into the 13-landmark
//! [`Pose`] the pipeline consumes.

use std::path::Path;

use image::{DynamicImage, imageops::FilterType};
use ndarray::Array4;
use ort::session::Session;
use ort::value::TensorRef;

use crate::error::{DatasetError, Result};
use crate::estimator::PoseEstimator;
use crate::landmark::{Keypoint, Landmark, NUM_LANDMARKS, Pose};

/// Number of keypoints in the COCO layout the model emits.
const COCO_KEYPOINTS: usize = 17;

/// Output attributes preceding the keypoint block: cx, cy, w, h, conf.
const BOX_ATTRS: usize = 5;

/// Configuration for the ONNX pose estimator.
///
/// Built once per run; maximum-fidelity settings for single static photos
/// rather than a video stream (full graph optimization, no frame-to-frame
/// state).
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Minimum detection confidence for a pose to count as found.
    pub confidence_threshold: f32,
    /// Model input size as (height, width).
    pub imgsz: (usize, usize),
    /// Number of intra-op threads for ONNX Runtime. `0` lets the runtime
    /// decide.
    pub num_threads: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.25,
            imgsz: (640, 640),
            num_threads: 0,
        }
    }
}

impl EstimatorConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the detection confidence threshold.
    #[must_use]
    pub const fn with_confidence(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Set the model input size.
    #[must_use]
    pub const fn with_imgsz(mut self, height: usize, width: usize) -> Self {
        self.imgsz = (height, width);
        self
    }

    /// Set the number of intra-op threads.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = threads;
        self
    }
}

/// YOLO-pose ONNX model behind the [`PoseEstimator`] contract.
pub struct PoseModel {
    session: Session,
    input_name: String,
    output_name: String,
    config: EstimatorConfig,
}

impl PoseModel {
    /// Load a pose model from an ONNX file with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the model file doesn't exist or can't be loaded.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_config(path, EstimatorConfig::default())
    }

    /// Load a pose model with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the model file doesn't exist or can't be loaded.
    pub fn load_with_config<P: AsRef<Path>>(path: P, config: EstimatorConfig) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DatasetError::ModelLoad(format!(
                "Model file not found: {}",
                path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| {
                DatasetError::ModelLoad(format!("Failed to create session builder: {e}"))
            })?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)
            .map_err(|e| {
                DatasetError::ModelLoad(format!("Failed to set optimization level: {e}"))
            })?
            .with_intra_threads(config.num_threads)
            .map_err(|e| {
                DatasetError::ModelLoad(format!("Failed to set intra-thread count: {e}"))
            })?
            .commit_from_file(path)
            .map_err(|e| DatasetError::ModelLoad(format!("Failed to load model: {e}")))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "images".to_string());

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "output0".to_string());

        Ok(Self {
            session,
            input_name,
            output_name,
            config,
        })
    }

    /// Convert an image to the model's NCHW f32 input tensor.
    ///
    /// The image is stretch-resized to the input size. Stretching (rather
    /// than letterboxing) keeps keypoints at the same relative position in
    /// the resized image as in the original, so dividing decoded pixel
    /// coordinates by the input size recovers normalized coordinates of the
    /// source image directly.
    #[allow(clippy::cast_possible_truncation)]
    fn preprocess(&self, image: &DynamicImage) -> Array4<f32> {
        let (height, width) = self.config.imgsz;
        let resized = image
            .resize_exact(width as u32, height as u32, FilterType::Triangle)
            .to_rgb8();

        let mut tensor = Array4::<f32>::zeros((1, 3, height, width));
        for (x, y, pixel) in resized.enumerate_pixels() {
            for c in 0..3 {
                tensor[[0, c, y as usize, x as usize]] = f32::from(pixel[c]) / 255.0;
            }
        }
        tensor
    }

    /// Run the ONNX session on a preprocessed tensor.
    fn run_inference(&mut self, input: &Array4<f32>) -> Result<(Vec<f32>, Vec<usize>)> {
        let input_contiguous = input.as_standard_layout();
        let input_tensor = TensorRef::from_array_view(&input_contiguous).map_err(|e| {
            DatasetError::Estimator(format!("Failed to create input tensor: {e}"))
        })?;

        let inputs = ort::inputs![&self.input_name => input_tensor];

        let outputs = self
            .session
            .run(inputs)
            .map_err(|e| DatasetError::Estimator(format!("Inference failed: {e}")))?;

        let output = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            DatasetError::Estimator(format!("Output '{}' not found", self.output_name))
        })?;

        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| DatasetError::Estimator(format!("Failed to extract output: {e}")))?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let shape_vec: Vec<usize> = shape.iter().map(|&d| d as usize).collect();

        Ok((data.to_vec(), shape_vec))
    }
}

impl PoseEstimator for PoseModel {
    fn detect(&mut self, image: &DynamicImage) -> Result<Option<Pose>> {
        let tensor = self.preprocess(image);
        let (data, shape) = self.run_inference(&tensor)?;
        decode_pose(&data, &shape, self.config.imgsz, self.config.confidence_threshold)
    }

    // Session resources are released when the model is dropped; nothing to
    // flush, so the default no-op close applies.
}

impl std::fmt::Debug for PoseModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoseModel")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("config", &self.config)
            .finish()
    }
}

/// Decode a raw YOLO-pose output buffer into at most one [`Pose`].
///
/// Expects shape `(1, 5 + 3K, A)` with attribute-major layout: four box
/// attributes, one detection confidence, then `K >= 17` keypoint triples
/// `(x_px, y_px, visibility)` in COCO order, each over `A` anchors. The
/// highest-confidence anchor wins; below the threshold the image counts as
/// having no pose.
///
/// # Errors
///
/// Returns an error if the output shape doesn't match a pose head.
pub fn decode_pose(
    data: &[f32],
    shape: &[usize],
    imgsz: (usize, usize),
    confidence_threshold: f32,
) -> Result<Option<Pose>> {
    if shape.len() != 3 || shape[0] != 1 {
        return Err(DatasetError::Estimator(format!(
            "Unexpected output shape {shape:?}, expected (1, attrs, anchors)"
        )));
    }

    let attrs = shape[1];
    let anchors = shape[2];
    if attrs < BOX_ATTRS + 3 * COCO_KEYPOINTS || (attrs - BOX_ATTRS) % 3 != 0 {
        return Err(DatasetError::Estimator(format!(
            "Output has {attrs} attributes, expected at least {} for a pose head",
            BOX_ATTRS + 3 * COCO_KEYPOINTS
        )));
    }
    if data.len() != attrs * anchors {
        return Err(DatasetError::Estimator(format!(
            "Output buffer length {} doesn't match shape {shape:?}",
            data.len()
        )));
    }

    // Attribute-major: element (attr, anchor) lives at attr * anchors + anchor.
    let attr = |a: usize, anchor: usize| data[a * anchors + anchor];

    let mut best: Option<(usize, f32)> = None;
    for anchor in 0..anchors {
        let conf = attr(4, anchor);
        if best.is_none_or(|(_, c)| conf > c) {
            best = Some((anchor, conf));
        }
    }

    let Some((anchor, conf)) = best else {
        return Ok(None);
    };
    if conf < confidence_threshold {
        return Ok(None);
    }

    #[allow(clippy::cast_precision_loss)]
    let (in_h, in_w) = (imgsz.0 as f32, imgsz.1 as f32);

    let mut points = [Keypoint::default(); NUM_LANDMARKS];
    for landmark in Landmark::ALL {
        let base = BOX_ATTRS + 3 * landmark.coco_index();
        let x = (attr(base, anchor) / in_w).clamp(0.0, 1.0);
        let y = (attr(base + 1, anchor) / in_h).clamp(0.0, 1.0);
        let visibility = attr(base + 2, anchor).clamp(0.0, 1.0);
        points[landmark as usize] = Keypoint::new(x, y, visibility);
    }

    Ok(Some(Pose::new(points)))
}
