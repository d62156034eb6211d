// pose2csv · AGPL-3.0 License

//! Landmark schema and pose result types.
//!
//! Defines the fixed ordered set of body joints the pipeline extracts and
//! the CSV column layout those joints produce.

use std::fmt;

/// Number of body landmarks extracted per pose.
pub const NUM_LANDMARKS: usize = 13;

/// Body landmarks of interest, in column order.
///
/// The discriminant of each variant is its position in [`Landmark::ALL`],
/// which lets [`Pose`] index its keypoint storage directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Landmark {
    /// Nose.
    Nose,
    /// Left shoulder.
    LeftShoulder,
    /// Right shoulder.
    RightShoulder,
    /// Left elbow.
    LeftElbow,
    /// Right elbow.
    RightElbow,
    /// Left wrist.
    LeftWrist,
    /// Right wrist.
    RightWrist,
    /// Left hip.
    LeftHip,
    /// Right hip.
    RightHip,
    /// Left knee.
    LeftKnee,
    /// Right knee.
    RightKnee,
    /// Left ankle.
    LeftAnkle,
    /// Right ankle.
    RightAnkle,
}

impl Landmark {
    /// All landmarks, in the fixed column order.
    pub const ALL: [Self; NUM_LANDMARKS] = [
        Self::Nose,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    /// Column stem used in the CSV header (e.g. `left_shoulder`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }

    /// Index of this landmark in the COCO 17-keypoint layout emitted by
    /// YOLO-pose style models. The eyes and ears (indices 1-4) are not part
    /// of the schema.
    #[must_use]
    pub const fn coco_index(self) -> usize {
        match self {
            Self::Nose => 0,
            Self::LeftShoulder => 5,
            Self::RightShoulder => 6,
            Self::LeftElbow => 7,
            Self::RightElbow => 8,
            Self::LeftWrist => 9,
            Self::RightWrist => 10,
            Self::LeftHip => 11,
            Self::RightHip => 12,
            Self::LeftKnee => 13,
            Self::RightKnee => 14,
            Self::LeftAnkle => 15,
            Self::RightAnkle => 16,
        }
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single detected keypoint.
///
/// `x` and `y` are normalized image-relative coordinates in `[0, 1]`;
/// `visibility` is the model confidence in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Keypoint {
    /// Normalized horizontal position.
    pub x: f32,
    /// Normalized vertical position.
    pub y: f32,
    /// Model-reported confidence that the keypoint is correctly located.
    pub visibility: f32,
}

impl Keypoint {
    /// Create a new keypoint.
    #[must_use]
    pub const fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }
}

/// Pose result for one image: one keypoint per [`Landmark`].
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    points: [Keypoint; NUM_LANDMARKS],
}

impl Pose {
    /// Create a pose from keypoints in [`Landmark::ALL`] order.
    #[must_use]
    pub const fn new(points: [Keypoint; NUM_LANDMARKS]) -> Self {
        Self { points }
    }

    /// Get the keypoint for a landmark.
    #[must_use]
    pub const fn get(&self, landmark: Landmark) -> Keypoint {
        self.points[landmark as usize]
    }

    /// Iterate keypoints in landmark order.
    pub fn keypoints(&self) -> impl Iterator<Item = Keypoint> + '_ {
        self.points.iter().copied()
    }
}

/// The ordered landmark list and the column layout it produces.
///
/// An explicit value rather than global state, so independent dataset
/// builds can hold their own schema.
#[derive(Debug, Clone)]
pub struct LandmarkSchema {
    landmarks: &'static [Landmark],
}

impl Default for LandmarkSchema {
    fn default() -> Self {
        Self {
            landmarks: &Landmark::ALL,
        }
    }
}

impl LandmarkSchema {
    /// Create a schema over the full landmark set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Landmarks in column order.
    #[must_use]
    pub const fn landmarks(&self) -> &[Landmark] {
        self.landmarks
    }

    /// Build the CSV header: `filename`, then `{name}_x`, `{name}_y`,
    /// `{name}_score` per landmark, then `class_no` and `class_name`.
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.columns());
        header.push("filename".to_string());

        for landmark in self.landmarks {
            let key = landmark.name();
            header.push(format!("{key}_x"));
            header.push(format!("{key}_y"));
            header.push(format!("{key}_score"));
        }

        header.push("class_no".to_string());
        header.push("class_name".to_string());
        header
    }

    /// Total column count: filename + 3 per landmark + the two class fields.
    #[must_use]
    pub const fn columns(&self) -> usize {
        1 + 3 * self.landmarks.len() + 2
    }
}
