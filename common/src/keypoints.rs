use serde::Serialize;

/// Components per pose landmark: x, y, z, visibility.
pub const POSE_DIMS: usize = 4;
/// Components per face / hand landmark: x, y, z.
pub const LANDMARK_DIMS: usize = 3;

pub const POSE_POINTS: usize = 33;
pub const FACE_POINTS: usize = 468;
pub const HAND_POINTS: usize = 21;

/// A `points x dims` tensor of landmark coordinates, stored flat and row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keypoints {
    dims: usize,
    values: Vec<f32>,
}

impl Keypoints {
    pub fn new(dims: usize, values: Vec<f32>) -> Result<Self, KeypointsError> {
        if dims == 0 || values.len() % dims != 0 {
            return Err(KeypointsError::Shape {
                len: values.len(),
                dims,
            });
        }
        Ok(Self { dims, values })
    }

    pub fn from_points<const N: usize>(points: &[[f32; N]]) -> Self {
        Self {
            dims: N,
            values: points.iter().flatten().copied().collect(),
        }
    }

    pub fn zeros(points: usize, dims: usize) -> Self {
        Self {
            dims,
            values: vec![0.0; points * dims],
        }
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn num_points(&self) -> usize {
        if self.dims == 0 {
            0
        } else {
            self.values.len() / self.dims
        }
    }

    /// Flattened values, point after point.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn point(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.dims)?;
        self.values.get(start..start + self.dims)
    }

    /// True when every component is exactly zero (including an empty tensor).
    pub fn is_all_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeypointsError {
    #[error("{len} values cannot be split into points of {dims} components")]
    Shape { len: usize, dims: usize },
}

/// One extractor response: pose, face and both hands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub pose: Keypoints,
    pub face: Keypoints,
    pub left_hand: Keypoints,
    pub right_hand: Keypoints,
}

impl ExtractionResult {
    /// What an extractor returns when nobody is in the frame.
    pub fn no_subject() -> Self {
        Self {
            pose: Keypoints::zeros(POSE_POINTS, POSE_DIMS),
            face: Keypoints::zeros(FACE_POINTS, LANDMARK_DIMS),
            left_hand: Keypoints::zeros(HAND_POINTS, LANDMARK_DIMS),
            right_hand: Keypoints::zeros(HAND_POINTS, LANDMARK_DIMS),
        }
    }

    /// An all-zero pose is the extractor's "no subject" sentinel.
    pub fn has_subject(&self) -> bool {
        !self.pose.is_all_zero()
    }

    /// Left-hand values followed by right-hand values.
    pub fn hand_vector(&self) -> Vec<f32> {
        let mut v =
            Vec::with_capacity(self.left_hand.values().len() + self.right_hand.values().len());
        v.extend_from_slice(self.left_hand.values());
        v.extend_from_slice(self.right_hand.values());
        v
    }
}
