use serde::Serialize;
use signcap_common::keypoints::{ExtractionResult, Keypoints};

/// Per-channel keypoint sequences collected while recording.
///
/// One entry per recorded frame in each channel, so all four channels
/// always have the same length. `record` and `reset` are the only mutators.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryBuffers {
    pose: Vec<Keypoints>,
    face: Vec<Keypoints>,
    left_hand: Vec<Keypoints>,
    right_hand: Vec<Keypoints>,
}

impl HistoryBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &ExtractionResult) {
        self.pose.push(result.pose.clone());
        self.face.push(result.face.clone());
        self.left_hand.push(result.left_hand.clone());
        self.right_hand.push(result.right_hand.clone());
    }

    pub fn reset(&mut self) {
        self.pose.clear();
        self.face.clear();
        self.left_hand.clear();
        self.right_hand.clear();
    }

    /// Number of recorded frames.
    pub fn len(&self) -> usize {
        self.pose.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pose.is_empty()
    }

    pub fn pose(&self) -> &[Keypoints] {
        &self.pose
    }

    pub fn face(&self) -> &[Keypoints] {
        &self.face
    }

    pub fn left_hand(&self) -> &[Keypoints] {
        &self.left_hand
    }

    pub fn right_hand(&self) -> &[Keypoints] {
        &self.right_hand
    }
}
