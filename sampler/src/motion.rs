use std::collections::VecDeque;

/// Short history of concatenated hand-keypoint vectors.
///
/// Holds at most `capacity` entries; pushing onto a full window evicts the
/// oldest one. Only the newest entry takes part in the motion estimate, the
/// rest is kept so callers can inspect recent hand trajectories.
#[derive(Debug, Clone)]
pub struct MotionWindow {
    entries: VecDeque<Vec<f32>>,
    capacity: usize,
}

impl MotionWindow {
    /// `capacity` is raised to 1 if zero is passed.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Euclidean distance between `current` and the newest stored vector.
    ///
    /// Returns 0.0 on an empty window: with no prior sample no motion is
    /// asserted. Vectors of different lengths are compared as if the shorter
    /// one were zero-padded.
    pub fn magnitude(&self, current: &[f32]) -> f64 {
        let Some(prev) = self.entries.back() else {
            return 0.0;
        };
        let len = prev.len().max(current.len());
        let sum: f64 = (0..len)
            .map(|i| {
                let a = current.get(i).copied().unwrap_or(0.0) as f64;
                let b = prev.get(i).copied().unwrap_or(0.0) as f64;
                (a - b) * (a - b)
            })
            .sum();
        sum.sqrt()
    }

    pub fn push(&mut self, vector: Vec<f32>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(vector);
    }

    pub fn latest(&self) -> Option<&[f32]> {
        self.entries.back().map(Vec::as_slice)
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &[f32]> {
        self.entries.iter().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
