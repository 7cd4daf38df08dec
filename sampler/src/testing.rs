//! In-memory collaborators for unit tests.

use std::collections::VecDeque;

use signcap_common::frame::Frame;
use signcap_common::keypoints::{
    ExtractionResult, Keypoints, HAND_POINTS, LANDMARK_DIMS, POSE_DIMS, POSE_POINTS,
};

use crate::extractor::{ExtractorError, LandmarkExtractor, Translator, TranslatorError};
use crate::history::HistoryBuffers;

/// Extractor that replays a fixed script and errors once it runs dry.
pub struct ScriptedExtractor {
    script: VecDeque<ExtractionResult>,
    calls: usize,
}

impl ScriptedExtractor {
    pub fn new(script: Vec<ExtractionResult>) -> Self {
        Self {
            script: script.into(),
            calls: 0,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl LandmarkExtractor for ScriptedExtractor {
    fn extract(&mut self, _frame: &Frame) -> Result<ExtractionResult, ExtractorError> {
        self.calls += 1;
        self.script
            .pop_front()
            .ok_or_else(|| ExtractorError::Backend("script exhausted".into()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Translator that reports how many frames it was given, or fails on demand.
#[derive(Default)]
pub struct CountingTranslator {
    pub fail: bool,
    pub calls: usize,
}

impl Translator for CountingTranslator {
    fn translate(&mut self, history: &HistoryBuffers) -> Result<String, TranslatorError> {
        self.calls += 1;
        if self.fail {
            return Err(TranslatorError::Backend("offline".into()));
        }
        Ok(format!("{} frames", history.len()))
    }
}

/// A detected subject whose every hand component equals `v`.
pub fn hands_at(v: f32) -> ExtractionResult {
    let mut res = ExtractionResult::no_subject();
    res.pose = Keypoints::new(POSE_DIMS, vec![0.5; POSE_POINTS * POSE_DIMS]).unwrap();
    res.left_hand = Keypoints::new(LANDMARK_DIMS, vec![v; HAND_POINTS * LANDMARK_DIMS]).unwrap();
    res.right_hand = Keypoints::new(LANDMARK_DIMS, vec![v; HAND_POINTS * LANDMARK_DIMS]).unwrap();
    res
}
