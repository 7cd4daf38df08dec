use signcap_common::frame::Frame;
use signcap_common::keypoints::ExtractionResult;

use crate::history::HistoryBuffers;

/// Landmark extractor interface.
///
/// Implementations receive a square RGB frame and return pose, face and
/// hand keypoints. When no subject is found they return an all-zero pose
/// (see [`ExtractionResult::no_subject`]) rather than an error.
pub trait LandmarkExtractor: Send {
    fn extract(&mut self, frame: &Frame) -> Result<ExtractionResult, ExtractorError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Sign translator interface: turns a recorded keypoint sequence into text.
pub trait Translator: Send {
    fn translate(&mut self, history: &HistoryBuffers) -> Result<String, TranslatorError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str {
        "unnamed"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    #[error("extractor backend failed: {0}")]
    Backend(String),
    #[error("malformed extractor response: {0}")]
    Response(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TranslatorError {
    #[error("translator backend failed: {0}")]
    Backend(String),
    #[error("malformed translator response: {0}")]
    Response(String),
}
