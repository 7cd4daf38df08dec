//! Adaptive frame sampling and keypoint history recording for sign capture.
//!
//! [`FrameSampler`] decides which frames reach the landmark extractor and
//! adjusts its skip interval from hand motion. [`Pipeline`] wraps it into a
//! recording session that buffers keypoints and hands them to a translator.

pub mod extractor;
pub mod history;
pub mod motion;
pub mod pipeline;
pub mod rate;
pub mod sampler;

#[cfg(test)]
mod testing;

pub use extractor::{ExtractorError, LandmarkExtractor, Translator, TranslatorError};
pub use history::HistoryBuffers;
pub use motion::MotionWindow;
pub use pipeline::{Pipeline, PipelineError};
pub use rate::{MotionLevel, RateController};
pub use sampler::{FrameSampler, ProcessedFrame, SampleOutcome, SamplerError};
