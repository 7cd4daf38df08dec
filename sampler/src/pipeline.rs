use signcap_common::config::{RecordingConfig, SamplerConfig};
use signcap_common::frame::Frame;
use tracing::{debug, info, warn};

use crate::extractor::{LandmarkExtractor, Translator, TranslatorError};
use crate::history::HistoryBuffers;
use crate::sampler::{FrameSampler, SampleOutcome, SamplerError};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Sampler(#[from] SamplerError),
    #[error(transparent)]
    Translation(#[from] TranslatorError),
}

/// A capture session: frame sampler, recorded history and translator.
///
/// `update` is the per-frame entry point. History only grows while
/// recording is on, and is cleared by `reset` or handed off by `flush`.
pub struct Pipeline<E, T> {
    sampler: FrameSampler<E>,
    translator: T,
    history: HistoryBuffers,
    is_recording: bool,
    segment_frames: Option<usize>,
    /// History length when the last flush failed; the next attempt waits
    /// for a full segment past this point.
    failed_at: Option<usize>,
}

impl<E: LandmarkExtractor, T: Translator> Pipeline<E, T> {
    pub fn new(
        extractor: E,
        translator: T,
        sampler_config: &SamplerConfig,
        recording: &RecordingConfig,
    ) -> Self {
        info!(
            extractor = extractor.name(),
            translator = translator.name(),
            recording = recording.enabled,
            "pipeline created"
        );
        Self {
            sampler: FrameSampler::new(extractor, sampler_config),
            translator,
            history: HistoryBuffers::new(),
            is_recording: recording.enabled,
            segment_frames: recording.segment_frames,
            failed_at: None,
        }
    }

    /// Push one frame through the sampler and record it if it was processed.
    pub fn update(&mut self, frame: &Frame) -> Result<SampleOutcome, PipelineError> {
        let outcome = self.sampler.process(frame)?;
        if let SampleOutcome::Processed(p) = &outcome {
            if self.is_recording {
                self.history.record(&p.result);
                debug!(seq = frame.seq, recorded = self.history.len(), "frame recorded");
            }
        }
        Ok(outcome)
    }

    pub fn set_recording(&mut self, recording: bool) {
        if recording != self.is_recording {
            info!(recording, buffered = self.history.len(), "recording toggled");
        }
        self.is_recording = recording;
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    /// Clear recorded history. Sampler state is left untouched.
    pub fn reset(&mut self) {
        self.history.reset();
        self.failed_at = None;
    }

    pub fn history(&self) -> &HistoryBuffers {
        &self.history
    }

    /// True once the configured segment length has been recorded since the
    /// last flush attempt.
    pub fn segment_full(&self) -> bool {
        let base = self.failed_at.unwrap_or(0);
        self.segment_frames
            .is_some_and(|limit| self.history.len() >= base + limit)
    }

    /// Translate the recorded history and start a fresh one.
    ///
    /// Returns `Ok(None)` when nothing has been recorded. On translator
    /// failure the history is kept so the caller can retry.
    pub fn flush(&mut self) -> Result<Option<String>, PipelineError> {
        if self.history.is_empty() {
            return Ok(None);
        }
        let frames = self.history.len();
        match self.translator.translate(&self.history) {
            Ok(text) => {
                info!(frames, text, "sequence translated");
                self.history.reset();
                self.failed_at = None;
                Ok(Some(text))
            }
            Err(e) => {
                warn!(error = %e, frames, "translation failed, keeping history");
                self.failed_at = Some(frames);
                Err(e.into())
            }
        }
    }

    pub fn sampler(&self) -> &FrameSampler<E> {
        &self.sampler
    }
}
