use signcap_common::config::SamplerConfig;
use signcap_common::frame::Frame;
use signcap_common::keypoints::ExtractionResult;
use tracing::{debug, trace};

use crate::extractor::{ExtractorError, LandmarkExtractor};
use crate::motion::MotionWindow;
use crate::rate::{MotionLevel, RateController};

/// What happened to one pushed frame.
#[derive(Debug)]
pub enum SampleOutcome {
    /// Rate-gated: the extractor was not called.
    Skipped,
    /// Extracted, but the pose was all zeros. Nothing else changed.
    NoSubject,
    /// Extracted with a subject; motion and skip interval were updated.
    Processed(ProcessedFrame),
}

impl SampleOutcome {
    pub fn processed(&self) -> Option<&ProcessedFrame> {
        match self {
            SampleOutcome::Processed(p) => Some(p),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ProcessedFrame {
    pub result: ExtractionResult,
    pub magnitude: f64,
    pub level: MotionLevel,
    /// Skip interval after the update.
    pub skip_interval: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum SamplerError {
    #[error("frame must be square, got {width}x{height}")]
    InvalidFrameShape { width: u32, height: u32 },
    #[error(transparent)]
    Extraction(#[from] ExtractorError),
}

/// Decides which frames reach the extractor and tracks hand motion.
///
/// Every call that passes the shape check advances the frame counter, so
/// gating keeps an exact period even across skipped frames. The motion
/// window and skip interval only change on frames that reach the extractor
/// and contain a subject.
pub struct FrameSampler<E> {
    extractor: E,
    frame_count: u64,
    rate: RateController,
    motion: MotionWindow,
}

impl<E: LandmarkExtractor> FrameSampler<E> {
    pub fn new(extractor: E, config: &SamplerConfig) -> Self {
        Self {
            extractor,
            frame_count: 0,
            rate: RateController::new(config),
            motion: MotionWindow::new(config.window_size),
        }
    }

    pub fn process(&mut self, frame: &Frame) -> Result<SampleOutcome, SamplerError> {
        if !frame.is_square() {
            return Err(SamplerError::InvalidFrameShape {
                width: frame.width,
                height: frame.height,
            });
        }

        self.frame_count += 1;
        if !self.rate.should_process(self.frame_count) {
            trace!(
                frame_count = self.frame_count,
                skip_interval = self.rate.skip_interval(),
                "frame gated"
            );
            return Ok(SampleOutcome::Skipped);
        }

        let result = self.extractor.extract(frame)?;
        if !result.has_subject() {
            debug!(
                seq = frame.seq,
                extractor = self.extractor.name(),
                "no subject in frame"
            );
            return Ok(SampleOutcome::NoSubject);
        }

        let hands = result.hand_vector();
        let magnitude = self.motion.magnitude(&hands);
        self.motion.push(hands);
        let level = self.rate.apply(magnitude);

        debug!(
            seq = frame.seq,
            frame_count = self.frame_count,
            magnitude = format!("{:.1}", magnitude),
            ?level,
            skip_interval = self.rate.skip_interval(),
            "frame processed"
        );

        Ok(SampleOutcome::Processed(ProcessedFrame {
            result,
            magnitude,
            level,
            skip_interval: self.rate.skip_interval(),
        }))
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn skip_interval(&self) -> u32 {
        self.rate.skip_interval()
    }

    pub fn motion_window(&self) -> &MotionWindow {
        &self.motion
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{hands_at, ScriptedExtractor};

    fn sampler(script: Vec<ExtractionResult>) -> FrameSampler<ScriptedExtractor> {
        FrameSampler::new(ScriptedExtractor::new(script), &SamplerConfig::default())
    }

    #[test]
    fn first_processed_frame_has_zero_magnitude() {
        let mut s = sampler(vec![hands_at(10.0)]);
        let out = s.process(&Frame::black(8, 8)).unwrap();
        let p = out.processed().unwrap();
        assert_eq!(p.magnitude, 0.0);
        assert_eq!(p.level, MotionLevel::Stable);
        assert_eq!(s.skip_interval(), 2);
        assert_eq!(s.motion_window().len(), 1);
    }

    #[test]
    fn non_square_frame_changes_nothing() {
        let mut s = sampler(vec![hands_at(0.0)]);
        let err = s.process(&Frame::black(8, 6)).unwrap_err();
        assert!(matches!(
            err,
            SamplerError::InvalidFrameShape { width: 8, height: 6 }
        ));
        assert_eq!(s.frame_count(), 0);
        assert_eq!(s.skip_interval(), 1);
        assert!(s.motion_window().is_empty());
        assert_eq!(s.extractor().calls(), 0);
    }

    #[test]
    fn gated_frames_only_advance_counter() {
        // Stable hands raise the interval by one per processed frame, so
        // frames 1..=5 all land on a multiple and the interval tops out at 5.
        let script = (0..6).map(|_| hands_at(0.0)).collect();
        let mut s = sampler(script);
        let frame = Frame::black(4, 4);

        for n in 1..=5 {
            assert!(s.process(&frame).unwrap().processed().is_some(), "frame {n}");
        }
        assert_eq!(s.skip_interval(), 5);

        for _ in 6..=9 {
            assert!(matches!(s.process(&frame).unwrap(), SampleOutcome::Skipped));
        }
        assert_eq!(s.frame_count(), 9);
        assert_eq!(s.extractor().calls(), 5);
        assert_eq!(s.motion_window().len(), 5);
        assert_eq!(s.skip_interval(), 5);

        assert!(s.process(&frame).unwrap().processed().is_some());
        assert_eq!(s.extractor().calls(), 6);
    }

    #[test]
    fn no_subject_leaves_motion_and_rate_alone() {
        let mut s = sampler(vec![hands_at(0.0), ExtractionResult::no_subject()]);
        let frame = Frame::black(4, 4);
        s.process(&frame).unwrap();
        let window_before: Vec<Vec<f32>> = s.motion_window().iter().map(<[f32]>::to_vec).collect();

        // interval is now 2, frame 2 reaches the extractor
        assert!(matches!(s.process(&frame).unwrap(), SampleOutcome::NoSubject));
        let window_after: Vec<Vec<f32>> = s.motion_window().iter().map(<[f32]>::to_vec).collect();
        assert_eq!(window_before, window_after);
        assert_eq!(s.skip_interval(), 2);
        assert_eq!(s.frame_count(), 2);
    }

    #[test]
    fn large_hand_jump_lowers_interval() {
        // Each hand_at vector has 126 components; a shift of 50 gives
        // sqrt(126) * 50 ~= 561 > 300.
        let mut s = FrameSampler::new(
            ScriptedExtractor::new(vec![hands_at(0.0), hands_at(50.0)]),
            &SamplerConfig {
                initial_skip: 1,
                max_skip: 1,
                ..SamplerConfig::default()
            },
        );
        let frame = Frame::black(4, 4);
        s.process(&frame).unwrap();
        let out = s.process(&frame).unwrap();
        let p = out.processed().unwrap();
        assert!(p.magnitude > 300.0);
        assert_eq!(p.level, MotionLevel::High);
        assert_eq!(p.skip_interval, 1);
    }

    #[test]
    fn moderate_motion_resets_interval() {
        // shift of 15 over 126 components: sqrt(126) * 15 ~= 168, inside the band
        let mut s = sampler(vec![hands_at(0.0), hands_at(15.0)]);
        let frame = Frame::black(4, 4);
        s.process(&frame).unwrap();
        assert_eq!(s.skip_interval(), 2);
        let out = s.process(&frame).unwrap();
        assert_eq!(out.processed().unwrap().level, MotionLevel::Normal);
        assert_eq!(s.skip_interval(), 1);
    }

    #[test]
    fn extractor_failure_propagates() {
        let mut s = sampler(vec![]);
        let err = s.process(&Frame::black(4, 4)).unwrap_err();
        assert!(matches!(err, SamplerError::Extraction(_)));
        assert_eq!(s.frame_count(), 1);
        assert!(s.motion_window().is_empty());
        assert_eq!(s.skip_interval(), 1);
    }

    #[test]
    fn window_is_bounded_by_config() {
        let script = (0..12).map(|_| hands_at(0.0)).collect();
        let mut s = FrameSampler::new(
            ScriptedExtractor::new(script),
            &SamplerConfig {
                max_skip: 1,
                ..SamplerConfig::default()
            },
        );
        for _ in 0..12 {
            s.process(&Frame::black(2, 2)).unwrap();
        }
        assert_eq!(s.motion_window().len(), 5);
    }
}
