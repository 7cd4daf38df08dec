use signcap_common::config::SamplerConfig;

/// Which band of the motion policy a magnitude fell into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionLevel {
    /// Below the low threshold: sample less often.
    Stable,
    /// Inside the inclusive band between the thresholds: back to full rate.
    Normal,
    /// Above the high threshold: sample more often.
    High,
}

/// Adaptive skip-interval controller.
///
/// A frame is processed when `counter % skip_interval == 0`. After each
/// processed frame the interval is nudged by the measured hand motion:
///
/// - `magnitude < motion_low`  -> `min(skip + 1, max_skip)`
/// - `magnitude > motion_high` -> `max(skip - 1, min_skip)`
/// - otherwise                 -> `min_skip`
///
/// The interval never leaves `[min_skip, max_skip]`.
#[derive(Debug, Clone)]
pub struct RateController {
    skip_interval: u32,
    min_skip: u32,
    max_skip: u32,
    motion_low: f64,
    motion_high: f64,
}

impl RateController {
    pub fn new(config: &SamplerConfig) -> Self {
        let min_skip = config.min_skip.max(1);
        let max_skip = config.max_skip.max(min_skip);
        Self {
            skip_interval: config.initial_skip.clamp(min_skip, max_skip),
            min_skip,
            max_skip,
            motion_low: config.motion_low,
            motion_high: config.motion_high,
        }
    }

    pub fn skip_interval(&self) -> u32 {
        self.skip_interval
    }

    pub fn should_process(&self, counter: u64) -> bool {
        counter % u64::from(self.skip_interval) == 0
    }

    /// Apply one motion sample. NaN compares false on both sides and lands
    /// in the normal band.
    pub fn apply(&mut self, magnitude: f64) -> MotionLevel {
        if magnitude < self.motion_low {
            self.skip_interval = (self.skip_interval + 1).min(self.max_skip);
            MotionLevel::Stable
        } else if magnitude > self.motion_high {
            self.skip_interval = self.skip_interval.saturating_sub(1).max(self.min_skip);
            MotionLevel::High
        } else {
            self.skip_interval = self.min_skip;
            MotionLevel::Normal
        }
    }
}
