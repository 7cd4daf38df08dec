use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub stream: StreamConfig,
    pub extractor: ExtractorConfig,
    pub translator: TranslatorConfig,
    #[serde(default)]
    pub sampler: SamplerConfig,
    #[serde(default)]
    pub recording: RecordingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    pub url: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Side length of the square frames handed to the extractor.
    #[serde(default = "default_frame_size")]
    pub frame_size: u32,
    /// Capacity of the queue between the frame source and the sampler thread.
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorConfig {
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorConfig {
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Adaptive sampling parameters.
///
/// The skip interval moves inside `[min_skip, max_skip]` based on the hand
/// motion magnitude compared against `motion_low` / `motion_high`.
#[derive(Debug, Clone, Deserialize)]
pub struct SamplerConfig {
    #[serde(default = "default_min_skip")]
    pub initial_skip: u32,
    #[serde(default = "default_min_skip")]
    pub min_skip: u32,
    #[serde(default = "default_max_skip")]
    pub max_skip: u32,
    #[serde(default = "default_motion_low")]
    pub motion_low: f64,
    #[serde(default = "default_motion_high")]
    pub motion_high: f64,
    /// Number of hand vectors kept for motion estimation.
    #[serde(default = "default_window_size")]
    pub window_size: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            initial_skip: default_min_skip(),
            min_skip: default_min_skip(),
            max_skip: default_max_skip(),
            motion_low: default_motion_low(),
            motion_high: default_motion_high(),
            window_size: default_window_size(),
        }
    }
}

impl SamplerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_skip == 0 {
            return Err(ConfigError::Invalid("sampler.min_skip must be at least 1".into()));
        }
        if self.min_skip > self.max_skip {
            return Err(ConfigError::Invalid(format!(
                "sampler.min_skip ({}) exceeds sampler.max_skip ({})",
                self.min_skip, self.max_skip
            )));
        }
        if !self.motion_low.is_finite() || !self.motion_high.is_finite() {
            return Err(ConfigError::Invalid("motion thresholds must be finite".into()));
        }
        if self.motion_low > self.motion_high {
            return Err(ConfigError::Invalid(format!(
                "sampler.motion_low ({}) exceeds sampler.motion_high ({})",
                self.motion_low, self.motion_high
            )));
        }
        if self.window_size == 0 {
            return Err(ConfigError::Invalid("sampler.window_size must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordingConfig {
    /// Whether the session starts out recording.
    #[serde(default = "default_recording_enabled")]
    pub enabled: bool,
    /// Flush history to the translator once this many frames are recorded.
    /// `None` keeps recording until the stream ends.
    #[serde(default)]
    pub segment_frames: Option<usize>,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            enabled: default_recording_enabled(),
            segment_frames: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFile(path.display().to_string(), e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.sampler.validate()?;
        if config.stream.frame_size == 0 {
            return Err(ConfigError::Invalid("stream.frame_size must be at least 1".into()));
        }
        if config.recording.segment_frames == Some(0) {
            return Err(ConfigError::Invalid(
                "recording.segment_frames must be at least 1".into(),
            ));
        }
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    ReadFile(String, std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// Default value functions
fn default_mode() -> String {
    "mjpeg".into()
}
fn default_fps() -> f64 {
    30.0
}
fn default_frame_size() -> u32 {
    256
}
fn default_queue_depth() -> usize {
    8
}
fn default_timeout_ms() -> u64 {
    2000
}
fn default_min_skip() -> u32 {
    1
}
fn default_max_skip() -> u32 {
    5
}
fn default_motion_low() -> f64 {
    100.0
}
fn default_motion_high() -> f64 {
    300.0
}
fn default_window_size() -> usize {
    5
}
fn default_recording_enabled() -> bool {
    true
}
fn default_log_level() -> String {
    "info".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [stream]
        url = "http://camera.local:8080/stream"

        [extractor]
        endpoint = "http://127.0.0.1:8500/extract"

        [translator]
        endpoint = "http://127.0.0.1:8501/translate"
    "#;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::parse(MINIMAL).unwrap();
        assert_eq!(config.stream.mode, "mjpeg");
        assert_eq!(config.stream.frame_size, 256);
        assert_eq!(config.sampler.min_skip, 1);
        assert_eq!(config.sampler.max_skip, 5);
        assert_eq!(config.sampler.motion_low, 100.0);
        assert_eq!(config.sampler.motion_high, 300.0);
        assert_eq!(config.sampler.window_size, 5);
        assert!(config.recording.enabled);
        assert!(config.recording.segment_frames.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn sampler_section_overrides() {
        let toml = format!(
            "{MINIMAL}\n[sampler]\nmax_skip = 8\nmotion_low = 50.0\nwindow_size = 3\n"
        );
        let config = Config::parse(&toml).unwrap();
        assert_eq!(config.sampler.max_skip, 8);
        assert_eq!(config.sampler.motion_low, 50.0);
        assert_eq!(config.sampler.motion_high, 300.0);
        assert_eq!(config.sampler.window_size, 3);
    }

    #[test]
    fn rejects_inverted_skip_bounds() {
        let toml = format!("{MINIMAL}\n[sampler]\nmin_skip = 4\nmax_skip = 2\n");
        assert!(matches!(Config::parse(&toml), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let cfg = SamplerConfig {
            motion_low: 400.0,
            ..SamplerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_window_and_zero_skip() {
        let cfg = SamplerConfig {
            window_size: 0,
            ..SamplerConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = SamplerConfig {
            min_skip: 0,
            ..SamplerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_segment_frames() {
        let toml = format!("{MINIMAL}\n[recording]\nsegment_frames = 0\n");
        assert!(Config::parse(&toml).is_err());
    }

    #[test]
    fn example_config_parses() {
        let config = Config::parse(include_str!("../../config.example.toml")).unwrap();
        assert_eq!(config.recording.segment_frames, Some(64));
        assert_eq!(config.translator.timeout_ms, 5000);
    }

    #[test]
    fn rejects_zero_frame_size() {
        let toml = MINIMAL.replace(
            "url = \"http://camera.local:8080/stream\"",
            "url = \"http://camera.local:8080/stream\"\nframe_size = 0",
        );
        assert!(matches!(Config::parse(&toml), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_required_section_is_parse_error() {
        let result = Config::parse("[stream]\nurl = \"x\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
