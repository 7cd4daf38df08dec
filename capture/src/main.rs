mod decode;
mod remote;
mod source;
mod worker;

use remote::{HttpExtractor, HttpTranslator};
use signcap_common::config::Config;
use signcap_common::frame::FrameError;
use signcap_sampler::Pipeline;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("HTTP connection failed: {0}")]
    HttpConnect(reqwest::Error),
    #[error("HTTP stream error: {0}")]
    HttpStream(reqwest::Error),
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    #[error("failed to decode frame: {0}")]
    Decode(String),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("sampler queue closed")]
    QueueClosed,
}

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    let config = match Config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {e}", config_path.display());
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.parse().unwrap_or_default()),
        )
        .init();

    info!(
        url = config.stream.url,
        mode = config.stream.mode,
        frame_size = config.stream.frame_size,
        extractor = config.extractor.endpoint,
        translator = config.translator.endpoint,
        max_skip = config.sampler.max_skip,
        motion_low = config.sampler.motion_low,
        motion_high = config.sampler.motion_high,
        recording = config.recording.enabled,
        "starting signcap capture"
    );

    let (tx, rx) = mpsc::channel(config.stream.queue_depth.max(1));

    // The blocking HTTP clients must be built off the async runtime threads.
    let worker_config = config.clone();
    let worker = tokio::task::spawn_blocking(move || -> Result<worker::WorkerStats, CaptureError> {
        let extractor = HttpExtractor::new(&worker_config.extractor)?;
        let translator = HttpTranslator::new(&worker_config.translator)?;
        let pipeline = Pipeline::new(
            extractor,
            translator,
            &worker_config.sampler,
            &worker_config.recording,
        );
        Ok(worker::run(rx, pipeline, worker_config.stream.frame_size))
    });

    let source = async {
        match config.stream.mode.as_str() {
            "mjpeg" => source::run_mjpeg_source(&config.stream.url, tx).await,
            "polling" => {
                let interval = Duration::from_secs_f64(1.0 / config.stream.fps.max(0.1));
                source::run_polling_source(&config.stream.url, interval, tx).await
            }
            other => {
                error!(mode = other, "unknown stream mode, expected 'mjpeg' or 'polling'");
                std::process::exit(1);
            }
        }
    };

    // Dropping the source future drops the sender, which ends the worker loop.
    tokio::select! {
        result = source => {
            if let Err(e) = result {
                error!(error = %e, "frame source stopped");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down");
        }
    }

    match worker.await {
        Ok(Ok(stats)) => info!(
            received = stats.received,
            processed = stats.processed,
            translations = stats.translations,
            "capture finished"
        ),
        Ok(Err(e)) => {
            error!(error = %e, "sampler worker failed to start");
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "sampler worker panicked");
            std::process::exit(1);
        }
    }
}
