use signcap_sampler::{LandmarkExtractor, Pipeline, SampleOutcome, Translator};
use tokio::sync::mpsc::Receiver;
use tracing::{debug, info, warn};

use crate::decode::decode_square;
use crate::source::EncodedFrame;

/// Counters reported when the worker exits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    pub received: u64,
    pub processed: u64,
    pub translations: u64,
}

/// Sampler thread: the single consumer of the frame queue.
///
/// Runs until every sender is dropped, then flushes whatever history is
/// left. Per-frame failures are logged and the frame is dropped.
pub fn run<E: LandmarkExtractor, T: Translator>(
    mut rx: Receiver<EncodedFrame>,
    mut pipeline: Pipeline<E, T>,
    frame_size: u32,
) -> WorkerStats {
    let mut stats = WorkerStats::default();

    while let Some(encoded) = rx.blocking_recv() {
        stats.received += 1;
        if stats.received % 100 == 0 {
            debug!(
                received = stats.received,
                processed = stats.processed,
                skip_interval = pipeline.sampler().skip_interval(),
                "frames received"
            );
        }

        let frame = match decode_square(&encoded, frame_size) {
            Ok(f) => f,
            Err(e) => {
                warn!(error = %e, seq = encoded.seq, "failed to decode frame, skipping");
                continue;
            }
        };

        match pipeline.update(&frame) {
            Ok(SampleOutcome::Processed(_)) => stats.processed += 1,
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, seq = frame.seq, "frame update failed");
                continue;
            }
        }

        if pipeline.segment_full() {
            flush(&mut pipeline, &mut stats);
        }
    }

    info!(
        received = stats.received,
        processed = stats.processed,
        buffered = pipeline.history().len(),
        "frame queue closed, flushing remaining history"
    );
    flush(&mut pipeline, &mut stats);
    stats
}

fn flush<E: LandmarkExtractor, T: Translator>(
    pipeline: &mut Pipeline<E, T>,
    stats: &mut WorkerStats,
) {
    // Failures are logged by the pipeline; history stays for the next attempt.
    if let Ok(Some(text)) = pipeline.flush() {
        stats.translations += 1;
        println!("{text}");
    }
}
