use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::detection::domain::config_error::ConfigError;
use crate::detection::domain::face_detection::Detection;
use crate::detection::domain::post_processor::PostProcessor;
use crate::pipeline::frame_executor::{
    FrameCallback, FrameExecutor, FrameResult, FrameSource, PipelineError, RawFrame,
};
use crate::tracking::domain::face_tracker::FaceTracker;

const DEFAULT_CHANNEL_CAPACITY: usize = 8;
const DEFAULT_WORKERS: usize = 4;

/// `(sequence number, frame index, decode result)` sent back by workers.
type Decoded = (usize, usize, Result<Vec<Detection>, ConfigError>);

/// Decodes frames on a pool of worker threads and tracks them on the
/// calling thread.
///
/// Layout: `feeder → N decode workers → caller [reorder/track/callback]`
///
/// Frames are decoded out of order but re-sequenced before tracking, so
/// the tracker sees exactly the order the source produced.
///
/// At most `workers * channel_capacity` frames are pulled from the source
/// and not yet tracked, which also bounds the reorder buffer.
pub struct ThreadedFrameExecutor {
    workers: usize,
    channel_capacity: usize,
}

impl ThreadedFrameExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Frames that may be in flight between the source and the tracker.
    pub fn reorder_window(&self) -> usize {
        self.workers * self.channel_capacity
    }
}

impl Default for ThreadedFrameExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}

impl FrameExecutor for ThreadedFrameExecutor {
    fn execute(
        &self,
        frames: FrameSource,
        post_processor: Arc<PostProcessor>,
        tracker: &mut FaceTracker,
        on_frame: FrameCallback<'_>,
    ) -> Result<usize, PipelineError> {
        let cap = self.channel_capacity;
        let cancelled = Arc::new(AtomicBool::new(false));

        let (frame_tx, frame_rx) = crossbeam_channel::bounded::<(usize, RawFrame)>(cap);
        let (decoded_tx, decoded_rx) = crossbeam_channel::bounded::<Decoded>(cap);

        let window = self.reorder_window();
        let (credit_tx, credit_rx) = crossbeam_channel::bounded::<()>(window);
        for _ in 0..window {
            // Cannot fail: capacity is `window` and the receiver is alive.
            let _ = credit_tx.send(());
        }

        let feeder = spawn_feeder(frames, frame_tx, credit_rx, cancelled.clone());
        let workers: Vec<JoinHandle<()>> = (0..self.workers)
            .map(|_| {
                spawn_worker(
                    post_processor.clone(),
                    frame_rx.clone(),
                    decoded_tx.clone(),
                    cancelled.clone(),
                )
            })
            .collect();
        drop(frame_rx);
        drop(decoded_tx);

        let outcome = run_tracking_loop(&decoded_rx, &credit_tx, tracker, on_frame);

        cancelled.store(true, Ordering::Relaxed);
        drop(credit_tx);
        drop(decoded_rx);

        join_threads(feeder, workers, outcome)
    }
}

fn spawn_feeder(
    frames: FrameSource,
    frame_tx: crossbeam_channel::Sender<(usize, RawFrame)>,
    credit_rx: crossbeam_channel::Receiver<()>,
    cancelled: Arc<AtomicBool>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let mut frames = frames.enumerate();
        loop {
            // A credit is taken before the source is polled, so a stalled
            // frame holds back the whole window instead of piling up behind it.
            if credit_rx.recv().is_err() || cancelled.load(Ordering::Relaxed) {
                break;
            }
            let Some((seq, frame)) = frames.next() else {
                break;
            };
            if frame_tx.send((seq, frame)).is_err() {
                break;
            }
        }
    })
}

fn spawn_worker(
    post_processor: Arc<PostProcessor>,
    frame_rx: crossbeam_channel::Receiver<(usize, RawFrame)>,
    decoded_tx: crossbeam_channel::Sender<Decoded>,
    cancelled: Arc<AtomicBool>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for (seq, frame) in frame_rx {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            let result = post_processor.process(&frame.output, frame.width, frame.height);
            if decoded_tx.send((seq, frame.index, result)).is_err() {
                break;
            }
        }
    })
}

/// Receives decoded frames, restores source order and feeds the tracker.
fn run_tracking_loop(
    decoded_rx: &crossbeam_channel::Receiver<Decoded>,
    credit_tx: &crossbeam_channel::Sender<()>,
    tracker: &mut FaceTracker,
    on_frame: FrameCallback<'_>,
) -> Result<usize, PipelineError> {
    let mut pending: BTreeMap<usize, (usize, Result<Vec<Detection>, ConfigError>)> =
        BTreeMap::new();
    let mut next_seq = 0;
    let mut delivered = 0;

    for (seq, index, result) in decoded_rx {
        pending.insert(seq, (index, result));

        while let Some((index, result)) = pending.remove(&next_seq) {
            next_seq += 1;
            let detections =
                result.map_err(|source| PipelineError::Decode { index, source })?;
            let tracks = tracker.update(&detections);
            delivered += 1;
            if !on_frame(FrameResult {
                index,
                detections,
                tracks,
            }) {
                log::debug!("Frame callback stopped the run after {delivered} frames");
                return Ok(delivered);
            }
            // The feeder may have exited already
            let _ = credit_tx.send(());
        }
    }

    Ok(delivered)
}

/// Joins all threads; a panic is reported only if the run had no earlier error.
fn join_threads(
    feeder: JoinHandle<()>,
    workers: Vec<JoinHandle<()>>,
    outcome: Result<usize, PipelineError>,
) -> Result<usize, PipelineError> {
    let mut panicked = None;
    if feeder.join().is_err() {
        panicked = Some("Feeder");
    }
    for worker in workers {
        if worker.join().is_err() && panicked.is_none() {
            panicked = Some("Decode worker");
        }
    }

    match (outcome, panicked) {
        (Err(e), _) => Err(e),
        (Ok(_), Some(name)) => Err(PipelineError::ThreadPanicked(name)),
        (Ok(delivered), None) => Ok(delivered),
    }
}
