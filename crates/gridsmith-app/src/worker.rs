//! Background generation on a dedicated thread.
//!
//! A [`Worker`] owns one thread, spawned on first use, that receives
//! requests over a channel and answers each with a single message. Batches
//! are returned whole; there is no streaming and no cancellation.

use std::{
    fmt,
    sync::{OnceLock, mpsc},
    thread,
};

use gridsmith_core::{PuzzleKind, PuzzleSize};
use gridsmith_generator::{PuzzleGenerator, PuzzleRecord, PuzzleSeed};
use serde::{Deserialize, Serialize};

/// A request that can be offloaded to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkRequest {
    /// Generate a batch of puzzles of one kind and size.
    Generate {
        /// Puzzle kind.
        kind: PuzzleKind,
        /// Puzzle size. Ignored for sudoku.
        size: PuzzleSize,
        /// Number of puzzles.
        count: usize,
        /// Batch seed. A random seed is drawn when absent.
        seed: Option<PuzzleSeed>,
    },
}

/// A response produced by the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkResponse {
    /// The generated batch, in request order.
    Batch(Vec<PuzzleRecord>),
}

/// Errors that can occur while scheduling or receiving background work.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display, derive_more::Error,
)]
pub enum WorkError {
    /// The worker thread could not be started.
    #[display("worker thread could not be spawned")]
    SpawnFailed,
    /// The background channel was disconnected unexpectedly.
    #[display("worker disconnected")]
    WorkerDisconnected,
}

impl WorkRequest {
    /// Handles a request and produces the corresponding response.
    #[must_use]
    pub fn handle(self, generator: &PuzzleGenerator) -> WorkResponse {
        match self {
            WorkRequest::Generate {
                kind,
                size,
                count,
                seed,
            } => {
                let seed = seed.unwrap_or_else(PuzzleSeed::random);
                WorkResponse::Batch(generator.generate_with_seed(kind, size, count, seed))
            }
        }
    }
}

struct WorkRequestEnvelope {
    request: WorkRequest,
    response_tx: mpsc::Sender<WorkResponse>,
}

/// A handle for polling background work completion.
pub struct WorkHandle {
    receiver: mpsc::Receiver<WorkResponse>,
}

impl fmt::Debug for WorkHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkHandle").finish()
    }
}

impl WorkHandle {
    /// Attempts to poll for a completed response.
    ///
    /// # Errors
    ///
    /// Returns [`WorkError::WorkerDisconnected`] if the worker went away
    /// before answering.
    pub fn poll(&mut self) -> Result<Option<WorkResponse>, WorkError> {
        use mpsc::TryRecvError;

        match self.receiver.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkError::WorkerDisconnected),
        }
    }

    /// Blocks until the response arrives.
    ///
    /// # Errors
    ///
    /// Returns [`WorkError::WorkerDisconnected`] if the worker went away
    /// before answering.
    pub fn wait(self) -> Result<WorkResponse, WorkError> {
        self.receiver
            .recv()
            .map_err(|_| WorkError::WorkerDisconnected)
    }
}

/// A lazily started generation thread.
pub struct Worker {
    generator: PuzzleGenerator,
    sender: OnceLock<mpsc::Sender<WorkRequestEnvelope>>,
}

impl fmt::Debug for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("generator", &self.generator)
            .field("started", &self.sender.get().is_some())
            .finish()
    }
}

impl Default for Worker {
    fn default() -> Self {
        Self::new(PuzzleGenerator::new())
    }
}

impl Worker {
    /// Creates a worker that generates with `generator`. No thread is
    /// started until the first request.
    #[must_use]
    pub fn new(generator: PuzzleGenerator) -> Self {
        Self {
            generator,
            sender: OnceLock::new(),
        }
    }

    fn sender(&self) -> Result<&mpsc::Sender<WorkRequestEnvelope>, WorkError> {
        if let Some(sender) = self.sender.get() {
            return Ok(sender);
        }
        let (tx, rx) = mpsc::channel::<WorkRequestEnvelope>();
        let generator = self.generator.clone();
        thread::Builder::new()
            .name("gridsmith-worker".to_owned())
            .spawn(move || {
                while let Ok(envelope) = rx.recv() {
                    let response = envelope.request.handle(&generator);
                    let _ = envelope.response_tx.send(response);
                }
                log::debug!("worker channel closed, exiting");
            })
            .map_err(|_| WorkError::SpawnFailed)?;
        // A racing caller may have installed its own sender first; the loser's
        // thread exits once its channel drops.
        Ok(self.sender.get_or_init(|| tx))
    }

    /// Starts the worker thread without sending a request.
    ///
    /// # Errors
    ///
    /// Returns [`WorkError::SpawnFailed`] if the thread cannot be started.
    pub fn warm_up(&self) -> Result<(), WorkError> {
        self.sender().map(|_| ())
    }

    /// Enqueues a request and returns a handle for polling completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker cannot be started or has stopped.
    pub fn enqueue(&self, request: WorkRequest) -> Result<WorkHandle, WorkError> {
        let (response_tx, response_rx) = mpsc::channel();
        self.sender()?
            .send(WorkRequestEnvelope {
                request,
                response_tx,
            })
            .map_err(|_| WorkError::WorkerDisconnected)?;

        Ok(WorkHandle {
            receiver: response_rx,
        })
    }

    /// Generates a batch on the worker thread and waits for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker cannot be started or has stopped.
    pub fn generate(
        &self,
        kind: PuzzleKind,
        size: PuzzleSize,
        count: usize,
        seed: Option<PuzzleSeed>,
    ) -> Result<Vec<PuzzleRecord>, WorkError> {
        log::debug!("requesting {count} {kind} puzzle(s) of size {size} from worker");
        let handle = self.enqueue(WorkRequest::Generate {
            kind,
            size,
            count,
            seed,
        })?;
        match handle.wait()? {
            WorkResponse::Batch(batch) => Ok(batch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_matches_direct_generation() {
        let worker = Worker::default();
        let seed = PuzzleSeed::new([8; 32]);
        let batch = worker
            .generate(PuzzleKind::Nonogram, PuzzleSize::Small, 3, Some(seed))
            .unwrap();
        let direct =
            PuzzleGenerator::new().generate_with_seed(PuzzleKind::Nonogram, PuzzleSize::Small, 3, seed);
        assert_eq!(batch, direct);
    }

    #[test]
    fn test_poll_until_ready() {
        let worker = Worker::default();
        worker.warm_up().unwrap();
        let mut handle = worker
            .enqueue(WorkRequest::Generate {
                kind: PuzzleKind::Mosaic,
                size: PuzzleSize::Small,
                count: 0,
                seed: None,
            })
            .unwrap();
        let response = loop {
            if let Some(response) = handle.poll().unwrap() {
                break response;
            }
            thread::yield_now();
        };
        assert_eq!(response, WorkResponse::Batch(vec![]));
    }

    #[test]
    fn test_request_round_trips_through_json() {
        let request = WorkRequest::Generate {
            kind: PuzzleKind::Nurikabe,
            size: PuzzleSize::Medium,
            count: 5,
            seed: Some(PuzzleSeed::new([1; 32])),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(serde_json::from_str::<WorkRequest>(&json).unwrap(), request);
    }
}
