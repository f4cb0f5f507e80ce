use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{Result, VsmError};
use crate::vsm::{document::Document, tfidf::TfIdfEngine, Vsm};

/// Result of training one streamed document.
/// The cancellation outcome carries no document.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub document: Option<Document>,
    pub result: Result<()>,
}

impl TrainingOutcome {
    fn cancelled() -> Self {
        Self {
            document: None,
            result: Err(VsmError::Cancelled),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&VsmError> {
        self.result.as_ref().err()
    }

    pub fn is_cancelled(&self) -> bool {
        self.error().is_some_and(VsmError::is_cancelled)
    }
}

/// Handle on a running training stream
#[derive(Debug)]
pub struct TrainingStream {
    outcomes: mpsc::Receiver<TrainingOutcome>,
    worker: JoinHandle<u64>,
}

impl TrainingStream {
    /// Next outcome, `None` once the stream has finished
    pub async fn recv(&mut self) -> Option<TrainingOutcome> {
        self.outcomes.recv().await
    }

    /// Drain every remaining outcome and wait for the worker to exit
    pub async fn collect(mut self) -> Vec<TrainingOutcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.outcomes.recv().await {
            outcomes.push(outcome);
        }
        if let Err(e) = self.worker.await {
            warn!(error = %e, "training stream worker failed");
        }
        outcomes
    }

    /// Outcome receiver and worker handle.
    /// The worker resolves to the number of documents it trained.
    pub fn into_parts(self) -> (mpsc::Receiver<TrainingOutcome>, JoinHandle<u64>) {
        (self.outcomes, self.worker)
    }
}

impl<E> Vsm<E>
where
    E: TfIdfEngine + 'static,
{
    /// Train documents from `input` on a background task, one at a time
    /// and in input order, publishing one outcome per document.
    ///
    /// The stream ends when `input` is closed and drained, or when `cancel`
    /// fires. Cancellation is checked between documents; the document being
    /// trained always finishes first. A cancelled stream publishes a single
    /// [`VsmError::Cancelled`] outcome, then closes.
    ///
    /// Publishing waits for the consumer once the outcome channel is full,
    /// so every trained document yields an outcome before the cancellation
    /// one. Dropping the receiver stops the worker.
    ///
    /// Each document is trained on the blocking pool, since training waits
    /// on the corpus write lock while a search scan holds it.
    ///
    /// Must be called within a tokio runtime.
    pub fn train_stream(
        self: &Arc<Self>,
        cancel: CancellationToken,
        mut input: mpsc::Receiver<Document>,
    ) -> TrainingStream {
        let (tx, outcomes) = mpsc::channel(self.config().stream_capacity());
        let engine = Arc::clone(self);

        let worker = tokio::spawn(async move {
            debug!("training stream started");
            let mut trained = 0_u64;
            loop {
                let document = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        debug!(trained, "training stream cancelled");
                        let _ = tx.send(TrainingOutcome::cancelled()).await;
                        break;
                    }
                    next = input.recv() => match next {
                        Some(document) => document,
                        None => {
                            debug!(trained, "training stream input closed");
                            break;
                        }
                    },
                };

                let result = {
                    let engine = Arc::clone(&engine);
                    let document = document.clone();
                    match tokio::task::spawn_blocking(move || engine.train_one(document)).await {
                        Ok(result) => result,
                        Err(e) => {
                            warn!(error = %e, "training task failed, stopping training stream");
                            break;
                        }
                    }
                };
                if result.is_ok() {
                    trained += 1;
                }

                let outcome = TrainingOutcome { document: Some(document), result };
                if tx.send(outcome).await.is_err() {
                    debug!(trained, "outcome receiver dropped, stopping training stream");
                    break;
                }
            }
            trained
        });

        TrainingStream { outcomes, worker }
    }
}
