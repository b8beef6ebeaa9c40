//! Visit-log retention worker.
//!
//! Handlers call [`RetentionHandle::request`] after inserting a visit. A single
//! worker drains a channel of capacity one and runs a retention pass per
//! message, so at most one pass runs and at most one more is queued. A request
//! arriving while a pass is already queued is dropped: the queued pass will
//! see the new row anyway.

use blog_core::retention::{enforce_retention, RetentionPolicy, RetentionStore};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// What happened to a retention request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionRequest {
    Queued,
    /// A pass was already pending.
    Coalesced,
    /// The worker has shut down.
    Stopped,
}

/// Cheap, cloneable sender side of the worker.
#[derive(Debug, Clone)]
pub struct RetentionHandle {
    tx: mpsc::Sender<()>,
}

impl RetentionHandle {
    /// Ask for a retention pass without waiting for it.
    pub fn request(&self) -> RetentionRequest {
        match self.tx.try_send(()) {
            Ok(()) => RetentionRequest::Queued,
            Err(mpsc::error::TrySendError::Full(())) => {
                tracing::debug!("Visit retention: pass already queued");
                RetentionRequest::Coalesced
            }
            Err(mpsc::error::TrySendError::Closed(())) => {
                tracing::warn!("Visit retention: worker stopped, request dropped");
                RetentionRequest::Stopped
            }
        }
    }
}

/// Create the worker channel and spawn the worker on the current runtime.
pub fn start<S>(
    store: S,
    policy: RetentionPolicy,
    cancel: CancellationToken,
) -> (RetentionHandle, JoinHandle<()>)
where
    S: RetentionStore + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    let join = tokio::spawn(run(store, policy, rx, cancel));
    (RetentionHandle { tx }, join)
}

/// Run retention passes until `cancel` fires or every handle is dropped.
///
/// Failures are logged and never propagated.
pub async fn run<S>(
    store: S,
    policy: RetentionPolicy,
    mut rx: mpsc::Receiver<()>,
    cancel: CancellationToken,
) where
    S: RetentionStore,
{
    tracing::info!(keep_count = policy.keep_count(), "Visit retention worker started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Visit retention worker stopping");
                break;
            }
            msg = rx.recv() => {
                if msg.is_none() {
                    tracing::info!("Visit retention channel closed");
                    break;
                }
                match enforce_retention(&store, policy).await {
                    Ok(outcome) if outcome.deleted > 0 => {
                        tracing::info!(
                            observed = outcome.observed,
                            deleted = outcome.deleted,
                            "Visit retention: pruned old rows"
                        );
                    }
                    Ok(_) => tracing::debug!("Visit retention: nothing to prune"),
                    Err(e) => {
                        tracing::error!(error = %e, "Visit retention: cleanup failed");
                    }
                }
            }
        }
    }
}
