//! Cancellation and deadline context for a single request.
//!
//! A [`Context`] is cheap to clone and can be shared by any number of
//! concurrent calls. Cancellation is broadcast through a `watch` channel so
//! every clone observes it; deadlines are absolute tokio instants.

use crate::error::IngestError;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

#[derive(Clone, Debug)]
pub struct Context {
    cancel_rx: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Cancels every clone of the [`Context`] it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    cancel_tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // send_replace never fails, even with no receivers left
        self.cancel_tx.send_replace(true);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self {
            cancel_rx: None,
            deadline: None,
        }
    }

    pub fn with_cancel() -> (Self, CancelHandle) {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let ctx = Self {
            cancel_rx: Some(cancel_rx),
            deadline: None,
        };
        (ctx, CancelHandle { cancel_tx })
    }

    /// A context expiring after `timeout`. A timeout too large to represent
    /// as an instant means no deadline at all.
    pub fn with_timeout(timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => Self::with_deadline(deadline),
            None => Self::background(),
        }
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancel_rx: None,
            deadline: Some(deadline),
        }
    }

    /// Derives a context that also expires at `deadline`, keeping the
    /// earlier of the two deadlines and the parent's cancellation.
    pub fn and_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(existing) if existing <= deadline => existing,
            _ => deadline,
        };
        Self {
            cancel_rx: self.cancel_rx.clone(),
            deadline: Some(deadline),
        }
    }

    pub fn and_timeout(&self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.and_deadline(deadline),
            None => self.clone(),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the reason this context is done, or `None` while it is live.
    pub fn err(&self) -> Option<IngestError> {
        if let Some(rx) = &self.cancel_rx {
            if *rx.borrow() {
                return Some(IngestError::Cancelled);
            }
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(IngestError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves once the context is cancelled or its deadline passes, yielding
    /// the matching error. Never resolves for a background context.
    pub async fn done(&self) -> IngestError {
        let cancelled = async {
            match &self.cancel_rx {
                Some(rx) => {
                    let mut rx = rx.clone();
                    loop {
                        let is_set = *rx.borrow_and_update();
                        if is_set {
                            return;
                        }
                        if rx.changed().await.is_err() {
                            // Handle dropped without cancelling: never fires
                            std::future::pending::<()>().await;
                        }
                    }
                }
                None => std::future::pending::<()>().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = cancelled => IngestError::Cancelled,
            _ = expired => IngestError::DeadlineExceeded,
        }
    }
}
