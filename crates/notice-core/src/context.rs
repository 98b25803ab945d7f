//! Per-request cancellation and deadline handle.
//!
//! Every store operation receives a [`RequestContext`] from its caller and
//! runs the storage call through [`RequestContext::run`], so a cancelled or
//! timed-out request drops the in-flight query instead of leaking it.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::AppError;
use crate::result::AppResult;

/// Cancellation token plus optional deadline, threaded from caller to storage.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a token owned by the caller.
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            cancel: token,
            deadline: None,
        }
    }

    /// A context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().deadline_at(Instant::now() + timeout)
    }

    /// A context that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self::new().deadline_at(deadline)
    }

    /// Replace the deadline, keeping the token.
    pub fn deadline_at(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Derive a context whose token is cancelled together with this one.
    pub fn child(&self) -> Self {
        Self {
            cancel: self.cancel.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancel this context and all of its children.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// The deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drive a storage future, aborting it on cancellation or deadline.
    pub async fn run<T, F>(&self, operation: &str, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        if self.is_cancelled() {
            return Err(AppError::database(format!("{operation}: request cancelled")));
        }
        if self.deadline.is_some_and(|d| d <= Instant::now()) {
            return Err(AppError::database(format!(
                "{operation}: request deadline exceeded"
            )));
        }

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!(operation, "Storage call cancelled");
                Err(AppError::database(format!("{operation}: request cancelled")))
            }
            _ = expired => {
                tracing::debug!(operation, "Storage call deadline exceeded");
                Err(AppError::database(format!("{operation}: request deadline exceeded")))
            }
            result = fut => result,
        }
    }
}
