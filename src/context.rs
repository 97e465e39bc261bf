use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why an awaited operation was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Interrupted {
    #[error("operation cancelled")]
    Cancelled,
    #[error("verification deadline exceeded")]
    DeadlineExceeded,
    #[error("operation timed out after {0:?}")]
    TimedOut(Duration),
}

/// Cancellation signal plus optional absolute deadline shared by every check
/// of one verification call.
#[derive(Debug, Clone, Default)]
pub struct CheckContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CheckContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe `token`: cancelling it aborts the verification.
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: std::time::Instant) -> Self {
        self.deadline = Some(Instant::from_std(deadline));
        self
    }

    pub fn with_timeout(mut self, budget: Duration) -> Self {
        self.deadline = Some(Instant::now() + budget);
        self
    }

    /// Context cancelled together with `self`, but whose own cancellation does
    /// not propagate upwards.
    pub(crate) fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// `Some` once the context can no longer make progress.
    pub fn interrupted(&self) -> Option<Interrupted> {
        if self.token.is_cancelled() {
            Some(Interrupted::Cancelled)
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            Some(Interrupted::DeadlineExceeded)
        } else {
            None
        }
    }

    /// Drive `fut` until it completes, the context is cancelled, the shared
    /// deadline passes, or the per-operation `limit` expires.
    pub(crate) async fn run<F>(&self, limit: Option<Duration>, fut: F) -> Result<F::Output, Interrupted>
    where
        F: Future,
    {
        let op_deadline = limit.map(|d| (Instant::now() + d, Interrupted::TimedOut(d)));
        let shared = self.deadline.map(|d| (d, Interrupted::DeadlineExceeded));
        let until = match (shared, op_deadline) {
            (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
            (a, b) => a.or(b),
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(Interrupted::Cancelled),
            kind = expire(until) => Err(kind),
            out = fut => Ok(out),
        }
    }
}

async fn expire(until: Option<(Instant, Interrupted)>) -> Interrupted {
    match until {
        Some((at, kind)) => {
            tokio::time::sleep_until(at).await;
            kind
        }
        None => futures::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn completes_when_nothing_fires() {
        let ctx = CheckContext::new();
        assert_eq!(ctx.run(None, async { 7 }).await, Ok(7));
    }

    #[tokio::test]
    async fn operation_limit_times_out() {
        let ctx = CheckContext::new();
        let out = ctx
            .run(
                Some(Duration::from_millis(10)),
                tokio::time::sleep(Duration::from_secs(5)),
            )
            .await;
        assert_eq!(out, Err(Interrupted::TimedOut(Duration::from_millis(10))));
    }

    #[tokio::test]
    async fn shared_deadline_wins_over_longer_limit() {
        let ctx = CheckContext::new().with_timeout(Duration::from_millis(10));
        let out = ctx
            .run(
                Some(Duration::from_secs(5)),
                tokio::time::sleep(Duration::from_secs(5)),
            )
            .await;
        assert_eq!(out, Err(Interrupted::DeadlineExceeded));
    }

    #[tokio::test]
    async fn parent_cancellation_reaches_child() {
        let parent = CheckContext::new();
        let child = parent.child();
        parent.cancel();
        assert_eq!(child.interrupted(), Some(Interrupted::Cancelled));
        let out = child.run(None, futures::future::pending::<()>()).await;
        assert_eq!(out, Err(Interrupted::Cancelled));
    }

    #[tokio::test]
    async fn child_cancellation_stays_local() {
        let parent = CheckContext::new();
        let child = parent.child();
        child.cancel();
        assert!(!parent.is_cancelled());
    }
}
