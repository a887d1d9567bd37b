//! Per-call cancellation and deadline handling.
//!
//! Every client method that touches the network takes a [`Context`]. The context is
//! threaded through token acquisition, the HTTP round trip and the body read, so a
//! cancelled or expired context stops whichever of those is in flight.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::client::ClientError;

/// Cancellation handle and optional deadline for a single client call.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that expires `timeout` from now.
    ///
    /// A timeout too large to represent as an instant leaves the context without a deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => Self::with_deadline(deadline),
            None => Self::background(),
        }
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancellation: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// Wraps a caller-owned cancellation token.
    pub fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self {
            cancellation,
            deadline: None,
        }
    }

    /// A context cancelled whenever this one is, with the same deadline.
    ///
    /// Cancelling the child does not cancel the parent.
    pub fn child(&self) -> Self {
        Self {
            cancellation: self.cancellation.child_token(),
            deadline: self.deadline,
        }
    }

    /// Returns a copy whose deadline is the earlier of the current one and `timeout` from now.
    pub fn timeout(&self, timeout: Duration) -> Self {
        let deadline = match (self.deadline, Instant::now().checked_add(timeout)) {
            (Some(existing), Some(candidate)) => Some(existing.min(candidate)),
            (existing, candidate) => existing.or(candidate),
        };
        Self {
            cancellation: self.cancellation.child_token(),
            deadline,
        }
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drives `fut` to completion unless the context is cancelled or its deadline passes first.
    pub(crate) async fn run<F, T, E>(&self, fut: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, E>>,
        ClientError: From<E>,
    {
        if self.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let work = async { fut.await.map_err(ClientError::from) };

        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    _ = self.cancellation.cancelled() => Err(ClientError::Cancelled),
                    res = tokio::time::timeout_at(deadline, work) => {
                        res.unwrap_or(Err(ClientError::DeadlineExceeded))
                    }
                }
            }
            None => {
                tokio::select! {
                    biased;
                    _ = self.cancellation.cancelled() => Err(ClientError::Cancelled),
                    res = work => res,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn slow() -> Result<u8, ClientError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(1)
    }

    #[tokio::test]
    async fn background_context_completes_work() {
        let ctx = Context::background();
        let out = ctx.run(async { Ok::<_, ClientError>(7) }).await;
        assert_eq!(out.unwrap(), 7);
    }

    #[tokio::test]
    async fn deadline_interrupts_slow_work() {
        let ctx = Context::with_timeout(Duration::from_millis(20));
        let err = ctx.run(slow()).await.unwrap_err();
        assert!(matches!(err, ClientError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn cancelled_context_short_circuits() {
        let ctx = Context::background();
        ctx.cancel();
        let err = ctx.run(async { Ok::<_, ClientError>(1) }).await.unwrap_err();
        assert!(matches!(err, ClientError::Cancelled));
    }

    #[tokio::test]
    async fn cancelling_parent_cancels_child() {
        let parent = Context::background();
        let child = parent.child();
        let handle = tokio::spawn(async move { child.run(slow()).await });
        parent.cancel();
        let err = handle.await.unwrap().unwrap_err();
        assert!(matches!(err, ClientError::Cancelled));
    }

    #[tokio::test]
    async fn unrepresentable_timeout_means_no_deadline() {
        let ctx = Context::with_timeout(Duration::MAX);
        assert_eq!(ctx.deadline(), None);

        let out = ctx.run(async { Ok::<_, ClientError>(3) }).await;
        assert_eq!(out.unwrap(), 3);

        let bounded = Context::with_timeout(Duration::from_secs(5));
        assert_eq!(bounded.timeout(Duration::MAX).deadline(), bounded.deadline());
        assert_eq!(Context::background().timeout(Duration::MAX).deadline(), None);
    }

    #[test]
    fn timeout_keeps_earlier_deadline() {
        let outer = Context::with_timeout(Duration::from_millis(10));
        let inner = outer.timeout(Duration::from_secs(60));
        assert_eq!(inner.deadline(), outer.deadline());
    }
}
