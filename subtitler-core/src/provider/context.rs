// Provider Context
//
// Cancellation and deadline carried through every outbound provider call

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::ProviderError;

/// Provider execution context
///
/// Cloning shares the cancellation token. Derived contexts use child tokens,
/// so cancelling a parent cancels every context derived from it but not the
/// other way round.
#[derive(Debug, Clone, Default)]
pub struct ProviderContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl ProviderContext {
    /// Root context with no deadline
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Child context that expires after `timeout`, or at the parent's
    /// deadline if that comes first.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Child context that expires at `deadline`, or at the parent's
    /// deadline if that comes first.
    #[must_use]
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(parent) => parent.min(deadline),
            None => deadline,
        };
        Self {
            cancel: self.cancel.child_token(),
            deadline: Some(deadline),
        }
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub const fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Error if the context is already cancelled or past its deadline.
    pub fn check(&self) -> Result<(), ProviderError> {
        if self.cancel.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(ProviderError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Drive `fut` until it completes, the context is cancelled, or the
    /// deadline passes. The future is dropped in the latter two cases.
    pub async fn run<T, E, F>(&self, fut: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, E>>,
        ProviderError: From<E>,
    {
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(ProviderError::Cancelled),
            () = expired => Err(ProviderError::DeadlineExceeded),
            result = fut => result.map_err(ProviderError::from),
        }
    }
}
