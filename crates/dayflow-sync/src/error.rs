//! Error taxonomy for remote store operations.

use thiserror::Error;

/// Every failure a store operation can surface. The planner never leaves
/// the cache half-applied: an `Err` means the pre-mutation state is intact.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The remote rejected the payload before persisting anything. The
    /// message is the server's own and is shown verbatim.
    #[error("validation rejected: {0}")]
    Validation(String),

    /// The targeted id no longer exists server-side. Callers should follow
    /// up with a `refresh()` to reconcile.
    #[error("event not found: {0}")]
    NotFound(String),

    /// Another mutation on the same id is still in flight; this one was
    /// rejected, not queued.
    #[error("a change to event {0} is already in flight")]
    Busy(String),

    /// Network failure, unexpected status, or a response body that violates
    /// the decode contract. Safe to retry manually.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl StoreError {
    /// User-facing message for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::NotFound(_) => {
                "This event no longer exists. Refresh to get the latest schedule.".to_string()
            }
            Self::Busy(_) => "That event already has a change in progress.".to_string(),
            Self::Transport(_) => "Something went wrong talking to the server. Please try again."
                .to_string(),
        }
    }
}
