use planetsync_core::sync::{FetchError, StoreError};

/// Failure of a whole sync run or status query.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("A planet sync is already running")]
    AlreadyRunning,
}
