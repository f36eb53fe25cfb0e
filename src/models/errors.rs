use thiserror::Error;

/// Failures from the persistence collaborator. All operations are
/// single-shot: the caller reports the message and leaves prior state
/// unchanged. No retries.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("failed to open store at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("store query failed: {0}")]
    Query(#[from] rusqlite::Error),
    #[error("stored amount '{0}' is not a valid decimal")]
    BadAmount(String),
    #[error("stored date '{0}' is not a valid date")]
    BadDate(String),
}

/// Malformed user input, rejected before it reaches the engine or the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InvalidInput {
    #[error("amount '{0}' must be a non-zero number")]
    Amount(String),
    #[error("date '{0}' must be YYYY-MM-DD")]
    Date(String),
    #[error("initial balance '{0}' must be a non-negative number")]
    Balance(String),
}
