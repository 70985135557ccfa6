//! Backend error type for the HTTP fragment source and verdict sink.

use thiserror::Error;

/// Failures talking to the review backend.
///
/// Every variant is terminal for its attempt: there is no automatic retry or
/// backoff. The session surfaces the failure and the reviewer retries via
/// the same UI action.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level or HTTP-status failure, including body decode errors.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The source answered 204: its queue has nothing to hand out right now.
    #[error("no fragment available from the source")]
    NoFragment,
}
