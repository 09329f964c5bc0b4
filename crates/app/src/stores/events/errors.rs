//! Event store errors.

use thiserror::Error;

/// Errors that can occur when talking to the event store.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// An HTTP transport or body decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned a non-2xx response.
    #[error("unexpected response from event store (status {status}): {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,

        /// Response body, if readable.
        body: String,
    },

    /// No project is configured for the event store.
    #[error("event store is not configured")]
    NotConfigured,
}
