//! Item store errors.

use thiserror::Error;

/// Errors that can occur when talking to the item store.
#[derive(Debug, Error)]
pub enum ItemStoreError {
    /// An HTTP transport or body decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The addressed record does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The store returned a non-2xx response.
    #[error("unexpected response from item store (status {status}): {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,

        /// Response body, if readable.
        body: String,
    },

    /// A list endpoint returned something other than a JSON array.
    #[error("expected a list of {kind} records")]
    NotAList {
        /// Record kind requested.
        kind: &'static str,
    },
}
