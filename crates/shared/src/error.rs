use thiserror::Error;

/// Failure taxonomy for a detail fetch. Variants stay distinguishable so the
/// screen layer can pick the right user-facing treatment; cancellation is not
/// represented here because it is silent by contract.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Precondition failure: the caller had no usable identifier. Detected
    /// before any network attempt is made.
    #[error("customer or account number is not available")]
    MissingIdentifier,

    /// Transport-level failure reaching the server.
    #[error("failed to reach server: {0}")]
    Connectivity(String),

    /// The server reported that the entity does not exist (HTTP 404).
    #[error("no record found at {url}")]
    NotFound { url: String },

    /// Any other non-2xx response from the server.
    #[error("server returned status {status} for {url}")]
    Server { status: u16, url: String },

    /// A response body arrived but did not match the expected record shape.
    #[error("unexpected response payload: {0}")]
    Decode(String),
}

impl FetchError {
    /// True for failures worth retrying manually (transient transport or
    /// server-side conditions), false for local precondition and payload
    /// shape problems.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::Connectivity(_) | FetchError::Server { .. }
        )
    }
}
