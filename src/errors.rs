use crate::models::Status;
use std::path::PathBuf;
use thiserror::Error;

/// Defines errors that can occur when interacting with the Dialogflow API.
///
/// Transport-level failures are surfaced as-is and never retried. An HTTP error
/// status is *not* an error at this level: Dialogflow reports failures through
/// the [`Status`] object embedded in the JSON body, and callers opt in to
/// treating it as an error with [`Status::check`].
///
/// # Example: Handling errors
///
/// ```ignore
/// match client.intents().await {
///     Err(DialogflowError::Connection(e)) => {
///         tracing::warn!("Dialogflow unreachable: {}", e);
///     }
///     Err(e) if e.is_serialization() => {
///         tracing::error!("Could not encode request: {}", e);
///     }
///     // ...
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DialogflowError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP connection error: {0}")]
    Connection(#[from] reqwest::Error),
    /// A payload or multipart field could not be encoded as JSON.
    #[error("JSON serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
    /// A multipart file value was neither an open file handle nor a path.
    #[error("Unsupported file source: {0}")]
    UnsupportedFileSource(String),
    /// A file supplied for multipart upload could not be opened or stat'ed.
    #[error("Filesystem error for {}: {source}", .path.display())]
    Filesystem {
        /// Path (or file name, for open handles) that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// A caller-supplied header, or a multipart part's content type, is not
    /// valid HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    /// The response body did not match the expected schema.
    ///
    /// Contains the decode error together with a short preview of the body.
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),
    /// The status object embedded in a response reported a failure.
    ///
    /// Only produced by [`Status::check`] and friends; the transport layer
    /// itself never inspects status objects.
    #[error("API error {}: {} ({})", .0.code, .0.error_type, .0.error_details.as_deref().unwrap_or("no details"))]
    Api(Status),
    /// Failed to build the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl DialogflowError {
    /// Returns `true` for failures that happened while encoding the request,
    /// including unsupported multipart file values.
    #[must_use]
    pub fn is_serialization(&self) -> bool {
        matches!(
            self,
            DialogflowError::Serialization(_) | DialogflowError::UnsupportedFileSource(_)
        )
    }

    /// Returns `true` if the request never completed on the network.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, DialogflowError::Connection(_))
    }

    /// Returns the embedded status object for [`DialogflowError::Api`].
    #[must_use]
    pub fn status(&self) -> Option<&Status> {
        match self {
            DialogflowError::Api(status) => Some(status),
            _ => None,
        }
    }
}
