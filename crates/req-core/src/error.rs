use thiserror::Error;

/// Result type alias for REQ operations
pub type Result<T> = std::result::Result<T, ReqError>;

/// Maximum number of characters of a response body kept in diagnostics
pub const BODY_SNIPPET_LEN: usize = 500;

/// Errors that can occur when talking to the Quebec Business Register
#[derive(Error, Debug)]
pub enum ReqError {
    /// The service answered with a status other than 200
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// First characters of the response body
        body: String,
    },

    /// The HTTP executor failed to produce a response at all
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The response body was not valid JSON
    #[error("failed to parse JSON response: {reason}\nResponse: {body}")]
    Parse {
        /// Parser failure reason
        reason: String,
        /// First characters of the raw response body
        body: String,
    },

    /// The response parsed, but the unwrapped payload was `null`
    #[error("payload was null")]
    NullPayload,

    /// The unwrapped payload was not a JSON object
    #[error("unexpected payload: expected a JSON object, got {0}")]
    UnexpectedPayload(&'static str),

    /// An element of `ListeEntreprises` could not be mapped to a record
    #[error("failed to map enterprise #{index}: {source}")]
    Mapping {
        /// Position of the element in the returned list
        index: usize,
        /// Underlying deserialization failure
        #[source]
        source: serde_json::Error,
    },

    /// A scalar field of the search payload had an unexpected type
    #[error("invalid search payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    /// The client was closed and its HTTP executor released
    #[error("client is closed")]
    Closed,

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl ReqError {
    /// Build a [`ReqError::Status`], keeping at most [`BODY_SNIPPET_LEN`] characters of `body`
    #[must_use]
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: snippet(body),
        }
    }

    /// Build a [`ReqError::Parse`], keeping at most [`BODY_SNIPPET_LEN`] characters of `body`
    #[must_use]
    pub fn parse(reason: impl std::fmt::Display, body: &str) -> Self {
        Self::Parse {
            reason: reason.to_string(),
            body: snippet(body),
        }
    }

    /// Returns true for transport-level failures (network errors and non-200 statuses)
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Transport(_))
    }

    /// Returns true if an enterprise record or the search payload failed typed mapping
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping { .. } | Self::InvalidPayload(_))
    }

    /// Returns the HTTP status code if the service answered with a non-200 status
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}
