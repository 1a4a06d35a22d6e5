//! Error types for docstore-client.
//!
//! Errors are split by who is at fault. Local misuse of the API (bad bind
//! parameters, empty query text, reading a spent or disposed cursor) is a
//! `QueryError` and is returned immediately. Failures on the remote side are
//! `RemoteError` values: they are handed to the session's error reporter and
//! the failing operation yields an empty result instead of an `Err`.

use thiserror::Error;

/// Message reported when the transport obtained no response at all.
pub const EMPTY_RESPONSE_MESSAGE: &str = "Unknown error. Request result is empty";

/// Top-level error type encompassing all possible errors.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection setup errors
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Local query or cursor misuse
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Transport errors
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Remote failures
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Errors related to connection configuration.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// Invalid connection parameters
    #[error("Invalid connection parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    /// Connection string parsing error
    #[error("Failed to parse connection string: {0}")]
    ParseError(String),

    /// The HTTP client could not be constructed
    #[error("Failed to set up transport: {0}")]
    TransportSetup(#[from] TransportError),
}

/// Errors caused by misusing statements or cursors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Bind key of an unsupported kind or a non-canonical numeric key
    #[error("Invalid bind parameter declaration: {0}")]
    InvalidBindParameter(String),

    /// Bind key already bound on this statement
    #[error("Redeclaration of bind parameter '{0}'")]
    DuplicateBindParameter(String),

    /// `next()` called with no document left
    #[error("No more results")]
    CursorExhausted,

    /// Cursor used after `dispose()`
    #[error("Cursor has been disposed")]
    CursorDisposed,

    /// Missing or empty query text
    #[error("Invalid statement configuration: {0}")]
    InvalidStatementConfiguration(String),
}

/// Errors raised when the transport obtained no response.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request could not be sent or no response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The response body could not be read
    #[error("Failed to read response body: {0}")]
    BodyUnreadable(String),

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// A remote failure, as reported to the caller's output channel.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// No response text was obtained
    #[error("Unknown error. Request result is empty ({0})")]
    TransportUnavailable(#[source] TransportError),

    /// The server answered with an error envelope
    #[error("[{code}:{error_num}] {message}")]
    Server {
        code: i64,
        error_num: i64,
        message: String,
    },

    /// The response was not the JSON shape expected for the endpoint
    #[error("Invalid server response: {0}")]
    MalformedResponse(String),
}

impl RemoteError {
    /// HTTP-like status code carried by the envelope (0 if none was received).
    pub fn code(&self) -> i64 {
        match self {
            RemoteError::Server { code, .. } => *code,
            _ => 0,
        }
    }

    /// Domain-specific error number (0 if none was received).
    pub fn error_num(&self) -> i64 {
        match self {
            RemoteError::Server { error_num, .. } => *error_num,
            _ => 0,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        match self {
            RemoteError::TransportUnavailable(_) => EMPTY_RESPONSE_MESSAGE.to_string(),
            RemoteError::Server { message, .. } => message.clone(),
            RemoteError::MalformedResponse(detail) => format!("Invalid server response: {detail}"),
        }
    }
}

impl From<TransportError> for RemoteError {
    fn from(err: TransportError) -> Self {
        RemoteError::TransportUnavailable(err)
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::MalformedResponse(err.to_string())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::BodyUnreadable(err.to_string())
        } else if err.is_builder() {
            TransportError::ClientBuild(err.to_string())
        } else {
            TransportError::RequestFailed(err.to_string())
        }
    }
}
