//! HTTP transport abstraction trait.
//!
//! This module defines the `HttpTransport` trait that abstracts the HTTP client
//! used to talk to the document store. The client only needs four verbs that
//! take a path and a body and hand back the raw response text.

use crate::error::TransportError;
use async_trait::async_trait;
use std::fmt;

/// HTTP method of a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// Transport trait for document store communication.
///
/// Implementations return the response body text for any HTTP status. The
/// server puts its error envelopes into non-2xx bodies, so interpreting the
/// text is left to the envelope decoder. An `Err` means no response text was
/// obtained at all.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET request.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no response was obtained.
    async fn get(&mut self, path: &str) -> Result<String, TransportError>;

    /// Issue a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no response was obtained.
    async fn post(&mut self, path: &str, body: &str) -> Result<String, TransportError>;

    /// Issue a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no response was obtained.
    async fn put(&mut self, path: &str, body: &str) -> Result<String, TransportError>;

    /// Issue a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no response was obtained.
    async fn delete(&mut self, path: &str, body: &str) -> Result<String, TransportError>;
}
