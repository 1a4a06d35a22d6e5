//! Session shared by databases, statements, cursors and collections.
//!
//! A session owns the transport and the error reporter. Every handle created
//! from a database holds a clone of the same session, so all round trips go
//! through one transport lock and at most one request is in flight.

use crate::error::RemoteError;
use crate::report::ErrorReporter;
use crate::transport::envelope;
use crate::transport::{HttpMethod, HttpTransport};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle over the transport and the output channel.
#[derive(Clone)]
pub struct Session {
    transport: Arc<Mutex<dyn HttpTransport>>,
    reporter: Arc<dyn ErrorReporter>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("transport", &"<HttpTransport>")
            .field("reporter", &"<ErrorReporter>")
            .finish()
    }
}

impl Session {
    /// Create a session over a transport.
    pub fn new<T>(transport: T, reporter: Arc<dyn ErrorReporter>) -> Self
    where
        T: HttpTransport + 'static,
    {
        Self {
            transport: Arc::new(Mutex::new(transport)),
            reporter,
        }
    }

    /// Create a session over an already shared transport.
    pub fn from_shared(
        transport: Arc<Mutex<dyn HttpTransport>>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            transport,
            reporter,
        }
    }

    /// Perform one round trip and decode the response into `T`.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if no response was obtained, the response is an
    /// error envelope, or its payload does not have the shape of `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &str,
    ) -> Result<T, RemoteError> {
        tracing::debug!(%method, path, "request");

        let raw = {
            let mut transport = self.transport.lock().await;
            match method {
                HttpMethod::Get => transport.get(path).await,
                HttpMethod::Post => transport.post(path, body).await,
                HttpMethod::Put => transport.put(path, body).await,
                HttpMethod::Delete => transport.delete(path, body).await,
            }
        };

        envelope::decode_as(raw)
    }

    /// Turn a remote failure into an empty result, reporting it first.
    pub fn settle<T>(&self, result: Result<T, RemoteError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(
                    code = err.code(),
                    error_num = err.error_num(),
                    "{}",
                    err.message()
                );
                self.reporter.report(&err);
                None
            }
        }
    }

    /// Perform one round trip, reporting any remote failure.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &str,
    ) -> Option<T> {
        let result = self.request(method, path, body).await;
        self.settle(result)
    }
}
