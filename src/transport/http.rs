//! HTTP transport implementation backed by `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, Method};

use crate::connection::params::ConnectionParams;
use crate::error::TransportError;

use super::protocol::{HttpMethod, HttpTransport};

/// HTTP transport implementation.
///
/// Sends JSON bodies to `base_url + path` and returns the response text for
/// every status code.
pub struct HttpClientTransport {
    client: Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl HttpClientTransport {
    /// Create a transport for the given connection parameters.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::ClientBuild` if the HTTP client cannot be built.
    pub fn new(params: &ConnectionParams) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(params.request_timeout)
            .connect_timeout(params.connect_timeout)
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        let credentials = params
            .username
            .as_ref()
            .map(|user| (user.clone(), params.password().to_string()));

        Ok(Self {
            client,
            base_url: params.base_url(),
            credentials,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&str>,
    ) -> Result<String, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        let method = match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        };

        let mut request = self.client.request(method, url);
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, Some(password));
        }
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let response = request.send().await?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl HttpTransport for HttpClientTransport {
    async fn get(&mut self, path: &str) -> Result<String, TransportError> {
        self.send(HttpMethod::Get, path, None).await
    }

    async fn post(&mut self, path: &str, body: &str) -> Result<String, TransportError> {
        self.send(HttpMethod::Post, path, Some(body)).await
    }

    async fn put(&mut self, path: &str, body: &str) -> Result<String, TransportError> {
        self.send(HttpMethod::Put, path, Some(body)).await
    }

    async fn delete(&mut self, path: &str, body: &str) -> Result<String, TransportError> {
        self.send(HttpMethod::Delete, path, Some(body)).await
    }
}
