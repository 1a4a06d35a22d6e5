//! Common test utilities for docstore-client integration tests.
//!
//! Two kinds of helpers live here:
//!
//! - A scripted in-memory transport that records every request and answers
//!   with canned response texts, plus a reporter that collects what the
//!   client reports. Tests built on these run everywhere.
//! - Configuration and availability helpers for the live-server tests in
//!   `live_server_tests.rs`.
//!
//! # Live server
//!
//! | Default Constant   | Environment Variable | Default Value |
//! |--------------------|----------------------|---------------|
//! | `DEFAULT_HOST`     | `DOCSTORE_HOST`      | "localhost"   |
//! | `DEFAULT_PORT`     | `DOCSTORE_PORT`      | 8529          |
//! | `DEFAULT_USER`     | `DOCSTORE_USER`      | "root"        |
//! | `DEFAULT_PASSWORD` | `DOCSTORE_PASSWORD`  | ""            |
//!
//! ```bash
//! DOCSTORE_HOST=myhost cargo test --test live_server_tests
//! ```

#![allow(dead_code)]

use async_trait::async_trait;
use docstore_client::transport::HttpMethod;
use docstore_client::{ErrorReporter, HttpTransport, RemoteError, TransportError};
use std::collections::VecDeque;
use std::env;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Scripted Transport
// ============================================================================

/// One request as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: String,
}

#[derive(Default)]
struct Script {
    responses: VecDeque<Result<String, TransportError>>,
    requests: Vec<RecordedRequest>,
}

/// Transport answering from a queue of canned responses.
///
/// Clones share the same script, so a test can keep one clone to inspect
/// the recorded requests after handing the other to a `Database`.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response text.
    pub fn respond(&self, body: &str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .responses
            .push_back(Ok(body.to_string()));
        self
    }

    /// Queue a request that obtains no response.
    pub fn fail(&self, error: TransportError) -> &Self {
        self.script.lock().unwrap().responses.push_back(Err(error));
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    /// Number of requests received with the given method.
    pub fn count(&self, method: HttpMethod) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    /// Number of canned responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().responses.len()
    }

    fn answer(&self, method: HttpMethod, path: &str, body: &str) -> Result<String, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.requests.push(RecordedRequest {
            method,
            path: path.to_string(),
            body: body.to_string(),
        });
        script.responses.pop_front().unwrap_or_else(|| {
            Err(TransportError::RequestFailed(format!(
                "unscripted request {} {}",
                method, path
            )))
        })
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&mut self, path: &str) -> Result<String, TransportError> {
        self.answer(HttpMethod::Get, path, "")
    }

    async fn post(&mut self, path: &str, body: &str) -> Result<String, TransportError> {
        self.answer(HttpMethod::Post, path, body)
    }

    async fn put(&mut self, path: &str, body: &str) -> Result<String, TransportError> {
        self.answer(HttpMethod::Put, path, body)
    }

    async fn delete(&mut self, path: &str, body: &str) -> Result<String, TransportError> {
        self.answer(HttpMethod::Delete, path, body)
    }
}

/// Reporter that keeps `(code, errorNum, message)` of every reported error.
#[derive(Default)]
pub struct CollectingReporter {
    reported: Mutex<Vec<(i64, i64, String)>>,
}

impl CollectingReporter {
    pub fn reported(&self) -> Vec<(i64, i64, String)> {
        self.reported.lock().unwrap().clone()
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, error: &RemoteError) {
        self.reported
            .lock()
            .unwrap()
            .push((error.code(), error.error_num(), error.message()));
    }
}

/// A database over a fresh scripted transport and collecting reporter.
pub fn scripted_database() -> (
    docstore_client::Database,
    ScriptedTransport,
    Arc<CollectingReporter>,
) {
    let transport = ScriptedTransport::new();
    let reporter = Arc::new(CollectingReporter::default());
    let db = docstore_client::Database::with_transport(transport.clone(), reporter.clone());
    (db, transport, reporter)
}

// ============================================================================
// Live Server Configuration
// ============================================================================

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8529;
pub const DEFAULT_USER: &str = "root";
pub const DEFAULT_PASSWORD: &str = "";

const ENV_HOST: &str = "DOCSTORE_HOST";
const ENV_PORT: &str = "DOCSTORE_PORT";
const ENV_USER: &str = "DOCSTORE_USER";
const ENV_PASSWORD: &str = "DOCSTORE_PASSWORD";

pub fn get_host() -> String {
    env::var(ENV_HOST).unwrap_or_else(|_| DEFAULT_HOST.to_string())
}

/// Falls back to the default on an unparsable value.
pub fn get_port() -> u16 {
    env::var(ENV_PORT)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub fn get_user() -> String {
    env::var(ENV_USER).unwrap_or_else(|_| DEFAULT_USER.to_string())
}

pub fn get_password() -> String {
    env::var(ENV_PASSWORD).unwrap_or_else(|_| DEFAULT_PASSWORD.to_string())
}

/// Connection string for the configured live server.
pub fn get_test_connection_string() -> String {
    format!(
        "http://{}:{}@{}:{}?timeout=30",
        urlencoding::encode(&get_user()),
        urlencoding::encode(&get_password()),
        get_host(),
        get_port()
    )
}

/// Check whether a TCP connection to the configured server succeeds.
pub fn is_server_available() -> bool {
    let addr = format!("{}:{}", get_host(), get_port());

    let socket_addrs: Vec<_> = match addr.to_socket_addrs() {
        Ok(addrs) => addrs.collect(),
        Err(_) => return false,
    };

    socket_addrs
        .iter()
        .any(|a| TcpStream::connect_timeout(a, Duration::from_secs(2)).is_ok())
}

/// Skip a test if no server is reachable.
#[macro_export]
macro_rules! skip_if_no_server {
    () => {
        if !$crate::common::is_server_available() {
            eprintln!(
                "Skipping test: document store not available at {}:{}",
                $crate::common::get_host(),
                $crate::common::get_port()
            );
            return;
        }
    };
}

