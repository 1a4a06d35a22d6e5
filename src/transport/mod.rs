//! Transport layer for document store communication.
//!
//! This module provides the HTTP transport abstraction, a `reqwest`-backed
//! implementation, the JSON message types of each endpoint and the shared
//! decoder that tells success payloads from error envelopes.
//!
//! # Architecture
//!
//! The transport layer is organized into:
//! - `protocol` - Transport trait definition
//! - `http` - HTTP transport implementation
//! - `messages` - Request and response payloads
//! - `envelope` - Success/error envelope decoding
//! - `routes` - Endpoint paths
//!
//! # Example
//!
//! ```no_run
//! use docstore_client::connection::ConnectionParams;
//! use docstore_client::transport::{envelope, HttpClientTransport, HttpTransport};
//! use std::str::FromStr;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let params = ConnectionParams::from_str("http://root@localhost:8529")?;
//! let mut transport = HttpClientTransport::new(&params)?;
//!
//! let payload = envelope::decode(transport.get("/_api/collections").await)?;
//! println!("{}", payload);
//! # Ok(())
//! # }
//! ```

pub mod envelope;
pub mod http;
pub mod messages;
pub mod protocol;
pub mod routes;

// Re-export commonly used types
pub use http::HttpClientTransport;
pub use messages::CursorResponse;
pub use protocol::{HttpMethod, HttpTransport};
