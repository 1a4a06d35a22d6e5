//! Connection configuration and session management.
//!
//! - `params` - Connection string parsing, builder and output options
//! - `session` - Shared transport handle used by every API object

pub mod params;
pub mod session;

pub use params::{ConnectionBuilder, ConnectionParams, OutputOptions};
pub use session::Session;
