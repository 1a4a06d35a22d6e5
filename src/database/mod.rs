//! Database and collection handles.
//!
//! - `handle` - `Database`, the entry point that owns the session
//! - `collection` - `Collection` and its document CRUD calls

pub mod collection;
pub mod handle;

pub use collection::{Collection, CollectionInfo};
pub use handle::Database;
