//! Query execution and result iteration.
//!
//! The query module is organized into:
//! - `statement` - Query text, bind variables and paging preferences
//! - `cursor` - Forward-only iteration over a paginated result set
//!
//! # Example
//!
//! ```no_run
//! use docstore_client::{ConnectionParams, Database};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let params: ConnectionParams = "http://localhost:8529".parse()?;
//! let db = Database::connect(params)?;
//!
//! let mut stmt = db.create_statement("for u in users filter u.age > @min return u")?;
//! stmt.bind("min", 18)?;
//! stmt.set_max_batch_size(500);
//!
//! if let Some(mut cursor) = stmt.execute().await {
//!     while cursor.has_next()? {
//!         println!("{}", cursor.next().await?);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod cursor;
pub mod statement;

pub use cursor::{Cursor, CursorState};
pub use statement::{BindKey, Statement, StatementBuilder};
