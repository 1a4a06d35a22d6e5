//! Query statement handling and execution.
//!
//! This module provides the `Statement` type: query text plus bind variables
//! and paging preferences. Executing a statement submits one create-cursor
//! request and wraps the first batch in a [`Cursor`].

use crate::connection::Session;
use crate::error::QueryError;
use crate::query::cursor::Cursor;
use crate::transport::messages::{CreateCursorRequest, CursorResponse, ParseQueryRequest};
use crate::transport::{routes, HttpMethod};
use serde_json::{Map, Value};
use std::fmt;

/// Key of a bind variable.
///
/// Names are taken as given. Numeric keys address positional placeholders
/// and must be non-negative integers in canonical decimal form, so `"1"` is
/// accepted while `"01"`, `"-1"` and `"1.5"` are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindKey {
    /// Named placeholder
    Name(String),
    /// Positional placeholder, as decimal text
    Numeric(String),
}

impl BindKey {
    /// Numeric key from its textual form.
    pub fn numeric(text: impl Into<String>) -> Self {
        BindKey::Numeric(text.into())
    }

    /// Normalize into the string used in the bind-variable mapping.
    ///
    /// # Errors
    /// Returns `QueryError::InvalidBindParameter` for a non-canonical numeric key.
    pub fn into_normalized(self) -> Result<String, QueryError> {
        match self {
            BindKey::Name(name) => Ok(name),
            BindKey::Numeric(text) => match text.parse::<u64>() {
                Ok(n) if n.to_string() == text => Ok(text),
                _ => Err(QueryError::InvalidBindParameter(format!(
                    "numeric bind parameter '{}' is not a canonical non-negative integer",
                    text
                ))),
            },
        }
    }
}

impl fmt::Display for BindKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindKey::Name(name) => write!(f, "{}", name),
            BindKey::Numeric(text) => write!(f, "{}", text),
        }
    }
}

impl From<&str> for BindKey {
    fn from(value: &str) -> Self {
        BindKey::Name(value.to_string())
    }
}

impl From<String> for BindKey {
    fn from(value: String) -> Self {
        BindKey::Name(value)
    }
}

macro_rules! numeric_bind_key {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BindKey {
                fn from(value: $t) -> Self {
                    BindKey::Numeric(value.to_string())
                }
            }
        )*
    };
}

numeric_bind_key!(u8, u16, u32, u64, usize, i32, i64, f64);

impl TryFrom<Value> for BindKey {
    type Error = QueryError;

    /// Key supplied as a dynamic JSON value: strings name a placeholder,
    /// numbers address a positional one.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(name) => Ok(BindKey::Name(name)),
            Value::Number(n) => Ok(BindKey::Numeric(n.to_string())),
            other => Err(QueryError::InvalidBindParameter(format!(
                "unsupported bind parameter key {}",
                other
            ))),
        }
    }
}

/// Query statement for execution against the document store.
///
/// A statement can be executed any number of times; each execution is an
/// independent request that yields an independent cursor.
#[derive(Debug, Clone)]
pub struct Statement {
    /// Session used for round trips
    session: Session,
    /// Query text
    query: String,
    /// Bound variables by name
    bind_vars: Map<String, Value>,
    /// Whether the server should report the total result count
    count: bool,
    /// Maximum documents per round trip (server default if `None`)
    max_batch_size: Option<u64>,
}

impl Statement {
    /// Create a new statement.
    ///
    /// # Errors
    /// Returns `QueryError::InvalidStatementConfiguration` if the query text is empty.
    pub fn new(session: Session, query: impl Into<String>) -> Result<Self, QueryError> {
        let query = validate_query(query.into())?;

        Ok(Self {
            session,
            query,
            bind_vars: Map::new(),
            count: false,
            max_batch_size: None,
        })
    }

    /// Get the query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query text. Cursors already created are unaffected.
    ///
    /// # Errors
    /// Returns `QueryError::InvalidStatementConfiguration` if the query text is empty.
    pub fn set_query(&mut self, query: impl Into<String>) -> Result<(), QueryError> {
        self.query = validate_query(query.into())?;
        Ok(())
    }

    /// Get the bound variables.
    pub fn bind_variables(&self) -> &Map<String, Value> {
        &self.bind_vars
    }

    /// Bind one variable.
    ///
    /// # Errors
    /// Returns `QueryError::InvalidBindParameter` for a malformed numeric key
    /// and `QueryError::DuplicateBindParameter` if the key is already bound.
    pub fn bind(&mut self, key: impl Into<BindKey>, value: impl Into<Value>) -> Result<(), QueryError> {
        let key = key.into().into_normalized()?;

        if self.bind_vars.contains_key(&key) {
            return Err(QueryError::DuplicateBindParameter(key));
        }

        self.bind_vars.insert(key, value.into());
        Ok(())
    }

    /// Replace the whole bind-variable mapping.
    pub fn bind_all(&mut self, vars: Map<String, Value>) {
        self.bind_vars = vars;
    }

    /// Clear all bound variables.
    pub fn clear_bind_variables(&mut self) {
        self.bind_vars.clear();
    }

    /// Whether the server will report the total result count.
    pub fn count(&self) -> bool {
        self.count
    }

    /// Request the total result count from the server.
    pub fn set_count(&mut self, count: bool) {
        self.count = count;
    }

    /// Maximum documents per round trip, if set.
    pub fn max_batch_size(&self) -> Option<u64> {
        self.max_batch_size
    }

    /// Cap the number of documents per round trip.
    ///
    /// Non-positive values are ignored and leave the previous setting in place.
    pub fn set_max_batch_size(&mut self, size: i64) {
        match u64::try_from(size) {
            Ok(size) if size > 0 => self.max_batch_size = Some(size),
            _ => tracing::debug!(size, "ignoring non-positive batch size"),
        }
    }

    /// Execute the statement.
    ///
    /// Submits the query, bind variables and paging preferences in one
    /// request. A remote failure is reported through the session and yields
    /// `None`. An empty first batch that announces more is followed up
    /// before the cursor is returned.
    pub async fn execute(&self) -> Option<Cursor> {
        let request = CreateCursorRequest {
            query: &self.query,
            count: self.count,
            bind_vars: &self.bind_vars,
            max_results: self.max_batch_size,
        };

        let body = match serde_json::to_string(&request) {
            Ok(body) => body,
            Err(e) => return self.session.settle(Err(e.into())),
        };

        let response: CursorResponse = self
            .session
            .call(HttpMethod::Post, routes::CURSOR, &body)
            .await?;

        Some(Cursor::open(self.session.clone(), response).await)
    }

    /// Validate the query text on the server without executing it.
    ///
    /// Returns `false` (after reporting the error) if the server rejects it.
    pub async fn parse(&self) -> bool {
        let request = ParseQueryRequest { query: &self.query };

        let body = match serde_json::to_string(&request) {
            Ok(body) => body,
            Err(e) => return self.session.settle::<()>(Err(e.into())).is_some(),
        };

        self.session
            .call::<Value>(HttpMethod::Post, routes::QUERY, &body)
            .await
            .is_some()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[statement:{}]", self.query)
    }
}

fn validate_query(query: String) -> Result<String, QueryError> {
    if query.trim().is_empty() {
        return Err(QueryError::InvalidStatementConfiguration(
            "query text must not be empty".to_string(),
        ));
    }
    Ok(query)
}

/// Builder for creating `Statement` instances with a fluent API.
pub struct StatementBuilder {
    session: Session,
    query: Option<String>,
    count: bool,
    max_batch_size: Option<i64>,
}

impl StatementBuilder {
    /// Create a new statement builder.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            query: None,
            count: false,
            max_batch_size: None,
        }
    }

    /// Set the query text.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Request the total result count.
    pub fn count(mut self, count: bool) -> Self {
        self.count = count;
        self
    }

    /// Set the maximum batch size.
    pub fn max_batch_size(mut self, size: i64) -> Self {
        self.max_batch_size = Some(size);
        self
    }

    /// Build the statement.
    ///
    /// # Errors
    /// Returns `QueryError::InvalidStatementConfiguration` if no query text was set.
    pub fn build(self) -> Result<Statement, QueryError> {
        let query = self.query.ok_or_else(|| {
            QueryError::InvalidStatementConfiguration("query text must be set".to_string())
        })?;

        let mut stmt = Statement::new(self.session, query)?;
        stmt.set_count(self.count);
        if let Some(size) = self.max_batch_size {
            stmt.set_max_batch_size(size);
        }
        Ok(stmt)
    }
}
