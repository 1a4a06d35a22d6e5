//! Forward-only cursor over a paginated result set.
//!
//! A cursor buffers one batch at a time. Crossing a batch boundary issues a
//! single continuation request while the server reports further batches.

use crate::connection::Session;
use crate::error::QueryError;
use crate::transport::messages::CursorResponse;
use crate::transport::{routes, HttpMethod};
use serde_json::Value;
use std::fmt;

/// Lifecycle state of a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Documents may still be read
    Active,
    /// Every document has been read, or a refetch failed
    Exhausted,
    /// Released explicitly through `dispose()`
    Disposed,
}

/// Client-side handle over a possibly multi-batch server result set.
pub struct Cursor {
    session: Session,
    /// Server cursor id, present while the server may hold unread batches
    id: Option<String>,
    /// Locally buffered batch
    batch: Vec<Value>,
    /// Index of the next document in `batch`
    position: usize,
    /// Whether the server reported further batches
    has_more: bool,
    /// Total result count, if requested
    count: Option<u64>,
    state: CursorState,
}

impl Cursor {
    /// Seed a cursor from the first-batch response of a statement execution.
    ///
    /// The server releases a cursor once it delivered the last batch, so the
    /// id is only kept while more batches are announced.
    pub(crate) fn from_response(session: Session, response: CursorResponse) -> Self {
        let has_more = response.has_more && response.id.is_some();
        let mut cursor = Self {
            session,
            id: if has_more { response.id } else { None },
            batch: response.result,
            position: 0,
            has_more,
            count: response.count,
            state: CursorState::Active,
        };

        if cursor.batch.is_empty() && !cursor.can_fetch() {
            cursor.state = CursorState::Exhausted;
        }

        cursor
    }

    /// Seed a cursor and make sure it buffers a document unless the result
    /// has ended or a fetch failed.
    pub(crate) async fn open(session: Session, response: CursorResponse) -> Self {
        let mut cursor = Self::from_response(session, response);
        cursor.fill().await;
        cursor
    }

    /// Server cursor id, if the server still holds this cursor.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Whether the server reported batches not yet fetched.
    pub fn has_more_remotely(&self) -> bool {
        self.has_more
    }

    /// Whether another document can be read.
    ///
    /// This only looks at the local buffer: the cursor always holds the next
    /// document unless the result has ended or fetching a batch failed.
    ///
    /// # Errors
    /// Returns `QueryError::CursorDisposed` after `dispose()`.
    pub fn has_next(&self) -> Result<bool, QueryError> {
        self.ensure_not_disposed()?;
        Ok(self.position < self.batch.len())
    }

    /// Read the next document.
    ///
    /// Consuming the last document of a batch fetches the following batch
    /// when the server holds one. If that fetch fails the error is reported,
    /// the document is still returned, and the cursor becomes exhausted.
    ///
    /// # Errors
    /// Returns `QueryError::CursorExhausted` when `has_next()` is false and
    /// `QueryError::CursorDisposed` after `dispose()`.
    pub async fn next(&mut self) -> Result<Value, QueryError> {
        self.ensure_not_disposed()?;

        if self.position >= self.batch.len() {
            self.state = CursorState::Exhausted;
            return Err(QueryError::CursorExhausted);
        }

        let document = std::mem::take(&mut self.batch[self.position]);
        self.position += 1;

        if self.position == self.batch.len() {
            self.fill().await;
        }

        Ok(document)
    }

    /// Drain the cursor, returning every remaining document in order.
    ///
    /// # Errors
    /// Returns `QueryError::CursorDisposed` after `dispose()`.
    pub async fn elements(&mut self) -> Result<Vec<Value>, QueryError> {
        let mut documents = Vec::new();

        while self.has_next()? {
            documents.push(self.next().await?);
        }

        Ok(documents)
    }

    /// Total result count, if the statement requested it.
    ///
    /// The value stays the same for the cursor's lifetime.
    ///
    /// # Errors
    /// Returns `QueryError::CursorDisposed` after `dispose()`.
    pub fn count(&self) -> Result<Option<u64>, QueryError> {
        self.ensure_not_disposed()?;
        Ok(self.count)
    }

    /// Release the server cursor early.
    ///
    /// Issues one deletion request if a server id is present; without one
    /// (already disposed, or a purely local result) nothing happens. The
    /// cursor is disposed afterwards even if the server reported an error.
    /// Returns whether the server accepted the deletion.
    pub async fn dispose(&mut self) -> bool {
        if self.state == CursorState::Disposed {
            return false;
        }
        let Some(id) = self.id.take() else {
            return false;
        };

        let accepted = self
            .session
            .call::<Value>(HttpMethod::Delete, &routes::cursor(&id), "")
            .await
            .is_some();

        self.has_more = false;
        self.state = CursorState::Disposed;
        accepted
    }

    fn can_fetch(&self) -> bool {
        self.state == CursorState::Active && self.has_more && self.id.is_some()
    }

    fn ensure_not_disposed(&self) -> Result<(), QueryError> {
        if self.state == CursorState::Disposed {
            return Err(QueryError::CursorDisposed);
        }
        Ok(())
    }

    /// Fetch batches until one holds a document, the result ends, or a
    /// fetch fails. Empty batches only occur when the server announces more.
    async fn fill(&mut self) {
        while self.position >= self.batch.len() {
            if !self.can_fetch() {
                self.state = CursorState::Exhausted;
                return;
            }
            if !self.fetch_batch().await {
                return;
            }
        }
    }

    /// One continuation round trip. Returns whether a batch was received.
    async fn fetch_batch(&mut self) -> bool {
        let Some(id) = self.id.clone() else {
            return false;
        };

        tracing::debug!(cursor = %id, "fetching next batch");

        let response: Option<CursorResponse> = self
            .session
            .call(HttpMethod::Put, &routes::cursor(&id), "")
            .await;

        match response {
            Some(response) => {
                self.batch = response.result;
                self.position = 0;
                self.has_more = response.has_more;
                // The server drops the cursor once it delivered the last batch
                self.id = if self.has_more {
                    response.id.or(Some(id))
                } else {
                    None
                };
                true
            }
            None => {
                self.state = CursorState::Exhausted;
                false
            }
        }
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("id", &self.id)
            .field("buffered", &(self.batch.len() - self.position))
            .field("has_more", &self.has_more)
            .field("count", &self.count)
            .field("state", &self.state)
            .finish()
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "[cursor:{}]", id),
            None => write!(f, "[cursor]"),
        }
    }
}

impl Drop for Cursor {
    fn drop(&mut self) {
        if self.has_more && self.state != CursorState::Disposed {
            if let Some(id) = &self.id {
                tracing::warn!(
                    cursor = %id,
                    "cursor dropped with unread batches; the server keeps it until it times out"
                );
            }
        }
    }
}
