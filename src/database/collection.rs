//! Collection handles and document CRUD.
//!
//! Every call is a single request decoded through the shared envelope; a
//! remote failure is reported and the call returns `None` or `false`.

use crate::connection::Session;
use crate::transport::messages::{
    id_to_string, DocumentResponse, DocumentsResponse, SavedDocumentResponse,
};
use crate::transport::{routes, HttpMethod};
use serde_json::{Map, Value};
use std::fmt;

/// Attributes the server reports for a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionInfo {
    name: String,
    attributes: Map<String, Value>,
}

impl CollectionInfo {
    /// Build from the attributes reported for `name`.
    ///
    /// A `name` attribute in the payload takes precedence.
    pub fn new(name: impl Into<String>, attributes: Map<String, Value>) -> Self {
        let name = attributes
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| name.into());

        Self { name, attributes }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Server-side collection id.
    pub fn id(&self) -> Option<String> {
        self.attributes.get("id").and_then(id_to_string)
    }

    /// Numeric collection status (loaded, unloaded, ...).
    pub fn status(&self) -> Option<i64> {
        self.attributes.get("status").and_then(Value::as_i64)
    }

    /// All reported attributes.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

/// Handle to one collection.
#[derive(Debug, Clone)]
pub struct Collection {
    session: Session,
    info: CollectionInfo,
}

impl Collection {
    pub(crate) fn new(session: Session, info: CollectionInfo) -> Self {
        Self { session, info }
    }

    pub fn name(&self) -> &str {
        self.info.name()
    }

    pub fn info(&self) -> &CollectionInfo {
        &self.info
    }

    /// Fetch every document of the collection.
    pub async fn all(&self) -> Option<Vec<Value>> {
        let response: DocumentsResponse = self
            .session
            .call(HttpMethod::Get, &routes::documents(self.name()), "")
            .await?;
        Some(response.documents)
    }

    /// Fetch one document by id.
    pub async fn document(&self, id: &str) -> Option<Value> {
        let response: DocumentResponse = self
            .session
            .call(HttpMethod::Get, &routes::document(self.name(), id), "")
            .await?;
        response.document
    }

    /// Store a new document and return its id.
    pub async fn save(&self, document: &Value) -> Option<String> {
        let body = self.encode(document)?;
        let response: SavedDocumentResponse = self
            .session
            .call(HttpMethod::Post, &routes::document_create(self.name()), &body)
            .await?;
        response.id
    }

    /// Replace a document. Returns whether the server accepted it.
    pub async fn update(&self, id: &str, document: &Value) -> bool {
        let Some(body) = self.encode(document) else {
            return false;
        };
        self.session
            .call::<Value>(HttpMethod::Put, &routes::document(self.name(), id), &body)
            .await
            .is_some()
    }

    /// Remove a document. Returns whether the server accepted it.
    pub async fn delete(&self, id: &str) -> bool {
        self.session
            .call::<Value>(HttpMethod::Delete, &routes::document(self.name(), id), "")
            .await
            .is_some()
    }

    fn encode(&self, document: &Value) -> Option<String> {
        self.session
            .settle(serde_json::to_string(document).map_err(Into::into))
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[collection:{}]", self.name())
    }
}
