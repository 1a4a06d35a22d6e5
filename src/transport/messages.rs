//! JSON message types for the document store REST API.
//!
//! Request bodies borrow from the statement that builds them; response types
//! tolerate missing attributes the way the server omits them (no `_id` on a
//! single-batch cursor, no `count` unless it was requested).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Create cursor request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCursorRequest<'a> {
    /// Query text
    pub query: &'a str,
    /// Whether the server should report the total result count
    pub count: bool,
    /// Bind variables by name
    pub bind_vars: &'a Map<String, Value>,
    /// Maximum documents per batch (server default if absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u64>,
}

/// Query validation request.
#[derive(Debug, Clone, Serialize)]
pub struct ParseQueryRequest<'a> {
    /// Query text
    pub query: &'a str,
}

/// One batch of a cursor, as returned by cursor creation and continuation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorResponse {
    /// Documents of this batch
    #[serde(default, deserialize_with = "null_as_empty")]
    pub result: Vec<Value>,
    /// Whether the server holds further batches
    #[serde(default)]
    pub has_more: bool,
    /// Server cursor id (present while the server keeps the cursor)
    #[serde(rename = "_id", default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    /// Total result count (only if requested)
    #[serde(default)]
    pub count: Option<u64>,
}

/// Response of the collection listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionsResponse {
    /// Collection attributes keyed by collection name
    #[serde(default)]
    pub collections: Option<BTreeMap<String, Map<String, Value>>>,
}

/// Response of the all-documents endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub documents: Vec<Value>,
}

/// Response of the single-document endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentResponse {
    #[serde(default)]
    pub document: Option<Value>,
}

/// Response of the save-document endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedDocumentResponse {
    /// Id of the new document
    #[serde(rename = "_id", default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
}

/// Accept ids sent either as JSON strings or as numbers.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| id_to_string(&v)))
}

/// Treat an explicit `null` list like a missing one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Render an id value as its string form.
pub fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
