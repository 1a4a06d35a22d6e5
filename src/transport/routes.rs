//! Endpoint paths of the document store REST API.

pub const CURSOR: &str = "/_api/cursor";
pub const QUERY: &str = "/_api/query";
pub const COLLECTIONS: &str = "/_api/collections";

/// Continuation and deletion endpoint of one server cursor.
pub fn cursor(id: &str) -> String {
    format!("{}/{}", CURSOR, urlencoding::encode(id))
}

pub fn collection(name_or_id: &str) -> String {
    format!("/_api/collection/{}", urlencoding::encode(name_or_id))
}

pub fn documents(collection: &str) -> String {
    format!("/_api/documents/{}", urlencoding::encode(collection))
}

/// Endpoint for creating a document in a collection.
pub fn document_create(collection: &str) -> String {
    format!("/_api/document/{}", urlencoding::encode(collection))
}

pub fn document(collection: &str, id: &str) -> String {
    format!(
        "/_api/document/{}/{}",
        urlencoding::encode(collection),
        urlencoding::encode(id)
    )
}
