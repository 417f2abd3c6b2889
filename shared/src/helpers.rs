use serde_json::{Map, Value};

use crate::models::{Document, ID_FIELD};

/// Converts stored documents into JSON objects, exposing each native
/// identifier as its string form under `id`.
pub fn documents_to_json(documents: Vec<Document>) -> Vec<Map<String, Value>> {
    documents
        .into_iter()
        .map(|document| {
            let mut object = Map::with_capacity(document.fields.len() + 1);
            object.insert(ID_FIELD.to_string(), Value::String(document.id.to_string()));
            object.extend(document.fields);
            object
        })
        .collect()
}
