use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{Result, ServiceError};

/// Field holding the store-assigned identifier in every stored document
pub const ID_FIELD: &str = "id";

pub const PHONE_NUMBER_FIELD: &str = "phone_number";

/// Exact-match query: field name -> expected value
pub type Filter = BTreeMap<String, Value>;

/// Builds a filter matching a single field
pub fn filter_eq(field: &str, value: impl Into<Value>) -> Filter {
    Filter::from([(field.to_string(), value.into())])
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub ads_enabled: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A stored record: the native identifier plus whatever other fields the item carries.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub fields: Map<String, Value>,
}

impl Document {
    /// Splits a raw JSON object into identifier and fields.
    pub fn from_fields(mut fields: Map<String, Value>) -> Result<Self> {
        let id = match fields.remove(ID_FIELD) {
            Some(Value::String(id)) => Uuid::parse_str(&id).map_err(|e| {
                ServiceError::InternalError(format!("Stored document has malformed id {}: {}", id, e))
            })?,
            other => {
                return Err(ServiceError::InternalError(format!(
                    "Stored document has no string id: {:?}",
                    other
                )))
            }
        };

        Ok(Self { id, fields })
    }

    /// Builds the document a persisted user is stored as.
    pub fn from_user(user: &User) -> Result<Self> {
        match serde_json::to_value(user)? {
            Value::Object(fields) => Self::from_fields(fields),
            other => Err(ServiceError::InternalError(format!(
                "User did not serialize to an object: {}",
                other
            ))),
        }
    }

    /// True when every filter field equals the document's value for it.
    pub fn matches(&self, filter: &Filter) -> bool {
        filter.iter().all(|(field, expected)| {
            if field == ID_FIELD {
                expected.as_str() == Some(self.id.to_string().as_str())
            } else {
                self.fields.get(field) == Some(expected)
            }
        })
    }
}

/// Result of a single-record delete
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteOutcome {
    pub fn deleted(count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count: count,
        }
    }
}

// Parses an externally supplied identifier into the store's native type
pub fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|e| ServiceError::InvalidIdentifier(format!("{}: {}", id, e)))
}
