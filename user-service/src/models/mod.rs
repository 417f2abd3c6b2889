use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use user_directory_shared::models::User;

use crate::error::{AppError, Result};

// Request DTOs

/// Body accepted by create and update. Only these keys are read; anything else,
/// `id` included, is ignored.
#[derive(Deserialize, Debug, Default)]
pub struct UserPayload {
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

impl UserPayload {
    /// Picks the user fields out of a raw JSON object body
    pub fn from_body(body: Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(body))
            .map_err(|e| AppError::BadRequest(format!("Invalid user payload: {}", e)))
    }
}

impl From<UserPayload> for User {
    fn from(payload: UserPayload) -> Self {
        User {
            id: None,
            phone_number: payload.phone_number,
            first_name: payload.first_name,
            last_name: payload.last_name,
            ads_enabled: payload.ads_enabled,
            is_active: payload.is_active,
            updated_at: payload.updated_at,
        }
    }
}

// Response DTOs

#[derive(Serialize, Debug)]
pub struct IdResponse<T> {
    pub id: T,
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}
