use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{debug, error, info};
use serde_json::{Map, Value};
use std::sync::Arc;
use user_directory_shared::{
    helpers::documents_to_json,
    models::{filter_eq, parse_id, DeleteOutcome, User, PHONE_NUMBER_FIELD},
    store::UserStore,
};

use crate::{
    error::{AppError, Result},
    models::{ErrorResponse, IdResponse, UserPayload},
};

/// Headers attached to every read response.
/// The total count describes the single wrapped result set, so it is always 1.
type ReadHeaders = [(&'static str, &'static str); 3];

const READ_HEADERS: ReadHeaders = [
    ("X-Total-Count", "1"),
    ("Access-Control-Expose-Headers", "Content-Range"),
    ("Content-Range", "bytes: 0-9/*"),
];

// Empty result sets are reported as 404 rather than an empty array
fn non_empty(users: Vec<Map<String, Value>>) -> Result<Json<Vec<Map<String, Value>>>> {
    if users.is_empty() {
        Err(AppError::NotFound("No users matched".into()))
    } else {
        Ok(Json(users))
    }
}

// GET /users
pub async fn get_all_users<S>(
    State(store): State<Arc<S>>,
) -> Result<(ReadHeaders, Json<Vec<Map<String, Value>>>)>
where
    S: UserStore + ?Sized,
{
    let documents = store.find_all().await?;
    debug!("find_all returned {} document(s)", documents.len());

    Ok((READ_HEADERS, non_empty(documents_to_json(documents))?))
}

// GET /users/phone_number/:phone_number
pub async fn get_user_by_phone_number<S>(
    State(store): State<Arc<S>>,
    Path(phone_number): Path<String>,
) -> Result<(ReadHeaders, Json<Vec<Map<String, Value>>>)>
where
    S: UserStore + ?Sized,
{
    let documents = store
        .find(&filter_eq(PHONE_NUMBER_FIELD, phone_number.as_str()))
        .await?;
    debug!(
        "find by phone number {} returned {} document(s)",
        phone_number,
        documents.len()
    );

    Ok((READ_HEADERS, non_empty(documents_to_json(documents))?))
}

// GET /users/:id
// Validates the id and echoes it back without reading the store.
pub async fn get_user_by_object_id(
    Path(id): Path<String>,
) -> Result<(ReadHeaders, Json<IdResponse<String>>)> {
    let object_id = parse_id(&id)?;
    debug!("Echoing well-formed user id {}", object_id);

    Ok((READ_HEADERS, Json(IdResponse { id })))
}

// POST /users
// Failures are reported in the body with a 200 status.
pub async fn create_user<S>(
    State(store): State<Arc<S>>,
    Json(body): Json<Map<String, Value>>,
) -> Response
where
    S: UserStore + ?Sized,
{
    match save_user(store.as_ref(), body).await {
        Ok(id) => {
            info!("Created user {}", id);
            (StatusCode::CREATED, Json(IdResponse { id })).into_response()
        }
        Err(err) => {
            error!("Failed to create user: {}", err);
            (
                StatusCode::OK,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

// PUT /users/:id
// The path id is not consulted; the body is upserted as is.
pub async fn update_user<S>(
    State(store): State<Arc<S>>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<IdResponse<String>>>
where
    S: UserStore + ?Sized,
{
    // Payload errors are not client errors here; every update failure is a 500
    let id = save_user(store.as_ref(), body)
        .await
        .map_err(|err| match err {
            AppError::BadRequest(msg) => AppError::InternalServerError(msg),
            other => other,
        })?;
    info!("Upserted user {}", id);

    Ok(Json(IdResponse { id }))
}

// DELETE /users/phone_number/:phone_number
pub async fn delete_user_by_phone_number<S>(
    State(store): State<Arc<S>>,
    Path(phone_number): Path<String>,
) -> Result<Json<DeleteOutcome>>
where
    S: UserStore + ?Sized,
{
    let outcome = store.delete_one_by_phone_number(&phone_number).await?;
    info!(
        "Delete by phone number {}: deleted_count={}",
        phone_number, outcome.deleted_count
    );

    Ok(Json(outcome))
}

// DELETE /users/:id
pub async fn delete_user_by_object_id<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<IdResponse<DeleteOutcome>>>
where
    S: UserStore + ?Sized,
{
    let outcome = store.delete_one_by_object_id(&id).await?;
    info!("Delete by id {}: deleted_count={}", id, outcome.deleted_count);

    Ok(Json(IdResponse { id: outcome }))
}

// Builds a user from the request body and upserts it, returning the stored id
async fn save_user<S>(store: &S, body: Map<String, Value>) -> Result<String>
where
    S: UserStore + ?Sized,
{
    let user = User::from(UserPayload::from_body(body)?);
    let saved = store.upsert_one(user).await?;

    saved
        .id
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::InternalServerError("Store returned a user without an id".into()))
}
