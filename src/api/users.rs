use axum::{extract::State, Json};

use super::error::ApiError;
use super::types::UpsertResponse;
use crate::db::{InsertAck, UpdateAck, UserDoc, UserRepo};
use crate::server::AppState;

/// Classify the store's upsert report, in order: a fresh insert, then a
/// real modification, otherwise the match left every field as it was.
fn classify_upsert(ack: &UpdateAck) -> &'static str {
    if ack.upserted_id.is_some() {
        "New user created"
    } else if ack.modified_count > 0 {
        "Existing user updated"
    } else {
        "No changes were made."
    }
}

// Unconditional insert. Deduplication only happens on the PUT path.
pub async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<UserDoc>,
) -> Result<Json<InsertAck>, ApiError> {
    let ack = state.db.insert_user(&user).await?;
    Ok(Json(ack))
}

pub async fn upsert_user(
    State(state): State<AppState>,
    Json(user): Json<UserDoc>,
) -> Result<Json<UpsertResponse>, ApiError> {
    let result = state.db.upsert_user(&user).await?;
    let message = classify_upsert(&result);
    Ok(Json(UpsertResponse { message, result }))
}
