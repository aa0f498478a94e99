use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use super::error::{check_object_id, ApiError};
use super::types::{FavoritePayload, FavoritesQuery};
use crate::db::{DbError, DeleteAck, FavoriteRepo, InsertAck};
use crate::server::AppState;

pub async fn list_favorites(
    State(state): State<AppState>,
    Query(query): Query<FavoritesQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let favorites = state.db.list_favorites(&query.email).await?;
    Ok(Json(favorites))
}

// No duplicate check: favoriting the same movie twice stores two documents.
pub async fn create_favorite(
    State(state): State<AppState>,
    Json(payload): Json<FavoritePayload>,
) -> Result<Json<InsertAck>, ApiError> {
    let doc = serde_json::to_value(&payload).map_err(DbError::from)?;
    let ack = state.db.insert_favorite(&payload.user_email, doc).await?;
    Ok(Json(ack))
}

pub async fn delete_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    let ack = state.db.delete_favorite(check_object_id(&id)?).await?;
    Ok(Json(ack))
}
