use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use super::error::{check_object_id, ApiError};
use super::types::*;
use crate::db::{DbError, DeleteAck, InsertAck, MovieFields, MovieFilter, MovieRepo, UpdateAck};
use crate::server::AppState;

pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<MovieSearchQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let filter = MovieFilter::from_search(query.search_params.as_deref());
    let movies = state.db.list_movies(&filter).await?;
    Ok(Json(movies))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let movie = state
        .db
        .get_movie(check_object_id(&id)?)
        .await?
        .ok_or(ApiError::NotFound("movie"))?;
    Ok(Json(movie))
}

pub async fn movies_by_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
) -> Result<Response, ApiError> {
    let movies = state.db.list_movies(&MovieFilter::by_genre(&genre)).await?;

    // Contract: a message object when nothing matched, not an empty array.
    if movies.is_empty() {
        return Ok(Json(MessageResponse {
            message: "No movies found",
        })
        .into_response());
    }

    Ok(Json(movies).into_response())
}

pub async fn top_rated_movies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let movies = state.db.top_rated_movies().await?;
    Ok(Json(movies))
}

pub async fn create_movie(
    State(state): State<AppState>,
    Json(payload): Json<CreateMoviePayload>,
) -> Result<Json<InsertAck>, ApiError> {
    let doc = serde_json::to_value(&payload).map_err(DbError::from)?;
    let ack = state.db.insert_movie(doc).await?;
    Ok(Json(ack))
}

pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<MovieFields>,
) -> Result<Json<UpdateAck>, ApiError> {
    let ack = state
        .db
        .update_movie(check_object_id(&id)?, &fields)
        .await?;
    Ok(Json(ack))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    let ack = state.db.delete_movie(check_object_id(&id)?).await?;
    Ok(Json(ack))
}
