use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api;
use crate::config::Config;
use crate::db::SqliteRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<SqliteRepository>,
}

impl AppState {
    pub fn new(config: Config, db: Arc<SqliteRepository>) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/allMovies", get(api::movies::list_movies))
        .route(
            "/allMovies/:id",
            get(api::movies::get_movie).delete(api::movies::delete_movie),
        )
        .route("/genre/:genre", get(api::movies::movies_by_genre))
        .route("/highRatedMovies", get(api::movies::top_rated_movies))
        .route("/movies", post(api::movies::create_movie))
        .route("/updateMovie/:id", patch(api::movies::update_movie))
        .route(
            "/favoriteMovies",
            get(api::favorites::list_favorites).post(api::favorites::create_favorite),
        )
        .route("/favoriteMovies/:id", delete(api::favorites::delete_favorite))
        .route(
            "/users",
            post(api::users::create_user).put(api::users::upsert_user),
        )
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn liveness() -> &'static str {
    "Movie server is running..."
}
