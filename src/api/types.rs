use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db::{MovieFields, UpdateAck};

/// Body of POST /movies. The seven catalog fields are required; anything
/// else the client sends is kept and stored verbatim.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMoviePayload {
    #[serde(flatten)]
    pub fields: MovieFields,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct MovieSearchQuery {
    #[serde(default, rename = "searchParams")]
    pub search_params: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FavoritesQuery {
    pub email: String,
}

/// Body of POST /favoriteMovies: a user email, a movie reference, and
/// whatever else the client chose to denormalize onto the favorite.
#[derive(Debug, Serialize, Deserialize)]
pub struct FavoritePayload {
    #[serde(rename = "userEmail")]
    pub user_email: String,
    #[serde(rename = "movieId")]
    pub movie_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of PUT /users: the classification message alongside the
/// store's own acknowledgment fields.
#[derive(Debug, Serialize)]
pub struct UpsertResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub result: UpdateAck,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_movie_keeps_extra_fields() {
        let payload: CreateMoviePayload = serde_json::from_value(json!({
            "title": "Arrival",
            "genre": "Sci-Fi",
            "duration": 116,
            "releaseYear": 2016,
            "rating": 7.9,
            "summary": "A linguist decodes an alien language.",
            "posterURL": "https://example.com/arrival.jpg",
            "director": "Denis Villeneuve"
        }))
        .unwrap();

        assert_eq!(payload.fields.title, "Arrival");
        assert_eq!(payload.extra["director"], "Denis Villeneuve");

        let doc = serde_json::to_value(&payload).unwrap();
        assert_eq!(doc["director"], "Denis Villeneuve");
        assert_eq!(doc["releaseYear"], 2016);
    }

    #[test]
    fn test_favorite_requires_minimum_fields() {
        let missing_email = serde_json::from_value::<FavoritePayload>(json!({
            "movieId": "64b1f0a2c3d4e5f60718293a"
        }));
        assert!(missing_email.is_err());
    }
}
