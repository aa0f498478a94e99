use serde::{Deserialize, Serialize};

/// The seven catalog fields of a movie document. Create accepts extra
/// fields on top of these; update replaces exactly these seven and leaves
/// anything else in the stored document untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieFields {
    pub title: String,
    pub genre: String,
    pub duration: f64,
    #[serde(rename = "releaseYear")]
    pub release_year: i32,
    pub rating: f64,
    pub summary: String,
    #[serde(rename = "posterURL")]
    pub poster_url: String,
}

/// A user profile document. `createdAt` is whatever the caller sent, the
/// server never stamps it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDoc {
    pub email: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Store report for a single-document insert.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: String,
}

/// Store report for an update or upsert. `upserted_id` is set only when
/// the operation inserted a new document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<String>,
}

/// Store report for a delete.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Invalid document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_wire_names() {
        let ack = InsertAck {
            acknowledged: true,
            inserted_id: "64b1f0a2c3d4e5f60718293a".to_string(),
        };
        let json = serde_json::to_value(&ack).unwrap();
        assert_eq!(json["insertedId"], "64b1f0a2c3d4e5f60718293a");

        let ack = UpdateAck {
            acknowledged: true,
            matched_count: 1,
            modified_count: 0,
            upserted_id: None,
        };
        let json = serde_json::to_value(&ack).unwrap();
        assert_eq!(json["matchedCount"], 1);
        assert_eq!(json["modifiedCount"], 0);
        assert!(json.get("upsertedId").is_none());
    }

    #[test]
    fn test_movie_fields_wire_names() {
        let movie: MovieFields = serde_json::from_value(serde_json::json!({
            "title": "Inception",
            "genre": "Sci-Fi",
            "duration": 148,
            "releaseYear": 2010,
            "rating": 8.8,
            "summary": "A thief steals secrets through dreams.",
            "posterURL": "https://example.com/inception.jpg"
        }))
        .unwrap();
        assert_eq!(movie.release_year, 2010);
        assert_eq!(movie.poster_url, "https://example.com/inception.jpg");
    }
}
