use async_trait::async_trait;
use serde_json::Value;

use super::filter::MovieFilter;
use super::model::*;

/// Read and write operations on the `movies` collection. Documents go in
/// and out as raw JSON; the store assigns ids.
#[async_trait]
pub trait MovieRepo: Send + Sync {
    async fn list_movies(&self, filter: &MovieFilter) -> DbResult<Vec<Value>>;
    async fn top_rated_movies(&self) -> DbResult<Vec<Value>>;
    async fn get_movie(&self, id: &str) -> DbResult<Option<Value>>;
    async fn insert_movie(&self, doc: Value) -> DbResult<InsertAck>;
    async fn update_movie(&self, id: &str, fields: &MovieFields) -> DbResult<UpdateAck>;
    async fn delete_movie(&self, id: &str) -> DbResult<DeleteAck>;
}

/// Operations on the `users` collection. `upsert_user` must be a single
/// atomic store call: concurrent upserts with one email may never insert
/// two documents.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert_user(&self, user: &UserDoc) -> DbResult<InsertAck>;
    async fn upsert_user(&self, user: &UserDoc) -> DbResult<UpdateAck>;
}

/// Operations on the `favorites` collection. Favorites are arbitrary
/// documents keyed by their own id and scoped by `userEmail`.
#[async_trait]
pub trait FavoriteRepo: Send + Sync {
    async fn list_favorites(&self, user_email: &str) -> DbResult<Vec<Value>>;
    async fn insert_favorite(&self, user_email: &str, doc: Value) -> DbResult<InsertAck>;
    async fn delete_favorite(&self, id: &str) -> DbResult<DeleteAck>;
}
