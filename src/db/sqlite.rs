use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

use super::filter::{MovieFilter, TOP_RATED_LIMIT};
use super::model::*;
use super::repo::*;
use crate::util::object_id;

/// SQLite-backed document store. Each collection is a table holding the
/// document as JSON text next to its store-assigned id, so inserts keep
/// the submitted document verbatim and partial updates touch only the
/// named fields.
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(db_path: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(db_path)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let repo = Self::with_pool(pool).await?;

        info!("Document store ready at {}", db_path);

        Ok(repo)
    }

    /// Ephemeral store for tests. A single connection, so the in-memory
    /// database is shared by everything that goes through the pool.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> DbResult<Self> {
        let repo = Self { pool };
        repo.init_schema().await?;
        Ok(repo)
    }

    async fn init_schema(&self) -> DbResult<()> {
        let schema = include_str!("schema.sql");
        sqlx::query(schema).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Document store closed");
    }

    async fn fetch_docs(&self, sql: &str, bind: Option<String>) -> DbResult<Vec<Value>> {
        let mut query = sqlx::query_as::<_, (String,)>(sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter()
            .map(|(doc,)| serde_json::from_str(&doc).map_err(DbError::from))
            .collect()
    }
}

#[async_trait]
impl MovieRepo for SqliteRepository {
    async fn list_movies(&self, filter: &MovieFilter) -> DbResult<Vec<Value>> {
        let (predicate, bind) = filter.predicate();
        let sql = format!("SELECT doc FROM movies WHERE {}", predicate);
        self.fetch_docs(&sql, bind).await
    }

    async fn top_rated_movies(&self) -> DbResult<Vec<Value>> {
        let rows = sqlx::query_as::<_, (String,)>(
            "SELECT doc FROM movies
             ORDER BY CAST(json_extract(doc, '$.rating') AS REAL) DESC
             LIMIT ?",
        )
        .bind(TOP_RATED_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(doc,)| serde_json::from_str(&doc).map_err(DbError::from))
            .collect()
    }

    async fn get_movie(&self, id: &str) -> DbResult<Option<Value>> {
        let row = sqlx::query_as::<_, (String,)>("SELECT doc FROM movies WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|(doc,)| serde_json::from_str(&doc))
            .transpose()
            .map_err(DbError::from)
    }

    async fn insert_movie(&self, mut doc: Value) -> DbResult<InsertAck> {
        let id = object_id::generate();
        if let Some(map) = doc.as_object_mut() {
            map.insert("_id".to_string(), Value::String(id.clone()));
        }

        sqlx::query("INSERT INTO movies (id, doc) VALUES (?, ?)")
            .bind(&id)
            .bind(doc.to_string())
            .execute(&self.pool)
            .await?;

        Ok(InsertAck {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn update_movie(&self, id: &str, fields: &MovieFields) -> DbResult<UpdateAck> {
        let result = sqlx::query(
            "UPDATE movies SET doc = json_set(doc,
                '$.title', ?, '$.genre', ?, '$.duration', ?, '$.releaseYear', ?,
                '$.rating', ?, '$.summary', ?, '$.posterURL', ?)
             WHERE id = ?",
        )
        .bind(&fields.title)
        .bind(&fields.genre)
        .bind(fields.duration)
        .bind(fields.release_year)
        .bind(fields.rating)
        .bind(&fields.summary)
        .bind(&fields.poster_url)
        .bind(id)
        .execute(&self.pool)
        .await?;

        // The store counts a row as modified whenever the id matched, even
        // if every field value was already identical.
        let count = result.rows_affected();
        Ok(UpdateAck {
            acknowledged: true,
            matched_count: count,
            modified_count: count,
            upserted_id: None,
        })
    }

    async fn delete_movie(&self, id: &str) -> DbResult<DeleteAck> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: result.rows_affected(),
        })
    }
}

#[async_trait]
impl UserRepo for SqliteRepository {
    async fn insert_user(&self, user: &UserDoc) -> DbResult<InsertAck> {
        let id = object_id::generate();
        let mut doc = serde_json::to_value(user)?;
        if let Some(map) = doc.as_object_mut() {
            map.insert("_id".to_string(), Value::String(id.clone()));
        }

        sqlx::query("INSERT INTO users (id, email, doc) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(&user.email)
            .bind(doc.to_string())
            .execute(&self.pool)
            .await?;

        Ok(InsertAck {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn upsert_user(&self, user: &UserDoc) -> DbResult<UpdateAck> {
        // One compound statement: insert on a fresh email, otherwise
        // replace name and createdAt, and skip the write entirely when
        // neither field would change. The returned revision tells the
        // three outcomes apart: no row means matched-but-unchanged, 0
        // means inserted, anything above means updated.
        let id = object_id::generate();
        let row = sqlx::query_as::<_, (String, i64)>(
            "INSERT INTO users (id, email, doc)
             VALUES (?1, ?2, json_object('_id', ?1, 'email', ?2, 'name', ?3, 'createdAt', ?4))
             ON CONFLICT(email) DO UPDATE SET
                 doc = json_set(doc, '$.name', ?3, '$.createdAt', ?4),
                 revision = revision + 1
             WHERE json_extract(users.doc, '$.name') IS NOT ?3
                OR json_extract(users.doc, '$.createdAt') IS NOT ?4
             RETURNING id, revision",
        )
        .bind(&id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.created_at)
        .fetch_optional(&self.pool)
        .await?;

        let ack = match row {
            Some((inserted_id, 0)) => UpdateAck {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_id: Some(inserted_id),
            },
            Some(_) => UpdateAck {
                acknowledged: true,
                matched_count: 1,
                modified_count: 1,
                upserted_id: None,
            },
            None => UpdateAck {
                acknowledged: true,
                matched_count: 1,
                modified_count: 0,
                upserted_id: None,
            },
        };

        Ok(ack)
    }
}

#[async_trait]
impl FavoriteRepo for SqliteRepository {
    async fn list_favorites(&self, user_email: &str) -> DbResult<Vec<Value>> {
        let rows = sqlx::query_as::<_, (String,)>("SELECT doc FROM favorites WHERE email = ?")
            .bind(user_email)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|(doc,)| serde_json::from_str(&doc).map_err(DbError::from))
            .collect()
    }

    async fn insert_favorite(&self, user_email: &str, mut doc: Value) -> DbResult<InsertAck> {
        let id = object_id::generate();
        if let Some(map) = doc.as_object_mut() {
            map.insert("_id".to_string(), Value::String(id.clone()));
        }

        sqlx::query("INSERT INTO favorites (id, email, doc) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(user_email)
            .bind(doc.to_string())
            .execute(&self.pool)
            .await?;

        Ok(InsertAck {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn delete_favorite(&self, id: &str) -> DbResult<DeleteAck> {
        let result = sqlx::query("DELETE FROM favorites WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: result.rows_affected(),
        })
    }
}
