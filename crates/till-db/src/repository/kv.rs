//! # Key-Value Repository
//!
//! Raw access to the `kv_store` table. Values are opaque text; callers
//! decide the encoding (JSON helpers are provided).

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for `kv_store` rows.
#[derive(Debug, Clone)]
pub struct KvRepository {
    pool: SqlitePool,
}

impl KvRepository {
    /// Creates a new KvRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KvRepository { pool }
    }

    /// Reads a value.
    ///
    /// ## Returns
    /// `None` if the key was never written (or was deleted).
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        debug!(key = %key, found = value.is_some(), "kv get");
        Ok(value)
    }

    /// Writes a value, replacing any previous one.
    pub async fn put(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "kv put");
        Ok(())
    }

    /// Deletes a value.
    ///
    /// ## Returns
    /// `true` if a row was removed.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key = %key, "kv delete");
        Ok(result.rows_affected() > 0)
    }

    /// Reads and decodes a JSON value.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>> {
        match self.get(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| DbError::serialization(key, e)),
            None => Ok(None),
        }
    }

    /// Encodes and writes a JSON value.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> DbResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| DbError::serialization(key, e))?;
        self.put(key, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    async fn repo() -> super::KvRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().kv()
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let kv = repo().await;
        assert_eq!(kv.get("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let kv = repo().await;

        kv.put("greeting", "hello").await.unwrap();
        kv.put("greeting", "shalom").await.unwrap();

        assert_eq!(kv.get("greeting").await.unwrap().as_deref(), Some("shalom"));
    }

    #[tokio::test]
    async fn test_delete() {
        let kv = repo().await;
        kv.put("k", "v").await.unwrap();

        assert!(kv.delete("k").await.unwrap());
        assert!(!kv.delete("k").await.unwrap());
        assert_eq!(kv.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let kv = repo().await;
        kv.put_json("numbers", &vec![1, 2, 3]).await.unwrap();

        let back: Option<Vec<i32>> = kv.get_json("numbers").await.unwrap();
        assert_eq!(back, Some(vec![1, 2, 3]));

        kv.put("numbers", "not json").await.unwrap();
        assert!(kv.get_json::<Vec<i32>>("numbers").await.is_err());
    }
}
