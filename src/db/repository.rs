use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use crate::db::KeyValueStore;
use crate::error::AppError;

/// Key-value slots persisted in the `kv_store` SQLite table.
#[derive(Clone)]
pub struct SqliteKeyValue {
    db: SqlitePool,
}

impl SqliteKeyValue {
    /// Wraps an existing pool and brings its schema up to date.
    pub async fn new(db: SqlitePool) -> Result<Self, AppError> {
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .map_err(|e| AppError::Storage(format!("migration failed: {}", e)))?;
        Ok(Self { db })
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::new(pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValue {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.db)
            .await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.db)
        .await?;
        Ok(())
    }
}
