use crate::models::{AuditAction, AuditRecord};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Actor recorded when an action has no identified user
pub const ANONYMOUS_ACTOR: &str = "anonymous";

/// PostgreSQL client for the audit log
///
/// Every user action worth tracing (catalog edits, registrations, test
/// submissions) lands in the `audit_log` table.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Append an action to the audit log and return its row id
    pub async fn record_action(
        &self,
        actor_id: Option<&str>,
        action: AuditAction,
        metadata: &serde_json::Value,
    ) -> Result<i64, PostgresError> {
        let query = r#"
            INSERT INTO audit_log (actor_id, action, metadata, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id
        "#;

        let actor = resolve_actor(actor_id);

        let row = sqlx::query(query)
            .bind(actor)
            .bind(action.as_str())
            .bind(metadata)
            .fetch_one(&self.pool)
            .await?;

        let id: i64 = row.get("id");

        tracing::debug!("Recorded audit entry {}: {} by {}", id, action, actor);

        Ok(id)
    }

    /// Most recent audit entries, newest first, optionally for one actor
    pub async fn recent_actions(
        &self,
        actor_id: Option<&str>,
        limit: i64,
    ) -> Result<Vec<AuditRecord>, PostgresError> {
        let query = r#"
            SELECT id, actor_id, action, metadata, created_at
            FROM audit_log
            WHERE ($1::TEXT IS NULL OR actor_id = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2
        "#;

        let rows = sqlx::query(query)
            .bind(actor_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(|row| AuditRecord {
                id: row.get("id"),
                actor_id: row.get("actor_id"),
                action: row.get("action"),
                metadata: row.get("metadata"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(records)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Blank or missing actors are recorded as anonymous
pub fn resolve_actor(actor_id: Option<&str>) -> &str {
    actor_id
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(ANONYMOUS_ACTOR)
}
