use crate::models::{AuditAction, AuditRecord};
use crate::services::{PostgresClient, PostgresError};
use serde_json::Value;
use std::sync::Arc;

/// Best-effort audit sink
///
/// Recording never fails from the caller's point of view: storage errors are
/// logged and dropped. Without a database every entry goes to the log only.
#[derive(Clone)]
pub struct AuditLogger {
    postgres: Option<Arc<PostgresClient>>,
}

impl AuditLogger {
    pub fn new(postgres: Arc<PostgresClient>) -> Self {
        Self {
            postgres: Some(postgres),
        }
    }

    /// Audit sink that only emits tracing events
    pub fn disabled() -> Self {
        Self { postgres: None }
    }

    pub async fn log_action(&self, actor_id: Option<&str>, action: AuditAction, metadata: Value) {
        let Some(postgres) = &self.postgres else {
            tracing::info!(action = %action, actor = ?actor_id, "audit (not persisted)");
            return;
        };

        if let Err(e) = postgres.record_action(actor_id, action, &metadata).await {
            tracing::warn!("Failed to record audit entry '{}': {}", action, e);
        }
    }

    /// Whether entries are being persisted right now
    pub async fn health_check(&self) -> bool {
        match &self.postgres {
            Some(postgres) => postgres.health_check().await.unwrap_or(false),
            None => false,
        }
    }

    /// Most recent persisted entries; empty when nothing is persisted
    pub async fn recent_actions(
        &self,
        actor_id: Option<&str>,
        limit: i64,
    ) -> Result<Vec<AuditRecord>, PostgresError> {
        match &self.postgres {
            Some(postgres) => postgres.recent_actions(actor_id, limit).await,
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_logger_never_fails() {
        let audit = AuditLogger::disabled();
        tokio_test::block_on(audit.log_action(
            None,
            AuditAction::DeletedCollege,
            serde_json::json!({ "collegeId": "c1" }),
        ));
    }

    #[test]
    fn test_disabled_logger_reports_unpersisted() {
        let audit = AuditLogger::disabled();

        assert!(!tokio_test::block_on(audit.health_check()));
        assert!(tokio_test::block_on(audit.recent_actions(None, 10)).unwrap().is_empty());
    }
}
