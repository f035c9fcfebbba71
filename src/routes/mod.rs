// Route exports
pub mod admin;
pub mod aptitude;
pub mod colleges;
pub mod students;

use crate::core::{Matcher, QuestionSet};
use crate::models::{ErrorResponse, HealthResponse};
use crate::services::{AppwriteClient, AuditLogger, CatalogService};
use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub catalog: CatalogService,
    pub audit: AuditLogger,
    pub matcher: Matcher,
    pub questions: Arc<QuestionSet>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(colleges::configure)
            .configure(students::configure)
            .configure(aptitude::configure)
            .configure(admin::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let audit_healthy = state.audit.health_check().await;

    let status = if audit_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache: state.catalog.cache_stats(),
        timestamp: chrono::Utc::now(),
    })
}

/// JSON error body with a matching status code
pub(crate) fn error_response(status: StatusCode, error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

pub(crate) fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Request validation failed: {:?}", errors);
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            cache: crate::services::CacheStats {
                l1_size: 0,
                redis_enabled: false,
            },
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_error_response_status() {
        let response = error_response(StatusCode::NOT_FOUND, "College not found", "missing");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
