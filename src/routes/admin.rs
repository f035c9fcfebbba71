use super::{error_response, validation_failed, AppState};
use crate::models::{
    AddAdminRequest, AdminCheckQuery, AdminCheckResponse, AuditAction, AuditQuery, MutationResponse,
};
use crate::services::postgres::ANONYMOUS_ACTOR;
use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Default and maximum page size for the audit listing
const AUDIT_DEFAULT_LIMIT: u32 = 50;
const AUDIT_MAX_LIMIT: u32 = 500;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/admins", web::post().to(add_admin))
        .route("/admins/check", web::get().to(check_admin))
        .route("/audit", web::get().to(list_audit));
}

/// GET /api/v1/admins/check?email={email}
///
/// Lookup failures answer `false` rather than an error.
async fn check_admin(
    state: web::Data<AppState>,
    query: web::Query<AdminCheckQuery>,
) -> impl Responder {
    let is_admin = match state.appwrite.is_admin_by_email(&query.email).await {
        Ok(found) => found,
        Err(e) => {
            tracing::error!("Admin lookup failed: {}", e);
            false
        }
    };

    HttpResponse::Ok().json(AdminCheckResponse {
        email: query.email.trim().to_lowercase(),
        is_admin,
    })
}

/// POST /api/v1/admins
async fn add_admin(state: web::Data<AppState>, req: web::Json<AddAdminRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let added_by = req.added_by.as_deref().unwrap_or(ANONYMOUS_ACTOR);

    match state.appwrite.add_admin(&req.email, added_by).await {
        Ok(id) => {
            state
                .audit
                .log_action(
                    req.added_by.as_deref(),
                    AuditAction::AddedAdmin,
                    json!({ "email": req.email }),
                )
                .await;
            HttpResponse::Created().json(MutationResponse::created(id))
        }
        Err(e) => {
            tracing::error!("Failed to add admin: {}", e);
            HttpResponse::InternalServerError().json(MutationResponse::failed(e))
        }
    }
}

/// Recent audit entries, newest first
///
/// GET /api/v1/audit?actorId={actorId}&limit={limit}
async fn list_audit(state: web::Data<AppState>, query: web::Query<AuditQuery>) -> impl Responder {
    let limit = query
        .limit
        .unwrap_or(AUDIT_DEFAULT_LIMIT)
        .clamp(1, AUDIT_MAX_LIMIT);

    match state
        .audit
        .recent_actions(query.actor_id.as_deref(), i64::from(limit))
        .await
    {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => {
            tracing::error!("Failed to read audit log: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read audit log",
                e,
            )
        }
    }
}
