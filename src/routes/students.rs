use super::{error_response, validation_failed, AppState};
use crate::core::normalize_profile;
use crate::models::{AuditAction, MutationResponse, NewStudentRequest, StudentResponse};
use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/students", web::post().to(create_student))
        .route("/students/{id}", web::get().to(get_student));
}

/// GET /api/v1/students/{id}
async fn get_student(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let student_id = path.into_inner();

    match state.appwrite.find_student(&student_id).await {
        Some(record) => {
            let profile = normalize_profile(&record);
            HttpResponse::Ok().json(StudentResponse {
                id: student_id,
                record,
                profile,
            })
        }
        None => error_response(
            StatusCode::NOT_FOUND,
            "Student not found",
            format!("No profile for student {}", student_id),
        ),
    }
}

/// Store a student profile
///
/// POST /api/v1/students
async fn create_student(
    state: web::Data<AppState>,
    req: web::Json<NewStudentRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.appwrite.create_student(req.document()).await {
        Ok(id) => {
            state
                .audit
                .log_action(
                    Some(id.as_str()),
                    AuditAction::UserRegistered,
                    json!({ "email": req.email, "role": req.role }),
                )
                .await;
            HttpResponse::Created().json(MutationResponse::created(id))
        }
        Err(e) => {
            tracing::error!("Failed to create student: {}", e);
            HttpResponse::InternalServerError().json(MutationResponse::failed(e))
        }
    }
}
