use super::{error_response, validation_failed, AppState};
use crate::core::normalize_profile;
use crate::models::{
    ActorQuery, AuditAction, CollegeListQuery, CollegeSummary, MatchCollegesRequest,
    MatchCollegesResponse, MutationResponse, NewCollegeRequest, UpdateCollegeRequest,
};
use crate::services::AppwriteError;
use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Configure catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/colleges", web::get().to(list_colleges))
        .route("/colleges", web::post().to(add_college))
        .route("/colleges/match", web::post().to(match_colleges))
        .route("/colleges/{id}", web::get().to(get_college))
        .route("/colleges/{id}", web::patch().to(update_college))
        .route("/colleges/{id}", web::delete().to(delete_college));
}

/// List colleges
///
/// GET /api/v1/colleges?location={location}
async fn list_colleges(
    state: web::Data<AppState>,
    query: web::Query<CollegeListQuery>,
) -> impl Responder {
    let colleges = state.catalog.colleges(query.location.as_deref()).await;
    HttpResponse::Ok().json(colleges)
}

/// GET /api/v1/colleges/{id}
async fn get_college(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let college_id = path.into_inner();

    match state.catalog.college(&college_id).await {
        Ok(college) => HttpResponse::Ok().json(college),
        Err(AppwriteError::NotFound(message)) => {
            error_response(StatusCode::NOT_FOUND, "College not found", message)
        }
        Err(e) => {
            tracing::error!("Failed to fetch college {}: {}", college_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch college", e)
        }
    }
}

/// Add a college
///
/// POST /api/v1/colleges
///
/// Request body:
/// ```json
/// {
///   "actorId": "string",
///   "name": "string",
///   "location": "India",
///   "fees": 500000,
///   "eligibility": { "minScore": 8.0, "requiredExam": "JEE Advanced" },
///   "careers": ["engineering"]
/// }
/// ```
async fn add_college(
    state: web::Data<AppState>,
    req: web::Json<NewCollegeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.appwrite.add_college(req.document()).await {
        Ok(id) => {
            state.catalog.invalidate(None).await;
            state
                .audit
                .log_action(
                    req.actor_id.as_deref(),
                    AuditAction::AddedCollege,
                    json!({ "collegeId": id, "name": req.name }),
                )
                .await;
            HttpResponse::Created().json(MutationResponse::created(id))
        }
        Err(e) => {
            tracing::error!("Failed to add college {}: {}", req.name, e);
            HttpResponse::InternalServerError().json(MutationResponse::failed(e))
        }
    }
}

/// Partially update a college
///
/// PATCH /api/v1/colleges/{id}
async fn update_college(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateCollegeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let college_id = path.into_inner();
    let changes = req.changes();
    if changes.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Nothing to update",
            "Request contains no college fields",
        );
    }

    match state.appwrite.update_college(&college_id, changes.clone()).await {
        Ok(()) => {
            state.catalog.invalidate(Some(&college_id)).await;
            state
                .audit
                .log_action(
                    req.actor_id.as_deref(),
                    AuditAction::UpdatedCollege,
                    json!({ "collegeId": college_id, "changes": changes }),
                )
                .await;
            HttpResponse::Ok().json(MutationResponse::done())
        }
        Err(AppwriteError::NotFound(message)) => {
            error_response(StatusCode::NOT_FOUND, "College not found", message)
        }
        Err(e) => {
            tracing::error!("Failed to update college {}: {}", college_id, e);
            HttpResponse::InternalServerError().json(MutationResponse::failed(e))
        }
    }
}

/// DELETE /api/v1/colleges/{id}?actorId={actorId}
async fn delete_college(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ActorQuery>,
) -> impl Responder {
    let college_id = path.into_inner();

    match state.appwrite.delete_college(&college_id).await {
        Ok(()) => {
            state.catalog.invalidate(Some(&college_id)).await;
            state
                .audit
                .log_action(
                    query.actor_id.as_deref(),
                    AuditAction::DeletedCollege,
                    json!({ "collegeId": college_id }),
                )
                .await;
            HttpResponse::Ok().json(MutationResponse::done())
        }
        Err(AppwriteError::NotFound(message)) => {
            error_response(StatusCode::NOT_FOUND, "College not found", message)
        }
        Err(e) => {
            tracing::error!("Failed to delete college {}: {}", college_id, e);
            HttpResponse::InternalServerError().json(MutationResponse::failed(e))
        }
    }
}

/// Match colleges for a student
///
/// POST /api/v1/colleges/match
///
/// Request body:
/// ```json
/// {
///   "studentId": "string",
///   "profile": { "cgpa": 8.5, "examsTaken": ["JEE Advanced"] },
///   "options": { "maxFees": 1000000, "location": "India", "career": "engineering" },
///   "limit": 20
/// }
/// ```
async fn match_colleges(
    state: web::Data<AppState>,
    req: web::Json<MatchCollegesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let req = req.into_inner();

    let student = match (&req.profile, &req.student_id) {
        (Some(profile), _) => normalize_profile(profile),
        (None, Some(student_id)) => match state.appwrite.find_student(student_id).await {
            Some(record) => normalize_profile(&record),
            None => {
                return error_response(
                    StatusCode::NOT_FOUND,
                    "Student not found",
                    format!("No profile for student {}", student_id),
                );
            }
        },
        (None, None) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Missing student",
                "Either studentId or profile is required",
            );
        }
    };

    tracing::info!(
        "Matching colleges for student {:?} (options: {:?})",
        req.student_id,
        req.options
    );

    // Whole catalog, so the location stage is counted like the others
    let candidates = state.catalog.colleges(None).await;

    let result = state.matcher.find_matches(
        &student,
        candidates,
        &req.options,
        req.limit.map(usize::from),
    );

    let response = MatchCollegesResponse {
        matches: result.matches.iter().map(CollegeSummary::from).collect(),
        total_candidates: result.total_candidates,
        excluded: result.excluded,
    };

    tracing::info!(
        "Returning {} colleges (from {} candidates)",
        response.matches.len(),
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}
