use super::{validation_failed, AppState};
use crate::models::{AuditAction, MutationResponse, SubmitTestRequest, SubmitTestResponse, TestRecord};
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/aptitude/questions", web::get().to(get_questions))
        .route("/aptitude/submit", web::post().to(submit_test));
}

/// Questions for the configured test, without answers
///
/// GET /api/v1/aptitude/questions
async fn get_questions(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.questions.public_questions())
}

/// Grade a test and store the result for known students
///
/// POST /api/v1/aptitude/submit
///
/// Request body:
/// ```json
/// {
///   "studentId": "string",
///   "answers": { "q1": 1, "q2": 0 }
/// }
/// ```
async fn submit_test(
    state: web::Data<AppState>,
    req: web::Json<SubmitTestRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let result = state.questions.grade(&req.answers);

    tracing::info!(
        "Graded aptitude test for {:?}: {}/{}",
        req.student_id,
        result.score,
        result.total
    );

    // Anonymous submissions are graded but not stored
    let saved = match &req.student_id {
        Some(student_id) => {
            match state
                .appwrite
                .save_test_result(&TestRecord::new(student_id, &result))
                .await
            {
                Ok(id) => {
                    state
                        .audit
                        .log_action(
                            Some(student_id.as_str()),
                            AuditAction::CompletedAptitudeTest,
                            json!({ "score": result.score, "total": result.total }),
                        )
                        .await;
                    MutationResponse::created(id)
                }
                Err(e) => {
                    tracing::error!("Failed to save test result for {}: {}", student_id, e);
                    MutationResponse::failed(e)
                }
            }
        }
        None => MutationResponse::done(),
    };

    HttpResponse::Ok().json(SubmitTestResponse { result, saved })
}
