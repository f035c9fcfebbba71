use serde::{Deserialize, Serialize};
use crate::models::{CollegeSummary, ExclusionStats, StudentProfile, TestResult};
use crate::services::CacheStats;

/// Response for the match colleges endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCollegesResponse {
    pub matches: Vec<CollegeSummary>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    pub excluded: ExclusionStats,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cache: CacheStats,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Outcome of a write against the document store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MutationResponse {
    pub fn created(id: String) -> Self {
        Self { ok: true, id: Some(id), error: None }
    }

    pub fn done() -> Self {
        Self { ok: true, id: None, error: None }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self { ok: false, id: None, error: Some(error.to_string()) }
    }
}

/// Stored student record together with its normalized profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentResponse {
    pub id: String,
    pub record: serde_json::Value,
    pub profile: StudentProfile,
}

/// Graded test plus the outcome of storing it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTestResponse {
    pub result: TestResult,
    pub saved: MutationResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCheckResponse {
    pub email: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}
