use crate::models::{Eligibility, MatchOptions};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use validator::{Validate, ValidationError};

fn validate_eligibility(eligibility: &Eligibility) -> Result<(), ValidationError> {
    if !eligibility.min_score.is_finite() || eligibility.min_score < 0.0 {
        return Err(ValidationError::new("min_score_out_of_range"));
    }
    Ok(())
}

/// Request to add a college to the catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewCollegeRequest {
    #[serde(rename = "actorId", default)]
    pub actor_id: Option<String>,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(range(min = 0.0))]
    pub fees: f64,
    #[serde(default)]
    #[validate(custom(function = "validate_eligibility"))]
    pub eligibility: Eligibility,
    #[serde(default)]
    pub careers: Option<Vec<String>>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub scholarships: Option<Value>,
}

impl NewCollegeRequest {
    /// Document body stored in the colleges collection
    pub fn document(&self) -> Value {
        let mut doc = json!({
            "name": self.name.trim(),
            "location": self.location.trim(),
            "fees": self.fees,
            "eligibility": self.eligibility,
            "createdAt": chrono::Utc::now(),
        });

        if let Some(obj) = doc.as_object_mut() {
            if let Some(careers) = &self.careers {
                obj.insert("careers".to_string(), json!(careers));
            }
            if let Some(rank) = self.rank {
                obj.insert("rank".to_string(), json!(rank));
            }
            if let Some(scholarships) = &self.scholarships {
                obj.insert("scholarships".to_string(), scholarships.clone());
            }
        }

        doc
    }
}

/// Partial update of a college; only present fields change
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_update"))]
pub struct UpdateCollegeRequest {
    #[serde(rename = "actorId", default)]
    pub actor_id: Option<String>,
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    #[validate(range(min = 0.0))]
    pub fees: Option<f64>,
    pub eligibility: Option<Eligibility>,
    pub careers: Option<Vec<String>>,
    pub rank: Option<u32>,
    pub scholarships: Option<Value>,
}

fn validate_update(req: &UpdateCollegeRequest) -> Result<(), ValidationError> {
    match &req.eligibility {
        Some(eligibility) => validate_eligibility(eligibility),
        None => Ok(()),
    }
}

impl UpdateCollegeRequest {
    /// Fields to patch, without the actor id
    pub fn changes(&self) -> Map<String, Value> {
        let mut changes = Map::new();
        if let Some(name) = &self.name {
            changes.insert("name".to_string(), json!(name.trim()));
        }
        if let Some(location) = &self.location {
            changes.insert("location".to_string(), json!(location.trim()));
        }
        if let Some(fees) = self.fees {
            changes.insert("fees".to_string(), json!(fees));
        }
        if let Some(eligibility) = &self.eligibility {
            changes.insert("eligibility".to_string(), json!(eligibility));
        }
        if let Some(careers) = &self.careers {
            changes.insert("careers".to_string(), json!(careers));
        }
        if let Some(rank) = self.rank {
            changes.insert("rank".to_string(), json!(rank));
        }
        if let Some(scholarships) = &self.scholarships {
            changes.insert("scholarships".to_string(), scholarships.clone());
        }
        changes
    }
}

/// Query parameters identifying who performed an action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorQuery {
    #[serde(rename = "actorId", default)]
    pub actor_id: Option<String>,
}

/// Query parameters for listing colleges
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollegeListQuery {
    #[serde(default)]
    pub location: Option<String>,
}

/// Request to match colleges for a student
///
/// Either `studentId` (profile loaded from the store) or an inline
/// `profile` document must be present; `profile` wins when both are.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchCollegesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "student_id", rename = "studentId", default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub profile: Option<Value>,
    #[serde(default)]
    pub options: MatchOptions,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to store a student profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewStudentRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub cgpa: Option<f64>,
    #[serde(rename = "qualifyingExams", alias = "examsTaken", default)]
    pub qualifying_exams: Vec<String>,
    #[serde(default)]
    pub career: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "student".to_string()
}

impl NewStudentRequest {
    /// Document body stored in the students collection
    pub fn document(&self) -> Value {
        json!({
            "name": self.name.trim(),
            "email": self.email.trim().to_lowercase(),
            "cgpa": self.cgpa.filter(|c| c.is_finite()),
            "qualifyingExams": self.qualifying_exams,
            "career": self.career,
            "role": self.role,
            "createdAt": chrono::Utc::now(),
        })
    }
}

/// Submitted aptitude test answers keyed by question id
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitTestRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "studentId", default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub answers: HashMap<String, usize>,
}

/// Request to register an admin email
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddAdminRequest {
    #[validate(email)]
    pub email: String,
    #[serde(rename = "addedBy", default)]
    pub added_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCheckQuery {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditQuery {
    #[serde(rename = "actorId", default)]
    pub actor_id: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}
