use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Canonical student profile consumed by the eligibility rules
///
/// Built once at the boundary by [`crate::core::normalize::normalize_profile`];
/// everything downstream works on this typed value only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Cumulative grade metric; `None` means unknown
    pub score: Option<f64>,
    /// Case-folded, trimmed exam names
    #[serde(rename = "qualifyingExams", default)]
    pub qualifying_exams: BTreeSet<String>,
    #[serde(default)]
    pub career: Option<String>,
}

impl StudentProfile {
    pub fn new(score: Option<f64>) -> Self {
        Self {
            score: score.filter(|s| s.is_finite()),
            ..Self::default()
        }
    }

    /// Add a qualifying exam, folding case and trimming whitespace
    pub fn with_exam(mut self, exam: &str) -> Self {
        let folded = fold_exam(exam);
        if !folded.is_empty() {
            self.qualifying_exams.insert(folded);
        }
        self
    }

    pub fn with_career(mut self, career: &str) -> Self {
        let career = career.trim();
        self.career = (!career.is_empty()).then(|| career.to_string());
        self
    }

    /// Helper to get the score only when it is a usable number
    pub fn known_score(&self) -> Option<f64> {
        self.score.filter(|s| s.is_finite())
    }

    pub fn has_exam(&self, exam: &str) -> bool {
        self.qualifying_exams.contains(&fold_exam(exam))
    }
}

/// Normalized form used when comparing exam names
pub fn fold_exam(exam: &str) -> String {
    exam.trim().to_lowercase()
}

/// Admission requirements of a college
///
/// Stored documents may use the legacy `cgpa`/`exam` names, carry both
/// spellings, or hold `null` for unset attributes; all of these parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredEligibility")]
pub struct Eligibility {
    #[serde(rename = "minScore")]
    pub min_score: f64,
    #[serde(rename = "requiredExam")]
    pub required_exam: Option<String>,
}

/// Wire shape of [`Eligibility`] as found in the document store
#[derive(Deserialize)]
struct StoredEligibility {
    #[serde(rename = "minScore", default)]
    min_score: Option<f64>,
    #[serde(default)]
    cgpa: Option<f64>,
    #[serde(rename = "requiredExam", default)]
    required_exam: Option<String>,
    #[serde(default)]
    exam: Option<String>,
}

impl From<StoredEligibility> for Eligibility {
    fn from(stored: StoredEligibility) -> Self {
        Self {
            min_score: stored.min_score.or(stored.cgpa).unwrap_or(0.0),
            required_exam: stored.required_exam.or(stored.exam),
        }
    }
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Eligibility {
    /// Required exam in comparison form, `None` when blank or absent
    pub fn required_exam_folded(&self) -> Option<String> {
        self.required_exam
            .as_deref()
            .map(fold_exam)
            .filter(|exam| !exam.is_empty())
    }
}

/// A college in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    #[serde(alias = "$id")]
    pub id: String,
    pub name: String,
    pub location: String,
    pub fees: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub eligibility: Eligibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub careers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scholarships: Option<serde_json::Value>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl College {
    /// Career tags, treating an empty list the same as no list
    pub fn declared_careers(&self) -> Option<&[String]> {
        self.careers.as_deref().filter(|c| !c.is_empty())
    }
}

/// Auxiliary filters applied before the eligibility rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    #[serde(rename = "maxFees", default)]
    pub max_fees: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub career: Option<String>,
}

impl MatchOptions {
    pub fn max_fees(&self) -> Option<f64> {
        self.max_fees.filter(|f| f.is_finite())
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.is_empty())
    }

    pub fn career(&self) -> Option<&str> {
        self.career.as_deref().filter(|c| !c.is_empty())
    }
}

/// Display fields the presentation layer renders for a matched college
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollegeSummary {
    pub id: String,
    pub name: String,
    pub location: String,
    pub fees: f64,
    #[serde(rename = "minScore")]
    pub min_score: f64,
    #[serde(rename = "requiredExam")]
    pub required_exam: Option<String>,
}

impl From<&College> for CollegeSummary {
    fn from(college: &College) -> Self {
        Self {
            id: college.id.clone(),
            name: college.name.clone(),
            location: college.location.clone(),
            fees: college.fees,
            min_score: college.eligibility.min_score,
            required_exam: college
                .eligibility
                .required_exam
                .clone()
                .filter(|e| !e.trim().is_empty()),
        }
    }
}

/// Why a college was dropped from a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    Location,
    Fees,
    Career,
    Eligibility,
}

/// Per-stage exclusion counters for a match run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionStats {
    pub location: usize,
    pub fees: usize,
    pub career: usize,
    pub eligibility: usize,
    /// Subset of `eligibility` dropped only because the score is unknown
    #[serde(rename = "unknownScore")]
    pub unknown_score: usize,
}

impl ExclusionStats {
    /// Count one college dropped at `stage`
    pub fn record(&mut self, stage: Exclusion) {
        match stage {
            Exclusion::Location => self.location += 1,
            Exclusion::Fees => self.fees += 1,
            Exclusion::Career => self.career += 1,
            Exclusion::Eligibility => self.eligibility += 1,
        }
    }
}

/// Actions written to the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    #[serde(rename = "Added College")]
    AddedCollege,
    #[serde(rename = "Updated College")]
    UpdatedCollege,
    #[serde(rename = "Deleted College")]
    DeletedCollege,
    #[serde(rename = "Added Admin")]
    AddedAdmin,
    #[serde(rename = "User Registered")]
    UserRegistered,
    #[serde(rename = "Completed Aptitude Test")]
    CompletedAptitudeTest,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::AddedCollege => "Added College",
            AuditAction::UpdatedCollege => "Updated College",
            AuditAction::DeletedCollege => "Deleted College",
            AuditAction::AddedAdmin => "Added Admin",
            AuditAction::UserRegistered => "User Registered",
            AuditAction::CompletedAptitudeTest => "Completed Aptitude Test",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored audit log row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: i64,
    #[serde(rename = "actorId")]
    pub actor_id: String,
    pub action: String,
    pub metadata: serde_json::Value,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}
