use crate::models::{College, StudentProfile};

/// Outcome of checking one student against one college's requirements
///
/// Ineligible outcomes name the first rule that failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Eligible,
    /// The student has no usable score; fails closed even for a zero minimum
    UnknownScore,
    BelowMinimumScore { score: f64, min_score: f64 },
    MissingExam { required: String },
}

impl Verdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Verdict::Eligible)
    }
}

/// Apply the eligibility rules in order, stopping at the first failure
///
/// 1. Score must be known and finite.
/// 2. Score must be at least the college's minimum (default 0).
/// 3. A non-blank required exam must be among the student's exams,
///    compared trimmed and case-insensitively.
pub fn evaluate(student: &StudentProfile, college: &College) -> Verdict {
    let min_score = college.eligibility.min_score;

    let Some(score) = student.known_score() else {
        return Verdict::UnknownScore;
    };

    // A NaN minimum never rejects
    if score < min_score {
        return Verdict::BelowMinimumScore { score, min_score };
    }

    if let Some(required) = college.eligibility.required_exam_folded() {
        if !student.qualifying_exams.contains(&required) {
            return Verdict::MissingExam { required };
        }
    }

    Verdict::Eligible
}

/// Check whether a student meets a college's admission requirements
#[inline]
pub fn is_eligible(student: &StudentProfile, college: &College) -> bool {
    evaluate(student, college).is_eligible()
}

/// Boundary form of [`is_eligible`] for callers holding optional values
///
/// A missing student or college is never eligible.
pub fn is_eligible_opt(student: Option<&StudentProfile>, college: Option<&College>) -> bool {
    match (student, college) {
        (Some(student), Some(college)) => is_eligible(student, college),
        _ => false,
    }
}
