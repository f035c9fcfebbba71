use crate::models::StudentProfile;
use serde_json::Value;

/// Field names accepted for the student's grade metric, in priority order
const SCORE_FIELDS: [&str; 2] = ["score", "cgpa"];

/// Field names accepted for the student's exam list, in priority order
const EXAM_FIELDS: [&str; 2] = ["qualifyingExams", "examsTaken"];

/// Coerce a raw student document into a [`StudentProfile`]
///
/// Never fails: anything missing or malformed resolves to "unknown"
/// (no score, no exams, no career). Non-object input yields the empty profile.
pub fn normalize_profile(raw: &Value) -> StudentProfile {
    let Some(fields) = raw.as_object() else {
        return StudentProfile::default();
    };

    let score = SCORE_FIELDS
        .iter()
        .find_map(|field| fields.get(*field).and_then(coerce_score));

    let mut profile = StudentProfile::new(score);

    if let Some(exams) = EXAM_FIELDS
        .iter()
        .find_map(|field| fields.get(*field).and_then(Value::as_array))
    {
        for exam in exams {
            match exam {
                Value::String(name) => profile = profile.with_exam(name),
                Value::Number(n) => profile = profile.with_exam(&n.to_string()),
                _ => {}
            }
        }
    }

    if let Some(career) = fields.get("career").and_then(Value::as_str) {
        profile = profile.with_career(career);
    }

    profile
}

/// Accept JSON numbers and strings holding a finite number
fn coerce_score(value: &Value) -> Option<f64> {
    let score = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    score.filter(|s| s.is_finite())
}
