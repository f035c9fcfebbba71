use serde::{Deserialize, Serialize};

/// A multiple-choice aptitude question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// Prompt text
    pub q: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct choice
    pub answer: usize,
}

/// Question as shown to a test taker, without the answer key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: String,
    pub q: String,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            q: question.q.clone(),
            options: question.options.clone(),
        }
    }
}

/// Grading outcome for one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerDetail {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub chosen: Option<usize>,
    pub correct: usize,
}

/// Graded aptitude test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub score: usize,
    pub total: usize,
    pub details: Vec<AnswerDetail>,
}

/// Test result as stored in the `tests` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecord {
    #[serde(rename = "studentId")]
    pub student_id: String,
    pub score: usize,
    pub total: usize,
    pub details: Vec<AnswerDetail>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl TestRecord {
    pub fn new(student_id: &str, result: &TestResult) -> Self {
        Self {
            student_id: student_id.to_string(),
            score: result.score,
            total: result.total,
            details: result.details.clone(),
            created_at: chrono::Utc::now(),
        }
    }
}
