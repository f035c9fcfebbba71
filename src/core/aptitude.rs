use crate::models::{AnswerDetail, PublicQuestion, Question, TestResult};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a question set
#[derive(Debug, Error)]
pub enum QuestionSetError {
    #[error("Question set is empty")]
    Empty,

    #[error("Duplicate question id: {0}")]
    DuplicateId(String),

    #[error("Question {0} has no options")]
    NoOptions(String),

    #[error("Question {id} answer index {answer} out of range ({options} options)")]
    AnswerOutOfRange {
        id: String,
        answer: usize,
        options: usize,
    },

    #[error("Failed to read question file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse question file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Validated set of aptitude questions
///
/// Passed explicitly to whatever renders or grades a test; there is no
/// global question list.
#[derive(Debug, Clone)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct QuestionFile {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Build a question set, rejecting malformed questions
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionSetError> {
        if questions.is_empty() {
            return Err(QuestionSetError::Empty);
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id.as_str()) {
                return Err(QuestionSetError::DuplicateId(question.id.clone()));
            }
            if question.options.is_empty() {
                return Err(QuestionSetError::NoOptions(question.id.clone()));
            }
            if question.answer >= question.options.len() {
                return Err(QuestionSetError::AnswerOutOfRange {
                    id: question.id.clone(),
                    answer: question.answer,
                    options: question.options.len(),
                });
            }
        }

        Ok(Self { questions })
    }

    /// Parse a TOML document with a `[[questions]]` array
    pub fn from_toml_str(source: &str) -> Result<Self, QuestionSetError> {
        let file: QuestionFile = toml::from_str(source)?;
        Self::new(file.questions)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, QuestionSetError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions with the answer key stripped
    pub fn public_questions(&self) -> Vec<PublicQuestion> {
        self.questions.iter().map(PublicQuestion::from).collect()
    }

    /// Grade submitted answers keyed by question id
    ///
    /// Unanswered questions and out-of-range choices count as wrong; an
    /// out-of-range choice is still reported in the details. Answers for
    /// unknown question ids are ignored.
    pub fn grade(&self, answers: &HashMap<String, usize>) -> TestResult {
        let mut score = 0;

        let details = self
            .questions
            .iter()
            .map(|question| {
                let chosen = answers.get(&question.id).copied();
                if chosen == Some(question.answer) {
                    score += 1;
                }
                AnswerDetail {
                    question_id: question.id.clone(),
                    chosen,
                    correct: question.answer,
                }
            })
            .collect();

        TestResult {
            score,
            total: self.questions.len(),
            details,
        }
    }
}

impl Default for QuestionSet {
    /// Small built-in sample test
    fn default() -> Self {
        let question = |id: &str, q: &str, options: [&str; 3], answer: usize| Question {
            id: id.to_string(),
            q: q.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer,
        };

        Self {
            questions: vec![
                question("q1", "2 + 2 = ?", ["3", "4", "5"], 1),
                question("q2", "Capital of India?", ["Delhi", "Mumbai", "Kolkata"], 0),
                question("q3", "Synonym of 'Happy'?", ["Sad", "Joyful", "Angry"], 1),
            ],
        }
    }
}
