// Unit tests for Career Compass

use career_compass::core::{
    aptitude::QuestionSet,
    eligibility::{evaluate, is_eligible, is_eligible_opt, Verdict},
    filters::{check_college, check_options},
    normalize::normalize_profile,
};
use career_compass::models::{College, Eligibility, Exclusion, MatchOptions, StudentProfile};
use serde_json::json;
use std::collections::HashMap;

fn create_college(min_score: f64, exam: Option<&str>) -> College {
    College {
        id: "c1".to_string(),
        name: "Test College".to_string(),
        location: "India".to_string(),
        fees: 250000.0,
        eligibility: Eligibility {
            min_score,
            required_exam: exam.map(str::to_string),
        },
        careers: Some(vec!["engineering".to_string()]),
        rank: Some(12),
        scholarships: None,
        created_at: None,
    }
}

#[test]
fn test_normalize_prefers_score_over_cgpa() {
    let profile = normalize_profile(&json!({ "score": 9.0, "cgpa": 6.0 }));
    assert_eq!(profile.score, Some(9.0));
}

#[test]
fn test_normalize_prefers_qualifying_exams_over_exams_taken() {
    let profile = normalize_profile(&json!({
        "cgpa": 8.0,
        "qualifyingExams": ["NEET"],
        "examsTaken": ["JEE Advanced"]
    }));

    assert!(profile.has_exam("neet"));
    assert!(!profile.has_exam("JEE Advanced"));
}

#[test]
fn test_normalize_rejects_unusable_scores() {
    for raw in [
        json!({ "cgpa": "eight" }),
        json!({ "cgpa": true }),
        json!({ "cgpa": [8.0] }),
        json!({ "cgpa": "NaN" }),
        json!({ "cgpa": "inf" }),
    ] {
        assert_eq!(normalize_profile(&raw).score, None, "accepted {}", raw);
    }
}

#[test]
fn test_normalize_skips_non_string_exams() {
    let profile = normalize_profile(&json!({
        "examsTaken": ["SAT", null, { "name": "GRE" }, 2024, "  "]
    }));

    assert_eq!(profile.qualifying_exams.len(), 2);
    assert!(profile.has_exam("sat"));
    assert!(profile.has_exam("2024"));
}

#[test]
fn test_normalize_blank_career_is_none() {
    let profile = normalize_profile(&json!({ "cgpa": 7.0, "career": "   " }));
    assert_eq!(profile.career, None);
}

#[test]
fn test_zero_minimum_accepts_any_finite_score() {
    let college = create_college(0.0, None);

    for score in [0.0, 0.01, 5.5, 10.0, 100.0] {
        assert!(is_eligible(&StudentProfile::new(Some(score)), &college), "rejected {}", score);
    }
}

#[test]
fn test_unknown_score_fails_closed() {
    let college = create_college(0.0, None);

    assert_eq!(evaluate(&StudentProfile::default(), &college), Verdict::UnknownScore);
    assert_eq!(
        evaluate(&StudentProfile::new(Some(f64::NAN)), &college),
        Verdict::UnknownScore
    );
    assert_eq!(
        evaluate(&StudentProfile::new(Some(f64::INFINITY)), &college),
        Verdict::UnknownScore
    );
}

#[test]
fn test_score_rule_runs_before_exam_rule() {
    let college = create_college(8.0, Some("JEE Advanced"));
    let student = StudentProfile::new(Some(7.5));

    assert_eq!(
        evaluate(&student, &college),
        Verdict::BelowMinimumScore {
            score: 7.5,
            min_score: 8.0
        }
    );
}

#[test]
fn test_required_exam_is_case_and_space_insensitive() {
    let college = create_college(8.0, Some("  JEE Advanced "));

    let with_exam = StudentProfile::new(Some(8.0)).with_exam("jee ADVANCED");
    let without_exam = StudentProfile::new(Some(9.9)).with_exam("NEET");

    assert!(is_eligible(&with_exam, &college));
    assert_eq!(
        evaluate(&without_exam, &college),
        Verdict::MissingExam {
            required: "jee advanced".to_string()
        }
    );
}

#[test]
fn test_blank_required_exam_is_ignored() {
    let college = create_college(6.0, Some("   "));
    assert!(is_eligible(&StudentProfile::new(Some(6.0)), &college));
}

#[test]
fn test_missing_inputs_are_ineligible() {
    let college = create_college(0.0, None);
    let student = StudentProfile::new(Some(9.0));

    assert!(is_eligible_opt(Some(&student), Some(&college)));
    assert!(!is_eligible_opt(None, Some(&college)));
    assert!(!is_eligible_opt(Some(&student), None));
    assert!(!is_eligible_opt(None, None));
}

#[test]
fn test_stages_short_circuit_in_order() {
    let college = create_college(9.5, None);
    let student = StudentProfile::new(Some(7.0));

    // Wrong location and over budget: location is reported
    let options = MatchOptions {
        max_fees: Some(100.0),
        location: Some("Abroad".to_string()),
        career: Some("medicine".to_string()),
    };
    assert_eq!(check_options(&college, &options), Err(Exclusion::Location));

    // Right location, over budget, wrong career: fees is reported
    let options = MatchOptions {
        location: Some("India".to_string()),
        ..options
    };
    assert_eq!(check_options(&college, &options), Err(Exclusion::Fees));

    let options = MatchOptions {
        max_fees: None,
        ..options
    };
    assert_eq!(check_options(&college, &options), Err(Exclusion::Career));

    let options = MatchOptions {
        career: Some("engineering".to_string()),
        ..options
    };
    assert_eq!(check_college(&student, &college, &options), Err(Exclusion::Eligibility));
}

#[test]
fn test_empty_option_values_are_unset() {
    let college = create_college(0.0, None);
    let options = MatchOptions {
        max_fees: Some(f64::NAN),
        location: Some(String::new()),
        career: Some(String::new()),
    };

    assert_eq!(check_options(&college, &options), Ok(()));
}

#[test]
fn test_career_match_is_exact() {
    let college = create_college(0.0, None);
    let options = MatchOptions {
        career: Some("Engineering".to_string()),
        ..MatchOptions::default()
    };

    assert_eq!(check_options(&college, &options), Err(Exclusion::Career));
}

#[test]
fn test_question_file_matches_builtin_set() {
    let from_file = QuestionSet::load("config/questions.toml").unwrap();
    assert_eq!(from_file.questions(), QuestionSet::default().questions());
}

#[test]
fn test_public_questions_hide_answers() {
    let set = QuestionSet::default();
    let public = serde_json::to_value(set.public_questions()).unwrap();

    for question in public.as_array().unwrap() {
        assert!(question.get("answer").is_none());
        assert!(question.get("q").is_some());
    }
}

#[test]
fn test_grade_reports_out_of_range_choice() {
    let set = QuestionSet::default();
    let answers: HashMap<String, usize> = [("q1".to_string(), 7)].into_iter().collect();

    let result = set.grade(&answers);

    assert_eq!(result.score, 0);
    assert_eq!(result.details[0].chosen, Some(7));
    assert_eq!(result.details[1].chosen, None);
}
