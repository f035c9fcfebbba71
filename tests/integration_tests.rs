// Integration tests for Career Compass

use career_compass::core::{filter_colleges, is_eligible, normalize_profile, MatchLimits, Matcher};
use career_compass::models::{College, MatchOptions};
use serde_json::json;

fn parse_colleges(value: serde_json::Value) -> Vec<College> {
    serde_json::from_value(value).expect("valid college documents")
}

fn create_catalog() -> Vec<College> {
    parse_colleges(json!([
        {
            "$id": "1",
            "name": "IIT Bombay",
            "location": "India",
            "fees": 500000,
            "eligibility": { "minScore": 8.0, "requiredExam": "JEE Advanced" },
            "careers": ["engineering"]
        },
        {
            "$id": "2",
            "name": "MIT",
            "location": "Abroad",
            "fees": 2000000,
            "eligibility": { "minScore": 9.0 },
            "careers": ["engineering", "research"]
        },
        {
            "$id": "3",
            "name": "Delhi University",
            "location": "India",
            "fees": 80000,
            "eligibility": { "minScore": 6.0 }
        },
        {
            "$id": "4",
            "name": "AIIMS",
            "location": "India",
            "fees": 150000,
            "eligibility": { "minScore": 8.0, "requiredExam": "NEET" },
            "careers": ["medicine"]
        },
        {
            "$id": "5",
            "name": "Open College",
            "location": "India",
            "fees": 1000000,
            "eligibility": { "minScore": 0 },
            "careers": []
        }
    ]))
}

fn ids(colleges: &[&College]) -> Vec<String> {
    colleges.iter().map(|c| c.id.clone()).collect()
}

#[test]
fn test_integration_jee_student_under_fee_ceiling() {
    let student = normalize_profile(&json!({ "score": 8.5, "qualifyingExams": ["JEE Advanced"] }));
    let catalog = parse_colleges(json!([
        {
            "$id": "1",
            "name": "College 1",
            "location": "India",
            "fees": 500000,
            "eligibility": { "minScore": 8.0, "requiredExam": "JEE Advanced" }
        },
        {
            "$id": "2",
            "name": "College 2",
            "location": "Abroad",
            "fees": 2000000,
            "eligibility": { "minScore": 9.0 }
        }
    ]));
    let options = MatchOptions {
        max_fees: Some(1_000_000.0),
        ..MatchOptions::default()
    };

    let result = filter_colleges(&student, &catalog, &options);

    assert_eq!(ids(&result), vec!["1"]);
}

#[test]
fn test_integration_null_score_is_never_eligible() {
    let student = normalize_profile(&json!({ "score": null, "qualifyingExams": ["JEE Advanced"] }));

    for college in create_catalog() {
        assert!(!is_eligible(&student, &college), "college {} accepted a null score", college.id);
    }
}

#[test]
fn test_integration_missing_careers_do_not_exclude() {
    let student = normalize_profile(&json!({ "cgpa": 7.0 }));
    let catalog = create_catalog();
    let options = MatchOptions {
        career: Some("engineering".to_string()),
        ..MatchOptions::default()
    };

    let result = filter_colleges(&student, &catalog, &options);

    // 3 declares no careers, 5 declares an empty list
    assert_eq!(ids(&result), vec!["3", "5"]);
}

#[test]
fn test_integration_output_is_ordered_subsequence() {
    let student = normalize_profile(&json!({
        "cgpa": "9.2",
        "examsTaken": ["jee advanced", "NEET"]
    }));
    let catalog = create_catalog();

    let result = filter_colleges(&student, &catalog, &MatchOptions::default());

    let mut positions = result
        .iter()
        .map(|kept| catalog.iter().position(|c| c.id == kept.id).expect("kept college comes from input"));
    let mut last = positions.next().expect("at least one match");
    for position in positions {
        assert!(position > last);
        last = position;
    }
    assert_eq!(ids(&result), vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn test_integration_empty_options_equal_eligibility_only() {
    let catalog = create_catalog();
    let students = [
        json!({ "cgpa": 8.5, "examsTaken": ["JEE Advanced"] }),
        json!({ "cgpa": 6.5 }),
        json!({ "score": 0 }),
        json!({}),
    ];

    for raw in students {
        let student = normalize_profile(&raw);
        let filtered = filter_colleges(&student, &catalog, &MatchOptions::default());
        let expected: Vec<&College> = catalog.iter().filter(|c| is_eligible(&student, c)).collect();
        assert_eq!(filtered, expected, "mismatch for {}", raw);
    }
}

#[test]
fn test_integration_filter_is_idempotent() {
    let student = normalize_profile(&json!({ "cgpa": 8.1, "examsTaken": ["NEET"] }));
    let catalog = create_catalog();
    let options = MatchOptions {
        max_fees: Some(1_000_000.0),
        location: Some("India".to_string()),
        career: None,
    };

    let once = filter_colleges(&student, &catalog, &options);
    let twice = filter_colleges(&student, once.iter().copied(), &options);

    assert_eq!(once, twice);
    assert_eq!(ids(&once), vec!["3", "4", "5"]);
}

#[test]
fn test_integration_duplicates_are_kept() {
    let student = normalize_profile(&json!({ "cgpa": 7.0 }));
    let catalog = create_catalog();
    let doubled = [&catalog[2], &catalog[2]];

    let result = filter_colleges(&student, doubled, &MatchOptions::default());

    assert_eq!(ids(&result), vec!["3", "3"]);
}

#[test]
fn test_integration_matcher_end_to_end() {
    let matcher = Matcher::new(MatchLimits {
        default_limit: 2,
        max_limit: 10,
    });
    let student = normalize_profile(&json!({ "cgpa": 8.5, "examsTaken": [" jee advanced "] }));
    let options = MatchOptions {
        max_fees: Some(1_000_000.0),
        location: Some("India".to_string()),
        career: Some("engineering".to_string()),
    };

    let result = matcher.find_matches(&student, create_catalog(), &options, None);

    assert_eq!(result.total_candidates, 5);
    assert_eq!(result.matches.len(), 2);
    assert_eq!(result.matches[0].id, "1");
    assert_eq!(result.matches[1].id, "3");
    assert_eq!(result.excluded.location, 1);
    assert_eq!(result.excluded.career, 1);
    assert_eq!(result.excluded.eligibility, 0);
}

#[test]
fn test_integration_matcher_reports_unknown_scores() {
    let matcher = Matcher::default();
    let student = normalize_profile(&json!({ "examsTaken": ["NEET"] }));

    let result = matcher.find_matches(&student, create_catalog(), &MatchOptions::default(), Some(50));

    assert!(result.matches.is_empty());
    assert_eq!(result.excluded.eligibility, 5);
    assert_eq!(result.excluded.unknown_score, 5);
}
