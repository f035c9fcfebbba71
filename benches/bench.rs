// Criterion benchmarks for Career Compass

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use career_compass::core::{filter_colleges, normalize_profile, Matcher};
use career_compass::models::{College, Eligibility, MatchOptions, StudentProfile};
use serde_json::json;

const EXAMS: [&str; 4] = ["JEE Advanced", "NEET", "SAT", "CLAT"];
const CAREERS: [&str; 4] = ["engineering", "medicine", "law", "research"];

fn create_college(id: usize) -> College {
    College {
        id: id.to_string(),
        name: format!("College {}", id),
        location: if id % 3 == 0 { "Abroad" } else { "India" }.to_string(),
        fees: 50_000.0 + (id % 40) as f64 * 50_000.0,
        eligibility: Eligibility {
            min_score: 5.0 + (id % 50) as f64 / 10.0,
            required_exam: (id % 2 == 0).then(|| EXAMS[id % EXAMS.len()].to_string()),
        },
        careers: (id % 5 != 0).then(|| vec![CAREERS[id % CAREERS.len()].to_string()]),
        rank: Some(id as u32),
        scholarships: None,
        created_at: None,
    }
}

fn create_student() -> StudentProfile {
    StudentProfile::new(Some(8.2))
        .with_exam("JEE Advanced")
        .with_exam("SAT")
        .with_career("engineering")
}

fn create_options() -> MatchOptions {
    MatchOptions {
        max_fees: Some(1_000_000.0),
        location: Some("India".to_string()),
        career: Some("engineering".to_string()),
    }
}

fn bench_normalize_profile(c: &mut Criterion) {
    let raw = json!({
        "cgpa": "8.2",
        "examsTaken": ["JEE Advanced", " sat ", 2024],
        "career": "engineering"
    });

    c.bench_function("normalize_profile", |b| {
        b.iter(|| normalize_profile(black_box(&raw)));
    });
}

fn bench_filter_colleges(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_colleges");
    let student = create_student();
    let options = create_options();

    for size in [100, 1000, 10000].iter() {
        let catalog: Vec<College> = (0..*size).map(create_college).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| filter_colleges(black_box(&student), black_box(&catalog), black_box(&options)));
        });
    }

    group.finish();
}

fn bench_find_matches(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_matches");
    let matcher = Matcher::default();
    let student = create_student();
    let options = create_options();

    for size in [100, 1000, 10000].iter() {
        let catalog: Vec<College> = (0..*size).map(create_college).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                matcher.find_matches(
                    black_box(&student),
                    black_box(catalog.clone()),
                    black_box(&options),
                    Some(50),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize_profile,
    bench_filter_colleges,
    bench_find_matches
);
criterion_main!(benches);
