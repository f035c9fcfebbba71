use crate::core::eligibility::{evaluate, Verdict};
use crate::core::filters::check_options;
use crate::models::{College, Exclusion, ExclusionStats, MatchOptions, StudentProfile};

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<College>,
    pub total_candidates: usize,
    pub excluded: ExclusionStats,
}

/// Result size bounds applied by the matcher
#[derive(Debug, Clone, Copy)]
pub struct MatchLimits {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for MatchLimits {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_limit: 200,
        }
    }
}

/// Matching orchestrator: runs the filter pipeline over a candidate list
///
/// # Pipeline Stages
/// 1. Location filter
/// 2. Fee ceiling
/// 3. Career tag
/// 4. Eligibility rules
///
/// Unlike [`crate::core::filters::filter_colleges`] it takes ownership of the
/// candidates and records why each dropped college was excluded.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    limits: MatchLimits,
}

impl Matcher {
    pub fn new(limits: MatchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> MatchLimits {
        self.limits
    }

    /// Resolve a requested limit against the configured bounds
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.limits.default_limit)
            .min(self.limits.max_limit)
    }

    /// Find the colleges a student can be recommended
    ///
    /// # Arguments
    /// * `student` - Normalized student profile
    /// * `candidates` - Colleges from the catalog source
    /// * `options` - Location, fee and career filters
    /// * `limit` - Maximum number of matches to return (`None` for the default)
    ///
    /// # Returns
    /// MatchResult with kept colleges in catalog order
    pub fn find_matches(
        &self,
        student: &StudentProfile,
        candidates: Vec<College>,
        options: &MatchOptions,
        limit: Option<usize>,
    ) -> MatchResult {
        let total_candidates = candidates.len();
        let limit = self.effective_limit(limit);
        let mut excluded = ExclusionStats::default();

        let mut matches: Vec<College> = candidates
            .into_iter()
            .filter(|college| {
                if let Err(stage) = check_options(college, options) {
                    excluded.record(stage);
                    return false;
                }

                match evaluate(student, college) {
                    Verdict::Eligible => true,
                    verdict => {
                        if verdict == Verdict::UnknownScore {
                            excluded.unknown_score += 1;
                        }
                        excluded.record(Exclusion::Eligibility);
                        false
                    }
                }
            })
            .collect();

        matches.truncate(limit);

        tracing::debug!(
            "Matched {} of {} colleges (excluded: {:?})",
            matches.len(),
            total_candidates,
            excluded
        );

        MatchResult {
            matches,
            total_candidates,
            excluded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Eligibility;

    fn create_candidate(id: &str, location: &str, fees: f64, min_score: f64) -> College {
        College {
            id: id.to_string(),
            name: format!("College {}", id),
            location: location.to_string(),
            fees,
            eligibility: Eligibility {
                min_score,
                required_exam: None,
            },
            careers: None,
            rank: None,
            scholarships: None,
            created_at: None,
        }
    }

    #[test]
    fn test_find_matches_basic() {
        let matcher = Matcher::default();
        let student = StudentProfile::new(Some(8.0));

        let candidates = vec![
            create_candidate("1", "India", 1000.0, 7.0),  // Match
            create_candidate("2", "India", 1000.0, 9.0),  // Score too low
            create_candidate("3", "Abroad", 1000.0, 7.0), // Wrong location
            create_candidate("4", "India", 5000.0, 7.0),  // Too expensive
        ];
        let options = MatchOptions {
            location: Some("India".to_string()),
            max_fees: Some(2000.0),
            career: None,
        };

        let result = matcher.find_matches(&student, candidates, &options, None);

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].id, "1");
        assert_eq!(result.total_candidates, 4);
        assert_eq!(result.excluded.location, 1);
        assert_eq!(result.excluded.fees, 1);
        assert_eq!(result.excluded.eligibility, 1);
        assert_eq!(result.excluded.unknown_score, 0);
    }

    #[test]
    fn test_unknown_score_counted_separately() {
        let matcher = Matcher::default();
        let student = StudentProfile::default();

        let candidates = vec![
            create_candidate("1", "India", 1000.0, 0.0),
            create_candidate("2", "India", 1000.0, 5.0),
        ];

        let result = matcher.find_matches(&student, candidates, &MatchOptions::default(), None);

        assert!(result.matches.is_empty());
        assert_eq!(result.excluded.eligibility, 2);
        assert_eq!(result.excluded.unknown_score, 2);
    }

    #[test]
    fn test_respects_limit_and_order() {
        let matcher = Matcher::default();
        let student = StudentProfile::new(Some(10.0));

        let candidates: Vec<College> = (0..20)
            .map(|i| create_candidate(&i.to_string(), "India", 100.0, 0.0))
            .collect();

        let result = matcher.find_matches(&student, candidates, &MatchOptions::default(), Some(5));

        let ids: Vec<&str> = result.matches.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_every_stage_is_counted() {
        let matcher = Matcher::default();
        let student = StudentProfile::new(Some(8.0)).with_exam("NEET");

        let mut needs_exam = create_candidate("5", "India", 100.0, 7.0);
        needs_exam.eligibility.required_exam = Some("JEE Advanced".to_string());
        let mut wrong_career = create_candidate("4", "India", 100.0, 0.0);
        wrong_career.careers = Some(vec!["law".to_string()]);

        let candidates = vec![
            create_candidate("1", "Abroad", 100.0, 0.0),
            create_candidate("2", "India", 9000.0, 0.0),
            create_candidate("3", "India", 100.0, 9.0),
            wrong_career,
            needs_exam,
            create_candidate("6", "India", 100.0, 8.0),
        ];
        let options = MatchOptions {
            location: Some("India".to_string()),
            max_fees: Some(1000.0),
            career: Some("medicine".to_string()),
        };

        let result = matcher.find_matches(&student, candidates, &options, None);

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].id, "6");
        assert_eq!(
            result.excluded,
            ExclusionStats {
                location: 1,
                fees: 1,
                career: 1,
                eligibility: 2,
                unknown_score: 0,
            }
        );
    }

    #[test]
    fn test_effective_limit_is_capped() {
        let matcher = Matcher::new(MatchLimits {
            default_limit: 10,
            max_limit: 25,
        });

        assert_eq!(matcher.effective_limit(None), 10);
        assert_eq!(matcher.effective_limit(Some(3)), 3);
        assert_eq!(matcher.effective_limit(Some(1000)), 25);
    }
}
