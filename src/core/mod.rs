// Core algorithm exports
pub mod aptitude;
pub mod eligibility;
pub mod filters;
pub mod matcher;
pub mod normalize;

pub use aptitude::{QuestionSet, QuestionSetError};
pub use eligibility::{evaluate, is_eligible, is_eligible_opt, Verdict};
pub use filters::{check_college, check_options, filter_colleges};
pub use matcher::{MatchLimits, MatchResult, Matcher};
pub use normalize::normalize_profile;
