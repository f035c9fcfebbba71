//! Career Compass - College eligibility matching service
//!
//! This library provides the matching core used by the Career Compass
//! guidance app: a student profile normalizer, a fail-closed eligibility
//! evaluator and an order-preserving college filter, plus the services
//! and HTTP routes built around them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{filter_colleges, is_eligible, is_eligible_opt, normalize_profile, Matcher, QuestionSet};
pub use models::{College, Eligibility, ExclusionStats, MatchOptions, StudentProfile};
