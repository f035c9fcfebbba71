use crate::core::eligibility::is_eligible;
use crate::models::{College, Exclusion, MatchOptions, StudentProfile};

/// Check a college against the auxiliary match options
///
/// Stages run in order: location, fee ceiling, career tag. Returns the
/// first stage that rejects the college.
#[inline]
pub fn check_options(college: &College, options: &MatchOptions) -> Result<(), Exclusion> {
    if let Some(location) = options.location() {
        if college.location != location {
            return Err(Exclusion::Location);
        }
    }

    // Inclusive ceiling
    if let Some(max_fees) = options.max_fees() {
        if college.fees > max_fees {
            return Err(Exclusion::Fees);
        }
    }

    // A college with no career tags makes no claim, so it is not excluded
    if let (Some(career), Some(careers)) = (options.career(), college.declared_careers()) {
        if !careers.iter().any(|c| c == career) {
            return Err(Exclusion::Career);
        }
    }

    Ok(())
}

/// Run every filter stage for one college
#[inline]
pub fn check_college(
    student: &StudentProfile,
    college: &College,
    options: &MatchOptions,
) -> Result<(), Exclusion> {
    check_options(college, options)?;

    if !is_eligible(student, college) {
        return Err(Exclusion::Eligibility);
    }

    Ok(())
}

/// Filter colleges by the student's eligibility and the match options
///
/// Stable: the result is a subsequence of the input in its original order.
/// Duplicates in the input stay duplicated; nothing is mutated.
pub fn filter_colleges<'a, I>(
    student: &StudentProfile,
    colleges: I,
    options: &MatchOptions,
) -> Vec<&'a College>
where
    I: IntoIterator<Item = &'a College>,
{
    colleges
        .into_iter()
        .filter(|college| check_college(student, college, options).is_ok())
        .collect()
}
