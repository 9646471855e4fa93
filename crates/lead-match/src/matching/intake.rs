use super::domain::{BedroomRange, CustomerProfile, CustomerSubmission};

/// Validation errors raised while turning form data into a profile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("customer name is required")]
    MissingName,
    #[error("a valid email address is required")]
    InvalidEmail,
    #[error("monthly income must be a non-negative number (found {0})")]
    InvalidIncome(f64),
    #[error("existing monthly debt must be a non-negative number (found {0})")]
    InvalidDebt(f64),
    #[error("bedroom range is inverted (min {min} > max {max})")]
    InvertedBedroomRange { min: u8, max: u8 },
}

/// Guard producing well-formed `CustomerProfile` values from submissions.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn profile_from_submission(
        &self,
        submission: &CustomerSubmission,
    ) -> Result<CustomerProfile, IntakeViolation> {
        if submission.name.trim().is_empty() {
            return Err(IntakeViolation::MissingName);
        }

        let email = submission.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(IntakeViolation::InvalidEmail);
        }

        self.normalize_profile(CustomerProfile {
            intent: submission.intent,
            monthly_income: submission.monthly_income,
            existing_monthly_debt: submission.existing_monthly_debt,
            bedroom_range: BedroomRange::new(submission.bedrooms_min, submission.bedrooms_max),
            preferred_communities: submission.preferred_communities.clone(),
            must_have_amenities: submission.must_have_amenities.clone(),
            nice_to_have_amenities: submission.nice_to_have_amenities.clone(),
        })
    }

    /// Check the financial fields and bedroom range of a profile built
    /// elsewhere, then clean its preference lists.
    pub fn normalize_profile(
        &self,
        profile: CustomerProfile,
    ) -> Result<CustomerProfile, IntakeViolation> {
        if !profile.monthly_income.is_finite() || profile.monthly_income < 0.0 {
            return Err(IntakeViolation::InvalidIncome(profile.monthly_income));
        }

        if !profile.existing_monthly_debt.is_finite() || profile.existing_monthly_debt < 0.0 {
            return Err(IntakeViolation::InvalidDebt(profile.existing_monthly_debt));
        }

        let BedroomRange { min, max } = profile.bedroom_range;
        if min > max {
            return Err(IntakeViolation::InvertedBedroomRange { min, max });
        }

        Ok(CustomerProfile {
            preferred_communities: dedup_labels(&profile.preferred_communities),
            must_have_amenities: dedup_labels(&profile.must_have_amenities),
            nice_to_have_amenities: dedup_labels(&profile.nice_to_have_amenities),
            ..profile
        })
    }
}

/// Trim, drop blanks and collapse duplicates, keeping first occurrence order.
fn dedup_labels(values: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !seen.iter().any(|existing| existing == trimmed) {
            seen.push(trimmed.to_string());
        }
    }
    seen
}
