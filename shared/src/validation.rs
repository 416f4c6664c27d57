//! Profile validation
//!
//! The validator is the authoritative server-side gate in front of the
//! calculator. It runs on already-sanitized, range-correct fields but still
//! catches the cross-field inconsistencies per-field clamping cannot
//! express, most importantly target weight vs. current weight. Checks run
//! in a fixed order and stop at the first violation.

use crate::types::Profile;
use thiserror::Error;

/// A single validation failure with field context
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Validate a profile, stopping at the first violation
///
/// Check order: body stats, target vs. current weight, timeframe, cardio
/// modality selection, schedule. The modality check is enforced here even
/// though the sanitizer guarantees non-emptiness: the client-side and
/// server-side layers sit on different trust boundaries and must not
/// silently diverge.
pub fn validate_profile(profile: &Profile) -> Result<(), ValidationError> {
    if !(16..=80).contains(&profile.age) {
        return Err(ValidationError::new(
            "age",
            "Please enter a valid age (16-80)",
        ));
    }
    if !(140..=220).contains(&profile.height_cm) {
        return Err(ValidationError::new(
            "height_cm",
            "Please enter a valid height (140-220 cm)",
        ));
    }
    if !profile.weight_kg.is_finite() || profile.weight_kg < 40.0 {
        return Err(ValidationError::new(
            "weight_kg",
            "Please enter your current weight",
        ));
    }
    if !profile.target_weight_kg.is_finite() || profile.target_weight_kg < 40.0 {
        return Err(ValidationError::new(
            "target_weight_kg",
            "Please enter your target weight",
        ));
    }
    if profile.target_weight_kg >= profile.weight_kg {
        return Err(ValidationError::new(
            "target_weight_kg",
            "Target weight should be less than current weight",
        ));
    }
    if !(4..=24).contains(&profile.weeks) {
        return Err(ValidationError::new(
            "weeks",
            "Please enter a timeframe between 4-24 weeks",
        ));
    }
    if profile.cardio_modalities.is_empty() {
        return Err(ValidationError::new(
            "cardio_modalities",
            "Please select at least one cardio option",
        ));
    }
    if !(2..=7).contains(&profile.days_per_week) {
        return Err(ValidationError::new(
            "days_per_week",
            "Please enter days per week (2-7)",
        ));
    }
    if !(15..=120).contains(&profile.minutes_per_session) {
        return Err(ValidationError::new(
            "minutes_per_session",
            "Please enter session duration (15-120 minutes)",
        ));
    }
    Ok(())
}
