//! Core data model: the validated user profile and derived targets
//!
//! All enums serialize to the lowercase / snake_case wire names used by the
//! form payload, so serde's exact-match deserialization doubles as the
//! "exact member of the allowed set" check in the sanitizer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex for energy calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Hard daily-calorie floor applied after all deficit caps
    pub fn min_calories(&self) -> i32 {
        match self {
            Sex::Male => 1500,
            Sex::Female => 1200,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resistance-training experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrainingLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl TrainingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingLevel::Beginner => "beginner",
            TrainingLevel::Intermediate => "intermediate",
            TrainingLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for TrainingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise, physical job
    VeryActive,
}

impl ActivityLevel {
    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prior cardio experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardioExperience {
    #[default]
    None,
    Some,
    Experienced,
}

impl CardioExperience {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardioExperience::None => "none",
            CardioExperience::Some => "some",
            CardioExperience::Experienced => "experienced",
        }
    }
}

impl fmt::Display for CardioExperience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cardio exercise type the user has access to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardioModality {
    Walking,
    Running,
    StationaryBike,
    OutdoorCycling,
    Swimming,
    Elliptical,
}

impl CardioModality {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardioModality::Walking => "walking",
            CardioModality::Running => "running",
            CardioModality::StationaryBike => "stationary_bike",
            CardioModality::OutdoorCycling => "outdoor_cycling",
            CardioModality::Swimming => "swimming",
            CardioModality::Elliptical => "elliptical",
        }
    }
}

impl fmt::Display for CardioModality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The validated, bounded user record consumed by the calculator
///
/// Every numeric field lies within its documented closed range once the
/// sanitizer has run; the validator catches cross-field inconsistencies
/// the per-field clamping cannot express.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub age: i32,
    pub sex: Sex,
    pub height_cm: i32,
    pub weight_kg: f64,
    pub target_weight_kg: f64,
    pub weeks: i32,
    pub training_level: TrainingLevel,
    pub activity_level: ActivityLevel,
    pub cardio_experience: CardioExperience,
    pub cardio_modalities: Vec<CardioModality>,
    pub gym_access: bool,
    pub days_per_week: i32,
    pub minutes_per_session: i32,
    pub injuries: String,
    pub medical: String,
    pub dietary: String,
}

/// Energy and macro targets derived from a profile
///
/// Recomputed fresh for every request and consumed immediately; never
/// cached or persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    /// Basal metabolic rate, kcal/day
    pub bmr: i32,
    /// Total daily energy expenditure, kcal/day
    pub tdee: i32,
    /// Daily calorie target after caps and the sex-based floor
    pub daily_calories: i32,
    /// TDEE minus the final calorie target (never negative)
    pub deficit: i32,
    pub deficit_percent: i32,
    pub protein_g: i32,
    pub fat_g: i32,
    pub carbs_g: i32,
    /// Achievable loss rate at the final calorie target, kg/week
    pub weekly_loss_kg: f64,
    pub total_loss_kg: f64,
    /// At most one safety note per request; the calorie-floor note takes
    /// precedence over the deficit-cap notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Response payload for a successful program generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub calculations: Calculation,
    /// Raw prose returned by the generation collaborator; rendering is a
    /// presentation concern
    pub program: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"female\"");
        assert_eq!(
            serde_json::to_string(&ActivityLevel::VeryActive).unwrap(),
            "\"very_active\""
        );
        assert_eq!(
            serde_json::to_string(&CardioModality::StationaryBike).unwrap(),
            "\"stationary_bike\""
        );
    }

    #[test]
    fn test_activity_multipliers() {
        assert_eq!(ActivityLevel::Sedentary.multiplier(), 1.2);
        assert_eq!(ActivityLevel::Light.multiplier(), 1.375);
        assert_eq!(ActivityLevel::Moderate.multiplier(), 1.55);
        assert_eq!(ActivityLevel::Active.multiplier(), 1.725);
        assert_eq!(ActivityLevel::VeryActive.multiplier(), 1.9);
    }

    #[test]
    fn test_calorie_floor_by_sex() {
        assert_eq!(Sex::Male.min_calories(), 1500);
        assert_eq!(Sex::Female.min_calories(), 1200);
    }

    #[test]
    fn test_warning_omitted_when_none() {
        let calc = Calculation {
            bmr: 1880,
            tdee: 2914,
            daily_calories: 2164,
            deficit: 750,
            deficit_percent: 26,
            protein_g: 160,
            fat_g: 72,
            carbs_g: 219,
            weekly_loss_kg: 0.68,
            total_loss_kg: 10.0,
            warning: None,
        };
        let json = serde_json::to_string(&calc).unwrap();
        assert!(!json.contains("warning"));
    }
}
