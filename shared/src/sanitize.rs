//! Input sanitation for the untyped form payload
//!
//! The sanitizer is intentionally total: it never fails, whatever shape the
//! inbound JSON takes. Unknown or malformed values are replaced by a
//! documented per-field fallback, everything else is clamped into its closed
//! range, so all downstream logic operates on a bounded domain.

use crate::types::{CardioModality, Profile};
use regex_lite::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Maximum length of the free-text constraint fields
pub const MAX_TEXT_LEN: usize = 200;

/// Maximum number of cardio modalities kept from the input array
pub const MAX_MODALITIES: usize = 6;

// Fallbacks substituted when a field is absent or unparseable
pub const DEFAULT_AGE: i32 = 30;
pub const DEFAULT_HEIGHT_CM: i32 = 170;
pub const DEFAULT_WEIGHT_KG: f64 = 80.0;
pub const DEFAULT_TARGET_WEIGHT_KG: f64 = 70.0;
pub const DEFAULT_WEEKS: i32 = 12;
pub const DEFAULT_DAYS_PER_WEEK: i32 = 4;
pub const DEFAULT_MINUTES_PER_SESSION: i32 = 45;

/// Coerce an arbitrary JSON value into a bounded, well-typed profile
///
/// Accepts anything: missing fields, wrong types, hostile strings. The
/// result always satisfies the documented per-field ranges, and running the
/// sanitizer over an already-sanitized profile is a no-op.
pub fn sanitize_inputs(raw: &Value) -> Profile {
    let field = |name: &str| raw.get(name);

    Profile {
        age: int_in_range(field("age"), 16, 80, DEFAULT_AGE),
        sex: enum_or_default(field("sex")),
        height_cm: int_in_range(field("height_cm"), 140, 220, DEFAULT_HEIGHT_CM),
        weight_kg: number_in_range(field("weight_kg"), 40.0, 300.0, DEFAULT_WEIGHT_KG),
        target_weight_kg: number_in_range(
            field("target_weight_kg"),
            40.0,
            300.0,
            DEFAULT_TARGET_WEIGHT_KG,
        ),
        weeks: int_in_range(field("weeks"), 4, 24, DEFAULT_WEEKS),
        training_level: enum_or_default(field("training_level")),
        activity_level: enum_or_default(field("activity_level")),
        cardio_experience: enum_or_default(field("cardio_experience")),
        cardio_modalities: sanitize_modalities(field("cardio_modalities")),
        gym_access: matches!(field("gym_access"), Some(Value::Bool(true))),
        days_per_week: int_in_range(field("days_per_week"), 2, 7, DEFAULT_DAYS_PER_WEEK),
        minutes_per_session: int_in_range(
            field("minutes_per_session"),
            15,
            120,
            DEFAULT_MINUTES_PER_SESSION,
        ),
        injuries: sanitize_text(field("injuries")),
        medical: sanitize_text(field("medical")),
        dietary: sanitize_text(field("dietary")),
    }
}

/// Coerce to a finite number, then clamp into [min, max]
///
/// Numeric strings are accepted the way a lenient form boundary would; any
/// other shape falls back to the documented default.
fn number_in_range(value: Option<&Value>, min: f64, max: f64, fallback: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => n.clamp(min, max),
        _ => fallback,
    }
}

fn int_in_range(value: Option<&Value>, min: i32, max: i32, fallback: i32) -> i32 {
    number_in_range(value, f64::from(min), f64::from(max), f64::from(fallback)).round() as i32
}

/// Pass through only exact members of the enum's wire-name set
fn enum_or_default<T: DeserializeOwned + Default>(value: Option<&Value>) -> T {
    value
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

/// Filter to recognized modalities, dedupe, keep at most six
///
/// An absent field, a non-array, or an array that filters to nothing all
/// substitute the single-element walking default.
fn sanitize_modalities(value: Option<&Value>) -> Vec<CardioModality> {
    let mut kept = Vec::new();
    if let Some(Value::Array(items)) = value {
        for item in items {
            if kept.len() == MAX_MODALITIES {
                break;
            }
            if let Ok(modality) = serde_json::from_value::<CardioModality>(item.clone()) {
                if !kept.contains(&modality) {
                    kept.push(modality);
                }
            }
        }
    }
    if kept.is_empty() {
        kept.push(CardioModality::Walking);
    }
    kept
}

/// Truncate, strip angle brackets, trim; non-strings become empty
fn sanitize_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => {
            let stripped: String = s
                .chars()
                .take(MAX_TEXT_LEN)
                .filter(|c| *c != '<' && *c != '>')
                .collect();
            stripped.trim().to_string()
        }
        _ => String::new(),
    }
}

/// Scan the raw payload for injection-looking content
///
/// Returns a label for logging. This never rejects the request: the
/// sanitizer already strips markup from anything that reaches the profile.
pub fn detect_suspicious(raw: &Value) -> Option<&'static str> {
    let blob = raw.to_string().to_lowercase();

    let xss = Regex::new(r"<script|javascript:|on\w+\s*=").unwrap();
    if xss.is_match(&blob) {
        return Some("xss_attempt");
    }

    let sql_injection = Regex::new(r"union\s+select|drop\s+table|insert\s+into|;\s*delete").unwrap();
    if sql_injection.is_match(&blob) {
        return Some("sql_injection_attempt");
    }

    None
}
