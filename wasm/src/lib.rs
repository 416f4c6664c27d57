//! FitCoach WASM Module
//!
//! This crate provides WebAssembly bindings so the step-wizard form can run
//! the same checks in the browser for instant feedback. Form-level presence
//! checks run on the raw payload first, before any default substitution, so
//! a blank field produces a message instead of silently falling back. The
//! server re-runs sanitation and validation on submission; this layer is
//! convenience only, never authority.

use fitcoach_shared::{calculate, sanitize_inputs, validate_profile};
use serde_json::Value;
use wasm_bindgen::prelude::*;

fn raw_number(raw: &Value, key: &str) -> Option<f64> {
    match raw.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn number_outside(raw: &Value, key: &str, min: f64, max: f64) -> bool {
    !matches!(raw_number(raw, key), Some(n) if (min..=max).contains(&n))
}

fn selection_missing(raw: &Value, key: &str) -> bool {
    match raw.get(key) {
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => true,
    }
}

fn modalities_missing(raw: &Value) -> bool {
    match raw.get("cardio_modalities") {
        Some(Value::Array(items)) => items.is_empty(),
        _ => true,
    }
}

/// First wizard-level problem with a raw form payload, in step order
///
/// Runs on the untyped JSON so missing or blank fields are reported rather
/// than replaced by fallbacks. Mirrors the step grouping of the form: body
/// stats and timeframe, then experience selections, then schedule.
fn first_form_error(raw: &Value) -> Option<&'static str> {
    if number_outside(raw, "age", 16.0, 80.0) {
        return Some("Please enter a valid age (16-80)");
    }
    if selection_missing(raw, "sex") {
        return Some("Please select your sex");
    }
    if number_outside(raw, "height_cm", 140.0, 220.0) {
        return Some("Please enter a valid height");
    }
    if number_outside(raw, "weight_kg", 40.0, f64::MAX) {
        return Some("Please enter your current weight");
    }
    if number_outside(raw, "target_weight_kg", 40.0, f64::MAX) {
        return Some("Please enter your target weight");
    }
    if let (Some(weight), Some(target)) = (
        raw_number(raw, "weight_kg"),
        raw_number(raw, "target_weight_kg"),
    ) {
        if target >= weight {
            return Some("Target weight should be less than current weight");
        }
    }
    if number_outside(raw, "weeks", 4.0, 24.0) {
        return Some("Please enter a timeframe between 4-24 weeks");
    }
    if selection_missing(raw, "training_level") {
        return Some("Please select your training level");
    }
    if selection_missing(raw, "activity_level") {
        return Some("Please select your activity level");
    }
    if selection_missing(raw, "cardio_experience") {
        return Some("Please select your cardio experience");
    }
    if modalities_missing(raw) {
        return Some("Please select at least one cardio option");
    }
    if number_outside(raw, "days_per_week", 2.0, 7.0) {
        return Some("Please enter days per week (2-7)");
    }
    if number_outside(raw, "minutes_per_session", 15.0, 120.0) {
        return Some("Please enter session duration (15-120 minutes)");
    }
    None
}

/// Validate a raw form payload (JSON object as a string)
///
/// Returns the first problem in wizard order, or None when the payload is
/// complete and consistent. Presence checks run on the raw fields; the
/// shared validator then re-checks the sanitized profile.
#[wasm_bindgen]
pub fn validate_inputs(raw_json: &str) -> Option<String> {
    let raw = serde_json::from_str(raw_json).unwrap_or(Value::Null);
    if let Some(message) = first_form_error(&raw) {
        return Some(message.to_string());
    }
    let profile = sanitize_inputs(&raw);
    validate_profile(&profile).err().map(|e| e.message)
}

/// Compute calorie/macro targets for a raw form payload
///
/// Returns the calculation as a JSON string for display, or None when the
/// payload does not validate.
#[wasm_bindgen]
pub fn preview_targets(raw_json: &str) -> Option<String> {
    let raw = serde_json::from_str(raw_json).unwrap_or(Value::Null);
    if first_form_error(&raw).is_some() {
        return None;
    }
    let profile = sanitize_inputs(&raw);
    if validate_profile(&profile).is_err() {
        return None;
    }
    serde_json::to_string(&calculate(&profile)).ok()
}
