//! Energy and macro target calculation
//!
//! Pure and deterministic: no I/O, no randomness, no shared state. Given a
//! validated profile the calculation is total; the input domain excludes
//! divide-by-zero (TDEE is always positive) and negative ranges.
//!
//! The deficit pipeline applies layered safety caps in a fixed order:
//!
//! 1. absolute cap: a requested deficit over 1000 kcal/day is pulled back
//!    to 750 kcal/day (~0.75 kg/week)
//! 2. relative cap: otherwise the deficit is clamped to 25% of TDEE
//! 3. calorie floor: 1500 kcal/day for men, 1200 for women, applied last
//!
//! At most one warning is surfaced per request. The floor warning
//! overwrites any cap warning because it is the more binding condition.
//! All integer rounding is round-half-away-from-zero (`f64::round`).

use crate::types::{Calculation, Profile, Sex};

/// Energy density of adipose tissue, kcal per kg
pub const KCAL_PER_KG: f64 = 7700.0;

/// Requested deficits above this are considered unsafe outright
pub const ABSOLUTE_MAX_DEFICIT: f64 = 1000.0;

/// Replacement deficit when the absolute cap fires (~0.75 kg/week)
pub const ADJUSTED_DEFICIT: f64 = 750.0;

/// Largest deficit tolerated relative to TDEE
pub const MAX_DEFICIT_FRACTION: f64 = 0.25;

/// Carbohydrate grams never drop below this, even if the macro budget is
/// already spent; the overshoot is accepted, not corrected
pub const MIN_CARBS_G: f64 = 50.0;

/// Mifflin-St Jeor basal metabolic rate
///
/// Men: 10·kg + 6.25·cm − 5·age + 5
/// Women: 10·kg + 6.25·cm − 5·age − 161
pub fn bmr_mifflin_st_jeor(weight_kg: f64, height_cm: i32, age: i32, sex: Sex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * f64::from(height_cm) - 5.0 * f64::from(age);
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Map a validated profile to bounded energy and macro targets
pub fn calculate(profile: &Profile) -> Calculation {
    let bmr = bmr_mifflin_st_jeor(
        profile.weight_kg,
        profile.height_cm,
        profile.age,
        profile.sex,
    );
    let tdee = (bmr * profile.activity_level.multiplier()).round();

    let total_loss_kg = profile.weight_kg - profile.target_weight_kg;
    let weekly_loss_requested = total_loss_kg / f64::from(profile.weeks);

    // Requested daily deficit, then the ordered caps. Later caps reference
    // the already-capped value, so only one can fire.
    let mut deficit = weekly_loss_requested * KCAL_PER_KG / 7.0;
    let mut warning = None;

    let max_deficit = tdee * MAX_DEFICIT_FRACTION;
    if deficit > ABSOLUTE_MAX_DEFICIT {
        warning = Some(format!(
            "Your goal requires losing {weekly_loss_requested:.1}kg/week, which is too aggressive. \
             I've adjusted to a safer ~0.75kg/week target. Sustainable progress beats fast burnout."
        ));
        deficit = ADJUSTED_DEFICIT;
    } else if deficit > max_deficit {
        warning = Some(
            "Your goal is ambitious. I've capped the deficit at 25% of your TDEE \
             to protect muscle and energy levels."
                .to_string(),
        );
        deficit = max_deficit;
    }

    let daily_calories = (tdee - deficit).round();

    // Hard floor, always the last word. Its warning overwrites any cap
    // warning above.
    let min_calories = f64::from(profile.sex.min_calories());
    let final_calories = daily_calories.max(min_calories);
    if final_calories > daily_calories {
        warning = Some(format!(
            "To keep you healthy and energized, I've set a minimum of {} kcal/day. \
             Going lower risks muscle loss and metabolic adaptation.",
            profile.sex.min_calories()
        ));
    }

    // Macros: protein from target weight, fat from current weight, carbs
    // from whatever calories remain (floored at 50 g)
    let protein_g = (profile.target_weight_kg * 2.0).round();
    let fat_g = (profile.weight_kg * 0.8).round();
    let carb_kcal = final_calories - protein_g * 4.0 - fat_g * 9.0;
    let carbs_g = (carb_kcal / 4.0).round().max(MIN_CARBS_G);

    // Reported figures come from the final calories, which may differ from
    // the requested rate. The floor can push calories above TDEE; the
    // reported deficit clamps at zero rather than going negative.
    let final_deficit = (tdee - final_calories).max(0.0);

    Calculation {
        bmr: bmr.round() as i32,
        tdee: tdee as i32,
        daily_calories: final_calories as i32,
        deficit: final_deficit as i32,
        deficit_percent: (final_deficit / tdee * 100.0).round() as i32,
        protein_g: protein_g as i32,
        fat_g: fat_g as i32,
        carbs_g: carbs_g as i32,
        weekly_loss_kg: final_deficit * 7.0 / KCAL_PER_KG,
        total_loss_kg,
        warning,
    }
}
