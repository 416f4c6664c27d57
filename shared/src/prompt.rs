//! Prompt rendering for the program-generation call
//!
//! Renders the validated profile and its calculation into a fixed-structure
//! text block. The block is opaque payload for the external generation
//! collaborator; nothing here inspects or alters the collaborator's reply.

use crate::types::{Calculation, Profile};
use std::fmt::Write;

/// Generation token budget passed alongside the prompt
pub const MAX_GENERATION_TOKENS: u32 = 4000;

/// Fixed instruction prefixed to the rendered context
pub const USER_MESSAGE_PREFIX: &str = "Generate a complete 12-week program for this user:";

/// Static coaching policy handed to the collaborator as the system message
pub const SYSTEM_PROMPT: &str = "You're an expert fitness coach creating personalized 12-week fat loss programs.

CALCULATIONS PROVIDED: The user data includes pre-calculated BMR, TDEE, calories, and macros. Use these exact numbers—do not recalculate.

CARDIO PLAN RULES:
- 12 weeks progressive (volume or intensity)
- Match user's available modalities ONLY
- Include: duration, intensity (RPE 1-10 or HR zone), brief coaching note
- Beginners: conservative start, walk-run progressions if running
- Format each week clearly

NUTRITION RULES (principles, not meal plans):
- High protein priority (number provided)
- High volume/low cal foods, fiber, water
- Sustainable > fast. No crash diets.

ADHERENCE SECTION:
- Hunger management strategies
- Cravings, energy dips, motivation
- Sleep importance, meal timing flexibility

OUTPUT FORMAT (use markdown headers):

## Program Overview
Brief summary: goal, approach, expected weekly loss rate.

## Calories & Macros
State the provided numbers. Explain briefly why these work.

## 12-Week Cardio Plan
Week-by-week breakdown. For each week state:
- Days and modality
- Duration and intensity
- One coaching note

Use a clear format like:
**Week 1-2**: [details]
**Week 3-4**: [details]
etc.

## Nutrition Rules
5-7 clear, actionable principles.

## Hunger & Adherence Playbook
Practical strategies organized by challenge (hunger, cravings, energy, social eating).

## Warning Signs & Adjustments
When to eat more, when to rest, signs of overtraining.

TONE: Calm, clear, encouraging, professional. No hype. No shame. No emojis.

IMPORTANT: Be specific and practical. This should feel like a real coach wrote it, not a generic template.";

/// Render profile facts plus the pre-calculated targets as one text block
///
/// Layout is fixed: profile section, "use these exact numbers" section,
/// then a safety-note line only when a warning was raised.
pub fn render_user_context(profile: &Profile, calcs: &Calculation) -> String {
    let modalities = profile
        .cardio_modalities
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    let _ = writeln!(out, "USER PROFILE:");
    let _ = writeln!(
        out,
        "- {}yo {}, {}cm, {}kg → {}kg goal",
        profile.age, profile.sex, profile.height_cm, profile.weight_kg, profile.target_weight_kg
    );
    let _ = writeln!(out, "- Timeline: {} weeks", profile.weeks);
    let _ = writeln!(
        out,
        "- Training: {}, Activity: {}",
        profile.training_level, profile.activity_level
    );
    let _ = writeln!(out, "- Cardio experience: {}", profile.cardio_experience);
    let _ = writeln!(out, "- Available cardio: {modalities}");
    let _ = writeln!(
        out,
        "- Gym access: {}",
        if profile.gym_access { "Yes" } else { "No" }
    );
    let _ = writeln!(
        out,
        "- Schedule: {} days/week, {} min/session",
        profile.days_per_week, profile.minutes_per_session
    );
    let _ = writeln!(out, "- Injuries: {}", or_none(&profile.injuries));
    let _ = writeln!(out, "- Medical: {}", or_none(&profile.medical));
    let _ = writeln!(out, "- Dietary: {}", or_none(&profile.dietary));
    let _ = writeln!(out);
    let _ = writeln!(out, "PRE-CALCULATED (use these exact numbers):");
    let _ = writeln!(out, "- BMR: {} kcal", calcs.bmr);
    let _ = writeln!(out, "- TDEE: {} kcal", calcs.tdee);
    let _ = writeln!(
        out,
        "- Daily target: {} kcal ({}% deficit)",
        calcs.daily_calories, calcs.deficit_percent
    );
    let _ = writeln!(
        out,
        "- Macros: {}g protein, {}g carbs, {}g fat",
        calcs.protein_g, calcs.carbs_g, calcs.fat_g
    );
    let _ = writeln!(out, "- Expected loss: ~{:.2}kg/week", calcs.weekly_loss_kg);
    if let Some(warning) = &calcs.warning {
        let _ = writeln!(out);
        let _ = writeln!(out, "⚠️ SAFETY NOTE: {warning}");
    }

    out.trim().to_string()
}

/// Prefix the rendered context with the fixed generation instruction
pub fn render_user_message(context: &str) -> String {
    format!("{USER_MESSAGE_PREFIX}\n\n{context}")
}

fn or_none(text: &str) -> &str {
    if text.is_empty() {
        "None"
    } else {
        text
    }
}
