//! FitCoach Shared Library
//!
//! This crate contains the pure core of the program generator: the input
//! sanitizer, the profile validator, the calorie/macro calculator, and the
//! prompt formatter. Everything here is synchronous, side-effect-free, and
//! safe to call from any number of concurrent workers.

pub mod calculate;
pub mod prompt;
pub mod sanitize;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use calculate::calculate;
pub use prompt::{render_user_context, render_user_message, MAX_GENERATION_TOKENS, SYSTEM_PROMPT};
pub use sanitize::{detect_suspicious, sanitize_inputs};
pub use types::*;
pub use validation::{validate_profile, ValidationError};
