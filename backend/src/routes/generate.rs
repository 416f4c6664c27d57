//! Program generation endpoint
//!
//! The one request flow with real logic behind it: rate-limit check, then
//! sanitize -> validate -> calculate -> render prompt -> external
//! generation call. Everything up to the external call is synchronous and
//! stateless.

use crate::error::{ApiError, ApiResult};
use crate::ratelimit::ClientIp;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use fitcoach_shared::{
    calculate, detect_suspicious, render_user_context, render_user_message, sanitize_inputs,
    validate_profile, GenerateResponse, SYSTEM_PROMPT,
};
use serde_json::Value;
use tracing::{info, warn};

/// POST /api/generate - Produce a personalized 12-week program
pub async fn generate_program(
    State(state): State<AppState>,
    ClientIp(client): ClientIp,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<GenerateResponse>> {
    // Rejected before any core logic runs
    state
        .limiter
        .check(client)
        .map_err(|retry_after_secs| ApiError::RateLimited { retry_after_secs })?;

    // Bad JSON, wrong content type and oversized bodies all collapse into
    // one generic message
    let Json(raw) = payload.map_err(|_| ApiError::BadRequest("Invalid request body".into()))?;

    if let Some(pattern) = detect_suspicious(&raw) {
        warn!(%client, pattern, "Suspicious payload content");
    }

    let profile = sanitize_inputs(&raw);
    validate_profile(&profile).map_err(|e| {
        info!(field = e.field, "Profile rejected");
        ApiError::Validation(e.message)
    })?;

    let calculations = calculate(&profile);
    let context = render_user_context(&profile, &calculations);

    let program = state
        .generator
        .generate(SYSTEM_PROMPT, &render_user_message(&context))
        .await?;

    info!(
        daily_calories = calculations.daily_calories,
        deficit = calculations.deficit,
        has_warning = calculations.warning.is_some(),
        "Program generated"
    );

    Ok(Json(GenerateResponse {
        success: true,
        calculations,
        program,
    }))
}
