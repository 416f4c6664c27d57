//! Application state management
//!
//! This module provides the shared application state that is passed to all
//! request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Cheap cloning**: every field is behind an Arc
//! 2. **Immutable after creation**: only the rate limiter carries interior
//!    mutability, behind its own lock
//! 3. **Injected collaborators**: the generator is a trait object so tests
//!    can swap in a fixed-output mock

use crate::config::AppConfig;
use crate::generation::ProgramGenerator;
use crate::ratelimit::RateLimiter;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// External text-generation collaborator
    pub generator: Arc<dyn ProgramGenerator>,
    /// Per-client request counter
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: AppConfig, generator: Arc<dyn ProgramGenerator>) -> Self {
        let limiter = Arc::new(RateLimiter::new(&config.rate_limit));
        Self {
            config: Arc::new(config),
            generator,
            limiter,
        }
    }
}
