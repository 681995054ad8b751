//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation of a resolved `AppConfig`
//! - Check that every allow-listed origin can be sent back as a header
//! - Validate value ranges (pool size > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem found in a resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("CORS origin {0:?} is not a valid header value")]
    InvalidOrigin(String),

    #[error("CORS origin \"*\" is not supported in an allow-list")]
    WildcardOrigin,

    #[error("database pool needs at least one connection")]
    EmptyPool,
}

/// Validate a resolved configuration, collecting every problem.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for origin in &config.cors.allow_list {
        if origin == "*" {
            errors.push(ValidationError::WildcardOrigin);
        } else if HeaderValue::from_str(origin).is_err() {
            errors.push(ValidationError::InvalidOrigin(origin.clone()));
        }
    }

    if config.database.max_connections == 0 {
        errors.push(ValidationError::EmptyPool);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
