// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and positive limits.

use crate::diagnostic::ConfigError;
use crate::model::ColdreachConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ColdreachConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.enrichment.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "enrichment.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.enrichment.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "enrichment.base_url must not be empty".to_string(),
        });
    }

    let from = config.delivery.from_address.trim();
    if from.is_empty() || !from.contains('@') {
        errors.push(ConfigError::Validation {
            message: format!(
                "delivery.from_address `{from}` is not a valid email address"
            ),
        });
    }

    if config.llm.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "llm.max_tokens must be at least 1".to_string(),
        });
    }

    if config.research.batch_concurrency == 0 {
        errors.push(ConfigError::Validation {
            message: "research.batch_concurrency must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
