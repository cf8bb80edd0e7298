// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Coldreach outreach engine.

use thiserror::Error;

use crate::types::EmailStatus;

/// The primary error type used across core operations and persistence.
#[derive(Debug, Error)]
pub enum ColdreachError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// External provider errors (enrichment, delivery, or LLM API failure).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors from company enrichment lookups.
///
/// All variants are non-fatal to the research orchestrator: each maps to a
/// contact research status of `failed` with the message retained for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrichmentError {
    /// The provider has no company data for this domain.
    #[error("no company data found for domain")]
    NotFound,

    /// The provider rejected the request due to rate limiting.
    #[error("enrichment provider rate limited")]
    RateLimited,

    /// The provider returned an error (auth failure, timeout, 5xx, bad payload).
    #[error("enrichment provider error: {message}")]
    ApiError { message: String },

    /// The domain failed validation before any provider call.
    #[error("invalid domain: {domain}")]
    InvalidDomain { domain: String },
}

/// Errors from outbound email send attempts.
///
/// Returned as structured results (never panics) so batch sends can
/// continue past individual failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// The email does not exist or does not belong to the caller.
    #[error("email not found")]
    NotFound,

    /// The email was already sent; re-sending is rejected.
    #[error("email already sent (status: {status})")]
    AlreadySent { status: EmailStatus },

    /// The email is in a state that cannot be sent from.
    #[error("email cannot be sent from status {status}")]
    InvalidState { status: EmailStatus },

    /// The resolved recipient address is empty.
    #[error("recipient address is missing")]
    MissingRecipient,

    /// The delivery provider rejected or failed the send.
    #[error("delivery provider error: {message}")]
    Provider { message: String },
}

/// Errors from email generation.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Product context is a hard precondition, checked before any LLM call.
    #[error("product context is required for email generation")]
    MissingProductContext,

    /// The contact does not exist or does not belong to the caller.
    #[error("contact not found")]
    ContactNotFound,

    /// The LLM reply could not be parsed as a subject/body JSON object.
    #[error("could not parse generated email: {0}")]
    InvalidReply(String),

    /// The LLM provider call failed.
    #[error("llm provider error: {0}")]
    Provider(String),

    /// A persistence operation failed.
    #[error(transparent)]
    Storage(#[from] ColdreachError),
}
