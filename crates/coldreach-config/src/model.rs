// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Coldreach.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Coldreach configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values; in
/// particular, a config with no API keys runs entirely in mock mode.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ColdreachConfig {
    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Company enrichment provider settings.
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Email delivery provider settings.
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// LLM provider settings for email generation.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Research orchestrator settings.
    #[serde(default)]
    pub research: ResearchConfig,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("coldreach").join("coldreach.db"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "coldreach.db".to_string())
}

fn default_wal_mode() -> bool {
    true
}

/// Company enrichment provider configuration.
///
/// With no `api_key` (or a placeholder-looking one) the deterministic mock
/// provider is selected and no network call is ever attempted.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnrichmentConfig {
    /// Enrichment provider API key. `None` selects the mock provider.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the enrichment API.
    #[serde(default = "default_enrichment_base_url")]
    pub base_url: String,

    /// Request timeout in seconds for provider lookups.
    #[serde(default = "default_enrichment_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_enrichment_base_url(),
            timeout_secs: default_enrichment_timeout_secs(),
        }
    }
}

fn default_enrichment_base_url() -> String {
    "https://company.clearbit.com/v2".to_string()
}

fn default_enrichment_timeout_secs() -> u64 {
    10
}

/// Email delivery provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeliveryConfig {
    /// Delivery provider API key. `None` selects the mock provider.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the delivery API.
    #[serde(default = "default_delivery_base_url")]
    pub base_url: String,

    /// Sender address applied to all outbound email.
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Optional display name for the sender.
    #[serde(default)]
    pub from_name: Option<String>,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_delivery_base_url(),
            from_address: default_from_address(),
            from_name: None,
        }
    }
}

fn default_delivery_base_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_from_address() -> String {
    "outreach@localhost".to_string()
}

/// LLM provider configuration for email generation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// LLM API key. `None` selects the mock provider.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier to use for generation.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate per email.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

/// Research orchestrator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResearchConfig {
    /// Number of contacts researched concurrently within one batch window.
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,

    /// Delay between batch windows, in milliseconds. Respects third-party
    /// rate limits.
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            batch_concurrency: default_batch_concurrency(),
            batch_delay_ms: default_batch_delay_ms(),
        }
    }
}

fn default_batch_concurrency() -> usize {
    3
}

fn default_batch_delay_ms() -> u64 {
    1000
}
