// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./coldreach.toml` > `~/.config/coldreach/coldreach.toml`
//! > `/etc/coldreach/coldreach.toml` with environment variable overrides via
//! the `COLDREACH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ColdreachConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/coldreach/coldreach.toml` (system-wide)
/// 3. `~/.config/coldreach/coldreach.toml` (user XDG config)
/// 4. `./coldreach.toml` (local directory)
/// 5. `COLDREACH_*` environment variables
pub fn load_config() -> Result<ColdreachConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ColdreachConfig::default()))
        .merge(Toml::file("/etc/coldreach/coldreach.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("coldreach/coldreach.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("coldreach.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ColdreachConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ColdreachConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ColdreachConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ColdreachConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `COLDREACH_ENRICHMENT_API_KEY` must map
/// to `enrichment.api_key`, not `enrichment.api.key`.
fn env_provider() -> Env {
    Env::prefixed("COLDREACH_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: COLDREACH_DELIVERY_FROM_ADDRESS -> "delivery_from_address"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("storage_", "storage.", 1)
            .replacen("enrichment_", "enrichment.", 1)
            .replacen("delivery_", "delivery.", 1)
            .replacen("llm_", "llm.", 1)
            .replacen("research_", "research.", 1);
        mapped.into()
    })
}
