// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cold email generation.
//!
//! Assembles a prompt from the contact, any cached company research, and
//! the user's product context, then asks the configured LLM for a
//! `{subject, body}` reply. The result is persisted as a draft; sending is
//! a separate concern.

use std::sync::Arc;

use coldreach_config::model::LlmConfig;
use coldreach_core::{LlmProvider, is_placeholder_key};
use tracing::{info, warn};

pub mod client;
pub mod composer;
pub mod mock;

pub use client::AnthropicProvider;
pub use composer::EmailComposer;
pub use mock::MockLlmProvider;

/// Select the LLM provider from configuration.
pub fn provider_from_config(config: &LlmConfig) -> Arc<dyn LlmProvider> {
    if let Some(key) = config.api_key.as_deref()
        && !is_placeholder_key(key)
    {
        match AnthropicProvider::new(key, &config.model, config.max_tokens) {
            Ok(provider) => {
                info!(model = %config.model, "using Anthropic LLM provider");
                return Arc::new(provider);
            }
            Err(e) => {
                warn!(error = %e, "failed to build LLM provider, falling back to mock");
            }
        }
    } else {
        info!("no LLM credential configured, using mock provider");
    }
    Arc::new(MockLlmProvider::new())
}
