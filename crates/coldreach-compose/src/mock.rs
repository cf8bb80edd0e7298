// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic mock LLM provider.
//!
//! Replies with a well-formed `{subject, body}` JSON object derived only
//! from the prompt text, so composer tests are repeatable offline.

use async_trait::async_trait;
use coldreach_core::{ColdreachError, LlmProvider};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct MockLlmProvider;

impl MockLlmProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, _system: &str, user: &str) -> Result<String, ColdreachError> {
        debug!(prompt_len = user.len(), "serving synthetic completion");
        // First non-empty prompt line seeds the subject for variety.
        let seed = user
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("your work")
            .trim();
        let reply = serde_json::json!({
            "subject": format!("Quick question about {}", seed.chars().take(40).collect::<String>()),
            "body": "Hi,\n\nI came across your company and thought our product could help.\n\nWould you be open to a quick chat this week?\n\nBest,\nThe team",
        });
        Ok(reply.to_string())
    }
}
