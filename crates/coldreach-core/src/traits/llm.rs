// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LLM provider trait for email generation.

use async_trait::async_trait;

use crate::error::ColdreachError;

/// Completes a system + user prompt pair into a single text reply.
///
/// The composer expects the reply to contain a JSON object with `subject`
/// and `body` fields; parsing happens on the caller's side.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short identifier for logging ("anthropic", "mock").
    fn name(&self) -> &str;

    /// Run one completion.
    async fn complete(&self, system: &str, user: &str) -> Result<String, ColdreachError>;
}
