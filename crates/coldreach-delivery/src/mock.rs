// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock delivery provider.
//!
//! Every send "succeeds" synchronously with a synthetic message id. The
//! payload is logged and never leaves the process, so the full send
//! lifecycle can run without external credentials.

use async_trait::async_trait;
use coldreach_core::{DeliveryProvider, DeliveryReceipt, OutboundEmail, SendError};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct MockDeliveryProvider;

impl MockDeliveryProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DeliveryProvider for MockDeliveryProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, SendError> {
        let message_id = format!("mock-{}", Uuid::new_v4());
        info!(
            to = %email.to,
            subject = %email.subject,
            text_len = email.text.len(),
            has_html = email.html.is_some(),
            message_id = %message_id,
            "mock delivery, payload logged only"
        );
        Ok(DeliveryReceipt { message_id })
    }
}
