// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery provider trait for outbound email transmission.

use async_trait::async_trait;

use crate::error::SendError;
use crate::types::{DeliveryReceipt, OutboundEmail};

/// Transmits an email artifact to its recipient.
///
/// Errors surface as [`SendError::Provider`] so the status tracker can
/// record the failure and batch sends can continue.
#[async_trait]
pub trait DeliveryProvider: Send + Sync {
    /// Short identifier for logging ("http", "mock").
    fn name(&self) -> &str;

    /// Send one email, returning the provider's message id on acceptance.
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, SendError>;
}
