// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Send lifecycle and tracking for outbound emails.
//!
//! Preconditions are checked in a fixed order before any state change:
//! existence, not-already-sent, sendable state, recipient present. Only
//! then does the email move to `queued`, so a crash mid-send shows up as
//! "stuck in queued" rather than a silent loss.

use std::sync::Arc;

use coldreach_config::model::DeliveryConfig;
use coldreach_core::{
    ColdreachError, DeliveryProvider, EmailStatus, OutboundEmail, SendError, SentInfo,
    TrackingEvent,
};
use coldreach_storage::database::Database;
use coldreach_storage::queries::{contacts, emails};
use tracing::{info, warn};

/// Outcome of applying one tracking event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingOutcome {
    /// The event was applied to this email.
    Updated { email_id: String },
    /// No email carries the given provider message id. Non-fatal.
    NoMatch,
}

/// Per-item result within a batch send.
#[derive(Debug)]
pub struct BatchItem {
    pub email_id: String,
    pub outcome: Result<SentInfo, SendError>,
}

/// Aggregate result of a batch send.
#[derive(Debug)]
pub struct BatchSendReport {
    pub success: usize,
    pub failed: usize,
    /// Per-item detail, in input order.
    pub items: Vec<BatchItem>,
}

/// Manages the email send lifecycle against the configured provider.
pub struct DeliveryService {
    db: Arc<Database>,
    provider: Arc<dyn DeliveryProvider>,
    from_address: String,
    from_name: Option<String>,
}

impl DeliveryService {
    pub fn new(
        db: Arc<Database>,
        provider: Arc<dyn DeliveryProvider>,
        config: &DeliveryConfig,
    ) -> Self {
        Self {
            db,
            provider,
            from_address: config.from_address.clone(),
            from_name: config.from_name.clone(),
        }
    }

    /// Builds the service with the provider selected from configuration.
    pub fn from_config(db: Arc<Database>, config: &DeliveryConfig) -> Self {
        Self::new(db, crate::provider_from_config(config), config)
    }

    /// Send one email owned by `user_id`.
    ///
    /// Precondition order: not-found, already-sent, invalid-state,
    /// missing-recipient. The email only advances to `queued` once all
    /// four pass; a provider failure then lands it in `failed` with the
    /// provider's message surfaced.
    pub async fn send(&self, user_id: &str, email_id: &str) -> Result<SentInfo, SendError> {
        let email = emails::get_email(&self.db, user_id, email_id)
            .await
            .map_err(storage_error)?
            .ok_or(SendError::NotFound)?;

        if email.status.is_terminal_sent() {
            return Err(SendError::AlreadySent {
                status: email.status,
            });
        }
        if !email.status.is_sendable() {
            return Err(SendError::InvalidState {
                status: email.status,
            });
        }

        let contact = contacts::get_contact(&self.db, &email.contact_id)
            .await
            .map_err(storage_error)?;
        let (recipient, recipient_name) = match contact {
            Some(c) if !c.email.trim().is_empty() => (c.email, c.name),
            _ => return Err(SendError::MissingRecipient),
        };

        emails::update_status(&self.db, email_id, EmailStatus::Queued)
            .await
            .map_err(storage_error)?;

        let outbound = OutboundEmail {
            from: self.from_address.clone(),
            from_name: self.from_name.clone(),
            to: recipient,
            to_name: recipient_name,
            subject: email.subject,
            text: email.body_text,
            html: email.body_html,
        };

        match self.provider.send(&outbound).await {
            Ok(receipt) => {
                let sent = emails::mark_sent(&self.db, email_id, &receipt.message_id)
                    .await
                    .map_err(storage_error)?;
                info!(
                    email_id,
                    message_id = %receipt.message_id,
                    provider = self.provider.name(),
                    "email sent"
                );
                Ok(SentInfo {
                    email_id: sent.id,
                    provider_message_id: receipt.message_id,
                    sent_at: sent.sent_at.unwrap_or_default(),
                })
            }
            Err(e) => {
                warn!(email_id, error = %e, "send failed, marking email failed");
                if let Err(we) =
                    emails::update_status(&self.db, email_id, EmailStatus::Failed).await
                {
                    warn!(email_id, error = %we, "failed to record failed status");
                }
                Err(e)
            }
        }
    }

    /// Send several emails sequentially, collecting per-item results.
    ///
    /// An item failure never aborts the batch; items come back in input
    /// order with aggregate counts.
    pub async fn send_batch(&self, user_id: &str, email_ids: &[String]) -> BatchSendReport {
        let mut items = Vec::with_capacity(email_ids.len());
        let mut success = 0;
        let mut failed = 0;

        for email_id in email_ids {
            let outcome = self.send(user_id, email_id).await;
            match &outcome {
                Ok(_) => success += 1,
                Err(_) => failed += 1,
            }
            items.push(BatchItem {
                email_id: email_id.clone(),
                outcome,
            });
        }

        info!(success, failed, total = email_ids.len(), "batch send finished");
        BatchSendReport {
            success,
            failed,
            items,
        }
    }

    /// Apply a provider tracking event by message id.
    ///
    /// Unknown message ids are reported as [`TrackingOutcome::NoMatch`],
    /// never raised: webhook callers should not fail on stale events.
    pub async fn record_tracking_event(
        &self,
        provider_message_id: &str,
        event: TrackingEvent,
    ) -> Result<TrackingOutcome, ColdreachError> {
        let Some(email) = emails::get_by_provider_message_id(&self.db, provider_message_id).await?
        else {
            warn!(provider_message_id, %event, "tracking event has no matching email");
            return Ok(TrackingOutcome::NoMatch);
        };

        emails::record_tracking(&self.db, &email.id, event).await?;
        info!(email_id = %email.id, %event, "tracking event applied");
        Ok(TrackingOutcome::Updated { email_id: email.id })
    }

    /// Count a user's emails by status, zero-filled over every known
    /// status so callers never observe missing keys.
    pub async fn status_counts(
        &self,
        user_id: &str,
    ) -> Result<Vec<(EmailStatus, i64)>, ColdreachError> {
        let stored = emails::count_by_status(&self.db, user_id).await?;
        Ok(EmailStatus::ALL
            .iter()
            .map(|status| {
                let count = stored
                    .iter()
                    .find(|(s, _)| s == status)
                    .map(|(_, c)| *c)
                    .unwrap_or(0);
                (*status, count)
            })
            .collect())
    }
}

fn storage_error(e: ColdreachError) -> SendError {
    SendError::Provider {
        message: format!("storage failure: {e}"),
    }
}
