// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Coldreach workspace.
//!
//! Timestamps are ISO-8601 TEXT values produced by SQLite's
//! `strftime('%Y-%m-%dT%H:%M:%fZ', 'now')`, matching the storage layer.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Enrichment lifecycle state of a contact.
///
/// `na` is terminal and reached only at creation time for personal
/// contacts; business contacts move `pending -> processing -> {complete|failed}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResearchStatus {
    Pending,
    Processing,
    Complete,
    Failed,
    Na,
}

/// Lifecycle state of an outbound email artifact.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Draft,
    Queued,
    Sent,
    Delivered,
    Opened,
    Clicked,
    Bounced,
    Failed,
}

impl EmailStatus {
    /// Every known status, in declaration order. Used to zero-initialize
    /// grouped statistics so callers never observe missing keys.
    pub const ALL: [EmailStatus; 8] = [
        EmailStatus::Draft,
        EmailStatus::Queued,
        EmailStatus::Sent,
        EmailStatus::Delivered,
        EmailStatus::Opened,
        EmailStatus::Clicked,
        EmailStatus::Bounced,
        EmailStatus::Failed,
    ];

    /// True once the email has gone out; a send attempt from any of these
    /// states is rejected as "already sent".
    pub fn is_terminal_sent(self) -> bool {
        matches!(
            self,
            EmailStatus::Sent
                | EmailStatus::Delivered
                | EmailStatus::Opened
                | EmailStatus::Clicked
                | EmailStatus::Bounced
        )
    }

    /// True for states a send attempt may start from.
    pub fn is_sendable(self) -> bool {
        matches!(
            self,
            EmailStatus::Draft | EmailStatus::Queued | EmailStatus::Failed
        )
    }
}

/// Webhook-style tracking event reported by the delivery provider.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TrackingEvent {
    Delivered,
    Opened,
    Clicked,
    Bounced,
}

impl TrackingEvent {
    /// The email status this event advances to.
    pub fn status(self) -> EmailStatus {
        match self {
            TrackingEvent::Delivered => EmailStatus::Delivered,
            TrackingEvent::Opened => EmailStatus::Opened,
            TrackingEvent::Clicked => EmailStatus::Clicked,
            TrackingEvent::Bounced => EmailStatus::Bounced,
        }
    }
}

/// A stored contact.
///
/// Classification happens once at creation time: `company_domain` is set
/// iff the email classified as business with an extractable domain, and
/// `research_status` is the only field the core mutates afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
    pub company_domain: Option<String>,
    pub research_status: ResearchStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Cached company research, keyed by normalized domain.
///
/// One row per domain, shared across all users. Written only by the
/// enrichment client on a successful provider fetch; never expired by
/// the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyResearch {
    pub domain: String,
    pub company_name: String,
    pub industry: String,
    pub description: String,
    pub employee_range: String,
    pub location: String,
    pub website: String,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub tech_stack: Vec<String>,
    /// Raw provider payload, retained opaque for audit and debugging.
    pub raw_payload: Option<String>,
    pub fetched_at: String,
}

/// A stored outbound email artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    pub id: String,
    pub user_id: String,
    pub contact_id: String,
    pub subject: String,
    pub body_text: String,
    pub body_html: Option<String>,
    pub status: EmailStatus,
    pub provider_message_id: Option<String>,
    pub sent_at: Option<String>,
    pub delivered_at: Option<String>,
    pub opened_at: Option<String>,
    pub clicked_at: Option<String>,
    pub bounced_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Result of a successful send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentInfo {
    pub email_id: String,
    pub provider_message_id: String,
    pub sent_at: String,
}

/// The payload handed to a delivery provider.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub from_name: Option<String>,
    pub to: String,
    pub to_name: Option<String>,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

/// Receipt returned by a delivery provider on acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeliveryReceipt {
    pub message_id: String,
}
