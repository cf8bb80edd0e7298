// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Coldreach outreach engine.
//!
//! This crate provides the foundational error types, domain types, and
//! provider trait definitions used throughout the Coldreach workspace.
//! The enrichment, delivery, and LLM provider integrations all implement
//! traits defined here.

pub mod credentials;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use credentials::is_placeholder_key;
pub use error::{ColdreachError, ComposeError, EnrichmentError, SendError};
pub use types::{
    CompanyResearch, Contact, DeliveryReceipt, Email, EmailStatus, OutboundEmail, ResearchStatus,
    SentInfo, TrackingEvent,
};

// Re-export provider traits at crate root.
pub use traits::{DeliveryProvider, EnrichmentProvider, LlmProvider};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn research_status_round_trips_through_strings() {
        let variants = [
            ResearchStatus::Pending,
            ResearchStatus::Processing,
            ResearchStatus::Complete,
            ResearchStatus::Failed,
            ResearchStatus::Na,
        ];
        assert_eq!(variants.len(), 5, "ResearchStatus must have exactly 5 variants");
        for variant in &variants {
            let s = variant.to_string();
            let parsed = ResearchStatus::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn research_status_na_renders_lowercase() {
        assert_eq!(ResearchStatus::Na.to_string(), "na");
        assert_eq!(ResearchStatus::Pending.to_string(), "pending");
    }

    #[test]
    fn email_status_round_trips_through_strings() {
        for variant in EmailStatus::ALL {
            let s = variant.to_string();
            let parsed = EmailStatus::from_str(&s).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn email_status_terminal_sent_set() {
        assert!(EmailStatus::Sent.is_terminal_sent());
        assert!(EmailStatus::Delivered.is_terminal_sent());
        assert!(EmailStatus::Opened.is_terminal_sent());
        assert!(EmailStatus::Clicked.is_terminal_sent());
        assert!(EmailStatus::Bounced.is_terminal_sent());
        assert!(!EmailStatus::Draft.is_terminal_sent());
        assert!(!EmailStatus::Queued.is_terminal_sent());
        assert!(!EmailStatus::Failed.is_terminal_sent());
    }

    #[test]
    fn email_status_sendable_set() {
        assert!(EmailStatus::Draft.is_sendable());
        assert!(EmailStatus::Queued.is_sendable());
        assert!(EmailStatus::Failed.is_sendable());
        assert!(!EmailStatus::Sent.is_sendable());
        assert!(!EmailStatus::Delivered.is_sendable());
    }

    #[test]
    fn tracking_event_maps_to_status() {
        assert_eq!(TrackingEvent::Delivered.status(), EmailStatus::Delivered);
        assert_eq!(TrackingEvent::Opened.status(), EmailStatus::Opened);
        assert_eq!(TrackingEvent::Clicked.status(), EmailStatus::Clicked);
        assert_eq!(TrackingEvent::Bounced.status(), EmailStatus::Bounced);
    }

    #[test]
    fn status_serde_uses_lowercase_wire_form() {
        let json = serde_json::to_string(&ResearchStatus::Na).unwrap();
        assert_eq!(json, "\"na\"");
        let json = serde_json::to_string(&EmailStatus::Queued).unwrap();
        assert_eq!(json, "\"queued\"");
        let parsed: EmailStatus = serde_json::from_str("\"bounced\"").unwrap();
        assert_eq!(parsed, EmailStatus::Bounced);
    }

    #[test]
    fn error_variants_construct_and_display() {
        let _config = ColdreachError::Config("bad".into());
        let _storage = ColdreachError::Storage {
            source: Box::new(std::io::Error::other("disk")),
        };
        let _provider = ColdreachError::Provider {
            message: "upstream".into(),
            source: None,
        };
        let _timeout = ColdreachError::Timeout {
            duration: std::time::Duration::from_secs(10),
        };
        let _internal = ColdreachError::Internal("oops".into());

        let e = EnrichmentError::NotFound;
        assert!(e.to_string().contains("no company data"));
        let e = SendError::AlreadySent {
            status: EmailStatus::Sent,
        };
        assert!(e.to_string().contains("already sent"));
    }
}
