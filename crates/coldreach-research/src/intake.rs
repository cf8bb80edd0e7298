// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact creation with classification-at-intake.
//!
//! Classification is immutable after creation: the email cannot change, so
//! neither can the business/personal decision or the extracted domain.

use std::sync::Arc;

use coldreach_core::{ColdreachError, Contact, ResearchStatus};
use coldreach_storage::database::Database;
use coldreach_storage::models::NewContact;
use coldreach_storage::queries::contacts;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::orchestrator::ResearchOrchestrator;

/// Errors from contact creation.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The address is malformed and cannot be classified at all. Distinct
    /// from classifying as personal, which creates the contact at `na`.
    #[error("invalid email address: {email}")]
    InvalidEmail { email: String },

    /// A persistence operation failed (including duplicate (user, email)).
    #[error(transparent)]
    Storage(#[from] ColdreachError),
}

/// Creates contacts and kicks off research for business ones.
pub struct ContactIntake {
    db: Arc<Database>,
    research: Arc<ResearchOrchestrator>,
}

impl ContactIntake {
    pub fn new(db: Arc<Database>, research: Arc<ResearchOrchestrator>) -> Self {
        Self { db, research }
    }

    /// Create a contact for a user, classify it, and (for business
    /// contacts) start company research detached from this call.
    ///
    /// Returns as soon as the row is stored; research completion is
    /// observable only through the contact's `research_status`.
    pub async fn create_contact(
        &self,
        user_id: &str,
        email: &str,
        name: Option<String>,
    ) -> Result<Contact, IntakeError> {
        // Stored normalized so the (user_id, email) uniqueness constraint
        // catches case-variant duplicates.
        let email = email.trim().to_lowercase();
        let classification = coldreach_classifier::classify(&email);

        let Some(domain) = classification.domain else {
            return Err(IntakeError::InvalidEmail { email });
        };

        let (company_domain, research_status) = if classification.is_business {
            (Some(domain.clone()), ResearchStatus::Pending)
        } else {
            (None, ResearchStatus::Na)
        };

        let new = NewContact {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            email,
            name,
            company_domain,
            research_status,
        };
        let contact = contacts::create_contact(&self.db, &new).await?;

        if classification.is_business {
            info!(
                contact_id = %contact.id,
                domain,
                "business contact created, starting research"
            );
            drop(self.research.spawn_research(contact.id.clone(), domain));
        } else {
            debug!(contact_id = %contact.id, "personal contact created, no research");
        }

        Ok(contact)
    }
}
