// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical record types live in `coldreach-core::types` for use across
//! crate boundaries. This module re-exports them and adds the insert-time
//! structs whose timestamp columns are filled by SQLite defaults.

pub use coldreach_core::types::{CompanyResearch, Contact, Email};

use coldreach_core::types::ResearchStatus;

/// Insert payload for a new contact row.
///
/// Classification is decided before insertion and is immutable afterwards:
/// `company_domain` and `research_status` never change together again, only
/// `research_status` moves through its lifecycle.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub id: String,
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
    pub company_domain: Option<String>,
    pub research_status: ResearchStatus,
}

/// Insert payload for a new draft email row.
#[derive(Debug, Clone)]
pub struct NewEmail {
    pub id: String,
    pub user_id: String,
    pub contact_id: String,
    pub subject: String,
    pub body_text: String,
    pub body_html: Option<String>,
}
