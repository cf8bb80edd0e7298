// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact CRUD operations.
//!
//! The (user_id, email) pair is unique; a duplicate insert surfaces as a
//! storage error for the caller to handle.

use coldreach_core::ColdreachError;
use coldreach_core::types::ResearchStatus;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Contact, NewContact};
use crate::queries::OptionalExt;

const CONTACT_COLUMNS: &str =
    "id, user_id, email, name, company_domain, research_status, created_at, updated_at";

fn row_to_contact(row: &rusqlite::Row) -> Result<Contact, rusqlite::Error> {
    let status: String = row.get(5)?;
    let research_status: ResearchStatus = status.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Contact {
        id: row.get(0)?,
        user_id: row.get(1)?,
        email: row.get(2)?,
        name: row.get(3)?,
        company_domain: row.get(4)?,
        research_status,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Create a new contact and return the stored row (timestamps come from
/// SQLite column defaults).
pub async fn create_contact(db: &Database, new: &NewContact) -> Result<Contact, ColdreachError> {
    let new = new.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO contacts (id, user_id, email, name, company_domain, research_status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    new.id,
                    new.user_id,
                    new.email,
                    new.name,
                    new.company_domain,
                    new.research_status.to_string(),
                ],
            )?;
            let mut stmt = conn.prepare(&format!(
                "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"
            ))?;
            let contact = stmt.query_row(params![new.id], row_to_contact)?;
            Ok(contact)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a contact by id, regardless of owner. Used by the research
/// orchestrator and delivery recipient resolution.
pub async fn get_contact(db: &Database, id: &str) -> Result<Option<Contact>, ColdreachError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"
            ))?;
            let contact = stmt.query_row(params![id], row_to_contact).optional()?;
            Ok(contact)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a contact by id, scoped to its owning user.
pub async fn get_contact_for_user(
    db: &Database,
    user_id: &str,
    id: &str,
) -> Result<Option<Contact>, ColdreachError> {
    let user_id = user_id.to_string();
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1 AND user_id = ?2"
            ))?;
            let contact = stmt
                .query_row(params![id, user_id], row_to_contact)
                .optional()?;
            Ok(contact)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update a contact's research status and updated_at timestamp.
pub async fn update_research_status(
    db: &Database,
    id: &str,
    status: ResearchStatus,
) -> Result<(), ColdreachError> {
    let id = id.to_string();
    let status = status.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE contacts SET research_status = ?1,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2",
                params![status, id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a contact owned by the given user.
pub async fn delete_contact(db: &Database, user_id: &str, id: &str) -> Result<(), ColdreachError> {
    let user_id = user_id.to_string();
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM contacts WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
