// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound email CRUD and status-transition operations.
//!
//! Status values are stored as their lowercase wire form; transition
//! policy (what may move where) lives in the delivery service, not here.

use coldreach_core::ColdreachError;
use coldreach_core::types::{EmailStatus, TrackingEvent};
use rusqlite::params;

use crate::database::Database;
use crate::models::{Email, NewEmail};
use crate::queries::OptionalExt;

const EMAIL_COLUMNS: &str = "id, user_id, contact_id, subject, body_text, body_html, status, \
     provider_message_id, sent_at, delivered_at, opened_at, clicked_at, bounced_at, \
     created_at, updated_at";

fn row_to_email(row: &rusqlite::Row) -> Result<Email, rusqlite::Error> {
    let status: String = row.get(6)?;
    let status: EmailStatus = status.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Email {
        id: row.get(0)?,
        user_id: row.get(1)?,
        contact_id: row.get(2)?,
        subject: row.get(3)?,
        body_text: row.get(4)?,
        body_html: row.get(5)?,
        status,
        provider_message_id: row.get(7)?,
        sent_at: row.get(8)?,
        delivered_at: row.get(9)?,
        opened_at: row.get(10)?,
        clicked_at: row.get(11)?,
        bounced_at: row.get(12)?,
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}

/// Create a new draft email and return the stored row.
pub async fn create_email(db: &Database, new: &NewEmail) -> Result<Email, ColdreachError> {
    let new = new.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO emails (id, user_id, contact_id, subject, body_text, body_html)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    new.id,
                    new.user_id,
                    new.contact_id,
                    new.subject,
                    new.body_text,
                    new.body_html,
                ],
            )?;
            let mut stmt =
                conn.prepare(&format!("SELECT {EMAIL_COLUMNS} FROM emails WHERE id = ?1"))?;
            let email = stmt.query_row(params![new.id], row_to_email)?;
            Ok(email)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get an email by id, scoped to its owning user.
pub async fn get_email(
    db: &Database,
    user_id: &str,
    id: &str,
) -> Result<Option<Email>, ColdreachError> {
    let user_id = user_id.to_string();
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {EMAIL_COLUMNS} FROM emails WHERE id = ?1 AND user_id = ?2"
            ))?;
            let email = stmt
                .query_row(params![id, user_id], row_to_email)
                .optional()?;
            Ok(email)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Look up an email by the delivery provider's message id.
pub async fn get_by_provider_message_id(
    db: &Database,
    message_id: &str,
) -> Result<Option<Email>, ColdreachError> {
    let message_id = message_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {EMAIL_COLUMNS} FROM emails WHERE provider_message_id = ?1"
            ))?;
            let email = stmt
                .query_row(params![message_id], row_to_email)
                .optional()?;
            Ok(email)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update an email's status and updated_at timestamp.
pub async fn update_status(
    db: &Database,
    id: &str,
    status: EmailStatus,
) -> Result<(), ColdreachError> {
    let id = id.to_string();
    let status = status.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE emails SET status = ?1,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2",
                params![status, id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Mark an email as sent, stamping sent_at and the provider message id.
/// Returns the updated row.
pub async fn mark_sent(
    db: &Database,
    id: &str,
    provider_message_id: &str,
) -> Result<Email, ColdreachError> {
    let id = id.to_string();
    let provider_message_id = provider_message_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE emails SET status = 'sent',
                 provider_message_id = ?1,
                 sent_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now'),
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2",
                params![provider_message_id, id],
            )?;
            let mut stmt =
                conn.prepare(&format!("SELECT {EMAIL_COLUMNS} FROM emails WHERE id = ?1"))?;
            let email = stmt.query_row(params![id], row_to_email)?;
            Ok(email)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Apply a tracking event: advance status and stamp the event's timestamp
/// column.
pub async fn record_tracking(
    db: &Database,
    id: &str,
    event: TrackingEvent,
) -> Result<(), ColdreachError> {
    let id = id.to_string();
    let status = event.status().to_string();
    // Column names are fixed per event; never derived from input strings.
    let column = match event {
        TrackingEvent::Delivered => "delivered_at",
        TrackingEvent::Opened => "opened_at",
        TrackingEvent::Clicked => "clicked_at",
        TrackingEvent::Bounced => "bounced_at",
    };
    let sql = format!(
        "UPDATE emails SET status = ?1,
         {column} = strftime('%Y-%m-%dT%H:%M:%fZ', 'now'),
         updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
         WHERE id = ?2"
    );
    db.connection()
        .call(move |conn| {
            conn.execute(&sql, params![status, id])?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update an email's subject and body. Draft editing path.
pub async fn update_content(
    db: &Database,
    user_id: &str,
    id: &str,
    subject: &str,
    body_text: &str,
    body_html: Option<&str>,
) -> Result<(), ColdreachError> {
    let user_id = user_id.to_string();
    let id = id.to_string();
    let subject = subject.to_string();
    let body_text = body_text.to_string();
    let body_html = body_html.map(str::to_string);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE emails SET subject = ?1, body_text = ?2, body_html = ?3,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?4 AND user_id = ?5",
                params![subject, body_text, body_html, id, user_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete an email owned by the given user.
pub async fn delete_email(db: &Database, user_id: &str, id: &str) -> Result<(), ColdreachError> {
    let user_id = user_id.to_string();
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM emails WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Count a user's emails grouped by status, in one statement.
///
/// Only statuses present in the table appear; zero-initialization over the
/// full enum happens in the delivery service.
pub async fn count_by_status(
    db: &Database,
    user_id: &str,
) -> Result<Vec<(EmailStatus, i64)>, ColdreachError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT status, COUNT(*) FROM emails WHERE user_id = ?1 GROUP BY status",
            )?;
            let rows = stmt
                .query_map(params![user_id], |row| {
                    let status: String = row.get(0)?;
                    let status: EmailStatus = status.parse().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            0,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?;
                    let count: i64 = row.get(1)?;
                    Ok((status, count))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewContact;
    use crate::queries::contacts;
    use coldreach_core::types::ResearchStatus;

    async fn setup_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        contacts::create_contact(
            &db,
            &NewContact {
                id: "contact-1".to_string(),
                user_id: "user-1".to_string(),
                email: "ceo@stripe.com".to_string(),
                name: Some("Jane Doe".to_string()),
                company_domain: Some("stripe.com".to_string()),
                research_status: ResearchStatus::Pending,
            },
        )
        .await
        .unwrap();
        db
    }

    fn make_email(id: &str) -> NewEmail {
        NewEmail {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            contact_id: "contact-1".to_string(),
            subject: "Quick question".to_string(),
            body_text: "Hi Jane,\n\nSaw your work at Stripe.".to_string(),
            body_html: Some("<p>Hi Jane,</p>".to_string()),
        }
    }

    #[tokio::test]
    async fn create_email_starts_as_draft() {
        let db = setup_db().await;
        let email = create_email(&db, &make_email("e-1")).await.unwrap();
        assert_eq!(email.status, EmailStatus::Draft);
        assert!(email.provider_message_id.is_none());
        assert!(email.sent_at.is_none());
    }

    #[tokio::test]
    async fn get_email_enforces_ownership() {
        let db = setup_db().await;
        create_email(&db, &make_email("e-1")).await.unwrap();

        assert!(get_email(&db, "user-1", "e-1").await.unwrap().is_some());
        assert!(get_email(&db, "user-2", "e-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn mark_sent_stamps_timestamp_and_message_id() {
        let db = setup_db().await;
        create_email(&db, &make_email("e-1")).await.unwrap();

        let sent = mark_sent(&db, "e-1", "msg-abc123").await.unwrap();
        assert_eq!(sent.status, EmailStatus::Sent);
        assert_eq!(sent.provider_message_id.as_deref(), Some("msg-abc123"));
        assert!(sent.sent_at.is_some());
    }

    #[tokio::test]
    async fn get_by_provider_message_id_finds_sent_email() {
        let db = setup_db().await;
        create_email(&db, &make_email("e-1")).await.unwrap();
        mark_sent(&db, "e-1", "msg-lookup").await.unwrap();

        let found = get_by_provider_message_id(&db, "msg-lookup")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, "e-1");

        let missing = get_by_provider_message_id(&db, "msg-unknown").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn record_tracking_sets_status_and_timestamp() {
        let db = setup_db().await;
        create_email(&db, &make_email("e-1")).await.unwrap();
        mark_sent(&db, "e-1", "msg-1").await.unwrap();

        record_tracking(&db, "e-1", TrackingEvent::Opened).await.unwrap();

        let email = get_email(&db, "user-1", "e-1").await.unwrap().unwrap();
        assert_eq!(email.status, EmailStatus::Opened);
        assert!(email.opened_at.is_some());
        assert!(email.delivered_at.is_none());
        assert!(email.clicked_at.is_none());
    }

    #[tokio::test]
    async fn record_tracking_bounced() {
        let db = setup_db().await;
        create_email(&db, &make_email("e-1")).await.unwrap();
        mark_sent(&db, "e-1", "msg-1").await.unwrap();

        record_tracking(&db, "e-1", TrackingEvent::Bounced).await.unwrap();

        let email = get_email(&db, "user-1", "e-1").await.unwrap().unwrap();
        assert_eq!(email.status, EmailStatus::Bounced);
        assert!(email.bounced_at.is_some());
    }

    #[tokio::test]
    async fn update_content_rewrites_subject_and_body() {
        let db = setup_db().await;
        create_email(&db, &make_email("e-1")).await.unwrap();

        update_content(&db, "user-1", "e-1", "New subject", "New body", None)
            .await
            .unwrap();

        let email = get_email(&db, "user-1", "e-1").await.unwrap().unwrap();
        assert_eq!(email.subject, "New subject");
        assert_eq!(email.body_text, "New body");
        assert!(email.body_html.is_none());
    }

    #[tokio::test]
    async fn delete_email_removes_row() {
        let db = setup_db().await;
        create_email(&db, &make_email("e-1")).await.unwrap();
        delete_email(&db, "user-1", "e-1").await.unwrap();
        assert!(get_email(&db, "user-1", "e-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn count_by_status_groups_in_one_query() {
        let db = setup_db().await;
        create_email(&db, &make_email("e-1")).await.unwrap();
        create_email(&db, &make_email("e-2")).await.unwrap();
        create_email(&db, &make_email("e-3")).await.unwrap();
        mark_sent(&db, "e-3", "msg-3").await.unwrap();

        let counts = count_by_status(&db, "user-1").await.unwrap();
        let draft = counts
            .iter()
            .find(|(s, _)| *s == EmailStatus::Draft)
            .map(|(_, c)| *c);
        let sent = counts
            .iter()
            .find(|(s, _)| *s == EmailStatus::Sent)
            .map(|(_, c)| *c);
        assert_eq!(draft, Some(2));
        assert_eq!(sent, Some(1));
        // Statuses with no rows are absent here; the service zero-fills.
        assert_eq!(counts.len(), 2);
    }
}
