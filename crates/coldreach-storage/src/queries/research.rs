// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Company research cache operations, keyed by normalized domain.
//!
//! The upsert is a single `INSERT ... ON CONFLICT DO UPDATE` statement so
//! concurrent enrichment of the same domain can never produce two rows.

use coldreach_core::ColdreachError;
use rusqlite::params;

use crate::database::Database;
use crate::models::CompanyResearch;
use crate::queries::OptionalExt;

const RESEARCH_COLUMNS: &str = "domain, company_name, industry, description, employee_range, \
     location, website, linkedin_url, twitter_url, tech_stack, raw_payload, fetched_at";

fn row_to_research(row: &rusqlite::Row) -> Result<CompanyResearch, rusqlite::Error> {
    let tech_stack_json: String = row.get(9)?;
    let tech_stack: Vec<String> = serde_json::from_str(&tech_stack_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(CompanyResearch {
        domain: row.get(0)?,
        company_name: row.get(1)?,
        industry: row.get(2)?,
        description: row.get(3)?,
        employee_range: row.get(4)?,
        location: row.get(5)?,
        website: row.get(6)?,
        linkedin_url: row.get(7)?,
        twitter_url: row.get(8)?,
        tech_stack,
        raw_payload: row.get(10)?,
        fetched_at: row.get(11)?,
    })
}

/// Insert or update the research row for a domain (last write wins).
///
/// `fetched_at` is stamped inside the statement; the value carried on the
/// input struct is ignored.
pub async fn upsert_company(
    db: &Database,
    research: &CompanyResearch,
) -> Result<(), ColdreachError> {
    let r = research.clone();
    let tech_stack_json =
        serde_json::to_string(&r.tech_stack).map_err(|e| ColdreachError::Storage {
            source: Box::new(e),
        })?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO company_research
                     (domain, company_name, industry, description, employee_range,
                      location, website, linkedin_url, twitter_url, tech_stack,
                      raw_payload, fetched_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                         strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(domain) DO UPDATE SET
                     company_name = excluded.company_name,
                     industry = excluded.industry,
                     description = excluded.description,
                     employee_range = excluded.employee_range,
                     location = excluded.location,
                     website = excluded.website,
                     linkedin_url = excluded.linkedin_url,
                     twitter_url = excluded.twitter_url,
                     tech_stack = excluded.tech_stack,
                     raw_payload = excluded.raw_payload,
                     fetched_at = excluded.fetched_at",
                params![
                    r.domain,
                    r.company_name,
                    r.industry,
                    r.description,
                    r.employee_range,
                    r.location,
                    r.website,
                    r.linkedin_url,
                    r.twitter_url,
                    tech_stack_json,
                    r.raw_payload,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get the cached research row for a domain.
pub async fn get_by_domain(
    db: &Database,
    domain: &str,
) -> Result<Option<CompanyResearch>, ColdreachError> {
    let domain = domain.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {RESEARCH_COLUMNS} FROM company_research WHERE domain = ?1"
            ))?;
            let research = stmt
                .query_row(params![domain], row_to_research)
                .optional()?;
            Ok(research)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Batch retrieval for a set of domains.
pub async fn list_by_domains(
    db: &Database,
    domains: &[String],
) -> Result<Vec<CompanyResearch>, ColdreachError> {
    if domains.is_empty() {
        return Ok(vec![]);
    }

    let domains = domains.to_vec();
    db.connection()
        .call(move |conn| {
            let placeholders: Vec<String> = (1..=domains.len()).map(|i| format!("?{i}")).collect();
            let sql = format!(
                "SELECT {RESEARCH_COLUMNS} FROM company_research WHERE domain IN ({}) ORDER BY domain",
                placeholders.join(", ")
            );
            let mut stmt = conn.prepare(&sql)?;
            let params: Vec<&dyn rusqlite::types::ToSql> = domains
                .iter()
                .map(|d| d as &dyn rusqlite::types::ToSql)
                .collect();
            let rows = stmt
                .query_map(params.as_slice(), row_to_research)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete the research row for a domain. Administrative/testing path only;
/// the core never calls this.
pub async fn delete_by_domain(db: &Database, domain: &str) -> Result<(), ColdreachError> {
    let domain = domain.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM company_research WHERE domain = ?1",
                params![domain],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    fn make_research(domain: &str, name: &str) -> CompanyResearch {
        CompanyResearch {
            domain: domain.to_string(),
            company_name: name.to_string(),
            industry: "Software".to_string(),
            description: "Payments infrastructure".to_string(),
            employee_range: "1001-5000".to_string(),
            location: "San Francisco, CA".to_string(),
            website: format!("https://{domain}"),
            linkedin_url: Some(format!("https://linkedin.com/company/{name}")),
            twitter_url: None,
            tech_stack: vec!["Rust".to_string(), "PostgreSQL".to_string()],
            raw_payload: Some(r#"{"source":"test"}"#.to_string()),
            fetched_at: String::new(),
        }
    }

    #[tokio::test]
    async fn upsert_and_get_roundtrips() {
        let db = setup_db().await;
        upsert_company(&db, &make_research("stripe.com", "Stripe"))
            .await
            .unwrap();

        let research = get_by_domain(&db, "stripe.com").await.unwrap().unwrap();
        assert_eq!(research.company_name, "Stripe");
        assert_eq!(research.tech_stack, vec!["Rust", "PostgreSQL"]);
        assert!(!research.fetched_at.is_empty(), "fetched_at stamped in SQL");
    }

    #[tokio::test]
    async fn get_unknown_domain_returns_none() {
        let db = setup_db().await;
        let result = get_by_domain(&db, "unknown.io").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn second_upsert_updates_in_place() {
        let db = setup_db().await;
        upsert_company(&db, &make_research("acme.io", "Acme"))
            .await
            .unwrap();
        upsert_company(&db, &make_research("acme.io", "Acme Inc"))
            .await
            .unwrap();

        let count: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row(
                    "SELECT COUNT(*) FROM company_research WHERE domain = 'acme.io'",
                    [],
                    |row| row.get(0),
                )
            })
            .await
            .unwrap();
        assert_eq!(count, 1, "at most one row per domain");

        let research = get_by_domain(&db, "acme.io").await.unwrap().unwrap();
        assert_eq!(research.company_name, "Acme Inc", "last write wins");
    }

    #[tokio::test]
    async fn concurrent_upserts_keep_single_row() {
        let db = std::sync::Arc::new(setup_db().await);

        let mut handles = Vec::new();
        for i in 0..8 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                upsert_company(&db, &make_research("race.dev", &format!("Race {i}"))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let count: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row("SELECT COUNT(*) FROM company_research", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn list_by_domains_returns_matching_subset() {
        let db = setup_db().await;
        upsert_company(&db, &make_research("a.com", "A")).await.unwrap();
        upsert_company(&db, &make_research("b.com", "B")).await.unwrap();
        upsert_company(&db, &make_research("c.com", "C")).await.unwrap();

        let rows = list_by_domains(
            &db,
            &["a.com".to_string(), "c.com".to_string(), "zzz.com".to_string()],
        )
        .await
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].domain, "a.com");
        assert_eq!(rows[1].domain, "c.com");
    }

    #[tokio::test]
    async fn list_by_domains_empty_input() {
        let db = setup_db().await;
        let rows = list_by_domains(&db, &[]).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn delete_by_domain_removes_row() {
        let db = setup_db().await;
        upsert_company(&db, &make_research("gone.com", "Gone"))
            .await
            .unwrap();
        delete_by_domain(&db, "gone.com").await.unwrap();
        assert!(get_by_domain(&db, "gone.com").await.unwrap().is_none());
    }
}
