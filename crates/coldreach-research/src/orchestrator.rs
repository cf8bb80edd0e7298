// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Research orchestration: drives `pending -> processing -> {complete|failed}`.
//!
//! Status writes are best-effort. A write failure is logged and swallowed so
//! a detached research task can never propagate a failure back into the
//! contact-creation path that spawned it.

use std::sync::Arc;
use std::time::Duration;

use coldreach_config::model::ResearchConfig;
use coldreach_core::ResearchStatus;
use coldreach_enrichment::EnrichmentService;
use coldreach_storage::database::Database;
use coldreach_storage::queries::contacts;
use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Per-contact result of one research run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchOutcome {
    pub contact_id: String,
    pub domain: String,
    pub status: ResearchStatus,
    /// Provider error message when `status` is `failed`.
    pub error: Option<String>,
}

/// Drives the research state machine for business contacts.
pub struct ResearchOrchestrator {
    db: Arc<Database>,
    enrichment: Arc<EnrichmentService>,
    batch_concurrency: usize,
    batch_delay: Duration,
}

impl ResearchOrchestrator {
    pub fn new(db: Arc<Database>, enrichment: Arc<EnrichmentService>) -> Self {
        Self::with_config(db, enrichment, &ResearchConfig::default())
    }

    pub fn with_config(
        db: Arc<Database>,
        enrichment: Arc<EnrichmentService>,
        config: &ResearchConfig,
    ) -> Self {
        Self {
            db,
            enrichment,
            batch_concurrency: config.batch_concurrency.max(1),
            batch_delay: Duration::from_millis(config.batch_delay_ms),
        }
    }

    /// Research one contact's company, advancing its status.
    ///
    /// Never returns an error: enrichment failures land in the outcome as
    /// `failed`, and status-write failures are logged and swallowed.
    pub async fn research_contact(&self, contact_id: &str, domain: &str) -> ResearchOutcome {
        self.set_status(contact_id, domain, ResearchStatus::Processing)
            .await;

        let (status, error) = match self.enrichment.enrich(domain).await {
            Ok(research) => {
                info!(contact_id, domain, company = %research.company_name, "research complete");
                (ResearchStatus::Complete, None)
            }
            Err(e) => {
                warn!(contact_id, domain, error = %e, "research failed");
                (ResearchStatus::Failed, Some(e.to_string()))
            }
        };

        self.set_status(contact_id, domain, status).await;

        ResearchOutcome {
            contact_id: contact_id.to_string(),
            domain: domain.to_string(),
            status,
            error,
        }
    }

    /// Kick off research detached from the caller.
    ///
    /// The returned handle may be dropped; the task logs its own outcome
    /// and its failure is never observable by the caller.
    pub fn spawn_research(
        self: &Arc<Self>,
        contact_id: String,
        domain: String,
    ) -> JoinHandle<ResearchOutcome> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.research_contact(&contact_id, &domain).await })
    }

    /// Research a batch of contacts in fixed-size concurrent windows.
    ///
    /// A short delay between windows respects provider rate limits. Item
    /// failures are recorded in their outcome and never abort the batch;
    /// outcomes come back in input order.
    pub async fn research_batch(&self, items: &[(String, String)]) -> Vec<ResearchOutcome> {
        let mut outcomes = Vec::with_capacity(items.len());
        let windows: Vec<_> = items.chunks(self.batch_concurrency).collect();
        let last = windows.len().saturating_sub(1);

        for (i, window) in windows.into_iter().enumerate() {
            let futures = window
                .iter()
                .map(|(contact_id, domain)| self.research_contact(contact_id, domain));
            outcomes.extend(join_all(futures).await);

            if i < last {
                tokio::time::sleep(self.batch_delay).await;
            }
        }
        outcomes
    }

    async fn set_status(&self, contact_id: &str, domain: &str, status: ResearchStatus) {
        if let Err(e) = contacts::update_research_status(&self.db, contact_id, status).await {
            warn!(contact_id, domain, %status, error = %e, "failed to write research status");
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use coldreach_core::{CompanyResearch, EnrichmentError, EnrichmentProvider};
    use coldreach_enrichment::MockEnrichmentProvider;
    use coldreach_storage::models::NewContact;
    use coldreach_storage::queries::research;

    use super::*;

    struct FailingProvider;

    #[async_trait]
    impl EnrichmentProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn lookup(&self, _domain: &str) -> Result<CompanyResearch, EnrichmentError> {
            Err(EnrichmentError::ApiError {
                message: "provider unavailable".into(),
            })
        }
    }

    async fn orchestrator_with(provider: Arc<dyn EnrichmentProvider>) -> Arc<ResearchOrchestrator> {
        let db = Arc::new(Database::open_in_memory().await.unwrap());
        let enrichment = Arc::new(EnrichmentService::new(
            db.clone(),
            provider,
            Duration::from_secs(10),
        ));
        let config = ResearchConfig {
            batch_concurrency: 3,
            batch_delay_ms: 10,
        };
        Arc::new(ResearchOrchestrator::with_config(db, enrichment, &config))
    }

    async fn seed_contact(db: &Database, id: &str, email: &str, domain: &str) {
        contacts::create_contact(
            db,
            &NewContact {
                id: id.to_string(),
                user_id: "user-1".to_string(),
                email: email.to_string(),
                name: None,
                company_domain: Some(domain.to_string()),
                research_status: ResearchStatus::Pending,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn successful_research_reaches_complete() {
        let orch = orchestrator_with(Arc::new(MockEnrichmentProvider::new())).await;
        seed_contact(&orch.db, "contact-1", "ceo@stripe.com", "stripe.com").await;

        let outcome = orch.research_contact("contact-1", "stripe.com").await;
        assert_eq!(outcome.status, ResearchStatus::Complete);
        assert_eq!(outcome.error, None);

        let contact = contacts::get_contact(&orch.db, "contact-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(contact.research_status, ResearchStatus::Complete);

        let cached = research::get_by_domain(&orch.db, "stripe.com").await.unwrap();
        assert!(cached.is_some(), "research row must be persisted");
    }

    #[tokio::test]
    async fn provider_failure_reaches_failed() {
        let orch = orchestrator_with(Arc::new(FailingProvider)).await;
        seed_contact(&orch.db, "contact-1", "ceo@stripe.com", "stripe.com").await;

        let outcome = orch.research_contact("contact-1", "stripe.com").await;
        assert_eq!(outcome.status, ResearchStatus::Failed);
        assert!(outcome.error.as_deref().unwrap().contains("unavailable"));

        let contact = contacts::get_contact(&orch.db, "contact-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(contact.research_status, ResearchStatus::Failed);
    }

    #[tokio::test]
    async fn unknown_contact_does_not_panic() {
        // Status writes are best-effort; a missing contact row never
        // fails the research run itself.
        let orch = orchestrator_with(Arc::new(MockEnrichmentProvider::new())).await;
        let outcome = orch.research_contact("ghost", "stripe.com").await;
        assert_eq!(outcome.status, ResearchStatus::Complete);
    }

    #[tokio::test]
    async fn spawned_research_runs_detached() {
        let orch = orchestrator_with(Arc::new(MockEnrichmentProvider::new())).await;
        seed_contact(&orch.db, "contact-1", "ceo@stripe.com", "stripe.com").await;

        let handle = orch.spawn_research("contact-1".into(), "stripe.com".into());
        let outcome = handle.await.unwrap();
        assert_eq!(outcome.status, ResearchStatus::Complete);
    }

    #[tokio::test]
    async fn batch_preserves_order_and_survives_failures() {
        let orch = orchestrator_with(Arc::new(MockEnrichmentProvider::new())).await;
        for (id, domain) in [
            ("c-1", "stripe.com"),
            ("c-2", "shopify.com"),
            ("c-3", "linear.app"),
            ("c-4", "vercel.com"),
        ] {
            seed_contact(&orch.db, id, &format!("x@{domain}"), domain).await;
        }

        let items: Vec<(String, String)> = vec![
            ("c-1".into(), "stripe.com".into()),
            // Invalid domain fails enrichment but must not abort the batch.
            ("c-2".into(), "nodot".into()),
            ("c-3".into(), "linear.app".into()),
            ("c-4".into(), "vercel.com".into()),
        ];
        let outcomes = orch.research_batch(&items).await;

        assert_eq!(outcomes.len(), 4);
        let ids: Vec<&str> = outcomes.iter().map(|o| o.contact_id.as_str()).collect();
        assert_eq!(ids, vec!["c-1", "c-2", "c-3", "c-4"]);
        assert_eq!(outcomes[0].status, ResearchStatus::Complete);
        assert_eq!(outcomes[1].status, ResearchStatus::Failed);
        assert_eq!(outcomes[2].status, ResearchStatus::Complete);
        assert_eq!(outcomes[3].status, ResearchStatus::Complete);
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let orch = orchestrator_with(Arc::new(MockEnrichmentProvider::new())).await;
        let outcomes = orch.research_batch(&[]).await;
        assert!(outcomes.is_empty());
    }
}
