// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cache-first enrichment service.
//!
//! Wraps a provider behind the shared research cache: a cache hit never
//! touches the network, and a successful fetch is persisted with an atomic
//! upsert so concurrent callers cannot produce two rows for one domain.

use std::sync::Arc;
use std::time::Duration;

use coldreach_config::model::EnrichmentConfig;
use coldreach_core::{CompanyResearch, EnrichmentError, EnrichmentProvider};
use coldreach_storage::database::Database;
use coldreach_storage::queries::research;
use tracing::{debug, info};

/// Company enrichment with a shared persistent cache in front of the
/// configured provider.
pub struct EnrichmentService {
    db: Arc<Database>,
    provider: Arc<dyn EnrichmentProvider>,
    timeout: Duration,
}

impl EnrichmentService {
    pub fn new(
        db: Arc<Database>,
        provider: Arc<dyn EnrichmentProvider>,
        timeout: Duration,
    ) -> Self {
        Self {
            db,
            provider,
            timeout,
        }
    }

    /// Builds the service with the provider selected from configuration.
    pub fn from_config(db: Arc<Database>, config: &EnrichmentConfig) -> Self {
        Self::new(
            db,
            crate::provider_from_config(config),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Fetch company data for a domain, cache-first.
    ///
    /// Cache entries never expire; use [`refresh`](Self::refresh) to force a
    /// re-fetch. The returned row carries the storage-stamped `fetched_at`.
    pub async fn enrich(&self, domain: &str) -> Result<CompanyResearch, EnrichmentError> {
        let domain = normalize_domain(domain)?;

        if let Some(cached) = research::get_by_domain(&self.db, &domain)
            .await
            .map_err(storage_error)?
        {
            debug!(domain, provider = self.provider.name(), "enrichment cache hit");
            return Ok(cached);
        }
        debug!(domain, provider = self.provider.name(), "enrichment cache miss");

        self.fetch_and_store(&domain).await
    }

    /// Force a provider fetch for a domain, overwriting any cached row.
    pub async fn refresh(&self, domain: &str) -> Result<CompanyResearch, EnrichmentError> {
        let domain = normalize_domain(domain)?;
        info!(domain, provider = self.provider.name(), "refreshing enrichment cache");
        self.fetch_and_store(&domain).await
    }

    async fn fetch_and_store(&self, domain: &str) -> Result<CompanyResearch, EnrichmentError> {
        let fetched = tokio::time::timeout(self.timeout, self.provider.lookup(domain))
            .await
            .map_err(|_| EnrichmentError::ApiError {
                message: format!("enrichment timed out after {:?}", self.timeout),
            })??;

        research::upsert_company(&self.db, &fetched)
            .await
            .map_err(storage_error)?;

        // Read back so callers observe the storage-stamped fetched_at.
        research::get_by_domain(&self.db, domain)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| EnrichmentError::ApiError {
                message: format!("research row for {domain} missing after upsert"),
            })
    }
}

/// Normalize and validate a domain before any cache or provider work.
fn normalize_domain(domain: &str) -> Result<String, EnrichmentError> {
    let domain = domain.trim().to_lowercase();
    if domain.is_empty()
        || !domain.contains('.')
        || domain.contains('@')
        || domain.contains(char::is_whitespace)
    {
        return Err(EnrichmentError::InvalidDomain { domain });
    }
    Ok(domain)
}

fn storage_error(e: coldreach_core::ColdreachError) -> EnrichmentError {
    EnrichmentError::ApiError {
        message: format!("storage failure: {e}"),
    }
}
