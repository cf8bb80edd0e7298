// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Enrichment provider trait for company data lookups.

use async_trait::async_trait;

use crate::error::EnrichmentError;
use crate::types::CompanyResearch;

/// Fetches company metadata for a domain from a third-party data source.
///
/// Implemented by the real HTTP provider and by the deterministic mock
/// used when no valid credential is configured.
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    /// Short identifier for logging ("http", "mock").
    fn name(&self) -> &str;

    /// Look up company data for a normalized domain.
    async fn lookup(&self, domain: &str) -> Result<CompanyResearch, EnrichmentError>;
}
