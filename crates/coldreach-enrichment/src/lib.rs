// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Company enrichment: cache-first lookups with a pluggable provider.
//!
//! The provider strategy is chosen once at construction time from
//! configuration: a real HTTP provider when a plausible API key is present,
//! the deterministic mock otherwise. Business logic never branches on which
//! implementation is behind the [`EnrichmentProvider`] seam.

use std::sync::Arc;

use coldreach_config::model::EnrichmentConfig;
use coldreach_core::{EnrichmentProvider, is_placeholder_key};
use tracing::{info, warn};

pub mod client;
pub mod mock;
pub mod service;

pub use client::HttpEnrichmentProvider;
pub use mock::MockEnrichmentProvider;
pub use service::EnrichmentService;

/// Select the enrichment provider from configuration.
///
/// A missing or placeholder-looking API key forces mock mode without ever
/// attempting a network call.
pub fn provider_from_config(config: &EnrichmentConfig) -> Arc<dyn EnrichmentProvider> {
    if let Some(key) = config.api_key.as_deref()
        && !is_placeholder_key(key)
    {
        let timeout = std::time::Duration::from_secs(config.timeout_secs);
        match HttpEnrichmentProvider::new(key, &config.base_url, timeout) {
            Ok(provider) => {
                info!(base_url = %config.base_url, "using HTTP enrichment provider");
                return Arc::new(provider);
            }
            Err(e) => {
                warn!(error = %e, "failed to build HTTP enrichment provider, falling back to mock");
            }
        }
    } else {
        info!("no enrichment credential configured, using mock provider");
    }
    Arc::new(MockEnrichmentProvider::new())
}
