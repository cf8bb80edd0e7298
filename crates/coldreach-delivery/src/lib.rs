// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound email delivery: send lifecycle, tracking events, statistics.
//!
//! The provider is selected once from configuration. Without a plausible
//! credential the mock provider is used: sends "succeed" with a synthetic
//! message id and the payload is logged, never transmitted.

use std::sync::Arc;

use coldreach_config::model::DeliveryConfig;
use coldreach_core::{DeliveryProvider, is_placeholder_key};
use tracing::{info, warn};

pub mod client;
pub mod mock;
pub mod service;

pub use client::HttpDeliveryProvider;
pub use mock::MockDeliveryProvider;
pub use service::{BatchItem, BatchSendReport, DeliveryService, TrackingOutcome};

/// Select the delivery provider from configuration. Shares the placeholder
/// heuristics with enrichment: anything test-like forces mock mode.
pub fn provider_from_config(config: &DeliveryConfig) -> Arc<dyn DeliveryProvider> {
    if let Some(key) = config.api_key.as_deref()
        && !is_placeholder_key(key)
    {
        match HttpDeliveryProvider::new(key, &config.base_url) {
            Ok(provider) => {
                info!(base_url = %config.base_url, "using HTTP delivery provider");
                return Arc::new(provider);
            }
            Err(e) => {
                warn!(error = %e, "failed to build HTTP delivery provider, falling back to mock");
            }
        }
    } else {
        info!("no delivery credential configured, using mock provider");
    }
    Arc::new(MockDeliveryProvider::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_selects_mock_provider() {
        let config = DeliveryConfig::default();
        assert_eq!(provider_from_config(&config).name(), "mock");
    }

    #[test]
    fn placeholder_key_selects_mock_provider() {
        let config = DeliveryConfig {
            api_key: Some("re_test_123456789012345".to_string()),
            ..Default::default()
        };
        assert_eq!(provider_from_config(&config).name(), "mock");
    }

    #[test]
    fn real_key_selects_http_provider() {
        let config = DeliveryConfig {
            api_key: Some("re_9f8e7d6c5b4a3928170655aa".to_string()),
            ..Default::default()
        };
        assert_eq!(provider_from_config(&config).name(), "http");
    }
}
