// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the company enrichment API.
//!
//! Provides [`HttpEnrichmentProvider`] which handles request construction,
//! bearer authentication, and mapping HTTP failure modes onto
//! [`EnrichmentError`].

use std::time::Duration;

use async_trait::async_trait;
use coldreach_core::{ColdreachError, CompanyResearch, EnrichmentError, EnrichmentProvider};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

/// Enrichment provider backed by a Clearbit-compatible company API.
///
/// `GET {base_url}/companies/find?domain={domain}` with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpEnrichmentProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEnrichmentProvider {
    /// Creates a new enrichment API client.
    ///
    /// Fails when the API key cannot be encoded as a header value or the
    /// HTTP client cannot be built.
    pub fn new(
        api_key: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ColdreachError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {api_key}");
        headers.insert(
            "authorization",
            HeaderValue::from_str(&bearer)
                .map_err(|e| ColdreachError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ColdreachError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl EnrichmentProvider for HttpEnrichmentProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn lookup(&self, domain: &str) -> Result<CompanyResearch, EnrichmentError> {
        let url = format!("{}/companies/find", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("domain", domain)])
            .send()
            .await
            .map_err(|e| EnrichmentError::ApiError {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        debug!(status = %status, domain, "enrichment response received");

        match status {
            StatusCode::NOT_FOUND => return Err(EnrichmentError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => return Err(EnrichmentError::RateLimited),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(EnrichmentError::ApiError {
                    message: format!("authentication rejected ({status})"),
                });
            }
            s if !s.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(EnrichmentError::ApiError {
                    message: format!("API returned {status}: {body}"),
                });
            }
            _ => {}
        }

        let body = response
            .text()
            .await
            .map_err(|e| EnrichmentError::ApiError {
                message: format!("failed to read response body: {e}"),
            })?;
        let company: ApiCompany =
            serde_json::from_str(&body).map_err(|e| EnrichmentError::ApiError {
                message: format!("failed to parse API response: {e}"),
            })?;

        Ok(company.into_research(domain, body))
    }
}

/// Wire shape of a company record, Clearbit-style camelCase.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCompany {
    name: Option<String>,
    domain: Option<String>,
    description: Option<String>,
    category: Option<ApiCategory>,
    metrics: Option<ApiMetrics>,
    geo: Option<ApiGeo>,
    linkedin: Option<ApiHandle>,
    twitter: Option<ApiHandle>,
    #[serde(default)]
    tech: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCategory {
    industry: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMetrics {
    employees_range: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiGeo {
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiHandle {
    handle: Option<String>,
}

impl ApiCompany {
    /// Flattens the provider payload into the cached research shape. The
    /// raw body is retained verbatim; `fetched_at` is stamped by storage.
    fn into_research(self, requested_domain: &str, raw_body: String) -> CompanyResearch {
        let domain = self
            .domain
            .unwrap_or_else(|| requested_domain.to_string())
            .to_lowercase();
        let location = self
            .geo
            .map(|geo| {
                [geo.city, geo.state, geo.country]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        CompanyResearch {
            company_name: self.name.unwrap_or_else(|| domain.clone()),
            website: format!("https://{domain}"),
            industry: self
                .category
                .and_then(|c| c.industry)
                .unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            employee_range: self
                .metrics
                .and_then(|m| m.employees_range)
                .unwrap_or_default(),
            location,
            linkedin_url: self
                .linkedin
                .and_then(|l| l.handle)
                .map(|h| format!("https://linkedin.com/{h}")),
            twitter_url: self
                .twitter
                .and_then(|t| t.handle)
                .map(|h| format!("https://twitter.com/{h}")),
            tech_stack: self.tech,
            raw_payload: Some(raw_body),
            fetched_at: String::new(),
            domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> HttpEnrichmentProvider {
        HttpEnrichmentProvider::new(
            "test-api-key",
            "https://unused.invalid",
            Duration::from_secs(10),
        )
        .unwrap()
        .with_base_url(base_url.to_string())
    }

    fn company_body() -> serde_json::Value {
        serde_json::json!({
            "name": "Stripe",
            "domain": "stripe.com",
            "description": "Online payment processing for internet businesses.",
            "category": {"industry": "Financial Services"},
            "metrics": {"employeesRange": "1001-5000"},
            "geo": {"city": "San Francisco", "state": "CA", "country": "US"},
            "linkedin": {"handle": "company/stripe"},
            "twitter": {"handle": "stripe"},
            "tech": ["react", "ruby", "aws"]
        })
    }

    #[tokio::test]
    async fn lookup_success_maps_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/companies/find"))
            .and(query_param("domain", "stripe.com"))
            .and(header("authorization", "Bearer test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(company_body()))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let research = client.lookup("stripe.com").await.unwrap();

        assert_eq!(research.domain, "stripe.com");
        assert_eq!(research.company_name, "Stripe");
        assert_eq!(research.industry, "Financial Services");
        assert_eq!(research.employee_range, "1001-5000");
        assert_eq!(research.location, "San Francisco, CA, US");
        assert_eq!(research.website, "https://stripe.com");
        assert_eq!(
            research.linkedin_url.as_deref(),
            Some("https://linkedin.com/company/stripe")
        );
        assert_eq!(research.tech_stack, vec!["react", "ruby", "aws"]);
        assert!(research.raw_payload.is_some());
        assert!(research.fetched_at.is_empty());
    }

    #[tokio::test]
    async fn lookup_handles_sparse_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/companies/find"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let research = client.lookup("tiny-startup.io").await.unwrap();

        // Falls back to the requested domain for name and website.
        assert_eq!(research.domain, "tiny-startup.io");
        assert_eq!(research.company_name, "tiny-startup.io");
        assert_eq!(research.website, "https://tiny-startup.io");
        assert_eq!(research.industry, "");
        assert_eq!(research.linkedin_url, None);
        assert!(research.tech_stack.is_empty());
    }

    #[tokio::test]
    async fn lookup_404_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/companies/find"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.lookup("unknown.example").await.unwrap_err();
        assert!(matches!(err, EnrichmentError::NotFound));
    }

    #[tokio::test]
    async fn lookup_429_is_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/companies/find"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.lookup("stripe.com").await.unwrap_err();
        assert!(matches!(err, EnrichmentError::RateLimited));
    }

    #[tokio::test]
    async fn lookup_401_is_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/companies/find"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.lookup("stripe.com").await.unwrap_err();
        match err {
            EnrichmentError::ApiError { message } => {
                assert!(message.contains("authentication"), "got: {message}");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn lookup_500_is_api_error_with_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/companies/find"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.lookup("stripe.com").await.unwrap_err();
        match err {
            EnrichmentError::ApiError { message } => {
                assert!(message.contains("500"), "got: {message}");
                assert!(message.contains("boom"), "got: {message}");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }
}
