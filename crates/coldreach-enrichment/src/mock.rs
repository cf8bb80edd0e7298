// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic mock enrichment provider.
//!
//! Used whenever no plausible API credential is configured. The same domain
//! always yields the same synthetic profile, so tests built on top of the
//! mock are repeatable. Attributes come from fixed lookup tables indexed by
//! a stable polynomial hash of the domain string.

use async_trait::async_trait;
use coldreach_core::{CompanyResearch, EnrichmentError, EnrichmentProvider};
use tracing::debug;

const INDUSTRIES: &[&str] = &[
    "Software & Technology",
    "Financial Services",
    "Healthcare",
    "E-commerce & Retail",
    "Manufacturing",
    "Media & Entertainment",
    "Education Technology",
    "Logistics & Supply Chain",
];

const EMPLOYEE_RANGES: &[&str] = &["1-10", "11-50", "51-200", "201-1000", "1001-5000", "5000+"];

const TECH_STACKS: &[&[&str]] = &[
    &["react", "node", "aws"],
    &["python", "django", "gcp"],
    &["rails", "postgres", "heroku"],
    &["java", "spring", "azure"],
    &["go", "kubernetes", "aws"],
    &["vue", "laravel", "digitalocean"],
];

const CITIES: &[&str] = &[
    "San Francisco, CA, US",
    "New York, NY, US",
    "Austin, TX, US",
    "London, UK",
    "Berlin, DE",
    "Toronto, CA",
    "Amsterdam, NL",
    "Singapore, SG",
];

/// Stable polynomial rolling hash over the domain bytes.
///
/// Must not change: synthetic profiles are a pure function of this value.
fn stable_hash(input: &str) -> u64 {
    input
        .bytes()
        .fold(0u64, |h, b| h.wrapping_mul(31).wrapping_add(u64::from(b)))
}

/// Enrichment provider returning synthetic, deterministic company profiles.
#[derive(Debug, Clone, Default)]
pub struct MockEnrichmentProvider;

impl MockEnrichmentProvider {
    pub fn new() -> Self {
        Self
    }

    /// Derives a display name from the first domain label: "tiny-startup.io"
    /// becomes "Tiny Startup".
    fn company_name(domain: &str) -> String {
        let label = domain.split('.').next().unwrap_or(domain);
        label
            .split(['-', '_'])
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl EnrichmentProvider for MockEnrichmentProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn lookup(&self, domain: &str) -> Result<CompanyResearch, EnrichmentError> {
        if domain.is_empty() || !domain.contains('.') {
            return Err(EnrichmentError::InvalidDomain {
                domain: domain.to_string(),
            });
        }

        let hash = stable_hash(domain);
        let name = Self::company_name(domain);
        let industry = INDUSTRIES[(hash % INDUSTRIES.len() as u64) as usize];
        let employee_range = EMPLOYEE_RANGES[(hash % EMPLOYEE_RANGES.len() as u64) as usize];
        let tech_stack = TECH_STACKS[(hash % TECH_STACKS.len() as u64) as usize];
        let location = CITIES[(hash % CITIES.len() as u64) as usize];

        debug!(domain, company = %name, "serving synthetic company profile");

        Ok(CompanyResearch {
            domain: domain.to_string(),
            description: format!("{name} is a {industry} company based in {location}."),
            company_name: name,
            industry: industry.to_string(),
            employee_range: employee_range.to_string(),
            location: location.to_string(),
            website: format!("https://{domain}"),
            linkedin_url: Some(format!(
                "https://linkedin.com/company/{}",
                domain.split('.').next().unwrap_or(domain)
            )),
            twitter_url: None,
            tech_stack: tech_stack.iter().map(|t| t.to_string()).collect(),
            raw_payload: None,
            fetched_at: String::new(),
        })
    }
}
