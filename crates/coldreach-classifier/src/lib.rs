// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure business/personal email classification.
//!
//! No I/O, no side effects: `classify` is a deterministic function of the
//! input address. A domain that cannot be extracted at all (`domain: None`)
//! is distinct from a domain classified as personal -- callers must treat
//! "cannot classify" as a rejected input, not as a personal contact.

use std::sync::OnceLock;

use regex::Regex;

mod denylist;

pub use denylist::PERSONAL_PROVIDERS;

/// Classification result for one email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// True when the domain is neither a consumer mail provider nor an
    /// educational/government domain.
    pub is_business: bool,
    /// The normalized (lower-cased, trimmed) domain, or `None` when the
    /// address is malformed.
    pub domain: Option<String>,
}

fn domain_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Labels of alphanumerics/hyphens, at least one dot, alphabetic TLD.
    RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)*\.[a-z]{2,}$")
            .unwrap_or_else(|e| panic!("invalid domain regex: {e}"))
    })
}

/// Extract the normalized domain from an email address.
///
/// Returns `None` for malformed addresses: no `@`, an empty local part or
/// domain, a domain with no dot, or a domain failing the strict character
/// check.
pub fn extract_domain(email: &str) -> Option<String> {
    let email = email.trim();
    let (local, domain) = email.rsplit_once('@')?;
    if local.is_empty() || domain.is_empty() {
        return None;
    }
    let domain = domain.to_lowercase();
    if !domain.contains('.') || !domain_regex().is_match(&domain) {
        return None;
    }
    Some(domain)
}

/// Classify an email address as business or personal.
///
/// Personal: the domain is on the consumer-provider denylist, or is an
/// educational/government domain (including regional variants such as
/// `.edu.au`, `.ac.uk`, `.gov.uk`, `.gob.mx`). Everything else that is
/// syntactically valid is business.
pub fn classify(email: &str) -> Classification {
    match extract_domain(email) {
        None => Classification {
            is_business: false,
            domain: None,
        },
        Some(domain) => {
            let is_business = !is_personal_provider(&domain) && !is_institutional(&domain);
            Classification {
                is_business,
                domain: Some(domain),
            }
        }
    }
}

/// True when the domain is a known free/consumer mail provider.
pub fn is_personal_provider(domain: &str) -> bool {
    PERSONAL_PROVIDERS.contains(&domain)
}

/// True for educational and government domains, including two-level
/// regional registries (`ac.uk`, `edu.au`, `gov.uk`, `gob.mx`, ...).
pub fn is_institutional(domain: &str) -> bool {
    if domain.ends_with(".edu") || domain.ends_with(".gov") {
        return true;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() >= 3 {
        return matches!(labels[labels.len() - 2], "edu" | "gov" | "ac" | "gob");
    }
    false
}
