// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Curated denylist of free/consumer mail providers.
//!
//! Static configuration data, not logic: extend by appending entries.
//! All entries are lower-case; lookups happen after normalization.

/// Domains whose addresses classify as personal contacts.
pub const PERSONAL_PROVIDERS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "yahoo.co.uk",
    "ymail.com",
    "hotmail.com",
    "hotmail.co.uk",
    "outlook.com",
    "live.com",
    "msn.com",
    "icloud.com",
    "me.com",
    "mac.com",
    "aol.com",
    "protonmail.com",
    "proton.me",
    "pm.me",
    "tutanota.com",
    "mail.com",
    "zoho.com",
    "fastmail.com",
    "hey.com",
    "gmx.com",
    "gmx.de",
    "web.de",
    "yandex.com",
    "yandex.ru",
    "mail.ru",
    "qq.com",
    "163.com",
    "126.com",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_normalized() {
        for domain in PERSONAL_PROVIDERS {
            assert_eq!(*domain, domain.to_lowercase(), "entry must be lower-case");
            assert!(domain.contains('.'), "entry must be a full domain");
            assert_eq!(*domain, domain.trim(), "entry must be trimmed");
        }
    }

    #[test]
    fn no_duplicate_entries() {
        let mut seen = std::collections::HashSet::new();
        for domain in PERSONAL_PROVIDERS {
            assert!(seen.insert(domain), "duplicate entry: {domain}");
        }
    }
}
