// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential plausibility checks shared by all provider selectors.

/// True for credentials that are obviously placeholders rather than real
/// keys: test markers, template fragments, or implausibly short strings.
///
/// A placeholder forces mock mode without ever attempting a network call.
pub fn is_placeholder_key(key: &str) -> bool {
    let lowered = key.trim().to_lowercase();
    lowered.len() < 16
        || lowered.contains("test")
        || lowered.contains("your-")
        || lowered.contains("xxx")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_keys_are_detected() {
        for key in [
            "",
            "short",
            "sk_test_12345678901234567890",
            "your-api-key-here-but-long",
            "xxxxxxxxxxxxxxxxxxxxxxxx",
            "sk_live_TESTtesttesttesttest",
            "  sk_live_9f8e  ",
        ] {
            assert!(is_placeholder_key(key), "should reject {key:?}");
        }
    }

    #[test]
    fn plausible_keys_are_accepted() {
        for key in [
            "sk_live_9f8e7d6c5b4a39281706",
            "re_9f8e7d6c5b4a3928170655aa",
            "sk-ant-REDACTED",
        ] {
            assert!(!is_placeholder_key(key), "should accept {key:?}");
        }
    }
}
