// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Static API key allow-list.

use subtle::ConstantTimeEq;

/// Validates API keys against the allow-list loaded at startup.
///
/// Custom `Debug` redacts the keys to keep them out of logs.
#[derive(Clone, Default)]
pub struct ApiKeyValidator {
    keys: Vec<String>,
}

impl std::fmt::Debug for ApiKeyValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyValidator")
            .field("keys", &format_args!("[{} REDACTED]", self.keys.len()))
            .finish()
    }
}

impl ApiKeyValidator {
    /// Parse a comma-separated list. Entries are trimmed and empty ones dropped.
    pub fn from_list(list: &str) -> Self {
        let keys = list
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect();
        Self { keys }
    }

    /// Number of configured keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Check membership in the allow-list.
    ///
    /// Every configured key is compared so the time taken does not depend on
    /// which key (if any) matched.
    pub fn is_valid(&self, candidate: &str) -> bool {
        let mut matched = false;
        for key in &self.keys {
            matched |= constant_time_eq(candidate, key);
        }
        matched
    }
}

fn constant_time_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_entries() {
        let validator = ApiKeyValidator::from_list(" key-one, key-two ,,");
        assert_eq!(validator.len(), 2);
        assert!(validator.is_valid("key-one"));
        assert!(validator.is_valid("key-two"));
        assert!(!validator.is_valid(" key-two "));
    }

    #[test]
    fn empty_list_accepts_nothing() {
        let validator = ApiKeyValidator::from_list("");
        assert!(validator.is_empty());
        assert!(!validator.is_valid(""));
        assert!(!validator.is_valid("anything"));
    }

    #[test]
    fn rejects_prefixes_and_case_variants() {
        let validator = ApiKeyValidator::from_list("Secret123");
        assert!(!validator.is_valid("Secret12"));
        assert!(!validator.is_valid("secret123"));
        assert!(!validator.is_valid("Secret1234"));
    }

    #[test]
    fn debug_does_not_print_keys() {
        let validator = ApiKeyValidator::from_list("super-secret");
        let printed = format!("{validator:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("REDACTED"));
    }
}
