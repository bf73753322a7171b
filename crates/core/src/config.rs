//! Helpers for reading settings from environment-style key/value sources.
//!
//! Every loader takes a `lookup` function instead of reading the process
//! environment directly, so parsing can be tested without mutating globals.

use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Lookup that reads the process environment.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Read `key`, falling back to `default` when unset or blank.
pub fn string_or(lookup: &dyn Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read and parse `key`, falling back to `default` when unset or blank.
pub fn parse_or<T: FromStr>(
    lookup: &dyn Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(key).map(|v| v.trim().to_string()) {
        Some(raw) if !raw.is_empty() => raw.parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value: raw,
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn string_or_uses_default_for_missing_and_blank() {
        let lookup = lookup_from(&[("BLANK", "  ")]);
        assert_eq!(string_or(&lookup, "MISSING", "fallback"), "fallback");
        assert_eq!(string_or(&lookup, "BLANK", "fallback"), "fallback");
    }

    #[test]
    fn parse_or_parses_present_values() {
        let lookup = lookup_from(&[("PORT", " 8080 ")]);
        assert_eq!(parse_or(&lookup, "PORT", 5000u16, "u16"), Ok(8080));
        assert_eq!(parse_or(&lookup, "OTHER", 5000u16, "u16"), Ok(5000));
    }

    #[test]
    fn parse_or_reports_invalid_values() {
        let lookup = lookup_from(&[("PORT", "eighty")]);
        let err = parse_or(&lookup, "PORT", 5000u16, "u16").unwrap_err();
        assert_eq!(err.to_string(), "PORT must be a valid u16, got 'eighty'");
    }
}
