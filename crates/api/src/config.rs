use axum::http::HeaderValue;

use folio_core::config::{env_lookup, parse_or, string_or, ConfigError};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// The single origin allowed by CORS, with credentials.
    pub frontend_origin: HeaderValue,
    /// Runtime mode reported at startup and by the health check.
    pub environment: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `5000`                  |
    /// | `FRONTEND_URL`         | `http://localhost:3000` |
    /// | `APP_ENV`              | `development`           |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let frontend_url = string_or(lookup, "FRONTEND_URL", "http://localhost:3000");
        let frontend_origin =
            HeaderValue::from_str(&frontend_url).map_err(|_| ConfigError::Invalid {
                key: "FRONTEND_URL",
                expected: "origin",
                value: frontend_url.clone(),
            })?;

        Ok(Self {
            host: string_or(lookup, "HOST", "0.0.0.0"),
            port: parse_or(lookup, "PORT", 5000, "port number")?,
            frontend_origin,
            environment: string_or(lookup, "APP_ENV", "development"),
            request_timeout_secs: parse_or(lookup, "REQUEST_TIMEOUT_SECS", 30, "number of seconds")?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(
        pairs: &'static [(&'static str, &'static str)],
    ) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::from_lookup(&lookup_from(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.frontend_origin, "http://localhost:3000");
        assert_eq!(config.environment, "development");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.is_production());
    }

    #[test]
    fn overrides() {
        let config = ServerConfig::from_lookup(&lookup_from(&[
            ("PORT", "8080"),
            ("FRONTEND_URL", "https://example.com"),
            ("APP_ENV", "production"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.frontend_origin, "https://example.com");
        assert!(config.is_production());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ServerConfig::from_lookup(&lookup_from(&[("PORT", "99999")])).unwrap_err();
        assert_eq!(err.to_string(), "PORT must be a valid port number, got '99999'");

        let err =
            ServerConfig::from_lookup(&lookup_from(&[("FRONTEND_URL", "http://bad\nhost")]))
                .unwrap_err();
        assert_matches::assert_matches!(err, ConfigError::Invalid { key: "FRONTEND_URL", .. });
    }
}
