//! Database connection settings.

use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

use folio_core::config::{env_lookup, parse_or, string_or, ConfigError};

/// Connection and pool settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Full connection URL. When set, the individual parts are ignored.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Pool ceiling (default: `10`).
    pub max_connections: u32,
    /// Seconds a caller waits for a free connection (default: `60`).
    pub acquire_timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "portfolio_db".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 60,
        }
    }
}

impl DbConfig {
    /// Load from `DATABASE_URL` or the `DB_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            host: string_or(lookup, "DB_HOST", &defaults.host),
            port: parse_or(lookup, "DB_PORT", defaults.port, "port number")?,
            user: string_or(lookup, "DB_USER", &defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            database: string_or(lookup, "DB_NAME", &defaults.database),
            max_connections: parse_or(
                lookup,
                "DB_MAX_CONNECTIONS",
                defaults.max_connections,
                "connection count",
            )?,
            acquire_timeout_secs: parse_or(
                lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout_secs,
                "number of seconds",
            )?,
        })
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return url.parse();
        }
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = DbConfig::from_lookup(&lookup_from(&[])).unwrap();
        assert_eq!(config, DbConfig::default());
        assert_eq!(config.acquire_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn parts_are_read_individually() {
        let config = DbConfig::from_lookup(&lookup_from(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_NAME", "folio"),
            ("DB_MAX_CONNECTIONS", "4"),
        ]))
        .unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.database, "folio");
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.url, None);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = DbConfig::from_lookup(&lookup_from(&[("DB_PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "DB_PORT must be a valid port number, got 'eighty'"
        );
    }

    #[test]
    fn url_takes_precedence() {
        let config = DbConfig::from_lookup(&lookup_from(&[
            ("DATABASE_URL", "postgres://u:p@remote:5433/other"),
            ("DB_HOST", "ignored"),
        ]))
        .unwrap();
        let options = config.connect_options().unwrap();
        assert_eq!(options.get_host(), "remote");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_database(), Some("other"));
    }
}
