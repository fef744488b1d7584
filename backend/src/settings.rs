//! Server configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CHENGYU_`-prefixed environment variables and
//! configuration files. Every field is optional: without a database URL the
//! server keeps its catalogue in memory, and without an imgbb key uploads are
//! answered by a stub host.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::DEFAULT_JSON_LIMIT_BYTES;

/// Address used when `bind_addr` is not configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Configuration values for the catalogue server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CHENGYU")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; absent means in-memory storage.
    pub database_url: Option<String>,
    /// imgbb API key; absent means uploads return a placeholder URL.
    pub imgbb_api_key: Option<String>,
    /// Apply embedded migrations before serving; on unless set to `false`.
    pub run_migrations: Option<bool>,
    /// Maximum accepted JSON body size in bytes.
    pub json_limit_bytes: Option<usize>,
}

impl ServerSettings {
    /// Return the address to bind, falling back to [`DEFAULT_BIND_ADDR`].
    ///
    /// # Errors
    ///
    /// Returns the parse error when the configured address is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    /// Whether to apply migrations at start-up, defaulting to `true`.
    #[must_use]
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Return the JSON body limit, falling back to the HTTP adapter default.
    #[must_use]
    pub fn json_limit_bytes(&self) -> usize {
        self.json_limit_bytes.unwrap_or(DEFAULT_JSON_LIMIT_BYTES)
    }

    /// Return the database URL when one is configured and not blank.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_deref())
    }

    /// Return the imgbb API key when one is configured and not blank.
    #[must_use]
    pub fn imgbb_api_key(&self) -> Option<&str> {
        non_blank(self.imgbb_api_key.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    //! Unit tests for server configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "CHENGYU_BIND_ADDR",
        "CHENGYU_DATABASE_URL",
        "CHENGYU_IMGBB_API_KEY",
        "CHENGYU_RUN_MIGRATIONS",
        "CHENGYU_JSON_LIMIT_BYTES",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("chengyu-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_select_in_memory_storage_and_stub_uploads() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            "0.0.0.0:3000".parse::<SocketAddr>().expect("literal parses")
        );
        assert!(settings.database_url().is_none());
        assert!(settings.imgbb_api_key().is_none());
        assert!(settings.run_migrations());
        assert_eq!(settings.json_limit_bytes(), DEFAULT_JSON_LIMIT_BYTES);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CHENGYU_BIND_ADDR", Some("127.0.0.1:8787".to_owned())),
            (
                "CHENGYU_DATABASE_URL",
                Some("postgres://chengyu@localhost/chengyu".to_owned()),
            ),
            ("CHENGYU_IMGBB_API_KEY", Some("k-123".to_owned())),
            ("CHENGYU_RUN_MIGRATIONS", Some("false".to_owned())),
            ("CHENGYU_JSON_LIMIT_BYTES", Some("2048".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override parses").port(),
            8787
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://chengyu@localhost/chengyu")
        );
        assert_eq!(settings.imgbb_api_key(), Some("k-123"));
        assert!(!settings.run_migrations());
        assert_eq!(settings.json_limit_bytes(), 2048);
    }

    #[rstest]
    fn blank_secrets_count_as_absent() {
        let _guard = lock_env([
            ("CHENGYU_BIND_ADDR", None),
            ("CHENGYU_DATABASE_URL", Some("  ".to_owned())),
            ("CHENGYU_IMGBB_API_KEY", Some(String::new())),
            ("CHENGYU_RUN_MIGRATIONS", None),
            ("CHENGYU_JSON_LIMIT_BYTES", None),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.database_url().is_none());
        assert!(settings.imgbb_api_key().is_none());
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let settings = ServerSettings {
            bind_addr: Some("not-an-address".to_owned()),
            database_url: None,
            imgbb_api_key: None,
            run_migrations: None,
            json_limit_bytes: None,
        };
        assert!(settings.bind_addr().is_err());
        assert!(settings.run_migrations());
    }
}
