//! HTTP server configuration object and helpers.

use chengyu_backend::inbound::http::DEFAULT_JSON_LIMIT_BYTES;
use chengyu_backend::outbound::persistence::DbPool;
use std::net::SocketAddr;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) json_limit_bytes: usize,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) imgbb_api_key: Option<String>,
}

impl ServerConfig {
    /// Construct a configuration serving the in-memory catalogue and the
    /// stub image host.
    #[must_use]
    pub const fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            json_limit_bytes: DEFAULT_JSON_LIMIT_BYTES,
            db_pool: None,
            imgbb_api_key: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, idioms and categories are stored in PostgreSQL instead
    /// of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Forward uploads to imgbb using `api_key`.
    #[must_use]
    pub fn with_imgbb_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.imgbb_api_key = Some(api_key.into());
        self
    }

    /// Cap JSON request bodies at `limit` bytes.
    #[must_use]
    pub const fn with_json_limit_bytes(mut self, limit: usize) -> Self {
        self.json_limit_bytes = limit;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
