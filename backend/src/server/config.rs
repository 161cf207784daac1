//! HTTP server configuration object.

use std::net::{Ipv4Addr, SocketAddr};

use usuarios::domain::MissingUserPolicy;
use usuarios::outbound::persistence::DbPool;

/// Port the service listens on, on every interface.
pub const DEFAULT_PORT: u16 = 8000;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) missing_user: MissingUserPolicy,
}

impl ServerConfig {
    /// Bind to `0.0.0.0:8000` and serve users from `db_pool`.
    #[must_use]
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            db_pool,
            missing_user: MissingUserPolicy::default(),
        }
    }

    /// Choose how updates and deletes of unknown ids are reported.
    #[must_use]
    pub fn with_missing_user_policy(mut self, policy: MissingUserPolicy) -> Self {
        self.missing_user = policy;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
