//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on the
//! driving ports and stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for the user handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_query: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Bundle the read and write ports.
    ///
    /// A single service usually implements both:
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use usuarios::domain::{MissingUserPolicy, UserRegistryService};
    /// use usuarios::inbound::http::state::HttpState;
    /// use usuarios::test_support::InMemoryUserRepository;
    ///
    /// let service = Arc::new(UserRegistryService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     MissingUserPolicy::default(),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.users_query.clone();
    /// ```
    pub fn new(users_query: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users_query,
            users_command,
        }
    }
}
