//! Actix adapter for the `/usuarios` resource and the health probes.
//!
//! Handlers talk to the domain only through the ports bundled in
//! [`state::HttpState`].

pub mod error;
pub mod health;
pub mod state;
pub mod users;
pub mod validation;

pub use error::{ApiResult, route_not_found};
