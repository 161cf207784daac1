//! Usuarios service library: a CRUD HTTP API over a single PostgreSQL table.
//!
//! Layout follows ports and adapters: [`domain`] holds the model and
//! use-cases, [`inbound`] the Actix handlers and [`outbound`] the Diesel
//! repository and startup connector.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
