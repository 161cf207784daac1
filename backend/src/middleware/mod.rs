//! Actix middleware applied to the whole application.
//!
//! Only request tracing lives here; see [`trace`].

pub mod trace;

pub use trace::Trace;
