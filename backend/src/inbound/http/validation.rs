//! Request validation helpers for the HTTP adapter.
//!
//! Extractor failures (malformed JSON bodies, non-integer path ids) are
//! turned into domain [`Error`] payloads here so every non-2xx response uses
//! the same schema.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Machine-readable `details.code` values for request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidJson,
    InvalidId,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidJson => "invalid_json",
            Self::InvalidId => "invalid_id",
        }
    }
}

/// Name of a request body field as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ValidationCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_json_error() -> Error {
    Error::invalid_request("request body must be a JSON object with nome, idade and email")
        .with_details(json!({ "code": ValidationCode::InvalidJson.as_str() }))
}

pub(crate) fn invalid_id_error() -> Error {
    Error::not_found("user not found")
        .with_details(json!({ "code": ValidationCode::InvalidId.as_str() }))
}

fn reject_json(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = req.path(), "rejected request body");
    invalid_json_error().into()
}

fn reject_path(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = req.path(), "rejected path parameter");
    invalid_id_error().into()
}

/// JSON extractor settings routing body errors through [`invalid_json_error`].
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(reject_json)
}

/// Path extractor settings routing parse errors through [`invalid_id_error`].
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(reject_path)
}
