//! Domain errors rendered as Actix responses.
//!
//! Every failure leaves the service as the JSON error payload with a status
//! derived from its [`ErrorCode`]. 5xx payloads are logged here, the only place
//! that still sees their original message before it is hidden from clients.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by every handler.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Payload actually sent on the wire.
///
/// Internal errors lose their message and details; the trace id survives so
/// the client can quote it.
fn wire_payload(source: &Error) -> Error {
    if source.code() != ErrorCode::InternalError {
        return source.clone();
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    match source.trace_id() {
        Some(trace_id) => redacted.with_trace_id(trace_id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self.code() {
            ErrorCode::InternalError => {
                error!(trace_id = self.trace_id(), message = self.message(), "request failed");
            }
            ErrorCode::ServiceUnavailable => {
                warn!(trace_id = self.trace_id(), message = self.message(), "dependency unavailable");
            }
            _ => {}
        }

        let mut response = HttpResponse::build(status);
        if let Some(trace_id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, trace_id.to_owned()));
        }
        response.json(wire_payload(self))
    }
}

/// Default service: any path or method without a handler.
pub async fn route_not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("route not found").with_details(json!({ "code": "route_not_found" })))
}
