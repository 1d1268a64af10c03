//! HTTP response building module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::dispatch::RequestOutcome;

pub type ResponseBody = Full<Bytes>;

/// Build the response for a dispatch outcome.
///
/// No Content-Type is set; hyper derives Content-Length from the body.
pub fn build_outcome_response(outcome: RequestOutcome) -> Response<ResponseBody> {
    let RequestOutcome { status, body, .. } = outcome;

    Response::builder()
        .status(status)
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            bare_response(status, body)
        })
}

/// Response built without the builder, keeping status and body
fn bare_response(status: u16, body: Bytes) -> Response<ResponseBody> {
    let mut resp = Response::new(Full::new(body));
    *resp.status_mut() = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    resp
}

/// Log response build error
fn log_build_error(status: u16, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
