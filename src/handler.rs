//! Request handler module
//!
//! Entry point the engine calls for every request: hands the method and the
//! upload body (if any) to the dispatcher and turns the outcome into a response.

use http_body_util::{BodyExt, Limited};
use hyper::body::{Body, Bytes, Incoming};
use hyper::{Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::http::{build_outcome_response, ResponseBody};
use crate::logger;
use crate::server::ServerState;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<ServerState>,
) -> Result<Response<ResponseBody>, Infallible> {
    let (parts, body) = req.into_parts();
    let upload = read_upload(body, state.max_upload_size).await;

    let outcome = state.dispatcher.dispatch(parts.method.as_str(), &upload);
    if state.access_log {
        logger::log_response(outcome.status);
    }

    Ok(build_outcome_response(outcome))
}

/// Collect the request body, up to `limit` bytes.
///
/// The dispatch outcome never depends on the upload, so an oversized or
/// broken body is dropped rather than failing the request.
async fn read_upload<B>(body: B, limit: usize) -> Bytes
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    if body.is_end_stream() {
        return Bytes::new();
    }

    match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Discarding upload body: {e}"));
            Bytes::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::{Empty, Full};

    #[tokio::test]
    async fn test_read_upload_collects_body() {
        let body = Full::new(Bytes::from_static(b"name=value"));
        assert_eq!(read_upload(body, 1024).await, Bytes::from_static(b"name=value"));
    }

    #[tokio::test]
    async fn test_read_upload_empty_body() {
        assert!(read_upload(Empty::<Bytes>::new(), 1024).await.is_empty());
    }

    #[tokio::test]
    async fn test_read_upload_over_limit_is_dropped() {
        let body = Full::new(Bytes::from(vec![b'x'; 2048]));
        assert!(read_upload(body, 1024).await.is_empty());
    }
}
