//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: path routing, body-size checks,
//! turning the finalized [`ActionResult`] into the HTTP response, and access
//! logging. This is the only layer that writes responses.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::dispatch::{self, ActionResult};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::request;

use super::test_page;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>> + Send + Sync + 'static,
{
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let http_version = version_label(req.version()).to_string();
    let referer = header_string(&req, "referer");
    let user_agent = header_string(&req, "user-agent");

    let access_log = state.cached_access_log.load(Ordering::Relaxed);
    if access_log {
        logger::log_request(&method, req.uri());
    }

    // Check body size before reading anything
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return Ok(resp);
    }

    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let (response, action) = route(req, &state).await;

    if access_log {
        let mut entry =
            AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
        entry.query = query;
        entry.http_version = http_version;
        entry.status = response.status().as_u16();
        entry.body_bytes = body_len(&response);
        entry.action = action;
        entry.referer = referer;
        entry.user_agent = user_agent;
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path; returns the response plus the action token
/// for the access log.
async fn route<B>(
    req: Request<B>,
    state: &Arc<AppState>,
) -> (Response<Full<Bytes>>, Option<String>)
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>> + Send + Sync + 'static,
{
    if req.method() == Method::OPTIONS {
        return (
            http::build_options_response(state.config.http.enable_cors),
            None,
        );
    }

    match req.uri().path() {
        // Test page
        "/" | "/index.html" => (http::build_html_response(test_page::render()), None),

        // Health check endpoints
        "/healthz" | "/readyz" => (http::build_health_response("ok"), None),

        // Dispatch endpoint; deliberately method-agnostic
        "/ws" => serve_dispatch(req, state).await,

        _ => (http::build_404_response(), None),
    }
}

/// Decode the request, run the dispatcher, encode the result.
async fn serve_dispatch<B>(
    req: Request<B>,
    state: &Arc<AppState>,
) -> (Response<Full<Bytes>>, Option<String>)
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>> + Send + Sync + 'static,
{
    let inbound = match request::read_request(req).await {
        Ok(inbound) => inbound,
        Err(e) => {
            logger::log_error(&format!("Failed to decode request body: {e}"));
            return (
                http::build_400_response("could not decode request body"),
                None,
            );
        }
    };

    let action = inbound.action().map(ToString::to_string);

    match dispatch::dispatch(&inbound, &state.config.harness).await {
        Ok(result) => (encode_result(&result), action),
        Err(e) => {
            logger::log_error(&format!("Request failed: {e}"));
            (http::build_500_response(), action)
        }
    }
}

/// Encode a finalized `ActionResult` into the HTTP response. Exactly one
/// response per result; no bytes leave before this point.
fn encode_result(result: &ActionResult) -> Response<Full<Bytes>> {
    match result {
        ActionResult::Success { message } => http::build_status_response("success", message),
        ActionResult::Error { message } => http::build_status_response("error", message),
        ActionResult::RawFile {
            content_type,
            filename,
            bytes,
        } => http::build_attachment_response(content_type, filename, bytes.clone()),
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn version_label(version: hyper::Version) -> &'static str {
    if version == hyper::Version::HTTP_10 {
        "1.0"
    } else if version == hyper::Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn body_len(response: &Response<Full<Bytes>>) -> usize {
    usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(usize::MAX)
}
