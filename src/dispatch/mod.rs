//! Request-action dispatch
//!
//! Classifies an inbound request by its declared `action` (body parameters
//! first, query parameters second), runs the audit side effect, and produces
//! exactly one [`ActionResult`]. Handlers never touch the HTTP response;
//! encoding is the transport layer's job, after the result is finalized.

mod handlers;

use std::path::Path;

use hyper::body::Bytes;
use thiserror::Error;

use crate::audit;
use crate::config::HarnessConfig;
use crate::request::InboundRequest;

/// Message returned for absent or unrecognized actions
pub const UNKNOWN_ACTION_MESSAGE: &str = "action not found";

/// The closed set of actions the harness understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    EchoJsonGet,
    EchoJsonPost,
    EchoJsonWithFiles,
    DownloadableHtml,
    DownloadableText,
    ProxyStaticFile,
}

impl Action {
    /// Parse the literal action token; anything else is unrecognized.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "echo-as-json (get)" => Some(Self::EchoJsonGet),
            "echo-as-json (post)" => Some(Self::EchoJsonPost),
            "echo-as-json-with-files" => Some(Self::EchoJsonWithFiles),
            "echo-as-downloadable-html" => Some(Self::DownloadableHtml),
            "echo-as-downloadable-text" => Some(Self::DownloadableText),
            "proxy-static-file" => Some(Self::ProxyStaticFile),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EchoJsonGet => "echo-as-json (get)",
            Self::EchoJsonPost => "echo-as-json (post)",
            Self::EchoJsonWithFiles => "echo-as-json-with-files",
            Self::DownloadableHtml => "echo-as-downloadable-html",
            Self::DownloadableText => "echo-as-downloadable-text",
            Self::ProxyStaticFile => "proxy-static-file",
        }
    }
}

/// Outcome of dispatching one request.
///
/// Produced exactly once per request and immutable after construction; it
/// fully determines the HTTP response.
#[derive(Debug)]
pub enum ActionResult {
    Success {
        message: String,
    },
    Error {
        message: String,
    },
    RawFile {
        content_type: String,
        filename: String,
        bytes: Bytes,
    },
}

/// Infrastructure failure during dispatch. Surfaced to the client as a 500;
/// nothing is caught or retried.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("audit write failed: {0}")]
    Audit(#[source] std::io::Error),
    #[error("proxy asset unavailable: {0}")]
    Asset(#[source] std::io::Error),
}

/// Resolve the action and produce the result.
///
/// The audit side effect runs before the result is computed, for every
/// recognized action. Unrecognized or absent actions produce the fixed JSON
/// error and touch nothing on disk.
pub async fn dispatch(
    req: &InboundRequest,
    cfg: &HarnessConfig,
) -> Result<ActionResult, DispatchError> {
    let Some(action) = req.action().and_then(Action::parse) else {
        return Ok(ActionResult::Error {
            message: UNKNOWN_ACTION_MESSAGE.to_string(),
        });
    };

    let output_dir = Path::new(&cfg.output_dir);
    let stamp = audit::record(req, action.as_str(), output_dir)
        .await
        .map_err(DispatchError::Audit)?;
    if action == Action::EchoJsonWithFiles {
        audit::persist_uploads(req, output_dir, &stamp)
            .await
            .map_err(DispatchError::Audit)?;
    }

    match action {
        Action::EchoJsonGet | Action::EchoJsonPost | Action::EchoJsonWithFiles => {
            Ok(handlers::echo_as_json(action))
        }
        Action::DownloadableHtml => Ok(handlers::downloadable_html(req)),
        Action::DownloadableText => Ok(handlers::downloadable_text(req)),
        Action::ProxyStaticFile => handlers::proxy_static_file(cfg).await,
    }
}
