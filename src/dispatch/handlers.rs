//! The six action handlers
//!
//! Each produces an [`ActionResult`]; none of them writes to the response
//! stream or terminates anything.

use std::path::Path;

use hyper::body::Bytes;
use tokio::fs;

use super::{Action, ActionResult, DispatchError};
use crate::audit;
use crate::config::HarnessConfig;
use crate::http::mime;
use crate::request::InboundRequest;

/// JSON echo: acknowledge the action by name.
pub(super) fn echo_as_json(action: Action) -> ActionResult {
    ActionResult::Success {
        message: format!("{} ok", action.as_str()),
    }
}

/// Inline HTML download of the request dump.
pub(super) fn downloadable_html(req: &InboundRequest) -> ActionResult {
    let body = format!(
        "<!DOCTYPE><html><body><pre>{}</pre></body></html>",
        audit::render_dump(req)
    );
    ActionResult::RawFile {
        content_type: "text/html".to_string(),
        filename: "example.html".to_string(),
        bytes: Bytes::from(body),
    }
}

/// Inline plain-text download of the request dump.
pub(super) fn downloadable_text(req: &InboundRequest) -> ActionResult {
    ActionResult::RawFile {
        content_type: "text/plain".to_string(),
        filename: "example.txt".to_string(),
        bytes: Bytes::from(audit::render_dump(req)),
    }
}

/// Stream the configured asset back verbatim, under the configured display
/// name. The MIME override wins when set; otherwise the content is sniffed,
/// falling back to the extension table.
pub(super) async fn proxy_static_file(
    cfg: &HarnessConfig,
) -> Result<ActionResult, DispatchError> {
    let path = Path::new(&cfg.asset_path);
    let bytes = fs::read(path).await.map_err(DispatchError::Asset)?;

    let content_type = match cfg.asset_content_type.as_deref() {
        Some(mime_type) if !mime_type.is_empty() => mime_type.to_string(),
        _ => mime::detect(&bytes, path.extension().and_then(|e| e.to_str())).to_string(),
    };

    Ok(ActionResult::RawFile {
        content_type,
        filename: cfg.asset_download_name.clone(),
        bytes: Bytes::from(bytes),
    })
}
