//! Inbound request model
//!
//! An [`InboundRequest`] is the explicit, immutable value the dispatcher
//! works on: query parameters, body parameters, and uploaded files, all
//! extracted once at the transport boundary. Nothing downstream touches the
//! raw hyper request.

pub mod parse;

pub use parse::{read_request, ParseError};

use std::collections::BTreeMap;

use hyper::body::Bytes;

/// One uploaded file from a multipart body, in arrival order.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Form field name (e.g. "file1")
    pub field: String,
    /// Original filename as declared by the client
    pub filename: String,
    /// Declared MIME type of the part
    pub content_type: String,
    /// File payload, buffered in memory
    pub data: Bytes,
}

impl FileUpload {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// All parameters of one request. Lives only for the request's duration.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    /// Query-string parameters (last value wins on duplicate keys)
    pub query: BTreeMap<String, String>,
    /// Body parameters from urlencoded or multipart text fields
    pub body: BTreeMap<String, String>,
    /// Uploaded files, in arrival order
    pub files: Vec<FileUpload>,
}

impl InboundRequest {
    /// Resolve the declared action: body parameters take precedence over
    /// query parameters.
    pub fn action(&self) -> Option<&str> {
        self.body
            .get("action")
            .or_else(|| self.query.get("action"))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_query() {
        let mut req = InboundRequest::default();
        req.query
            .insert("action".to_string(), "proxy-static-file".to_string());
        assert_eq!(req.action(), Some("proxy-static-file"));
    }

    #[test]
    fn test_body_action_wins_over_query() {
        let mut req = InboundRequest::default();
        req.query
            .insert("action".to_string(), "echo-as-json (get)".to_string());
        req.body
            .insert("action".to_string(), "echo-as-json (post)".to_string());
        assert_eq!(req.action(), Some("echo-as-json (post)"));
    }

    #[test]
    fn test_no_action() {
        let mut req = InboundRequest::default();
        req.query.insert("param1".to_string(), "test".to_string());
        assert_eq!(req.action(), None);
    }
}
