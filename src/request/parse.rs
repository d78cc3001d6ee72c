//! Boundary parsing: raw hyper request -> [`InboundRequest`]
//!
//! Query strings and urlencoded bodies go through `url::form_urlencoded`;
//! multipart bodies stream through `multer`. This is the only place that
//! enumerates raw parameter keys.

use std::collections::BTreeMap;

use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_TYPE;
use hyper::Request;
use multer::Multipart;
use thiserror::Error;
use url::form_urlencoded;

use super::{FileUpload, InboundRequest};

/// Body decoding failure. Surfaced to the client as a 400; nothing is
/// retried.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read request body: {0}")]
    Body(Box<dyn std::error::Error + Send + Sync>),
    #[error("malformed multipart payload: {0}")]
    Multipart(#[from] multer::Error),
}

/// Build an [`InboundRequest`] from a raw hyper request, consuming its body.
///
/// Parameter sources:
/// - query string, always
/// - `application/x-www-form-urlencoded` bodies -> body parameters
/// - `multipart/form-data` bodies -> body parameters (text fields) and
///   uploaded files (fields carrying a filename), in arrival order
///
/// Any other content type contributes no body parameters.
pub async fn read_request<B>(req: Request<B>) -> Result<InboundRequest, ParseError>
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>> + Send + Sync + 'static,
{
    let query = req
        .uri()
        .query()
        .map(parse_urlencoded)
        .unwrap_or_default();

    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let content_type = content_type.as_deref().unwrap_or("");

    let mut body = BTreeMap::new();
    let mut files = Vec::new();

    if content_type
        .trim_start()
        .to_ascii_lowercase()
        .starts_with("multipart/form-data")
    {
        let boundary = multer::parse_boundary(content_type)?;
        let mut multipart = Multipart::new(req.into_body().into_data_stream(), boundary);

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if let Some(filename) = field.file_name().map(ToString::to_string) {
                let declared_type = field.content_type().map_or_else(
                    || "application/octet-stream".to_string(),
                    ToString::to_string,
                );
                let data = field.bytes().await?;
                files.push(FileUpload {
                    field: name,
                    filename,
                    content_type: declared_type,
                    data,
                });
            } else {
                let text = field.text().await?;
                body.insert(name, text);
            }
        }
    } else {
        let raw = req
            .into_body()
            .collect()
            .await
            .map_err(|e| ParseError::Body(e.into()))?
            .to_bytes();
        if content_type.starts_with("application/x-www-form-urlencoded") && !raw.is_empty() {
            body = parse_urlencoded(&String::from_utf8_lossy(&raw));
        }
    }

    Ok(InboundRequest { query, body, files })
}

/// Decode an urlencoded parameter string into a map; duplicate keys keep the
/// last value.
fn parse_urlencoded(input: &str) -> BTreeMap<String, String> {
    form_urlencoded::parse(input.as_bytes()).into_owned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;

    fn request(
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> Request<Full<Bytes>> {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        builder
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    #[tokio::test]
    async fn test_query_only() {
        let req = request("/ws?action=echo-as-json+%28get%29&param1=test", None, "");
        let inbound = read_request(req).await.unwrap();
        assert_eq!(
            inbound.query.get("action").map(String::as_str),
            Some("echo-as-json (get)")
        );
        assert_eq!(inbound.query.get("param1").map(String::as_str), Some("test"));
        assert!(inbound.body.is_empty());
        assert!(inbound.files.is_empty());
    }

    #[tokio::test]
    async fn test_urlencoded_body() {
        let req = request(
            "/ws",
            Some("application/x-www-form-urlencoded"),
            "action=echo-as-json+%28post%29&param1=a%26b",
        );
        let inbound = read_request(req).await.unwrap();
        assert_eq!(inbound.action(), Some("echo-as-json (post)"));
        assert_eq!(inbound.body.get("param1").map(String::as_str), Some("a&b"));
    }

    #[tokio::test]
    async fn test_body_ignored_for_other_content_types() {
        let req = request("/ws?action=proxy-static-file", Some("application/json"), "{}");
        let inbound = read_request(req).await.unwrap();
        assert!(inbound.body.is_empty());
        assert_eq!(inbound.action(), Some("proxy-static-file"));
    }

    #[tokio::test]
    async fn test_multipart_fields_and_files() {
        let payload = concat!(
            "--XBOUND\r\n",
            "Content-Disposition: form-data; name=\"action\"\r\n",
            "\r\n",
            "echo-as-json-with-files\r\n",
            "--XBOUND\r\n",
            "Content-Disposition: form-data; name=\"file1\"; filename=\"a.txt\"\r\n",
            "Content-Type: text/plain\r\n",
            "\r\n",
            "hello\r\n",
            "--XBOUND\r\n",
            "Content-Disposition: form-data; name=\"file2\"; filename=\"b.bin\"\r\n",
            "\r\n",
            "\x01\x02\x03\r\n",
            "--XBOUND--\r\n",
        );
        let req = request(
            "/ws",
            Some("multipart/form-data; boundary=XBOUND"),
            payload,
        );
        let inbound = read_request(req).await.unwrap();

        assert_eq!(inbound.action(), Some("echo-as-json-with-files"));
        assert_eq!(inbound.files.len(), 2);
        assert_eq!(inbound.files[0].field, "file1");
        assert_eq!(inbound.files[0].filename, "a.txt");
        assert_eq!(inbound.files[0].content_type, "text/plain");
        assert_eq!(&inbound.files[0].data[..], b"hello");
        assert_eq!(inbound.files[0].size(), 5);
        // File without a declared type falls back to octet-stream, and
        // arrival order is preserved
        assert_eq!(inbound.files[1].filename, "b.bin");
        assert_eq!(inbound.files[1].content_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn test_multipart_bad_boundary_is_an_error() {
        let req = request("/ws", Some("multipart/form-data"), "whatever");
        assert!(read_request(req).await.is_err());
    }

    #[tokio::test]
    async fn test_duplicate_keys_last_wins() {
        let req = request(
            "/ws",
            Some("application/x-www-form-urlencoded"),
            "param1=first&param1=second",
        );
        let inbound = read_request(req).await.unwrap();
        assert_eq!(inbound.body.get("param1").map(String::as_str), Some("second"));
    }
}
