//! Audit records for dispatched requests
//!
//! Every dispatched action writes one human-readable dump of the request's
//! three parameter groups to the output directory, named
//! `<YYYYmmddHHMMSS>_<action>.txt`. The with-files action additionally
//! copies each upload to `<YYYYmmddHHMMSS>_<original filename>`. The
//! directory is created on first use. Collisions within the same second
//! overwrite (last write wins); the records are meant for eyeballing, not
//! machine joins.

use std::io;
use std::path::Path;

use chrono::Local;
use tokio::fs;

use crate::request::InboundRequest;

/// Render the human-readable dump of the three parameter groups.
pub fn render_dump(req: &InboundRequest) -> String {
    let mut out = String::new();

    out.push_str("GET:\n");
    for (key, value) in &req.query {
        out.push_str(&format!("{key} = \"{value}\"\n"));
    }

    out.push_str("\nPOST:\n");
    for (key, value) in &req.body {
        out.push_str(&format!("{key} = \"{value}\"\n"));
    }

    out.push_str("\nFILES:\n");
    for file in &req.files {
        out.push_str(&format!(
            "{field} = filename=\"{name}\" type=\"{ctype}\" size={size}\n",
            field = file.field,
            name = file.filename,
            ctype = file.content_type,
            size = file.size(),
        ));
    }

    out
}

/// Write the audit file for one dispatched request.
///
/// Creates the output directory if absent and returns the second-resolution
/// timestamp used in the filename, so upload copies can share it.
pub async fn record(req: &InboundRequest, action: &str, output_dir: &Path) -> io::Result<String> {
    fs::create_dir_all(output_dir).await?;

    let stamp = Local::now().format("%Y%m%d%H%M%S").to_string();
    let path = output_dir.join(format!("{stamp}_{action}.txt"));
    fs::write(path, render_dump(req)).await?;

    Ok(stamp)
}

/// Copy every uploaded file to the output directory under its original
/// filename, prefixed with the audit timestamp.
pub async fn persist_uploads(
    req: &InboundRequest,
    output_dir: &Path,
    stamp: &str,
) -> io::Result<()> {
    for file in &req.files {
        let path = output_dir.join(format!("{stamp}_{name}", name = file.filename));
        fs::write(path, &file.data).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::FileUpload;
    use hyper::body::Bytes;

    fn sample_request() -> InboundRequest {
        let mut req = InboundRequest::default();
        req.query.insert("getparam".to_string(), "1".to_string());
        req.body
            .insert("action".to_string(), "echo-as-json-with-files".to_string());
        req.body.insert("param1".to_string(), "test".to_string());
        req.files.push(FileUpload {
            field: "file1".to_string(),
            filename: "upload.txt".to_string(),
            content_type: "text/plain".to_string(),
            data: Bytes::from("file body"),
        });
        req
    }

    #[test]
    fn test_dump_contains_all_three_groups() {
        let dump = render_dump(&sample_request());
        assert!(dump.contains("GET:\n"));
        assert!(dump.contains("getparam = \"1\""));
        assert!(dump.contains("POST:\n"));
        assert!(dump.contains("param1 = \"test\""));
        assert!(dump.contains("FILES:\n"));
        assert!(dump.contains("file1 = filename=\"upload.txt\" type=\"text/plain\" size=9"));
    }

    #[test]
    fn test_dump_keeps_empty_sections() {
        let dump = render_dump(&InboundRequest::default());
        assert!(dump.contains("GET:\n"));
        assert!(dump.contains("POST:\n"));
        assert!(dump.contains("FILES:\n"));
    }

    #[tokio::test]
    async fn test_record_writes_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("outputs");

        let stamp = record(&sample_request(), "echo-as-json-with-files", &out)
            .await
            .unwrap();

        let entries: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
        assert_eq!(entries.len(), 1);

        let content =
            std::fs::read_to_string(out.join(format!("{stamp}_echo-as-json-with-files.txt")))
                .unwrap();
        assert!(content.contains("param1 = \"test\""));
    }

    #[tokio::test]
    async fn test_persist_uploads_copies_under_original_names() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_path_buf();

        persist_uploads(&sample_request(), &out, "20260101000000")
            .await
            .unwrap();

        let copied = std::fs::read(out.join("20260101000000_upload.txt")).unwrap();
        assert_eq!(copied, b"file body");
    }
}
