//! Embedded HTML test page
//!
//! One form per action, targeting the dispatch endpoint. The multipart
//! forms also carry an extra query parameter so both parameter groups show
//! up in the echo.

/// Get the test page HTML
#[allow(clippy::too_many_lines)]
pub fn render() -> String {
    String::from(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>ElfWs test harness</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            line-height: 1.5;
            max-width: 640px;
            margin: 40px auto;
            padding: 0 16px;
            color: #222;
        }
        h3 {
            margin-top: 28px;
            border-bottom: 1px solid #ddd;
            padding-bottom: 4px;
        }
        form {
            margin: 8px 0 20px;
        }
        input[type="text"] {
            width: 280px;
        }
    </style>
</head>
<body>
    <p>HTML page to test the web service endpoint.</p>

    <h3>Test echo-as-json (get)</h3>
    <form action="/ws" method="get">
        action: <input type="text" name="action" value="echo-as-json (get)" readonly /><br/>
        param1: <input type="text" name="param1" value="test" /><br/>
        <input type="submit" value="Send" />
    </form>

    <h3>Test echo-as-json (post)</h3>
    <form action="/ws" method="post">
        action: <input type="text" name="action" value="echo-as-json (post)" readonly /><br/>
        param1: <input type="text" name="param1" value="test" /><br/>
        <input type="submit" value="Send" />
    </form>

    <h3>Test echo-as-json-with-files</h3>
    <form action="/ws?getparam=1" method="post" enctype="multipart/form-data">
        action: <input type="text" name="action" value="echo-as-json-with-files" readonly /><br/>
        param1: <input type="text" name="param1" value="test" /><br/>
        file1: <input type="file" name="file1" /><br/>
        file2: <input type="file" name="file2" /><br/>
        <input type="submit" value="Send" />
    </form>

    <h3>Test echo-as-downloadable-html</h3>
    <form action="/ws" method="get">
        action: <input type="text" name="action" value="echo-as-downloadable-html" readonly /><br/>
        param1: <input type="text" name="param1" value="test" /><br/>
        <input type="submit" value="Send" />
    </form>

    <h3>Test echo-as-downloadable-text</h3>
    <form action="/ws" method="post">
        action: <input type="text" name="action" value="echo-as-downloadable-text" readonly /><br/>
        param1: <input type="text" name="param1" value="test" /><br/>
        <input type="submit" value="Send" />
    </form>

    <h3>Test proxy-static-file</h3>
    <form action="/ws?getparam=1" method="post" enctype="multipart/form-data">
        action: <input type="text" name="action" value="proxy-static-file" readonly /><br/>
        param1: <input type="text" name="param1" value="test" /><br/>
        file1: <input type="file" name="file1" /><br/>
        file2: <input type="file" name="file2" /><br/>
        <input type="submit" value="Send" />
    </form>
</body>
</html>"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_lists_every_action() {
        let page = render();
        for token in [
            "echo-as-json (get)",
            "echo-as-json (post)",
            "echo-as-json-with-files",
            "echo-as-downloadable-html",
            "echo-as-downloadable-text",
            "proxy-static-file",
        ] {
            assert!(page.contains(token), "missing form for {token}");
        }
        assert!(page.contains("action=\"/ws\""));
        assert!(page.contains("enctype=\"multipart/form-data\""));
    }
}
