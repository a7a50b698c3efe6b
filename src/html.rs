use std::borrow::Cow;

const STYLE: &str = "\
body{font-family:ui-monospace,Menlo,Consolas,monospace;margin:24px;color:#111;background:#fafafa;}\
.card{max-width:640px;padding:20px;border:1px solid #ddd;border-radius:8px;background:#fff;}\
label{display:block;margin:12px 0 4px;}\
input,select{width:100%;padding:10px;border:1px solid #bbb;border-radius:6px;box-sizing:border-box;}\
button{margin-top:16px;padding:10px 16px;border:0;border-radius:6px;background:#111;color:#fff;}\
dl{display:grid;grid-template-columns:max-content auto;gap:4px 16px;}\
dt{font-weight:bold;}\
pre{white-space:pre-wrap;}\
.message{margin-bottom:12px;padding:10px 12px;border-radius:6px;}\
.success{background:#e7f7ed;border:1px solid #86d19a;}\
.error{background:#fdeaea;border:1px solid #f0a5a5;}\
a{color:#111;}";

/// Wraps `body` in the shared document shell.
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{} - DietMath</title><style>{STYLE}</style></head>\
         <body><div class=\"card\">{body}</div></body></html>",
        text(title),
    )
}

pub fn text(s: &str) -> Cow<'_, str> {
    html_escape::encode_text(s)
}

pub fn attr(s: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(s)
}

/// Status banner; empty when there is nothing to say.
pub fn banner(status: &str, message: &str) -> String {
    if message.is_empty() {
        return String::new();
    }
    format!(
        "<div class=\"message {}\">{}</div>",
        attr(status),
        text(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_escapes_message() {
        let html = banner("error", "<script>alert(1)</script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn empty_banner_renders_nothing() {
        assert_eq!(banner("success", ""), "");
    }

    #[test]
    fn page_sets_title() {
        let html = page("Login", "<h1>Login</h1>");
        assert!(html.contains("<title>Login - DietMath</title>"));
        assert!(html.contains("<h1>Login</h1>"));
    }
}
