//! HTTP request and response values handed across the transport seam.
//!
//! # Design
//! The dispatcher describes a request as plain data and a [`Transport`]
//! executes it. Keeping the request and response as owned data means the
//! adapters can be exercised against a recording transport with no network,
//! while the production transport is the only place that talks to `ureq`.
//!
//! [`Transport`]: crate::transport::Transport

use std::fmt;

use crate::headers::HeaderMap;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `content_type` is kept apart from `headers` so the caller's header block
/// reaches the transport untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub host: String,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
    pub content_type: Option<String>,
}

impl HttpRequest {
    /// Absolute URL the transport connects to. Requests always go out over
    /// plain `http`; redirects decide whether the exchange ends up on TLS.
    ///
    /// The path is percent-encoded where it holds bytes a request target
    /// cannot carry (spaces, control characters, non-ASCII). Existing `%XX`
    /// escapes and URI delimiters pass through unchanged.
    pub fn url(&self) -> String {
        format!("http://{}{}", self.host, encode_target(&self.path))
    }
}

fn encode_target(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for &byte in path.as_bytes() {
        if needs_escape(byte) {
            out.push_str(&format!("%{byte:02X}"));
        } else {
            out.push(char::from(byte));
        }
    }
    out
}

fn needs_escape(byte: u8) -> bool {
    byte <= b' '
        || byte >= 0x7f
        || matches!(
            byte,
            b'"' | b'<' | b'>' | b'\\' | b'^' | b'`' | b'{' | b'|' | b'}'
        )
}

/// An HTTP response described as plain data. Any status is a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: reason.into(),
            body: body.into(),
        }
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_rebuilt_over_http() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            host: "localhost:3000".to_string(),
            path: "/a?b=c".to_string(),
            headers: HeaderMap::new(),
            body: None,
            content_type: None,
        };
        assert_eq!(req.url(), "http://localhost:3000/a?b=c");
    }

    fn get(path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            host: "localhost".to_string(),
            path: path.to_string(),
            headers: HeaderMap::new(),
            body: None,
            content_type: None,
        }
    }

    #[test]
    fn url_escapes_spaces_and_controls() {
        assert_eq!(
            get("/search?q=hello world").url(),
            "http://localhost/search?q=hello%20world"
        );
        assert_eq!(get("/a\tb").url(), "http://localhost/a%09b");
        assert_eq!(get("/x|y").url(), "http://localhost/x%7Cy");
    }

    #[test]
    fn url_escapes_non_ascii_as_utf8_bytes() {
        assert_eq!(get("/caf\u{e9}").url(), "http://localhost/caf%C3%A9");
    }

    #[test]
    fn url_keeps_existing_escapes_and_delimiters() {
        assert_eq!(
            get("/a%20b?x=1&y=a+b#frag").url(),
            "http://localhost/a%20b?x=1&y=a+b#frag"
        );
    }

    #[test]
    fn body_text_replaces_invalid_utf8() {
        let resp = HttpResponse::new(200, "OK", vec![b'o', b'k', 0xff]);
        assert_eq!(resp.body_text(), "ok\u{fffd}");
    }

    #[test]
    fn method_names() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }
}
