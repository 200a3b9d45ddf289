//! Fixed-route HTTP server the extension's integration tests talk to.
//!
//! Routes:
//! - `GET /hello` answers `hello`.
//! - `GET|POST /status/{code}` answers with that status and its reason as body.
//! - `GET /redirect/{n}` redirects `n` times, then lands on `/hello`.
//! - `GET /loop` redirects to itself forever.
//! - `GET /bytes/{n}` answers with `n` bytes of `a`.
//! - `GET|POST /echo` answers 200 with the method, URI, headers and body it saw.

use axum::{
    extract::Path,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What `/echo` saw. Header names are lowercase, in arrival order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub uri: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Echo {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/status/{code}", get(status).post(status))
        .route("/redirect/{n}", get(redirect))
        .route("/loop", get(redirect_loop))
        .route("/bytes/{n}", get(bytes))
        .route("/echo", get(echo).post(echo))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("mock server listening on {addr}");
    }
    axum::serve(listener, app()).await
}

async fn hello() -> &'static str {
    "hello"
}

async fn status(Path(code): Path<u16>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, status.canonical_reason().unwrap_or("").to_string()).into_response(),
        Err(_) => (StatusCode::BAD_REQUEST, "invalid status code").into_response(),
    }
}

async fn redirect(Path(n): Path<u32>) -> Redirect {
    if n == 0 {
        Redirect::to("/hello")
    } else {
        Redirect::to(&format!("/redirect/{}", n - 1))
    }
}

async fn redirect_loop() -> Redirect {
    Redirect::to("/loop")
}

async fn bytes(Path(n): Path<usize>) -> Vec<u8> {
    vec![b'a'; n]
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        uri: uri.to_string(),
        headers,
        body,
    })
}
