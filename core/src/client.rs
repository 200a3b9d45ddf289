//! Request dispatch and the `http_get` / `http_post` adapters.
//!
//! # Design
//! `HttpClient` holds only a [`Transport`] and carries no mutable state
//! between calls. `dispatch` turns a URL into an [`HttpRequest`] and returns
//! the raw outcome; the adapters on top decide that only status 200 yields a
//! value. Batch entry points apply the adapters row by row and stop at the
//! first error.

use tracing::{debug, warn};

use crate::batch::{execute_ternary, execute_unary};
use crate::config::TransportConfig;
use crate::error::{FunctionError, TransportError, TransportErrorKind};
use crate::headers::HeaderMap;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::url::RequestUrl;

/// Content type every `http_post` body is sent with.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Synchronous, stateless client behind both scalar functions.
#[derive(Debug, Clone)]
pub struct HttpClient<T> {
    transport: T,
}

impl HttpClient<UreqTransport> {
    pub fn with_config(config: TransportConfig) -> Self {
        Self::new(UreqTransport::new(config))
    }
}

impl Default for HttpClient<UreqTransport> {
    fn default() -> Self {
        Self::with_config(TransportConfig::default())
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one blocking round-trip. Any status counts as success here.
    ///
    /// A POST with a body and no explicit content type is sent as JSON.
    pub fn dispatch(
        &self,
        method: HttpMethod,
        url: &str,
        headers: Option<HeaderMap>,
        body: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<HttpResponse, TransportError> {
        let RequestUrl { host, path } = RequestUrl::decompose(url);
        if host.is_empty() {
            warn!(%method, url, "refusing to dispatch without a host");
            return Err(TransportError::new(
                TransportErrorKind::Connection,
                "no host in url",
            ));
        }

        let content_type = match (content_type, method, body) {
            (Some(ct), _, _) => Some(ct.to_string()),
            (None, HttpMethod::Post, Some(_)) => Some(JSON_CONTENT_TYPE.to_string()),
            (None, _, _) => None,
        };
        let request = HttpRequest {
            method,
            host,
            path,
            headers: headers.unwrap_or_default(),
            body: body.map(str::to_string),
            content_type,
        };

        debug!(%method, host = %request.host, path = %request.path, "dispatching request");
        let outcome = self.transport.execute(&request);
        match &outcome {
            Ok(response) => debug!(%method, status = response.status, "received response"),
            Err(err) => warn!(%method, kind = ?err.kind, detail = %err.detail, "transport failure"),
        }
        outcome
    }

    /// `http_get(url)`: the body of a 200 response.
    pub fn http_get(&self, url: &str) -> Result<String, FunctionError> {
        let outcome = self.dispatch(HttpMethod::Get, url, None, None, None);
        into_body(HttpMethod::Get, outcome)
    }

    /// `http_post(url, headers, body)`: posts `body` as JSON with the parsed
    /// header block and returns the body of a 200 response.
    pub fn http_post(&self, url: &str, headers: &str, body: &str) -> Result<String, FunctionError> {
        let headers = HeaderMap::parse(headers);
        let outcome = self.dispatch(
            HttpMethod::Post,
            url,
            Some(headers),
            Some(body),
            Some(JSON_CONTENT_TYPE),
        );
        into_body(HttpMethod::Post, outcome)
    }

    /// Apply `http_get` to a column of URLs. NULL rows stay NULL.
    pub fn http_get_batch(&self, urls: &[Option<&str>]) -> Result<Vec<Option<String>>, FunctionError> {
        execute_unary(urls, |url| self.http_get(url))
    }

    /// Apply `http_post` to three aligned columns. A row with any NULL input
    /// yields NULL without a request.
    pub fn http_post_batch(
        &self,
        urls: &[Option<&str>],
        headers: &[Option<&str>],
        bodies: &[Option<&str>],
    ) -> Result<Vec<Option<String>>, FunctionError> {
        execute_ternary(urls, headers, bodies, |url, headers, body| {
            self.http_post(url, headers, body)
        })
    }
}

fn into_body(
    method: HttpMethod,
    outcome: Result<HttpResponse, TransportError>,
) -> Result<String, FunctionError> {
    match outcome {
        Ok(response) if response.status == 200 => Ok(response.body_text()),
        Ok(response) => {
            warn!(%method, status = response.status, "non-200 response");
            Err(FunctionError::Status {
                method,
                status: response.status,
                reason: response.reason,
            })
        }
        Err(source) => Err(FunctionError::Transport { method, source }),
    }
}
