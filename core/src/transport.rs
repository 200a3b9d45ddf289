//! Execution of [`HttpRequest`]s.
//!
//! # Design
//! [`Transport`] is the only seam between request dispatch and the network.
//! [`UreqTransport`] is the production implementation: it builds a fresh
//! `ureq::Agent` for every call, so nothing (connections, cookies, redirect
//! state) is shared between rows. Status codes are returned as data; only
//! failures to obtain a response become errors.

use std::io;

use crate::config::TransportConfig;
use crate::error::{TransportError, TransportErrorKind};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one request and returns whatever response the server produced.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by `ureq`.
#[derive(Debug, Clone, Default)]
pub struct UreqTransport {
    config: TransportConfig,
}

impl UreqTransport {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn agent(&self) -> ureq::Agent {
        let timeout = Some(self.config.read_timeout());
        ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(self.config.redirect_limit())
            .timeout_recv_response(timeout)
            .timeout_recv_body(timeout)
            .build()
            .new_agent()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent();
        let url = request.url();

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = agent.get(url.as_str());
                for (key, value) in request.headers.iter() {
                    builder = builder.header(key, value);
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = agent.post(url.as_str());
                for (key, value) in request.headers.iter() {
                    builder = builder.header(key, value);
                }
                if let Some(content_type) = request.content_type.as_deref() {
                    builder = builder.content_type(content_type);
                }
                let body = request.body.as_deref().unwrap_or("");
                builder.send(body.as_bytes())
            }
        };

        let mut response = result.map_err(into_transport_error)?;
        let status = response.status();
        // ureq caps `read_to_vec` at 10 MiB unless told otherwise.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(into_transport_error)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            body,
        })
    }
}

fn into_transport_error(err: ureq::Error) -> TransportError {
    TransportError::new(classify(&err), err.to_string())
}

/// Map a `ureq` failure onto a [`TransportErrorKind`].
pub fn classify(err: &ureq::Error) -> TransportErrorKind {
    match err {
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
            TransportErrorKind::Connection
        }
        ureq::Error::TooManyRedirects => TransportErrorKind::ExceedRedirectCount,
        ureq::Error::Timeout(timeout) => classify_timeout(*timeout),
        ureq::Error::Io(io_err) => classify_io(io_err),
        other => classify_message(&other.to_string()),
    }
}

fn classify_timeout(timeout: ureq::Timeout) -> TransportErrorKind {
    match timeout {
        ureq::Timeout::Resolve | ureq::Timeout::Connect => TransportErrorKind::Connection,
        ureq::Timeout::SendRequest | ureq::Timeout::SendBody => TransportErrorKind::Write,
        _ => TransportErrorKind::Read,
    }
}

fn classify_io(err: &io::Error) -> TransportErrorKind {
    // TLS failures arrive wrapped in io errors.
    let by_message = classify_message(&err.to_string());
    if by_message != TransportErrorKind::Unknown {
        return by_message;
    }
    match err.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::NotConnected => TransportErrorKind::Connection,
        io::ErrorKind::AddrInUse | io::ErrorKind::AddrNotAvailable => {
            TransportErrorKind::BindIpAddress
        }
        io::ErrorKind::BrokenPipe | io::ErrorKind::WriteZero => TransportErrorKind::Write,
        io::ErrorKind::Interrupted => TransportErrorKind::Canceled,
        _ => TransportErrorKind::Read,
    }
}

/// TLS and decompression variants of `ureq::Error` only exist under some
/// feature sets, so they are recognized by their rendered text.
fn classify_message(message: &str) -> TransportErrorKind {
    let message = message.to_ascii_lowercase();
    let mentions = |needles: &[&str]| needles.iter().any(|n| message.contains(n));

    if mentions(&["pem", "load native certificates", "root certificate"]) {
        TransportErrorKind::SslLoadingCerts
    } else if mentions(&["certificate", "unknownissuer", "verif"]) {
        TransportErrorKind::SslServerVerification
    } else if mentions(&["tls", "ssl", "handshake"]) {
        TransportErrorKind::SslConnection
    } else if mentions(&["decompress", "gzip", "brotli"]) {
        TransportErrorKind::Compression
    } else if mentions(&["multipart boundary"]) {
        TransportErrorKind::UnsupportedMultipartBoundaryChars
    } else {
        TransportErrorKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_unit_variants() {
        assert_eq!(classify(&ureq::Error::HostNotFound), TransportErrorKind::Connection);
        assert_eq!(classify(&ureq::Error::ConnectionFailed), TransportErrorKind::Connection);
        assert_eq!(
            classify(&ureq::Error::TooManyRedirects),
            TransportErrorKind::ExceedRedirectCount
        );
    }

    #[test]
    fn classifies_timeouts_by_phase() {
        let cases = [
            (ureq::Timeout::Resolve, TransportErrorKind::Connection),
            (ureq::Timeout::Connect, TransportErrorKind::Connection),
            (ureq::Timeout::SendRequest, TransportErrorKind::Write),
            (ureq::Timeout::SendBody, TransportErrorKind::Write),
            (ureq::Timeout::RecvResponse, TransportErrorKind::Read),
            (ureq::Timeout::RecvBody, TransportErrorKind::Read),
            (ureq::Timeout::Global, TransportErrorKind::Read),
            (ureq::Timeout::PerCall, TransportErrorKind::Read),
        ];
        for (timeout, expected) in cases {
            assert_eq!(classify(&ureq::Error::Timeout(timeout)), expected, "{timeout:?}");
        }
    }

    #[test]
    fn transport_keeps_its_config() {
        let config = TransportConfig {
            read_timeout_secs: 3,
            follow_redirects: false,
            max_redirects: 4,
        };
        let transport = UreqTransport::new(config.clone());
        assert_eq!(transport.config(), &config);
        assert_eq!(transport.config().redirect_limit(), 0);
        assert_eq!(UreqTransport::default().config(), &TransportConfig::default());
    }

    #[test]
    fn classifies_io_kinds() {
        let cases = [
            (io::ErrorKind::ConnectionRefused, TransportErrorKind::Connection),
            (io::ErrorKind::ConnectionReset, TransportErrorKind::Connection),
            (io::ErrorKind::AddrNotAvailable, TransportErrorKind::BindIpAddress),
            (io::ErrorKind::BrokenPipe, TransportErrorKind::Write),
            (io::ErrorKind::Interrupted, TransportErrorKind::Canceled),
            (io::ErrorKind::UnexpectedEof, TransportErrorKind::Read),
            (io::ErrorKind::TimedOut, TransportErrorKind::Read),
        ];
        for (kind, expected) in cases {
            let err = ureq::Error::Io(io::Error::new(kind, "boom"));
            assert_eq!(classify(&err), expected, "{kind:?}");
        }
    }

    #[test]
    fn classifies_tls_failures_by_message() {
        let err = io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid peer certificate: UnknownIssuer",
        );
        assert_eq!(
            classify(&ureq::Error::Io(err)),
            TransportErrorKind::SslServerVerification
        );
        assert_eq!(
            classify_message("TLS handshake aborted"),
            TransportErrorKind::SslConnection
        );
        assert_eq!(
            classify_message("failed to parse PEM"),
            TransportErrorKind::SslLoadingCerts
        );
        assert_eq!(
            classify_message("gzip decompression failed"),
            TransportErrorKind::Compression
        );
    }

    #[test]
    fn unrecognized_errors_are_unknown() {
        assert_eq!(
            classify(&ureq::Error::BadUri("::".to_string())),
            TransportErrorKind::Unknown
        );
    }
}
