//! Error types for request dispatch and the scalar function adapters.
//!
//! # Design
//! Two failure classes exist. A [`TransportError`] means no response was
//! obtained at all; its [`TransportErrorKind`] only chooses the message. A
//! [`FunctionError::Status`] means a response arrived with a status other
//! than 200. Neither is retried, and both abort the batch they occur in.

use thiserror::Error;

use crate::http::HttpMethod;

/// Transport-level failure categories. Discriminants are the raw codes
/// exposed across the C ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    Unknown = 1,
    Connection = 2,
    BindIpAddress = 3,
    Read = 4,
    Write = 5,
    ExceedRedirectCount = 6,
    Canceled = 7,
    SslConnection = 8,
    SslLoadingCerts = 9,
    SslServerVerification = 10,
    UnsupportedMultipartBoundaryChars = 11,
    Compression = 12,
}

impl TransportErrorKind {
    /// Classify a raw transport error code. Unrecognized codes are `Unknown`.
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => Self::Connection,
            3 => Self::BindIpAddress,
            4 => Self::Read,
            5 => Self::Write,
            6 => Self::ExceedRedirectCount,
            7 => Self::Canceled,
            8 => Self::SslConnection,
            9 => Self::SslLoadingCerts,
            10 => Self::SslServerVerification,
            11 => Self::UnsupportedMultipartBoundaryChars,
            12 => Self::Compression,
            _ => Self::Unknown,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Connection => "Connection error.",
            Self::BindIpAddress => "Failed to bind IP address.",
            Self::Read => "Error reading response.",
            Self::Write => "Error writing request.",
            Self::ExceedRedirectCount => "Too many redirects.",
            Self::Canceled => "Request was canceled.",
            Self::SslConnection => "SSL connection failed.",
            Self::SslLoadingCerts => "Failed to load SSL certificates.",
            Self::SslServerVerification => "SSL server verification failed.",
            Self::UnsupportedMultipartBoundaryChars => {
                "Unsupported characters in multipart boundary."
            }
            Self::Compression => "Error during compression.",
            Self::Unknown => "Unknown error.",
        }
    }
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// No response was obtained. `detail` carries the underlying library's text
/// for logs; it is not part of the user-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub detail: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

/// Errors raised by `http_get` / `http_post`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FunctionError {
    /// A response arrived with a status other than 200.
    #[error("HTTP {method} error: {status} - {reason}")]
    Status {
        method: HttpMethod,
        status: u16,
        reason: String,
    },

    #[error("HTTP {method} request failed. {source}")]
    Transport {
        method: HttpMethod,
        #[source]
        source: TransportError,
    },

    /// Argument columns of one batch disagree on their row count.
    #[error("argument columns have mismatched lengths: {0:?}")]
    BatchShape(Vec<usize>),
}

/// Invalid transport configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid transport config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("read timeout must be at least one second")]
    ZeroTimeout,
}
