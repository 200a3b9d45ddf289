//! Core of the `http_client` extension: `http_get` and `http_post` as
//! scalar functions.
//!
//! # Overview
//! A URL is split into host and path, the request is described as plain data
//! and handed to a blocking [`Transport`], and the outcome is turned into
//! either a column value (status 200) or an error that aborts the batch.
//!
//! # Design
//! - `HttpClient` is stateless; the production transport builds a fresh
//!   `ureq` agent per call with a 10 second read timeout and redirect
//!   following.
//! - The transport is a trait so adapters and batch execution are testable
//!   without a network.
//! - Failures to get any response are classified into
//!   [`TransportErrorKind`]; non-200 responses are reported with their
//!   status and reason.
//! - The function catalog is static data; host bindings live in the ffi
//!   crate.

pub mod batch;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod http;
pub mod transport;
pub mod url;

pub use catalog::{extension_info, functions, ExtensionInfo, FunctionDescriptor, LogicalType};
pub use client::{HttpClient, JSON_CONTENT_TYPE};
pub use config::TransportConfig;
pub use error::{ConfigError, FunctionError, TransportError, TransportErrorKind};
pub use headers::{parse_headers, HeaderMap};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use url::{decompose, RequestUrl};
