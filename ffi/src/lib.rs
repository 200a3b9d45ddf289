//! C-ABI surface of the `http_client` extension.
//!
//! # Overview
//! A host query engine links this library, reads the function catalog,
//! creates a client handle and then feeds argument columns (arrays of
//! nullable C strings) to `http_get_execute` / `http_post_execute`. Each
//! call processes the whole batch row by row and returns either one value
//! per row or the error that stopped it.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Identity and catalog data are static; descriptors borrow it.
//! - A single `FfiBatchResult` envelope conveys values and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `http_client_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use http_client_core::{HttpClient, Transport, TransportConfig, TransportErrorKind, UreqTransport};

use types::*;

// ---------------------------------------------------------------------------
// Extension identity and catalog
// ---------------------------------------------------------------------------

/// Extension name (`http_client`). Static; do not free.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_name() -> *const c_char {
    identity().0.as_ptr()
}

/// Extension version. Static; do not free.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_version() -> *const c_char {
    identity().1.as_ptr()
}

/// Number of scalar functions the extension registers.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_function_count() -> u32 {
    catch_unwind(|| catalog().len() as u32).unwrap_or(0)
}

/// Write the descriptor of function `index` into `out`.
///
/// Returns false if `out` is null or `index` is out of range. The written
/// pointers reference static storage.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_function_at(index: u32, out: *mut FfiFunctionDescriptor) -> bool {
    catch_unwind(|| {
        if out.is_null() {
            return false;
        }
        match catalog().get(index as usize) {
            Some(entry) => {
                unsafe { out.write(entry.descriptor()) };
                true
            }
            None => false,
        }
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

fn boxed_client(transport: Box<dyn Transport>) -> *mut FfiHttpClient {
    Box::into_raw(Box::new(FfiHttpClient {
        inner: HttpClient::new(transport),
    }))
}

/// Create a client with the default transport configuration (10 second read
/// timeout, redirects followed).
///
/// The caller must free the returned pointer with `http_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_new() -> *mut FfiHttpClient {
    catch_unwind(|| boxed_client(Box::new(UreqTransport::default())))
        .unwrap_or(std::ptr::null_mut())
}

/// Create a client from a JSON transport configuration, e.g.
/// `{"read_timeout_secs": 5, "max_redirects": 3}`. Missing fields keep their
/// defaults.
///
/// Returns null if `config_json` is null, not UTF-8 or not a valid config.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_new_with_config(config_json: *const c_char) -> *mut FfiHttpClient {
    catch_unwind(|| {
        if config_json.is_null() {
            return std::ptr::null_mut();
        }
        let raw = match unsafe { CStr::from_ptr(config_json) }.to_str() {
            Ok(raw) => raw,
            Err(_) => return std::ptr::null_mut(),
        };
        match TransportConfig::from_json(raw) {
            Ok(config) => boxed_client(Box::new(UreqTransport::new(config))),
            Err(err) => {
                tracing::warn!(%err, "rejected transport config");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `http_client_new*`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_free(client: *mut FfiHttpClient) {
    if !client.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(client) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Batch execution
// ---------------------------------------------------------------------------

/// Why an argument column could not be read.
enum ColumnError {
    Null,
    Utf8(usize),
}

/// Borrow `rows` nullable C strings as a column. A null entry is a NULL row.
///
/// # Safety
/// `column` must point to `rows` entries, each null or a valid C string
/// that outlives the returned slice.
unsafe fn read_column<'a>(column: *const *const c_char, rows: u32) -> Result<Vec<Option<&'a str>>, ColumnError> {
    if rows == 0 {
        return Ok(Vec::new());
    }
    if column.is_null() {
        return Err(ColumnError::Null);
    }
    let entries = unsafe { std::slice::from_raw_parts(column, rows as usize) };
    entries
        .iter()
        .enumerate()
        .map(|(row, &ptr)| {
            if ptr.is_null() {
                return Ok(None);
            }
            unsafe { CStr::from_ptr(ptr) }
                .to_str()
                .map(Some)
                .map_err(|_| ColumnError::Utf8(row))
        })
        .collect()
}

fn column_error(name: &str, err: ColumnError) -> *mut FfiBatchResult {
    match err {
        ColumnError::Null => FfiBatchResult::null_arg(name),
        ColumnError::Utf8(row) => FfiBatchResult::error(
            FfiErrorCode::InvalidUtf8,
            &format!("{name}: row {row} is not valid UTF-8"),
        ),
    }
}

/// Run `http_get` over `rows` URLs.
///
/// `urls` holds `rows` pointers; a null pointer is a NULL row and yields a
/// null value. The first failing row aborts the batch and its error is
/// returned instead of any values.
#[unsafe(no_mangle)]
pub extern "C" fn http_get_execute(
    client: *const FfiHttpClient,
    urls: *const *const c_char,
    rows: u32,
) -> *mut FfiBatchResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiBatchResult::null_arg("client");
        }
        let client = unsafe { &*client };
        let urls = match unsafe { read_column(urls, rows) } {
            Ok(column) => column,
            Err(err) => return column_error("urls", err),
        };
        match client.inner.http_get_batch(&urls) {
            Ok(values) => FfiBatchResult::ok(values),
            Err(e) => FfiBatchResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| {
        tracing::error!("panic in http_get_execute");
        FfiBatchResult::panic("panic in http_get_execute")
    })
}

/// Run `http_post` over `rows` aligned (url, headers, body) triples.
///
/// Headers are a newline-separated `Key: Value` block; the body is always
/// sent as `application/json`. A row with any null input yields a null
/// value without a request.
#[unsafe(no_mangle)]
pub extern "C" fn http_post_execute(
    client: *const FfiHttpClient,
    urls: *const *const c_char,
    headers: *const *const c_char,
    bodies: *const *const c_char,
    rows: u32,
) -> *mut FfiBatchResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiBatchResult::null_arg("client");
        }
        let client = unsafe { &*client };
        let urls = match unsafe { read_column(urls, rows) } {
            Ok(column) => column,
            Err(err) => return column_error("urls", err),
        };
        let headers = match unsafe { read_column(headers, rows) } {
            Ok(column) => column,
            Err(err) => return column_error("headers", err),
        };
        let bodies = match unsafe { read_column(bodies, rows) } {
            Ok(column) => column,
            Err(err) => return column_error("bodies", err),
        };
        match client.inner.http_post_batch(&urls, &headers, &bodies) {
            Ok(values) => FfiBatchResult::ok(values),
            Err(e) => FfiBatchResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| {
        tracing::error!("panic in http_post_execute");
        FfiBatchResult::panic("panic in http_post_execute")
    })
}

// ---------------------------------------------------------------------------
// Error classification
// ---------------------------------------------------------------------------

/// Message for a raw transport error code. Unrecognized codes map to
/// `Unknown error.`.
///
/// The caller must free the returned string with `http_client_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_error_message(code: i32) -> *mut c_char {
    catch_unwind(|| {
        let kind = TransportErrorKind::from_code(code);
        CString::new(kind.message())
            .map(CString::into_raw)
            .unwrap_or(std::ptr::null_mut())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiBatchResult` returned by `http_get_execute` or
/// `http_post_execute`, including every value it holds. Safe to call with
/// null.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_free_result(result: *mut FfiBatchResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.values.is_null() && result.rows > 0 {
            let slice = std::ptr::slice_from_raw_parts_mut(result.values, result.rows as usize);
            let values = unsafe { Box::from_raw(slice) };
            for &value in values.iter() {
                if !value.is_null() {
                    drop(unsafe { CString::from_raw(value) });
                }
            }
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
