//! `#[repr(C)]` types for the extension's C ABI.
//!
//! # Design
//! Result values are heap-allocated and owned by the caller until passed to
//! `http_client_free_result`. Catalog data (function names and argument
//! lists) lives in a process-wide table built once, so descriptors handed
//! out by `http_client_function_at` borrow it and never need freeing.

use std::ffi::CString;
use std::os::raw::c_char;
use std::sync::OnceLock;

use http_client_core::{FunctionError, HttpClient, LogicalType, Transport};

/// Opaque handle to an `HttpClient`. C callers receive a pointer to this
/// and pass it back into every execute function.
pub struct FfiHttpClient {
    pub(crate) inner: HttpClient<Box<dyn Transport>>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Column type in a function signature.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiLogicalType {
    Varchar = 0,
}

impl From<LogicalType> for FfiLogicalType {
    fn from(t: LogicalType) -> Self {
        match t {
            LogicalType::Varchar => FfiLogicalType::Varchar,
        }
    }
}

/// One registered scalar function. All pointers borrow static storage.
#[repr(C)]
pub struct FfiFunctionDescriptor {
    pub name: *const c_char,
    pub arguments: *const FfiLogicalType,
    pub arguments_len: u32,
    pub return_type: FfiLogicalType,
}

pub(crate) struct CatalogEntry {
    name: CString,
    arguments: Vec<FfiLogicalType>,
    return_type: FfiLogicalType,
}

impl CatalogEntry {
    pub(crate) fn descriptor(&self) -> FfiFunctionDescriptor {
        FfiFunctionDescriptor {
            name: self.name.as_ptr(),
            arguments: self.arguments.as_ptr(),
            arguments_len: self.arguments.len() as u32,
            return_type: self.return_type,
        }
    }
}

pub(crate) fn catalog() -> &'static [CatalogEntry] {
    static CATALOG: OnceLock<Vec<CatalogEntry>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        http_client_core::functions()
            .iter()
            .filter_map(|f| {
                Some(CatalogEntry {
                    name: CString::new(f.name).ok()?,
                    arguments: f.arguments.iter().copied().map(Into::into).collect(),
                    return_type: f.return_type.into(),
                })
            })
            .collect()
    })
}

/// Extension name and version as C strings, built once.
pub(crate) fn identity() -> &'static (CString, CString) {
    static IDENTITY: OnceLock<(CString, CString)> = OnceLock::new();
    IDENTITY.get_or_init(|| {
        let info = http_client_core::extension_info();
        (
            CString::new(info.name).unwrap_or_default(),
            CString::new(info.version).unwrap_or_default(),
        )
    })
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiBatchResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    /// A response arrived with a status other than 200; see `http_status`.
    Http = 1,
    /// No response was obtained; see `transport_error`.
    Transport = 2,
    BatchShape = 3,
    InvalidUtf8 = 4,
    /// A response body contained a NUL byte and cannot be a C string.
    InteriorNul = 5,
    Panic = 6,
    NullArg = 7,
}

/// Result envelope for a batch execution.
///
/// On success `error_code` is `Ok`, `error_message` is null and `values`
/// holds `rows` entries, each an owned C string or null for a NULL row.
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `values` is null.
#[repr(C)]
pub struct FfiBatchResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    /// Raw transport error code, 0 unless `error_code` is `Transport`.
    pub transport_error: i32,
    pub rows: u32,
    pub values: *mut *mut c_char,
}

impl FfiBatchResult {
    /// Build a success result. Fails with `InteriorNul` if any value cannot
    /// become a C string; nothing is leaked in that case.
    pub(crate) fn ok(values: Vec<Option<String>>) -> *mut Self {
        let converted: Result<Vec<Option<CString>>, _> = values
            .into_iter()
            .map(|v| v.map(CString::new).transpose())
            .collect();
        let converted = match converted {
            Ok(c) => c,
            Err(err) => {
                return Self::error(
                    FfiErrorCode::InteriorNul,
                    &format!("response body contains a NUL byte at offset {}", err.nul_position()),
                )
            }
        };

        let rows = converted.len() as u32;
        let values = if converted.is_empty() {
            std::ptr::null_mut()
        } else {
            let raw: Box<[*mut c_char]> = converted
                .into_iter()
                .map(|v| v.map_or(std::ptr::null_mut(), CString::into_raw))
                .collect();
            Box::into_raw(raw) as *mut *mut c_char
        };

        Box::into_raw(Box::new(FfiBatchResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            transport_error: 0,
            rows,
            values,
        }))
    }

    /// Build an error result from a `FunctionError`.
    pub(crate) fn from_error(err: FunctionError) -> *mut Self {
        let (error_code, http_status, transport_error) = match &err {
            FunctionError::Status { status, .. } => (FfiErrorCode::Http, *status, 0),
            FunctionError::Transport { source, .. } => {
                (FfiErrorCode::Transport, 0, source.kind.code())
            }
            FunctionError::BatchShape(_) => (FfiErrorCode::BatchShape, 0, 0),
        };
        Self::failure(error_code, &err.to_string(), http_status, transport_error)
    }

    pub(crate) fn error(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        Self::failure(error_code, msg, 0, 0)
    }

    fn failure(
        error_code: FfiErrorCode,
        msg: &str,
        http_status: u16,
        transport_error: i32,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiBatchResult {
            error_code,
            error_message: CString::new(msg).unwrap_or_default().into_raw(),
            http_status,
            transport_error,
            rows: 0,
            values: std::ptr::null_mut(),
        }))
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, &format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, msg)
    }
}
