//! Static description of the extension and the functions it registers.

/// Column types used in function signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalType {
    Varchar,
}

impl LogicalType {
    pub fn name(self) -> &'static str {
        match self {
            LogicalType::Varchar => "VARCHAR",
        }
    }
}

/// One scalar function as a host catalog sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDescriptor {
    pub name: &'static str,
    pub arguments: &'static [LogicalType],
    pub return_type: LogicalType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionInfo {
    pub name: &'static str,
    pub version: &'static str,
}

pub const EXTENSION_NAME: &str = "http_client";

const FUNCTIONS: &[FunctionDescriptor] = &[
    FunctionDescriptor {
        name: "http_get",
        arguments: &[LogicalType::Varchar],
        return_type: LogicalType::Varchar,
    },
    FunctionDescriptor {
        name: "http_post",
        arguments: &[LogicalType::Varchar, LogicalType::Varchar, LogicalType::Varchar],
        return_type: LogicalType::Varchar,
    },
];

pub fn extension_info() -> ExtensionInfo {
    ExtensionInfo {
        name: EXTENSION_NAME,
        version: env!("CARGO_PKG_VERSION"),
    }
}

pub fn functions() -> &'static [FunctionDescriptor] {
    FUNCTIONS
}

pub fn find_function(name: &str) -> Option<&'static FunctionDescriptor> {
    FUNCTIONS.iter().find(|f| f.name == name)
}
