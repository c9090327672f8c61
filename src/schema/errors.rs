//! Descriptor error types
//!
//! Error codes:
//! - TUPLE_INVALID_SCHEMA (construction or combine rejected)
//! - TUPLE_NO_SUCH_FIELD (bad index or unknown name)

use std::fmt;

use thiserror::Error;

/// Descriptor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorErrorCode {
    /// Field list is empty, has too many names, or a combine was rejected
    InvalidSchema,
    /// Index out of range, missing lookup name, or no matching field
    NoSuchField,
}

impl DescriptorErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            DescriptorErrorCode::InvalidSchema => "TUPLE_INVALID_SCHEMA",
            DescriptorErrorCode::NoSuchField => "TUPLE_NO_SUCH_FIELD",
        }
    }
}

impl fmt::Display for DescriptorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Descriptor error with context
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct DescriptorError {
    code: DescriptorErrorCode,
    message: String,
    index: Option<usize>,
    name: Option<String>,
}

impl DescriptorError {
    /// No field types were supplied
    pub fn no_fields() -> Self {
        Self {
            code: DescriptorErrorCode::InvalidSchema,
            message: "a tuple descriptor needs at least one field".into(),
            index: None,
            name: None,
        }
    }

    /// More names than types were supplied
    pub fn too_many_names(names: usize, types: usize) -> Self {
        Self {
            code: DescriptorErrorCode::InvalidSchema,
            message: format!("{} field names supplied for {} field types", names, types),
            index: None,
            name: None,
        }
    }

    /// Both halves of a combine share a field name
    pub fn duplicate_name(name: impl Into<String>, first: usize, duplicate: usize) -> Self {
        let name = name.into();
        Self {
            code: DescriptorErrorCode::InvalidSchema,
            message: format!(
                "field name '{}' at index {} duplicates index {}",
                name, duplicate, first
            ),
            index: Some(duplicate),
            name: Some(name),
        }
    }

    /// Index is not a valid field reference
    pub fn index_out_of_range(index: usize, num_fields: usize) -> Self {
        Self {
            code: DescriptorErrorCode::NoSuchField,
            message: format!("field index {} out of range for {} fields", index, num_fields),
            index: Some(index),
            name: None,
        }
    }

    /// Name lookup called without a name
    pub fn missing_name() -> Self {
        Self {
            code: DescriptorErrorCode::NoSuchField,
            message: "field lookup requires a name".into(),
            index: None,
            name: None,
        }
    }

    /// No field carries the requested name
    pub fn unknown_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: DescriptorErrorCode::NoSuchField,
            message: format!("no field named '{}'", name),
            index: None,
            name: Some(name),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> DescriptorErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending index if applicable
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Returns the offending field name if applicable
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns true for `TUPLE_INVALID_SCHEMA` errors
    pub fn is_invalid_schema(&self) -> bool {
        self.code == DescriptorErrorCode::InvalidSchema
    }

    /// Returns true for `TUPLE_NO_SUCH_FIELD` errors
    pub fn is_no_such_field(&self) -> bool {
        self.code == DescriptorErrorCode::NoSuchField
    }
}

/// Result type for descriptor operations
pub type DescriptorResult<T> = Result<T, DescriptorError>;
