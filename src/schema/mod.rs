//! Tuple schema descriptors
//!
//! # Design Principles
//!
//! - A descriptor has at least one field
//! - Descriptors are immutable once constructed
//! - Field types compare by tag, names by exact string
//! - Row size is a pure function of the field types
//! - Combining two descriptors never mutates either input

mod config;
mod descriptor;
mod errors;
mod types;

pub use config::{ConfigError, ConfigResult, DuplicateNamePolicy, SchemaConfig};
pub use descriptor::TupleDesc;
pub use errors::{DescriptorError, DescriptorErrorCode, DescriptorResult};
pub use types::{FieldLookup, FieldType, TupleField, STRING_LEN};
