//! Field type definitions
//!
//! Supported types:
//! - INT_TYPE: 32-bit signed integer, 4 bytes
//! - STRING_TYPE: fixed-width string slot, `STRING_LEN` bytes

use std::fmt;

/// Byte width of a `STRING_TYPE` field
pub const STRING_LEN: usize = 128;

/// Field types a tuple can hold. Every type has a fixed byte width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldType {
    /// 32-bit signed integer
    Int,
    /// Fixed-width string
    String,
}

impl FieldType {
    /// Returns the number of bytes a field of this type occupies
    pub fn len(&self) -> usize {
        match self {
            FieldType::Int => 4,
            FieldType::String => STRING_LEN,
        }
    }

    /// Returns the type name used in renderings
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Int => "INT_TYPE",
            FieldType::String => "STRING_TYPE",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A single field slot: a type plus an optional name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleField {
    field_type: FieldType,
    name: Option<String>,
}

impl TupleField {
    /// Create a named field
    pub fn named(field_type: FieldType, name: impl Into<String>) -> Self {
        Self {
            field_type,
            name: Some(name.into()),
        }
    }

    /// Create an unnamed field
    pub fn anonymous(field_type: FieldType) -> Self {
        Self {
            field_type,
            name: None,
        }
    }

    /// Create a field whose name may be absent
    pub fn new(field_type: FieldType, name: Option<String>) -> Self {
        Self { field_type, name }
    }

    /// Returns the field's type tag
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the field's name, `None` for an unnamed field
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Byte width of this field
    pub fn len(&self) -> usize {
        self.field_type.len()
    }
}

/// Renders as `INT_TYPE("id")`; an unnamed field renders as `INT_TYPE(null)`.
/// Present names are quoted and escaped so they never read as the marker.
impl fmt::Display for TupleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}({:?})", self.field_type, name),
            None => write!(f, "{}(null)", self.field_type),
        }
    }
}

/// A name argument for `TupleDesc::name_to_index`.
///
/// Implemented for borrowed and owned strings and for `Option`s of them, so
/// a lookup can be driven by a possibly-absent column reference.
pub trait FieldLookup {
    /// Returns the name to look up, `None` if the caller has no name
    fn lookup_name(&self) -> Option<&str>;
}

impl FieldLookup for &str {
    fn lookup_name(&self) -> Option<&str> {
        Some(*self)
    }
}

impl FieldLookup for String {
    fn lookup_name(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl FieldLookup for &String {
    fn lookup_name(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: AsRef<str>> FieldLookup for Option<T> {
    fn lookup_name(&self) -> Option<&str> {
        self.as_ref().map(|name| AsRef::<str>::as_ref(name))
    }
}
