//! Tuple descriptor
//!
//! A `TupleDesc` is the ordered list of fields making up a tuple. It is
//! immutable after construction; clones share the same field storage.

use std::fmt;
use std::sync::Arc;

use super::config::{DuplicateNamePolicy, SchemaConfig};
use super::errors::{DescriptorError, DescriptorResult};
use super::types::{FieldLookup, FieldType, TupleField};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};

/// Describes the schema of a tuple.
///
/// Two descriptors are equal when they have the same number of fields and,
/// position by position, the same field type and the same name (both absent
/// or both present and equal). `Hash` agrees with this equality, so
/// descriptors can be used as map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleDesc {
    fields: Arc<[TupleField]>,
}

impl TupleDesc {
    /// Create a descriptor with the given types and names.
    ///
    /// `names` may be shorter than `types`; the missing trailing names are
    /// absent. Fails with `TUPLE_INVALID_SCHEMA` if `types` is empty or if
    /// there are more names than types.
    pub fn new(types: Vec<FieldType>, names: Vec<Option<String>>) -> DescriptorResult<Self> {
        if types.is_empty() {
            return Err(DescriptorError::no_fields());
        }
        if names.len() > types.len() {
            return Err(DescriptorError::too_many_names(names.len(), types.len()));
        }

        let mut names = names.into_iter();
        let fields = types
            .into_iter()
            .map(|field_type| TupleField::new(field_type, names.next().flatten()))
            .collect();

        Ok(Self { fields })
    }

    /// Create a descriptor where every supplied name is present.
    pub fn with_names(types: Vec<FieldType>, names: &[&str]) -> DescriptorResult<Self> {
        let names = names.iter().map(|name| Some((*name).to_string())).collect();
        Self::new(types, names)
    }

    /// Create a descriptor with unnamed fields.
    pub fn anonymous(types: Vec<FieldType>) -> DescriptorResult<Self> {
        if types.is_empty() {
            return Err(DescriptorError::no_fields());
        }
        let fields = types.into_iter().map(TupleField::anonymous).collect();
        Ok(Self { fields })
    }

    /// Create a descriptor from prebuilt fields, in order.
    pub fn from_fields(fields: Vec<TupleField>) -> DescriptorResult<Self> {
        if fields.is_empty() {
            return Err(DescriptorError::no_fields());
        }
        Ok(Self {
            fields: Arc::from(fields),
        })
    }

    /// Number of fields; always at least one.
    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    /// Gets the field at `index`, or `TUPLE_NO_SUCH_FIELD` if out of range.
    pub fn field(&self, index: usize) -> DescriptorResult<&TupleField> {
        self.fields
            .get(index)
            .ok_or_else(|| DescriptorError::index_out_of_range(index, self.num_fields()))
    }

    /// Gets the (possibly absent) name of the field at `index`.
    pub fn field_name(&self, index: usize) -> DescriptorResult<Option<&str>> {
        self.field(index).map(TupleField::name)
    }

    /// Gets the type of the field at `index`.
    pub fn field_type(&self, index: usize) -> DescriptorResult<FieldType> {
        self.field(index).map(TupleField::field_type)
    }

    /// Finds the index of the first field with the given name.
    ///
    /// Accepts any [`FieldLookup`]: `&str`, `String`, `&String`, or an
    /// `Option` of them. A missing name, or a name no field carries, fails
    /// with `TUPLE_NO_SUCH_FIELD`. Unnamed fields never match.
    pub fn name_to_index<N: FieldLookup>(&self, name: N) -> DescriptorResult<usize> {
        let wanted = name.lookup_name().ok_or_else(DescriptorError::missing_name)?;
        self.fields
            .iter()
            .position(|field| field.name() == Some(wanted))
            .ok_or_else(|| DescriptorError::unknown_name(wanted))
    }

    /// Size in bytes of a tuple with this descriptor.
    pub fn byte_size(&self) -> usize {
        self.fields.iter().map(TupleField::len).sum()
    }

    /// Byte offset of the field at `index` within a tuple.
    pub fn field_offset(&self, index: usize) -> DescriptorResult<usize> {
        if index >= self.num_fields() {
            return Err(DescriptorError::index_out_of_range(index, self.num_fields()));
        }
        Ok(self.fields[..index].iter().map(TupleField::len).sum())
    }

    /// Read-only view of the fields, in order.
    pub fn fields(&self) -> &[TupleField] {
        &self.fields
    }

    /// Iterates the fields in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TupleField> {
        self.fields.iter()
    }

    /// Iterates the field types in order.
    pub fn field_types(&self) -> impl Iterator<Item = FieldType> + '_ {
        self.fields.iter().map(TupleField::field_type)
    }

    /// Concatenates two descriptors: all of `left`'s fields, then all of
    /// `right`'s.
    ///
    /// Names shared by both sides are kept; `name_to_index` resolves them to
    /// the field from `left`.
    pub fn combine(left: &TupleDesc, right: &TupleDesc) -> TupleDesc {
        let fields = left.fields.iter().chain(right.fields.iter()).cloned().collect();

        if Logger::enabled(Severity::Trace) {
            let left_fields = left.num_fields().to_string();
            let right_fields = right.num_fields().to_string();
            log_event_with_fields(
                Event::DescriptorCombined,
                Severity::Trace,
                &[
                    ("left_fields", left_fields.as_str()),
                    ("right_fields", right_fields.as_str()),
                ],
            );
        }

        TupleDesc { fields }
    }

    /// Like [`TupleDesc::combine`], applying `policy` to names present on
    /// both sides.
    pub fn combine_with(
        left: &TupleDesc,
        right: &TupleDesc,
        policy: DuplicateNamePolicy,
    ) -> DescriptorResult<TupleDesc> {
        if policy != DuplicateNamePolicy::Permit {
            for (offset, field) in right.fields.iter().enumerate() {
                let Some(name) = field.name() else {
                    continue;
                };
                let Ok(first) = left.name_to_index(name) else {
                    continue;
                };
                let duplicate = left.num_fields() + offset;

                if policy == DuplicateNamePolicy::Reject {
                    return Err(DescriptorError::duplicate_name(name, first, duplicate));
                }
                let first = first.to_string();
                let duplicate = duplicate.to_string();
                log_event_with_fields(
                    Event::DuplicateFieldName,
                    Severity::Warn,
                    &[
                        ("name", name),
                        ("first_index", first.as_str()),
                        ("duplicate_index", duplicate.as_str()),
                    ],
                );
            }
        }

        Ok(Self::combine(left, right))
    }

    /// Combine using the configured duplicate-name policy.
    pub fn combine_with_config(
        left: &TupleDesc,
        right: &TupleDesc,
        config: &SchemaConfig,
    ) -> DescriptorResult<TupleDesc> {
        Self::combine_with(left, right, config.duplicate_names)
    }
}

impl<'a> IntoIterator for &'a TupleDesc {
    type Item = &'a TupleField;
    type IntoIter = std::slice::Iter<'a, TupleField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Renders as `INT_TYPE("id"), STRING_TYPE(null)`.
impl fmt::Display for TupleDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", field)?;
        }
        Ok(())
    }
}
