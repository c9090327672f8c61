//! Observable descriptor events
//!
//! Events are explicit and typed; their string names are stable.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Two descriptors were concatenated
    DescriptorCombined,
    /// A combine produced a name present on both sides
    DuplicateFieldName,
    /// Configuration file loaded
    ConfigLoaded,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::DescriptorCombined => "DESCRIPTOR_COMBINED",
            Event::DuplicateFieldName => "DUPLICATE_FIELD_NAME",
            Event::ConfigLoaded => "CONFIG_LOADED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
