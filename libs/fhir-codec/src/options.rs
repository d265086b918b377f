//! Codec configuration

use crate::error::{Error, Result};
use tracing::debug;

/// What to do with keys or elements that match no field of the type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFields {
    /// Skip them (logged at debug level)
    #[default]
    Ignore,
    /// Fail with [`Error::UnknownField`](crate::Error::UnknownField)
    Reject,
}

/// Encode/decode options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub unknown_fields: UnknownFields,
    /// Pretty-printed JSON and indented XML output
    pub pretty: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFields::Ignore,
            pretty: true,
        }
    }
}

impl Options {
    /// Options that reject unknown fields
    pub fn strict() -> Self {
        Self::default().with_unknown_fields(UnknownFields::Reject)
    }

    pub fn with_unknown_fields(mut self, unknown_fields: UnknownFields) -> Self {
        self.unknown_fields = unknown_fields;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.unknown_fields == UnknownFields::Reject
    }

    /// Apply the unknown-field policy to a key that matched no field.
    pub fn unknown_field(&self, type_name: &str, field: &str) -> Result<()> {
        match self.unknown_fields {
            UnknownFields::Ignore => {
                debug!(type_name, field, "Skipping unknown field");
                Ok(())
            }
            UnknownFields::Reject => Err(Error::UnknownField {
                type_name: type_name.to_string(),
                field: field.to_string(),
            }),
        }
    }
}
