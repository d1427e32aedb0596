use std::{
    fmt::{self, Display},
    io,
};

use thiserror::Error;

/// A field of [DexoptParams](crate::DexoptParams), used to point at the
/// culprit of a validation failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Flags,
    CompilerFilter,
    PriorityClass,
    Reason,
    SplitName,
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Flags => "flags",
            Field::CompilerFilter => "compiler_filter",
            Field::PriorityClass => "priority_class",
            Field::Reason => "reason",
            Field::SplitName => "split_name",
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// A field or a combination of fields is not legal.
    #[error("Invalid {field}: {message}")]
    InvalidConfiguration { field: Field, message: String },
    /// The bytes given to
    /// [from_wire_format](crate::DexoptParams::from_wire_format) are not a
    /// well-formed payload.
    #[error("Malformed wire data: {0}")]
    MalformedWireData(#[source] io::Error),
    /// The params could not be written out, which only happens when a string
    /// field is longer than the wire format allows.
    #[error("Failed to encode wire data: {0}")]
    Encoding(#[source] io::Error),
}

impl Error {
    pub(crate) fn invalid(field: Field, message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            field,
            message: message.into(),
        }
    }

    /// The offending field, if this is a validation failure.
    pub fn field(&self) -> Option<Field> {
        match self {
            Error::InvalidConfiguration { field, .. } => Some(*field),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A string that is not one of the tokens of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} token: {token:?}")]
pub struct UnknownToken {
    pub kind: &'static str,
    pub token: String,
}
