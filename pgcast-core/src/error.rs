use crate::{Error, array::MAX_DIMENSIONS};

/// Failure kinds raised by the parsers and the registry.
///
/// Errors travel as [`anyhow::Error`], recover the kind with
/// `error.downcast_ref::<TypecastError>()`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypecastError {
    /// The array literal is not enclosed in braces.
    #[error("Malformed array `{0}`")]
    MalformedArray(String),
    /// A closing brace without a matching opening one.
    #[error("Unbalanced braces in array `{0}`")]
    UnbalancedBraces(String),
    #[error("Excessive array dimensions, at most {max} are supported", max = MAX_DIMENSIONS)]
    ExcessiveDimensions,
    /// The literal is not valid for the target type.
    #[error("Cannot convert `{value}` to {kind}")]
    Conversion { kind: &'static str, value: String },
    /// Dates before the common era cannot be represented.
    #[error("BC dates not supported: `{0}`")]
    UnsupportedEra(String),
    #[error("Invalid scope: {0}")]
    InvalidScope(String),
    #[error("Cannot decode value as {encoding}: {reason}")]
    Decoding { encoding: String, reason: String },
}

impl TypecastError {
    pub(crate) fn conversion(kind: &'static str, value: impl AsRef<[u8]>) -> Error {
        TypecastError::Conversion {
            kind,
            value: crate::util::lossy_truncated(value.as_ref()),
        }
        .into()
    }

    pub(crate) fn decoding(encoding: impl Into<String>, reason: impl ToString) -> Error {
        TypecastError::Decoding {
            encoding: encoding.into(),
            reason: reason.to_string(),
        }
        .into()
    }
}
