use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use thiserror::Error;

use super::{FieldPath, PathSegment};
use crate::ops::ConstructError;
use crate::policy::PredicateError;
use crate::value::ValueKind;

// -----------------------------------------------------------------------------
// Decode

/// What went wrong while decoding a tree.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    /// The node does not have the shape the target type requires.
    #[error("expected {expected}, found {found}")]
    ShapeMismatch {
        expected: &'static str,
        found: ValueKind,
    },
    /// A fixed tuple received the wrong number of items.
    #[error("expected {expected} items, found {found}")]
    ArityMismatch { expected: usize, found: usize },
    /// No candidate of a tagged union or dispatch type matched.
    #[error("no matching variant of `{type_path}`")]
    NoMatchingVariant { type_path: &'static str },
    /// A field without a default was absent or ignored.
    #[error("missing required field `{field}`")]
    MissingRequiredField { field: &'static str },
    /// A key naming no field, rejected by `deny_unknown_fields`.
    #[error("unknown field `{key}`")]
    UnknownField { key: String },
    /// A scalar that does not fit the target leaf type.
    #[error("invalid value {found} for `{expected}`")]
    InvalidScalar {
        expected: &'static str,
        found: String,
    },
    /// The target type is not in the registry.
    #[error("type `{type_path}` is not registered")]
    Unregistered { type_path: Cow<'static, str> },
    #[error(transparent)]
    Construct(#[from] ConstructError),
    #[error("{0}")]
    Custom(String),
}

/// A [`DecodeErrorKind`] plus the location of the offending node.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub path: FieldPath,
}

impl DecodeError {
    #[inline]
    pub const fn new(kind: DecodeErrorKind) -> Self {
        Self {
            kind,
            path: FieldPath::new(),
        }
    }

    /// Prepends `segment` to the error's path.
    #[inline]
    pub fn within(mut self, segment: PathSegment) -> Self {
        self.path.push_front(segment);
        self
    }
}

impl From<DecodeErrorKind> for DecodeError {
    #[inline]
    fn from(kind: DecodeErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<ConstructError> for DecodeError {
    #[inline]
    fn from(err: ConstructError) -> Self {
        Self::new(DecodeErrorKind::Construct(err))
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "decode error: {}", self.kind)
        } else {
            write!(f, "decode error at `{}`: {}", self.path, self.kind)
        }
    }
}

impl core::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.kind)
    }
}

// -----------------------------------------------------------------------------
// Encode

/// What went wrong while encoding a record.
///
/// Encoding a registered record only fails through a fallible skip-if
/// predicate or a custom hook.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EncodeErrorKind {
    /// A fallible skip-if predicate raised.
    #[error("skip-if predicate of `{field}` failed: {source}")]
    Predicate {
        field: &'static str,
        #[source]
        source: PredicateError,
    },
    /// The value's type is not in the registry.
    #[error("type `{type_path}` is not registered")]
    Unregistered { type_path: &'static str },
    /// Two map keys encoded to the same tree key.
    #[error("duplicate key {key}")]
    DuplicateKey { key: String },
    #[error("{0}")]
    Custom(String),
}

/// An [`EncodeErrorKind`] plus the location of the offending value.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeError {
    pub kind: EncodeErrorKind,
    pub path: FieldPath,
}

impl EncodeError {
    #[inline]
    pub const fn new(kind: EncodeErrorKind) -> Self {
        Self {
            kind,
            path: FieldPath::new(),
        }
    }

    /// Prepends `segment` to the error's path.
    #[inline]
    pub fn within(mut self, segment: PathSegment) -> Self {
        self.path.push_front(segment);
        self
    }
}

impl From<EncodeErrorKind> for EncodeError {
    #[inline]
    fn from(kind: EncodeErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "encode error: {}", self.kind)
        } else {
            write!(f, "encode error at `{}`: {}", self.path, self.kind)
        }
    }
}

impl core::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.kind)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{DecodeError, DecodeErrorKind, PathSegment};
    use crate::value::ValueKind;

    #[test]
    fn display_includes_path() {
        let err = DecodeError::new(DecodeErrorKind::ShapeMismatch {
            expected: "Sequence",
            found: ValueKind::Scalar,
        })
        .within(PathSegment::Field("middle"))
        .within(PathSegment::Type("User"));

        assert_eq!(
            err.to_string(),
            "decode error at `User.middle`: expected Sequence, found Scalar"
        );
    }

    #[test]
    fn display_without_path() {
        let err = DecodeError::new(DecodeErrorKind::MissingRequiredField { field: "age" });
        assert_eq!(err.to_string(), "decode error: missing required field `age`");
    }
}
