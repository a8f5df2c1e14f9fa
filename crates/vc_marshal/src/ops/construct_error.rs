use alloc::borrow::Cow;

/// An error raised by a constructor hook while assembling a value from its
/// decoded parts.
///
/// With consistent descriptors only [`MissingField`](Self::MissingField)
/// is reachable from input data; the other kinds point at a descriptor
/// that disagrees with its constructor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConstructError {
    #[error("missing field `{field}`")]
    MissingField { field: Cow<'static, str> },
    #[error("type mismatch at `{field}`: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        field: Cow<'static, str>,
        expected: &'static str,
        found: &'static str,
    },
    #[error("unknown variant `{variant}`")]
    UnknownVariant { variant: Cow<'static, str> },
    #[error("expected {expected} items, found {found}")]
    ItemCount { expected: usize, found: usize },
}
