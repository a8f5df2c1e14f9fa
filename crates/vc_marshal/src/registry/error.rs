use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;

use thiserror::Error;

/// A descriptor refused by [`TypeRegistry::register`].
///
/// Nothing is registered when this is returned, not even the dependencies
/// that were valid.
///
/// [`TypeRegistry::register`]: crate::registry::TypeRegistry::register
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistrationError {
    /// Two fields of one record share a name.
    #[error("`{type_path}` declares field `{field}` twice")]
    DuplicateField {
        type_path: Cow<'static, str>,
        field: &'static str,
    },
    /// Two variants of one union share a tag.
    #[error("`{type_path}` declares variant tag `{tag}` twice")]
    DuplicateTag {
        type_path: Cow<'static, str>,
        tag: &'static str,
    },
    /// Two members of one dispatch type share a discriminant key.
    #[error("`{type_path}` declares dispatch key `{key}` twice")]
    DuplicateDispatchKey {
        type_path: Cow<'static, str>,
        key: &'static str,
    },
    /// A skip, skip-if or rename rule names a field the record lacks.
    #[error("field policy of `{type_path}` names unknown field `{field}`")]
    UnknownPolicyField {
        type_path: Cow<'static, str>,
        field: &'static str,
    },
    /// A rename produces an output key already used by another field.
    #[error("`{type_path}` writes two fields under key `{key}`")]
    RenameCollision {
        type_path: Cow<'static, str>,
        key: &'static str,
    },
    /// An optional value whose payload is optional too: `None` and
    /// `Some(None)` would both encode as `Null`.
    #[error("`{type_path}` nests an optional value in an optional value")]
    NestedOption { type_path: Cow<'static, str> },
    /// The type graph reaches a type from itself.
    #[error("type graph contains a cycle: {}", CyclePath(.path))]
    Cycle { path: Vec<&'static str> },
}

struct CyclePath<'a>(&'a [&'static str]);

impl fmt::Display for CyclePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, type_path) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(type_path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;
    use alloc::string::ToString;
    use alloc::vec;

    use super::RegistrationError;

    #[test]
    fn display() {
        let err = RegistrationError::Cycle {
            path: vec!["a::Node", "a::Edge", "a::Node"],
        };
        assert_eq!(err.to_string(), "type graph contains a cycle: a::Node -> a::Edge -> a::Node");

        let err = RegistrationError::DuplicateTag {
            type_path: Cow::Borrowed("a::Name"),
            tag: "First",
        };
        assert_eq!(err.to_string(), "`a::Name` declares variant tag `First` twice");
    }
}
