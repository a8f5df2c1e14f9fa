//! The generic value tree produced by encoding and consumed by decoding.
//!
//! ## Menu
//!
//! - [`Value`]: `Scalar | Sequence | Tuple | Mapping`.
//! - [`Scalar`]: primitive leaves, including `Null`.
//! - [`Mapping`]: ordered key-value entries with unique keys.
//! - [`ValueKind`]: the shape of a node, used in error reports.
//!
//! The tree implements `serde`'s `Serialize` and `Deserialize`, so it can be
//! handed unchanged to any serde data format.
//!
//! ```
//! use vc_marshal::value::{Mapping, Value};
//!
//! let mut mapping = Mapping::new();
//! mapping.insert("First", Value::Tuple(vec![Value::from("Alice")]));
//! let tree = Value::Mapping(mapping);
//!
//! assert_eq!(serde_json::to_string(&tree).unwrap(), r#"{"First":["Alice"]}"#);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod mapping;
mod scalar;
mod transport;

// -----------------------------------------------------------------------------
// Exports

pub use mapping::{Iter as MappingIter, Mapping};
pub use scalar::Scalar;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

// -----------------------------------------------------------------------------
// ValueKind

/// The runtime shape of a [`Value`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar,
    Sequence,
    Tuple,
    Mapping,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.pad("Scalar"),
            Self::Sequence => f.pad("Sequence"),
            Self::Tuple => f.pad("Tuple"),
            Self::Mapping => f.pad("Mapping"),
        }
    }
}

// -----------------------------------------------------------------------------
// Value

/// A node of the value tree.
///
/// `Sequence` is a variable-length ordered list, `Tuple` a fixed-length one.
/// Formats without a tuple notion (JSON) read tuples back as sequences, so
/// fixed-arity targets accept both.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Sequence(Vec<Value>),
    Tuple(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// The `Null` scalar.
    pub const NULL: Value = Value::Scalar(Scalar::Null);

    /// Returns the shape of this node.
    #[inline]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Tuple(_) => ValueKind::Tuple,
            Self::Mapping(_) => ValueKind::Mapping,
        }
    }

    #[inline]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the string slice if this node is a string scalar.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => s.as_str(),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the items of a `Sequence` or a `Tuple`.
    #[inline]
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }

    /// Returns `true` for an empty string, sequence, tuple or mapping.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(Scalar::Str(s)) => s.is_empty(),
            Self::Scalar(_) => false,
            Self::Sequence(items) | Self::Tuple(items) => items.is_empty(),
            Self::Mapping(m) => m.is_empty(),
        }
    }
}

impl Default for Value {
    #[inline]
    fn default() -> Self {
        Self::NULL
    }
}

impl From<Scalar> for Value {
    #[inline]
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<Mapping> for Value {
    #[inline]
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}

macro_rules! impl_value_from_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Scalar(Scalar::from(value))
                }
            }
        )+
    };
}

impl_value_from_scalar!(
    bool, char, (), i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String, &str,
);

impl fmt::Display for Value {
    /// A compact, JSON-like rendering. Tuples use parentheses.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                fmt::Display::fmt(item, f)?;
            }
            Ok(())
        }

        match self {
            Self::Scalar(s) => fmt::Display::fmt(s, f),
            Self::Sequence(items) => {
                f.write_str("[")?;
                write_items(f, items)?;
                f.write_str("]")
            }
            Self::Tuple(items) => {
                f.write_str("(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Self::Mapping(m) => {
                f.write_str("{")?;
                for (index, (key, value)) in m.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::{Mapping, Value, ValueKind};

    #[test]
    fn display_matches_python_like_notation() {
        let mut mapping = Mapping::new();
        mapping.insert("First", Value::Tuple(vec![Value::from("Alice")]));
        let tree = Value::Mapping(mapping);

        assert_eq!(tree.to_string(), r#"{"First": ("Alice",)}"#);
    }

    #[test]
    fn emptiness() {
        assert!(Value::from("").is_empty());
        assert!(Value::Sequence(vec![]).is_empty());
        assert!(!Value::from(0_u8).is_empty());
        assert_eq!(Value::NULL.kind(), ValueKind::Scalar);
        assert!(Value::default().is_null());
    }
}
