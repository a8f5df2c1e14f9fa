use alloc::string::String;
use core::fmt;

// -----------------------------------------------------------------------------
// Scalar

/// A primitive leaf of the [`Value`](crate::value::Value) tree.
///
/// Signed and unsigned integers are kept apart so that a `u64` above
/// `i64::MAX` survives a round trip. Numeric leaves accept either kind on
/// decode as long as the number fits the target type.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
}

impl Scalar {
    /// Returns a short name of the scalar kind, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "signed integer",
            Self::UInt(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::Char(_) => "char",
            Self::Str(_) => "string",
        }
    }

    /// Returns `true` for [`Scalar::Null`].
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string slice if this is a [`Scalar::Str`].
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Returns the value as `u64` if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(v) => u64::try_from(*v).ok(),
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `f64`; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::UInt(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Returns the value as `char`.
    ///
    /// A one-character string is accepted too, since most text formats
    /// have no dedicated char type.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            Self::Str(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::UInt(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
            Self::Char(v) => write!(f, "{v:?}"),
            Self::Str(v) => write!(f, "{v:?}"),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_scalar_from {
    ($variant:ident as $target:ty: $($ty:ty),+) => {
        $(
            impl From<$ty> for Scalar {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value as $target)
                }
            }
        )+
    };
}

impl_scalar_from!(Int as i64: i8, i16, i32, i64, isize);
impl_scalar_from!(UInt as u64: u8, u16, u32, u64, usize);
impl_scalar_from!(Float as f64: f32, f64);

impl From<bool> for Scalar {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for Scalar {
    #[inline]
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<String> for Scalar {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for Scalar {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl From<()> for Scalar {
    #[inline]
    fn from(_: ()) -> Self {
        Self::Null
    }
}

#[cfg(test)]
mod tests {
    use super::Scalar;

    #[test]
    fn integer_views() {
        assert_eq!(Scalar::UInt(7).as_i64(), Some(7));
        assert_eq!(Scalar::UInt(u64::MAX).as_i64(), None);
        assert_eq!(Scalar::Int(-1).as_u64(), None);
        assert_eq!(Scalar::Int(3).as_f64(), Some(3.0));
        assert_eq!(Scalar::Str("x".into()).as_i64(), None);
    }

    #[test]
    fn char_from_one_char_string() {
        assert_eq!(Scalar::from("a").as_char(), Some('a'));
        assert_eq!(Scalar::from("ab").as_char(), None);
        assert_eq!(Scalar::from('z').as_char(), Some('z'));
    }
}
