//! Leaf implementations for primitive types.
//!
//! Every leaf is an [`Opaque`] type: it encodes itself into a scalar and
//! reads itself back from one. Numeric leaves accept signed and unsigned
//! integers as long as the number fits the target type.

use alloc::boxed::Box;
use alloc::string::{String, ToString};

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
use crate::marshal::DecodeErrorKind;
use crate::ops::Opaque;
use crate::value::{Scalar, Value};

/// Returns the scalar node or a shape error.
pub(crate) fn expect_scalar(value: &Value) -> Result<&Scalar, DecodeErrorKind> {
    value.as_scalar().ok_or(DecodeErrorKind::ShapeMismatch {
        expected: "Scalar",
        found: value.kind(),
    })
}

/// The error for a scalar that cannot be read as `T`.
pub(crate) fn invalid_scalar<T: TypePath>(scalar: &Scalar) -> DecodeErrorKind {
    DecodeErrorKind::InvalidScalar {
        expected: T::type_path(),
        found: scalar.to_string(),
    }
}

/// Implements `TypePath`, `Typed`, `Reflect` and `Opaque` for a leaf.
///
/// `$read` turns a `&Scalar` into `Option<Self>`; `None` is reported as
/// an invalid scalar.
macro_rules! impl_leaf {
    (@reflect $ty:ty, |$scalar:ident| $read:expr) => {
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                fn from_value(value: &Value) -> Result<Box<dyn Reflect>, DecodeErrorKind> {
                    let $scalar = expect_scalar(value)?;
                    let read: Option<$ty> = $read;
                    match read {
                        Some(v) => Ok(Box::new(v)),
                        None => Err(invalid_scalar::<$ty>($scalar)),
                    }
                }

                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>(from_value)))
            }
        }

        impl Reflect for $ty {
            crate::reflection::impl_reflect_cast_fn!(Opaque);

            #[inline]
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        }

        impl Opaque for $ty {
            #[inline]
            fn to_value(&self) -> Value {
                Value::from(self.clone())
            }
        }
    };
    ($ty:ty, $path:literal, $name:literal, |$scalar:ident| $read:expr) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }

            #[inline]
            fn type_ident() -> &'static str {
                $name
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                $path.rfind("::").map(|index| $path.split_at(index).0)
            }
        }

        impl_leaf!(@reflect $ty, |$scalar| $read);
    };
    ($ty:ty, $name:expr, |$scalar:ident| $read:expr) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $name
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }

            #[inline]
            fn type_ident() -> &'static str {
                $name
            }
        }

        impl_leaf!(@reflect $ty, |$scalar| $read);
    };
}

/// Narrows to `f32`, refusing finite values outside its range.
fn narrow_f32(v: f64) -> Option<f32> {
    let in_range = !v.is_finite() || (f64::from(f32::MIN)..=f64::from(f32::MAX)).contains(&v);
    in_range.then_some(v as f32)
}

macro_rules! impl_signed {
    ($($ty:ty),+) => {$(
        impl_leaf!($ty, stringify!($ty), |scalar| scalar.as_i64().and_then(|v| <$ty>::try_from(v).ok()));
    )+};
}

macro_rules! impl_unsigned {
    ($($ty:ty),+) => {$(
        impl_leaf!($ty, stringify!($ty), |scalar| scalar.as_u64().and_then(|v| <$ty>::try_from(v).ok()));
    )+};
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);

impl_leaf!(f64, "f64", |scalar| scalar.as_f64());
impl_leaf!(f32, "f32", |scalar| scalar.as_f64().and_then(narrow_f32));
impl_leaf!(bool, "bool", |scalar| scalar.as_bool());
impl_leaf!(char, "char", |scalar| scalar.as_char());
impl_leaf!(String, "alloc::string::String", "String", |scalar| {
    scalar.as_str().map(String::from)
});
impl_leaf!((), "()", |scalar| scalar.is_null().then_some(()));

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::info::{TypePath, Typed};
    use crate::marshal::DecodeErrorKind;
    use crate::ops::Opaque;
    use crate::value::{Value, ValueKind};

    fn read<T: Typed>(value: Value) -> Result<alloc::boxed::Box<dyn crate::Reflect>, DecodeErrorKind> {
        T::type_info().as_opaque().unwrap().from_value(&value)
    }

    #[test]
    fn integers_accept_both_signs_in_range() {
        let v = read::<u8>(Value::from(200_i64)).unwrap();
        assert_eq!(v.downcast_ref::<u8>(), Some(&200));

        let v = read::<i16>(Value::from(7_u64)).unwrap();
        assert_eq!(v.downcast_ref::<i16>(), Some(&7));

        assert!(matches!(
            read::<u8>(Value::from(-1_i64)),
            Err(DecodeErrorKind::InvalidScalar { expected: "u8", .. })
        ));
    }

    #[test]
    fn floats_widen_integers() {
        let v = read::<f64>(Value::from(3_u8)).unwrap();
        assert_eq!(v.downcast_ref::<f64>(), Some(&3.0));
    }

    #[test]
    fn f32_refuses_out_of_range_doubles() {
        let v = read::<f32>(Value::from(0.5_f64)).unwrap();
        assert_eq!(v.downcast_ref::<f32>(), Some(&0.5));

        let v = read::<f32>(Value::from(f64::from(f32::MAX))).unwrap();
        assert_eq!(v.downcast_ref::<f32>(), Some(&f32::MAX));

        assert!(matches!(
            read::<f32>(Value::from(1e300_f64)),
            Err(DecodeErrorKind::InvalidScalar { expected: "f32", .. })
        ));
        assert!(read::<f32>(Value::from(-1e39_f64)).is_err());
        assert!(read::<f32>(Value::from(f64::INFINITY)).is_ok());
    }

    #[test]
    fn leaves_reject_containers() {
        assert_eq!(
            read::<String>(Value::Sequence(alloc::vec![])).unwrap_err(),
            DecodeErrorKind::ShapeMismatch {
                expected: "Scalar",
                found: ValueKind::Sequence,
            }
        );
    }

    #[test]
    fn to_value_and_paths() {
        assert_eq!(String::from("x").to_value(), Value::from("x"));
        assert_eq!(().to_value(), Value::NULL);
        assert_eq!(<String as TypePath>::module_path(), Some("alloc::string"));
        assert_eq!(<u8 as TypePath>::module_path(), None);
    }
}
