use alloc::boxed::Box;
use core::fmt;

use crate::Reflect;
use crate::info::{Type, TypePath, impl_type_fn};
use crate::marshal::DecodeErrorKind;
use crate::value::Value;

/// Reads a leaf value back from its tree node.
pub type FromValueFn = fn(&Value) -> Result<Box<dyn Reflect>, DecodeErrorKind>;

/// A container for compile-time opaque (leaf) type info.
///
/// Opaque types are the recursion base: they encode themselves into a
/// tree node and read themselves back from one.
///
/// # Examples
///
/// ```
/// use vc_marshal::info::Typed;
/// use vc_marshal::value::Value;
///
/// let info = <u8 as Typed>::type_info().as_opaque().unwrap();
/// let value = info.from_value(&Value::from(7_u64)).unwrap();
/// assert_eq!(value.downcast_ref::<u8>(), Some(&7));
///
/// assert!(info.from_value(&Value::from(300_u64)).is_err());
/// ```
#[derive(Clone)]
pub struct OpaqueInfo {
    ty: Type,
    from_value: FromValueFn,
}

impl OpaqueInfo {
    impl_type_fn!(ty);

    #[inline]
    pub fn new<T: TypePath>(from_value: FromValueFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            from_value,
        }
    }

    #[inline]
    pub fn from_value(&self, value: &Value) -> Result<Box<dyn Reflect>, DecodeErrorKind> {
        (self.from_value)(value)
    }
}

impl fmt::Debug for OpaqueInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueInfo")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}
