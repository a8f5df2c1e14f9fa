use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::ConstructError;

/// Builds an optional value from its decoded content.
pub type FromOptionFn = fn(Option<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructError>;

/// A container for compile-time optional value info.
///
/// `None` is encoded as the `Null` scalar, `Some(v)` as `v` itself.
#[derive(Clone)]
pub struct OptionInfo {
    ty: Type,
    some_ty_id: TypeId,
    some_info: fn() -> &'static TypeInfo,
    from_option: FromOptionFn,
}

impl OptionInfo {
    impl_type_fn!(ty);

    pub fn new<T: TypePath, S: Typed>(from_option: FromOptionFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            some_ty_id: TypeId::of::<S>(),
            some_info: S::type_info,
            from_option,
        }
    }

    /// Returns the descriptor of the wrapped type.
    #[inline]
    pub fn some_info(&self) -> &'static TypeInfo {
        (self.some_info)()
    }

    #[inline]
    pub fn some_is<T: 'static>(&self) -> bool {
        self.some_ty_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn from_option(
        &self,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.from_option)(value)
    }
}

impl fmt::Debug for OptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionInfo")
            .field("ty", &self.ty)
            .field("some", &self.some_info().type_path())
            .finish_non_exhaustive()
    }
}
