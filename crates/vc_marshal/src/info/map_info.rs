use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::ConstructError;

/// Builds a map container from its decoded entries, in input order.
pub type FromEntriesFn =
    fn(Vec<(Box<dyn Reflect>, Box<dyn Reflect>)>) -> Result<Box<dyn Reflect>, ConstructError>;

/// A container for compile-time map info.
///
/// Keys are encoded like any other value, so non-string keys are
/// supported.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use vc_marshal::info::Typed;
///
/// let info = <BTreeMap<u32, String> as Typed>::type_info().as_map().unwrap();
/// assert!(info.key_is::<u32>());
/// assert!(info.value_is::<String>());
/// ```
#[derive(Clone)]
pub struct MapInfo {
    ty: Type,
    key_ty_id: TypeId,
    key_info: fn() -> &'static TypeInfo,
    value_ty_id: TypeId,
    value_info: fn() -> &'static TypeInfo,
    from_entries: FromEntriesFn,
}

impl MapInfo {
    impl_type_fn!(ty);

    pub fn new<T: TypePath, K: Typed, V: Typed>(from_entries: FromEntriesFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            key_ty_id: TypeId::of::<K>(),
            key_info: K::type_info,
            value_ty_id: TypeId::of::<V>(),
            value_info: V::type_info,
            from_entries,
        }
    }

    #[inline]
    pub fn key_info(&self) -> &'static TypeInfo {
        (self.key_info)()
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }

    #[inline]
    pub fn key_is<T: 'static>(&self) -> bool {
        self.key_ty_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn value_is<T: 'static>(&self) -> bool {
        self.value_ty_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn from_entries(
        &self,
        entries: Vec<(Box<dyn Reflect>, Box<dyn Reflect>)>,
    ) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.from_entries)(entries)
    }
}

impl fmt::Debug for MapInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapInfo")
            .field("ty", &self.ty)
            .field("key", &self.key_info().type_path())
            .field("value", &self.value_info().type_path())
            .finish_non_exhaustive()
    }
}
