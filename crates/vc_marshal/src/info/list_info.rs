use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::ConstructError;

/// Builds a sequence container from its decoded items.
pub type FromItemsFn = fn(Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructError>;

/// A container for compile-time list info: a variable-length sequence of
/// one item type, such as `Vec<T>` or `VecDeque<T>`.
///
/// # Examples
///
/// ```
/// use vc_marshal::info::Typed;
///
/// let info = <Vec<u8> as Typed>::type_info().as_list().unwrap();
/// assert!(info.item_is::<u8>());
/// ```
#[derive(Clone)]
pub struct ListInfo {
    ty: Type,
    item_ty_id: TypeId,
    item_info: fn() -> &'static TypeInfo,
    from_items: FromItemsFn,
}

impl ListInfo {
    impl_type_fn!(ty);

    pub fn new<T: TypePath, Item: Typed>(from_items: FromItemsFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            item_ty_id: TypeId::of::<Item>(),
            item_info: Item::type_info,
            from_items,
        }
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    #[inline]
    pub fn item_is<T: 'static>(&self) -> bool {
        self.item_ty_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn from_items(&self, items: Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.from_items)(items)
    }
}

impl fmt::Debug for ListInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListInfo")
            .field("ty", &self.ty)
            .field("item", &self.item_info().type_path())
            .finish_non_exhaustive()
    }
}
