use alloc::boxed::Box;
use core::fmt;

use crate::Reflect;
use crate::info::{FromItemsFn, Type, TypePath, UnnamedField, impl_type_fn};
use crate::ops::ConstructError;

/// A container for compile-time fixed tuple info.
///
/// Covers native tuples and `[T; N]` arrays: a fixed arity with one
/// declared type per position.
///
/// # Examples
///
/// ```
/// use vc_marshal::info::Typed;
///
/// let info = <(u16, u8) as Typed>::type_info().as_tuple().unwrap();
/// assert_eq!(info.field_len(), 2);
/// assert!(info.field_at(1).unwrap().type_is::<u8>());
///
/// let info = <[bool; 3] as Typed>::type_info().as_tuple().unwrap();
/// assert_eq!(info.field_len(), 3);
/// ```
#[derive(Clone)]
pub struct TupleInfo {
    ty: Type,
    fields: Box<[UnnamedField]>,
    from_items: FromItemsFn,
}

impl TupleInfo {
    impl_type_fn!(ty);

    pub fn new<T: TypePath>(fields: &[UnnamedField], from_items: FromItemsFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            from_items,
        }
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&UnnamedField> {
        self.fields.get(index)
    }

    /// Returns the arity.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, UnnamedField> {
        self.fields.iter()
    }

    /// Builds the tuple from exactly [`field_len`](Self::field_len) items.
    #[inline]
    pub fn from_items(
        &self,
        items: alloc::vec::Vec<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.from_items)(items)
    }
}

impl fmt::Debug for TupleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TupleInfo")
            .field("ty", &self.ty)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
