use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{DynamicTypePath, DynamicTyped, TypeKind};
use crate::ops::ReflectRef;

// -----------------------------------------------------------------------------
// Reflect

/// The read-only view the encoder walks.
///
/// Every described type implements `Reflect`: it exposes its
/// [`TypeInfo`](crate::info::TypeInfo) through [`DynamicTyped`] and its
/// contents through [`reflect_ref`](Reflect::reflect_ref), which casts it to
/// one of the kind-specific traits in [`ops`](crate::ops).
///
/// Implement it with [the derive macro](crate::derive::Reflect) rather
/// than by hand.
///
/// ## Type Identification
///
/// [`Any::type_id`] on `Box<dyn Reflect>` returns the container's type ID,
/// not the inner value's. Use [`Reflect::ty_id`] instead:
///
/// ```
/// # use vc_marshal::Reflect;
/// # use core::any::{Any, TypeId};
/// let x: Box<dyn Reflect> = 32_i32.into_boxed_reflect();
///
/// assert!(x.type_id() != TypeId::of::<i32>());
/// assert!(x.ty_id() == TypeId::of::<i32>());
/// ```
///
/// ## Type Casting
///
/// ```
/// # use vc_marshal::{Reflect, ops::ReflectRef};
/// let list = vec![1_u8, 2, 3].into_boxed_reflect();
/// let ReflectRef::List(list) = list.reflect_ref() else { unreachable!() };
/// assert_eq!(list.len(), 3);
/// ```
pub trait Reflect: DynamicTypePath + DynamicTyped + Send + Sync + Any {
    #[inline]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying value.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the kind of the underlying value.
    #[inline]
    fn reflect_kind(&self) -> TypeKind {
        self.reflect_ref().kind()
    }

    /// Casts this value to its kind-specific view.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Debug formatting used by `impl Debug for dyn Reflect`.
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_type_path())
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// ```
    /// # use vc_marshal::Reflect;
    /// let x: Box<dyn Reflect> = 10_i32.into_boxed_reflect();
    /// assert!(x.is::<i32>());
    /// ```
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// ```
    /// # use vc_marshal::Reflect;
    /// let x: Box<dyn Reflect> = String::from("Jane").into_boxed_reflect();
    /// assert_eq!(x.take::<String>().unwrap(), "Jane");
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements `reflect_ref` for a type whose kind trait is implemented
/// on itself.
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        #[inline]
        fn reflect_kind(&self) -> $crate::info::TypeKind {
            $crate::info::TypeKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::string::String;

    use crate::Reflect;

    #[test]
    fn downcast_checks_type() {
        let x: Box<dyn Reflect> = 7_u16.into_boxed_reflect();
        assert!(x.downcast_ref::<u32>().is_none());

        let x = x.downcast::<u32>().unwrap_err();
        assert_eq!(x.take::<u16>().unwrap(), 7);
    }

    #[test]
    fn debug_uses_reflect_debug() {
        let x: Box<dyn Reflect> = String::from("a").into_boxed_reflect();
        assert_eq!(format!("{x:?}"), "\"a\"");
    }
}
