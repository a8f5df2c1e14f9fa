//! Containers for static storage of type information.
//!
//! ## NonGenericTypeInfoCell
//!
//! For non generic types, [`NonGenericTypeInfoCell`] stores the
//! [`TypeInfo`] in a [`OnceLock`]. Type paths of non generic types are
//! string literals and need no cell.
//!
//! ## GenericTypeCell
//!
//! A `static CELL` inside a generic function is shared by every
//! instantiation, so the generic cells key their content by [`TypeId`]:
//! - [`GenericTypeInfoCell`]: stores [`TypeInfo`].
//! - [`GenericTypePathCell`]: stores [`String`].
//!
//! Entries are leaked on insertion and live for the rest of the program.

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::hash::{TypeIdMap, new_map};
use crate::info::TypeInfo;

mod sealed {
    use super::TypeInfo;
    use alloc::string::String;
    pub trait TypedProperty: Send + Sync + 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for TypeInfo {}
}

use sealed::TypedProperty;

/// Container for static storage of non-generic type information.
///
/// See [`NonGenericTypeInfoCell`].
pub struct NonGenericTypeCell<T: TypedProperty>(OnceLock<T>);

/// Container for the [`TypeInfo`] of a non-generic type.
///
/// This is usually used to implement [`Typed`](crate::info::Typed); see
/// its documentation for a full example.
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: TypedProperty> NonGenericTypeCell<T> {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, building it with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.0.get_or_init(f)
    }
}

impl<T: TypedProperty> Default for NonGenericTypeCell<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Container for static storage of type information with generics.
///
/// See [`GenericTypeInfoCell`] and [`GenericTypePathCell`].
pub struct GenericTypeCell<T: TypedProperty>(RwLock<TypeIdMap<&'static T>>);

/// Container for the [`TypeInfo`] of a generic type.
///
/// ```
/// use vc_marshal::impls::GenericTypeInfoCell;
/// use vc_marshal::info::{ListInfo, TypeInfo, TypePath, Typed};
/// # use vc_marshal::{Reflect, ops::{ConstructError, List, ReflectRef}};
///
/// struct Bag<T>(Vec<T>);
/// # impl<T: TypePath> TypePath for Bag<T> {
/// #     fn type_path() -> &'static str { "Bag" }
/// #     fn type_name() -> &'static str { "Bag" }
/// #     fn type_ident() -> &'static str { "Bag" }
/// # }
///
/// impl<T: Typed + Reflect> Typed for Bag<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| {
///             TypeInfo::List(ListInfo::new::<Self, T>(|_| {
///                 Err(ConstructError::ItemCount { expected: 0, found: 0 })
///             }))
///         })
///     }
/// }
///
/// let info = <Bag<u64>>::type_info().as_list().unwrap();
/// assert!(info.item_is::<u64>());
/// assert!(<Bag<u8>>::type_info().as_list().unwrap().item_is::<u8>());
/// ```
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Container for the type path strings of a generic type.
///
/// ```
/// use vc_marshal::impls::{self, GenericTypePathCell};
/// use vc_marshal::info::TypePath;
///
/// struct Pair<T>(T, T);
///
/// impl<T: TypePath> TypePath for Pair<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| impls::concat(&["demo::Pair<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| impls::concat(&["Pair<", T::type_name(), ">"]))
///     }
///     fn type_ident() -> &'static str {
///         "Pair"
///     }
/// }
///
/// assert_eq!(<Pair<i32>>::type_path(), "demo::Pair<i32>");
/// assert_eq!(<Pair<u8>>::type_name(), "Pair<u8>");
/// ```
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: TypedProperty> GenericTypeCell<T> {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(new_map()))
    }

    /// Returns the value stored for type `G`, building it with `f` on first
    /// access.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        let leaked: &'static T = *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(type_id)
            .or_insert_with(|| Box::leak(Box::new(value)));
        leaked
    }
}

impl<T: TypedProperty> Default for GenericTypeCell<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
