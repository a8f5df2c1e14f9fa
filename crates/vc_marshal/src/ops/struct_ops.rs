use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Reflect;
use crate::info::TypePath;
use crate::ops::ConstructError;

// -----------------------------------------------------------------------------
// Struct

/// A reflected struct with named fields.
///
/// Index-based access follows declaration order, matching
/// [`StructInfo::field_at`](crate::info::StructInfo::field_at).
///
/// ```
/// use vc_marshal::{Reflect, derive::Reflect, ops::ReflectRef};
///
/// #[derive(Reflect)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// let user = User { name: "Jane".into(), age: 30 };
/// let ReflectRef::Struct(view) = user.reflect_ref() else { unreachable!() };
///
/// assert_eq!(view.field_len(), 2);
/// assert_eq!(view.field("age").unwrap().downcast_ref::<u32>(), Some(&30));
/// ```
pub trait Struct: Reflect {
    /// Returns the field with the given name.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns the field at `index` in declaration order.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_len(&self) -> usize;
}

// -----------------------------------------------------------------------------
// DynamicStruct

/// Decoded field values of a record, keyed by declared field name.
///
/// Built by the decoder in declaration order and consumed by a
/// [`ConstructStructFn`](crate::info::ConstructStructFn) hook, which takes
/// each field out by name.
///
/// ```
/// use vc_marshal::Reflect;
/// use vc_marshal::ops::{ConstructError, DynamicStruct};
///
/// let mut fields = DynamicStruct::new();
/// fields.insert("age", 30_u32.into_boxed_reflect());
///
/// assert_eq!(fields.take::<u32>("age"), Ok(30));
/// assert!(matches!(
///     fields.take::<u32>("age"),
///     Err(ConstructError::MissingField { .. })
/// ));
/// ```
#[derive(Default)]
pub struct DynamicStruct {
    fields: Vec<(&'static str, Box<dyn Reflect>)>,
}

impl DynamicStruct {
    #[inline]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Inserts a field value, replacing any previous value of that name.
    pub fn insert(&mut self, name: &'static str, value: Box<dyn Reflect>) {
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Reflect> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| &**value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Reflect>> {
        let index = self.fields.iter().position(|(field, _)| *field == name)?;
        Some(self.fields.remove(index).1)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| *field == name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Removes the field `name` and unboxes it as `T`.
    pub fn take<T: Reflect + TypePath>(&mut self, name: &'static str) -> Result<T, ConstructError> {
        let value = self.remove(name).ok_or(ConstructError::MissingField {
            field: Cow::Borrowed(name),
        })?;
        value.take::<T>().map_err(|value| ConstructError::TypeMismatch {
            field: Cow::Borrowed(name),
            expected: T::type_path(),
            found: value.reflect_type_path(),
        })
    }
}

impl core::fmt::Debug for DynamicStruct {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in &self.fields {
            map.entry(name, value);
        }
        map.finish()
    }
}
