use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;

use crate::Reflect;
use crate::info::TypePath;
use crate::ops::ConstructError;

// -----------------------------------------------------------------------------
// Tuple

/// A reflected fixed-arity value: a native tuple or an array.
pub trait Tuple: Reflect {
    fn field(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the arity.
    fn field_len(&self) -> usize;

    #[inline]
    fn iter_fields(&self) -> TupleFieldIter<'_>
    where
        Self: Sized,
    {
        TupleFieldIter::new(self)
    }
}

impl dyn Tuple {
    #[inline]
    pub fn iter(&self) -> TupleFieldIter<'_> {
        TupleFieldIter::new(self)
    }
}

/// An iterator over the fields of a [`Tuple`].
pub struct TupleFieldIter<'a> {
    tuple: &'a dyn Tuple,
    index: usize,
}

impl<'a> TupleFieldIter<'a> {
    #[inline(always)]
    pub const fn new(tuple: &'a dyn Tuple) -> Self {
        Self { tuple, index: 0 }
    }
}

impl<'a> Iterator for TupleFieldIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.tuple.field(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.tuple.field_len() - self.index;
        (size, Some(size))
    }
}

impl ExactSizeIterator for TupleFieldIter<'_> {}

// -----------------------------------------------------------------------------
// DynamicTuple

/// A fixed-size ordered array of decoded positional values.
///
/// Carries the payload of a tuple variant to its enum's constructor hook;
/// each position is filled once and taken once.
///
/// ```
/// use vc_marshal::Reflect;
/// use vc_marshal::ops::DynamicTuple;
///
/// let mut tuple = DynamicTuple::new(2);
/// tuple.set(0, String::from("Alice").into_boxed_reflect());
/// tuple.set(1, 3_u8.into_boxed_reflect());
///
/// assert_eq!(tuple.take::<String>(0).unwrap(), "Alice");
/// assert_eq!(tuple.take::<u8>(1).unwrap(), 3);
/// ```
pub struct DynamicTuple {
    fields: Box<[Option<Box<dyn Reflect>>]>,
}

impl DynamicTuple {
    /// Creates an empty tuple of the given arity.
    pub fn new(arity: usize) -> Self {
        Self {
            fields: (0..arity).map(|_| None).collect(),
        }
    }

    /// Creates a tuple holding `items` in order.
    pub fn from_items(items: Vec<Box<dyn Reflect>>) -> Self {
        Self {
            fields: items.into_iter().map(Some).collect(),
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Fills position `index`, returning `false` if it is out of bounds.
    pub fn set(&mut self, index: usize, value: Box<dyn Reflect>) -> bool {
        match self.fields.get_mut(index) {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.fields.get(index)?.as_deref()
    }

    /// Takes position `index` out and unboxes it as `T`.
    pub fn take<T: Reflect + TypePath>(&mut self, index: usize) -> Result<T, ConstructError> {
        let value = self
            .fields
            .get_mut(index)
            .and_then(Option::take)
            .ok_or_else(|| ConstructError::MissingField {
                field: Cow::Owned(format!("{index}")),
            })?;
        value.take::<T>().map_err(|value| ConstructError::TypeMismatch {
            field: Cow::Owned(format!("{index}")),
            expected: T::type_path(),
            found: value.reflect_type_path(),
        })
    }
}

impl core::fmt::Debug for DynamicTuple {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut tuple = f.debug_tuple("DynamicTuple");
        for field in &self.fields {
            tuple.field(field);
        }
        tuple.finish()
    }
}
