use alloc::boxed::Box;
use core::fmt;

use crate::Reflect;
use crate::info::{NamedField, Type, TypePath, impl_type_fn};
use crate::ops::{ConstructError, DynamicStruct};
use crate::policy::FieldPolicy;

/// Builds a record from its decoded fields.
pub type ConstructStructFn = fn(DynamicStruct) -> Result<Box<dyn Reflect>, ConstructError>;

/// A container for compile-time named struct info.
///
/// Fields keep their declaration order, which is also the order of the
/// encoded mapping.
///
/// # Examples
///
/// ```
/// use vc_marshal::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct A {
///     val: f32,
///     #[reflect(rename = "other")]
///     b: bool,
/// }
///
/// let info = <A as Typed>::type_info().as_struct().unwrap();
///
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.index_of("b"), Some(1));
/// assert_eq!(info.policy().output_key("b"), "other");
/// ```
#[derive(Clone)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    policy: FieldPolicy,
    construct: ConstructStructFn,
}

impl StructInfo {
    impl_type_fn!(ty);

    /// Create a new [`StructInfo`].
    ///
    /// The order of internal fields is fixed, depends on the input order.
    pub fn new<T: TypePath>(fields: &[NamedField], construct: ConstructStructFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            policy: FieldPolicy::new(),
            construct,
        }
    }

    /// Attaches the encode/decode policy of this record.
    #[inline]
    pub fn with_policy(mut self, policy: FieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn policy(&self) -> &FieldPolicy {
        &self.policy
    }

    /// Returns the [`NamedField`] for the given `name`, if present.
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the [`NamedField`] at the given index, if present.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    /// Returns the index for the given field `name`, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns an iterator over the fields in **declaration order**.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, NamedField> {
        self.fields.iter()
    }

    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.fields.iter().map(NamedField::name)
    }

    /// Runs the constructor hook.
    #[inline]
    pub fn construct(&self, fields: DynamicStruct) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.construct)(fields)
    }
}

impl fmt::Debug for StructInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructInfo")
            .field("ty", &self.ty)
            .field("fields", &self.fields)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
