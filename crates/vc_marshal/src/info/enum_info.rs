use alloc::boxed::Box;
use core::fmt;

use crate::Reflect;
use crate::info::{Type, TypePath, VariantInfo, impl_type_fn};
use crate::ops::{ConstructError, DynamicVariant};

/// Builds an enum value from a decoded variant.
pub type ConstructEnumFn = fn(DynamicVariant) -> Result<Box<dyn Reflect>, ConstructError>;

/// A container for compile-time enum info, the tagged union descriptor.
///
/// Variants keep their declaration order. Decoding tries them in that
/// order and the first whose tag and shape match wins.
///
/// # Examples
///
/// ```
/// use vc_marshal::{derive::Reflect, info::{Typed, VariantKind}};
///
/// #[derive(Reflect)]
/// enum Name {
///     First(String),
///     FirstLast { first: String, last: String },
///     #[reflect(rename = "None")]
///     Anonymous,
/// }
///
/// let info = Name::type_info().as_enum().unwrap();
///
/// assert_eq!(info.variant_len(), 3);
/// assert_eq!(info.variant_by_tag("None").unwrap().name(), "Anonymous");
/// assert_eq!(info.variant_at(1).unwrap().kind(), VariantKind::Struct);
/// ```
#[derive(Clone)]
pub struct EnumInfo {
    ty: Type,
    variants: Box<[VariantInfo]>,
    construct: ConstructEnumFn,
}

impl EnumInfo {
    impl_type_fn!(ty);

    /// Create a new [`EnumInfo`].
    ///
    /// The order of internal variants is fixed, depends on the input order.
    pub fn new<T: TypePath>(variants: &[VariantInfo], construct: ConstructEnumFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            variants: variants.into(),
            construct,
        }
    }

    /// Returns the variant with the given declared name.
    pub fn variant(&self, name: &str) -> Option<&VariantInfo> {
        self.variants.iter().find(|variant| variant.name() == name)
    }

    /// Returns the first declared variant with the given wire tag.
    pub fn variant_by_tag(&self, tag: &str) -> Option<&VariantInfo> {
        self.variants.iter().find(|variant| variant.tag() == tag)
    }

    #[inline]
    pub fn variant_at(&self, index: usize) -> Option<&VariantInfo> {
        self.variants.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|variant| variant.name() == name)
    }

    #[inline]
    pub fn variant_len(&self) -> usize {
        self.variants.len()
    }

    /// Returns an iterator over the variants in **declaration order**.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, VariantInfo> {
        self.variants.iter()
    }

    /// Runs the constructor hook.
    #[inline]
    pub fn construct(&self, variant: DynamicVariant) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.construct)(variant)
    }
}

impl fmt::Debug for EnumInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumInfo")
            .field("ty", &self.ty)
            .field("variants", &self.variants)
            .finish_non_exhaustive()
    }
}
