use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::Reflect;
use crate::info::{TypeInfo, Typed};
use crate::marshal::{DecodeErrorKind, EncodeErrorKind};
use crate::value::Value;

/// Produces the declared default of a field that is absent from the input.
pub type DefaultFn = fn() -> Box<dyn Reflect>;

/// Replaces the default encoding of a single field.
pub type EncodeWithFn = fn(&dyn Reflect) -> Result<Value, EncodeErrorKind>;

/// Replaces the default decoding of a single field.
pub type DecodeWithFn = fn(&Value) -> Result<Box<dyn Reflect>, DecodeErrorKind>;

// -----------------------------------------------------------------------------
// NamedField

/// Information for a named (struct) field.
///
/// Besides the name and type, a field may carry a default (used when the
/// field is absent from the input or skipped on decode) and custom
/// conversion hooks that replace the default recursion for that field.
///
/// # Examples
///
/// ```
/// use vc_marshal::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct Foo {
///     #[reflect(default)]
///     field_a: f32,
/// }
///
/// let info = Foo::type_info().as_struct().unwrap();
/// let field_info = info.field_at(0).unwrap();
///
/// assert!(field_info.type_is::<f32>());
/// assert_eq!(field_info.name(), "field_a");
/// assert!(field_info.has_default());
/// ```
#[derive(Clone, Copy)]
pub struct NamedField {
    ty_id: TypeId,
    name: &'static str,
    // Resolved on first access so descriptors can refer to each other.
    type_info: fn() -> &'static TypeInfo,
    default: Option<DefaultFn>,
    encode_with: Option<EncodeWithFn>,
    decode_with: Option<DecodeWithFn>,
}

impl NamedField {
    /// Creates a new [`NamedField`] for the given field `name` and type `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            name,
            type_info: T::type_info,
            default: None,
            encode_with: None,
            decode_with: None,
        }
    }

    /// Sets the default used when the field is absent from the input.
    #[inline]
    pub const fn with_default(mut self, default: DefaultFn) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets a custom encoder for this field.
    #[inline]
    pub const fn with_encode_with(mut self, encode: EncodeWithFn) -> Self {
        self.encode_with = Some(encode);
        self
    }

    /// Sets a custom decoder for this field.
    #[inline]
    pub const fn with_decode_with(mut self, decode: DecodeWithFn) -> Self {
        self.decode_with = Some(decode);
        self
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Builds the declared default value, if the field has one.
    #[inline]
    pub fn default_value(&self) -> Option<Box<dyn Reflect>> {
        self.default.map(|default| default())
    }

    #[inline]
    pub const fn encode_with(&self) -> Option<EncodeWithFn> {
        self.encode_with
    }

    #[inline]
    pub const fn decode_with(&self) -> Option<DecodeWithFn> {
        self.decode_with
    }
}

impl fmt::Debug for NamedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedField")
            .field("name", &self.name)
            .field("type", &self.type_info().type_path())
            .field("default", &self.default.is_some())
            .field("encode_with", &self.encode_with.is_some())
            .field("decode_with", &self.decode_with.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// UnnamedField

/// Information for a positional field: a tuple element or a tuple variant
/// field.
#[derive(Clone, Copy)]
pub struct UnnamedField {
    ty_id: TypeId,
    index: usize,
    type_info: fn() -> &'static TypeInfo,
}

impl UnnamedField {
    /// Creates a new [`UnnamedField`] for the field at `index` with type `T`.
    #[inline]
    pub const fn new<T: Typed>(index: usize) -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            index,
            type_info: T::type_info,
        }
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the position of the field.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}

impl fmt::Debug for UnnamedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnnamedField")
            .field("index", &self.index)
            .field("type", &self.type_info().type_path())
            .finish()
    }
}
