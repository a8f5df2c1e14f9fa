use alloc::boxed::Box;
use core::fmt;

use crate::info::{NamedField, UnnamedField};
use crate::policy::FieldPolicy;

// -----------------------------------------------------------------------------
// VariantKind

/// Represents the kind/form of an enum variant.
///
/// # Kinds
///
/// - `A` -> Unit, encoded as the tag string.
/// - `A(..)` -> Tuple, encoded as `{tag: (values..)}`.
/// - `A{..}` -> Struct, encoded as `{tag: {name: value, ..}}`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Struct,
    Tuple,
    Unit,
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::Tuple => f.pad("Tuple"),
            Self::Unit => f.pad("Unit"),
        }
    }
}

/// A [`VariantKind`]-specific error.
#[derive(Debug, thiserror::Error)]
#[error("variant kind mismatch: expected {expected}, received {received}")]
pub struct VariantKindError {
    pub expected: VariantKind,
    pub received: VariantKind,
}

// -----------------------------------------------------------------------------
// Struct-like variant

/// Information for struct style enum variants.
///
/// Struct variants carry their own [`FieldPolicy`], applied to the inner
/// mapping before it is wrapped under the tag.
///
/// # Examples
///
/// ```
/// # use vc_marshal::{derive::Reflect, info::Typed};
/// #[derive(Reflect)]
/// enum Name {
///     FirstMiddleLast {
///         first: String,
///         #[reflect(skip_if = "vc_marshal::policy::is_empty", default)]
///         middle: Vec<String>,
///         last: String,
///     },
/// }
///
/// let info = Name::type_info()
///     .as_enum().unwrap()
///     .variant("FirstMiddleLast").unwrap()
///     .as_struct_variant().unwrap();
///
/// assert_eq!(info.field_len(), 3);
/// assert!(info.policy().encode_predicate("middle").is_some());
/// ```
#[derive(Clone, Debug)]
pub struct StructVariantInfo {
    name: &'static str,
    tag: &'static str,
    fields: Box<[NamedField]>,
    policy: FieldPolicy,
}

impl StructVariantInfo {
    /// Create a new [`StructVariantInfo`] whose tag is its name.
    pub fn new(name: &'static str, fields: &[NamedField]) -> Self {
        Self {
            name,
            tag: name,
            fields: fields.into(),
            policy: FieldPolicy::new(),
        }
    }

    #[inline]
    pub fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    #[inline]
    pub fn with_policy(mut self, policy: FieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the declared name of this variant.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the wire tag of this variant.
    #[inline]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    #[inline]
    pub fn policy(&self) -> &FieldPolicy {
        &self.policy
    }

    /// Returns the [`NamedField`] for the given `name`, if present.
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, NamedField> {
        self.fields.iter()
    }
}

// -----------------------------------------------------------------------------
// Tuple-like variant

/// Information for tuple style enum variants.
///
/// # Examples
///
/// ```
/// # use vc_marshal::{derive::Reflect, info::Typed};
/// #[derive(Reflect)]
/// enum Name {
///     #[reflect(rename = "F")]
///     First(String),
/// }
///
/// let info = Name::type_info()
///     .as_enum().unwrap()
///     .variant("First").unwrap()
///     .as_tuple_variant().unwrap();
///
/// assert_eq!(info.tag(), "F");
/// assert_eq!(info.field_len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct TupleVariantInfo {
    name: &'static str,
    tag: &'static str,
    fields: Box<[UnnamedField]>,
}

impl TupleVariantInfo {
    pub fn new(name: &'static str, fields: &[UnnamedField]) -> Self {
        Self {
            name,
            tag: name,
            fields: fields.into(),
        }
    }

    #[inline]
    pub fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&UnnamedField> {
        self.fields.get(index)
    }

    /// Returns the arity of the variant.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, UnnamedField> {
        self.fields.iter()
    }
}

// -----------------------------------------------------------------------------
// Unit variant

/// Information for unit enum variants.
#[derive(Clone, Debug)]
pub struct UnitVariantInfo {
    name: &'static str,
    tag: &'static str,
}

impl UnitVariantInfo {
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self { name, tag: name }
    }

    #[inline]
    pub const fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }
}

// -----------------------------------------------------------------------------
// VariantInfo

/// A container for compile-time enum variant info.
#[derive(Clone, Debug)]
pub enum VariantInfo {
    Struct(StructVariantInfo),
    Tuple(TupleVariantInfo),
    Unit(UnitVariantInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Convert to the kind-specific variant information.
        #[inline]
        pub const fn $name(&self) -> Result<&$info, VariantKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(VariantKindError {
                    expected: VariantKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl VariantInfo {
    impl_cast_method!(as_struct_variant: Struct => StructVariantInfo);
    impl_cast_method!(as_tuple_variant: Tuple => TupleVariantInfo);
    impl_cast_method!(as_unit_variant: Unit => UnitVariantInfo);

    /// Returns the declared name of the variant.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Struct(info) => info.name(),
            Self::Tuple(info) => info.name(),
            Self::Unit(info) => info.name(),
        }
    }

    /// Returns the wire tag of the variant.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Struct(info) => info.tag(),
            Self::Tuple(info) => info.tag(),
            Self::Unit(info) => info.tag(),
        }
    }

    pub const fn kind(&self) -> VariantKind {
        match self {
            Self::Struct(_) => VariantKind::Struct,
            Self::Tuple(_) => VariantKind::Tuple,
            Self::Unit(_) => VariantKind::Unit,
        }
    }
}
