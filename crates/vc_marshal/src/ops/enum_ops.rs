use alloc::borrow::Cow;
use alloc::format;

use crate::Reflect;
use crate::info::VariantKind;
use crate::ops::{ConstructError, DynamicStruct, DynamicTuple};

// -----------------------------------------------------------------------------
// Enum

/// A reflected tagged union, viewed through its active variant.
///
/// ```
/// use vc_marshal::{Reflect, derive::Reflect, info::VariantKind, ops::ReflectRef};
///
/// #[derive(Reflect)]
/// enum Name {
///     First(String),
///     Anonymous,
/// }
///
/// let name = Name::First("Alice".into());
/// let ReflectRef::Enum(view) = name.reflect_ref() else { unreachable!() };
///
/// assert_eq!(view.variant_name(), "First");
/// assert_eq!(view.variant_kind(), VariantKind::Tuple);
/// assert_eq!(view.field_at(0).unwrap().downcast_ref::<String>().unwrap(), "Alice");
/// ```
pub trait Enum: Reflect {
    /// Returns the declared name of the active variant.
    fn variant_name(&self) -> &str;

    /// Returns the declaration index of the active variant.
    fn variant_index(&self) -> usize;

    fn variant_kind(&self) -> VariantKind;

    /// Returns a named field of a struct variant.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns a field of the active variant by position.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_len(&self) -> usize;
}

// -----------------------------------------------------------------------------
// DynamicVariant

/// The decoded payload of a variant.
#[derive(Debug)]
pub enum VariantFields {
    Unit,
    Tuple(DynamicTuple),
    Struct(DynamicStruct),
}

impl VariantFields {
    pub const fn kind(&self) -> VariantKind {
        match self {
            Self::Unit => VariantKind::Unit,
            Self::Tuple(_) => VariantKind::Tuple,
            Self::Struct(_) => VariantKind::Struct,
        }
    }
}

/// A decoded variant: its declared name plus its payload.
///
/// Consumed by a [`ConstructEnumFn`](crate::info::ConstructEnumFn) hook,
/// which matches on [`name`](Self::name) and takes the payload apart.
#[derive(Debug)]
pub struct DynamicVariant {
    name: &'static str,
    fields: VariantFields,
}

impl DynamicVariant {
    #[inline]
    pub const fn unit(name: &'static str) -> Self {
        Self {
            name,
            fields: VariantFields::Unit,
        }
    }

    #[inline]
    pub const fn tuple(name: &'static str, fields: DynamicTuple) -> Self {
        Self {
            name,
            fields: VariantFields::Tuple(fields),
        }
    }

    #[inline]
    pub const fn structure(name: &'static str, fields: DynamicStruct) -> Self {
        Self {
            name,
            fields: VariantFields::Struct(fields),
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn kind(&self) -> VariantKind {
        self.fields.kind()
    }

    #[inline]
    pub fn into_fields(self) -> VariantFields {
        self.fields
    }

    /// Takes the positional payload, failing if the variant is not a tuple.
    pub fn into_tuple(self) -> Result<DynamicTuple, ConstructError> {
        match self.fields {
            VariantFields::Tuple(fields) => Ok(fields),
            _ => Err(self.kind_error()),
        }
    }

    /// Takes the named payload, failing if the variant is not a struct.
    pub fn into_struct(self) -> Result<DynamicStruct, ConstructError> {
        match self.fields {
            VariantFields::Struct(fields) => Ok(fields),
            _ => Err(self.kind_error()),
        }
    }

    /// The error a constructor hook returns for a name it does not know.
    #[inline]
    pub fn unknown(&self) -> ConstructError {
        ConstructError::UnknownVariant {
            variant: Cow::Borrowed(self.name),
        }
    }

    fn kind_error(&self) -> ConstructError {
        ConstructError::UnknownVariant {
            variant: Cow::Owned(format!("{} ({})", self.name, self.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::derive::Reflect;
    use crate::info::VariantKind;
    use crate::ops::ReflectRef;

    #[derive(Reflect)]
    struct Pair {
        left: u8,
        right: String,
    }

    #[derive(Reflect)]
    enum Shape {
        Empty,
        Line(u8, u16),
        Named { first: String, middle: Vec<String> },
    }

    #[test]
    fn derived_struct_fields() {
        let pair = Pair { left: 3, right: "r".into() };
        let ReflectRef::Struct(view) = pair.reflect_ref() else { unreachable!() };

        assert_eq!(view.field("left").unwrap().downcast_ref::<u8>(), Some(&3));
        assert_eq!(view.field_at(1).unwrap().downcast_ref::<String>().unwrap(), "r");
        assert!(view.field("middle").is_none());
        assert!(view.field_at(2).is_none());
    }

    #[test]
    fn derived_variant_fields() {
        let line = Shape::Line(1, 2);
        let ReflectRef::Enum(view) = line.reflect_ref() else { unreachable!() };
        assert_eq!(view.variant_index(), 1);
        assert_eq!(view.field_len(), 2);
        assert_eq!(view.field_at(1).unwrap().downcast_ref::<u16>(), Some(&2));
        assert!(view.field("0").is_none());

        let named = Shape::Named { first: "Jane".into(), middle: Vec::new() };
        let ReflectRef::Enum(view) = named.reflect_ref() else { unreachable!() };
        assert_eq!(view.variant_kind(), VariantKind::Struct);
        assert_eq!(view.field("first").unwrap().downcast_ref::<String>().unwrap(), "Jane");
        assert!(view.field_at(1).unwrap().downcast_ref::<Vec<String>>().unwrap().is_empty());
        assert!(view.field_at(2).is_none());

        let empty = Shape::Empty;
        let ReflectRef::Enum(view) = empty.reflect_ref() else { unreachable!() };
        assert_eq!(view.variant_name(), "Empty");
        assert!(view.field_at(0).is_none());
    }
}
