use core::any::TypeId;
use core::fmt;

use crate::info::{DispatchInfo, EnumInfo, ListInfo, MapInfo};
use crate::info::{OpaqueInfo, OptionInfo, StructInfo, TupleInfo, Type};

// -----------------------------------------------------------------------------
// TypeKind

/// An enumeration of the "kinds" of a described type.
///
/// A [`TypeKind`] is obtained via [`TypeInfo::kind`] or [`ReflectRef::kind`].
///
/// [`ReflectRef::kind`]: crate::ops::ReflectRef::kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Struct,
    Enum,
    List,
    Tuple,
    Map,
    Option,
    Dispatch,
    Opaque,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::Enum => f.pad("Enum"),
            Self::List => f.pad("List"),
            Self::Tuple => f.pad("Tuple"),
            Self::Map => f.pad("Map"),
            Self::Option => f.pad("Option"),
            Self::Dispatch => f.pad("Dispatch"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// Error returned when a `TypeInfo` value is not the expected `TypeKind`.
#[derive(Debug, thiserror::Error)]
#[error("type kind mismatch: expected {expected}, received {received}")]
pub struct TypeKindError {
    pub expected: TypeKind,
    pub received: TypeKind,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time type information, the static descriptor of a type.
///
/// For any given type, it can be retrieved in one of three ways:
///
/// 1. [`Typed::type_info`], if the type is known at compile time.
/// 2. [`DynamicTyped::reflect_type_info`], from a `dyn Reflect`.
/// 3. [`TypeRegistry::get_type_info`], from a [`TypeId`] or type path.
///
/// The encoder and decoder both walk these descriptors; the decoder only
/// needs the target's `TypeInfo` to rebuild a value from a tree.
///
/// [`Typed::type_info`]: crate::info::Typed::type_info
/// [`DynamicTyped::reflect_type_info`]: crate::info::DynamicTyped::reflect_type_info
/// [`TypeRegistry::get_type_info`]: crate::registry::TypeRegistry::get_type_info
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Struct(StructInfo),
    Enum(EnumInfo),
    List(ListInfo),
    Tuple(TupleInfo),
    Map(MapInfo),
    Option(OptionInfo),
    Dispatch(DispatchInfo),
    Opaque(OpaqueInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Convert [`TypeInfo`] to the kind-specific descriptor.
        pub const fn $name(&self) -> Result<&$info, TypeKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(TypeKindError {
                    expected: TypeKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_enum: Enum => EnumInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_tuple: Tuple => TupleInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_option: Option => OptionInfo);
    impl_cast_method!(as_dispatch: Dispatch => DispatchInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    /// Returns the underlying [`Type`] metadata for this `TypeInfo`.
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::Enum(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Tuple(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Option(info) => info.ty(),
            Self::Dispatch(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    /// Check if the described type is `T`.
    #[inline]
    pub fn type_is<T: 'static>(&self) -> bool {
        self.type_id() == TypeId::of::<T>()
    }

    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Struct(_) => TypeKind::Struct,
            Self::Enum(_) => TypeKind::Enum,
            Self::List(_) => TypeKind::List,
            Self::Tuple(_) => TypeKind::Tuple,
            Self::Map(_) => TypeKind::Map,
            Self::Option(_) => TypeKind::Option,
            Self::Dispatch(_) => TypeKind::Dispatch,
            Self::Opaque(_) => TypeKind::Opaque,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use crate::info::{TypeKind, Typed};

    #[test]
    fn kinds_of_builtin_types() {
        assert_eq!(<u8 as Typed>::type_info().kind(), TypeKind::Opaque);
        assert_eq!(<Vec<u8> as Typed>::type_info().kind(), TypeKind::List);
        assert_eq!(<(u8, String) as Typed>::type_info().kind(), TypeKind::Tuple);
        assert_eq!(<Option<u8> as Typed>::type_info().kind(), TypeKind::Option);
    }

    #[test]
    fn cast_error_names_both_kinds() {
        let err = <u8 as Typed>::type_info().as_struct().unwrap_err();
        assert_eq!(err.expected, TypeKind::Struct);
        assert_eq!(err.received, TypeKind::Opaque);
        assert_eq!(
            err.to_string(),
            "type kind mismatch: expected Struct, received Opaque"
        );
    }
}
