//! Static type descriptors.
//!
//! ## Menu
//!
//! - [`TypePath`] / [`DynamicTypePath`]: stable type names.
//! - [`Typed`] / [`DynamicTyped`]: access to a type's [`TypeInfo`].
//! - [`TypeInfo`]: the descriptor itself, one variant per [`TypeKind`]:
//!     - [`StructInfo`]: named fields, a [`FieldPolicy`] and a constructor.
//!     - [`EnumInfo`]: tagged variants ([`VariantInfo`]) and a constructor.
//!     - [`ListInfo`], [`TupleInfo`], [`MapInfo`], [`OptionInfo`]: containers.
//!     - [`DispatchInfo`]: key-presence parse dispatch.
//!     - [`OpaqueInfo`]: primitive leaves.
//!
//! Descriptors are built once, on first access, and never mutated after.
//! Field and element types are referenced through `fn() -> &'static TypeInfo`
//! pointers, so building a descriptor never forces its dependencies and
//! recursive type graphs can be walked (and rejected) by the registry.
//!
//! [`FieldPolicy`]: crate::policy::FieldPolicy

// -----------------------------------------------------------------------------
// Modules

mod dispatch_info;
mod enum_info;
mod field_info;
mod list_info;
mod map_info;
mod opaque_info;
mod option_info;
mod struct_info;
mod tuple_info;
mod type_info;
mod type_path;
mod typed;
mod variant_info;

// -----------------------------------------------------------------------------
// Exports

pub use dispatch_info::{DispatchCandidate, DispatchInfo, WrapMemberFn};
pub use enum_info::{ConstructEnumFn, EnumInfo};
pub use field_info::{DecodeWithFn, DefaultFn, EncodeWithFn, NamedField, UnnamedField};
pub use list_info::{FromItemsFn, ListInfo};
pub use map_info::{FromEntriesFn, MapInfo};
pub use opaque_info::{FromValueFn, OpaqueInfo};
pub use option_info::{FromOptionFn, OptionInfo};
pub use struct_info::{ConstructStructFn, StructInfo};
pub use tuple_info::TupleInfo;
pub use type_info::{TypeInfo, TypeKind, TypeKindError};
pub use type_path::{DynamicTypePath, Type, TypePath};
pub use typed::{DynamicTyped, Typed};
pub use variant_info::{StructVariantInfo, TupleVariantInfo, UnitVariantInfo};
pub use variant_info::{VariantInfo, VariantKind, VariantKindError};

pub(crate) use type_path::impl_type_fn;
