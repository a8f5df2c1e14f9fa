//! Kind-specific views of reflected values, and the dynamic carriers used
//! to construct them.
//!
//! ## Menu
//!
//! ### Interface
//!
//! Subtraits of [`Reflect`], reached through [`Reflect::reflect_ref`]:
//!
//! - [`Struct`]: named fields, e.g. `A { .. }`.
//! - [`Enum`]: the active variant of a tagged union.
//! - [`List`]: sequences, e.g. `Vec<T>`.
//! - [`Tuple`]: fixed tuples and arrays, e.g. `(i32, f32)` or `[u8; 4]`.
//! - [`Map`]: key-value containers, e.g. `BTreeMap<K, V>`.
//! - [`Dispatch`]: the active member of a parse-dispatch type.
//! - [`Opaque`]: leaves that convert themselves to a [`Value`].
//!
//! ### Dynamic carriers
//!
//! The decoder collects decoded parts in these and hands them to the
//! constructor hooks of the descriptors.
//!
//! - [`DynamicStruct`]: decoded fields by name.
//! - [`DynamicTuple`]: a fixed-size array of positional values.
//! - [`DynamicVariant`]: a variant name plus its unit, tuple or struct payload.
//!
//! [`Reflect`]: crate::Reflect
//! [`Reflect::reflect_ref`]: crate::Reflect::reflect_ref
//! [`Value`]: crate::value::Value

// -----------------------------------------------------------------------------
// Modules

mod construct_error;
mod dispatch_ops;
mod enum_ops;
mod list_ops;
mod map_ops;
mod opaque_ops;
mod struct_ops;
mod tuple_ops;

// -----------------------------------------------------------------------------
// Exports

pub use construct_error::ConstructError;
pub use dispatch_ops::Dispatch;
pub use enum_ops::{DynamicVariant, Enum, VariantFields};
pub use list_ops::{List, ListItemIter};
pub use map_ops::{Map, MapIter};
pub use opaque_ops::Opaque;
pub use struct_ops::{DynamicStruct, Struct};
pub use tuple_ops::{DynamicTuple, Tuple, TupleFieldIter};

use crate::Reflect;
use crate::info::TypeKind;

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable, kind-specific view of a reflected value.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    Enum(&'a dyn Enum),
    List(&'a dyn List),
    Tuple(&'a dyn Tuple),
    Map(&'a dyn Map),
    /// `None`, or the wrapped value.
    Option(Option<&'a dyn Reflect>),
    Dispatch(&'a dyn Dispatch),
    Opaque(&'a dyn Opaque),
}

impl ReflectRef<'_> {
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
