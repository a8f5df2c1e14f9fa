use core::any::TypeId;

use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// TypeMeta

/// Runtime storage for the descriptor of one registered type.
///
/// Usually created by [`TypeRegistry::register`], which validates the
/// descriptor first. [`TypeMeta::of`] builds one without any check.
///
/// ```
/// # use vc_marshal::registry::TypeMeta;
/// let meta = TypeMeta::of::<String>();
///
/// assert_eq!(meta.type_path(), "alloc::string::String");
/// assert_eq!(meta.type_name(), "String");
/// ```
///
/// [`TypeRegistry::register`]: crate::registry::TypeRegistry::register
#[derive(Clone, Copy)]
pub struct TypeMeta {
    // Cached, `TypeInfo::ty` has to match on the kind first.
    ty: &'static Type,
    type_info: &'static TypeInfo,
}

impl TypeMeta {
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self::from_info(T::type_info())
    }

    #[inline]
    pub const fn from_info(type_info: &'static TypeInfo) -> Self {
        Self {
            ty: type_info.ty(),
            type_info,
        }
    }

    #[inline(always)]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    #[inline(always)]
    pub const fn ty(&self) -> &'static Type {
        self.ty
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty.name()
    }
}

impl core::fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_path", &self.type_path())
            .field("kind", &self.type_info.kind())
            .finish()
    }
}
