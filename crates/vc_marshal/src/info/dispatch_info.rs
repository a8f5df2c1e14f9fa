use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::ConstructError;

/// Wraps a decoded member into the dispatch type.
pub type WrapMemberFn = fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, ConstructError>;

// -----------------------------------------------------------------------------
// DispatchCandidate

/// One member type of a [`DispatchInfo`], selected when `key` is present.
#[derive(Clone, Copy)]
pub struct DispatchCandidate {
    name: &'static str,
    key: &'static str,
    ty_id: TypeId,
    type_info: fn() -> &'static TypeInfo,
    wrap: WrapMemberFn,
}

impl DispatchCandidate {
    /// Creates a candidate for member type `T`, labelled `name` and selected
    /// by `key`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str, key: &'static str, wrap: WrapMemberFn) -> Self {
        Self {
            name,
            key,
            ty_id: TypeId::of::<T>(),
            type_info: T::type_info,
            wrap,
        }
    }

    /// Returns the declared name of the variant holding this member.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the discriminant key.
    #[inline]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub fn wrap(&self, member: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.wrap)(member)
    }
}

impl fmt::Debug for DispatchCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchCandidate")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("type", &self.type_info().type_path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// DispatchInfo

/// A container for parse-dispatch info.
///
/// A dispatch type picks one of several disjoint member types from an
/// untyped mapping, using the presence of a key as the discriminant. The
/// first candidate (in declaration order) whose key is present wins and the
/// whole mapping is decoded as that member.
///
/// # Examples
///
/// ```
/// use vc_marshal::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct Circle { radius: f64 }
///
/// #[derive(Reflect)]
/// struct Rect { width: f64, height: f64 }
///
/// #[derive(Reflect)]
/// #[reflect(dispatch)]
/// enum Shape {
///     #[reflect(key = "radius")]
///     Circle(Circle),
///     #[reflect(key = "width")]
///     Rect(Rect),
/// }
///
/// let info = Shape::type_info().as_dispatch().unwrap();
/// assert_eq!(info.candidate_len(), 2);
/// assert_eq!(info.candidate_at(1).unwrap().key(), "width");
/// ```
#[derive(Clone)]
pub struct DispatchInfo {
    ty: Type,
    candidates: Box<[DispatchCandidate]>,
}

impl DispatchInfo {
    impl_type_fn!(ty);

    pub fn new<T: TypePath>(candidates: &[DispatchCandidate]) -> Self {
        Self {
            ty: Type::of::<T>(),
            candidates: candidates.into(),
        }
    }

    #[inline]
    pub fn candidate_at(&self, index: usize) -> Option<&DispatchCandidate> {
        self.candidates.get(index)
    }

    /// Returns the candidate holding the declared variant `name`.
    pub fn candidate(&self, name: &str) -> Option<&DispatchCandidate> {
        self.candidates.iter().find(|c| c.name() == name)
    }

    #[inline]
    pub fn candidate_len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, DispatchCandidate> {
        self.candidates.iter()
    }
}

impl fmt::Debug for DispatchInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchInfo")
            .field("ty", &self.ty)
            .field("candidates", &self.candidates)
            .finish()
    }
}
