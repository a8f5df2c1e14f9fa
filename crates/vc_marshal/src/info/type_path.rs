use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to stable type paths and names.
///
/// A stable alternative to [`core::any::type_name`]: the registry indexes
/// types by these strings and [`ReflectEncodeDriver`] writes them into the
/// tree, so they must not change between builds.
///
/// - [`type_path`](TypePath::type_path): full path, unique among registered types.
/// - [`type_name`](TypePath::type_name): path without module prefix, may collide.
/// - [`type_ident`](TypePath::type_ident): the name without generics.
/// - [`module_path`](TypePath::module_path): optional module prefix.
///
/// Usually implemented by [`derive::Reflect`] or [`impl_type_path!`].
///
/// ```
/// use vc_marshal::info::TypePath;
///
/// struct Foo;
///
/// impl TypePath for Foo {
///     fn type_path() -> &'static str { "my_crate::foo::Foo" }
///     fn type_name() -> &'static str { "Foo" }
///     fn type_ident() -> &'static str { "Foo" }
///     fn module_path() -> Option<&'static str> { Some("my_crate::foo") }
/// }
///
/// assert_eq!(Foo::type_path(), "my_crate::foo::Foo");
/// ```
///
/// [`ReflectEncodeDriver`]: crate::marshal::ReflectEncodeDriver
/// [`derive::Reflect`]: crate::derive::Reflect
/// [`impl_type_path!`]: crate::derive::impl_type_path
pub trait TypePath: 'static {
    /// Returns the fully qualified path of the type.
    fn type_path() -> &'static str;

    /// Returns the type path without module prefixes.
    fn type_name() -> &'static str;

    /// Returns the type name without generics.
    fn type_ident() -> &'static str;

    /// Returns the module path, if any.
    #[inline]
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// DynamicTypePath

/// Dynamic dispatch for [`TypePath`], auto-implemented.
pub trait DynamicTypePath {
    fn reflect_type_path(&self) -> &'static str;
    fn reflect_type_name(&self) -> &'static str;
    fn reflect_type_ident(&self) -> &'static str;
    fn reflect_module_path(&self) -> Option<&'static str>;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        Self::type_name()
    }

    #[inline]
    fn reflect_type_ident(&self) -> &'static str {
        Self::type_ident()
    }

    #[inline]
    fn reflect_module_path(&self) -> Option<&'static str> {
        Self::module_path()
    }
}

// -----------------------------------------------------------------------------
// Type

/// The identity of a described type: its [`TypeId`] plus its [`TypePath`]
/// functions.
///
/// The path functions are stored as pointers and only evaluated on demand,
/// since generic paths are built lazily.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    type_path: fn() -> &'static str,
    type_name: fn() -> &'static str,
    type_ident: fn() -> &'static str,
    module_path: fn() -> Option<&'static str>,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    #[inline]
    pub fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_path: T::type_path,
            type_name: T::type_name,
            type_ident: T::type_ident,
            module_path: T::module_path,
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn path(&self) -> &'static str {
        (self.type_path)()
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        (self.type_name)()
    }

    #[inline]
    pub fn ident(&self) -> &'static str {
        (self.type_ident)()
    }

    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        (self.module_path)()
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Implements the [`Type`] accessors for an info struct holding a `ty` field.
macro_rules! impl_type_fn {
    ($field:ident) => {
        /// Returns the [`Type`](crate::info::Type) of the described type.
        #[inline]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.$field
        }

        #[inline]
        pub const fn type_id(&self) -> ::core::any::TypeId {
            self.$field.id()
        }

        #[inline]
        pub fn type_path(&self) -> &'static str {
            self.$field.path()
        }

        #[inline]
        pub fn type_name(&self) -> &'static str {
            self.$field.name()
        }

        /// Check if the described type is `T`.
        #[inline]
        pub fn type_is<T: ::core::any::Any>(&self) -> bool {
            self.$field.is::<T>()
        }
    };
}

pub(crate) use impl_type_fn;

#[cfg(test)]
mod tests {
    use super::{Type, TypePath};

    #[test]
    fn primitive_paths() {
        assert_eq!(<u32 as TypePath>::type_path(), "u32");
        assert_eq!(<alloc::string::String as TypePath>::type_path(), "alloc::string::String");
        assert_eq!(<alloc::string::String as TypePath>::type_name(), "String");
        assert_eq!(
            <alloc::vec::Vec<u8> as TypePath>::type_path(),
            "alloc::vec::Vec<u8>"
        );
        assert_eq!(<(u8, bool) as TypePath>::type_path(), "(u8, bool)");
        assert_eq!(<(u8,) as TypePath>::type_path(), "(u8,)");
    }

    mod foreign {
        crate::derive::impl_type_path!(::core::time::Duration);
        crate::derive::impl_type_path!((in units as Span) ::core::ops::Range<T>);
    }

    #[test]
    fn foreign_paths() {
        use core::ops::Range;
        use core::time::Duration;

        assert_eq!(Duration::type_path(), "core::time::Duration");
        assert_eq!(Duration::type_name(), "Duration");
        assert_eq!(Duration::module_path(), Some("core::time"));

        assert_eq!(<Range<u8>>::type_path(), "units::Span<u8>");
        assert_eq!(<Range<u8>>::type_name(), "Span<u8>");
        assert_eq!(<Range<u8>>::type_ident(), "Span");
    }

    #[test]
    fn derived_paths() {
        use crate::derive::Reflect;

        #[derive(Reflect)]
        #[reflect(type_path = "demo::shapes::Square")]
        struct Square {
            side: f32,
        }

        #[derive(Reflect)]
        struct Wrapper<T> {
            inner: T,
        }

        assert_eq!(Square::type_path(), "demo::shapes::Square");
        assert_eq!(Square::module_path(), Some("demo::shapes"));
        assert_eq!(<Wrapper<u8>>::type_name(), "Wrapper<u8>");
        assert!(<Wrapper<u8>>::type_path().ends_with("::Wrapper<u8>"));
        assert_eq!(<Wrapper<Square>>::type_name(), "Wrapper<Square>");
    }

    #[test]
    fn type_identity() {
        let ty = Type::of::<u32>();
        assert!(ty.is::<u32>());
        assert!(!ty.is::<i32>());
        assert_eq!(ty, Type::of::<u32>());
        assert_eq!(ty.ident(), "u32");
    }
}
