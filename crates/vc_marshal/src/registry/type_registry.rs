use alloc::string::String;
use core::any::TypeId;

use super::validate::Walk;
use super::{RegistrationError, TypeMeta};
use crate::hash::{HashMap, HashSet, TypeIdMap, new_map, new_set};
use crate::info::{TypeInfo, Typed};
use crate::value::Value;

// -----------------------------------------------------------------------------
// TypeRegistry

/// The table of described types consulted by the encoder and the decoder.
///
/// [Registering] a type validates its descriptor and every descriptor it
/// reaches, then stores a [`TypeMeta`] for each. The drivers refuse to
/// encode or decode a type that is not in the table.
///
/// # Example
///
/// ```
/// use vc_marshal::{derive::Reflect, registry::TypeRegistry};
///
/// #[derive(Reflect)]
/// struct Phone {
///     number: String,
///     labels: Vec<String>,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Phone>().unwrap();
///
/// // The type and its dependencies.
/// assert!(registry.contains(core::any::TypeId::of::<Phone>()));
/// assert!(registry.get_with_type_name("Vec<String>").is_some());
///
/// let meta = registry.get_with_type_name("Phone").unwrap();
/// assert_eq!(meta.type_info().as_struct().unwrap().field_len(), 2);
/// ```
///
/// [Registering]: TypeRegistry::register
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty [`TypeRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_meta_table: new_map(),
            type_path_to_id: new_map(),
            type_name_to_id: new_map(),
            ambiguous_names: new_set(),
        }
    }

    /// Creates a registry holding the primitive leaves.
    ///
    /// - `()` `bool` `char`
    /// - `i8 - i64` `isize`
    /// - `u8 - u64` `usize`
    /// - `f32` `f64`
    /// - `String` [`Value`]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.insert_leaf::<()>();
        registry.insert_leaf::<bool>();
        registry.insert_leaf::<char>();
        registry.insert_leaf::<u8>();
        registry.insert_leaf::<u16>();
        registry.insert_leaf::<u32>();
        registry.insert_leaf::<u64>();
        registry.insert_leaf::<usize>();
        registry.insert_leaf::<i8>();
        registry.insert_leaf::<i16>();
        registry.insert_leaf::<i32>();
        registry.insert_leaf::<i64>();
        registry.insert_leaf::<isize>();
        registry.insert_leaf::<f32>();
        registry.insert_leaf::<f64>();
        registry.insert_leaf::<String>();
        registry.insert_leaf::<Value>();
        registry
    }

    // Leaves have nothing to validate.
    #[inline]
    fn insert_leaf<T: Typed>(&mut self) {
        self.insert_type_meta(TypeMeta::of::<T>());
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(
        type_meta: &TypeMeta,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let ty = type_meta.ty();
        let type_name = ty.name();

        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, ty.id());
            }
        }

        type_path_to_id.insert(ty.path(), ty.id());
    }

    /// Inserts or **overwrites** a single [`TypeMeta`], without validation.
    ///
    /// Neither the descriptor nor its dependencies are checked, and the
    /// dependencies are not registered. Use [`register`](Self::register)
    /// for that.
    ///
    /// A misconfigured descriptor inserted this way keeps its documented
    /// fallback behaviour: for instance, a union with two variants sharing
    /// a tag decodes to the first declared one.
    pub fn insert_type_meta(&mut self, type_meta: TypeMeta) {
        if !self.type_meta_table.contains_key(&type_meta.type_id()) {
            Self::add_new_type_indices(
                &type_meta,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
        }
        self.type_meta_table.insert(type_meta.type_id(), type_meta);
    }

    /// Registers `T` and every type it reaches, if not registered yet.
    ///
    /// The walk is depth-first over field, variant, element and dispatch
    /// member types. Each newly reached descriptor is validated; if any of
    /// them is refused, or the walk comes back to a type it is inside of,
    /// nothing is inserted and the error is returned.
    ///
    /// Types already in the registry are neither checked again nor entered.
    ///
    /// # Example
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use vc_marshal::{derive::Reflect, registry::TypeRegistry};
    /// #[derive(Reflect)]
    /// struct Foo {
    ///     name: Option<String>,
    ///     value: i32,
    /// }
    ///
    /// let mut registry = TypeRegistry::default();
    /// registry.register::<Foo>().unwrap();
    ///
    /// assert!(registry.contains(TypeId::of::<Foo>()));
    /// assert!(registry.contains(TypeId::of::<Option<String>>()));
    /// assert!(registry.contains(TypeId::of::<i32>()));
    /// ```
    pub fn register<T: Typed>(&mut self) -> Result<(), RegistrationError> {
        self.register_info(T::type_info())
    }

    /// [`register`](Self::register) through a descriptor.
    pub fn register_info(&mut self, type_info: &'static TypeInfo) -> Result<(), RegistrationError> {
        let table = &self.type_meta_table;
        let accepted = Walk::new(|type_id| table.contains_key(&type_id)).run(type_info)?;

        for info in accepted {
            log::debug!("registered `{}` ({})", info.type_path(), info.kind());
            self.insert_type_meta(TypeMeta::from_info(info));
        }
        Ok(())
    }

    /// Automatically registers every type derived with
    /// `#[reflect(auto_register)]`.
    ///
    /// Equivalent to calling [`register`](Self::register) for each of them.
    /// Repeated calls are cheap and insert nothing new.
    ///
    /// ## Return Value
    ///
    /// - `Ok(true)`: automatic registration is supported on this platform.
    /// - `Ok(false)`: it is not, or the `auto_register` feature is off;
    ///   nothing was registered.
    /// - `Err(_)`: a collected type was refused. The types registered
    ///   before it stay registered.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use core::any::TypeId;
    /// # use vc_marshal::{derive::Reflect, registry::TypeRegistry};
    /// #[derive(Reflect)]
    /// #[reflect(auto_register)]
    /// struct Foo {
    ///     name: Option<String>,
    ///     value: i32,
    /// }
    ///
    /// let mut registry = TypeRegistry::empty();
    /// assert!(registry.auto_register().unwrap());
    ///
    /// assert!(registry.contains(TypeId::of::<Foo>()));
    /// assert!(registry.contains(TypeId::of::<Option<String>>()));
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> Result<bool, RegistrationError> {
        #[cfg(feature = "auto_register")]
        {
            crate::__macro_exports::auto_register::register_types(self)
        }

        #[cfg(not(feature = "auto_register"))]
        {
            Ok(false)
        }
    }

    /// Whether the type with the given [`TypeId`] is registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains_key(&type_id)
    }

    /// Returns the [`TypeMeta`] of the type with the given [`TypeId`].
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Returns the [`TypeMeta`] of the type with the given [type path].
    ///
    /// [type path]: crate::info::TypePath::type_path
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the [`TypeMeta`] of the type with the given [type name].
    ///
    /// Returns `None` if the name is ambiguous.
    ///
    /// [type name]: crate::info::TypePath::type_name
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeMeta> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns `true` if the given [type name] matches several registered
    /// types.
    ///
    /// ```
    /// # use vc_marshal::registry::TypeRegistry;
    /// # mod foo {
    /// #     use vc_marshal::derive::Reflect;
    /// #     #[derive(Reflect)]
    /// #     pub struct MyType;
    /// # }
    /// # mod bar {
    /// #     use vc_marshal::derive::Reflect;
    /// #     #[derive(Reflect)]
    /// #     pub struct MyType;
    /// # }
    /// let mut registry = TypeRegistry::default();
    /// registry.register::<foo::MyType>().unwrap();
    /// registry.register::<bar::MyType>().unwrap();
    /// assert!(registry.is_ambiguous("MyType"));
    /// ```
    ///
    /// [type name]: crate::info::TypePath::type_name
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Returns the [`TypeInfo`] of the type with the given [`TypeId`].
    pub fn get_type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.get(type_id).map(TypeMeta::type_info)
    }

    /// Returns an iterator over the registered [`TypeMeta`]s.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_meta_table.is_empty()
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.type_path_to_id.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

use alloc::sync::Arc;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A [`TypeRegistry`] shared between threads.
///
/// Descriptors are immutable once registered, so any number of readers
/// can encode and decode at the same time.
///
/// ```
/// # use vc_marshal::registry::TypeRegistryArc;
/// let shared = TypeRegistryArc::default();
/// shared.write().register::<Vec<u8>>().unwrap();
///
/// let reader = shared.clone();
/// assert!(reader.read().get_with_type_name("Vec<u8>").is_some());
/// ```
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    /// The wrapped [`TypeRegistry`].
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&*self.read(), f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use super::TypeRegistry;
    use crate::derive::Reflect;
    use crate::registry::{RegistrationError, TypeMeta};

    #[derive(Reflect)]
    struct Node {
        label: String,
        children: Vec<Node>,
    }

    #[derive(Reflect)]
    struct Leafy {
        a: u8,
        b: Option<u16>,
    }

    #[test]
    fn primitives_are_preregistered() {
        let registry = TypeRegistry::new();

        assert!(registry.contains(TypeId::of::<String>()));
        assert!(registry.get_with_type_path("alloc::string::String").is_some());
        assert!(registry.get_with_type_name("Value").is_some());
        assert!(TypeRegistry::empty().is_empty());
    }

    #[test]
    fn cycles_are_refused() {
        let mut registry = TypeRegistry::new();
        let before = registry.len();

        let err = registry.register::<Node>().unwrap_err();
        let RegistrationError::Cycle { path } = err else {
            panic!("expected a cycle, got {err:?}");
        };
        assert_eq!(path.first(), path.last());
        assert!(path.iter().any(|p| p.ends_with("Vec<vc_marshal::registry::type_registry::tests::Node>")));

        // Nothing was inserted, not even `Vec<Node>`.
        assert_eq!(registry.len(), before);
    }

    #[test]
    fn dependencies_are_registered_once() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Leafy>().unwrap();
        let len = registry.len();

        assert!(registry.contains(TypeId::of::<Option<u16>>()));
        assert!(registry.contains(TypeId::of::<u16>()));

        registry.register::<Leafy>().unwrap();
        assert_eq!(registry.len(), len);
    }

    #[test]
    fn ambiguous_names() {
        let mut registry = TypeRegistry::empty();
        registry.insert_type_meta(TypeMeta::of::<Leafy>());
        registry.insert_type_meta(TypeMeta::of::<Vec<u8>>());

        assert!(!registry.is_ambiguous("Leafy"));
        assert!(registry.get_with_type_name("Leafy").is_some());
        assert!(registry.get_type_info(TypeId::of::<Vec<u8>>()).is_some());
    }
}
