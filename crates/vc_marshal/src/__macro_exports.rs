//! Items used by the code `#[derive(Reflect)]` generates. Not public API.

pub mod macro_utils {
    pub use ::alloc::borrow::{Cow, ToOwned};
    pub use ::alloc::boxed::Box;
    pub use ::alloc::string::{String, ToString};
    pub use ::core::option::Option;
    pub use ::core::result::Result;

    pub use crate::impls::concat as __concat;

    use crate::Reflect;
    use crate::info::TypePath;
    use crate::ops::ConstructError;

    /// Takes a decoded dispatch member as `M` and wraps it with `wrap`.
    pub fn __wrap_member<M: Reflect + TypePath, D: Reflect>(
        member: Box<dyn Reflect>,
        variant: &'static str,
        wrap: impl FnOnce(M) -> D,
    ) -> Result<Box<dyn Reflect>, ConstructError> {
        let member = member
            .take::<M>()
            .map_err(|member| ConstructError::TypeMismatch {
                field: Cow::Borrowed(variant),
                expected: M::type_path(),
                found: member.reflect_type_path(),
            })?;
        Ok(Box::new(wrap(member)))
    }
}

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::info::Typed;
    use crate::registry::{RegistrationError, TypeRegistry};

    /// One `#[reflect(auto_register)]` type, submitted by the derive.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry) -> Result<(), RegistrationError>);

    inventory::collect!(__AutoRegisterFunc);

    #[inline]
    pub fn __register<T: Typed>(registry: &mut TypeRegistry) -> Result<(), RegistrationError> {
        registry.register::<T>()
    }

    // Set by an entry this crate submits itself: still unset after
    // iterating means the platform collects nothing.
    static AVAILABLE: core::sync::atomic::AtomicBool = core::sync::atomic::AtomicBool::new(false);

    fn mark_available(_: &mut TypeRegistry) -> Result<(), RegistrationError> {
        AVAILABLE.store(true, core::sync::atomic::Ordering::Relaxed);
        Ok(())
    }

    inventory::submit! {
        __AutoRegisterFunc(mark_available)
    }

    pub(crate) fn register_types(registry: &mut TypeRegistry) -> Result<bool, RegistrationError> {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry)?;
        }
        Ok(AVAILABLE.load(core::sync::atomic::Ordering::Relaxed))
    }

    #[cfg(test)]
    mod tests {
        use core::any::TypeId;

        use crate::derive::Reflect;
        use crate::registry::TypeRegistry;

        #[derive(Reflect)]
        #[reflect(auto_register)]
        struct Collected {
            id: u32,
            tags: alloc::vec::Vec<alloc::string::String>,
        }

        #[test]
        fn collects_derived_types() {
            let mut registry = TypeRegistry::empty();
            if !registry.auto_register().unwrap() {
                return;
            }

            assert!(registry.contains(TypeId::of::<Collected>()));
            assert!(registry.contains(TypeId::of::<u32>()));
            assert!(registry.get_with_type_name("Vec<String>").is_some());
        }
    }
}
