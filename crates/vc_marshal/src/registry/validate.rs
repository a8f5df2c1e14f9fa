//! Descriptor checks and the dependency walk of [`TypeRegistry::register`].
//!
//! [`TypeRegistry::register`]: crate::registry::TypeRegistry::register

use alloc::borrow::Cow;
use alloc::format;
use alloc::vec::Vec;
use core::any::TypeId;

use super::RegistrationError;
use crate::hash::{HashSet, new_set};
use crate::info::{NamedField, TypeInfo, VariantInfo};
use crate::policy::FieldPolicy;

// -----------------------------------------------------------------------------
// Walk

/// Depth-first walk over the descriptors reachable from a root.
///
/// Types accepted by `is_registered` are neither checked nor entered.
pub(super) struct Walk<F: Fn(TypeId) -> bool> {
    is_registered: F,
    stack: Vec<&'static TypeInfo>,
    seen: HashSet<TypeId>,
    accepted: Vec<&'static TypeInfo>,
}

impl<F: Fn(TypeId) -> bool> Walk<F> {
    pub(super) const fn new(is_registered: F) -> Self {
        Self {
            is_registered,
            stack: Vec::new(),
            seen: new_set(),
            accepted: Vec::new(),
        }
    }

    /// Checks `root` and every unregistered type it reaches.
    ///
    /// Returns the new descriptors, dependencies before dependents.
    pub(super) fn run(
        mut self,
        root: &'static TypeInfo,
    ) -> Result<Vec<&'static TypeInfo>, RegistrationError> {
        self.visit(root)?;
        Ok(self.accepted)
    }

    fn visit(&mut self, info: &'static TypeInfo) -> Result<(), RegistrationError> {
        let type_id = info.type_id();

        if let Some(start) = self.stack.iter().position(|entry| entry.type_id() == type_id) {
            let mut path: Vec<_> = self.stack[start..].iter().map(|entry| entry.type_path()).collect();
            path.push(info.type_path());
            return Err(RegistrationError::Cycle { path });
        }

        if self.seen.contains(&type_id) || (self.is_registered)(type_id) {
            return Ok(());
        }

        validate(info)?;

        self.stack.push(info);
        for dependency in dependencies(info) {
            self.visit(dependency)?;
        }
        self.stack.pop();

        self.seen.insert(type_id);
        self.accepted.push(info);
        Ok(())
    }
}

/// The descriptors a type's values are built from.
fn dependencies(info: &'static TypeInfo) -> Vec<&'static TypeInfo> {
    match info {
        TypeInfo::Struct(info) => info.iter().map(NamedField::type_info).collect(),
        TypeInfo::Enum(info) => {
            let mut dependencies = Vec::new();
            for variant in info.iter() {
                match variant {
                    VariantInfo::Struct(variant) => {
                        dependencies.extend(variant.iter().map(NamedField::type_info));
                    }
                    VariantInfo::Tuple(variant) => {
                        dependencies.extend(variant.iter().map(|field| field.type_info()));
                    }
                    VariantInfo::Unit(_) => {}
                }
            }
            dependencies
        }
        TypeInfo::List(info) => Vec::from([info.item_info()]),
        TypeInfo::Tuple(info) => info.iter().map(|field| field.type_info()).collect(),
        TypeInfo::Map(info) => Vec::from([info.key_info(), info.value_info()]),
        TypeInfo::Option(info) => Vec::from([info.some_info()]),
        TypeInfo::Dispatch(info) => info.iter().map(|candidate| candidate.type_info()).collect(),
        TypeInfo::Opaque(_) => Vec::new(),
    }
}

// -----------------------------------------------------------------------------
// Checks

/// Checks one descriptor on its own, without its dependencies.
pub(super) fn validate(info: &'static TypeInfo) -> Result<(), RegistrationError> {
    match info {
        TypeInfo::Struct(info) => check_fields(
            Cow::Borrowed(info.type_path()),
            info.iter().as_slice(),
            info.policy(),
        ),
        TypeInfo::Enum(info) => {
            let mut tags = new_set();
            for variant in info.iter() {
                if !tags.insert(variant.tag()) {
                    return Err(RegistrationError::DuplicateTag {
                        type_path: Cow::Borrowed(info.type_path()),
                        tag: variant.tag(),
                    });
                }
                if let VariantInfo::Struct(variant) = variant {
                    check_fields(
                        Cow::Owned(format!("{}::{}", info.type_path(), variant.name())),
                        variant.iter().as_slice(),
                        variant.policy(),
                    )?;
                }
            }
            Ok(())
        }
        TypeInfo::Option(info) if matches!(info.some_info(), TypeInfo::Option(_)) => {
            Err(RegistrationError::NestedOption {
                type_path: Cow::Borrowed(info.type_path()),
            })
        }
        TypeInfo::Dispatch(info) => {
            let mut keys = new_set();
            for candidate in info.iter() {
                if !keys.insert(candidate.key()) {
                    return Err(RegistrationError::DuplicateDispatchKey {
                        type_path: Cow::Borrowed(info.type_path()),
                        key: candidate.key(),
                    });
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn check_fields(
    type_path: Cow<'static, str>,
    fields: &[NamedField],
    policy: &FieldPolicy,
) -> Result<(), RegistrationError> {
    let mut names: HashSet<&'static str> = new_set();
    for field in fields {
        if !names.insert(field.name()) {
            return Err(RegistrationError::DuplicateField {
                type_path,
                field: field.name(),
            });
        }
    }

    if let Some(field) = policy.mentioned_fields().find(|field| !names.contains(field)) {
        return Err(RegistrationError::UnknownPolicyField { type_path, field });
    }

    // Fields that never reach a side cannot collide on it.
    let sides: [fn(&FieldPolicy, &str) -> bool; 2] = [
        FieldPolicy::is_skipped_on_encode,
        FieldPolicy::is_skipped_on_decode,
    ];
    for skipped in sides {
        let mut keys: HashSet<&'static str> = new_set();
        for field in fields.iter().filter(|field| !skipped(policy, field.name())) {
            let key = policy.output_key(field.name());
            if !keys.insert(key) {
                return Err(RegistrationError::RenameCollision { type_path, key });
            }
        }
    }

    for field in fields {
        if policy.is_skipped_on_decode(field.name())
            && !field.has_default()
            && !matches!(field.type_info(), TypeInfo::Option(_))
        {
            log::warn!(
                "field `{}` of `{type_path}` is skipped on decode but has no default, decoding will always fail",
                field.name(),
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec::Vec;

    use super::{Walk, validate};
    use crate::Reflect;
    use crate::info::{NamedField, StructInfo, TypeInfo, Typed};
    use crate::ops::{ConstructError, DynamicStruct};
    use crate::policy::FieldPolicy;
    use crate::registry::RegistrationError;

    fn never(_: DynamicStruct) -> Result<Box<dyn Reflect>, ConstructError> {
        Err(ConstructError::MissingField {
            field: "unused".into(),
        })
    }

    fn leak(info: TypeInfo) -> &'static TypeInfo {
        Box::leak(Box::new(info))
    }

    #[test]
    fn duplicate_field_names() {
        let info = leak(TypeInfo::Struct(StructInfo::new::<u8>(
            &[NamedField::new::<u8>("a"), NamedField::new::<u16>("a")],
            never,
        )));

        let err = validate(info).unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateField { field: "a", .. }));
    }

    #[test]
    fn policy_must_name_real_fields() {
        let info = leak(TypeInfo::Struct(
            StructInfo::new::<u8>(&[NamedField::new::<u8>("a")], never)
                .with_policy(FieldPolicy::new().skip("b")),
        ));

        let err = validate(info).unwrap_err();
        assert!(matches!(err, RegistrationError::UnknownPolicyField { field: "b", .. }));
    }

    #[test]
    fn nested_options_are_refused() {
        let err = validate(<Option<Option<u8>>>::type_info()).unwrap_err();
        assert!(matches!(err, RegistrationError::NestedOption { .. }));

        assert!(validate(<Option<Vec<Option<u8>>>>::type_info()).is_ok());
    }

    #[test]
    fn rename_onto_a_skipped_field() {
        let info = leak(TypeInfo::Struct(
            StructInfo::new::<u8>(
                &[NamedField::new::<u8>("a"), NamedField::new::<u8>("b")],
                never,
            )
            .with_policy(FieldPolicy::new().skip("b").rename("a", "b")),
        ));
        assert!(validate(info).is_ok());

        // Still read back from the same key.
        let info = leak(TypeInfo::Struct(
            StructInfo::new::<u8>(
                &[NamedField::new::<u8>("a"), NamedField::new::<u8>("b")],
                never,
            )
            .with_policy(FieldPolicy::new().skip_encode("b").rename("a", "b")),
        ));
        let err = validate(info).unwrap_err();
        assert!(matches!(err, RegistrationError::RenameCollision { key: "b", .. }));
    }

    #[test]
    fn rename_onto_another_field() {
        let info = leak(TypeInfo::Struct(
            StructInfo::new::<u8>(
                &[NamedField::new::<u8>("a"), NamedField::new::<u8>("b")],
                never,
            )
            .with_policy(FieldPolicy::new().rename("a", "b")),
        ));

        let err = validate(info).unwrap_err();
        assert!(matches!(err, RegistrationError::RenameCollision { key: "b", .. }));
    }

    #[test]
    fn walk_orders_dependencies_first() {
        let accepted = Walk::new(|_| false)
            .run(<Option<Vec<u8>>>::type_info())
            .unwrap();
        let paths: Vec<_> = accepted.iter().map(|info| info.type_name()).collect();

        assert_eq!(paths, ["u8", "Vec<u8>", "Option<Vec<u8>>"]);
    }

    #[test]
    fn walk_skips_registered_types() {
        let u8_id = core::any::TypeId::of::<u8>();
        let accepted = Walk::new(|id| id == u8_id)
            .run(<Vec<u8>>::type_info())
            .unwrap();

        assert_eq!(accepted.len(), 1);
    }
}
