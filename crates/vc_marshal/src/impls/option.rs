use alloc::boxed::Box;
use core::fmt;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{OptionInfo, TypeInfo, TypePath, Typed};
use crate::ops::{ConstructError, ReflectRef};

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["core::option::Option<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Option<", T::type_name(), ">"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Option"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("core::option")
    }
}

/// `None` encodes as `Null`, so `Option<Option<T>>` is refused at registration.
impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Option(OptionInfo::new::<Self, T>(
                |content: Option<Box<dyn Reflect>>| {
                    let value: Option<T> = match content {
                        None => None,
                        Some(inner) => Some(inner.take::<T>().map_err(|inner| {
                            ConstructError::TypeMismatch {
                                field: "Some".into(),
                                expected: T::type_path(),
                                found: inner.reflect_type_path(),
                            }
                        })?),
                    };
                    Ok(value.into_boxed_reflect())
                },
            ))
        })
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Option(self.as_ref().map(Reflect::as_reflect))
    }

    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(inner) => f.debug_tuple("Some").field(&inner.as_reflect()).finish(),
            None => f.write_str("None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::ReflectRef;

    #[test]
    fn none_and_some() {
        assert_eq!(
            <Option<String> as TypePath>::type_path(),
            "core::option::Option<alloc::string::String>"
        );

        let info = <Option<u8> as Typed>::type_info().as_option().unwrap();
        assert!(info.some_is::<u8>());

        let none = info.from_option(None).unwrap();
        assert_eq!(none.take::<Option<u8>>().unwrap(), None);

        let some = info.from_option(Some(3_u8.into_boxed_reflect())).unwrap();
        assert!(matches!(some.reflect_ref(), ReflectRef::Option(Some(_))));
        assert_eq!(format!("{some:?}"), "Some(3)");
    }
}
