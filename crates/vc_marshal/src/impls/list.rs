use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat, take_items};
use crate::info::{ListInfo, TypeInfo, TypePath, Typed};
use crate::ops::List;

fn list_debug(list: &dyn List, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(list.iter()).finish()
}

macro_rules! impl_list {
    ($ty:ident, $path:literal, $name:literal, |$items:ident| $build:expr) => {
        impl<T: TypePath> TypePath for $ty<T> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| concat(&[$path, "<", T::type_path(), ">"]))
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| concat(&[$name, "<", T::type_name(), ">"]))
            }

            #[inline]
            fn type_ident() -> &'static str {
                $name
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                $path.rfind("::").map(|index| $path.split_at(index).0)
            }
        }

        impl<T: Reflect + Typed> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::List(ListInfo::new::<Self, T>(|items: Vec<Box<dyn Reflect>>| {
                        let $items = take_items::<T>(items)?;
                        let list: $ty<T> = $build;
                        Ok(list.into_boxed_reflect())
                    }))
                })
            }
        }

        impl<T: Reflect + Typed> Reflect for $ty<T> {
            crate::reflection::impl_reflect_cast_fn!(List);

            #[inline]
            fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                list_debug(self, f)
            }
        }
    };
}

impl_list!(Vec, "alloc::vec::Vec", "Vec", |items| items);
impl_list!(VecDeque, "alloc::collections::VecDeque", "VecDeque", |items| {
    VecDeque::from(items)
});

impl<T: Reflect + Typed> List for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(Reflect::as_reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T: Reflect + Typed> List for VecDeque<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        VecDeque::get(self, index).map(Reflect::as_reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::VecDeque;
    use alloc::format;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::ConstructError;

    #[test]
    fn paths() {
        assert_eq!(
            <VecDeque<i32> as TypePath>::type_path(),
            "alloc::collections::VecDeque<i32>"
        );
        assert_eq!(<Vec<Vec<u8>> as TypePath>::type_name(), "Vec<Vec<u8>>");
        assert_eq!(<Vec<u8> as TypePath>::module_path(), Some("alloc::vec"));
    }

    #[test]
    fn builds_from_items() {
        let info = <VecDeque<u8> as Typed>::type_info().as_list().unwrap();
        let list = info
            .from_items(vec![1_u8.into_boxed_reflect(), 2_u8.into_boxed_reflect()])
            .unwrap();
        assert_eq!(list.take::<VecDeque<u8>>().unwrap(), [1, 2]);
    }

    #[test]
    fn item_type_is_checked() {
        let info = <Vec<u8> as Typed>::type_info().as_list().unwrap();
        let err = info
            .from_items(vec![1_u8.into_boxed_reflect(), true.into_boxed_reflect()])
            .unwrap_err();

        assert_eq!(
            err,
            ConstructError::TypeMismatch {
                field: "[1]".into(),
                expected: "u8",
                found: "bool",
            }
        );
    }

    #[test]
    fn debug_lists_items() {
        let list = Vec::from([1_u8, 2]).into_boxed_reflect();
        assert_eq!(format!("{list:?}"), "[1, 2]");
    }
}
