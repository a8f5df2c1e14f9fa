//! Fixed tuples with a field count of 12 or less.
//!
//! The empty tuple `()` is a leaf and lives with the primitives.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{TupleInfo, TypeInfo, TypePath, Typed, UnnamedField};
use crate::ops::{ConstructError, Tuple};

/// Renders `(A, B)`, or `(A,)` for a single element.
fn tuple_path(parts: &[&str]) -> String {
    let mut path = String::from("(");
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            path.push_str(", ");
        }
        path.push_str(part);
    }
    if parts.len() == 1 {
        path.push(',');
    }
    path.push(')');
    path
}

pub(crate) fn check_len(items: &[Box<dyn Reflect>], expected: usize) -> Result<(), ConstructError> {
    match items.len() {
        found if found == expected => Ok(()),
        found => Err(ConstructError::ItemCount { expected, found }),
    }
}

fn take_next<T: Reflect + TypePath>(
    items: &mut impl Iterator<Item = Box<dyn Reflect>>,
    index: usize,
) -> Result<T, ConstructError> {
    let item = items.next().ok_or(ConstructError::ItemCount {
        expected: index + 1,
        found: index,
    })?;
    item.take::<T>().map_err(|item| ConstructError::TypeMismatch {
        field: alloc::format!("{index}").into(),
        expected: T::type_path(),
        found: item.reflect_type_path(),
    })
}

pub(crate) fn tuple_debug(tuple: &dyn Tuple, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_tuple("");
    for field in tuple.iter() {
        debug.field(&field);
    }
    debug.finish()
}

macro_rules! impl_tuple {
    ($len:literal: $(($index:tt $name:ident)),+) => {
        impl<$($name: TypePath),+> TypePath for ($($name,)+) {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| tuple_path(&[$($name::type_path()),+]))
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| tuple_path(&[$($name::type_name()),+]))
            }

            fn type_ident() -> &'static str {
                Self::type_name()
            }
        }

        impl<$($name: Reflect + Typed),+> Typed for ($($name,)+) {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Tuple(TupleInfo::new::<Self>(
                        &[$(UnnamedField::new::<$name>($index)),+],
                        |items: Vec<Box<dyn Reflect>>| {
                            check_len(&items, $len)?;
                            let mut items = items.into_iter();
                            let value: ($($name,)+) = ($(take_next::<$name>(&mut items, $index)?,)+);
                            Ok(value.into_boxed_reflect())
                        },
                    ))
                })
            }
        }

        impl<$($name: Reflect + Typed),+> Reflect for ($($name,)+) {
            crate::reflection::impl_reflect_cast_fn!(Tuple);

            #[inline]
            fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                tuple_debug(self, f)
            }
        }

        impl<$($name: Reflect + Typed),+> Tuple for ($($name,)+) {
            fn field(&self, index: usize) -> Option<&dyn Reflect> {
                match index {
                    $($index => Some(&self.$index),)+
                    _ => None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                $len
            }
        }
    };
}

impl_tuple!(1: (0 P0));
impl_tuple!(2: (0 P0), (1 P1));
impl_tuple!(3: (0 P0), (1 P1), (2 P2));
impl_tuple!(4: (0 P0), (1 P1), (2 P2), (3 P3));
impl_tuple!(5: (0 P0), (1 P1), (2 P2), (3 P3), (4 P4));
impl_tuple!(6: (0 P0), (1 P1), (2 P2), (3 P3), (4 P4), (5 P5));
impl_tuple!(7: (0 P0), (1 P1), (2 P2), (3 P3), (4 P4), (5 P5), (6 P6));
impl_tuple!(8: (0 P0), (1 P1), (2 P2), (3 P3), (4 P4), (5 P5), (6 P6), (7 P7));
impl_tuple!(9: (0 P0), (1 P1), (2 P2), (3 P3), (4 P4), (5 P5), (6 P6), (7 P7), (8 P8));
impl_tuple!(10: (0 P0), (1 P1), (2 P2), (3 P3), (4 P4), (5 P5), (6 P6), (7 P7), (8 P8), (9 P9));
impl_tuple!(11: (0 P0), (1 P1), (2 P2), (3 P3), (4 P4), (5 P5), (6 P6), (7 P7), (8 P8), (9 P9), (10 P10));
impl_tuple!(12: (0 P0), (1 P1), (2 P2), (3 P3), (4 P4), (5 P5), (6 P6), (7 P7), (8 P8), (9 P9), (10 P10), (11 P11));

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;

    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::ConstructError;

    #[test]
    fn builds_from_items_in_order() {
        let info = <(u16, String) as Typed>::type_info().as_tuple().unwrap();
        let value = info
            .from_items(vec![1990_u16.into_boxed_reflect(), String::from("Feb").into_boxed_reflect()])
            .unwrap();

        assert_eq!(
            value.take::<(u16, String)>().unwrap(),
            (1990, String::from("Feb"))
        );
    }

    #[test]
    fn rejects_wrong_item_count() {
        let info = <(u8, u8) as Typed>::type_info().as_tuple().unwrap();
        let items: vec::Vec<Box<dyn Reflect>> = vec![1_u8.into_boxed_reflect()];

        assert_eq!(
            info.from_items(items).unwrap_err(),
            ConstructError::ItemCount { expected: 2, found: 1 }
        );
    }

    #[test]
    fn debug_lists_fields() {
        let value: Box<dyn Reflect> = (1_u8, true).into_boxed_reflect();
        assert_eq!(format!("{value:?}"), "(1, true)");
    }
}
