use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;

use crate::Reflect;
use crate::impls::tuple::{check_len, tuple_debug};
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat, take_items};
use crate::info::{TupleInfo, TypeInfo, TypePath, Typed, UnnamedField};
use crate::ops::{ConstructError, Tuple};

// Arrays have a fixed length, so they are described and encoded as tuples.

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_path(), "; ", &N.to_string(), "]"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_name(), "; ", &N.to_string(), "]"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        Self::type_name()
    }
}

impl<T: Reflect + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let fields: Vec<UnnamedField> = (0..N).map(UnnamedField::new::<T>).collect();
            TypeInfo::Tuple(TupleInfo::new::<Self>(
                &fields,
                |items: Vec<Box<dyn Reflect>>| {
                    check_len(&items, N)?;
                    let found = items.len();
                    let array: [T; N] = take_items::<T>(items)?
                        .try_into()
                        .map_err(|_| ConstructError::ItemCount { expected: N, found })?;
                    Ok(array.into_boxed_reflect())
                },
            ))
        })
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
    crate::reflection::impl_reflect_cast_fn!(Tuple);

    #[inline]
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        tuple_debug(self, f)
    }
}

impl<T: Reflect + Typed, const N: usize> Tuple for [T; N] {
    #[inline]
    fn field(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(Reflect::as_reflect)
    }

    #[inline]
    fn field_len(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};

    #[test]
    fn arrays_are_tuples() {
        assert_eq!(<[u8; 3] as TypePath>::type_path(), "[u8; 3]");

        let info = <[bool; 2] as Typed>::type_info().as_tuple().unwrap();
        assert_eq!(info.field_len(), 2);

        let array = info
            .from_items(vec![true.into_boxed_reflect(), false.into_boxed_reflect()])
            .unwrap();
        assert_eq!(array.take::<[bool; 2]>().unwrap(), [true, false]);
    }
}
