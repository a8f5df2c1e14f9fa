use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap;
use std::hash::RandomState;

use indexmap::IndexMap;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{MapInfo, TypeInfo, TypePath, Typed};
use crate::ops::{ConstructError, Map, MapIter};

fn map_debug(map: &dyn Map, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(map.iter()).finish()
}

/// Takes every decoded entry as `(K, V)`, keeping input order.
fn take_entries<K: Reflect + TypePath, V: Reflect + TypePath>(
    entries: Vec<(Box<dyn Reflect>, Box<dyn Reflect>)>,
) -> impl Iterator<Item = Result<(K, V), ConstructError>> {
    fn take<T: Reflect + TypePath>(item: Box<dyn Reflect>, field: &'static str) -> Result<T, ConstructError> {
        item.take::<T>().map_err(|item| ConstructError::TypeMismatch {
            field: field.into(),
            expected: T::type_path(),
            found: item.reflect_type_path(),
        })
    }

    entries
        .into_iter()
        .map(|(key, value)| Ok((take::<K>(key, "key")?, take::<V>(value, "value")?)))
}

impl TypePath for RandomState {
    #[inline]
    fn type_path() -> &'static str {
        "std::hash::RandomState"
    }

    #[inline]
    fn type_name() -> &'static str {
        "RandomState"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "RandomState"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("std::hash")
    }
}

// -----------------------------------------------------------------------------
// BTreeMap

impl<K: TypePath, V: TypePath> TypePath for BTreeMap<K, V> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["alloc::collections::BTreeMap<", K::type_path(), ", ", V::type_path(), ">"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["BTreeMap<", K::type_name(), ", ", V::type_name(), ">"])
        })
    }

    #[inline]
    fn type_ident() -> &'static str {
        "BTreeMap"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::collections")
    }
}

impl<K, V> Typed for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Map(MapInfo::new::<Self, K, V>(|entries| {
                let map = take_entries::<K, V>(entries).collect::<Result<BTreeMap<K, V>, _>>()?;
                Ok(map.into_boxed_reflect())
            }))
        })
    }
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    crate::reflection::impl_reflect_cast_fn!(Map);

    #[inline]
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        map_debug(self, f)
    }
}

impl<K, V> Map for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn iter(&self) -> MapIter<'_> {
        Box::new(BTreeMap::iter(self).map(|(key, value)| (key.as_reflect(), value.as_reflect())))
    }
}

// -----------------------------------------------------------------------------
// Hashed maps

macro_rules! impl_hashed_map {
    ($ty:ident, $path:literal, $module:literal) => {
        impl<K: TypePath, V: TypePath, S: TypePath> TypePath for $ty<K, V, S> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[
                        $path,
                        "<",
                        K::type_path(),
                        ", ",
                        V::type_path(),
                        ", ",
                        S::type_path(),
                        ">",
                    ])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[
                        stringify!($ty),
                        "<",
                        K::type_name(),
                        ", ",
                        V::type_name(),
                        ", ",
                        S::type_name(),
                        ">",
                    ])
                })
            }

            #[inline]
            fn type_ident() -> &'static str {
                stringify!($ty)
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }

        impl<K, V, S> Typed for $ty<K, V, S>
        where
            K: Reflect + Typed + Eq + Hash,
            V: Reflect + Typed,
            S: TypePath + BuildHasher + Default + Send + Sync,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Map(MapInfo::new::<Self, K, V>(|entries| {
                        let mut map = $ty::with_capacity_and_hasher(entries.len(), S::default());
                        for entry in take_entries::<K, V>(entries) {
                            let (key, value) = entry?;
                            map.insert(key, value);
                        }
                        Ok(map.into_boxed_reflect())
                    }))
                })
            }
        }

        impl<K, V, S> Reflect for $ty<K, V, S>
        where
            K: Reflect + Typed + Eq + Hash,
            V: Reflect + Typed,
            S: TypePath + BuildHasher + Default + Send + Sync,
        {
            crate::reflection::impl_reflect_cast_fn!(Map);

            #[inline]
            fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                map_debug(self, f)
            }
        }

        impl<K, V, S> Map for $ty<K, V, S>
        where
            K: Reflect + Typed + Eq + Hash,
            V: Reflect + Typed,
            S: TypePath + BuildHasher + Default + Send + Sync,
        {
            #[inline]
            fn len(&self) -> usize {
                $ty::len(self)
            }

            fn iter(&self) -> MapIter<'_> {
                Box::new($ty::iter(self).map(|(key, value)| (key.as_reflect(), value.as_reflect())))
            }
        }
    };
}

impl_hashed_map!(HashMap, "std::collections::HashMap", "std::collections");
impl_hashed_map!(IndexMap, "indexmap::map::IndexMap", "indexmap::map");

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;

    use indexmap::IndexMap;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::{ConstructError, ReflectRef};

    #[test]
    fn paths() {
        assert_eq!(
            <BTreeMap<u8, String> as TypePath>::type_path(),
            "alloc::collections::BTreeMap<u8, alloc::string::String>"
        );
        assert_eq!(
            <std::collections::HashMap<u8, bool> as TypePath>::type_name(),
            "HashMap<u8, bool, RandomState>"
        );
    }

    #[test]
    fn index_map_keeps_entry_order() {
        let info = <IndexMap<String, u8> as Typed>::type_info().as_map().unwrap();
        let map = info
            .from_entries(vec![
                (String::from("b").into_boxed_reflect(), 2_u8.into_boxed_reflect()),
                (String::from("a").into_boxed_reflect(), 1_u8.into_boxed_reflect()),
            ])
            .unwrap();

        let ReflectRef::Map(view) = map.reflect_ref() else {
            panic!("expected a map");
        };
        let keys: vec::Vec<_> = view
            .iter()
            .map(|(key, _)| key.downcast_ref::<String>().unwrap().clone())
            .collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn entry_types_are_checked() {
        let info = <BTreeMap<u8, u8> as Typed>::type_info().as_map().unwrap();
        let err = info
            .from_entries(vec![(1_u8.into_boxed_reflect(), true.into_boxed_reflect())])
            .unwrap_err();

        assert!(matches!(
            err,
            ConstructError::TypeMismatch { expected: "u8", found: "bool", .. }
        ));
    }
}
