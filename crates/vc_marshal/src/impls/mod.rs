//! Descriptor cells and the built-in implementations.
//!
//! - [`concat`]: string concatenation for generic type paths.
//! - [`NonGenericTypeInfoCell`]: used to implement [`Typed`] for non-generic types.
//! - [`GenericTypePathCell`]: used to implement [`TypePath`] for generic types.
//! - [`GenericTypeInfoCell`]: used to implement [`Typed`] for generic types.
//!
//! ## Implemented Menu
//!
//! - leaves: `bool`, `char`, `i8`-`i64`, `isize`, `u8`-`u64`, `usize`,
//!   `f32`, `f64`, `String`, `()`, [`Value`].
//! - fixed tuples: `(P0,)` .. `(P0, .., P11)`, `[T; N]`.
//! - sequences: `Vec<T>`, `VecDeque<T>`.
//! - optional values: `Option<T>`.
//! - mappings: `BTreeMap<K, V>`, `HashMap<K, V, S>`, `IndexMap<K, V, S>`.
//!
//! [`TypePath`]: crate::info::TypePath
//! [`Typed`]: crate::info::Typed
//! [`Value`]: crate::value::Value

// -----------------------------------------------------------------------------
// Modules

mod array;
mod cell;
mod list;
mod map;
mod option;
mod primitives;
mod tuple;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::Reflect;
use crate::info::TypePath;
use crate::ops::ConstructError;

/// An efficient string concatenation function.
///
/// This is usually used for the implementation of `TypePath`.
///
/// # Example
///
/// ```
/// use vc_marshal::impls;
///
/// let s = impls::concat(&["module", "::", "name", "<", "T" , ">"]);
///
/// assert_eq!(s, "module::name<T>");
/// assert_eq!(s.capacity(), 15);
/// ```
#[inline(never)]
pub fn concat(arr: &[&str]) -> String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}

/// Takes every item of a decoded container as `T`.
pub(crate) fn take_items<T: Reflect + TypePath>(
    items: Vec<Box<dyn Reflect>>,
) -> Result<Vec<T>, ConstructError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            item.take::<T>().map_err(|item| ConstructError::TypeMismatch {
                field: Cow::Owned(format!("[{index}]")),
                expected: T::type_path(),
                found: item.reflect_type_path(),
            })
        })
        .collect()
}
