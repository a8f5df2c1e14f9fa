//! Metadata-driven marshalling between typed records and a generic value tree.
//!
//! A record type describes itself once through a static [`TypeInfo`]
//! (usually generated by [`derive::Reflect`]). The [`EncodeDriver`] walks a
//! live record and produces a [`Value`] tree; the [`DecodeDriver`] walks a
//! [`Value`] tree guided by the same descriptor and rebuilds the record.
//!
//! ```
//! use vc_marshal::{derive::Reflect, registry::TypeRegistry, value::Value};
//!
//! #[derive(Reflect, Debug, PartialEq)]
//! struct Phone {
//!     number: String,
//!     #[reflect(skip, default)]
//!     identifier: String,
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Phone>().unwrap();
//!
//! let phone = Phone { number: "123-456".into(), identifier: "1234".into() };
//! let tree = vc_marshal::to_value(&phone, &registry).unwrap();
//!
//! let Value::Mapping(mapping) = &tree else { unreachable!() };
//! assert!(mapping.contains_key("number"));
//! assert!(!mapping.contains_key("identifier"));
//!
//! let back: Phone = vc_marshal::from_value(&tree, &registry).unwrap();
//! assert_eq!(back, Phone { number: "123-456".into(), identifier: String::new() });
//! ```
//!
//! [`TypeInfo`]: crate::info::TypeInfo
//! [`EncodeDriver`]: crate::marshal::EncodeDriver
//! [`DecodeDriver`]: crate::marshal::DecodeDriver
//! [`Value`]: crate::value::Value
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::vc_marshal::...` paths, so tests and doctests
// inside this crate need the crate to be reachable under its own name.
extern crate self as vc_marshal;

// -----------------------------------------------------------------------------
// no_std support

// Descriptor cells rely on `OnceLock` and `RwLock`.
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Config aliases

pub(crate) mod cfg {
    /// Expands its body only in debug builds with the `debug` feature.
    #[cfg(all(debug_assertions, feature = "debug"))]
    macro_rules! debug {
        ($($body:tt)*) => { $($body)* };
    }

    #[cfg(not(all(debug_assertions, feature = "debug")))]
    macro_rules! debug {
        ($($body:tt)*) => {};
    }

    pub(crate) use debug;
}

// -----------------------------------------------------------------------------
// Modules

mod hash;
mod reflection;

pub mod impls;
pub mod info;
pub mod marshal;
pub mod ops;
pub mod policy;
pub mod registry;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use marshal::{from_value, to_value};
pub use reflection::Reflect;
pub use vc_marshal_derive as derive;
