//! Typed records to and from generic value trees.
//!
//! Re-exports the workspace crates under short names:
//!
//! - [`marshal`]: descriptors, registry, value tree and the encode/decode
//!   drivers.
//!
//! ```
//! use vc_data::marshal::{derive::Reflect, registry::TypeRegistry};
//!
//! #[derive(Reflect, Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Point>().unwrap();
//!
//! let tree = vc_data::marshal::to_value(&Point { x: 1, y: 2 }, &registry).unwrap();
//! assert_eq!(tree.to_string(), r#"{"x": 1, "y": 2}"#);
//!
//! let back: Point = vc_data::marshal::from_value(&tree, &registry).unwrap();
//! assert_eq!(back, Point { x: 1, y: 2 });
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_marshal as marshal;
