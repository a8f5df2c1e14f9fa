//! The registry of described types.
//!
//! ## Menu
//!
//! - [`TypeMeta`]: the registered descriptor of one type.
//! - [`TypeRegistry`]: the table of [`TypeMeta`]s consulted by the drivers.
//! - [`TypeRegistryArc`]: a registry shared behind `Arc<RwLock<_>>`.
//! - [`RegistrationError`]: a descriptor refused at registration.
//!
//! Registration is the only place descriptors are checked. A registered
//! type and everything it reaches is known to be well formed: field names
//! and output keys are unique, union tags and dispatch keys are unique, and
//! the type graph has no cycle.
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`].
//!
//! We use the [`inventory`] crate to collect the types derived with
//! `#[reflect(auto_register)]`. Not every platform supports it (the major
//! ones do); where it is unsupported the call returns `false` and
//! registers nothing.
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod error;
mod type_meta;
mod type_registry;
mod validate;

// -----------------------------------------------------------------------------
// Exports

pub use error::RegistrationError;
pub use type_meta::TypeMeta;
pub use type_registry::{TypeRegistry, TypeRegistryArc};
