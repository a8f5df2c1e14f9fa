//! Derive and helper macros for `vc_marshal`.
//!
//! - [`Reflect`]
//! - [`impl_type_path`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Descriptor Derivation
///
/// `#[derive(Reflect)]` implements the following traits:
///
/// - `TypePath`
/// - `Typed`
/// - `Reflect`
/// - `Struct` (for `struct T { ... }` and `struct T;`)
/// - `Enum` (for `enum T { ... }`)
/// - `Dispatch` (for enums marked `#[reflect(dispatch)]`)
///
/// Tuple structs and enums without variants are rejected.
///
/// ## Implementation Control
///
/// `TypePath` and `Typed` can be switched off and written by hand:
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(TypePath = false, Typed = false)]
/// struct Foo { /* ... */ }
/// ```
///
/// ### Custom Type Path
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(type_path = "my_crate::model::Foo")]
/// struct Foo { /* ... */ }
/// ```
///
/// The last segment becomes the type name, the rest the module path.
/// Generics are appended automatically.
///
/// ## Field Attributes
///
/// Allowed on fields of structs and of struct variants:
///
/// - `skip`: never written, never read.
/// - `skip_encode` (alias `skip_serializing`): never written.
/// - `skip_decode`: never read.
/// - `skip_if = "path"`: not written when `fn(&Value) -> bool` says so.
/// - `try_skip_if = "path"`: same with `fn(&Value) -> Result<bool, PredicateError>`.
/// - `skip_decode_if = "path"`: the input value is ignored when the predicate holds.
/// - `rename = "key"`: the key used in the tree.
/// - `default` / `default = "path"`: the value used when the key is absent
///   (`Default::default` or `fn() -> T`).
/// - `encode_with = "path"` / `decode_with = "path"`: replace the encoder or
///   decoder for this field.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct Person {
///     #[reflect(rename = "full_name")]
///     name: String,
///     #[reflect(skip_if = "vc_marshal::policy::is_zero", default)]
///     age: u32,
/// }
/// ```
///
/// ## Variant Attributes
///
/// - `rename = "Tag"`: the tag written for the variant.
/// - `key = "field"`: for dispatch enums, the key whose presence selects
///   the variant. Defaults to the variant name.
///
/// ## Dispatch
///
/// An enum whose variants each wrap one described type can be marked
/// `#[reflect(dispatch)]`. It is encoded as its member, and decoded by
/// checking which variant's key is present in the input mapping.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(dispatch)]
/// enum Shape {
///     #[reflect(key = "radius")]
///     Circle(Circle),
///     #[reflect(key = "width")]
///     Rect(Rect),
/// }
/// ```
///
/// ## Auto Registration
///
/// `#[reflect(auto_register)]` submits the type to the inventory collected by
/// `TypeRegistry::auto_register`. No effect on generic types, or when the
/// `auto_register` feature is disabled.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_reflect_impls(ast)
}

/// A macro that implements `TypePath` for a foreign type.
///
/// Syntax: `(in module_path as alias_name) path`.
///
/// The path must start with `::` unless a custom module is given, and must
/// resolve to the target type from the invoking crate.
///
/// ## Example
///
/// ```ignore
/// // type_path is `core::time::Duration`
/// impl_type_path!(::core::time::Duration);
///
/// // Generics are supported.
/// impl_type_path!(::core::marker::PhantomData<T>);
///
/// // type_path is `units::Span`
/// impl_type_path!((in units as Span) ::core::time::Duration);
/// ```
#[proc_macro]
pub fn impl_type_path(input: TokenStream) -> TokenStream {
    use crate::derive_data::{ReflectMeta, ReflectTypePathParser, TypeAttributes, TypeParser};

    let ReflectTypePathParser {
        custom_path,
        type_ident,
        type_path,
        generics,
    } = parse_macro_input!(input with ReflectTypePathParser::parse);

    let parser = TypeParser::new_foreign(&type_ident, &type_path, custom_path, &generics);

    let meta = ReflectMeta::new(TypeAttributes::default(), parser);
    let type_path_impls = impls::impl_trait_type_path(&meta);

    quote! {
        const _: () = {
            #type_path_impls
        };
    }
    .into()
}
