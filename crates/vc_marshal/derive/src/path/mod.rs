//! Paths of the `vc_marshal` items the generated code names.
//!
//! Kept in one place so a reorganised `vc_marshal` only touches this module.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `vc_marshal` crate.
///
/// 1. For crates that depend on `vc_marshal`, `::vc_marshal` is returned.
/// 2. For crates that depend on `vc_data`, `::vc_data::marshal` is returned.
/// 3. Otherwise `::vc_marshal` is returned, which may be incorrect.
///
/// Reads the caller's manifest, so it is resolved once per derive and
/// passed down.
pub(crate) fn vc_marshal() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_marshal"))
}

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod info;
mod ops;

pub(crate) mod fp;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use cell::*;
pub(crate) use info::*;
pub(crate) use ops::*;

#[inline(always)]
pub(crate) fn macro_utils_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::__macro_exports::macro_utils
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::__macro_exports::auto_register
    }
}

#[inline(always)]
pub(crate) fn reflect_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::Reflect
    }
}

#[inline(always)]
pub(crate) fn field_policy_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::policy::FieldPolicy
    }
}

#[inline(always)]
pub(crate) fn skip_if_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::policy::SkipIf
    }
}
