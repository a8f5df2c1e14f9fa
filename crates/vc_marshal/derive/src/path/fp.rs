//! Fully qualified paths of the prelude items the generated code uses,
//! so user items named `Option` or `Send` cannot shadow them.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

pub(crate) struct AnyFP;
pub(crate) struct SendFP;
pub(crate) struct SyncFP;
pub(crate) struct DefaultFP;
pub(crate) struct OptionFP;
pub(crate) struct ResultFP;

impl ToTokens for AnyFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        quote!(::core::any::Any).to_tokens(tokens);
    }
}

impl ToTokens for SendFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        quote!(::core::marker::Send).to_tokens(tokens);
    }
}

impl ToTokens for SyncFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        quote!(::core::marker::Sync).to_tokens(tokens);
    }
}

impl ToTokens for DefaultFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        quote!(::core::default::Default).to_tokens(tokens);
    }
}

impl ToTokens for OptionFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        quote!(::core::option::Option).to_tokens(tokens);
    }
}

impl ToTokens for ResultFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        quote!(::core::result::Result).to_tokens(tokens);
    }
}
