use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn struct_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::ops::Struct
    }
}

#[inline(always)]
pub(crate) fn enum_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::ops::Enum
    }
}

#[inline(always)]
pub(crate) fn dispatch_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::ops::Dispatch
    }
}

#[inline(always)]
pub(crate) fn reflect_ref_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::ops::ReflectRef
    }
}

#[inline(always)]
pub(crate) fn construct_error_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::ops::ConstructError
    }
}

#[inline(always)]
pub(crate) fn dynamic_struct_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::ops::DynamicStruct
    }
}

#[inline(always)]
pub(crate) fn dynamic_variant_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::ops::DynamicVariant
    }
}
