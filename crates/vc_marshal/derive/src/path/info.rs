use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn type_path_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::info::TypePath
    }
}

#[inline(always)]
pub(crate) fn typed_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_info_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn type_kind_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::info::TypeKind
    }
}

#[inline(always)]
pub(crate) fn struct_info_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::info::StructInfo
    }
}

#[inline(always)]
pub(crate) fn enum_info_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::info::EnumInfo
    }
}

#[inline(always)]
pub(crate) fn dispatch_info_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::info::DispatchInfo
    }
}

#[inline(always)]
pub(crate) fn dispatch_candidate_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::info::DispatchCandidate
    }
}

#[inline(always)]
pub(crate) fn variant_info_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::info::VariantInfo
    }
}

#[inline(always)]
pub(crate) fn variant_kind_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::info::VariantKind
    }
}

#[inline(always)]
pub(crate) fn struct_variant_info_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::info::StructVariantInfo
    }
}

#[inline(always)]
pub(crate) fn tuple_variant_info_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::info::TupleVariantInfo
    }
}

#[inline(always)]
pub(crate) fn unit_variant_info_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::info::UnitVariantInfo
    }
}

#[inline(always)]
pub(crate) fn named_field_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::info::NamedField
    }
}

#[inline(always)]
pub(crate) fn unnamed_field_(vc_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_marshal_path::info::UnnamedField
    }
}
