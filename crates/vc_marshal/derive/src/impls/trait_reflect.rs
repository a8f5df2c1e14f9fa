use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Reflect`.
///
/// `reflect_kind_token` names both the `TypeKind` and the `ReflectRef`
/// variant; `reflect_debug_tokens` is the body of `reflect_debug`, which
/// formats into `f`.
pub(crate) fn impl_trait_reflect(
    meta: &ReflectMeta,
    reflect_kind_token: TokenStream,
    reflect_debug_tokens: TokenStream,
) -> TokenStream {
    let vc_marshal_path = meta.vc_marshal_path();

    let reflect_ = crate::path::reflect_(vc_marshal_path);
    let type_kind_ = crate::path::type_kind_(vc_marshal_path);
    let reflect_ref_ = crate::path::reflect_ref_(vc_marshal_path);

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        impl #impl_generics #reflect_ for #real_ident #ty_generics #where_clause {
            #[inline]
            fn reflect_kind(&self) -> #type_kind_ {
                #type_kind_::#reflect_kind_token
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#reflect_kind_token(self)
            }

            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #reflect_debug_tokens
            }
        }
    }
}
