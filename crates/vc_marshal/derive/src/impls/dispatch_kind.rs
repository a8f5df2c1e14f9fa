use proc_macro2::TokenStream;
use quote::quote;

use super::{get_auto_register_impl, impl_trait_reflect, impl_trait_type_path, impl_trait_typed};

use crate::derive_data::ReflectDispatch;

/// Implement the descriptor traits for a `#[reflect(dispatch)]` enum.
pub(crate) fn impl_dispatch(info: &ReflectDispatch) -> TokenStream {
    let meta = info.meta();

    // trait: TypePath
    let type_path_trait_tokens = if meta.attrs().impl_switchs.impl_type_path {
        impl_trait_type_path(meta)
    } else {
        crate::utils::empty()
    };

    // trait: Typed
    let typed_trait_tokens = if meta.attrs().impl_switchs.impl_typed {
        impl_trait_typed(meta, info.to_info_tokens())
    } else {
        crate::utils::empty()
    };

    let vc_marshal_path = meta.vc_marshal_path();
    let dispatch_ = crate::path::dispatch_(vc_marshal_path);
    let reflect_ = crate::path::reflect_(vc_marshal_path);

    let idents = info.members().iter().map(|member| member.ident).collect::<Vec<_>>();
    let names = idents.iter().map(ToString::to_string).collect::<Vec<_>>();

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    // trait: Dispatch
    let dispatch_trait_tokens = quote! {
        impl #impl_generics #dispatch_ for #real_ident #ty_generics #where_clause {
            fn member_name(&self) -> &str {
                match self {
                    #(Self::#idents(_) => #names,)*
                }
            }

            fn member(&self) -> &dyn #reflect_ {
                match self {
                    #(Self::#idents(__member) => #reflect_::as_reflect(__member),)*
                }
            }
        }
    };

    // trait: Reflect
    let reflect_trait_tokens = impl_trait_reflect(
        meta,
        quote!(Dispatch),
        quote! {
            match self {
                #(Self::#idents(__member) => f.debug_tuple(#names).field(&#reflect_::as_reflect(__member)).finish(),)*
            }
        },
    );

    // feature: auto_register
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #dispatch_trait_tokens

        #reflect_trait_tokens

        #auto_register_tokens
    }
}
