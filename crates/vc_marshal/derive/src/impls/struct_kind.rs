use proc_macro2::TokenStream;
use quote::quote;

use super::{get_auto_register_impl, impl_trait_reflect, impl_trait_type_path, impl_trait_typed};

use crate::derive_data::{ReflectStruct, StructField};
use crate::path::fp::OptionFP;

/// Implement the descriptor traits for a struct with named fields.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
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

    // trait: Struct
    let struct_trait_tokens = impl_trait_struct(info);

    // trait: Reflect
    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(Struct), get_struct_debug_impl(info));

    // feature: auto_register
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #struct_trait_tokens

        #reflect_trait_tokens

        #auto_register_tokens
    }
}

/// Generate `Struct` trait implementation tokens.
fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();

    let vc_marshal_path = meta.vc_marshal_path();
    let struct_ = crate::path::struct_(vc_marshal_path);
    let reflect_ = crate::path::reflect_(vc_marshal_path);

    let fields = info.fields();
    let field_names = fields.iter().map(StructField::name).collect::<Vec<_>>();
    let fields_ref = fields
        .iter()
        .map(|field| {
            let member = field.member();
            quote!(#reflect_::as_reflect(&self.#member))
        })
        .collect::<Vec<_>>();
    let field_indices = 0..fields.len();
    let field_count = fields.len();

    // Bound to a local: `quote!` cannot repeat a unit struct.
    let option_ = OptionFP;

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        impl #impl_generics #struct_ for #real_ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> #OptionFP<&dyn #reflect_> {
                match name {
                    #(#field_names => #option_::Some(#fields_ref),)*
                    _ => #OptionFP::None,
                }
            }

            fn field_at(&self, index: usize) -> #OptionFP<&dyn #reflect_> {
                match index {
                    #(#field_indices => #option_::Some(#fields_ref),)*
                    _ => #OptionFP::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_count
            }
        }
    }
}

/// Body of `reflect_debug`: `Name { a: .., b: .. }` with the fields
/// formatted through their own `reflect_debug`.
fn get_struct_debug_impl(info: &ReflectStruct) -> TokenStream {
    let reflect_ = crate::path::reflect_(info.meta().vc_marshal_path());
    let type_ident = info.meta().type_ident().into_borrowed();

    let fields = info.fields().iter().map(|field| {
        let name = field.name();
        let member = field.member();
        quote!(.field(#name, &#reflect_::as_reflect(&self.#member)))
    });

    quote! {
        f.debug_struct(#type_ident)
            #(#fields)*
            .finish()
    }
}
