use proc_macro2::TokenStream;
use quote::quote;

use super::{get_auto_register_impl, impl_trait_reflect, impl_trait_type_path, impl_trait_typed};

use crate::derive_data::{EnumVariantFields, ReflectEnum, StructField};
use crate::path::fp::OptionFP;

/// Implement the descriptor traits for a tagged enum.
pub(crate) fn impl_enum(info: &ReflectEnum) -> TokenStream {
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

    // trait: Enum
    let enum_trait_tokens = impl_trait_enum(info);

    // trait: Reflect
    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(Enum), get_enum_debug_impl(info));

    // feature: auto_register
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #enum_trait_tokens

        #reflect_trait_tokens

        #auto_register_tokens
    }
}

/// Generate `Enum` trait implementation tokens.
fn impl_trait_enum(info: &ReflectEnum) -> TokenStream {
    let meta = info.meta();

    let vc_marshal_path = meta.vc_marshal_path();
    let enum_ = crate::path::enum_(vc_marshal_path);
    let reflect_ = crate::path::reflect_(vc_marshal_path);
    let variant_kind_ = crate::path::variant_kind_(vc_marshal_path);

    // Bound to a local: `quote!` cannot repeat a unit struct.
    let option_ = OptionFP;

    let mut name_arms = Vec::new();
    let mut index_arms = Vec::new();
    let mut kind_arms = Vec::new();
    let mut field_arms = Vec::new();
    let mut field_at_arms = Vec::new();
    let mut len_arms = Vec::new();

    for variant in info.variants() {
        let ident = &variant.data.ident;
        let name = variant.name();
        let index = variant.index;
        let pattern = variant.pattern();

        let (wildcard, kind) = match &variant.fields {
            EnumVariantFields::Unit => (quote!(Self::#ident), quote!(Unit)),
            EnumVariantFields::Unnamed(_) => (quote!(Self::#ident(..)), quote!(Tuple)),
            EnumVariantFields::Named(_) => (quote!(Self::#ident { .. }), quote!(Struct)),
        };

        name_arms.push(quote!(#wildcard => #name,));
        index_arms.push(quote!(#wildcard => #index,));
        kind_arms.push(quote!(#wildcard => #variant_kind_::#kind,));

        let fields = variant.fields();
        let field_count = fields.len();
        len_arms.push(quote!(#wildcard => #field_count,));

        if fields.is_empty() {
            continue;
        }

        let bindings = fields.iter().map(StructField::binding).collect::<Vec<_>>();
        let positions = 0..fields.len();
        field_at_arms.push(quote! {
            #pattern => match index {
                #(#positions => #option_::Some(#reflect_::as_reflect(#bindings)),)*
                _ => #OptionFP::None,
            },
        });

        if let EnumVariantFields::Named(_) = &variant.fields {
            let names = fields.iter().map(StructField::name);
            field_arms.push(quote! {
                #pattern => match name {
                    #(#names => #option_::Some(#reflect_::as_reflect(#bindings)),)*
                    _ => #OptionFP::None,
                },
            });
        }
    }

    // Unused when no variant has fields of that kind.
    let name_param = if field_arms.is_empty() { quote!(_) } else { quote!(name) };
    let index_param = if field_at_arms.is_empty() { quote!(_) } else { quote!(index) };

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        impl #impl_generics #enum_ for #real_ident #ty_generics #where_clause {
            fn variant_name(&self) -> &str {
                match self {
                    #(#name_arms)*
                }
            }

            fn variant_index(&self) -> usize {
                match self {
                    #(#index_arms)*
                }
            }

            fn variant_kind(&self) -> #variant_kind_ {
                match self {
                    #(#kind_arms)*
                }
            }

            fn field(&self, #name_param: &str) -> #OptionFP<&dyn #reflect_> {
                match self {
                    #(#field_arms)*
                    #[allow(unreachable_patterns)]
                    _ => #OptionFP::None,
                }
            }

            fn field_at(&self, #index_param: usize) -> #OptionFP<&dyn #reflect_> {
                match self {
                    #(#field_at_arms)*
                    #[allow(unreachable_patterns)]
                    _ => #OptionFP::None,
                }
            }

            fn field_len(&self) -> usize {
                match self {
                    #(#len_arms)*
                }
            }
        }
    }
}

/// Body of `reflect_debug`, formatting the active variant like `#[derive(Debug)]`.
fn get_enum_debug_impl(info: &ReflectEnum) -> TokenStream {
    let reflect_ = crate::path::reflect_(info.meta().vc_marshal_path());

    let arms = info.variants().iter().map(|variant| {
        let name = variant.name();
        let pattern = variant.pattern();
        let fields = variant.fields();
        let bindings = fields.iter().map(StructField::binding);

        let body = match &variant.fields {
            EnumVariantFields::Unit => quote!(f.write_str(#name)),
            EnumVariantFields::Unnamed(_) => quote! {
                f.debug_tuple(#name)
                    #(.field(&#reflect_::as_reflect(#bindings)))*
                    .finish()
            },
            EnumVariantFields::Named(_) => {
                let names = fields.iter().map(StructField::name);
                quote! {
                    f.debug_struct(#name)
                        #(.field(#names, &#reflect_::as_reflect(#bindings)))*
                        .finish()
                }
            }
        };

        quote!(#pattern => #body,)
    });

    quote! {
        match self {
            #(#arms)*
        }
    }
}
