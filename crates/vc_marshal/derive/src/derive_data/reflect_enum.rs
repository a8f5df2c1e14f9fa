use proc_macro2::TokenStream;
use quote::quote;
use syn::Variant;

use super::reflect_struct::{take_named_fields, with_policy_tokens};
use super::{ReflectMeta, StructField, VariantAttributes};
use crate::path::fp::ResultFP;

// -----------------------------------------------------------------------------
// Define

pub(crate) struct ReflectEnum<'a> {
    meta: ReflectMeta<'a>,
    variants: Vec<EnumVariant<'a>>,
}

/// Represents a variant on an enum.
pub(crate) struct EnumVariant<'a> {
    /// The raw variant.
    pub data: &'a Variant,
    pub fields: EnumVariantFields<'a>,
    pub attrs: VariantAttributes,
    /// Declaration index.
    pub index: usize,
}

pub(crate) enum EnumVariantFields<'a> {
    Named(Vec<StructField<'a>>),
    Unnamed(Vec<StructField<'a>>),
    Unit,
}

// -----------------------------------------------------------------------------
// EnumVariant Implementation

impl<'a> EnumVariant<'a> {
    pub fn fields(&self) -> &[StructField<'a>] {
        match &self.fields {
            EnumVariantFields::Named(fields) | EnumVariantFields::Unnamed(fields) => fields,
            EnumVariantFields::Unit => &[],
        }
    }

    #[inline]
    pub fn name(&self) -> String {
        self.data.ident.to_string()
    }

    /// `Self::Name`, `Self::Name(__field_0, ..)` or `Self::Name { a: __field_0, .. }`.
    pub fn pattern(&self) -> TokenStream {
        let ident = &self.data.ident;
        let bindings = self.fields().iter().map(StructField::binding);

        match &self.fields {
            EnumVariantFields::Unit => quote!(Self::#ident),
            EnumVariantFields::Unnamed(_) => quote!(Self::#ident( #(#bindings),* )),
            EnumVariantFields::Named(fields) => {
                let members = fields.iter().map(StructField::member);
                quote!(Self::#ident { #(#members: #bindings),* })
            }
        }
    }

    /// Generates the `VariantInfo::Kind(..)` expression.
    pub fn to_info_tokens(&self, vc_marshal_path: &syn::Path) -> TokenStream {
        let variant_info_ = crate::path::variant_info_(vc_marshal_path);
        let name = self.name();

        let with_tag = match &self.attrs.rename {
            Some(tag) => quote!(.with_tag(#tag)),
            None => crate::utils::empty(),
        };

        match &self.fields {
            EnumVariantFields::Unit => {
                let unit_variant_info_ = crate::path::unit_variant_info_(vc_marshal_path);
                quote! {
                    #variant_info_::Unit(#unit_variant_info_::new(#name) #with_tag)
                }
            }
            EnumVariantFields::Unnamed(fields) => {
                let tuple_variant_info_ = crate::path::tuple_variant_info_(vc_marshal_path);
                let fields = fields
                    .iter()
                    .map(|field| field.to_unnamed_info_tokens(vc_marshal_path));
                quote! {
                    #variant_info_::Tuple(
                        #tuple_variant_info_::new(#name, &[ #(#fields),* ]) #with_tag
                    )
                }
            }
            EnumVariantFields::Named(fields) => {
                let struct_variant_info_ = crate::path::struct_variant_info_(vc_marshal_path);
                let with_policy = with_policy_tokens(fields, vc_marshal_path);
                let fields = fields
                    .iter()
                    .map(|field| field.to_named_info_tokens(vc_marshal_path));
                quote! {
                    #variant_info_::Struct(
                        #struct_variant_info_::new(#name, &[ #(#fields),* ]) #with_tag #with_policy
                    )
                }
            }
        }
    }

    /// The match arm building this variant from a `DynamicVariant` named
    /// `__variant`.
    fn to_construct_arm(&self, vc_marshal_path: &syn::Path) -> TokenStream {
        let reflect_ = crate::path::reflect_(vc_marshal_path);
        let ident = &self.data.ident;
        let name = self.name();

        let value = match &self.fields {
            EnumVariantFields::Unit => quote!(Self::#ident),
            EnumVariantFields::Unnamed(fields) if fields.is_empty() => quote! {{
                __variant.into_tuple()?;
                Self::#ident()
            }},
            EnumVariantFields::Unnamed(fields) => {
                let indices = fields.iter().map(|field| field.index);
                let types = fields.iter().map(|field| &field.data.ty);
                quote! {{
                    let mut __fields = __variant.into_tuple()?;
                    Self::#ident( #(__fields.take::<#types>(#indices)?),* )
                }}
            }
            EnumVariantFields::Named(fields) if fields.is_empty() => quote! {{
                __variant.into_struct()?;
                Self::#ident {}
            }},
            EnumVariantFields::Named(fields) => {
                let value = take_named_fields(quote!(Self::#ident), fields);
                quote! {{
                    let mut __fields = __variant.into_struct()?;
                    #value
                }}
            }
        };

        quote! {
            #name => #ResultFP::Ok(#reflect_::into_boxed_reflect(#value)),
        }
    }
}

// -----------------------------------------------------------------------------
// Enum Implementation

impl<'a> ReflectEnum<'a> {
    pub fn new(meta: ReflectMeta<'a>, variants: Vec<EnumVariant<'a>>) -> Self {
        let mut val = Self { meta, variants };

        let active_types = val
            .variants
            .iter()
            .flat_map(EnumVariant::fields)
            .map(|f| f.data.ty.clone())
            .collect();
        val.meta.set_active_types(active_types);

        val
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn variants(&self) -> &[EnumVariant<'a>] {
        &self.variants
    }

    /// Generates the `TypeInfo::Enum(..)` expression.
    pub fn to_info_tokens(&self) -> TokenStream {
        let vc_marshal_path = self.meta.vc_marshal_path();

        let type_info_ = crate::path::type_info_(vc_marshal_path);
        let enum_info_ = crate::path::enum_info_(vc_marshal_path);
        let dynamic_variant_ = crate::path::dynamic_variant_(vc_marshal_path);
        let construct_error_ = crate::path::construct_error_(vc_marshal_path);
        let reflect_ = crate::path::reflect_(vc_marshal_path);
        let macro_utils_ = crate::path::macro_utils_(vc_marshal_path);

        let variant_infos = self
            .variants
            .iter()
            .map(|variant| variant.to_info_tokens(vc_marshal_path));
        let construct_arms = self
            .variants
            .iter()
            .map(|variant| variant.to_construct_arm(vc_marshal_path));

        quote! {
            #type_info_::Enum(
                #enum_info_::new::<Self>(
                    &[ #(#variant_infos),* ],
                    |__variant: #dynamic_variant_| -> #ResultFP<#macro_utils_::Box<dyn #reflect_>, #construct_error_> {
                        match __variant.name() {
                            #(#construct_arms)*
                            _ => #ResultFP::Err(__variant.unknown()),
                        }
                    },
                )
            )
        }
    }
}
