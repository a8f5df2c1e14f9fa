use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Field, Member};

use super::{FieldAttributes, ReflectMeta};
use crate::path::fp::ResultFP;

// -----------------------------------------------------------------------------
// StructField

/// One field of a struct or of an enum variant.
pub(crate) struct StructField<'a> {
    pub data: &'a Field,
    pub attrs: FieldAttributes,
    /// Declaration index.
    pub index: usize,
}

impl StructField<'_> {
    /// The declared name (raw prefix stripped), or the index for tuple fields.
    pub fn name(&self) -> String {
        match &self.data.ident {
            Some(ident) => ident.unraw().to_string(),
            None => self.index.to_string(),
        }
    }

    /// `self.name` or `self.0` syntax.
    pub fn member(&self) -> Member {
        match &self.data.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(self.index.into()),
        }
    }

    /// The `__field_N` binding used in match patterns.
    pub fn binding(&self) -> syn::Ident {
        quote::format_ident!("__field_{}", self.index)
    }

    /// `NamedField::new::<T>("name")` plus its builder calls.
    pub fn to_named_info_tokens(&self, vc_marshal_path: &syn::Path) -> TokenStream {
        let named_field_ = crate::path::named_field_(vc_marshal_path);
        let ty = &self.data.ty;
        let name = self.name();
        let builders = self.attrs.field_builder_tokens(ty, vc_marshal_path);

        quote! {
            #named_field_::new::<#ty>(#name) #builders
        }
    }

    /// `UnnamedField::new::<T>(index)`.
    pub fn to_unnamed_info_tokens(&self, vc_marshal_path: &syn::Path) -> TokenStream {
        let unnamed_field_ = crate::path::unnamed_field_(vc_marshal_path);
        let ty = &self.data.ty;
        let index = self.index;

        quote! {
            #unnamed_field_::new::<#ty>(#index)
        }
    }
}

/// `.with_policy(FieldPolicy::new()...)`, empty when no field carries a
/// skip or rename rule.
pub(crate) fn with_policy_tokens(fields: &[StructField], vc_marshal_path: &syn::Path) -> TokenStream {
    let rules: TokenStream = fields
        .iter()
        .map(|field| field.attrs.policy_tokens(&field.name(), vc_marshal_path))
        .collect();

    if rules.is_empty() {
        return crate::utils::empty();
    }

    let field_policy_ = crate::path::field_policy_(vc_marshal_path);
    quote! {
        .with_policy(#field_policy_::new() #rules)
    }
}

/// The body of a constructor taking a `DynamicStruct` named `__fields`:
/// `Self { a: __fields.take::<A>("a")?, .. }` with `path` as the
/// constructor path.
pub(crate) fn take_named_fields(path: TokenStream, fields: &[StructField]) -> TokenStream {
    let members = fields.iter().map(StructField::member);
    let names = fields.iter().map(StructField::name);
    let types = fields.iter().map(|field| &field.data.ty);

    quote! {
        #path {
            #(#members: __fields.take::<#types>(#names)?,)*
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectStruct

/// A struct with named fields, or a unit struct.
pub(crate) struct ReflectStruct<'a> {
    meta: ReflectMeta<'a>,
    fields: Vec<StructField<'a>>,
}

impl<'a> ReflectStruct<'a> {
    pub fn new(meta: ReflectMeta<'a>, fields: Vec<StructField<'a>>) -> Self {
        let mut val = Self { meta, fields };

        let active_types = val.fields.iter().map(|f| f.data.ty.clone()).collect();
        val.meta.set_active_types(active_types);

        val
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    /// Generates the `TypeInfo::Struct(..)` expression.
    pub fn to_info_tokens(&self) -> TokenStream {
        let vc_marshal_path = self.meta.vc_marshal_path();

        let type_info_ = crate::path::type_info_(vc_marshal_path);
        let struct_info_ = crate::path::struct_info_(vc_marshal_path);
        let dynamic_struct_ = crate::path::dynamic_struct_(vc_marshal_path);
        let construct_error_ = crate::path::construct_error_(vc_marshal_path);
        let reflect_ = crate::path::reflect_(vc_marshal_path);
        let macro_utils_ = crate::path::macro_utils_(vc_marshal_path);

        let fields = self
            .fields
            .iter()
            .map(|field| field.to_named_info_tokens(vc_marshal_path));
        let with_policy = with_policy_tokens(&self.fields, vc_marshal_path);

        let input = if self.fields.is_empty() {
            quote!(_)
        } else {
            quote!(mut __fields)
        };
        let value = take_named_fields(quote!(Self), &self.fields);

        quote! {
            #type_info_::Struct(
                #struct_info_::new::<Self>(
                    &[ #(#fields),* ],
                    |#input: #dynamic_struct_| -> #ResultFP<#macro_utils_::Box<dyn #reflect_>, #construct_error_> {
                        #ResultFP::Ok(#reflect_::into_boxed_reflect(#value))
                    },
                )
                #with_policy
            )
        }
    }
}

