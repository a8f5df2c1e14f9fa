use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Path, Type};

use super::{parse_key_value, parse_path_value, set_once};
use crate::REFLECT_ATTRIBUTE_NAME;
use crate::path::fp::DefaultFP;

/// A `skip_if`-style predicate path.
pub(crate) struct SkipPredicate {
    pub path: Path,
    /// `fn(&Value) -> Result<bool, PredicateError>` instead of `fn(&Value) -> bool`.
    pub fallible: bool,
}

pub(crate) enum FieldDefault {
    /// `default`: uses `Default::default`.
    Trait,
    /// `default = "path"`: calls `path()`.
    Func(Path),
}

/// Field-level `#[reflect(...)]` attributes.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub skip: Option<Span>,
    pub skip_encode: Option<Span>,
    pub skip_decode: Option<Span>,
    pub skip_if: Option<SkipPredicate>,
    pub skip_decode_if: Option<SkipPredicate>,
    pub rename: Option<LitStr>,
    pub default: Option<FieldDefault>,
    pub encode_with: Option<Path>,
    pub decode_with: Option<Path>,
}

impl FieldAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| this.parse_meta(&meta))?;
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        let span = meta.path.span();
        let path = &meta.path;

        if path.is_ident("skip") {
            set_once(&mut self.skip, span, span, "skip")
        } else if path.is_ident("skip_encode") || path.is_ident("skip_serializing") {
            set_once(&mut self.skip_encode, span, span, "skip_encode")
        } else if path.is_ident("skip_decode") {
            set_once(&mut self.skip_decode, span, span, "skip_decode")
        } else if path.is_ident("skip_if") || path.is_ident("try_skip_if") {
            let predicate = SkipPredicate {
                path: parse_path_value(meta)?,
                fallible: path.is_ident("try_skip_if"),
            };
            set_once(&mut self.skip_if, predicate, span, "skip_if")
        } else if path.is_ident("skip_decode_if") {
            let predicate = SkipPredicate {
                path: parse_path_value(meta)?,
                fallible: false,
            };
            set_once(&mut self.skip_decode_if, predicate, span, "skip_decode_if")
        } else if path.is_ident("rename") {
            set_once(&mut self.rename, parse_key_value(meta)?, span, "rename")
        } else if path.is_ident("default") {
            let default = if meta.input.peek(syn::Token![=]) {
                FieldDefault::Func(parse_path_value(meta)?)
            } else {
                FieldDefault::Trait
            };
            set_once(&mut self.default, default, span, "default")
        } else if path.is_ident("encode_with") {
            set_once(&mut self.encode_with, parse_path_value(meta)?, span, "encode_with")
        } else if path.is_ident("decode_with") {
            set_once(&mut self.decode_with, parse_path_value(meta)?, span, "decode_with")
        } else {
            Err(meta.error("unknown field attribute"))
        }
    }

    /// Builder calls on `NamedField::new`, e.g. `.with_default(..)`.
    pub(crate) fn field_builder_tokens(&self, ty: &Type, vc_marshal_path: &syn::Path) -> TokenStream {
        let reflect_ = crate::path::reflect_(vc_marshal_path);
        let mut tokens = TokenStream::new();

        match &self.default {
            Some(FieldDefault::Trait) => tokens.extend(quote! {
                .with_default(|| <#ty as #reflect_>::into_boxed_reflect(<#ty as #DefaultFP>::default()))
            }),
            Some(FieldDefault::Func(func)) => tokens.extend(quote! {
                .with_default(|| <#ty as #reflect_>::into_boxed_reflect(#func()))
            }),
            None => {}
        }

        if let Some(func) = &self.encode_with {
            tokens.extend(quote!(.with_encode_with(#func)));
        }
        if let Some(func) = &self.decode_with {
            tokens.extend(quote!(.with_decode_with(#func)));
        }

        tokens
    }

    /// Chained `FieldPolicy` calls for the field named `name`, empty when
    /// the field has no skip or rename rule.
    pub(crate) fn policy_tokens(&self, name: &str, vc_marshal_path: &syn::Path) -> TokenStream {
        let skip_if_ = crate::path::skip_if_(vc_marshal_path);
        let mut tokens = TokenStream::new();

        if self.skip.is_some() {
            tokens.extend(quote!(.skip(#name)));
        } else {
            if self.skip_encode.is_some() {
                tokens.extend(quote!(.skip_encode(#name)));
            }
            if self.skip_decode.is_some() {
                tokens.extend(quote!(.skip_decode(#name)));
            }
        }

        if let Some(SkipPredicate { path, fallible }) = &self.skip_if {
            let ctor = if *fallible { quote!(fallible) } else { quote!(new) };
            tokens.extend(quote!(.skip_if(#name, #skip_if_::#ctor(#path))));
        }
        if let Some(SkipPredicate { path, .. }) = &self.skip_decode_if {
            tokens.extend(quote!(.skip_decode_if(#name, #skip_if_::new(#path))));
        }

        if let Some(key) = &self.rename {
            tokens.extend(quote!(.rename(#name, #key)));
        }

        tokens
    }
}
