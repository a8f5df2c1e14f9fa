use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Generics, ImplGenerics, Path, Token, Type, TypeGenerics, punctuated::Punctuated};

use super::{TypeAttributes, TypeParser};
use crate::utils::StringExpr;

/// What every derive kind shares: the crate path, the type attributes and
/// the type's naming.
pub(crate) struct ReflectMeta<'a> {
    vc_marshal_path: Path,
    attrs: TypeAttributes,
    type_parser: TypeParser<'a>,
    // `syn::Type` is not `Ord`, and the where clause must come out in the
    // same order on every build.
    active_types: HashSet<Type, FixedState>,
}

impl<'a> ReflectMeta<'a> {
    #[inline]
    pub fn new(attrs: TypeAttributes, type_parser: TypeParser<'a>) -> Self {
        Self {
            attrs,
            type_parser,
            vc_marshal_path: crate::path::vc_marshal(),
            active_types: HashSet::default(),
        }
    }

    /// Records the field types, which get `Reflect + Typed` bounds when
    /// they mention a type parameter.
    #[inline]
    pub(super) fn set_active_types(&mut self, active_types: HashSet<Type, FixedState>) {
        self.active_types = active_types;
    }

    #[inline]
    pub fn vc_marshal_path(&self) -> &Path {
        &self.vc_marshal_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn generics(&self) -> &'a Generics {
        self.type_parser.generics()
    }

    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.type_parser.impl_with_generic()
    }

    #[inline]
    pub fn real_ident(&self) -> TokenStream {
        self.type_parser.real_ident()
    }

    #[inline]
    pub fn module_path(&self) -> Option<StringExpr> {
        self.type_parser.module_path()
    }

    #[inline]
    pub fn type_ident(&self) -> StringExpr {
        self.type_parser.type_ident()
    }

    #[inline]
    pub fn type_name(&self) -> StringExpr {
        self.type_parser.type_name(&self.vc_marshal_path)
    }

    #[inline]
    pub fn type_path(&self) -> StringExpr {
        self.type_parser.type_path(&self.vc_marshal_path)
    }

    #[inline]
    pub fn type_name_into_owned(&self) -> TokenStream {
        self.type_name().into_owned(&self.vc_marshal_path)
    }

    #[inline]
    pub fn type_path_into_owned(&self) -> TokenStream {
        self.type_path().into_owned(&self.vc_marshal_path)
    }

    /// Returns `impl_generics`, `ty_generics` and the where clause.
    ///
    /// ```ignore
    /// let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);
    ///
    /// quote! {
    ///     impl #impl_generics TraitName for #real_ident #ty_generics #where_clause {
    ///         /* ... */
    ///     }
    /// }
    /// ```
    ///
    /// Bounds added for generic types:
    ///
    /// - `Self: Any + Send + Sync` with type parameters, `Self: 'static`
    ///   with only lifetimes.
    /// - `T: TypePath` for each type parameter, unless both `TypePath` and
    ///   `Typed` are written by hand.
    /// - `FieldTy: Reflect + Typed` for field types mentioning a type
    ///   parameter, when `add_reflect_typed` is set. Every impl except
    ///   `TypePath` needs them, since `Reflect` requires `Typed`.
    pub fn split_generics(
        &self,
        add_reflect_typed: bool,
    ) -> (ImplGenerics<'_>, TypeGenerics<'_>, TokenStream) {
        use crate::path::fp::{AnyFP, SendFP, SyncFP};

        let add_type_path =
            self.attrs.impl_switchs.impl_type_path || self.attrs.impl_switchs.impl_typed;

        let generics = self.generics();

        let mut generic_where_clause = quote! { where };

        if generics.type_params().next().is_some() {
            generic_where_clause.extend(quote! { Self: #AnyFP + #SendFP + #SyncFP, });
        } else if generics.lifetimes().next().is_some() {
            generic_where_clause.extend(quote! { Self: 'static, });
        }

        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        if let Some(where_clause) = where_clause {
            let predicates = where_clause.predicates.iter();
            generic_where_clause.extend(quote! { #(#predicates,)* });
        }

        let mut predicates: Punctuated<TokenStream, Token![,]> = Punctuated::new();

        if add_type_path {
            predicates.extend(self.type_path_predicates());
        }

        if add_reflect_typed {
            predicates.extend(self.field_type_predicates());
        }

        generic_where_clause.extend(quote! { #predicates });

        (impl_generics, ty_generics, generic_where_clause)
    }

    fn type_path_predicates(&self) -> impl Iterator<Item = TokenStream> + '_ {
        let type_path_ = crate::path::type_path_(&self.vc_marshal_path);
        self.generics().type_params().map(move |param| {
            let ident = &param.ident;
            quote!(#ident : #type_path_)
        })
    }

    fn field_type_predicates(&self) -> Vec<TokenStream> {
        let type_param_idents = self
            .generics()
            .type_params()
            .map(|type_param| type_param.ident.clone())
            .collect::<Vec<syn::Ident>>();

        if type_param_idents.is_empty() || self.active_types.is_empty() {
            return Vec::new();
        }

        let reflect_ = crate::path::reflect_(&self.vc_marshal_path);
        let typed_ = crate::path::typed_(&self.vc_marshal_path);

        fn mentions_any(idents: &[syn::Ident], token_stream: TokenStream) -> bool {
            token_stream.into_iter().any(|token_tree| match token_tree {
                proc_macro2::TokenTree::Ident(ident) => idents.contains(&ident),
                proc_macro2::TokenTree::Group(group) => mentions_any(idents, group.stream()),
                _ => false,
            })
        }

        self.active_types
            .iter()
            .filter(|ty| mentions_any(&type_param_idents, ty.to_token_stream()))
            .map(|ty| quote!(#ty: #reflect_ + #typed_))
            .collect()
    }
}

pub(crate) struct FixedHasher(u64);

impl core::hash::Hasher for FixedHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 = self.0.rotate_right(8).wrapping_add(*b as u64)
        }
        for b in bytes {
            self.0 = self.0.rotate_right(7).wrapping_add((*b % 41) as u64)
        }
    }
}

/// Hash state with no per-process seed, so iterating `active_types` gives
/// the same where clause on every compilation.
#[derive(Copy, Clone, Default)]
pub(crate) struct FixedState;

impl core::hash::BuildHasher for FixedState {
    type Hasher = FixedHasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        FixedHasher(0)
    }
}
