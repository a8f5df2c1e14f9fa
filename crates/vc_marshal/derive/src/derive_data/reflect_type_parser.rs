use quote::{ToTokens, quote};
use syn::spanned::Spanned;
use syn::{GenericParam, Generics, Ident, LitStr, Path, TypeParam, punctuated::Punctuated};

use crate::utils::StringExpr;

/// Where the type path strings of a type come from.
pub(crate) enum TypeParser<'a> {
    /// Types nameable from any scope without a path, e.g. `bool`.
    Primitive(&'a Ident),
    /// A type defined at the derive site: `module_path!()` gives its module.
    Local {
        ident: &'a Ident,
        custom_path: Option<Path>,
        generics: &'a Generics,
    },
    /// A type named through `impl_type_path!(::krate::module::Name)`.
    Foreign {
        path: &'a Path,
        custom_path: Option<Path>,
        generics: &'a Generics,
    },
}

impl<'a> TypeParser<'a> {
    pub(crate) fn new_local(
        ident: &'a Ident,
        custom_path: Option<Path>,
        generics: &'a Generics,
    ) -> TypeParser<'a> {
        TypeParser::Local {
            ident,
            custom_path,
            generics,
        }
    }

    pub(crate) fn new_foreign(
        ident: &'a Ident,
        path: &'a Path,
        custom_path: Option<Path>,
        generics: &'a Generics,
    ) -> TypeParser<'a> {
        if custom_path.is_none() && path.leading_colon.is_none() {
            TypeParser::Primitive(ident)
        } else {
            TypeParser::Foreign {
                path,
                custom_path,
                generics,
            }
        }
    }

    pub(super) fn generics(&self) -> &'a Generics {
        const EMPTY_GENERICS: &Generics = &Generics {
            gt_token: None,
            lt_token: None,
            where_clause: None,
            params: Punctuated::new(),
        };

        match self {
            Self::Local { generics, .. } | Self::Foreign { generics, .. } => generics,
            Self::Primitive(_) => EMPTY_GENERICS,
        }
    }

    /// Whether the type has non-lifetime generic parameters, so its strings
    /// must be built per instantiation.
    pub(super) fn impl_with_generic(&self) -> bool {
        !self
            .generics()
            .params
            .iter()
            .all(|param| matches!(param, GenericParam::Lifetime(_)))
    }

    /// The type as written in `impl ... for #real_ident`.
    pub(super) fn real_ident(&self) -> proc_macro2::TokenStream {
        match self {
            Self::Local { ident, .. } | Self::Primitive(ident) => ident.to_token_stream(),
            Self::Foreign { path, .. } => path.to_token_stream(),
        }
    }

    /// The last segment of the (custom) path.
    fn get_ident(&self) -> &Ident {
        match self {
            Self::Primitive(ident) => ident,
            Self::Local {
                ident, custom_path, ..
            } => custom_path
                .as_ref()
                .and_then(|path| path.segments.last())
                .map_or(*ident, |segment| &segment.ident),
            Self::Foreign {
                path, custom_path, ..
            } => {
                &custom_path
                    .as_ref()
                    .unwrap_or(path)
                    .segments
                    .last()
                    .expect("a parsed path has at least one segment")
                    .ident
            }
        }
    }

    fn get_path(&self) -> Option<&Path> {
        match self {
            Self::Local { custom_path, .. } => custom_path.as_ref(),
            Self::Foreign {
                path, custom_path, ..
            } => Some(custom_path.as_ref().unwrap_or(path)),
            Self::Primitive(_) => None,
        }
    }

    pub(super) fn module_path(&self) -> Option<StringExpr> {
        if let Some(path) = self.get_path() {
            let module = path
                .segments
                .iter()
                .take(path.segments.len().saturating_sub(1))
                .map(|segment| segment.ident.to_string())
                .collect::<Vec<_>>()
                .join("::");

            if !module.is_empty() {
                return Some(StringExpr::from_lit(&LitStr::new(&module, path.span())));
            }
        }

        match self {
            Self::Local { .. } => Some(StringExpr::Const(quote! {
                ::core::module_path!()
            })),
            _ => None,
        }
    }

    pub(super) fn type_ident(&self) -> StringExpr {
        StringExpr::from(self.get_ident())
    }

    /// Joins the type and const parameters with `", "`, mapping each type
    /// parameter through `ty_generic_fn`.
    fn reduce_generics(
        generics: &Generics,
        mut ty_generic_fn: impl FnMut(&TypeParam) -> StringExpr,
        vc_marshal_path: &Path,
    ) -> StringExpr {
        let macro_utils_ = crate::path::macro_utils_(vc_marshal_path);

        let mut params = generics.params.iter().filter_map(|param| match param {
            GenericParam::Type(type_param) => Some(ty_generic_fn(type_param)),
            GenericParam::Const(const_param) => {
                let ident = &const_param.ident;
                let ty = &const_param.ty;

                Some(StringExpr::Owned(quote! {
                    <#ty as #macro_utils_::ToString>::to_string(&#ident)
                }))
            }
            GenericParam::Lifetime(_) => None,
        });

        let first = params.next().into_iter();

        StringExpr::from_iter(
            first.chain(params.flat_map(|x| [StringExpr::from_str(", "), x])),
            vc_marshal_path,
        )
    }

    /// `Option<PhantomData>` for `core::option::Option<core::marker::PhantomData>`.
    pub(super) fn type_name(&self, vc_marshal_path: &Path) -> StringExpr {
        match self {
            Self::Primitive(ident) => StringExpr::from(ident),
            Self::Local { generics, .. } | Self::Foreign { generics, .. } => {
                let type_ident = self.type_ident();

                if !self.impl_with_generic() {
                    return type_ident;
                }

                let type_path_ = crate::path::type_path_(vc_marshal_path);
                let generics = TypeParser::reduce_generics(
                    generics,
                    |TypeParam { ident, .. }| {
                        StringExpr::Borrowed(quote! {
                            <#ident as #type_path_>::type_name()
                        })
                    },
                    vc_marshal_path,
                );

                StringExpr::from_iter(
                    [
                        type_ident,
                        StringExpr::from_str("<"),
                        generics,
                        StringExpr::from_str(">"),
                    ],
                    vc_marshal_path,
                )
            }
        }
    }

    /// `core::option::Option<core::marker::PhantomData>` for the same type.
    pub(super) fn type_path(&self, vc_marshal_path: &Path) -> StringExpr {
        let Some(module_path) = self.module_path() else {
            return self.type_ident();
        };

        let generics = match self {
            Self::Local { generics, .. } | Self::Foreign { generics, .. } => *generics,
            Self::Primitive(_) => return self.type_ident(),
        };

        let mut parts = Vec::from([module_path, StringExpr::from_str("::"), self.type_ident()]);

        if self.impl_with_generic() {
            let type_path_ = crate::path::type_path_(vc_marshal_path);
            parts.push(StringExpr::from_str("<"));
            parts.push(TypeParser::reduce_generics(
                generics,
                |TypeParam { ident, .. }| {
                    StringExpr::Borrowed(quote! {
                        <#ident as #type_path_>::type_path()
                    })
                },
                vc_marshal_path,
            ));
            parts.push(StringExpr::from_str(">"));
        }

        StringExpr::from_iter(parts, vc_marshal_path)
    }
}
