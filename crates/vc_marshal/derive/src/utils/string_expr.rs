use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{LitStr, spanned::Spanned};

/// A string-valued expression in generated code.
#[derive(Clone)]
pub(crate) enum StringExpr {
    /// Known at compile time: a literal, or a macro such as `module_path!()`.
    Const(TokenStream),
    /// A `&'static str` computed at run time.
    Borrowed(TokenStream),
    /// A `String` computed at run time.
    Owned(TokenStream),
}

impl Default for StringExpr {
    fn default() -> Self {
        Self::Const("".to_token_stream())
    }
}

impl<T: ToString + Spanned> From<T> for StringExpr {
    fn from(value: T) -> Self {
        Self::Const(LitStr::new(&value.to_string(), value.span()).to_token_stream())
    }
}

impl StringExpr {
    pub fn from_lit(lit: &LitStr) -> Self {
        Self::Const(lit.to_token_stream())
    }

    pub fn from_str(string: &str) -> Self {
        Self::Const(string.to_token_stream())
    }

    /// Tokens evaluating to a `&'static str`, or a borrow of the owned string.
    pub fn into_borrowed(self) -> TokenStream {
        match self {
            Self::Const(tokens) | Self::Borrowed(tokens) => tokens,
            Self::Owned(owned) => quote! {
                &#owned as &str
            },
        }
    }

    /// Tokens evaluating to a `String`.
    pub fn into_owned(self, vc_marshal_path: &syn::Path) -> TokenStream {
        match self {
            Self::Const(tokens) | Self::Borrowed(tokens) => {
                let macro_utils_ = crate::path::macro_utils_(vc_marshal_path);
                quote! {
                    #macro_utils_::ToOwned::to_owned(#tokens)
                }
            }
            Self::Owned(owned) => owned,
        }
    }

    #[inline]
    fn is_const(&self) -> bool {
        matches!(self, Self::Const(_))
    }

    /// Concatenates the expressions.
    ///
    /// All-constant input folds into one `concat!`; anything else is joined
    /// at run time.
    pub fn from_iter<T: IntoIterator<Item = StringExpr>>(
        iter: T,
        vc_marshal_path: &syn::Path,
    ) -> Self {
        let exprs: Vec<StringExpr> = iter.into_iter().collect();

        if exprs.is_empty() {
            return Self::default();
        }

        if exprs.iter().all(StringExpr::is_const) {
            let inner = exprs.into_iter().map(|expr| match expr {
                Self::Const(tokens) | Self::Borrowed(tokens) | Self::Owned(tokens) => tokens,
            });

            Self::Const(quote! {
                ::core::concat!( #(#inner),* )
            })
        } else {
            let macro_utils_ = crate::path::macro_utils_(vc_marshal_path);
            let inner = exprs.into_iter().map(StringExpr::into_borrowed);

            Self::Owned(quote! {
                #macro_utils_::__concat(&[ #(#inner),* ])
            })
        }
    }
}
