use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitBool, LitStr, Path, PathArguments};

use super::set_once;
use crate::REFLECT_ATTRIBUTE_NAME;

/// Which traits the derive implements itself.
#[derive(Clone, Copy)]
pub(crate) struct ImplSwitchs {
    pub impl_type_path: bool,
    pub impl_typed: bool,
}

impl Default for ImplSwitchs {
    fn default() -> Self {
        Self {
            impl_type_path: true,
            impl_typed: true,
        }
    }
}

/// Type-level `#[reflect(...)]` attributes.
#[derive(Default, Clone)]
pub(crate) struct TypeAttributes {
    /// `type_path = "a::b::Name"`, without generics.
    pub type_path: Option<Path>,
    pub auto_register: Option<Span>,
    pub dispatch: Option<Span>,
    pub impl_switchs: ImplSwitchs,
}

impl TypeAttributes {
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

        if meta.path.is_ident("type_path") {
            let lit: LitStr = meta.value()?.parse()?;
            let path = parse_custom_path(&lit)?;
            set_once(&mut self.type_path, path, span, "type_path")
        } else if meta.path.is_ident("auto_register") {
            set_once(&mut self.auto_register, span, span, "auto_register")
        } else if meta.path.is_ident("dispatch") {
            set_once(&mut self.dispatch, span, span, "dispatch")
        } else if meta.path.is_ident("TypePath") {
            self.impl_switchs.impl_type_path = parse_switch(meta)?;
            Ok(())
        } else if meta.path.is_ident("Typed") {
            self.impl_switchs.impl_typed = parse_switch(meta)?;
            Ok(())
        } else {
            Err(meta.error(
                "unknown type attribute, expected one of `type_path`, `auto_register`, `dispatch`, `TypePath`, `Typed`",
            ))
        }
    }
}

fn parse_switch(meta: &ParseNestedMeta) -> syn::Result<bool> {
    let lit: LitBool = meta.value()?.parse()?;
    Ok(lit.value)
}

fn parse_custom_path(lit: &LitStr) -> syn::Result<Path> {
    let path: Path = lit.parse()?;

    if path.leading_colon.is_some() {
        return Err(syn::Error::new(lit.span(), "`type_path` must not start with `::`"));
    }
    if path.segments.len() < 2 {
        return Err(syn::Error::new(
            lit.span(),
            "`type_path` needs a module prefix, e.g. `my_crate::Foo`",
        ));
    }
    if path
        .segments
        .iter()
        .any(|segment| !matches!(segment.arguments, PathArguments::None))
    {
        return Err(syn::Error::new(
            lit.span(),
            "`type_path` must not contain generics, they are appended automatically",
        ));
    }

    Ok(path)
}
