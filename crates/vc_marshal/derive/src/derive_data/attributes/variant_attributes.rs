use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use super::{parse_key_value, set_once};
use crate::REFLECT_ATTRIBUTE_NAME;

/// Variant-level `#[reflect(...)]` attributes.
#[derive(Default)]
pub(crate) struct VariantAttributes {
    /// The tag written instead of the variant name.
    pub rename: Option<LitStr>,
    /// The mapping key that selects a dispatch member.
    pub key: Option<LitStr>,
}

impl VariantAttributes {
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

        if meta.path.is_ident("rename") {
            set_once(&mut self.rename, parse_key_value(meta)?, span, "rename")
        } else if meta.path.is_ident("key") {
            set_once(&mut self.key, parse_key_value(meta)?, span, "key")
        } else {
            Err(meta.error("unknown variant attribute, expected `rename` or `key`"))
        }
    }
}
