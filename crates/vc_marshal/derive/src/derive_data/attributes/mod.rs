//! Parsing of `#[reflect(...)]` on types, fields and variants.

mod field_attributes;
mod type_attributes;
mod variant_attributes;

pub(crate) use field_attributes::FieldAttributes;
pub(crate) use type_attributes::TypeAttributes;
pub(crate) use variant_attributes::VariantAttributes;

use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::{LitStr, Path};

/// Stores `value`, refusing a second occurrence of the same attribute.
fn set_once<T>(slot: &mut Option<T>, value: T, span: Span, name: &str) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new(span, format!("duplicate `{name}` attribute")));
    }
    *slot = Some(value);
    Ok(())
}

/// Parses `name = "some::path"`.
fn parse_path_value(meta: &ParseNestedMeta) -> syn::Result<Path> {
    let lit: LitStr = meta.value()?.parse()?;
    lit.parse()
}

/// Parses `name = "text"`, refusing empty strings.
fn parse_key_value(meta: &ParseNestedMeta) -> syn::Result<LitStr> {
    let lit: LitStr = meta.value()?.parse()?;
    if lit.value().is_empty() {
        return Err(syn::Error::new(lit.span(), "expected a non-empty string"));
    }
    Ok(lit)
}
