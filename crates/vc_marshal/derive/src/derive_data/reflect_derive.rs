use syn::spanned::Spanned;
use syn::{Data, DataEnum, DeriveInput, Field, Fields, LitStr};

use super::reflect_dispatch::DispatchMember;
use super::reflect_enum::{EnumVariant, EnumVariantFields};
use super::{FieldAttributes, ReflectDispatch, ReflectEnum, ReflectMeta, ReflectStruct};
use super::{StructField, TypeAttributes, TypeParser, VariantAttributes};
use crate::REFLECT_ATTRIBUTE_NAME;

/// The parsed input of `#[derive(Reflect)]`, by kind.
pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>),
    Enum(ReflectEnum<'a>),
    Dispatch(ReflectDispatch<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let type_parser = TypeParser::new_local(&input.ident, attrs.type_path.clone(), &input.generics);
        let dispatch = attrs.dispatch;
        let meta = ReflectMeta::new(attrs, type_parser);

        match &input.data {
            Data::Struct(data) => {
                if let Some(span) = dispatch {
                    return Err(syn::Error::new(span, "`dispatch` only applies to enums"));
                }
                let fields = match &data.fields {
                    Fields::Named(fields) => collect_named_fields(fields.named.iter())?,
                    Fields::Unit => Vec::new(),
                    Fields::Unnamed(fields) => {
                        return Err(syn::Error::new(
                            fields.span(),
                            "tuple structs cannot be described, use named fields",
                        ));
                    }
                };
                Ok(Self::Struct(ReflectStruct::new(meta, fields)))
            }
            Data::Enum(data) => {
                if data.variants.is_empty() {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "enums without variants cannot be described",
                    ));
                }
                if dispatch.is_some() {
                    Ok(Self::Dispatch(ReflectDispatch::new(meta, collect_members(data)?)))
                } else {
                    Ok(Self::Enum(ReflectEnum::new(meta, collect_variants(data)?)))
                }
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span(),
                "unions cannot be described",
            )),
        }
    }
}

fn collect_named_fields<'a>(
    fields: impl Iterator<Item = &'a Field>,
) -> syn::Result<Vec<StructField<'a>>> {
    fields
        .enumerate()
        .map(|(index, data)| {
            Ok(StructField {
                data,
                attrs: FieldAttributes::parse_attrs(&data.attrs)?,
                index,
            })
        })
        .collect()
}

/// Tuple fields are addressed by position only and take no attributes.
fn collect_unnamed_fields<'a>(
    fields: impl Iterator<Item = &'a Field>,
) -> syn::Result<Vec<StructField<'a>>> {
    fields
        .enumerate()
        .map(|(index, data)| {
            if let Some(attr) = reflect_attribute(data) {
                return Err(syn::Error::new(
                    attr.span(),
                    "field attributes are only supported on named fields",
                ));
            }
            Ok(StructField {
                data,
                attrs: FieldAttributes::default(),
                index,
            })
        })
        .collect()
}

fn reflect_attribute(field: &Field) -> Option<&syn::Attribute> {
    field
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident(REFLECT_ATTRIBUTE_NAME))
}

fn collect_variants(data: &DataEnum) -> syn::Result<Vec<EnumVariant<'_>>> {
    data.variants
        .iter()
        .enumerate()
        .map(|(index, variant)| {
            let attrs = VariantAttributes::parse_attrs(&variant.attrs)?;
            if let Some(key) = &attrs.key {
                return Err(syn::Error::new(
                    key.span(),
                    "`key` only applies to variants of `#[reflect(dispatch)]` enums",
                ));
            }

            let fields = match &variant.fields {
                Fields::Named(fields) => {
                    EnumVariantFields::Named(collect_named_fields(fields.named.iter())?)
                }
                Fields::Unnamed(fields) => {
                    EnumVariantFields::Unnamed(collect_unnamed_fields(fields.unnamed.iter())?)
                }
                Fields::Unit => EnumVariantFields::Unit,
            };

            Ok(EnumVariant {
                data: variant,
                fields,
                attrs,
                index,
            })
        })
        .collect()
}

fn collect_members(data: &DataEnum) -> syn::Result<Vec<DispatchMember<'_>>> {
    data.variants
        .iter()
        .map(|variant| {
            let attrs = VariantAttributes::parse_attrs(&variant.attrs)?;
            if let Some(rename) = &attrs.rename {
                return Err(syn::Error::new(
                    rename.span(),
                    "dispatch variants write no tag, `rename` has no effect",
                ));
            }
            let key = attrs
                .key
                .unwrap_or_else(|| LitStr::new(&variant.ident.to_string(), variant.ident.span()));

            let member = match &variant.fields {
                Fields::Unnamed(fields) if fields.unnamed.len() == 1 => &fields.unnamed[0],
                _ => {
                    return Err(syn::Error::new(
                        variant.span(),
                        "dispatch variants must wrap exactly one type, e.g. `Circle(Circle)`",
                    ));
                }
            };
            if let Some(attr) = reflect_attribute(member) {
                return Err(syn::Error::new(
                    attr.span(),
                    "dispatch members take no field attributes",
                ));
            }

            Ok(DispatchMember {
                ident: &variant.ident,
                ty: &member.ty,
                key,
            })
        })
        .collect()
}
