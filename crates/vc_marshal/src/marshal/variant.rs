//! Variant resolution for enums and dispatch types.
//!
//! Candidates are tried in declaration order and each one checks the full
//! shape it needs on its own:
//!
//! - unit: a string scalar equal to the tag;
//! - tuple: a mapping holding the tag, whose value is a tuple or sequence;
//! - struct: a mapping holding the tag, whose value is a mapping.
//!
//! The first candidate whose tag matches decides. A payload of the wrong
//! shape under a matching tag is an error, not a reason to try the next
//! candidate.

use alloc::boxed::Box;
use alloc::vec::Vec;

use super::decoder::{expect_mapping, shape_error};
use super::{DecodeDriver, DecodeError, DecodeErrorKind, DecodeProcessor, PathSegment};
use crate::Reflect;
use crate::info::{DispatchInfo, EnumInfo, StructVariantInfo, TupleVariantInfo, VariantInfo};
use crate::ops::{DynamicTuple, DynamicVariant};
use crate::value::Value;

/// Returns the payload stored under `tag` if `value` is a mapping holding it.
fn tagged<'v>(value: &'v Value, tag: &str) -> Option<&'v Value> {
    value.as_mapping()?.get(tag)
}

impl<P: DecodeProcessor> DecodeDriver<'_, P> {
    pub(super) fn decode_enum(
        &mut self,
        info: &'static EnumInfo,
        value: &Value,
    ) -> Result<Box<dyn Reflect>, DecodeError> {
        for variant in info.iter() {
            let decoded = match variant {
                VariantInfo::Unit(unit) => {
                    if value.as_str() != Some(unit.tag()) {
                        continue;
                    }
                    DynamicVariant::unit(unit.name())
                }
                VariantInfo::Tuple(tuple) => {
                    let Some(payload) = tagged(value, tuple.tag()) else {
                        continue;
                    };
                    self.decode_tuple_variant(tuple, payload)
                        .map_err(|err| err.within(PathSegment::Variant(tuple.tag())))?
                }
                VariantInfo::Struct(structure) => {
                    let Some(payload) = tagged(value, structure.tag()) else {
                        continue;
                    };
                    self.decode_struct_variant(structure, payload)
                        .map_err(|err| err.within(PathSegment::Variant(structure.tag())))?
                }
            };

            crate::cfg::debug! {
                log::trace!("`{}` resolved to variant `{}`", info.type_path(), variant.name());
            }

            return Ok(info.construct(decoded)?);
        }

        Err(DecodeErrorKind::NoMatchingVariant {
            type_path: info.type_path(),
        }
        .into())
    }

    fn decode_tuple_variant(
        &mut self,
        info: &'static TupleVariantInfo,
        payload: &Value,
    ) -> Result<DynamicVariant, DecodeError> {
        let items = payload
            .as_items()
            .ok_or_else(|| shape_error("Tuple or Sequence", payload))?;

        if items.len() != info.field_len() {
            return Err(DecodeErrorKind::ArityMismatch {
                expected: info.field_len(),
                found: items.len(),
            }
            .into());
        }

        let items = info
            .iter()
            .zip(items)
            .map(|(field, item)| {
                self.decode_value(field.type_info(), item)
                    .map_err(|err| err.within(PathSegment::Index(field.index())))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DynamicVariant::tuple(info.name(), DynamicTuple::from_items(items)))
    }

    fn decode_struct_variant(
        &mut self,
        info: &'static StructVariantInfo,
        payload: &Value,
    ) -> Result<DynamicVariant, DecodeError> {
        let mapping = expect_mapping(payload)?;
        let fields = self.decode_fields(info.iter().as_slice(), info.policy(), mapping)?;
        Ok(DynamicVariant::structure(info.name(), fields))
    }

    /// Decodes the whole mapping as the first member whose key is present.
    pub(super) fn decode_dispatch(
        &mut self,
        info: &'static DispatchInfo,
        value: &Value,
    ) -> Result<Box<dyn Reflect>, DecodeError> {
        let mapping = expect_mapping(value)?;

        let Some(candidate) = info.iter().find(|candidate| mapping.contains_key(candidate.key())) else {
            return Err(DecodeErrorKind::NoMatchingVariant {
                type_path: info.type_path(),
            }
            .into());
        };

        crate::cfg::debug! {
            log::trace!("`{}` dispatched to `{}` by key `{}`", info.type_path(), candidate.name(), candidate.key());
        }

        let member = self
            .decode_value(candidate.type_info(), value)
            .map_err(|err| err.within(PathSegment::Variant(candidate.name())))?;
        Ok(candidate.wrap(member)?)
    }
}
