//! Parsing of the macro inputs into the models the generators read.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod define_parser;
mod reflect_derive;
mod reflect_dispatch;
mod reflect_enum;
mod reflect_meta;
mod reflect_struct;
mod reflect_type_parser;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes, VariantAttributes};

pub(crate) use define_parser::ReflectTypePathParser;
pub(crate) use reflect_type_parser::TypeParser;

pub(crate) use reflect_derive::ReflectDerive;
pub(crate) use reflect_dispatch::ReflectDispatch;
pub(crate) use reflect_enum::{EnumVariantFields, ReflectEnum};
pub(crate) use reflect_meta::ReflectMeta;
pub(crate) use reflect_struct::{ReflectStruct, StructField};
