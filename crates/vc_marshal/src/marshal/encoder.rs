use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;

use super::{EncodeError, EncodeErrorKind, EncodeProcessor, PathSegment};
use crate::Reflect;
use crate::info::{NamedField, TypeInfo, VariantInfo};
use crate::ops::{Dispatch, Enum, List, Map, ReflectRef, Struct, Tuple};
use crate::policy::FieldPolicy;
use crate::registry::TypeRegistry;
use crate::value::{Mapping, Value};

// -----------------------------------------------------------------------------
// EncodeDriver

/// Encodes reflected values into value trees, without type information.
///
/// # Encoding Rules
///
/// Every value is encoded in this priority order:
///
/// 1. **Processor**: the [`EncodeProcessor`], if one is provided.
/// 2. **Descriptor**: the default encoding of its [`TypeInfo`]:
///    - struct: a mapping of field name to encoded field, in declaration
///      order, then the field policy (skip, skip-if, rename);
///    - enum: a unit variant becomes its tag, a tuple variant
///      `{tag: (items..)}`, a struct variant `{tag: {fields..}}`;
///    - list, tuple, map, option: element-wise, in container order;
///    - dispatch: the active member;
///    - opaque: the leaf's own scalar.
///
/// Every visited type must be registered.
///
/// # Examples
///
/// ```
/// # use vc_marshal::{derive::Reflect, marshal::EncodeDriver, registry::TypeRegistry};
/// #[derive(Reflect)]
/// enum Name {
///     #[reflect(rename = "None")]
///     Anonymous,
///     First(String),
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Name>().unwrap();
///
/// let driver = EncodeDriver::new(&registry);
///
/// let tree = driver.encode(&Name::Anonymous).unwrap();
/// assert_eq!(serde_json::to_string(&tree).unwrap(), r#""None""#);
///
/// let tree = driver.encode(&Name::First("Alice".into())).unwrap();
/// assert_eq!(serde_json::to_string(&tree).unwrap(), r#"{"First":["Alice"]}"#);
/// ```
pub struct EncodeDriver<'a, P: EncodeProcessor = ()> {
    registry: &'a TypeRegistry,
    processor: Option<&'a P>,
}

impl<'a> EncodeDriver<'a, ()> {
    /// Creates an encoder with no processor.
    #[inline]
    pub const fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            processor: None,
        }
    }
}

impl<'a, P: EncodeProcessor> EncodeDriver<'a, P> {
    /// Creates an encoder with a processor.
    #[inline]
    pub const fn with_processor(registry: &'a TypeRegistry, processor: &'a P) -> Self {
        Self {
            registry,
            processor: Some(processor),
        }
    }

    /// Encodes `value`.
    ///
    /// The path of a returned error starts with the name of `value`'s type.
    pub fn encode(&self, value: &dyn Reflect) -> Result<Value, EncodeError> {
        self.encode_value(value)
            .map_err(|err| err.within(PathSegment::Type(value.reflect_type_name())))
    }

    fn encode_value(&self, value: &dyn Reflect) -> Result<Value, EncodeError> {
        if let Some(processor) = self.processor
            && let Some(result) = processor.try_encode(value, self.registry)
        {
            return result.map_err(EncodeError::new);
        }

        let info = value.reflect_type_info();
        if !self.registry.contains(info.type_id()) {
            return Err(EncodeErrorKind::Unregistered {
                type_path: info.type_path(),
            }
            .into());
        }

        crate::cfg::debug! {
            log::trace!("encode `{}` as {}", info.type_path(), info.kind());
        }

        match value.reflect_ref() {
            ReflectRef::Struct(record) => self.encode_struct(record, info),
            ReflectRef::Enum(record) => self.encode_enum(record, info),
            ReflectRef::List(list) => self.encode_list(list),
            ReflectRef::Tuple(tuple) => self.encode_tuple(tuple),
            ReflectRef::Map(map) => self.encode_map(map),
            ReflectRef::Option(None) => Ok(Value::NULL),
            ReflectRef::Option(Some(inner)) => self.encode_value(inner),
            ReflectRef::Dispatch(dispatch) => self.encode_dispatch(dispatch, info),
            ReflectRef::Opaque(leaf) => Ok(leaf.to_value()),
        }
    }

    fn encode_struct(&self, record: &dyn Struct, info: &TypeInfo) -> Result<Value, EncodeError> {
        let info = info.as_struct().map_err(descriptor_error)?;
        let mapping = self.encode_fields(
            info.iter().map(|field| (field, record.field(field.name()))),
            info.policy(),
        )?;
        Ok(Value::Mapping(mapping))
    }

    fn encode_enum(&self, record: &dyn Enum, info: &TypeInfo) -> Result<Value, EncodeError> {
        let info = info.as_enum().map_err(descriptor_error)?;
        let variant = info.variant_at(record.variant_index()).ok_or_else(|| {
            EncodeErrorKind::Custom(format!(
                "variant `{}` is not described by `{}`",
                record.variant_name(),
                info.type_path(),
            ))
        })?;

        let tag = variant.tag();
        let payload = match variant {
            VariantInfo::Unit(_) => return Ok(Value::from(tag)),
            VariantInfo::Tuple(_) => {
                let items = (0..record.field_len())
                    .map(|index| self.encode_item(index, record.field_at(index)))
                    .collect::<Result<Vec<_>, _>>();
                items.map(Value::Tuple)
            }
            VariantInfo::Struct(variant) => self
                .encode_fields(
                    variant.iter().map(|field| (field, record.field(field.name()))),
                    variant.policy(),
                )
                .map(Value::Mapping),
        }
        .map_err(|err| err.within(PathSegment::Variant(tag)))?;

        let mut mapping = Mapping::with_capacity(1);
        mapping.insert(tag, payload);
        Ok(Value::Mapping(mapping))
    }

    fn encode_list(&self, list: &dyn List) -> Result<Value, EncodeError> {
        let items = list
            .iter()
            .enumerate()
            .map(|(index, item)| self.encode_item(index, Some(item)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Sequence(items))
    }

    fn encode_tuple(&self, tuple: &dyn Tuple) -> Result<Value, EncodeError> {
        let items = (0..tuple.field_len())
            .map(|index| self.encode_item(index, tuple.field(index)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Tuple(items))
    }

    fn encode_map(&self, map: &dyn Map) -> Result<Value, EncodeError> {
        let mut mapping = Mapping::with_capacity(map.len());
        for (key, value) in map.iter() {
            let segment = || PathSegment::Key(format!("{key:?}"));
            let encoded_key = self.encode_value(key).map_err(|err| err.within(segment()))?;
            let encoded = self.encode_value(value).map_err(|err| err.within(segment()))?;
            if mapping.get_key(&encoded_key).is_some() {
                return Err(EncodeError::new(EncodeErrorKind::DuplicateKey {
                    key: encoded_key.to_string(),
                })
                .within(segment()));
            }
            mapping.insert(encoded_key, encoded);
        }
        Ok(Value::Mapping(mapping))
    }

    fn encode_dispatch(&self, dispatch: &dyn Dispatch, info: &TypeInfo) -> Result<Value, EncodeError> {
        let info = info.as_dispatch().map_err(descriptor_error)?;
        let name = info
            .candidate(dispatch.member_name())
            .map(|candidate| candidate.name());

        self.encode_value(dispatch.member()).map_err(|err| match name {
            Some(name) => err.within(PathSegment::Variant(name)),
            None => err,
        })
    }

    fn encode_item(&self, index: usize, item: Option<&dyn Reflect>) -> Result<Value, EncodeError> {
        let item = item.ok_or_else(|| EncodeErrorKind::Custom(format!("missing item {index}")))?;
        self.encode_value(item)
            .map_err(|err| err.within(PathSegment::Index(index)))
    }

    /// Encodes named fields in declaration order, then applies `policy`.
    fn encode_fields<'v>(
        &self,
        fields: impl Iterator<Item = (&'v NamedField, Option<&'v dyn Reflect>)>,
        policy: &FieldPolicy,
    ) -> Result<Mapping, EncodeError> {
        let mut mapping = Mapping::new();
        for (field, value) in fields {
            let name = field.name();
            if policy.is_skipped_on_encode(name) {
                continue;
            }

            let value = value.ok_or_else(|| {
                EncodeError::new(EncodeErrorKind::Custom(format!("missing value of `{name}`")))
            })?;
            let encoded = match field.encode_with() {
                Some(encode) => encode(value).map_err(EncodeError::new),
                None => self.encode_value(value),
            }
            .map_err(|err| err.within(PathSegment::Field(name)))?;

            mapping.insert(name, encoded);
        }

        policy.apply_encode(&mut mapping).map_err(|(field, source)| {
            EncodeError::new(EncodeErrorKind::Predicate { field, source }).within(PathSegment::Field(field))
        })?;
        Ok(mapping)
    }
}

/// A record whose view disagrees with its own descriptor.
fn descriptor_error(err: crate::info::TypeKindError) -> EncodeError {
    EncodeError::new(EncodeErrorKind::Custom(err.to_string()))
}

// -----------------------------------------------------------------------------
// ReflectEncodeDriver

/// Encodes a reflected value wrapped with its type path.
///
/// The output is a single-entry mapping `{type_path: tree}`, where `tree`
/// is what [`EncodeDriver`] produces. Only the outermost value carries its
/// type path; [`ReflectDecodeDriver`] reads it back without being told the
/// type.
///
/// ```
/// # use vc_marshal::{derive::Reflect, marshal::ReflectEncodeDriver, registry::TypeRegistry};
/// #[derive(Reflect)]
/// #[reflect(type_path = "my_crate::Point")]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Point>().unwrap();
///
/// let tree = ReflectEncodeDriver::new(&registry).encode(&Point { x: 1, y: -2 }).unwrap();
/// assert_eq!(
///     serde_json::to_string(&tree).unwrap(),
///     r#"{"my_crate::Point":{"x":1,"y":-2}}"#
/// );
/// ```
///
/// [`ReflectDecodeDriver`]: crate::marshal::ReflectDecodeDriver
pub struct ReflectEncodeDriver<'a, P: EncodeProcessor = ()> {
    driver: EncodeDriver<'a, P>,
}

impl<'a> ReflectEncodeDriver<'a, ()> {
    #[inline]
    pub const fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            driver: EncodeDriver::new(registry),
        }
    }
}

impl<'a, P: EncodeProcessor> ReflectEncodeDriver<'a, P> {
    #[inline]
    pub const fn with_processor(registry: &'a TypeRegistry, processor: &'a P) -> Self {
        Self {
            driver: EncodeDriver::with_processor(registry, processor),
        }
    }

    pub fn encode(&self, value: &dyn Reflect) -> Result<Value, EncodeError> {
        let tree = self.driver.encode(value)?;
        let mut mapping = Mapping::with_capacity(1);
        mapping.insert(value.reflect_type_path(), tree);
        Ok(Value::Mapping(mapping))
    }
}
