use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use super::{DecodeError, DecodeErrorKind, DecodeProcessor, PathSegment};
use crate::Reflect;
use crate::info::{ListInfo, MapInfo, NamedField, TupleInfo, TypeInfo, Typed};
use crate::ops::{ConstructError, DynamicStruct};
use crate::policy::FieldPolicy;
use crate::registry::TypeRegistry;
use crate::value::{Mapping, Value};

// -----------------------------------------------------------------------------
// DecodeOptions

/// Runtime switches of the decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject record mapping keys that name no field.
    ///
    /// Off by default: unknown keys are ignored.
    pub deny_unknown_fields: bool,
}

impl DecodeOptions {
    #[inline]
    pub const fn new() -> Self {
        Self {
            deny_unknown_fields: false,
        }
    }

    #[inline]
    pub const fn deny_unknown_fields(mut self, deny: bool) -> Self {
        self.deny_unknown_fields = deny;
        self
    }
}

// -----------------------------------------------------------------------------
// DecodeDriver

/// Decodes value trees into concrete values, guided by a [`TypeInfo`].
///
/// # Decoding Rules
///
/// Every node is decoded in this priority order:
///
/// 1. **Processor**: the [`DecodeProcessor`], if one is provided.
/// 2. **Descriptor**: the default decoding of the target [`TypeInfo`]:
///    - struct: each field is read from the mapping under its output key;
///      absent or ignored fields take their default, absent `Option`
///      fields become `None`, anything else is a missing required field;
///    - enum: the first variant, in declaration order, whose tag matches;
///    - tuple: a tuple or sequence of exactly the declared arity;
///    - list: a sequence; map: a mapping; option: `Null` or the value;
///    - dispatch: the first member whose key is present in the mapping;
///    - opaque: the leaf reads itself from a scalar.
///
/// The decoded parts are handed to the constructor hook of the descriptor,
/// so the result is always the concrete type.
///
/// # Examples
///
/// ```
/// # use vc_marshal::{derive::Reflect, marshal::DecodeDriver, registry::TypeRegistry};
/// # use vc_marshal::value::Value;
/// #[derive(Reflect, Debug, PartialEq)]
/// struct Person {
///     name: String,
///     #[reflect(rename = "years")]
///     age: u32,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Person>().unwrap();
///
/// let tree: Value = serde_json::from_str(r#"{ "name": "Jane", "years": 30 }"#).unwrap();
///
/// let person: Person = DecodeDriver::new(&registry).decode_as(&tree).unwrap();
/// assert_eq!(person, Person { name: "Jane".into(), age: 30 });
/// ```
pub struct DecodeDriver<'a, P: DecodeProcessor = ()> {
    registry: &'a TypeRegistry,
    processor: Option<&'a mut P>,
    options: DecodeOptions,
}

impl<'a> DecodeDriver<'a, ()> {
    /// Creates a decoder with no processor.
    #[inline]
    pub const fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            processor: None,
            options: DecodeOptions::new(),
        }
    }
}

impl<'a, P: DecodeProcessor> DecodeDriver<'a, P> {
    /// Creates a decoder with a processor.
    #[inline]
    pub const fn with_processor(registry: &'a TypeRegistry, processor: &'a mut P) -> Self {
        Self {
            registry,
            processor: Some(processor),
            options: DecodeOptions::new(),
        }
    }

    #[inline]
    pub const fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub const fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes `value` as the type described by `info`.
    ///
    /// The path of a returned error starts with the name of that type.
    pub fn decode(
        &mut self,
        info: &'static TypeInfo,
        value: &Value,
    ) -> Result<Box<dyn Reflect>, DecodeError> {
        self.decode_value(info, value)
            .map_err(|err| err.within(PathSegment::Type(info.type_name())))
    }

    /// Decodes `value` as `T`.
    pub fn decode_as<T: Reflect + Typed>(&mut self, value: &Value) -> Result<T, DecodeError> {
        let decoded = self.decode(T::type_info(), value)?;
        decoded.take::<T>().map_err(|decoded| {
            DecodeError::new(DecodeErrorKind::Construct(ConstructError::TypeMismatch {
                field: Cow::Borrowed(T::type_name()),
                expected: T::type_path(),
                found: decoded.reflect_type_path(),
            }))
        })
    }

    pub(super) fn decode_value(
        &mut self,
        info: &'static TypeInfo,
        value: &Value,
    ) -> Result<Box<dyn Reflect>, DecodeError> {
        if let Some(processor) = self.processor.as_deref_mut()
            && let Some(result) = processor.try_decode(info, value, self.registry)
        {
            return result.map_err(DecodeError::new);
        }

        if !self.registry.contains(info.type_id()) {
            return Err(DecodeErrorKind::Unregistered {
                type_path: Cow::Borrowed(info.type_path()),
            }
            .into());
        }

        crate::cfg::debug! {
            log::trace!("decode `{}` from {}", info.type_path(), value.kind());
        }

        match info {
            TypeInfo::Struct(info) => {
                let mapping = expect_mapping(value)?;
                let fields = self.decode_fields(info.iter().as_slice(), info.policy(), mapping)?;
                Ok(info.construct(fields)?)
            }
            TypeInfo::Enum(info) => self.decode_enum(info, value),
            TypeInfo::List(info) => self.decode_list(info, value),
            TypeInfo::Tuple(info) => self.decode_tuple(info, value),
            TypeInfo::Map(info) => self.decode_map(info, value),
            TypeInfo::Option(info) => {
                let content = if value.is_null() {
                    None
                } else {
                    Some(self.decode_value(info.some_info(), value)?)
                };
                Ok(info.from_option(content)?)
            }
            TypeInfo::Dispatch(info) => self.decode_dispatch(info, value),
            TypeInfo::Opaque(info) => Ok(info.from_value(value)?),
        }
    }

    fn decode_list(
        &mut self,
        info: &'static ListInfo,
        value: &Value,
    ) -> Result<Box<dyn Reflect>, DecodeError> {
        let Value::Sequence(items) = value else {
            return Err(shape_error("Sequence", value));
        };

        let item_info = info.item_info();
        let items = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.decode_value(item_info, item)
                    .map_err(|err| err.within(PathSegment::Index(index)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(info.from_items(items)?)
    }

    fn decode_tuple(
        &mut self,
        info: &'static TupleInfo,
        value: &Value,
    ) -> Result<Box<dyn Reflect>, DecodeError> {
        let items = value
            .as_items()
            .ok_or_else(|| shape_error("Tuple or Sequence", value))?;

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
        Ok(info.from_items(items)?)
    }

    fn decode_map(
        &mut self,
        info: &'static MapInfo,
        value: &Value,
    ) -> Result<Box<dyn Reflect>, DecodeError> {
        let mapping = expect_mapping(value)?;

        let (key_info, value_info) = (info.key_info(), info.value_info());
        let entries = mapping
            .iter()
            .map(|(key, item)| {
                let entry = self
                    .decode_key(key_info, key)
                    .and_then(|decoded| Ok((decoded, self.decode_value(value_info, item)?)));
                entry.map_err(|err| err.within(PathSegment::Key(key.to_string())))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(info.from_entries(entries)?)
    }

    /// Decodes a map key.
    ///
    /// Text formats such as JSON write every map key as a string, so a leaf
    /// key that rejects the raw node is read again from the number or bool
    /// the string spells.
    fn decode_key(
        &mut self,
        key_info: &'static TypeInfo,
        key: &Value,
    ) -> Result<Box<dyn Reflect>, DecodeError> {
        let err = match self.decode_value(key_info, key) {
            Err(err) if matches!(err.kind, DecodeErrorKind::InvalidScalar { .. }) => err,
            decoded => return decoded,
        };

        match key.as_str().and_then(parse_key_text) {
            Some(parsed) if matches!(key_info, TypeInfo::Opaque(_)) => {
                self.decode_value(key_info, &parsed).map_err(|_| err)
            }
            _ => Err(err),
        }
    }

    /// Reads the named `fields` of a record or struct variant from `mapping`.
    pub(super) fn decode_fields(
        &mut self,
        fields: &[NamedField],
        policy: &FieldPolicy,
        mapping: &Mapping,
    ) -> Result<DynamicStruct, DecodeError> {
        if self.options.deny_unknown_fields {
            reject_unknown_keys(fields, policy, mapping)?;
        }

        let mut decoded = DynamicStruct::with_capacity(fields.len());
        for field in fields {
            let name = field.name();
            let incoming = match mapping.get(policy.output_key(name)) {
                Some(value) if ignored(policy, name, value)? => None,
                incoming => incoming,
            };

            let value = match incoming {
                Some(value) => match field.decode_with() {
                    Some(decode) => decode(value).map_err(DecodeError::new),
                    None => self.decode_value(field.type_info(), value),
                }
                .map_err(|err| err.within(PathSegment::Field(name)))?,
                None => absent_field(field)?,
            };
            decoded.insert(name, value);
        }
        Ok(decoded)
    }
}

fn ignored(policy: &FieldPolicy, name: &'static str, value: &Value) -> Result<bool, DecodeError> {
    policy.ignores_on_decode(name, value).map_err(|err| {
        DecodeError::new(DecodeErrorKind::Custom(err.to_string())).within(PathSegment::Field(name))
    })
}

/// The value of a field with no usable input: its default, `None` for an
/// optional field, or an error.
fn absent_field(field: &NamedField) -> Result<Box<dyn Reflect>, DecodeError> {
    if let Some(default) = field.default_value() {
        return Ok(default);
    }
    if let TypeInfo::Option(info) = field.type_info() {
        return Ok(info.from_option(None)?);
    }
    Err(DecodeErrorKind::MissingRequiredField {
        field: field.name(),
    }
    .into())
}

fn reject_unknown_keys(
    fields: &[NamedField],
    policy: &FieldPolicy,
    mapping: &Mapping,
) -> Result<(), DecodeError> {
    let unknown = mapping.keys().find(|key| {
        !key.as_str().is_some_and(|key| {
            fields
                .iter()
                .any(|field| policy.output_key(field.name()) == key)
        })
    });
    match unknown {
        Some(key) => Err(DecodeErrorKind::UnknownField {
            key: key.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

pub(super) fn shape_error(expected: &'static str, value: &Value) -> DecodeError {
    DecodeError::new(DecodeErrorKind::ShapeMismatch {
        expected,
        found: value.kind(),
    })
}

pub(super) fn expect_mapping(value: &Value) -> Result<&Mapping, DecodeError> {
    value.as_mapping().ok_or_else(|| shape_error("Mapping", value))
}

/// The scalar a stringified map key stands for.
fn parse_key_text(text: &str) -> Option<Value> {
    if let Ok(v) = text.parse::<u64>() {
        return Some(Value::from(v));
    }
    if let Ok(v) = text.parse::<i64>() {
        return Some(Value::from(v));
    }
    if let Ok(v) = text.parse::<bool>() {
        return Some(Value::from(v));
    }
    text.parse::<f64>().ok().map(Value::from)
}

// -----------------------------------------------------------------------------
// ReflectDecodeDriver

/// Decodes a tree produced by [`ReflectEncodeDriver`].
///
/// The input must be a single-entry mapping `{type_path: tree}`; the type
/// path selects the descriptor from the registry and `tree` is decoded by
/// [`DecodeDriver`].
///
/// ```
/// # use vc_marshal::{derive::Reflect, registry::TypeRegistry};
/// # use vc_marshal::marshal::{ReflectDecodeDriver, ReflectEncodeDriver};
/// #[derive(Reflect, Debug, PartialEq)]
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
/// let text = ron::to_string(&tree).unwrap();
///
/// let tree = ron::from_str(&text).unwrap();
/// let point = ReflectDecodeDriver::new(&registry).decode(&tree).unwrap();
/// assert_eq!(point.take::<Point>().unwrap(), Point { x: 1, y: -2 });
/// ```
///
/// [`ReflectEncodeDriver`]: crate::marshal::ReflectEncodeDriver
pub struct ReflectDecodeDriver<'a, P: DecodeProcessor = ()> {
    driver: DecodeDriver<'a, P>,
}

impl<'a> ReflectDecodeDriver<'a, ()> {
    #[inline]
    pub const fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            driver: DecodeDriver::new(registry),
        }
    }
}

impl<'a, P: DecodeProcessor> ReflectDecodeDriver<'a, P> {
    #[inline]
    pub const fn with_processor(registry: &'a TypeRegistry, processor: &'a mut P) -> Self {
        Self {
            driver: DecodeDriver::with_processor(registry, processor),
        }
    }

    #[inline]
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.driver.options = options;
        self
    }

    pub fn decode(&mut self, value: &Value) -> Result<Box<dyn Reflect>, DecodeError> {
        let mapping = expect_mapping(value)?;
        let mut entries = mapping.iter();
        let (Some((key, tree)), None) = (entries.next(), entries.next()) else {
            return Err(DecodeErrorKind::ArityMismatch {
                expected: 1,
                found: mapping.len(),
            }
            .into());
        };

        let type_path = key.as_str().ok_or_else(|| {
            DecodeError::new(DecodeErrorKind::InvalidScalar {
                expected: "type path",
                found: key.to_string(),
            })
        })?;
        let info = self
            .driver
            .registry
            .get_with_type_path(type_path)
            .map(|meta| meta.type_info())
            .ok_or_else(|| {
                DecodeError::new(DecodeErrorKind::Unregistered {
                    type_path: Cow::Owned(type_path.into()),
                })
            })?;

        self.driver.decode(info, tree)
    }
}
