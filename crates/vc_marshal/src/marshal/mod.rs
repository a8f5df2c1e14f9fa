//! Encoding records into value trees and decoding them back.
//!
//! ## Menu
//!
//! - [`EncodeDriver`]: record -> [`Value`], guided by the record's own descriptor.
//! - [`DecodeDriver`]: [`Value`] -> record, guided by a target [`TypeInfo`].
//! - [`ReflectEncodeDriver`] / [`ReflectDecodeDriver`]: the same, with the
//!   outermost value wrapped as `{type_path: tree}`.
//! - [`EncodeProcessor`] / [`DecodeProcessor`]: user hooks consulted first.
//! - [`EncodeError`] / [`DecodeError`]: failures with the [`FieldPath`] of
//!   the offending node.
//!
//! ## Shape of the tree
//!
//! | Type | Tree |
//! |------|------|
//! | struct | `Mapping` of output key to field, declaration order |
//! | unit variant | its tag, as a string scalar |
//! | tuple variant | `{tag: Tuple(fields..)}` |
//! | struct variant | `{tag: Mapping}` |
//! | `Vec<T>`, `VecDeque<T>` | `Sequence` |
//! | tuples, `[T; N]` | `Tuple` |
//! | maps | `Mapping` with encoded keys |
//! | `Option<T>` | `Null` or the value |
//! | leaves | `Scalar` |
//!
//! Both drivers consult the [`TypeRegistry`] at every node: a type that was
//! not registered is an error, in both directions.
//!
//! [`Value`]: crate::value::Value
//! [`TypeInfo`]: crate::info::TypeInfo
//! [`TypeRegistry`]: crate::registry::TypeRegistry

// -----------------------------------------------------------------------------
// Modules

mod decoder;
mod encoder;
mod error;
mod path;
mod processor;
mod variant;

// -----------------------------------------------------------------------------
// Exports

pub use decoder::{DecodeDriver, DecodeOptions, ReflectDecodeDriver};
pub use encoder::{EncodeDriver, ReflectEncodeDriver};
pub use error::{DecodeError, DecodeErrorKind, EncodeError, EncodeErrorKind};
pub use path::{FieldPath, PathSegment};
pub use processor::{DecodeProcessor, EncodeProcessor};

use crate::Reflect;
use crate::info::Typed;
use crate::registry::TypeRegistry;
use crate::value::Value;

/// Encodes `value` with the default [`EncodeDriver`].
#[inline]
pub fn to_value<T: Reflect>(value: &T, registry: &TypeRegistry) -> Result<Value, EncodeError> {
    EncodeDriver::new(registry).encode(value)
}

/// Decodes `value` as `T` with the default [`DecodeDriver`].
#[inline]
pub fn from_value<T: Reflect + Typed>(
    value: &Value,
    registry: &TypeRegistry,
) -> Result<T, DecodeError> {
    DecodeDriver::new(registry).decode_as::<T>(value)
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    use indexmap::IndexMap;

    use super::{DecodeDriver, DecodeErrorKind, DecodeOptions, EncodeErrorKind, PathSegment};
    use super::{ReflectDecodeDriver, ReflectEncodeDriver, from_value, to_value};
    use crate::derive::Reflect;
    use crate::info::Typed;
    use crate::policy::PredicateError;
    use crate::registry::{RegistrationError, TypeMeta, TypeRegistry};
    use crate::value::{Mapping, Value};

    fn under_18(value: &Value) -> bool {
        value
            .as_scalar()
            .and_then(|s| s.as_u64())
            .is_some_and(|age| age < 18)
    }

    #[derive(Reflect, Debug, Clone, PartialEq)]
    #[reflect(type_path = "tests::Person")]
    struct Person {
        #[reflect(rename = "full_name")]
        name: String,
        #[reflect(skip_if = "under_18", default)]
        age: u32,
        phones: Vec<Phone>,
    }

    #[derive(Reflect, Debug, Clone, PartialEq)]
    struct Phone {
        number: String,
        #[reflect(skip, default)]
        identifier: String,
    }

    #[derive(Reflect, Debug, Clone, PartialEq)]
    enum Name {
        #[reflect(rename = "None")]
        Anonymous,
        First(String),
        FirstMiddleLast {
            first: String,
            #[reflect(skip_if = "crate::policy::is_empty", default)]
            middle: Vec<String>,
            last: String,
        },
    }

    #[derive(Reflect, Debug, PartialEq)]
    struct User {
        name: Name,
        scores: (u8, u8),
        tags: BTreeMap<u32, String>,
        nick: Option<String>,
    }

    fn registry_with<T: Typed>() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register::<T>().unwrap();
        registry
    }

    fn keys(value: &Value) -> Vec<&str> {
        value
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(Value::as_str)
            .collect()
    }

    fn jane(age: u32) -> Person {
        Person {
            name: "Jane".into(),
            age,
            phones: vec![Phone {
                number: "555-0100".into(),
                identifier: "p1".into(),
            }],
        }
    }

    #[test]
    fn round_trip_restores_all_but_skipped_fields() {
        let registry = registry_with::<Person>();
        let person = jane(30);

        let tree = to_value(&person, &registry).unwrap();
        let back: Person = from_value(&tree, &registry).unwrap();

        let mut expected = person.clone();
        expected.phones[0].identifier = String::new();
        assert_eq!(back, expected);
    }

    #[test]
    fn rename_is_symmetric() {
        let registry = registry_with::<Person>();
        let tree = to_value(&jane(30), &registry).unwrap();

        assert_eq!(keys(&tree), ["full_name", "age", "phones"]);

        let back: Person = from_value(&tree, &registry).unwrap();
        assert_eq!(back.name, "Jane");
    }

    #[test]
    fn skip_if_threshold() {
        let registry = registry_with::<Person>();

        let young = to_value(&jane(15), &registry).unwrap();
        assert!(!keys(&young).contains(&"age"));

        let adult = to_value(&jane(18), &registry).unwrap();
        assert!(keys(&adult).contains(&"age"));

        // The omitted field decodes to its default.
        let back: Person = from_value(&young, &registry).unwrap();
        assert_eq!(back.age, 0);
    }

    #[test]
    fn unit_variant_is_its_tag() {
        let registry = registry_with::<Name>();
        let tree = to_value(&Name::Anonymous, &registry).unwrap();

        assert_eq!(tree, Value::from("None"));
        assert_eq!(from_value::<Name>(&tree, &registry).unwrap(), Name::Anonymous);
    }

    #[test]
    fn tuple_variant_is_tagged_tuple() {
        let registry = registry_with::<Name>();
        let name = Name::First("Alice".into());
        let tree = to_value(&name, &registry).unwrap();

        let mut expected = Mapping::new();
        expected.insert("First", Value::Tuple(vec![Value::from("Alice")]));
        assert_eq!(tree, Value::Mapping(expected));
        assert_eq!(tree.to_string(), r#"{"First": ("Alice",)}"#);

        assert_eq!(from_value::<Name>(&tree, &registry).unwrap(), name);
    }

    #[test]
    fn struct_variant_applies_its_policy() {
        let registry = registry_with::<Name>();
        let name = Name::FirstMiddleLast {
            first: "Jane".into(),
            middle: Vec::new(),
            last: "Doe".into(),
        };
        let tree = to_value(&name, &registry).unwrap();

        assert_eq!(
            tree.to_string(),
            r#"{"FirstMiddleLast": {"first": "Jane", "last": "Doe"}}"#
        );
        assert_eq!(from_value::<Name>(&tree, &registry).unwrap(), name);
    }

    #[test]
    fn containers_round_trip() {
        let registry = registry_with::<User>();
        let user = User {
            name: Name::First("Alice".into()),
            scores: (7, 9),
            tags: BTreeMap::from([(2, "b".to_string()), (1, "a".to_string())]),
            nick: None,
        };

        let tree = to_value(&user, &registry).unwrap();
        let mapping = tree.as_mapping().unwrap();
        assert_eq!(mapping.get("scores"), Some(&Value::Tuple(vec![Value::from(7_u8), Value::from(9_u8)])));
        assert_eq!(mapping.get("nick"), Some(&Value::NULL));

        let tags = mapping.get("tags").and_then(Value::as_mapping).unwrap();
        assert_eq!(tags.get_key(&Value::from(1_u32)), Some(&Value::from("a")));

        assert_eq!(from_value::<User>(&tree, &registry).unwrap(), user);
    }

    #[test]
    fn absent_option_field_is_none() {
        let registry = registry_with::<User>();
        let mut mapping = Mapping::new();
        mapping.insert("name", Value::from("None"));
        mapping.insert("scores", Value::Sequence(vec![Value::from(1_u8), Value::from(2_u8)]));
        mapping.insert("tags", Value::Mapping(Mapping::new()));

        let user: User = from_value(&Value::Mapping(mapping), &registry).unwrap();
        assert_eq!(user.nick, None);
        assert_eq!(user.scores, (1, 2));
    }

    #[test]
    fn insertion_order_of_index_map_is_kept() {
        #[derive(Reflect, Debug, PartialEq)]
        struct Config {
            entries: IndexMap<String, u32>,
        }

        let registry = registry_with::<Config>();
        let mut entries = IndexMap::new();
        entries.insert("zeta".to_string(), 1);
        entries.insert("alpha".to_string(), 2);
        let config = Config { entries };

        let tree = to_value(&config, &registry).unwrap();
        let entries = tree.as_mapping().unwrap().get("entries").unwrap();
        assert_eq!(keys(entries), ["zeta", "alpha"]);

        assert_eq!(from_value::<Config>(&tree, &registry).unwrap(), config);
    }

    // Two variants sharing a tag: registration refuses the enum, and when it
    // is inserted without validation the first declared variant wins.
    #[derive(Reflect, Debug, PartialEq)]
    enum Ambiguous {
        #[reflect(rename = "Pair")]
        Left(String),
        #[reflect(rename = "Pair")]
        Right(String),
    }

    #[test]
    fn duplicate_tags_are_rejected() {
        let mut registry = TypeRegistry::new();
        let err = registry.register::<Ambiguous>().unwrap_err();

        assert!(matches!(err, RegistrationError::DuplicateTag { tag: "Pair", .. }));
        assert!(!registry.contains(core::any::TypeId::of::<Ambiguous>()));
    }

    #[test]
    fn first_declared_variant_wins() {
        let mut registry = TypeRegistry::new();
        registry.insert_type_meta(TypeMeta::of::<Ambiguous>());

        let mut mapping = Mapping::new();
        mapping.insert("Pair", Value::Tuple(vec![Value::from("x")]));
        let decoded: Ambiguous = from_value(&Value::Mapping(mapping), &registry).unwrap();

        assert_eq!(decoded, Ambiguous::Left("x".into()));
    }

    #[test]
    fn matching_tag_with_wrong_payload_is_an_error() {
        let registry = registry_with::<Name>();
        let mut mapping = Mapping::new();
        mapping.insert("First", Value::from("Alice"));

        let err = from_value::<Name>(&Value::Mapping(mapping), &registry).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::ShapeMismatch { .. }));
        assert_eq!(err.path.to_string(), "Name::First");
    }

    #[test]
    fn no_matching_variant() {
        let registry = registry_with::<Name>();

        let err = from_value::<Name>(&Value::from("Nobody"), &registry).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::NoMatchingVariant { .. }));

        // A unit tag is only accepted as a string scalar.
        let mut mapping = Mapping::new();
        mapping.insert("None", Value::NULL);
        let err = from_value::<Name>(&Value::Mapping(mapping), &registry).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::NoMatchingVariant { .. }));
    }

    #[test]
    fn value_fields_pass_through() {
        #[derive(Reflect, Debug, PartialEq)]
        struct Envelope {
            kind: String,
            payload: Value,
        }

        let registry = registry_with::<Envelope>();
        let mut payload = Mapping::new();
        payload.insert("anything", Value::Tuple(vec![Value::from(1_i32), Value::NULL]));
        let envelope = Envelope {
            kind: "raw".into(),
            payload: Value::Mapping(payload),
        };

        let tree = to_value(&envelope, &registry).unwrap();
        assert_eq!(tree.as_mapping().unwrap().get("payload"), Some(&envelope.payload));

        let back: Envelope = from_value(&tree, &registry).unwrap();
        assert_eq!(back, envelope);

        // Decoding the decoded tree again changes nothing.
        let again: Envelope = from_value(&to_value(&back, &registry).unwrap(), &registry).unwrap();
        assert_eq!(again, envelope);
    }

    #[test]
    fn errors_carry_the_field_path() {
        let registry = registry_with::<User>();
        let mut name = Mapping::new();
        name.insert(
            "FirstMiddleLast",
            Value::Mapping(
                [
                    ("first", Value::from("Jane")),
                    ("middle", Value::Sequence(vec![Value::from(3_u8)])),
                    ("last", Value::from("Doe")),
                ]
                .into_iter()
                .collect(),
            ),
        );
        let mut user = Mapping::new();
        user.insert("name", Value::Mapping(name));

        let err = from_value::<User>(&Value::Mapping(user), &registry).unwrap_err();
        assert_eq!(err.path.to_string(), "User.name::FirstMiddleLast.middle[0]");
        assert!(matches!(err.kind, DecodeErrorKind::InvalidScalar { .. }));
    }

    #[test]
    fn arity_mismatch() {
        let registry = registry_with::<User>();
        let mut user = Mapping::new();
        user.insert("name", Value::from("None"));
        user.insert("scores", Value::Tuple(vec![Value::from(1_u8)]));
        user.insert("tags", Value::Mapping(Mapping::new()));

        let err = from_value::<User>(&Value::Mapping(user), &registry).unwrap_err();
        assert_eq!(
            err.kind,
            DecodeErrorKind::ArityMismatch {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(err.path.to_string(), "User.scores");
    }

    #[test]
    fn missing_required_field() {
        let registry = registry_with::<Phone>();
        let err = from_value::<Phone>(&Value::Mapping(Mapping::new()), &registry).unwrap_err();

        assert_eq!(err.kind, DecodeErrorKind::MissingRequiredField { field: "number" });
        assert_eq!(err.to_string(), "decode error at `Phone`: missing required field `number`");
    }

    #[test]
    fn unknown_fields() {
        let registry = registry_with::<Phone>();
        let mut mapping = Mapping::new();
        mapping.insert("number", Value::from("1"));
        mapping.insert("extension", Value::from("2"));
        let tree = Value::Mapping(mapping);

        // Ignored by default.
        assert!(from_value::<Phone>(&tree, &registry).is_ok());

        let err = DecodeDriver::new(&registry)
            .with_options(DecodeOptions::new().deny_unknown_fields(true))
            .decode_as::<Phone>(&tree)
            .unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::UnknownField { .. }));
    }

    #[test]
    fn unregistered_types_are_refused() {
        let registry = TypeRegistry::new();
        let phone = Phone {
            number: "1".into(),
            identifier: String::new(),
        };

        let err = to_value(&phone, &registry).unwrap_err();
        assert!(matches!(err.kind, EncodeErrorKind::Unregistered { .. }));

        let err = from_value::<Phone>(&Value::Mapping(Mapping::new()), &registry).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::Unregistered { .. }));
    }

    #[test]
    fn failing_predicate_aborts_encoding() {
        fn picky(_: &Value) -> Result<bool, PredicateError> {
            Err(PredicateError::new("cannot judge"))
        }

        #[derive(Reflect)]
        struct Reading {
            #[reflect(try_skip_if = "picky", default)]
            level: f64,
        }

        let registry = registry_with::<Reading>();
        let err = to_value(&Reading { level: 0.5 }, &registry).unwrap_err();

        assert!(matches!(err.kind, EncodeErrorKind::Predicate { field: "level", .. }));
        assert_eq!(err.path.to_string(), "Reading.level");
    }

    #[test]
    fn dispatch_by_key_presence() {
        #[derive(Reflect, Debug, PartialEq)]
        struct Circle {
            radius: f64,
        }

        #[derive(Reflect, Debug, PartialEq)]
        struct Rect {
            width: f64,
            height: f64,
        }

        #[derive(Reflect, Debug, PartialEq)]
        #[reflect(dispatch)]
        enum Shape {
            #[reflect(key = "radius")]
            Circle(Circle),
            #[reflect(key = "width")]
            Rect(Rect),
        }

        let registry = registry_with::<Shape>();

        let rect: Value = serde_json::from_str(r#"{"width": 2.0, "height": 3.0}"#).unwrap();
        let shape: Shape = from_value(&rect, &registry).unwrap();
        assert_eq!(shape, Shape::Rect(Rect { width: 2.0, height: 3.0 }));

        // Encoding writes the member as is.
        assert_eq!(to_value(&shape, &registry).unwrap(), rect);

        let mut unknown = Mapping::new();
        unknown.insert("side", Value::from(1.0_f64));
        let err = from_value::<Shape>(&Value::Mapping(unknown), &registry).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::NoMatchingVariant { .. }));

        let err = from_value::<Shape>(&Value::from(1.0_f64), &registry).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::ShapeMismatch { .. }));
    }

    #[test]
    fn reflect_drivers_carry_the_type_path() {
        let registry = registry_with::<Person>();
        let person = jane(30);

        let tree = ReflectEncodeDriver::new(&registry).encode(&person).unwrap();
        assert_eq!(keys(&tree), ["tests::Person"]);

        let decoded = ReflectDecodeDriver::new(&registry).decode(&tree).unwrap();
        let back = decoded.take::<Person>().unwrap();
        assert_eq!(back.name, "Jane");

        let mut unknown = Mapping::new();
        unknown.insert("tests::Nobody", Value::NULL);
        let err = ReflectDecodeDriver::new(&registry)
            .decode(&Value::Mapping(unknown))
            .unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::Unregistered { .. }));
    }

    #[test]
    fn custom_field_hooks() {
        fn encode_cents(value: &dyn crate::Reflect) -> Result<Value, EncodeErrorKind> {
            let cents = value
                .downcast_ref::<u64>()
                .ok_or_else(|| EncodeErrorKind::Custom("expected cents".into()))?;
            Ok(Value::from(alloc::format!("{}.{:02}", cents / 100, cents % 100)))
        }

        fn decode_cents(value: &Value) -> Result<Box<dyn crate::Reflect>, DecodeErrorKind> {
            let text = value.as_str().unwrap_or_default();
            let (whole, frac) = text.split_once('.').unwrap_or((text, "0"));
            match (whole.parse::<u64>(), frac.parse::<u64>()) {
                (Ok(whole), Ok(frac)) => Ok(Box::new(whole * 100 + frac)),
                _ => Err(DecodeErrorKind::Custom(alloc::format!("bad amount {text:?}"))),
            }
        }

        #[derive(Reflect, Debug, PartialEq)]
        struct Price {
            #[reflect(encode_with = "encode_cents", decode_with = "decode_cents")]
            amount: u64,
        }

        let registry = registry_with::<Price>();
        let tree = to_value(&Price { amount: 1250 }, &registry).unwrap();
        assert_eq!(tree.as_mapping().unwrap().get("amount"), Some(&Value::from("12.50")));
        assert_eq!(from_value::<Price>(&tree, &registry).unwrap(), Price { amount: 1250 });
    }

    #[test]
    fn transports_keep_the_tree() {
        let registry = registry_with::<Name>();
        let name = Name::FirstMiddleLast {
            first: "Jane".into(),
            middle: vec!["Q".into()],
            last: "Doe".into(),
        };
        let tree = to_value(&name, &registry).unwrap();

        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(
            json,
            r#"{"FirstMiddleLast":{"first":"Jane","middle":["Q"],"last":"Doe"}}"#
        );
        let from_json: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(from_value::<Name>(&from_json, &registry).unwrap(), name);

        let text = ron::to_string(&tree).unwrap();
        let from_ron: Value = ron::from_str(&text).unwrap();
        assert_eq!(from_value::<Name>(&from_ron, &registry).unwrap(), name);
    }

    #[test]
    fn stringified_map_keys_are_read_back() {
        let registry = registry_with::<User>();
        let user = User {
            name: Name::Anonymous,
            scores: (1, 2),
            tags: BTreeMap::from([(1, "a".to_string()), (20, "b".to_string())]),
            nick: None,
        };

        let json = serde_json::to_string(&to_value(&user, &registry).unwrap()).unwrap();
        assert!(json.contains(r#""tags":{"1":"a","20":"b"}"#));

        let tree: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(from_value::<User>(&tree, &registry).unwrap(), user);

        let mut tags = Mapping::new();
        tags.insert("one", Value::from("a"));
        let mut mapping = Mapping::new();
        mapping.insert("name", Value::from("None"));
        mapping.insert("scores", Value::Sequence(vec![Value::from(1_u8), Value::from(2_u8)]));
        mapping.insert("tags", Value::Mapping(tags));

        let err = from_value::<User>(&Value::Mapping(mapping), &registry).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::InvalidScalar { expected: "u32", .. }));
    }

    #[test]
    fn error_path_segments_nest() {
        let registry = registry_with::<Person>();
        let mut phone = Mapping::new();
        phone.insert("number", Value::from(5_u8));
        let mut person = Mapping::new();
        person.insert("full_name", Value::from("Jane"));
        person.insert("phones", Value::Sequence(vec![Value::Mapping(phone)]));

        let err = from_value::<Person>(&Value::Mapping(person), &registry).unwrap_err();
        let segments: Vec<_> = err.path.iter().cloned().collect();
        assert_eq!(
            segments,
            [
                PathSegment::Type("Person"),
                PathSegment::Field("phones"),
                PathSegment::Index(0),
                PathSegment::Field("number"),
            ]
        );
    }
}
