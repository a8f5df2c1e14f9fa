use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde_core::de::{self, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{SerializeMap, SerializeSeq, SerializeTuple};
use serde_core::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::{Mapping, Scalar, Value};

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_none(),
            Scalar::Bool(v) => serializer.serialize_bool(*v),
            Scalar::Int(v) => serializer.serialize_i64(*v),
            Scalar::UInt(v) => serializer.serialize_u64(*v),
            Scalar::Float(v) => serializer.serialize_f64(*v),
            Scalar::Char(v) => serializer.serialize_char(*v),
            Scalar::Str(v) => serializer.serialize_str(v),
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            state.serialize_entry(key, value)?;
        }
        state.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(scalar) => scalar.serialize(serializer),
            Value::Sequence(items) => {
                let mut state = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    state.serialize_element(item)?;
                }
                state.end()
            }
            Value::Tuple(items) => {
                let mut state = serializer.serialize_tuple(items.len())?;
                for item in items {
                    state.serialize_element(item)?;
                }
                state.end()
            }
            Value::Mapping(mapping) => mapping.serialize(serializer),
        }
    }
}

// -----------------------------------------------------------------------------
// Deserialize

/// Self-describing visitor: the shape of the input decides the node kind.
///
/// Sequences always come back as [`Value::Sequence`]; no format tells a
/// tuple apart from a list on the way in.
struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any value")
    }

    #[inline]
    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    #[inline]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    #[inline]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    #[inline]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    #[inline]
    fn visit_char<E: de::Error>(self, v: char) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    #[inline]
    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    #[inline]
    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    #[inline]
    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::NULL)
    }

    #[inline]
    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::NULL)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut mapping = Mapping::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<Value, Value>()? {
            if mapping.insert(key, value).is_some() {
                return Err(de::Error::custom("duplicate key in mapping"));
            }
        }
        Ok(Value::Mapping(mapping))
    }
}

impl<'de> Deserialize<'de> for Value {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::value::{Mapping, Scalar, Value};

    fn sample() -> Value {
        let mut inner = Mapping::new();
        inner.insert("first", Value::from("Jane"));
        inner.insert("last", Value::from("Doe"));
        let mut outer = Mapping::new();
        outer.insert("FirstMiddleLast", Value::Mapping(inner));
        outer.insert("birthday", Value::Tuple(vec![Value::from(1990_u32), Value::from(2_u32)]));
        outer.insert("nick", Value::NULL);
        Value::Mapping(outer)
    }

    #[test]
    fn json_keeps_key_order() {
        let text = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            text,
            r#"{"FirstMiddleLast":{"first":"Jane","last":"Doe"},"birthday":[1990,2],"nick":null}"#
        );
    }

    #[test]
    fn json_reads_tuples_as_sequences() {
        let text = serde_json::to_string(&sample()).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();

        let mapping = back.as_mapping().unwrap();
        assert_eq!(
            mapping.get("birthday"),
            Some(&Value::Sequence(vec![Value::from(1990_u32), Value::from(2_u32)]))
        );
        assert_eq!(mapping.get("nick"), Some(&Value::Scalar(Scalar::Null)));
    }

    #[test]
    fn json_rejects_duplicate_keys() {
        let result = serde_json::from_str::<Value>(r#"{"a":1,"a":2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn ron_round_trip() {
        let text = ron::to_string(&sample()).unwrap();
        let back: Value = ron::from_str(&text).unwrap();
        assert_eq!(
            back.as_mapping().unwrap().get("FirstMiddleLast"),
            sample().as_mapping().unwrap().get("FirstMiddleLast")
        );
    }
}
