//! Per-field encode/decode policies.
//!
//! A [`FieldPolicy`] is declared once per record (or struct variant) and
//! never mutates the record itself, only the transient encoded mapping.
//!
//! Encoding applies three rules in a fixed order:
//!
//! 1. **Skip**: listed fields are removed.
//! 2. **Skip-if**: a predicate over the *encoded* field value; when it
//!    returns `true` the field is removed. Fields already skipped are not
//!    evaluated.
//! 3. **Rename**: the field's key is replaced by its output key. Renaming a
//!    removed field is a no-op.
//!
//! Decoding reads each field under its output key, and may ignore incoming
//! values through skip-decode and skip-decode-if rules; an ignored or absent
//! field falls back to its declared default.
//!
//! ```
//! use vc_marshal::policy::{FieldPolicy, SkipIf};
//! use vc_marshal::value::{Mapping, Value};
//!
//! fn under_18(value: &Value) -> bool {
//!     value.as_scalar().and_then(|s| s.as_u64()).is_some_and(|age| age < 18)
//! }
//!
//! let policy = FieldPolicy::new()
//!     .skip("id")
//!     .skip_if("age", SkipIf::new(under_18))
//!     .rename("name", "full_name");
//!
//! let mut mapping = Mapping::new();
//! mapping.insert("id", Value::from(7_u32));
//! mapping.insert("name", Value::from("Jane"));
//! mapping.insert("age", Value::from(15_u32));
//! policy.apply_encode(&mut mapping).unwrap();
//!
//! assert_eq!(mapping.len(), 1);
//! assert_eq!(mapping.get("full_name"), Some(&Value::from("Jane")));
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::value::{Mapping, Scalar, Value};

// -----------------------------------------------------------------------------
// SkipIf

/// Error raised by a fallible skip predicate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct PredicateError(pub String);

impl PredicateError {
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A predicate over an encoded (or incoming) field value.
#[derive(Clone, Copy)]
pub enum SkipIf {
    Infallible(fn(&Value) -> bool),
    Fallible(fn(&Value) -> Result<bool, PredicateError>),
}

impl SkipIf {
    #[inline]
    pub const fn new(predicate: fn(&Value) -> bool) -> Self {
        Self::Infallible(predicate)
    }

    /// A predicate that may fail; its error aborts the encode call.
    #[inline]
    pub const fn fallible(predicate: fn(&Value) -> Result<bool, PredicateError>) -> Self {
        Self::Fallible(predicate)
    }

    #[inline]
    pub fn test(&self, value: &Value) -> Result<bool, PredicateError> {
        match self {
            Self::Infallible(predicate) => Ok(predicate(value)),
            Self::Fallible(predicate) => predicate(value),
        }
    }
}

impl fmt::Debug for SkipIf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infallible(_) => f.write_str("SkipIf::Infallible"),
            Self::Fallible(_) => f.write_str("SkipIf::Fallible"),
        }
    }
}

// -----------------------------------------------------------------------------
// Built-in predicates

/// `true` for the `Null` scalar (an encoded `None`).
#[inline]
pub fn is_null(value: &Value) -> bool {
    value.is_null()
}

/// `true` for an empty string, sequence, tuple or mapping.
#[inline]
pub fn is_empty(value: &Value) -> bool {
    value.is_empty()
}

/// `true` for the `false` boolean.
#[inline]
pub fn is_false(value: &Value) -> bool {
    matches!(value, Value::Scalar(Scalar::Bool(false)))
}

/// `true` for a numeric zero of any representation.
pub fn is_zero(value: &Value) -> bool {
    match value {
        Value::Scalar(Scalar::Int(v)) => *v == 0,
        Value::Scalar(Scalar::UInt(v)) => *v == 0,
        Value::Scalar(Scalar::Float(v)) => *v == 0.0,
        _ => false,
    }
}

// -----------------------------------------------------------------------------
// FieldPolicy

/// The skip, skip-if and rename rules of one record.
///
/// Built with the chaining methods below, usually by `#[derive(Reflect)]`
/// from `#[reflect(...)]` field attributes. Field names are the declared
/// Rust names; output keys are what appears in the tree.
#[derive(Debug, Clone, Default)]
pub struct FieldPolicy {
    skip_encode: Vec<&'static str>,
    skip_decode: Vec<&'static str>,
    skip_if: Vec<(&'static str, SkipIf)>,
    skip_decode_if: Vec<(&'static str, SkipIf)>,
    rename: Vec<(&'static str, &'static str)>,
}

impl FieldPolicy {
    #[inline]
    pub const fn new() -> Self {
        Self {
            skip_encode: Vec::new(),
            skip_decode: Vec::new(),
            skip_if: Vec::new(),
            skip_decode_if: Vec::new(),
            rename: Vec::new(),
        }
    }

    /// Skips `field` in both directions.
    pub fn skip(self, field: &'static str) -> Self {
        self.skip_encode(field).skip_decode(field)
    }

    /// Never writes `field` to the tree.
    pub fn skip_encode(mut self, field: &'static str) -> Self {
        if !self.skip_encode.contains(&field) {
            self.skip_encode.push(field);
        }
        self
    }

    /// Ignores any incoming value of `field`.
    pub fn skip_decode(mut self, field: &'static str) -> Self {
        if !self.skip_decode.contains(&field) {
            self.skip_decode.push(field);
        }
        self
    }

    /// Removes `field` from the encoded mapping when `predicate` holds.
    pub fn skip_if(mut self, field: &'static str, predicate: SkipIf) -> Self {
        self.skip_if.push((field, predicate));
        self
    }

    /// Ignores the incoming value of `field` when `predicate` holds.
    pub fn skip_decode_if(mut self, field: &'static str, predicate: SkipIf) -> Self {
        self.skip_decode_if.push((field, predicate));
        self
    }

    /// Writes and reads `field` under `key`.
    pub fn rename(mut self, field: &'static str, key: &'static str) -> Self {
        self.rename.push((field, key));
        self
    }

    /// `true` when no rule is declared.
    pub fn is_empty(&self) -> bool {
        self.skip_encode.is_empty()
            && self.skip_decode.is_empty()
            && self.skip_if.is_empty()
            && self.skip_decode_if.is_empty()
            && self.rename.is_empty()
    }

    #[inline]
    pub fn is_skipped_on_encode(&self, field: &str) -> bool {
        self.skip_encode.contains(&field)
    }

    #[inline]
    pub fn is_skipped_on_decode(&self, field: &str) -> bool {
        self.skip_decode.contains(&field)
    }

    pub fn encode_predicate(&self, field: &str) -> Option<&SkipIf> {
        self.skip_if
            .iter()
            .find_map(|(name, predicate)| (*name == field).then_some(predicate))
    }

    pub fn decode_predicate(&self, field: &str) -> Option<&SkipIf> {
        self.skip_decode_if
            .iter()
            .find_map(|(name, predicate)| (*name == field).then_some(predicate))
    }

    /// Returns the key `field` is written and read under.
    pub fn output_key<'a>(&self, field: &'a str) -> &'a str {
        self.rename
            .iter()
            .find_map(|(name, key)| (*name == field).then_some(*key))
            .unwrap_or(field)
    }

    /// Every field name mentioned by a rule, with repetitions.
    pub fn mentioned_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.skip_encode
            .iter()
            .chain(self.skip_decode.iter())
            .copied()
            .chain(self.skip_if.iter().map(|(name, _)| *name))
            .chain(self.skip_decode_if.iter().map(|(name, _)| *name))
            .chain(self.rename.iter().map(|(name, _)| *name))
    }

    #[inline]
    pub fn renames(&self) -> &[(&'static str, &'static str)] {
        &self.rename
    }

    /// Applies skip, then skip-if, then rename to a mapping keyed by field
    /// names.
    ///
    /// A failing predicate aborts with the name of its field.
    pub fn apply_encode(&self, mapping: &mut Mapping) -> Result<(), (&'static str, PredicateError)> {
        for field in &self.skip_encode {
            mapping.remove(field);
        }

        for (field, predicate) in &self.skip_if {
            let Some(value) = mapping.get(field) else {
                continue;
            };
            if predicate.test(value).map_err(|err| (*field, err))? {
                mapping.remove(field);
            }
        }

        for (field, key) in &self.rename {
            mapping.rename_key(field, key);
        }
        Ok(())
    }

    /// Whether the incoming `value` of `field` should be ignored.
    pub fn ignores_on_decode(&self, field: &str, value: &Value) -> Result<bool, PredicateError> {
        if self.is_skipped_on_decode(field) {
            return Ok(true);
        }
        match self.decode_predicate(field) {
            Some(predicate) => predicate.test(value),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{FieldPolicy, PredicateError, SkipIf, is_empty, is_false, is_null, is_zero};
    use crate::value::{Mapping, Value};

    fn under_18(value: &Value) -> bool {
        value
            .as_scalar()
            .and_then(|s| s.as_u64())
            .is_some_and(|age| age < 18)
    }

    fn person(age: u32) -> Mapping {
        let mut mapping = Mapping::new();
        mapping.insert("name", Value::from("Jane"));
        mapping.insert("age", Value::from(age));
        mapping
    }

    fn keys(mapping: &Mapping) -> Vec<&str> {
        mapping.keys().filter_map(Value::as_str).collect()
    }

    #[test]
    fn skip_if_threshold() {
        let policy = FieldPolicy::new().skip_if("age", SkipIf::new(under_18));

        let mut young = person(15);
        policy.apply_encode(&mut young).unwrap();
        assert_eq!(keys(&young), ["name"]);

        let mut adult = person(18);
        policy.apply_encode(&mut adult).unwrap();
        assert_eq!(keys(&adult), ["name", "age"]);
    }

    #[test]
    fn skipped_field_is_not_evaluated_or_renamed() {
        fn always_fails(_: &Value) -> Result<bool, PredicateError> {
            Err(PredicateError::new("must not run"))
        }

        let policy = FieldPolicy::new()
            .skip("age")
            .skip_if("age", SkipIf::fallible(always_fails))
            .rename("age", "years");

        let mut mapping = person(30);
        policy.apply_encode(&mut mapping).unwrap();
        assert_eq!(keys(&mapping), ["name"]);
    }

    #[test]
    fn rename_keeps_position() {
        let policy = FieldPolicy::new().rename("name", "full_name");
        let mut mapping = person(30);
        policy.apply_encode(&mut mapping).unwrap();

        assert_eq!(keys(&mapping), ["full_name", "age"]);
        assert_eq!(policy.output_key("name"), "full_name");
        assert_eq!(policy.output_key("age"), "age");
    }

    #[test]
    fn failing_predicate_names_its_field() {
        fn picky(_: &Value) -> Result<bool, PredicateError> {
            Err(PredicateError::new("cannot judge"))
        }

        let policy = FieldPolicy::new().skip_if("age", SkipIf::fallible(picky));
        let mut mapping = person(30);
        let (field, err) = policy.apply_encode(&mut mapping).unwrap_err();

        assert_eq!(field, "age");
        assert_eq!(err, PredicateError::new("cannot judge"));
    }

    #[test]
    fn decode_rules() {
        let policy = FieldPolicy::new()
            .skip_decode("cache")
            .skip_decode_if("nick", SkipIf::new(is_empty));

        assert!(policy.ignores_on_decode("cache", &Value::from(1_u8)).unwrap());
        assert!(policy.ignores_on_decode("nick", &Value::from("")).unwrap());
        assert!(!policy.ignores_on_decode("nick", &Value::from("JD")).unwrap());
        assert!(!policy.is_skipped_on_encode("cache"));
    }

    #[test]
    fn builtin_predicates() {
        assert!(is_null(&Value::NULL));
        assert!(is_empty(&Value::Sequence(Vec::new())));
        assert!(is_false(&Value::from(false)));
        assert!(!is_false(&Value::from(true)));
        assert!(is_zero(&Value::from(0_i32)));
        assert!(is_zero(&Value::from(0.0_f64)));
        assert!(!is_zero(&Value::from("0")));
    }
}
