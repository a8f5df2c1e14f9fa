use alloc::vec::Vec;
use core::fmt;
use core::hash::{BuildHasher, Hash, Hasher};
use core::slice;

use hashbrown::HashTable;

use crate::hash::FixedHashState;
use crate::value::{Scalar, Value};

// -----------------------------------------------------------------------------
// Key hashing

fn hash_str(key: &str) -> u64 {
    let mut hasher = FixedHashState.build_hasher();
    hasher.write_u8(6);
    key.hash(&mut hasher);
    hasher.finish()
}

/// Hash of an indexable key. Floats and containers are not indexed.
fn hash_key(key: &Value) -> Option<u64> {
    let Value::Scalar(scalar) = key else {
        return None;
    };
    if let Scalar::Str(key) = scalar {
        return Some(hash_str(key));
    }

    let mut hasher = FixedHashState.build_hasher();
    match scalar {
        Scalar::Null => hasher.write_u8(0),
        Scalar::Bool(v) => (1_u8, v).hash(&mut hasher),
        Scalar::Int(v) => (2_u8, v).hash(&mut hasher),
        Scalar::UInt(v) => (3_u8, v).hash(&mut hasher),
        Scalar::Char(v) => (5_u8, v).hash(&mut hasher),
        Scalar::Float(_) | Scalar::Str(_) => return None,
    }
    Some(hasher.finish())
}

// -----------------------------------------------------------------------------
// Mapping

/// An ordered key-value container of the [`Value`] tree.
///
/// Entries keep their insertion order and keys are unique. Records use
/// string keys, but container mappings (e.g. `BTreeMap<u32, _>`) may use
/// any encoded key.
///
/// Scalar keys other than floats are hashed, so lookups and inserts take
/// constant time. Float and container keys are found by a linear scan.
///
/// # Examples
///
/// ```
/// use vc_marshal::value::{Mapping, Value};
///
/// let mut mapping = Mapping::new();
/// mapping.insert("name", Value::from("Jane"));
/// mapping.insert("age", Value::from(30_u32));
///
/// assert!(mapping.rename_key("name", "full_name"));
/// let keys: Vec<_> = mapping.keys().filter_map(Value::as_str).collect();
/// assert_eq!(keys, ["full_name", "age"]);
/// ```
#[derive(Clone, Default)]
pub struct Mapping {
    entries: Vec<(Value, Value)>,
    /// Positions in `entries` of the hashed keys.
    index: HashTable<usize>,
}

impl Mapping {
    /// Creates an empty mapping.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashTable::new(),
        }
    }

    /// Creates an empty mapping with space for `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashTable::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.index
            .find(hash_str(key), |&i| self.entries[i].0.as_str() == Some(key))
            .copied()
    }

    fn position_of(&self, key: &Value) -> Option<usize> {
        match hash_key(key) {
            Some(hash) => self.index.find(hash, |&i| self.entries[i].0 == *key).copied(),
            None => self.entries.iter().position(|(k, _)| k == key),
        }
    }

    /// Indexes the key of `entries[position]`.
    fn index_entry(&mut self, position: usize) {
        let entries = &self.entries;
        if let Some(hash) = hash_key(&entries[position].0) {
            self.index.insert_unique(hash, position, |&i| {
                hash_key(&entries[i].0).unwrap_or_default()
            });
        }
    }

    /// Drops the index slot of `entries[position]`.
    fn unindex_entry(&mut self, position: usize) {
        if let Some(hash) = hash_key(&self.entries[position].0)
            && let Ok(slot) = self.index.find_entry(hash, |&i| i == position)
        {
            slot.remove();
        }
    }

    /// Inserts an entry.
    ///
    /// If the key already exists its value is replaced in place (the entry
    /// keeps its position) and the old value is returned.
    pub fn insert(&mut self, key: impl Into<Value>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.position_of(&key) {
            Some(index) => Some(core::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                self.index_entry(self.entries.len() - 1);
                None
            }
        }
    }

    /// Returns the value stored under the string key `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    /// Returns the value stored under an arbitrary encoded key.
    #[inline]
    pub fn get_key(&self, key: &Value) -> Option<&Value> {
        self.position_of(key).map(|index| &self.entries[index].1)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Removes the entry with the string key `key`, preserving the order
    /// of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.position(key)?;
        self.unindex_entry(index);
        for slot in self.index.iter_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(self.entries.remove(index).1)
    }

    /// Replaces the key `from` with `to`, keeping the entry's position.
    ///
    /// Returns `false` if `from` is absent. The caller is responsible for
    /// `to` not being present already.
    pub fn rename_key(&mut self, from: &str, to: &str) -> bool {
        match self.position(from) {
            Some(index) => {
                self.unindex_entry(index);
                self.entries[index].0 = Value::from(to);
                self.index_entry(index);
                true
            }
            None => false,
        }
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over the values in insertion order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Returns an iterator over the entries in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.entries.iter())
    }
}

impl PartialEq for Mapping {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter().map(|(k, v)| (k, v))).finish()
    }
}

// -----------------------------------------------------------------------------
// Iterators

/// Borrowing iterator over the entries of a [`Mapping`].
pub struct Iter<'a>(slice::Iter<'a, (Value, Value)>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Value, &'a Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k, v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a Value, &'a Value);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Mapping {
    type Item = (Value, Value);
    type IntoIter = alloc::vec::IntoIter<(Value, Value)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<Value>> FromIterator<(K, Value)> for Mapping {
    /// Later duplicates overwrite earlier ones in place.
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut mapping = Mapping::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::Mapping;
    use crate::value::Value;

    fn keys(mapping: &Mapping) -> Vec<&str> {
        mapping.keys().filter_map(Value::as_str).collect()
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut mapping = Mapping::new();
        mapping.insert("a", Value::from(1_i32));
        mapping.insert("b", Value::from(2_i32));
        let old = mapping.insert("a", Value::from(3_i32));

        assert_eq!(old, Some(Value::from(1_i32)));
        assert_eq!(keys(&mapping), ["a", "b"]);
        assert_eq!(mapping.get("a"), Some(&Value::from(3_i32)));
    }

    #[test]
    fn remove_keeps_order() {
        let mapping: Mapping = [("a", Value::from(1_i32)), ("b", Value::from(2_i32)), ("c", Value::from(3_i32))]
            .into_iter()
            .collect();
        let mut mapping = mapping;
        assert!(mapping.remove("b").is_some());
        assert!(mapping.remove("b").is_none());
        assert_eq!(keys(&mapping), ["a", "c"]);
    }

    #[test]
    fn index_follows_removals_and_renames() {
        let mut mapping: Mapping = (0..1000_u32).map(|i| (Value::from(i), Value::from(i))).collect();
        mapping.insert("name", Value::from("Jane"));
        mapping.insert("age", Value::from(30_u32));
        assert_eq!(mapping.len(), 1002);

        assert!(mapping.remove("name").is_some());
        assert!(mapping.rename_key("age", "years"));
        assert!(!mapping.contains_key("age"));
        assert_eq!(mapping.get("years"), Some(&Value::from(30_u32)));
        assert_eq!(mapping.keys().last(), Some(&Value::from("years")));

        for i in (0..1000_u32).step_by(97) {
            assert_eq!(mapping.get_key(&Value::from(i)), Some(&Value::from(i)));
        }
        assert!(mapping.get_key(&Value::from(1000_u32)).is_none());
        // Signed and unsigned keys stay distinct.
        assert!(mapping.get_key(&Value::from(5_i64)).is_none());
    }

    #[test]
    fn many_string_keys() {
        let mut mapping = Mapping::new();
        for i in 0..50_000 {
            assert!(mapping.insert(alloc::format!("key{i}"), Value::from(i)).is_none());
        }
        assert_eq!(mapping.insert("key49999", Value::NULL), Some(Value::from(49_999)));
        assert_eq!(mapping.len(), 50_000);
        assert_eq!(mapping.keys().next(), Some(&Value::from("key0")));
    }

    #[test]
    fn float_keys_are_scanned() {
        let mut mapping = Mapping::new();
        mapping.insert(Value::from(1.5_f64), Value::from("a"));
        mapping.insert(Value::from(1.5_f64), Value::from("b"));

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get_key(&Value::from(1.5_f64)), Some(&Value::from("b")));
    }

    #[test]
    fn non_string_keys() {
        let mut mapping = Mapping::new();
        mapping.insert(Value::from(7_u32), Value::from("seven"));

        assert!(mapping.get("7").is_none());
        assert_eq!(mapping.get_key(&Value::from(7_u32)), Some(&Value::from("seven")));
    }
}
