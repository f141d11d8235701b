use std::collections::hash_map::Entry;
use std::fmt;

use ahash::AHashMap;
use faststr::FastStr;

use super::LazyValue;

/// The members of a JSON object, each value classified as a [`LazyValue`].
///
/// Members keep the order in which they first appeared. Key order carries no meaning in JSON, so
/// callers should look members up by key rather than by position.
#[derive(Clone, Default)]
pub struct Object(Vec<(FastStr, LazyValue)>);

impl Object {
    /// Creates an empty object.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    // A repeated key keeps its first position and takes its last value.
    pub(crate) fn from_entries(entries: Vec<(FastStr, LazyValue)>) -> Self {
        if entries.len() < 2 {
            return Self(entries);
        }
        let mut seen: AHashMap<FastStr, usize> = AHashMap::with_capacity(entries.len());
        let mut members: Vec<(FastStr, LazyValue)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match seen.entry(key) {
                Entry::Occupied(e) => members[*e.get()].1 = value,
                Entry::Vacant(e) => {
                    let key = e.key().clone();
                    e.insert(members.len());
                    members.push((key, value));
                }
            }
        }
        Self(members)
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the object has no members.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&LazyValue> {
        self.0.iter().find(|(k, _)| k.as_str() == key).map(|(_, v)| v)
    }

    /// Returns true if the object contains `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a member. If `key` was present its value is replaced in place and the old value
    /// is returned.
    pub fn insert<K: Into<FastStr>>(&mut self, key: K, value: LazyValue) -> Option<LazyValue> {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, old)) => Some(std::mem::replace(old, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    /// Removes `key` and returns its value, if present.
    pub fn remove(&mut self, key: &str) -> Option<LazyValue> {
        let pos = self.0.iter().position(|(k, _)| k.as_str() == key)?;
        Some(self.0.remove(pos).1)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter(self.0.iter())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &LazyValue> + '_ {
        self.0.iter().map(|(_, v)| v)
    }
}

/// An iterator over the members of an [`Object`].
pub struct Iter<'a>(std::slice::Iter<'a, (FastStr, LazyValue)>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a LazyValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a str, &'a LazyValue);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Object {
    type Item = (FastStr, LazyValue);
    type IntoIter = std::vec::IntoIter<(FastStr, LazyValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<FastStr>> FromIterator<(K, LazyValue)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, LazyValue)>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::JsonValueTrait;

    #[test]
    fn test_duplicate_keys() {
        let obj = Object::from_entries(vec![
            ("a".into(), LazyValue::from(1)),
            ("b".into(), LazyValue::from(2)),
            ("a".into(), LazyValue::from(3)),
        ]);
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(obj.get("a").as_i64(), Some(3));
    }

    #[test]
    fn test_object_edit() {
        let mut obj: Object = [("x", LazyValue::from(true))].into_iter().collect();
        assert!(obj.contains_key("x"));
        assert!(!obj.contains_key("y"));

        assert!(obj.insert("y", LazyValue::Null).is_none());
        let old = obj.insert("x", LazyValue::from("s")).unwrap();
        assert_eq!(old.as_bool(), Some(true));
        assert_eq!(obj.get("x").as_str(), Some("s"));

        assert!(obj.remove("y").unwrap().is_null());
        assert!(obj.remove("y").is_none());
        assert_eq!(obj.iter().len(), 1);

        let pairs: Vec<(FastStr, LazyValue)> = obj.into_iter().collect();
        assert_eq!(pairs[0].0.as_str(), "x");
    }
}
