//! Domain types shared by the ranking engine and the search service.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One row of a domain dataset.
///
/// Keys keep the order they were inserted in (header order when loaded from a
/// CSV file, schema order after projection). Every value is plain text; a row
/// that is shorter than its header simply lacks the trailing keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self { Self::default() }

    /// Sets `key` to `value`, replacing an earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize { self.fields.len() }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copies the named fields, in the order given, into a new record.
    /// Names missing from `self` are skipped rather than filled with "".
    pub fn project<S: AsRef<str>>(&self, fields: &[S]) -> Record {
        fields
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                self.get(name).map(|value| (name.to_string(), value.to_string()))
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Relevance of one document of a fitted corpus.
///
/// `index` is the document's position in the collection passed to `fit`.
/// `score` is never negative; `0.0` means the document shares no vocabulary
/// with the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDoc {
    pub index: usize,
    pub score: f64,
}
