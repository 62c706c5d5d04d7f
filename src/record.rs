//! Raw data records the hydrator reads from.
//!
//! A record only has to answer one question: is this key present, and if so
//! what value does it hold. A key mapped to `null`, `false`, `0` or `""` is
//! still present.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// String-keyed mapping of raw values
pub trait RawRecord {
    /// Value stored under `key`, `None` only when the key is absent
    fn lookup(&self, key: &str) -> Option<&Value>;

    fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }
}

impl RawRecord for Map<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl<S: BuildHasher> RawRecord for HashMap<String, Value, S> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl RawRecord for BTreeMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Objects expose their members; any other JSON value has no keys.
impl RawRecord for Value {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|object| object.get(key))
    }
}

impl<R: RawRecord + ?Sized> RawRecord for &R {
    fn lookup(&self, key: &str) -> Option<&Value> {
        (**self).lookup(key)
    }
}
