//! Scratch storage shared between events.
//!
//! Events sometimes need to remember a value across otherwise unrelated
//! definitions ("renown when the promise was made"). `TmpStore` keeps these
//! under namespaced string keys such as `"campaign.promised_renown"`. Keys
//! are a contract between the events that share them; nothing here checks
//! that two events agree on a key's type, so every read takes an explicit
//! default that is returned when the key is missing or holds another type.
//!
//! JSON has no NaN or infinity, so floats are made finite on the way in:
//! NaN is stored as 0.0 and infinities as `f64::MAX` / `f64::MIN`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single scratch value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TmpValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl TmpValue {
    /// Replaces a non-finite float with a finite stand-in.
    fn into_storable(self) -> Self {
        match self {
            TmpValue::Float(f) if f.is_nan() => TmpValue::Float(0.0),
            TmpValue::Float(f) if f.is_infinite() => {
                TmpValue::Float(if f > 0.0 { f64::MAX } else { f64::MIN })
            }
            other => other,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TmpValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            TmpValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            TmpValue::Float(f) => Some(*f),
            TmpValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TmpValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for TmpValue {
    fn from(value: bool) -> Self {
        TmpValue::Bool(value)
    }
}

impl From<i64> for TmpValue {
    fn from(value: i64) -> Self {
        TmpValue::Int(value)
    }
}

impl From<i32> for TmpValue {
    fn from(value: i32) -> Self {
        TmpValue::Int(i64::from(value))
    }
}

impl From<u32> for TmpValue {
    fn from(value: u32) -> Self {
        TmpValue::Int(i64::from(value))
    }
}

impl From<f64> for TmpValue {
    fn from(value: f64) -> Self {
        TmpValue::Float(value)
    }
}

impl From<&str> for TmpValue {
    fn from(value: &str) -> Self {
        TmpValue::Text(value.to_string())
    }
}

impl From<String> for TmpValue {
    fn from(value: String) -> Self {
        TmpValue::Text(value)
    }
}

/// Key-value scratch map carried in the game state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TmpStore {
    values: BTreeMap<String, TmpValue>,
}

impl TmpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value for a key, if any.
    pub fn get(&self, key: &str) -> Option<&TmpValue> {
        self.values.get(key)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(TmpValue::as_bool).unwrap_or(default)
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(TmpValue::as_int).unwrap_or(default)
    }

    pub fn get_float(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(TmpValue::as_float).unwrap_or(default)
    }

    pub fn get_text(&self, key: &str, default: &str) -> String {
        self.get(key)
            .and_then(TmpValue::as_text)
            .unwrap_or(default)
            .to_string()
    }

    /// Stores a value, replacing any previous value under the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<TmpValue>) {
        self.values.insert(key.into(), value.into().into_storable());
    }

    /// Removes a key, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<TmpValue> {
        self.values.remove(key)
    }

    /// Replaces an integer with `f(current)`, starting from `default` when absent.
    pub fn update_int(&mut self, key: &str, default: i64, f: impl FnOnce(i64) -> i64) -> i64 {
        let next = f(self.get_int(key, default));
        self.set(key, next);
        next
    }

    /// Replaces a float with `f(current)`, starting from `default` when absent.
    pub fn update_float(&mut self, key: &str, default: f64, f: impl FnOnce(f64) -> f64) -> f64 {
        let next = f(self.get_float(key, default));
        self.set(key, next);
        self.get_float(key, next)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
