//! Keyed field access for list items.
//!
//! [`SnapshotList::delete`](crate::SnapshotList::delete) and the `find`
//! family select items by comparing one named field against a JSON value.
//! Items opt in by implementing [`Field`].

use std::borrow::Cow;
use std::rc::Rc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::store_object::StoreObject;

/// Read access to a named field of an item, as a JSON value.
///
/// Returns `None` when the item has no such field. Two fields match when
/// [`strict_eq`] holds; a missing field never matches.
pub trait Field {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>>;

    /// Returns `true` if field `key` is present and equal to `value`.
    fn field_eq(&self, key: &str, value: &Value) -> bool {
        match self.field(key) {
            Some(field) => strict_eq(field.as_ref(), value),
            None => false,
        }
    }
}

/// Strict equality between two field values.
///
/// Numbers compare by numeric value, so `1` matches `1.0`. Everything else
/// uses `Value` equality.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

impl Field for Value {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        match self {
            Value::Object(map) => map.get(key).map(Cow::Borrowed),
            _ => None,
        }
    }
}

impl Field for Map<String, Value> {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        self.get(key).map(Cow::Borrowed)
    }
}

impl<T: Serialize> Field for StoreObject<T> {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        let data = serde_json::to_value(&self.data).ok()?;
        if key == "data" {
            return Some(Cow::Owned(data));
        }
        match data {
            Value::Object(mut map) => map.remove(key).map(Cow::Owned),
            _ => None,
        }
    }
}

impl<T: Field + ?Sized> Field for Rc<T> {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        (**self).field(key)
    }
}
