//! Single-level undo/commit containers.
//!
//! This crate is a port of the `snapshot` package, an implementation of the
//! Memento pattern. Two independent containers share one state machine:
//!
//! - [`SnapshotList`] — an ordered list of items, plus a staged-insert slot.
//! - [`SnapshotValue`] — a single value.
//!
//! Each container is either *clean* or *dirty*. The first mutation after a
//! load, commit or rollback captures the current state; later mutations do
//! not replace that capture. [`save`](SnapshotList::save) drops it,
//! [`undo`](SnapshotList::undo) restores it. There is exactly one level of
//! undo.
//!
//! # Example
//!
//! ```
//! use snapshot::SnapshotList;
//! use serde_json::{json, Value};
//!
//! let mut list: SnapshotList<Value, Value> = SnapshotList::with_factory(|raw| raw);
//! list.create(vec![json!({"id": 1}), json!({"id": 2})]);
//!
//! list.delete("id", &json!(1));
//! list.add(json!({"id": 3}));
//! assert_eq!(list.len(), 2);
//!
//! // Undo returns to the state before the first mutation.
//! list.undo();
//! assert_eq!(list.map(|item| item["id"].clone()), vec![json!(1), json!(2)]);
//! ```
//!
//! Scalars work the same way:
//!
//! ```
//! use snapshot::SnapshotValue;
//!
//! let mut value = SnapshotValue::new();
//! value.create(5);
//! value.change(10);
//! assert_eq!(value.history(), Some(&5));
//! value.undo();
//! assert_eq!(value.value(), Some(&5));
//! ```

pub mod error;
pub mod field;
pub mod list;
pub mod store_object;
pub mod value;

pub use error::SnapshotError;
pub use field::{strict_eq, Field};
pub use list::SnapshotList;
pub use store_object::StoreObject;
pub use value::SnapshotValue;
