//! Collection snapshot: an ordered list with one level of undo.
//!
//! # Overview
//!
//! A [`SnapshotList`] holds:
//!
//! - The live `items`, in insertion order.
//! - An optional `history`: a shallow copy of `items` taken by the first
//!   mutation since the last commit or rollback. Later mutations leave it
//!   alone, so [`SnapshotList::undo`] always returns to the state before the
//!   first of them.
//! - An optional staged insert, built with [`SnapshotList::stage_insert`] and
//!   later merged with [`SnapshotList::commit_staged_insert`] or dropped with
//!   [`SnapshotList::discard_staged_insert`]. Staging is independent of
//!   history.
//!
//! Items are stored as `Rc<T>`. Taking a snapshot clones the vector, not the
//! items, and the container never hands out `&mut T`, so an item is immutable
//! once inserted.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use log::{debug, trace};
use serde_json::Value;

use crate::error::SnapshotError;
use crate::field::Field;
use crate::store_object::StoreObject;

type Factory<R, T> = Box<dyn Fn(R) -> T>;
type SortMethod<T> = Box<dyn Fn(&[Rc<T>]) -> Vec<Rc<T>>>;

/// Ordered list of items with a single-generation undo buffer.
///
/// `R` is the raw input type accepted by [`create`](Self::create),
/// [`add`](Self::add) and friends; `T` is the item type produced from it by
/// the factory. With the default factory, items are [`StoreObject<R>`].
///
/// The factory must be pure: it runs on every insert, and a list built from
/// the same raw input is expected to hold equal items.
pub struct SnapshotList<R, T = StoreObject<R>> {
    items: Vec<Rc<T>>,
    history: Option<Vec<Rc<T>>>,
    pending: Option<Rc<T>>,
    loaded: bool,
    create: Factory<R, T>,
    sort: SortMethod<T>,
}

impl<R: 'static> SnapshotList<R> {
    /// Creates an empty list that wraps every raw value in a [`StoreObject`].
    pub fn new() -> Self {
        Self::with_factory(StoreObject::create)
    }
}

impl<R: 'static> Default for SnapshotList<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: 'static, T: 'static> SnapshotList<R, T> {
    /// Creates an empty list that builds items with `create`.
    ///
    /// [`all`](Self::all) returns items in stored order until a display sort
    /// is set with [`with_sort`](Self::with_sort).
    pub fn with_factory<F>(create: F) -> Self
    where
        F: Fn(R) -> T + 'static,
    {
        Self {
            items: Vec::new(),
            history: None,
            pending: None,
            loaded: false,
            create: Box::new(create),
            sort: Box::new(|items: &[Rc<T>]| items.to_vec()),
        }
    }

    /// Replaces the display transform applied by [`all`](Self::all).
    pub fn with_sort<S>(mut self, sort: S) -> Self
    where
        S: Fn(&[Rc<T>]) -> Vec<Rc<T>> + 'static,
    {
        self.sort = Box::new(sort);
        self
    }
}

impl<R, T> SnapshotList<R, T> {
    // ──────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ──────────────────────────────────────────────────────────────────────

    /// Replaces the contents with one item per raw value, in order.
    ///
    /// Discards any pending history and marks the list as loaded. A staged
    /// insert survives.
    pub fn create<I>(&mut self, raw: I)
    where
        I: IntoIterator<Item = R>,
    {
        let create = &self.create;
        self.items = raw.into_iter().map(|r| Rc::new(create(r))).collect();
        self.history = None;
        self.loaded = true;
        debug!("snapshot list loaded with {} items", self.items.len());
    }

    /// Empties the list, discards history and clears the loaded flag.
    ///
    /// A staged insert is left in place; call
    /// [`discard_staged_insert`](Self::discard_staged_insert) to drop it.
    pub fn reset(&mut self) {
        self.items.clear();
        self.history = None;
        self.loaded = false;
        debug!("snapshot list reset");
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    // ──────────────────────────────────────────────────────────────────────
    // Undoable mutations
    // ──────────────────────────────────────────────────────────────────────

    fn mark_dirty(&mut self) {
        if self.history.is_none() {
            trace!("snapshot list captured {} items", self.items.len());
            self.history = Some(self.items.clone());
        }
    }

    /// Builds an item from `raw` and inserts it at the front.
    ///
    /// The change stays pending until [`save`](Self::save) or
    /// [`undo`](Self::undo).
    pub fn add(&mut self, raw: R) -> Rc<T> {
        self.mark_dirty();
        let item = Rc::new((self.create)(raw));
        self.items.insert(0, Rc::clone(&item));
        item
    }

    /// Builds an item from `raw` and inserts it at the end.
    pub fn append(&mut self, raw: R) -> Rc<T> {
        self.mark_dirty();
        let item = Rc::new((self.create)(raw));
        self.items.push(Rc::clone(&item));
        item
    }

    /// Removes every item whose field `key` equals `value`.
    ///
    /// Survivors keep their relative order. Items without the field are
    /// kept. Marks the list dirty even if nothing matched.
    pub fn delete(&mut self, key: &str, value: &Value)
    where
        T: Field,
    {
        self.mark_dirty();
        self.items.retain(|item| !item.field_eq(key, value));
    }

    /// Commits every mutation since the last commit or rollback.
    pub fn save(&mut self) {
        if self.history.take().is_some() {
            trace!("snapshot list committed");
        }
    }

    /// Restores the items captured by the first mutation since the last
    /// commit or rollback. No-op when clean.
    pub fn undo(&mut self) {
        if let Some(history) = self.history.take() {
            trace!("snapshot list rolled back to {} items", history.len());
            self.items = history;
        }
    }

    /// Returns `true` while there is history to roll back to.
    pub fn is_dirty(&self) -> bool {
        self.history.is_some()
    }

    pub fn history(&self) -> Option<&[Rc<T>]> {
        self.history.as_deref()
    }

    // ──────────────────────────────────────────────────────────────────────
    // Staged insert
    // ──────────────────────────────────────────────────────────────────────

    /// Builds an item from `raw` and holds it outside the list.
    ///
    /// Replaces any previously staged item. Neither the items nor the history
    /// are touched.
    pub fn stage_insert(&mut self, raw: R) -> Rc<T> {
        let item = Rc::new((self.create)(raw));
        self.pending = Some(Rc::clone(&item));
        item
    }

    /// Moves the staged item, if any, to the front of the list.
    ///
    /// This is not an undoable mutation: history is not captured.
    pub fn commit_staged_insert(&mut self) {
        if let Some(item) = self.pending.take() {
            self.items.insert(0, item);
        }
    }

    /// Drops the staged item, if any.
    pub fn discard_staged_insert(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&Rc<T>> {
        self.pending.as_ref()
    }

    // ──────────────────────────────────────────────────────────────────────
    // Lookup
    // ──────────────────────────────────────────────────────────────────────

    /// Returns the first item whose field `key` equals `value`.
    ///
    /// Falls back to the staged item when no live item matches.
    pub fn find(&self, key: &str, value: &Value) -> Option<&T>
    where
        T: Field,
    {
        self.items
            .iter()
            .find(|item| item.field_eq(key, value))
            .or_else(|| self.pending.as_ref().filter(|item| item.field_eq(key, value)))
            .map(|item| &**item)
    }

    /// Like [`find`](Self::find), but searches the history only.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::NoHistory`] when the list is clean.
    pub fn find_in_history(&self, key: &str, value: &Value) -> Result<Option<&T>, SnapshotError>
    where
        T: Field,
    {
        let history = self.history.as_ref().ok_or(SnapshotError::NoHistory)?;
        Ok(history
            .iter()
            .find(|item| item.field_eq(key, value))
            .map(|item| &**item))
    }

    /// Returns the first item for which `pred` holds.
    pub fn find_first<P>(&self, mut pred: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|&item| pred(item))
    }

    // ──────────────────────────────────────────────────────────────────────
    // Views
    // ──────────────────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Rc<T>] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter().map(|item| &**item)
    }

    /// Returns the items passed through the configured display sort.
    pub fn all(&self) -> Vec<Rc<T>> {
        (self.sort)(&self.items)
    }

    pub fn map<U, F>(&self, f: F) -> Vec<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(f).collect()
    }

    pub fn filter<P>(&self, mut pred: P) -> Vec<Rc<T>>
    where
        P: FnMut(&T) -> bool,
    {
        self.items
            .iter()
            .filter(|item| pred(&***item))
            .cloned()
            .collect()
    }

    // ──────────────────────────────────────────────────────────────────────
    // Reordering (not undoable)
    // ──────────────────────────────────────────────────────────────────────

    /// Stable-sorts the items with `cmp`. Does not capture history.
    pub fn sort_in_place<C>(&mut self, mut cmp: C)
    where
        C: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(|a, b| cmp(&**a, &**b));
    }

    /// Reverses the item order. Does not capture history.
    pub fn reverse_in_place(&mut self) {
        self.items.reverse();
    }
}

impl<R, T: fmt::Debug> fmt::Debug for SnapshotList<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotList")
            .field("items", &self.items)
            .field("history", &self.history)
            .field("pending", &self.pending)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}
