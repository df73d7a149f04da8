//! Scalar snapshot: a single value with one level of undo.

use std::fmt;

use log::{debug, trace};

type Factory<T> = Box<dyn Fn(T) -> T>;

/// A single value with a single-generation undo buffer.
///
/// Every value that enters the container passes through the factory, and so
/// does every capture and restore: [`change`](Self::change) records
/// `create(current)` as history and [`undo`](Self::undo) restores
/// `create(history)`. With a pure, idempotent factory the round trip is
/// exact. A factory that is not idempotent makes `undo` yield a value that
/// differs from the one held before the change.
pub struct SnapshotValue<T> {
    value: Option<T>,
    /// Outer `Some` means dirty; the inner option is the captured value,
    /// which may itself be absent if `change` ran before `create`.
    history: Option<Option<T>>,
    loaded: bool,
    create: Factory<T>,
}

impl<T: 'static> SnapshotValue<T> {
    /// Creates an empty container with an identity factory.
    pub fn new() -> Self {
        Self::with_factory(|value| value)
    }

    pub fn with_factory<F>(create: F) -> Self
    where
        F: Fn(T) -> T + 'static,
    {
        Self {
            value: None,
            history: None,
            loaded: false,
            create: Box::new(create),
        }
    }
}

impl<T: 'static> Default for SnapshotValue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SnapshotValue<T> {
    /// Sets the value to `create(raw)`, discards history and marks the
    /// container as loaded.
    pub fn create(&mut self, raw: T) {
        self.value = Some((self.create)(raw));
        self.history = None;
        self.loaded = true;
        debug!("snapshot value loaded");
    }

    /// Clears the value and history and the loaded flag.
    pub fn reset(&mut self) {
        self.value = None;
        self.history = None;
        self.loaded = false;
        debug!("snapshot value reset");
    }

    /// Replaces the value with `create(raw)`, capturing the previous value
    /// first if the container is clean.
    pub fn change(&mut self, raw: T)
    where
        T: Clone,
    {
        self.mark_dirty();
        self.value = Some((self.create)(raw));
    }

    fn mark_dirty(&mut self)
    where
        T: Clone,
    {
        if self.history.is_none() {
            trace!("snapshot value captured");
            let create = &self.create;
            self.history = Some(self.value.clone().map(|value| create(value)));
        }
    }

    /// Restores `create(history)`. No-op when clean.
    pub fn undo(&mut self) {
        if let Some(history) = self.history.take() {
            trace!("snapshot value rolled back");
            let create = &self.create;
            self.value = history.map(|value| create(value));
        }
    }

    /// Commits the current value.
    pub fn save(&mut self) {
        if self.history.take().is_some() {
            trace!("snapshot value committed");
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Returns the captured value while dirty.
    ///
    /// `None` both when clean and when the captured value was itself absent;
    /// use [`is_dirty`](Self::is_dirty) to tell them apart.
    pub fn history(&self) -> Option<&T> {
        self.history.as_ref().and_then(Option::as_ref)
    }

    pub fn is_dirty(&self) -> bool {
        self.history.is_some()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

impl<T: fmt::Debug> fmt::Debug for SnapshotValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotValue")
            .field("value", &self.value)
            .field("history", &self.history)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}
