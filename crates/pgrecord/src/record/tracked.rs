use crate::value::{Param, SqlValue};
use std::ops::Deref;

/// A record field that remembers its last persisted value.
///
/// Every [`set`](Tracked::set) marks the field as touched, whether or not the
/// value actually changed; [`is_changed`](Tracked::is_changed) is the stricter
/// check that compares against the original.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tracked<T> {
    value: T,
    original: T,
    touched: bool,
}

impl<T: Clone> Tracked<T> {
    /// A clean field holding `value` as both current and original value.
    pub fn new(value: T) -> Self {
        Self {
            original: value.clone(),
            value,
            touched: false,
        }
    }

    /// Assign a new value and mark the field as touched.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.touched = true;
    }

    /// Make the current value the new baseline and clear the touched flag.
    pub fn mark_persisted(&mut self) {
        self.original = self.value.clone();
        self.touched = false;
    }
}

impl<T> Tracked<T> {
    pub fn get(&self) -> &T {
        &self.value
    }

    /// The last persisted (or initially loaded) value.
    pub fn original(&self) -> &T {
        &self.original
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: PartialEq> Tracked<T> {
    /// Touched and different from the original value.
    pub fn is_changed(&self) -> bool {
        self.touched && self.value != self.original
    }
}

impl<T> Deref for Tracked<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Clone> From<T> for Tracked<T> {
    fn from(value: T) -> Self {
        Tracked::new(value)
    }
}

/// Type-erased view of a [`Tracked`] field, used by statement builders.
pub trait FieldState: Send + Sync {
    fn is_touched(&self) -> bool;

    /// Touched and different from the original value.
    fn is_changed(&self) -> bool;

    /// The current value as a bindable parameter.
    fn value(&self) -> Param;

    /// The original value as a bindable parameter.
    fn original_value(&self) -> Param;

    fn mark_persisted(&mut self);
}

impl<T> FieldState for Tracked<T>
where
    T: SqlValue + Clone + PartialEq,
{
    fn is_touched(&self) -> bool {
        self.touched
    }

    fn is_changed(&self) -> bool {
        Tracked::is_changed(self)
    }

    fn value(&self) -> Param {
        Param::new(self.value.clone())
    }

    fn original_value(&self) -> Param {
        Param::new(self.original.clone())
    }

    fn mark_persisted(&mut self) {
        Tracked::mark_persisted(self)
    }
}
