//! A value that may be computed on first read.
//!
//! A [`Lazy`] is either ready (holding its value from the start) or deferred
//! (holding a computation). A deferred `Lazy` runs its computation the first
//! time [`force`][Lazy::force] is called, caches the result, and drops the
//! computation. Later reads return the cached value even if whatever the
//! computation captured has changed since.
//!
//! # Examples
//!
//! ```
//! use functree::Lazy;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let calls = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&calls);
//! let lazy = Lazy::deferred(move || {
//!     counter.set(counter.get() + 1);
//!     42
//! });
//!
//! assert!(!lazy.is_evaluated());
//! assert_eq!(calls.get(), 0);
//!
//! assert_eq!(*lazy.force(), 42);
//! assert_eq!(*lazy.force(), 42);
//! assert_eq!(calls.get(), 1);
//! ```
//!
//! `Lazy` is not `Sync`. Sharing one across threads would need a
//! synchronized once-cell in place of [`OnceCell`].

use log::trace;
use std::cell::{Cell, OnceCell};
use std::fmt;
use std::rc::Rc;

/// The pending computation of a deferred value. It is reference counted so a
/// deep copy of an unevaluated cell can hold the same computation.
type Thunk<T> = Rc<dyn Fn() -> T>;

/// A memoized value: computed at most once, on first read.
pub struct Lazy<T> {
    value: OnceCell<T>,
    /// Present until `value` is filled in.
    thunk: Cell<Option<Thunk<T>>>,
}

impl<T> Lazy<T> {
    /// Wraps an already computed value.
    pub fn ready(value: T) -> Self {
        Self {
            value: OnceCell::from(value),
            thunk: Cell::new(None),
        }
    }

    /// Defers `f` until the value is first read.
    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        Self {
            value: OnceCell::new(),
            thunk: Cell::new(Some(Rc::new(f))),
        }
    }

    /// Returns the value, running the pending computation if this is the
    /// first read.
    ///
    /// # Panics
    ///
    /// Panics if the computation reads this same cell. A panic raised by the
    /// computation itself propagates and leaves the cell unevaluated.
    pub fn force(&self) -> &T {
        let value = self.value.get_or_init(|| match self.pending() {
            Some(thunk) => {
                trace!("evaluating deferred value");
                thunk()
            }
            None => unreachable!("an unevaluated `Lazy` always holds its computation"),
        });
        // The computation is never needed again.
        self.thunk.set(None);
        value
    }

    /// Returns the value if it has already been computed, without computing it.
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    /// Whether the value has been computed.
    pub fn is_evaluated(&self) -> bool {
        self.value.get().is_some()
    }

    /// Clones the pending computation out of the cell, leaving it in place.
    fn pending(&self) -> Option<Thunk<T>> {
        let thunk = self.thunk.take();
        self.thunk.set(thunk.as_ref().map(Rc::clone));
        thunk
    }
}

impl<T> From<T> for Lazy<T> {
    fn from(value: T) -> Self {
        Self::ready(value)
    }
}

/// A clone of an unevaluated cell is itself unevaluated and runs the
/// computation on its own, independently of the original.
impl<T> Clone for Lazy<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        match self.value.get() {
            Some(value) => Self::ready(value.clone()),
            None => Self {
                value: OnceCell::new(),
                thunk: Cell::new(self.pending()),
            },
        }
    }
}

impl<T> fmt::Debug for Lazy<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => f.debug_tuple("Lazy").field(value).finish(),
            None => f.write_str("Lazy(<pending>)"),
        }
    }
}
