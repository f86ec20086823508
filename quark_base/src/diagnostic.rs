//! A module for handling diagnostics (errors and log messages) produced by the front end.
//!
//! Every phase receives a `&dyn Handler<T>` from its caller.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

/// Represents a trait responsible for handling diagnostics.
pub trait Handler<T> {
    /// Receives a diagnostic and handles it.
    fn receive(&self, diagnostic: T);
}

/// Is a struct that implements [`Handler`] trait by storing all diagnostics in a vector.
#[derive(Debug)]
pub struct Storage<T: Send + Sync> {
    diagnostics: RwLock<Vec<T>>,
}

impl<T: Send + Sync> Storage<T> {
    /// Creates a new empty [`Storage`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            diagnostics: RwLock::new(Vec::new()),
        }
    }

    /// Consumes the [`Storage`] and returns the underlying vector of diagnostics.
    pub fn into_vec(self) -> Vec<T> {
        self.diagnostics
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a reference to the underlying vector of diagnostics.
    pub fn as_vec(&self) -> RwLockReadGuard<Vec<T>> {
        self.diagnostics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a mutable reference to the underlying vector of diagnostics.
    pub fn as_vec_mut(&self) -> RwLockWriteGuard<Vec<T>> {
        self.diagnostics
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Send + Sync> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Send + Sync, U> Handler<U> for Storage<T>
where
    U: Into<T>,
{
    fn receive(&self, diagnostic: U) { self.as_vec_mut().push(diagnostic.into()); }
}

/// Is a struct that implements [`Handler`] trait by doing nothing with the diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dummy;

impl<T> Handler<T> for Dummy {
    fn receive(&self, _diagnostic: T) {}
}

/// Is a struct that implements [`Handler`] trait by counting the number of diagnostics received.
#[derive(Debug, Default)]
pub struct Counter {
    counter: AtomicUsize,
}

impl Counter {
    /// Returns the number of diagnostics received.
    #[must_use]
    pub fn count(&self) -> usize { self.counter.load(Ordering::Relaxed) }
}

impl<T> Handler<T> for Counter {
    fn receive(&self, _diagnostic: T) { self.counter.fetch_add(1, Ordering::Relaxed); }
}
