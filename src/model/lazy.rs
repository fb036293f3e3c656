/*!
 * Lazily computed, memoized attributes.
 *
 * A `LazyAttr` holds a single slot that is filled by the first read and
 * returned unchanged by every later read. There is no way to reset the slot:
 * a fresh instance is needed to force a recomputation.
 */

use once_cell::unsync::OnceCell;

/// A memoized attribute slot.
///
/// The slot is single-threaded (`!Sync`): concurrent first reads are rejected
/// at compile time rather than left to race.
#[derive(Debug, Clone)]
pub struct LazyAttr<T> {
    slot: OnceCell<T>,
}

impl<T> LazyAttr<T> {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }

    /// Return the cached value, computing it with `derive` on the first call.
    pub fn get_or_compute<F>(&self, derive: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.slot.get_or_init(derive)
    }

    /// Return the cached value, computing it with a fallible `derive` on the first call.
    ///
    /// Errors are not cached: a failed derivation is retried on the next read.
    pub fn get_or_try_compute<F, E>(&self, derive: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.slot.get_or_try_init(derive)
    }

    /// Return the cached value without computing it.
    pub fn peek(&self) -> Option<&T> {
        self.slot.get()
    }

    /// Whether the value has been computed yet.
    pub fn is_computed(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl<T> Default for LazyAttr<T> {
    fn default() -> Self {
        Self::new()
    }
}
