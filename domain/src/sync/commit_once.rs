//! Single-assignment cell with compare-and-set semantics.
//!
//! [`CommitOnce`] holds an optional value that starts empty and can be filled
//! exactly once. Every later commit attempt fails and reports the value that
//! won. Reads return a snapshot copy and never observe a partially written
//! value.
//!
//! The cell is backed by [`std::sync::OnceLock`]: a successful commit and the
//! subsequent reads synchronize through it, and reads after initialization are
//! lock-free. No lock is ever held by callers, so the cell is safe to consult
//! around `.await` points.

use std::sync::OnceLock;

/// A commit-once cell over a `Copy` value.
///
/// ```
/// use relay_domain::sync::CommitOnce;
///
/// let cell = CommitOnce::new();
/// assert_eq!(cell.get(), None);
/// assert_eq!(cell.try_commit(1), Ok(()));
/// assert_eq!(cell.try_commit(2), Err(1));
/// assert_eq!(cell.get(), Some(1));
/// ```
#[derive(Debug)]
pub struct CommitOnce<T> {
    value: OnceLock<T>,
}

impl<T: Copy> CommitOnce<T> {
    pub const fn new() -> Self {
        Self {
            value: OnceLock::new(),
        }
    }

    /// Snapshot of the committed value, if any.
    pub fn get(&self) -> Option<T> {
        self.value.get().copied()
    }

    /// Whether a value has been committed.
    pub fn is_committed(&self) -> bool {
        self.value.get().is_some()
    }

    /// Commit `value` if the cell is still empty.
    ///
    /// Returns `Err` with the already-committed value when another caller won.
    pub fn try_commit(&self, value: T) -> Result<(), T> {
        match self.value.set(value) {
            Ok(()) => Ok(()),
            Err(_) => Err(self.value.get().copied().unwrap_or(value)),
        }
    }
}

impl<T: Copy> Default for CommitOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}
