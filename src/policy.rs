//! Locking strategy selection for the ordered containers.
//!
//! The containers in this crate are generic over a [`SharePolicy`] that
//! decides, at compile time, how their internal state is guarded:
//!
//! - [`Unsynchronized`] (the default): state lives in a [`RefCell`]. There is
//!   no lock cost, and the container is `Send` but deliberately **not**
//!   `Sync`, so the compiler rejects any attempt to share it across threads.
//! - [`Synchronized`]: state lives in a [`parking_lot::RwLock`]. Read-only
//!   operations take the shared lock, mutating operations the exclusive
//!   lock, and the container is `Send + Sync`.
//!
//! Selecting the strategy through a type parameter instead of a runtime
//! flag means the unsynchronized containers never pay for a branch or an
//! atomic, and misuse (sharing an unsynchronized container between threads)
//! is a compile error rather than a data race.
//!
//! # Reentrancy
//!
//! Neither policy supports reentrant access: a callback running under a
//! container's lock (such as the closure passed to `OrderedMap::for_each`)
//! must not call back into the same container. With [`Synchronized`] this
//! deadlocks on the exclusive lock; with [`Unsynchronized`] a conflicting
//! `RefCell` borrow panics.
//!
//! # Examples
//!
//! ```rust
//! use sortedlists::{OrderedSet, SyncOrderedSet};
//! use std::sync::Arc;
//! use std::thread;
//!
//! // Single-threaded: no locking at all.
//! let local: OrderedSet<i32> = OrderedSet::new();
//! local.insert(1);
//!
//! // Shared: every operation locks internally.
//! let shared = Arc::new(SyncOrderedSet::<i32>::default());
//! let worker = Arc::clone(&shared);
//! thread::spawn(move || worker.insert(2)).join().unwrap();
//! assert!(shared.contains(&2));
//! ```

use parking_lot::RwLock;
use std::cell::RefCell;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Unsynchronized {}
    impl Sealed for super::Synchronized {}
}

/// Compile-time locking strategy for a container's internal state.
///
/// This trait is sealed; the only implementations are [`Unsynchronized`]
/// and [`Synchronized`].
pub trait SharePolicy: sealed::Sealed {
    /// The cell type wrapping a container's state.
    type Storage<S>;

    /// Wraps freshly constructed state in the policy's storage cell.
    fn wrap<S>(state: S) -> Self::Storage<S>;

    /// Runs `reader` with shared access to the state.
    ///
    /// Under [`Synchronized`] this holds the shared (read) lock for the
    /// duration of the closure.
    fn read<S, R>(storage: &Self::Storage<S>, reader: impl FnOnce(&S) -> R) -> R;

    /// Runs `writer` with exclusive access to the state.
    ///
    /// Under [`Synchronized`] this holds the exclusive (write) lock for the
    /// duration of the closure.
    fn write<S, R>(storage: &Self::Storage<S>, writer: impl FnOnce(&mut S) -> R) -> R;
}

/// Lock-free single-threaded policy (the default).
///
/// Containers using this policy are `Send` but not `Sync`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsynchronized;

/// Reader/writer-locked policy for containers shared between threads.
///
/// Containers using this policy are `Send + Sync`; reads run concurrently,
/// writes are serialized.
#[derive(Debug, Clone, Copy, Default)]
pub struct Synchronized;

impl SharePolicy for Unsynchronized {
    type Storage<S> = RefCell<S>;

    #[inline]
    fn wrap<S>(state: S) -> RefCell<S> {
        RefCell::new(state)
    }

    #[inline]
    fn read<S, R>(storage: &RefCell<S>, reader: impl FnOnce(&S) -> R) -> R {
        reader(&*storage.borrow())
    }

    #[inline]
    fn write<S, R>(storage: &RefCell<S>, writer: impl FnOnce(&mut S) -> R) -> R {
        writer(&mut *storage.borrow_mut())
    }
}

impl SharePolicy for Synchronized {
    type Storage<S> = RwLock<S>;

    #[inline]
    fn wrap<S>(state: S) -> RwLock<S> {
        RwLock::new(state)
    }

    #[inline]
    fn read<S, R>(storage: &RwLock<S>, reader: impl FnOnce(&S) -> R) -> R {
        reader(&*storage.read())
    }

    #[inline]
    fn write<S, R>(storage: &RwLock<S>, writer: impl FnOnce(&mut S) -> R) -> R {
        writer(&mut *storage.write())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unsynchronized_read_sees_wrapped_state() {
        let storage = Unsynchronized::wrap(vec![1, 2, 3]);
        let length = Unsynchronized::read(&storage, |state| state.len());
        assert_eq!(length, 3);
    }

    #[rstest]
    fn unsynchronized_write_mutates_state() {
        let storage = Unsynchronized::wrap(Vec::new());
        Unsynchronized::write(&storage, |state| state.push(42));
        assert_eq!(Unsynchronized::read(&storage, Vec::len), 1);
    }

    #[rstest]
    fn synchronized_write_mutates_state() {
        let storage = Synchronized::wrap(Vec::new());
        Synchronized::write(&storage, |state| state.push(42));
        assert_eq!(Synchronized::read(&storage, Vec::len), 1);
    }
}
