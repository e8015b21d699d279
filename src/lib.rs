//! # sortedlists
//!
//! Sorted set and sorted map containers backed by flat ordered arrays,
//! with compile-time selectable thread safety.
//!
//! ## Overview
//!
//! Two independent container types, both maintaining ascending order under
//! insert, remove, and rename through binary search (O(log n) lookup) and
//! array shifting (O(n) worst-case mutation):
//!
//! - [`OrderedSet`]: a sorted sequence of unique elements with positional
//!   access.
//! - [`OrderedMap`]: a unique-key map with a parallel sorted key index for
//!   ordered iteration and reverse lookup by value.
//!
//! Both are generic over a locking strategy (see [`policy`]): the default
//! is single-threaded and lock-free, while [`SyncOrderedSet`] /
//! [`SyncOrderedMap`] guard every operation with a reader/writer lock and
//! can be shared across threads behind an `Arc`.
//!
//! Every fallible operation reports through a `bool` or `Option`: missing
//! elements, out-of-range indexes, and rename collisions all degrade to a
//! documented not-found result rather than a panic.
//!
//! ## Example
//!
//! ```rust
//! use sortedlists::OrderedSet;
//!
//! let ints = OrderedSet::from_elements(vec![5, 3, 4, 1, 2]);
//!
//! ints.insert(6);
//! assert_eq!(ints.to_sorted_vec(), vec![1, 2, 3, 4, 5, 6]);
//!
//! ints.remove(&3);
//! assert_eq!(ints.to_sorted_vec(), vec![1, 2, 4, 5, 6]);
//!
//! ints.rename(&4, 7);
//! assert_eq!(ints.to_sorted_vec(), vec![1, 2, 5, 6, 7]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod map;
pub mod policy;
pub mod set;

pub use map::{OrderedMap, OrderedMapIter, SyncOrderedMap};
pub use policy::{SharePolicy, Synchronized, Unsynchronized};
pub use set::{OrderedSet, SyncOrderedSet};

use static_assertions::{assert_impl_all, assert_not_impl_any};

// The auto-trait contract behind the policy split: synchronized containers
// are shareable, unsynchronized ones are Send-only.
assert_impl_all!(SyncOrderedSet<i32>: Send, Sync);
assert_impl_all!(SyncOrderedMap<String, i32>: Send, Sync);
assert_impl_all!(OrderedSet<i32>: Send);
assert_impl_all!(OrderedMap<String, i32>: Send);
assert_not_impl_any!(OrderedSet<i32>: Sync);
assert_not_impl_any!(OrderedMap<String, i32>: Sync);
