//! Sorted associative map backed by a hash map plus a flat key index.
//!
//! [`OrderedMap`] stores its entries in a `HashMap<K, V>` for O(1) key
//! lookup and keeps a parallel ascending `Vec<K>` of the keys for ordered
//! iteration. The two structures are maintained in lockstep: the key index
//! is always a sorted permutation of the map's key set.
//!
//! # Examples
//!
//! ```rust
//! use sortedlists::OrderedMap;
//!
//! let map = OrderedMap::new();
//! map.insert("b", 2);
//! map.insert("a", 1);
//! map.insert("c", 3);
//!
//! assert_eq!(map.keys(), vec!["a", "b", "c"]);
//!
//! let mut entries = Vec::new();
//! map.for_each(|key, value| entries.push((*key, *value)));
//! assert_eq!(entries, vec![("a", 1), ("b", 2), ("c", 3)]);
//! ```

use crate::policy::{SharePolicy, Synchronized, Unsynchronized};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// The map's internal state: the entries and the sorted key index.
struct MapState<K, V> {
    entries: HashMap<K, V>,
    key_order: Vec<K>,
}

impl<K, V> MapState<K, V> {
    fn empty() -> Self {
        Self {
            entries: HashMap::new(),
            key_order: Vec::new(),
        }
    }
}

/// A map with unique keys that iterates in ascending key order.
///
/// Values only need equality comparison (used by the reverse lookup
/// [`find_keys`](Self::find_keys)); keys must be totally ordered and
/// hashable. All methods take `&self`; mutation goes through the locking
/// policy `P` (see [`crate::policy`]).
///
/// Like [`OrderedSet`](crate::OrderedSet), every fallible operation
/// signals its outcome through `bool` / `Option` return values; there are
/// no panicking states reachable through normal use.
///
/// # Examples
///
/// ```rust
/// use sortedlists::OrderedMap;
///
/// let map = OrderedMap::new();
/// map.insert("answer".to_string(), 42);
/// assert_eq!(map.get("answer"), Some(42));
/// assert_eq!(map.get("question"), None);
/// ```
pub struct OrderedMap<K, V, P: SharePolicy = Unsynchronized> {
    state: P::Storage<MapState<K, V>>,
}

/// An [`OrderedMap`] guarded by a reader/writer lock, safe to share
/// between threads behind an `Arc`.
pub type SyncOrderedMap<K, V> = OrderedMap<K, V, Synchronized>;

impl<K: Clone + Ord + Hash, V: Clone + PartialEq> OrderedMap<K, V> {
    /// Creates an empty single-threaded map.
    ///
    /// For a lockable map use [`SyncOrderedMap::default`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedlists::OrderedMap;
    ///
    /// let map: OrderedMap<String, i32> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: Clone + Ord + Hash, V: Clone + PartialEq, P: SharePolicy> OrderedMap<K, V, P> {
    /// Adds or updates a key/value pair.
    ///
    /// An existing key has its value overwritten in place and the key index
    /// is untouched; a new key is shift-inserted into the index at its
    /// binary-search position. Always returns `true` (overwriting is not a
    /// failure, unlike the duplicate case of `OrderedSet::insert`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedlists::OrderedMap;
    ///
    /// let map = OrderedMap::new();
    /// assert!(map.insert("k", 1));
    /// assert!(map.insert("k", 2)); // overwrite, key index unchanged
    /// assert_eq!(map.get("k"), Some(2));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&self, key: K, value: V) -> bool {
        P::write(&self.state, |state| {
            if let Err(position) = state.key_order.binary_search(&key) {
                state.key_order.insert(position, key.clone());
            }
            state.entries.insert(key, value);
            true
        })
    }

    /// Removes a key/value pair.
    ///
    /// Returns `true` if the key was present; the key is removed from both
    /// the entries and the key index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedlists::OrderedMap;
    ///
    /// let map = OrderedMap::new();
    /// map.insert("k".to_string(), 1);
    /// assert!(map.remove("k"));
    /// assert!(!map.remove("k"));
    /// assert!(map.keys().is_empty());
    /// ```
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + Hash + Eq + ?Sized,
    {
        P::write(&self.state, |state| {
            if state.entries.remove(key).is_none() {
                return false;
            }
            if let Ok(position) = state
                .key_order
                .binary_search_by(|probe| probe.borrow().cmp(key))
            {
                state.key_order.remove(position);
            }
            true
        })
    }

    /// Returns a clone of the value stored under `key`, or `None`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        P::read(&self.state, |state| state.entries.get(key).cloned())
    }

    /// Returns `true` if `key` has an entry.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        P::read(&self.state, |state| state.entries.contains_key(key))
    }

    /// Returns every key whose value equals `value`, in ascending key
    /// order.
    ///
    /// This is a reverse lookup by value equality over all entries (O(n));
    /// duplicate-valued entries all match. The result is empty when no
    /// entry matches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedlists::OrderedMap;
    ///
    /// let map = OrderedMap::new();
    /// map.insert("y", 2);
    /// map.insert("x", 2);
    /// map.insert("z", 3);
    /// assert_eq!(map.find_keys(&2), vec!["x", "y"]);
    /// assert_eq!(map.find_keys(&9), Vec::<&str>::new());
    /// ```
    #[must_use]
    pub fn find_keys(&self, value: &V) -> Vec<K> {
        P::read(&self.state, |state| {
            state
                .key_order
                .iter()
                .filter(|key| {
                    state
                        .entries
                        .get(*key)
                        .is_some_and(|candidate| candidate == value)
                })
                .cloned()
                .collect()
        })
    }

    /// Returns a defensive copy of the sorted key index.
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        P::read(&self.state, |state| state.key_order.clone())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        P::read(&self.state, |state| state.key_order.len())
    }

    /// Returns `true` if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        P::read(&self.state, |state| state.key_order.is_empty())
    }

    /// Calls `visit` once per entry in ascending key order.
    ///
    /// The shared lock is held for the whole traversal, so the sweep is
    /// consistent even under a [`SyncOrderedMap`]. `visit` must not call
    /// back into the same map (see [`crate::policy`] on reentrancy).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedlists::OrderedMap;
    ///
    /// let map = OrderedMap::new();
    /// map.insert(2, "two");
    /// map.insert(1, "one");
    ///
    /// let mut rendered = String::new();
    /// map.for_each(|key, value| rendered.push_str(&format!("{key}={value};")));
    /// assert_eq!(rendered, "1=one;2=two;");
    /// ```
    pub fn for_each(&self, mut visit: impl FnMut(&K, &V)) {
        P::read(&self.state, |state| {
            for key in &state.key_order {
                if let Some(value) = state.entries.get(key) {
                    visit(key, value);
                }
            }
        });
    }

    /// Returns a single-use cursor over the entries in ascending key
    /// order, yielding owned `(key, value)` pairs.
    ///
    /// The cursor does **not** hold a lock across advances; each step
    /// briefly takes the shared lock on its own. Mutating the map during
    /// traversal is memory-safe but gives unspecified traversal results
    /// (entries may be skipped or repeated); use
    /// [`for_each`](Self::for_each) for a consistent lock-held sweep.
    /// Once the cursor reports the end it stays exhausted, even if entries
    /// are inserted afterwards; call `iter()` again for a fresh traversal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedlists::OrderedMap;
    ///
    /// let map = OrderedMap::new();
    /// map.insert("b", 2);
    /// map.insert("a", 1);
    ///
    /// let mut cursor = map.iter();
    /// assert_eq!(cursor.next(), Some(("a", 1)));
    /// assert_eq!(cursor.next(), Some(("b", 2)));
    /// assert_eq!(cursor.next(), None);
    ///
    /// map.insert("c", 3);
    /// assert_eq!(cursor.next(), None); // exhausted cursors stay exhausted
    /// ```
    #[must_use]
    pub fn iter(&self) -> OrderedMapIter<'_, K, V, P> {
        OrderedMapIter {
            map: self,
            position: 0,
            exhausted: false,
        }
    }

    /// Replaces `old_key` with `new_key`, keeping the stored value.
    ///
    /// Returns `false` and leaves the map untouched when `new_key` already
    /// has an entry, when `old_key` is absent, or when the two keys are
    /// equal. Otherwise the value moves to `new_key` and the key index is
    /// updated with a targeted remove + insert, `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedlists::OrderedMap;
    ///
    /// let map = OrderedMap::new();
    /// map.insert("a".to_string(), 1);
    /// assert!(map.rename(&"a".to_string(), "z".to_string()));
    /// assert_eq!(map.get("z"), Some(1));
    /// assert_eq!(map.get("a"), None);
    /// ```
    pub fn rename(&self, old_key: &K, new_key: K) -> bool {
        P::write(&self.state, |state| {
            if state.entries.contains_key(&new_key) {
                return false;
            }
            let Some(value) = state.entries.remove(old_key) else {
                return false;
            };
            if let Ok(position) = state.key_order.binary_search(old_key) {
                state.key_order.remove(position);
            }
            if let Err(position) = state.key_order.binary_search(&new_key) {
                state.key_order.insert(position, new_key.clone());
            }
            state.entries.insert(new_key, value);
            true
        })
    }

    /// Removes all entries from both the map and the key index.
    pub fn clear(&self) {
        P::write(&self.state, |state| {
            *state = MapState::empty();
        });
    }
}

impl<K: Clone + Ord + Hash, V: Clone + PartialEq, P: SharePolicy> Default for OrderedMap<K, V, P> {
    /// An empty map under any locking policy; this is the way to construct
    /// a [`SyncOrderedMap`]:
    ///
    /// ```rust
    /// use sortedlists::SyncOrderedMap;
    ///
    /// let shared = SyncOrderedMap::<String, i32>::default();
    /// shared.insert("k".to_string(), 1);
    /// ```
    #[inline]
    fn default() -> Self {
        Self {
            state: P::wrap(MapState::empty()),
        }
    }
}

impl<K, V, P> fmt::Debug for OrderedMap<K, V, P>
where
    K: Clone + Ord + Hash + fmt::Debug,
    V: Clone + PartialEq + fmt::Debug,
    P: SharePolicy,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        P::read(&self.state, |state| {
            formatter
                .debug_map()
                .entries(
                    state
                        .key_order
                        .iter()
                        .filter_map(|key| state.entries.get(key).map(|value| (key, value))),
                )
                .finish()
        })
    }
}

/// Renders the map as `"[key]\nvalue\n"` per entry in ascending key order.
///
/// The format is meant for debugging output and is not a stable
/// machine-parseable contract.
///
/// # Examples
///
/// ```rust
/// use sortedlists::OrderedMap;
///
/// let map = OrderedMap::new();
/// map.insert("b", 2);
/// map.insert("a", 1);
/// assert_eq!(map.to_string(), "[a]\n1\n[b]\n2\n");
/// ```
impl<K, V, P> fmt::Display for OrderedMap<K, V, P>
where
    K: Clone + Ord + Hash + fmt::Display,
    V: Clone + PartialEq + fmt::Display,
    P: SharePolicy,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        P::read(&self.state, |state| {
            for key in &state.key_order {
                if let Some(value) = state.entries.get(key) {
                    write!(formatter, "[{key}]\n{value}\n")?;
                }
            }
            Ok(())
        })
    }
}

impl<K, V, P, P2> PartialEq<OrderedMap<K, V, P2>> for OrderedMap<K, V, P>
where
    K: Clone + Ord + Hash,
    V: Clone + PartialEq,
    P: SharePolicy,
    P2: SharePolicy,
{
    fn eq(&self, other: &OrderedMap<K, V, P2>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut equal = true;
        self.for_each(|key, value| {
            if !other.get(key).is_some_and(|candidate| candidate == *value) {
                equal = false;
            }
        });
        equal
    }
}

impl<K: Clone + Ord + Hash, V: Clone + PartialEq + Eq, P: SharePolicy> Eq for OrderedMap<K, V, P> {}

impl<K: Clone + Ord + Hash, V: Clone + PartialEq, P: SharePolicy> FromIterator<(K, V)>
    for OrderedMap<K, V, P>
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterable: I) -> Self {
        let map = Self::default();
        for (key, value) in iterable {
            map.insert(key, value);
        }
        map
    }
}

impl<K: Clone + Ord + Hash, V: Clone + PartialEq, P: SharePolicy> Extend<(K, V)>
    for OrderedMap<K, V, P>
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            self.insert(key, value);
        }
    }
}

/// Single-use cursor over an [`OrderedMap`], created by
/// [`OrderedMap::iter`].
///
/// Yields owned `(key, value)` pairs in ascending key order. Each advance
/// takes the map's shared lock on its own; no lock is held between
/// advances. Exhaustion is sticky.
pub struct OrderedMapIter<'a, K, V, P: SharePolicy = Unsynchronized> {
    map: &'a OrderedMap<K, V, P>,
    position: usize,
    exhausted: bool,
}

impl<K: Clone + Ord + Hash, V: Clone + PartialEq, P: SharePolicy> Iterator
    for OrderedMapIter<'_, K, V, P>
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let entry = P::read(&self.map.state, |state| {
            let key = state.key_order.get(self.position)?;
            let value = state.entries.get(key)?;
            Some((key.clone(), value.clone()))
        });
        match entry {
            Some(pair) => {
                self.position += 1;
                Some(pair)
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            (0, Some(0))
        } else {
            // Concurrent mutation can change the length between advances,
            // so no upper bound is promised.
            (0, None)
        }
    }
}

/// Equivalent to calling [`OrderedMap::iter`].
impl<'a, K: Clone + Ord + Hash, V: Clone + PartialEq, P: SharePolicy> IntoIterator
    for &'a OrderedMap<K, V, P>
{
    type Item = (K, V);
    type IntoIter = OrderedMapIter<'a, K, V, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
