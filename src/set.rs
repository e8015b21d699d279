//! Sorted unique-element sequence backed by a flat vector.
//!
//! [`OrderedSet`] keeps its elements in a single ascending `Vec<T>` and
//! maintains that order under every mutation: lookups are a binary search
//! (O(log n)) and insert/remove shift the tail of the vector (O(n) worst
//! case). The flat layout trades mutation cost for cache-friendly
//! iteration and a minimal footprint.
//!
//! # Examples
//!
//! ```rust
//! use sortedlists::OrderedSet;
//!
//! let ints = OrderedSet::from_elements(vec![5, 3, 4, 1, 2]);
//! assert_eq!(ints.to_sorted_vec(), vec![1, 2, 3, 4, 5]);
//!
//! ints.insert(6);
//! ints.remove(&3);
//! ints.rename(&4, 7);
//! assert_eq!(ints.to_sorted_vec(), vec![1, 2, 5, 6, 7]);
//! ```

use crate::policy::{SharePolicy, Synchronized, Unsynchronized};
use std::borrow::Borrow;
use std::fmt;

/// Initial capacity of a fresh (or cleared) backing vector.
const DEFAULT_CAPACITY: usize = 32;

/// A sorted set of unique elements stored in a flat ascending vector.
///
/// All methods take `&self`; mutation goes through the locking policy `P`
/// (see [`crate::policy`]). With the default [`Unsynchronized`] policy the
/// set is single-threaded and lock-free; [`SyncOrderedSet`] wraps every
/// operation in a reader/writer lock instead.
///
/// Failure is always signalled through return values (`bool` / `Option`),
/// never through panics: a duplicate insert, a missing element, or an
/// out-of-range index all degrade to a documented not-found result.
///
/// # Examples
///
/// ```rust
/// use sortedlists::OrderedSet;
///
/// let set = OrderedSet::<i32>::new();
/// assert!(set.insert(2));
/// assert!(set.insert(1));
/// assert!(!set.insert(2)); // duplicate: no-op
/// assert_eq!(set.to_sorted_vec(), vec![1, 2]);
/// ```
pub struct OrderedSet<T, P: SharePolicy = Unsynchronized> {
    data: P::Storage<Vec<T>>,
}

/// An [`OrderedSet`] guarded by a reader/writer lock, safe to share
/// between threads behind an `Arc`.
pub type SyncOrderedSet<T> = OrderedSet<T, Synchronized>;

impl<T: Clone + Ord> OrderedSet<T> {
    /// Creates an empty single-threaded set.
    ///
    /// The backing vector is pre-sized to a small default capacity so the
    /// first inserts do not reallocate. For a lockable set use
    /// [`SyncOrderedSet::default`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedlists::OrderedSet;
    ///
    /// let set: OrderedSet<i32> = OrderedSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_contents(Vec::new())
    }

    /// Creates a single-threaded set from initial contents, sorting them
    /// ascending.
    ///
    /// Duplicates in `elements` are **not** filtered out here; construction
    /// only establishes order, and uniqueness is enforced by later
    /// [`insert`](Self::insert) calls. Pass deduplicated input if strict
    /// set semantics matter from the start.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedlists::OrderedSet;
    ///
    /// let set = OrderedSet::from_elements(vec![5, 3, 4, 1, 2]);
    /// assert_eq!(set.to_sorted_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    #[must_use]
    pub fn from_elements(elements: Vec<T>) -> Self {
        Self::with_contents(elements)
    }
}

impl<T: Clone + Ord, P: SharePolicy> OrderedSet<T, P> {
    /// Sorts the initial contents and wraps them in the policy storage.
    fn with_contents(mut elements: Vec<T>) -> Self {
        if elements.is_empty() {
            elements = Vec::with_capacity(DEFAULT_CAPACITY);
        } else {
            elements.sort_unstable();
        }
        Self {
            data: P::wrap(elements),
        }
    }

    /// Inserts an element, keeping the sequence sorted.
    ///
    /// Returns `true` if the element was inserted, `false` if an equal
    /// element was already present (the set is unchanged).
    ///
    /// # Complexity
    ///
    /// O(log n) search plus O(n) worst-case shift.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedlists::OrderedSet;
    ///
    /// let set = OrderedSet::<i32>::new();
    /// assert!(set.insert(42));
    /// assert!(!set.insert(42));
    /// ```
    pub fn insert(&self, element: T) -> bool {
        P::write(&self.data, |data| insert_element(data, element))
    }

    /// Removes an element.
    ///
    /// Returns `true` if the element was present and removed, `false`
    /// otherwise. Removing the sole element resets the backing vector to
    /// the default capacity.
    ///
    /// Accepts any borrowed form of `T`, so an `OrderedSet<String>` can be
    /// probed with a `&str`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedlists::OrderedSet;
    ///
    /// let set = OrderedSet::from_elements(vec![1, 2, 3]);
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    /// assert_eq!(set.to_sorted_vec(), vec![1, 3]);
    /// ```
    pub fn remove<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        P::write(&self.data, |data| remove_element(data, element))
    }

    /// Returns the position of `element` in the sorted sequence, or `None`
    /// if it is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedlists::OrderedSet;
    ///
    /// let set = OrderedSet::from_elements(vec![10, 20, 30]);
    /// assert_eq!(set.find_index(&20), Some(1));
    /// assert_eq!(set.find_index(&25), None);
    /// ```
    #[must_use]
    pub fn find_index<Q>(&self, element: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        P::read(&self.data, |data| {
            data.binary_search_by(|probe| probe.borrow().cmp(element))
                .ok()
        })
    }

    /// Returns a clone of the element at `index`, or `None` when the index
    /// is out of range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedlists::OrderedSet;
    ///
    /// let set = OrderedSet::from_elements(vec![3, 1, 2]);
    /// assert_eq!(set.get(0), Some(1));
    /// assert_eq!(set.get(9), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        P::read(&self.data, |data| data.get(index).cloned())
    }

    /// Returns `true` if the set contains `element`.
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_index(element).is_some()
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        P::read(&self.data, Vec::len)
    }

    /// Returns `true` if the set holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        P::read(&self.data, Vec::is_empty)
    }

    /// Returns a clone of the smallest element, or `None` if empty.
    #[must_use]
    pub fn first(&self) -> Option<T> {
        self.get(0)
    }

    /// Returns a clone of the largest element, or `None` if empty.
    #[must_use]
    pub fn last(&self) -> Option<T> {
        P::read(&self.data, |data| data.last().cloned())
    }

    /// Returns a defensive copy of the sorted contents.
    ///
    /// The caller may mutate the returned vector freely; the set's internal
    /// state is unaffected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedlists::OrderedSet;
    ///
    /// let set = OrderedSet::from_elements(vec![2, 1]);
    /// let mut copy = set.to_sorted_vec();
    /// copy.push(99);
    /// assert_eq!(set.to_sorted_vec(), vec![1, 2]);
    /// ```
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<T> {
        P::read(&self.data, Clone::clone)
    }

    /// Removes all elements, resetting the backing vector to the default
    /// capacity.
    pub fn clear(&self) {
        P::write(&self.data, |data| {
            *data = Vec::with_capacity(DEFAULT_CAPACITY);
        });
    }

    /// Replaces `old_value` with `new_value`, keeping the sequence sorted.
    ///
    /// The outcome depends on what is present:
    ///
    /// - empty set, or `old_value == new_value`: nothing happens, `false`;
    /// - `old_value` absent: behaves exactly like
    ///   [`insert(new_value)`](Self::insert) and returns that result;
    /// - `old_value` present, `new_value` absent: the element is moved to
    ///   its new sorted position, `true`;
    /// - both present: the two entries collapse into one; `old_value` is
    ///   removed and no duplicate of `new_value` is ever created, `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedlists::OrderedSet;
    ///
    /// let set = OrderedSet::from_elements(vec![1, 2, 3]);
    /// assert!(set.rename(&2, 9));
    /// assert_eq!(set.to_sorted_vec(), vec![1, 3, 9]);
    ///
    /// // Renaming onto an existing element merges the pair.
    /// assert!(set.rename(&9, 3));
    /// assert_eq!(set.to_sorted_vec(), vec![1, 3]);
    /// ```
    pub fn rename(&self, old_value: &T, new_value: T) -> bool {
        P::write(&self.data, |data| {
            if data.is_empty() || *old_value == new_value {
                return false;
            }
            if data.binary_search(old_value).is_err() {
                return insert_element(data, new_value);
            }
            // Inserting first is a no-op when new_value already exists,
            // which collapses the pair once old_value is dropped.
            insert_element(data, new_value);
            remove_element(data, old_value)
        })
    }
}

/// Binary-searches for the insertion point and shift-inserts `element`.
///
/// Returns `false` without touching `data` when an equal element exists.
fn insert_element<T: Ord>(data: &mut Vec<T>, element: T) -> bool {
    match data.binary_search(&element) {
        Ok(_) => false,
        Err(position) => {
            data.insert(position, element);
            true
        }
    }
}

/// Binary-searches for `element` and removes it if present.
fn remove_element<T, Q>(data: &mut Vec<T>, element: &Q) -> bool
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let Ok(position) = data.binary_search_by(|probe| probe.borrow().cmp(element)) else {
        return false;
    };
    if data.len() == 1 {
        // Sole element: reset the backing storage instead of shifting.
        *data = Vec::with_capacity(DEFAULT_CAPACITY);
    } else {
        data.remove(position);
    }
    true
}

/// An empty set under any locking policy; this is the way to construct a
/// [`SyncOrderedSet`]:
///
/// ```rust
/// use sortedlists::SyncOrderedSet;
///
/// let shared = SyncOrderedSet::<i32>::default();
/// shared.insert(1);
/// ```
impl<T: Clone + Ord, P: SharePolicy> Default for OrderedSet<T, P> {
    #[inline]
    fn default() -> Self {
        Self::with_contents(Vec::new())
    }
}

impl<T: Clone + Ord + fmt::Debug, P: SharePolicy> fmt::Debug for OrderedSet<T, P> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        P::read(&self.data, |data| {
            formatter.debug_set().entries(data.iter()).finish()
        })
    }
}

/// Renders the set as `[e1, e2, ..., en]` using each element's `Display`
/// form; an empty set renders as `[]`.
///
/// The format is meant for debugging output and is not a stable
/// machine-parseable contract.
///
/// # Examples
///
/// ```rust
/// use sortedlists::OrderedSet;
///
/// let set = OrderedSet::from_elements(vec![3, 1, 2]);
/// assert_eq!(set.to_string(), "[1, 2, 3]");
/// assert_eq!(OrderedSet::<i32>::new().to_string(), "[]");
/// ```
impl<T: Clone + Ord + fmt::Display, P: SharePolicy> fmt::Display for OrderedSet<T, P> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        P::read(&self.data, |data| {
            formatter.write_str("[")?;
            for (index, element) in data.iter().enumerate() {
                if index > 0 {
                    formatter.write_str(", ")?;
                }
                write!(formatter, "{element}")?;
            }
            formatter.write_str("]")
        })
    }
}

impl<T, P, P2> PartialEq<OrderedSet<T, P2>> for OrderedSet<T, P>
where
    T: Clone + Ord,
    P: SharePolicy,
    P2: SharePolicy,
{
    fn eq(&self, other: &OrderedSet<T, P2>) -> bool {
        self.to_sorted_vec() == other.to_sorted_vec()
    }
}

impl<T: Clone + Ord, P: SharePolicy> Eq for OrderedSet<T, P> {}

/// Iterates over a snapshot of the set in ascending order, yielding owned
/// elements. Mutations made after the iterator is created are not
/// reflected.
impl<T: Clone + Ord, P: SharePolicy> IntoIterator for &OrderedSet<T, P> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.to_sorted_vec().into_iter()
    }
}
