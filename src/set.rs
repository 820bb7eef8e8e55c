//! Mutable ordered sets
//!
//! An ordered set of unique values, stored as a [`Map`] with unit values
//! so the balancing machinery lives in one place. On top of the map
//! operations the set offers algebra over whole sets: union,
//! intersection, difference, and symmetric difference build a new set
//! from two sorted walks in a single pass, and [`Set::unite`] moves one
//! set's elements into another without copying them.
//!
//! # Performance
//!
//! | Operation            | Complexity |
//! |----------------------|------------|
//! | contains             | O(log n)   |
//! | insert               | O(log n)   |
//! | remove               | O(log n)   |
//! | iterate              | O(n)       |
//! | union, intersection  | O(n + m)   |
//! | difference, unite    | O(n + m)   |
//!
//! # Example
//!
//! ```ignore
//! let evens: Set<i32> = (0..10).filter(|n| n % 2 == 0).collect();
//! let odds: Set<i32> = (0..10).filter(|n| n % 2 == 1).collect();
//!
//! assert_eq!(evens.union(&odds).len(), 10);
//! assert!(evens.intersection(&odds).is_empty());
//! assert!(evens.is_disjoint(&odds));
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::mem;

use crate::map::{self, Map};

/// A mutable ordered set of unique values.
#[derive(Clone)]
pub struct Set<T> {
    map: Map<T, ()>,
}

impl<T: Ord> Set<T> {
    /// Create an empty set.
    ///
    /// O(1) time and space.
    #[inline]
    pub fn new() -> Self {
        Set { map: Map::new() }
    }

    /// Check if the set is empty.
    ///
    /// O(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Return the number of elements in the set.
    ///
    /// O(1) time.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Remove every element. The set stays usable.
    ///
    /// O(n) time.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Check if a value is in the set.
    ///
    /// O(log n) time.
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    /// Add a value, returning whether it was newly added. Adding a value
    /// that is already present keeps the set unchanged except that the
    /// argument replaces the stored copy, so an owning element type
    /// releases the old allocation.
    ///
    /// O(log n) time.
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert(value, ()).is_none()
    }

    /// Remove a value, returning whether it was present. Removing an
    /// absent value is a no-op.
    ///
    /// O(log n) time.
    pub fn remove(&mut self, value: &T) -> bool {
        self.map.remove(value).is_some()
    }

    /// Get the smallest element.
    ///
    /// O(log n) time.
    pub fn min(&self) -> Option<&T> {
        self.map.min().map(|(value, _)| value)
    }

    /// Get the largest element.
    ///
    /// O(log n) time.
    pub fn max(&self) -> Option<&T> {
        self.map.max().map(|(value, _)| value)
    }

    /// Remove and return the smallest element.
    ///
    /// O(log n) time.
    pub fn remove_min(&mut self) -> Option<T> {
        self.map.remove_min().map(|(value, ())| value)
    }

    /// Iterate over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.map.iter(),
        }
    }

    /// Call a visitor once per element, in ascending order.
    ///
    /// O(n) time.
    pub fn visit<F>(&self, mut f: F)
    where
        F: FnMut(&T),
    {
        self.map.visit(|value, _| f(value));
    }

    /// Copy the elements out as a vector in ascending order.
    ///
    /// O(n) time.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        self.visit(|value| out.push(value.clone()));
        out
    }

    /// Render the elements in ascending order, separated by `separator`.
    ///
    /// O(n) time.
    pub fn join(&self, separator: &str) -> String
    where
        T: Display,
    {
        let mut out = String::new();
        let mut first = true;
        self.visit(|value| {
            if !first {
                out.push_str(separator);
            }
            first = false;
            out.push_str(&value.to_string());
        });
        out
    }

    /// Length of the longest root-to-leaf path; 0 for the empty set.
    /// Mainly useful for checking balance in tests.
    ///
    /// O(n) time.
    pub fn max_depth(&self) -> usize {
        self.map.max_depth()
    }

    // ------------------------------------------------------------
    // Set algebra
    // ------------------------------------------------------------

    /// Build the set of elements in `self`, in `other`, or in both.
    ///
    /// O(|self| + |other|) time.
    pub fn union(&self, other: &Set<T>) -> Set<T>
    where
        T: Clone,
    {
        self.merged(other, true, true, true)
    }

    /// Build the set of elements in both `self` and `other`.
    ///
    /// O(|self| + |other|) time.
    pub fn intersection(&self, other: &Set<T>) -> Set<T>
    where
        T: Clone,
    {
        self.merged(other, false, true, false)
    }

    /// Build the set of elements in `self` but not in `other`.
    ///
    /// O(|self| + |other|) time.
    pub fn difference(&self, other: &Set<T>) -> Set<T>
    where
        T: Clone,
    {
        self.merged(other, true, false, false)
    }

    /// Build the set of elements in exactly one of `self` and `other`.
    ///
    /// O(|self| + |other|) time.
    pub fn symmetric_difference(&self, other: &Set<T>) -> Set<T>
    where
        T: Clone,
    {
        self.merged(other, true, false, true)
    }

    /// Move every element of `other` into `self`, leaving `other` empty
    /// but usable. Elements transfer by move; when a value is in both
    /// sets the copy already in `self` is kept and the incoming
    /// duplicate is dropped.
    ///
    /// O(|self| + |other|) time.
    pub fn unite(&mut self, other: &mut Set<T>) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = mem::take(other);
            return;
        }
        let mut out: Vec<(T, ())> = Vec::with_capacity(self.len() + other.len());
        let mut xs = mem::take(self).into_iter();
        let mut ys = mem::take(other).into_iter();
        let mut x = xs.next();
        let mut y = ys.next();
        loop {
            match (x, y) {
                (None, None) => break,
                (Some(xv), None) => {
                    out.push((xv, ()));
                    x = xs.next();
                    y = None;
                }
                (None, Some(yv)) => {
                    out.push((yv, ()));
                    x = None;
                    y = ys.next();
                }
                (Some(xv), Some(yv)) => match xv.cmp(&yv) {
                    Ordering::Less => {
                        out.push((xv, ()));
                        x = xs.next();
                        y = Some(yv);
                    }
                    Ordering::Greater => {
                        out.push((yv, ()));
                        x = Some(xv);
                        y = ys.next();
                    }
                    Ordering::Equal => {
                        out.push((xv, ()));
                        drop(yv);
                        x = xs.next();
                        y = ys.next();
                    }
                },
            }
        }
        let len = out.len();
        self.map = Map::from_sorted_iter(out, len);
    }

    /// Check if every element of `self` is in `other`.
    ///
    /// O(|self| + |other|) time.
    pub fn is_subset_of(&self, other: &Set<T>) -> bool {
        if self.len() > other.len() {
            return false;
        }
        let mut xs = self.iter();
        let mut ys = other.iter();
        let mut x = xs.next();
        let mut y = ys.next();
        while let (Some(xv), Some(yv)) = (x, y) {
            match xv.cmp(yv) {
                // `other` is past `xv` without having produced it.
                Ordering::Less => return false,
                Ordering::Greater => y = ys.next(),
                Ordering::Equal => {
                    x = xs.next();
                    y = ys.next();
                }
            }
        }
        x.is_none()
    }

    /// Check if every element of `other` is in `self`.
    ///
    /// O(|self| + |other|) time.
    pub fn is_superset_of(&self, other: &Set<T>) -> bool {
        other.is_subset_of(self)
    }

    /// Check if `self` and `other` have no element in common.
    ///
    /// O(|self| + |other|) time.
    pub fn is_disjoint(&self, other: &Set<T>) -> bool {
        let mut xs = self.iter();
        let mut ys = other.iter();
        let mut x = xs.next();
        let mut y = ys.next();
        while let (Some(xv), Some(yv)) = (x, y) {
            match xv.cmp(yv) {
                Ordering::Less => x = xs.next(),
                Ordering::Greater => y = ys.next(),
                Ordering::Equal => return false,
            }
        }
        true
    }

    /// One-pass merge of two sorted walks. The three flags choose which
    /// elements survive: those only in `self`, those in both (taken from
    /// `self`), and those only in `other`. The output is sorted, so the
    /// result tree is built directly without rebalancing.
    fn merged(&self, other: &Set<T>, only_self: bool, in_both: bool, only_other: bool) -> Set<T>
    where
        T: Clone,
    {
        let mut out: Vec<(T, ())> = Vec::new();
        let mut xs = self.iter();
        let mut ys = other.iter();
        let mut x = xs.next();
        let mut y = ys.next();
        loop {
            match (x, y) {
                (None, None) => break,
                (Some(xv), None) => {
                    if only_self {
                        out.push((xv.clone(), ()));
                    }
                    x = xs.next();
                }
                (None, Some(yv)) => {
                    if only_other {
                        out.push((yv.clone(), ()));
                    }
                    y = ys.next();
                }
                (Some(xv), Some(yv)) => match xv.cmp(yv) {
                    Ordering::Less => {
                        if only_self {
                            out.push((xv.clone(), ()));
                        }
                        x = xs.next();
                    }
                    Ordering::Greater => {
                        if only_other {
                            out.push((yv.clone(), ()));
                        }
                        y = ys.next();
                    }
                    Ordering::Equal => {
                        if in_both {
                            out.push((xv.clone(), ()));
                        }
                        x = xs.next();
                        y = ys.next();
                    }
                },
            }
        }
        let len = out.len();
        Set {
            map: Map::from_sorted_iter(out, len),
        }
    }
}

// Iterators

/// Iterator over a set's elements in ascending order.
pub struct Iter<'a, T> {
    inner: map::Iter<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(value, _)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Owning iterator over a set's elements in ascending order.
pub struct IntoIter<T> {
    inner: map::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(value, ())| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

// Trait implementations

impl<T: Ord> Default for Set<T> {
    fn default() -> Self {
        Set::new()
    }
}

impl<T: Ord> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Set::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> IntoIterator for Set<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.map.into_iter(),
        }
    }
}

impl<'a, T: Ord> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: Ord + Debug> Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Ord> Eq for Set<T> {}
