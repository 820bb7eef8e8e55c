//! Mutable ordered maps
//!
//! This module provides an ordered map backed by a left-leaning red-black
//! tree: a binary search tree whose red links encode the 3-nodes of the
//! equivalent 2-3 tree, with every red link leaning left. Insertion flips
//! colors on the way down and rotates on the way back up; deletion uses
//! the move-red transforms so the search path never reaches a 2-node, and
//! repairs on the unwind. Every path stays within `2 * log2(n + 1)`.
//!
//! # Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | get       | O(log n)   |
//! | insert    | O(log n)   |
//! | remove    | O(log n)   |
//! | min / max | O(log n)   |
//! | iterate   | O(n)       |
//!
//! # Example
//!
//! ```ignore
//! let mut m = Map::new();
//! m.insert("one", 1.0);
//! m.insert("two", 2.0);
//!
//! assert_eq!(m.get(&"two"), Some(&2.0));
//! assert_eq!(m.remove(&"one"), Some(1.0));
//! assert_eq!(m.len(), 1);
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::mem;

use smallvec::SmallVec;

/// Inline capacity of the iterator stacks. The stack holds one node per
/// level and depth is bounded by `2 * log2(n + 1)`, so 16 slots cover
/// trees of up to 255 entries before spilling to the heap.
const STACK_INLINE: usize = 16;

type Link<K, V> = Option<Box<Node<K, V>>>;

/// A mutable ordered map backed by a left-leaning red-black tree.
#[derive(Clone)]
pub struct Map<K, V> {
    root: Link<K, V>,
    size: usize,
}

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
    red: bool,
}

impl<K, V> Node<K, V> {
    /// New nodes enter the tree red, as the left leg of a 3-node.
    fn new(key: K, value: V) -> Self {
        Node {
            key,
            value,
            left: None,
            right: None,
            red: true,
        }
    }
}

impl<K: Ord, V> Map<K, V> {
    /// Create an empty map.
    ///
    /// O(1) time and space.
    #[inline]
    pub fn new() -> Self {
        Map {
            root: None,
            size: 0,
        }
    }

    /// Check if the map is empty.
    ///
    /// O(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Return the number of entries in the map.
    ///
    /// O(1) time.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Remove every entry. The map stays usable.
    ///
    /// O(n) time.
    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }

    /// Look up the value stored for a key.
    ///
    /// O(log n) time.
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut current = &self.root;
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Less => current = &node.left,
                Ordering::Greater => current = &node.right,
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Look up a key and return a mutable reference to its value.
    ///
    /// O(log n) time.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Check if a key is in the map.
    ///
    /// O(log n) time.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Insert a key-value entry. Returns the previous value if the key was
    /// already present; the stored key is replaced by the argument key, so
    /// an owning key type releases the old allocation here.
    ///
    /// O(log n) time.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut replaced = None;
        let mut root = insert_node(self.root.take(), key, value, &mut replaced);
        root.red = false;
        self.root = Some(root);
        if replaced.is_none() {
            self.size += 1;
        }
        replaced
    }

    /// Remove a key, returning its value. Removing an absent key is a
    /// no-op returning `None`.
    ///
    /// O(log n) time.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let root = self.root.take()?;
        let mut removed = None;
        self.root = remove_node(root, key, &mut removed);
        if let Some(node) = self.root.as_mut() {
            node.red = false;
        }
        let (_key, value) = removed?;
        self.size -= 1;
        Some(value)
    }

    /// Remove and return the entry with the smallest key.
    ///
    /// O(log n) time.
    pub fn remove_min(&mut self) -> Option<(K, V)> {
        let root = self.root.take()?;
        let (key, value, rest) = detach_min(root);
        self.root = rest;
        if let Some(node) = self.root.as_mut() {
            node.red = false;
        }
        self.size -= 1;
        Some((key, value))
    }

    /// Get the entry with the smallest key.
    ///
    /// O(log n) time.
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Get the entry with the largest key.
    ///
    /// O(log n) time.
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Iterate over entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut stack = SmallVec::new();
        push_left(&self.root, &mut stack);
        Iter {
            stack,
            remaining: self.size,
        }
    }

    /// Iterate over keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Iterate over values in ascending key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Call a visitor once per entry, in ascending key order.
    ///
    /// O(n) time.
    pub fn visit<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        visit_node(&self.root, &mut f);
    }

    /// Copy the entries out as a vector in ascending key order.
    ///
    /// O(n) time.
    pub fn to_vec(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        self.visit(|key, value| out.push((key.clone(), value.clone())));
        out
    }

    /// Length of the longest root-to-leaf path; 0 for the empty map.
    /// Mainly useful for checking balance in tests.
    ///
    /// O(n) time.
    pub fn max_depth(&self) -> usize {
        depth_node(&self.root)
    }

    /// Build a map from `len` entries already in strictly ascending key
    /// order, in O(len) time. The entries are laid out as the 2-3 tree of
    /// black height `floor(log2(len + 1))`, so the result satisfies every
    /// tree invariant without a single rotation.
    pub(crate) fn from_sorted_iter<I>(items: I, len: usize) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut items = items.into_iter();
        let height = if len == 0 { 0 } else { (len + 1).ilog2() };
        let root = build_sorted(&mut items, len, height);
        debug_assert!(items.next().is_none());
        Map { root, size: len }
    }
}

// Internal node functions

fn is_red<K, V>(link: &Link<K, V>) -> bool {
    link.as_ref().map_or(false, |n| n.red)
}

fn is_left_left_red<K, V>(node: &Node<K, V>) -> bool {
    node.left.as_ref().map_or(false, |l| is_red(&l.left))
}

fn is_right_left_red<K, V>(node: &Node<K, V>) -> bool {
    node.right.as_ref().map_or(false, |r| is_red(&r.left))
}

/// Rotate the right child up. The subtree root's color moves to the new
/// root and the old root turns red, so the rotation is color-neutral as
/// seen from above.
fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut x = node.right.take().unwrap();
    node.right = x.left.take();
    x.red = node.red;
    node.red = true;
    x.left = Some(node);
    x
}

/// Mirror image of `rotate_left`.
fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut x = node.left.take().unwrap();
    node.left = x.right.take();
    x.red = node.red;
    node.red = true;
    x.right = Some(node);
    x
}

/// Toggle the colors of a node and both children, splitting a 4-node or
/// fusing one, depending on the direction of travel.
fn color_flip<K, V>(node: &mut Node<K, V>) {
    node.red = !node.red;
    if let Some(left) = node.left.as_mut() {
        left.red = !left.red;
    }
    if let Some(right) = node.right.as_mut() {
        right.red = !right.red;
    }
}

fn insert_node<K: Ord, V>(
    link: Link<K, V>,
    key: K,
    value: V,
    replaced: &mut Option<V>,
) -> Box<Node<K, V>> {
    let mut node = match link {
        None => return Box::new(Node::new(key, value)),
        Some(node) => node,
    };
    // Split 4-nodes on the way down.
    if is_red(&node.left) && is_red(&node.right) {
        color_flip(&mut node);
    }
    match key.cmp(&node.key) {
        Ordering::Less => node.left = Some(insert_node(node.left.take(), key, value, replaced)),
        Ordering::Greater => {
            node.right = Some(insert_node(node.right.take(), key, value, replaced))
        }
        Ordering::Equal => {
            // The argument key becomes the stored key; with an owning key
            // type the previous allocation is released right here.
            node.key = key;
            *replaced = Some(mem::replace(&mut node.value, value));
        }
    }
    insert_fixup(node)
}

/// Insertion repair, applied on the unwind. The order is fixed: lean a
/// right-leaning red link left first, then lift a left-left red pair.
fn insert_fixup<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_red(&node.right) && !is_red(&node.left) {
        node = rotate_left(node);
    }
    if is_red(&node.left) && is_left_left_red(&node) {
        node = rotate_right(node);
    }
    node
}

/// Deletion repair, applied on the unwind: re-lean right-leaning reds,
/// lift left-left red pairs, fuse leftover 4-nodes.
fn fixup<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_red(&node.right) {
        node = rotate_left(node);
    }
    if is_red(&node.left) && is_left_left_red(&node) {
        node = rotate_right(node);
    }
    if is_red(&node.left) && is_red(&node.right) {
        color_flip(&mut node);
    }
    node
}

/// Make the left child or its left child red before descending left, by
/// borrowing from the right sibling if it has a spare red.
fn move_red_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    color_flip(&mut node);
    if is_right_left_red(&node) {
        let right = node.right.take().unwrap();
        node.right = Some(rotate_right(right));
        node = rotate_left(node);
        color_flip(&mut node);
    }
    node
}

/// Make the right child or its left child red before descending right.
fn move_red_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    color_flip(&mut node);
    if is_left_left_red(&node) {
        node = rotate_right(node);
        color_flip(&mut node);
    }
    node
}

fn remove_node<K: Ord, V>(
    mut node: Box<Node<K, V>>,
    key: &K,
    removed: &mut Option<(K, V)>,
) -> Link<K, V> {
    if *key < node.key {
        // If there is no left child the key is absent and there is
        // nothing to do but repair.
        if node.left.is_some() {
            if !is_red(&node.left) && !is_left_left_red(&node) {
                node = move_red_left(node);
            }
            let left = node.left.take().unwrap();
            node.left = remove_node(left, key, removed);
        }
    } else {
        if is_red(&node.left) {
            node = rotate_right(node);
        }
        if node.right.is_none() {
            if *key == node.key {
                // Bottom of the search path. A node with no right child
                // has no left child either (a lone black left child would
                // break the black balance, a red one was just rotated
                // away), so the whole node detaches.
                debug_assert!(node.left.is_none());
                let leaf = *node;
                *removed = Some((leaf.key, leaf.value));
                return None;
            }
        } else {
            node = remove_right(node, key, removed);
        }
    }
    Some(fixup(node))
}

/// Continue a removal into the right subtree, which is known to exist.
/// An equal key is replaced by its in-order successor: the minimum entry
/// of the right subtree is detached and moved in whole, and the displaced
/// entry is the removal result. No allocation is copied or aliased.
fn remove_right<K: Ord, V>(
    mut node: Box<Node<K, V>>,
    key: &K,
    removed: &mut Option<(K, V)>,
) -> Box<Node<K, V>> {
    if !is_red(&node.right) && !is_right_left_red(&node) {
        node = move_red_right(node);
    }
    if *key == node.key {
        let right = node.right.take().unwrap();
        let (succ_key, succ_value, rest) = detach_min(right);
        let old_key = mem::replace(&mut node.key, succ_key);
        let old_value = mem::replace(&mut node.value, succ_value);
        *removed = Some((old_key, old_value));
        node.right = rest;
    } else {
        let right = node.right.take().unwrap();
        node.right = remove_node(right, key, removed);
    }
    node
}

/// Detach the minimum node of a subtree and hand its entry back along
/// with the repaired remainder.
fn detach_min<K, V>(mut node: Box<Node<K, V>>) -> (K, V, Link<K, V>) {
    if node.left.is_none() {
        // The minimum cannot have a right child: it would have to be red
        // and leaning right.
        debug_assert!(node.right.is_none());
        let leaf = *node;
        return (leaf.key, leaf.value, None);
    }
    if !is_red(&node.left) && !is_left_left_red(&node) {
        node = move_red_left(node);
    }
    let left = node.left.take().unwrap();
    let (key, value, rest) = detach_min(left);
    node.left = rest;
    (key, value, Some(fixup(node)))
}

fn visit_node<K, V, F>(link: &Link<K, V>, f: &mut F)
where
    F: FnMut(&K, &V),
{
    if let Some(node) = link {
        visit_node(&node.left, f);
        f(&node.key, &node.value);
        visit_node(&node.right, f);
    }
}

fn depth_node<K, V>(link: &Link<K, V>) -> usize {
    match link {
        None => 0,
        Some(node) => 1 + depth_node(&node.left).max(depth_node(&node.right)),
    }
}

/// Build a subtree of `len` ascending entries with exactly `height` black
/// nodes on every path. Each level is the 2-3 tree node it encodes: a
/// single black key when the load fits two child subtrees, otherwise a
/// black key with a red left key and three child subtrees. A subtree of
/// height h carries between 2^h - 1 and 3^h - 1 entries.
fn build_sorted<K, V, I>(items: &mut I, len: usize, height: u32) -> Link<K, V>
where
    I: Iterator<Item = (K, V)>,
{
    if len == 0 {
        debug_assert_eq!(height, 0);
        return None;
    }
    let child_height = height - 1;
    let lo = (1usize << child_height) - 1;
    let hi = 3usize.saturating_pow(child_height) - 1;
    if len - 1 <= 2 * hi {
        // 2-node: one black key, the load split evenly, extra to the left.
        let spread = len - 1;
        let left_len = spread - spread / 2;
        let left = build_sorted(items, left_len, child_height);
        let (key, value) = items.next().unwrap();
        let right = build_sorted(items, spread - left_len, child_height);
        Some(Box::new(Node {
            key,
            value,
            left,
            right,
            red: false,
        }))
    } else {
        // 3-node: a black key with a red left key, three child loads each
        // clamped to the capacity of height - 1.
        let spread = len - 2;
        let first = (spread / 3).clamp(spread.saturating_sub(2 * hi), hi);
        let rest = spread - first;
        let second = (rest / 2).clamp(rest.saturating_sub(hi), hi);
        let third = rest - second;
        debug_assert!(first >= lo && second >= lo && third >= lo && third <= hi);

        let left_left = build_sorted(items, first, child_height);
        let (left_key, left_value) = items.next().unwrap();
        let left_right = build_sorted(items, second, child_height);
        let (key, value) = items.next().unwrap();
        let right = build_sorted(items, third, child_height);

        let left = Box::new(Node {
            key: left_key,
            value: left_value,
            left: left_left,
            right: left_right,
            red: true,
        });
        Some(Box::new(Node {
            key,
            value,
            left: Some(left),
            right,
            red: false,
        }))
    }
}

// Iterators

/// Iterator over a map's entries in ascending key order.
pub struct Iter<'a, K, V> {
    stack: SmallVec<[&'a Node<K, V>; STACK_INLINE]>,
    remaining: usize,
}

fn push_left<'a, K, V>(link: &'a Link<K, V>, stack: &mut SmallVec<[&'a Node<K, V>; STACK_INLINE]>) {
    let mut current = link;
    while let Some(node) = current {
        stack.push(node);
        current = &node.left;
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        push_left(&node.right, &mut self.stack);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Iterator over a map's keys in ascending order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Iterator over a map's values in ascending key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Owning iterator over a map's entries in ascending key order.
pub struct IntoIter<K, V> {
    stack: SmallVec<[Box<Node<K, V>>; STACK_INLINE]>,
    remaining: usize,
}

fn push_left_owned<K, V>(
    mut link: Link<K, V>,
    stack: &mut SmallVec<[Box<Node<K, V>>; STACK_INLINE]>,
) {
    while let Some(mut node) = link {
        link = node.left.take();
        stack.push(node);
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        push_left_owned(node.right.take(), &mut self.stack);
        self.remaining -= 1;
        let node = *node;
        Some((node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

// Trait implementations

impl<K: Ord, V> Default for Map<K, V> {
    fn default() -> Self {
        Map::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Map<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for Map<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> IntoIterator for Map<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        let Map { root, size } = self;
        let mut stack = SmallVec::new();
        push_left_owned(root, &mut stack);
        IntoIter {
            stack,
            remaining: size,
        }
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a Map<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K: Ord + Debug, V: Debug> Debug for Map<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V: PartialEq> PartialEq for Map<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Ord, V: Eq> Eq for Map<K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;
    use std::collections::BTreeMap;

    /// Walk a subtree checking key order, the left lean of red links, the
    /// absence of consecutive reds, and uniform black height, which it
    /// returns.
    fn check_node<K: Ord, V>(link: &Link<K, V>, lo: Option<&K>, hi: Option<&K>) -> usize {
        match link {
            None => 0,
            Some(node) => {
                if let Some(lo) = lo {
                    assert!(node.key > *lo, "key order violated");
                }
                if let Some(hi) = hi {
                    assert!(node.key < *hi, "key order violated");
                }
                assert!(!is_red(&node.right), "red link leaning right");
                if node.red {
                    assert!(!is_red(&node.left), "two consecutive red links");
                }
                let left_height = check_node(&node.left, lo, Some(&node.key));
                let right_height = check_node(&node.right, Some(&node.key), hi);
                assert_eq!(left_height, right_height, "black height mismatch");
                left_height + usize::from(!node.red)
            }
        }
    }

    fn check<K: Ord, V>(map: &Map<K, V>) {
        assert!(!is_red(&map.root), "red root");
        check_node(&map.root, None, None);
        assert_eq!(map.iter().count(), map.len(), "size out of sync");
        if !map.is_empty() {
            let bound = 2.0 * ((map.len() + 1) as f64).log2();
            assert!(
                map.max_depth() as f64 <= bound,
                "depth {} exceeds bound {}",
                map.max_depth(),
                bound
            );
        }
    }

    #[test]
    fn test_empty() {
        let m: Map<i32, &str> = Map::new();
        assert!(m.is_empty());
        assert_eq!(m.len(), 0);
        assert_eq!(m.get(&1), None);
        assert_eq!(m.min(), None);
        assert_eq!(m.max(), None);
        assert_eq!(m.max_depth(), 0);
        check(&m);
    }

    #[test]
    fn test_insert_get() {
        let mut m = Map::new();
        assert_eq!(m.insert(3, "three"), None);
        assert_eq!(m.insert(1, "one"), None);
        assert_eq!(m.insert(2, "two"), None);

        assert_eq!(m.len(), 3);
        assert_eq!(m.get(&1), Some(&"one"));
        assert_eq!(m.get(&2), Some(&"two"));
        assert_eq!(m.get(&3), Some(&"three"));
        assert_eq!(m.get(&4), None);
        assert!(m.contains_key(&1));
        assert!(!m.contains_key(&0));
        check(&m);
    }

    #[test]
    fn test_insert_replaces() {
        let mut m = Map::new();
        assert_eq!(m.insert(1, "one"), None);
        assert_eq!(m.insert(1, "ONE"), Some("one"));
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(&1), Some(&"ONE"));
        check(&m);
    }

    #[test]
    fn test_get_mut() {
        let mut m = Map::new();
        m.insert("a", 1);
        m.insert("b", 2);
        if let Some(v) = m.get_mut(&"b") {
            *v += 10;
        }
        assert_eq!(m.get(&"b"), Some(&12));
        assert_eq!(m.get_mut(&"zzz"), None);
    }

    #[test]
    fn test_remove() {
        let mut m = Map::new();
        for (k, v) in [(1, "one"), (2, "two"), (3, "three")] {
            m.insert(k, v);
        }
        assert_eq!(m.remove(&2), Some("two"));
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(&2), None);
        assert_eq!(m.get(&1), Some(&"one"));
        assert_eq!(m.get(&3), Some(&"three"));
        check(&m);

        // Removing an absent key changes nothing.
        assert_eq!(m.remove(&2), None);
        assert_eq!(m.len(), 2);
        check(&m);
    }

    #[test]
    fn test_remove_min_drains_in_order() {
        let mut m: Map<i32, i32> = (0..100).rev().map(|k| (k, k * 2)).collect();
        for expect in 0..100 {
            let (k, v) = m.remove_min().unwrap();
            assert_eq!((k, v), (expect, expect * 2));
            check(&m);
        }
        assert!(m.is_empty());
        assert_eq!(m.remove_min(), None);
    }

    #[test]
    fn test_min_max() {
        let mut m = Map::new();
        for k in [5, 1, 9, 3, 7] {
            m.insert(k, k * 10);
        }
        assert_eq!(m.min(), Some((&1, &10)));
        assert_eq!(m.max(), Some((&9, &90)));
    }

    #[test]
    fn test_iter_ascending() {
        let mut m = Map::new();
        for k in [4, 1, 5, 2, 3] {
            m.insert(k, k * k);
        }
        let pairs: Vec<_> = m.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(pairs, vec![(1, 1), (2, 4), (3, 9), (4, 16), (5, 25)]);
        let keys: Vec<_> = m.keys().copied().collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 5]);
        let values: Vec<_> = m.values().copied().collect();
        assert_eq!(values, vec![1, 4, 9, 16, 25]);
    }

    #[test]
    fn test_into_iter() {
        let m: Map<i32, String> = [(2, "b"), (1, "a"), (3, "c")]
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect();
        let pairs: Vec<(i32, String)> = m.into_iter().collect();
        assert_eq!(
            pairs,
            vec![
                (1, "a".to_string()),
                (2, "b".to_string()),
                (3, "c".to_string())
            ]
        );
    }

    #[test]
    fn test_visit_and_to_vec() {
        let mut m = Map::new();
        for k in [2, 1, 3] {
            m.insert(k, k * 10);
        }
        let mut seen = Vec::new();
        m.visit(|k, v| seen.push((*k, *v)));
        assert_eq!(seen, vec![(1, 10), (2, 20), (3, 30)]);
        assert_eq!(m.to_vec(), seen);
    }

    #[test]
    fn test_clear_then_reuse() {
        let mut m: Map<i32, i32> = (0..50).map(|k| (k, k)).collect();
        m.clear();
        assert!(m.is_empty());
        assert_eq!(m.len(), 0);
        m.insert(7, 7);
        assert_eq!(m.get(&7), Some(&7));
        check(&m);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a: Map<i32, i32> = (0..20).map(|k| (k, k)).collect();
        let b = a.clone();
        a.remove(&10);
        a.insert(100, 100);
        assert_eq!(b.len(), 20);
        assert_eq!(b.get(&10), Some(&10));
        assert_eq!(b.get(&100), None);
        check(&b);
    }

    #[test]
    fn test_eq() {
        let a: Map<i32, i32> = (0..10).map(|k| (k, k)).collect();
        let b: Map<i32, i32> = (0..10).rev().map(|k| (k, k)).collect();
        assert_eq!(a, b);
        let mut c = b.clone();
        c.insert(3, 99);
        assert_ne!(a, c);
    }

    #[test]
    fn test_debug_format() {
        let mut m = Map::new();
        m.insert(2, "b");
        m.insert(1, "a");
        assert_eq!(format!("{m:?}"), r#"{1: "a", 2: "b"}"#);
    }

    #[test]
    fn test_descending_inserts_stay_balanced() {
        let mut m = Map::new();
        for k in (1..=500).rev() {
            m.insert(k, ());
            check(&m);
        }
        let keys: Vec<_> = m.keys().copied().collect();
        assert_eq!(keys, (1..=500).collect::<Vec<_>>());
    }

    #[test]
    fn test_from_sorted_iter_all_sizes() {
        for n in 0..=300usize {
            let m: Map<usize, usize> = Map::from_sorted_iter((0..n).map(|k| (k, k + 1)), n);
            assert_eq!(m.len(), n);
            check(&m);
            let pairs: Vec<_> = m.iter().map(|(k, v)| (*k, *v)).collect();
            let expect: Vec<_> = (0..n).map(|k| (k, k + 1)).collect();
            assert_eq!(pairs, expect);
        }
    }

    #[test]
    fn test_random_soak_against_btreemap() {
        let mut rng = ChaCha20Rng::seed_from_u64(0x0a51_f00d);
        let mut map: Map<i32, i32> = Map::new();
        let mut mirror: BTreeMap<i32, i32> = BTreeMap::new();

        for step in 0..30_000 {
            let key = rng.gen_range(0..2_000);
            if rng.gen_bool(0.6) {
                let value = rng.gen_range(0..1_000_000);
                assert_eq!(map.insert(key, value), mirror.insert(key, value));
            } else {
                assert_eq!(map.remove(&key), mirror.remove(&key));
            }
            if step % 977 == 0 {
                check(&map);
                assert_eq!(map.len(), mirror.len());
            }
        }
        check(&map);
        assert_eq!(map.len(), mirror.len());
        let got: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let expect: Vec<_> = mirror.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(got, expect);

        // Drain in random order, checking as we go.
        let mut keys: Vec<i32> = mirror.keys().copied().collect();
        keys.shuffle(&mut rng);
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(map.remove(key), mirror.remove(key));
            if i % 211 == 0 {
                check(&map);
            }
        }
        assert!(map.is_empty());
        check(&map);
    }
}
