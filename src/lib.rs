//! Ordered map and set containers backed by a left-leaning red-black tree.
//!
//! A left-leaning red-black tree is a binary search tree whose red links
//! encode the 3-nodes of a 2-3 tree, with the extra rule that every red
//! link leans left. That rule cuts the rebalancing cases down to a handful
//! of local transforms (two rotations, a color flip, and the move-red
//! steps on the deletion path) while keeping every root-to-leaf path
//! within `2 * log2(n + 1)`.
//!
//! Two containers are provided:
//!
//! - [`Map`]: ordered key-value entries.
//! - [`Set`]: ordered elements, a thin wrapper over `Map<T, ()>`, with the
//!   usual set algebra (union, intersection, difference, symmetric
//!   difference) computed by merging the two ascending sequences in
//!   O(|a| + |b|).
//!
//! # Key ownership
//!
//! Whether a container owns its keys is decided by the key type, not by a
//! runtime mode. `Map<String, f64>` owns every key: inserting a duplicate
//! releases the previously stored `String`, and dropping the map releases
//! the rest, each exactly once. `Map<&str, f64>` borrows its keys and the
//! borrow checker pins their lifetime. The same code path serves both.
//!
//! # Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | get       | O(log n)   |
//! | insert    | O(log n)   |
//! | remove    | O(log n)   |
//! | iterate   | O(n)       |
//! | set algebra | O(|a| + |b|) |
//!
//! # Example
//!
//! ```ignore
//! use ordtree::{Map, Set};
//!
//! let mut m = Map::new();
//! m.insert("two", 2);
//! m.insert("one", 1);
//! assert_eq!(m.get(&"one"), Some(&1));
//!
//! let odds: Set<i32> = (1..10).step_by(2).collect();
//! let evens: Set<i32> = (2..10).step_by(2).collect();
//! assert!(odds.is_disjoint(&evens));
//! assert_eq!(odds.union(&evens).len(), 9);
//! ```

#![warn(missing_docs)]

pub mod map;
pub mod set;

pub use map::Map;
pub use set::Set;
