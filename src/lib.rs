//! An AVL-balanced ordered map for Rust.
//!
//! This crate provides [`AvlTreeMap`], an in-memory ordered index with:
//!
//! - Point operations: [`insert`](AvlTreeMap::insert), [`get`](AvlTreeMap::get),
//!   [`remove`](AvlTreeMap::remove), [`contains_key`](AvlTreeMap::contains_key)
//! - Ordered queries: [`min`](AvlTreeMap::min), [`max`](AvlTreeMap::max) and closed-interval
//!   [`range`](AvlTreeMap::range) / [`range_search`](AvlTreeMap::range_search)
//! - Order statistics: [`rank`](AvlTreeMap::rank) (keys below a key) and
//!   [`select`](AvlTreeMap::select) (key at a position), or `map[Rank(i)]`
//! - Lazy ascending iteration over keys, values and entries
//!
//! Keys are ordered by an injected [`Comparator`]. The default, [`Natural`], uses the key
//! type's `Ord`; closures and [`Reverse`] work too.
//!
//! # Example
//!
//! ```
//! use avl_ost::{AvlTreeMap, Rank};
//!
//! let mut scores = AvlTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // "Bob" sorts second.
//! assert_eq!(scores.rank(&"Bob"), 1);
//! assert_eq!(scores.select(1), Some(&"Bob"));
//! assert_eq!(scores[Rank(2)], 92);
//!
//! // Alphabetical range, both ends inclusive.
//! assert_eq!(scores.range_search(&"B", &"Carol").copied().collect::<Vec<_>>(), [85, 92]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **`serde`** - `Serialize`/`Deserialize` for maps whose comparator implements `Default`
//! - **`tracing`** - Emits `tracing` events for rotations and clears
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other by index. Each node owns its two
//! children through those indices and keeps a non-owning index of its parent, which lets
//! rebalancing walk from a changed leaf back up to the root without recursion. Heights are
//! cached per node; subtree sizes are not, so [`rank`](AvlTreeMap::rank) and
//! [`select`](AvlTreeMap::select) are linear-time scans rather than logarithmic lookups.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod comparator;
mod contract;
mod error;
mod order_statistic;
mod raw;
mod trace;

pub mod avl_tree_map;

pub use avl_tree_map::AvlTreeMap;
pub use comparator::{Comparator, Natural, Reverse};
pub use contract::{Map, SearchTree};
pub use error::EmptyTreeError;
pub use order_statistic::Rank;
