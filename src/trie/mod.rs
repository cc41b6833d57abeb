//! Path-compressed trie over arbitrary symbol sequences.
//!
//! `CompressedTrie` stores a set of keys and `CompressedTrieMap` associates a value with each
//! key. Both share one arena-backed tree: insertion splits at most one edge, lookup is a single
//! bounded walk from the root, and removal prunes upward through parent ids.

mod config;
mod map;
mod node;
mod set;
mod tree;

pub use self::config::TrieConfig;
pub use self::map::CompressedTrieMap;
pub use self::node::NodeHandle;
pub use self::set::CompressedTrie;
pub use self::tree::{bounded_common_prefix, Location};
