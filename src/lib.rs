//! A compressed trie (radix tree) with exact-membership lookup and pruning deletion.
//!
//! # Examples
//!
//! ```
//! use compressed_trie::trie::CompressedTrie;
//!
//! let mut trie = CompressedTrie::new();
//! trie.insert("abc".as_bytes());
//! trie.insert("abd".as_bytes());
//!
//! assert!(trie.contains("abc".as_bytes()));
//! assert!(!trie.contains("ab".as_bytes()));
//! ```

pub mod arena;
mod error;
pub mod trie;

pub use crate::error::{InvariantError, Result};
