use crate::error::Result;
use crate::trie::config::TrieConfig;
use crate::trie::node::NodeHandle;
use crate::trie::tree::{Location, Tree};
use std::fmt;

/// A set of symbol sequences implemented using a compressed trie.
///
/// A compressed trie is a trie in which every edge carries a run of symbols instead of a single
/// symbol. Insertion keeps the tree fully path-compressed by splitting an edge wherever a new key
/// diverges from it. Removal clears the key's endpoint and prunes the chain of childless,
/// non-endpoint nodes above it. By default a node left with a single child is not merged into it;
/// see `TrieConfig::merge_on_remove`.
///
/// # Examples
///
/// ```
/// use compressed_trie::trie::CompressedTrie;
///
/// let mut trie = CompressedTrie::new();
/// trie.insert(b"car");
/// trie.insert(b"card");
/// trie.insert(b"care");
///
/// assert!(trie.contains(b"car"));
/// assert!(!trie.contains(b"cart"));
///
/// assert!(trie.remove(b"car"));
/// assert!(!trie.contains(b"car"));
/// assert!(trie.contains(b"card"));
/// ```
#[derive(Clone)]
pub struct CompressedTrie<T> {
    tree: Tree<T, ()>,
}

impl<T> CompressedTrie<T>
where
    T: Clone + Eq,
{
    /// Constructs a new, empty `CompressedTrie<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use compressed_trie::trie::CompressedTrie;
    ///
    /// let trie: CompressedTrie<u8> = CompressedTrie::new();
    /// assert_eq!(trie.node_count(), 1);
    /// ```
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Constructs a new, empty `CompressedTrie<T>` with the given configuration.
    pub fn with_config(config: TrieConfig) -> Self {
        CompressedTrie {
            tree: Tree::new(config),
        }
    }

    /// Inserts a key into the set and returns the handle of the node that marks it. Inserting a
    /// key that is already present returns the same handle and changes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use compressed_trie::trie::CompressedTrie;
    ///
    /// let mut trie = CompressedTrie::new();
    /// let handle = trie.insert(b"foo");
    /// assert_eq!(trie.insert(b"foo"), handle);
    /// assert_eq!(trie.find(b"foo"), Some(handle));
    /// ```
    pub fn insert(&mut self, key: &[T]) -> NodeHandle {
        NodeHandle(self.tree.insert(key, ()).0)
    }

    /// Returns the handle of the node marking `key`, or `None` if the key is not in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use compressed_trie::trie::CompressedTrie;
    ///
    /// let mut trie = CompressedTrie::new();
    /// trie.insert(b"abc");
    /// trie.insert(b"abd");
    /// assert!(trie.find(b"abc").is_some());
    /// assert!(trie.find(b"ab").is_none());
    /// assert!(trie.find(b"abx").is_none());
    /// ```
    pub fn find(&self, key: &[T]) -> Option<NodeHandle> {
        self.tree.find(key).map(NodeHandle)
    }

    /// Returns where a walk from the root for `key` stops, without requiring `key` to be present.
    ///
    /// # Examples
    ///
    /// ```
    /// use compressed_trie::trie::CompressedTrie;
    ///
    /// let mut trie = CompressedTrie::new();
    /// trie.insert(b"abc");
    ///
    /// let location = trie.locate(b"abx");
    /// assert_eq!(location.edge, Some(0));
    /// assert_eq!((location.start, location.end), (0, 2));
    /// ```
    pub fn locate(&self, key: &[T]) -> Location {
        self.tree.locate(key)
    }

    /// Checks if a key exists in the set.
    pub fn contains(&self, key: &[T]) -> bool {
        self.tree.find(key).is_some()
    }

    /// Removes a key from the set. Returns `true` if the key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use compressed_trie::trie::CompressedTrie;
    ///
    /// let mut trie = CompressedTrie::new();
    /// trie.insert(b"abc");
    /// assert!(!trie.remove(b"ab"));
    /// assert!(trie.remove(b"abc"));
    /// assert_eq!(trie.node_count(), 1);
    /// ```
    pub fn remove(&mut self, key: &[T]) -> bool {
        self.tree.remove(key).is_some()
    }

    /// Returns `true` if `handle` refers to a live node that currently marks a key.
    pub fn is_endpoint(&self, handle: NodeHandle) -> bool {
        self.tree.is_endpoint(handle.0)
    }

    /// Returns the number of keys in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the set, removing all keys.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the number of nodes in the tree, including the root.
    pub fn node_count(&self) -> usize {
        self.tree.node_count()
    }

    /// Returns the configuration the set was built with.
    pub fn config(&self) -> &TrieConfig {
        self.tree.config()
    }

    /// Checks the structural invariants of the tree and returns the first violation found.
    ///
    /// # Examples
    ///
    /// ```
    /// use compressed_trie::trie::CompressedTrie;
    ///
    /// let mut trie = CompressedTrie::new();
    /// trie.insert(b"foo");
    /// assert!(trie.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.tree.validate()
    }
}

impl<T> Default for CompressedTrie<T>
where
    T: Clone + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for CompressedTrie<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}
