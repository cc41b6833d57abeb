use crate::error::Result;
use crate::trie::config::TrieConfig;
use crate::trie::tree::Tree;
use std::fmt;
use std::ops::{Index, IndexMut};

/// A map from symbol sequences to values implemented using a compressed trie.
///
/// Keys are slices of any symbol type that can be cloned and compared for equality. Nodes live in
/// an arena; each edge owns its child by id and each node keeps a non-owning id of its parent,
/// which lets removals prune upward without recursion.
///
/// # Examples
///
/// ```
/// use compressed_trie::trie::CompressedTrieMap;
///
/// let mut map = CompressedTrieMap::new();
/// map.insert(b"car", 0);
/// map.insert(b"card", 1);
///
/// assert_eq!(map[&b"car"[..]], 0);
/// assert_eq!(map.get(b"cart"), None);
/// assert_eq!(map.len(), 2);
///
/// map[&b"car"[..]] = 2;
/// assert_eq!(map.remove(b"car"), Some(2));
/// assert_eq!(map.get(b"card"), Some(&1));
/// ```
#[derive(Clone)]
pub struct CompressedTrieMap<T, V> {
    tree: Tree<T, V>,
}

impl<T, V> CompressedTrieMap<T, V>
where
    T: Clone + Eq,
{
    /// Constructs a new, empty `CompressedTrieMap<T, V>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use compressed_trie::trie::CompressedTrieMap;
    ///
    /// let map: CompressedTrieMap<u8, u32> = CompressedTrieMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Constructs a new, empty `CompressedTrieMap<T, V>` with the given configuration.
    pub fn with_config(config: TrieConfig) -> Self {
        CompressedTrieMap {
            tree: Tree::new(config),
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, it will
    /// replace and return the old value.
    ///
    /// # Examples
    ///
    /// ```
    /// use compressed_trie::trie::CompressedTrieMap;
    ///
    /// let mut map = CompressedTrieMap::new();
    /// assert_eq!(map.insert(b"foo", 1), None);
    /// assert_eq!(map.insert(b"foo", 2), Some(1));
    /// assert_eq!(map.get(b"foo"), Some(&2));
    /// ```
    pub fn insert(&mut self, key: &[T], value: V) -> Option<V> {
        self.tree.insert(key, value).1
    }

    /// Removes a key from the map and returns its value, or `None` if the key was absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use compressed_trie::trie::CompressedTrieMap;
    ///
    /// let mut map = CompressedTrieMap::new();
    /// map.insert(b"foo", 1);
    /// assert_eq!(map.remove(b"foo"), Some(1));
    /// assert_eq!(map.remove(b"foobar"), None);
    /// ```
    pub fn remove(&mut self, key: &[T]) -> Option<V> {
        self.tree.remove(key)
    }

    /// Checks if a key exists in the map.
    pub fn contains_key(&self, key: &[T]) -> bool {
        self.tree.find(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a key, or `None` if the key
    /// does not exist in the map.
    pub fn get(&self, key: &[T]) -> Option<&V> {
        self.tree.get(key)
    }

    /// Returns a mutable reference to the value associated with a key, or `None` if the key does
    /// not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use compressed_trie::trie::CompressedTrieMap;
    ///
    /// let mut map = CompressedTrieMap::new();
    /// map.insert(b"foo", 1);
    /// *map.get_mut(b"foo").unwrap() = 2;
    /// assert_eq!(map.get(b"foo"), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &[T]) -> Option<&mut V> {
        self.tree.get_mut(key)
    }

    /// Returns the number of keys in the map.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the map, removing all keys and values.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the number of nodes in the underlying tree, including the root.
    pub fn node_count(&self) -> usize {
        self.tree.node_count()
    }

    /// Returns the configuration the map was built with.
    pub fn config(&self) -> &TrieConfig {
        self.tree.config()
    }

    /// Checks the structural invariants of the underlying tree.
    pub fn validate(&self) -> Result<()> {
        self.tree.validate()
    }
}

impl<T, V> Default for CompressedTrieMap<T, V>
where
    T: Clone + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> fmt::Debug for CompressedTrieMap<T, V>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<'a, T, V> Index<&'a [T]> for CompressedTrieMap<T, V>
where
    T: Clone + Eq,
{
    type Output = V;

    fn index(&self, key: &[T]) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, V> IndexMut<&'a [T]> for CompressedTrieMap<T, V>
where
    T: Clone + Eq,
{
    fn index_mut(&mut self, key: &[T]) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}
