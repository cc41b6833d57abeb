use crate::arena::{NodeArena, NodeId};
use crate::error::{InvariantError, Result};
use crate::trie::config::TrieConfig;
use crate::trie::node::Node;
use log::{debug, trace};
use std::collections::HashSet;
use std::fmt;
use std::mem;

// Above this many nodes debug builds stop re-validating after every mutation.
const DEBUG_VALIDATE_LIMIT: usize = 32;

/// Returns the largest `i` such that `label[0..i] == query[start..start + i]` and
/// `start + i <= end`.
pub fn bounded_common_prefix<T: PartialEq>(
    label: &[T],
    query: &[T],
    start: usize,
    end: usize,
) -> usize {
    label
        .iter()
        .zip(&query[start..end])
        .take_while(|pair| pair.0 == pair.1)
        .count()
}

/// Where a walk down the tree stopped.
///
/// `query[..start]` was consumed by fully matched edges ending at `node`. If `edge` is set, the
/// walk then matched `query[start..end]` against a strict prefix of that edge of `node`.
/// Otherwise `start == end`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Location {
    pub node: NodeId,
    pub edge: Option<usize>,
    pub start: usize,
    pub end: usize,
}

impl Location {
    fn is_exact(&self, len: usize) -> bool {
        self.edge.is_none() && self.end == len
    }
}

/// Walks down from `node` matching `query[start..end]` against edge labels.
pub fn locate<T: PartialEq, V>(
    arena: &NodeArena<Node<T, V>>,
    mut node: NodeId,
    query: &[T],
    mut start: usize,
    end: usize,
) -> Location {
    'descend: loop {
        if start == end {
            return Location { node, edge: None, start, end };
        }
        for (index, (label, child)) in arena[node].edges.iter().enumerate() {
            let len = bounded_common_prefix(label, query, start, end);
            if len == 0 {
                continue;
            }
            if len < label.len() {
                return Location {
                    node,
                    edge: Some(index),
                    start,
                    end: start + len,
                };
            }
            node = *child;
            start += len;
            continue 'descend;
        }
        return Location {
            node,
            edge: None,
            start,
            end: start,
        };
    }
}

/// Arena-backed compressed trie shared by the set and map front ends.
#[derive(Clone)]
pub struct Tree<T, V> {
    arena: NodeArena<Node<T, V>>,
    root: NodeId,
    len: usize,
    config: TrieConfig,
}

impl<T, V> Tree<T, V>
where
    T: Clone + Eq,
{
    pub fn new(config: TrieConfig) -> Self {
        let mut arena = NodeArena::with_capacity(config.initial_capacity);
        let root = arena.allocate(Node::new(None));
        Tree {
            arena,
            root,
            len: 0,
            config,
        }
    }

    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn locate(&self, key: &[T]) -> Location {
        let location = locate(&self.arena, self.root, key, 0, key.len());
        trace!(
            "located key of length {} at {:?}, edge {:?}, matched [{}, {})",
            key.len(),
            location.node,
            location.edge,
            location.start,
            location.end,
        );
        location
    }

    pub fn find(&self, key: &[T]) -> Option<NodeId> {
        let location = self.locate(key);
        if location.is_exact(key.len()) && self.arena[location.node].is_endpoint() {
            Some(location.node)
        } else {
            None
        }
    }

    pub fn is_endpoint(&self, id: NodeId) -> bool {
        self.arena.get(id).map_or(false, Node::is_endpoint)
    }

    pub fn get(&self, key: &[T]) -> Option<&V> {
        let id = self.find(key)?;
        self.arena[id].value.as_ref()
    }

    pub fn get_mut(&mut self, key: &[T]) -> Option<&mut V> {
        let id = self.find(key)?;
        self.arena[id].value.as_mut()
    }

    /// Stores `value` at the node spelling `key`, growing the tree as needed, and returns the
    /// node together with the value it held before.
    pub fn insert(&mut self, key: &[T], value: V) -> (NodeId, Option<V>) {
        let len = key.len();
        let Location {
            node,
            edge,
            start,
            end,
        } = self.locate(key);
        let target = match edge {
            None if end == len => node,
            None => self.attach_leaf(node, key[end..].to_vec()),
            Some(index) => {
                let middle = self.split_edge(node, index, end - start);
                if end == len {
                    middle
                } else {
                    self.attach_leaf(middle, key[end..].to_vec())
                }
            }
        };
        let old_value = self.arena[target].value.replace(value);
        if old_value.is_none() {
            self.len += 1;
        }
        self.debug_validate();
        (target, old_value)
    }

    /// Clears the endpoint spelling `key` and prunes the chain of nodes that became useless.
    pub fn remove(&mut self, key: &[T]) -> Option<V> {
        let mut curr = self.find(key)?;
        let value = self.arena[curr].value.take();
        self.len -= 1;

        while let Some(parent) = self.prunable_parent(curr) {
            if self.arena[parent].remove_child(curr).is_none() {
                panic!("invariant violated: parent has no edge to child being pruned");
            }
            self.arena.free(curr);
            trace!("pruned {:?} from {:?}", curr, parent);
            curr = parent;
        }

        if self.config.merge_on_remove {
            self.merge(curr);
        }
        self.debug_validate();
        value
    }

    pub fn clear(&mut self) {
        debug!("clearing trie of {} keys", self.len);
        self.arena.clear();
        self.root = self.arena.allocate(Node::new(None));
        self.len = 0;
    }

    fn attach_leaf(&mut self, parent: NodeId, label: Vec<T>) -> NodeId {
        let leaf = self.arena.allocate(Node::new(Some(parent)));
        self.arena[parent].add_edge(label, leaf);
        leaf
    }

    // Splits edge `index` of `node` after `split_index` symbols and returns the new middle node.
    fn split_edge(&mut self, node: NodeId, index: usize, split_index: usize) -> NodeId {
        let middle = self.arena.allocate(Node::new(Some(node)));
        let (suffix, child) = match self.arena[node].edges.get_mut(index) {
            Some(edge) => (edge.0.split_off(split_index), mem::replace(&mut edge.1, middle)),
            None => panic!("invariant violated: split edge does not exist"),
        };
        trace!(
            "split edge {} of {:?} at {}, inserting {:?} above {:?}",
            index,
            node,
            split_index,
            middle,
            child,
        );
        self.arena[middle].add_edge(suffix, child);
        self.arena[child].parent = Some(middle);
        middle
    }

    fn prunable_parent(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.arena[id];
        if id == self.root || node.is_endpoint() || !node.is_leaf() {
            return None;
        }
        match node.parent {
            Some(parent) => Some(parent),
            None => panic!("invariant violated: non-root node has no parent"),
        }
    }

    // Folds a non-root, non-endpoint node with exactly one edge into its only child.
    fn merge(&mut self, id: NodeId) {
        {
            let node = &self.arena[id];
            if id == self.root || node.is_endpoint() || node.edges.len() != 1 {
                return;
            }
        }
        let node = self.arena.free(id);
        let parent = match node.parent {
            Some(parent) => parent,
            None => panic!("invariant violated: non-root node has no parent"),
        };
        let (suffix, child) = match node.edges.into_iter().next() {
            Some(edge) => edge,
            None => unreachable!(),
        };
        match self.arena[parent].edge_to(id) {
            Some(edge) => {
                edge.0.extend(suffix);
                edge.1 = child;
            }
            None => panic!("invariant violated: parent has no edge to merged node"),
        }
        self.arena[child].parent = Some(parent);
        debug!("merged {:?} into {:?} under {:?}", id, child, parent);
    }

    fn debug_validate(&self) {
        if cfg!(debug_assertions) && self.arena.len() <= DEBUG_VALIDATE_LIMIT {
            if let Err(err) = self.validate() {
                panic!("{}", err);
            }
        }
    }

    /// Checks every structural invariant and returns the first violation found.
    pub fn validate(&self) -> Result<()> {
        for (id, node) in self.arena.iter() {
            if id != self.root {
                let parent = node.parent.ok_or(InvariantError::MissingParent(id))?;
                let linked = self
                    .arena
                    .get(parent)
                    .map_or(false, |parent| parent.edges.iter().any(|edge| edge.1 == id));
                if !linked {
                    return Err(InvariantError::ParentMismatch { child: id, parent });
                }
                if !node.is_endpoint() && node.is_leaf() {
                    return Err(InvariantError::DanglingLeaf(id));
                }
            }
            for (index, (label, _)) in node.edges.iter().enumerate() {
                if label.is_empty() {
                    return Err(InvariantError::EmptyLabel(id));
                }
                let overlaps = node.edges[index + 1..]
                    .iter()
                    .any(|other| other.0.first() == label.first());
                if overlaps {
                    return Err(InvariantError::OverlappingEdges(id));
                }
            }
        }

        let mut visited = HashSet::new();
        let mut stack = vec![self.root];
        let mut counted = 0;
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                return Err(InvariantError::UnreachableNode(id));
            }
            let node = &self.arena[id];
            if node.is_endpoint() {
                counted += 1;
            }
            for (_, child) in &node.edges {
                match self.arena.get(*child) {
                    Some(child_node) if child_node.parent == Some(id) => stack.push(*child),
                    _ => {
                        return Err(InvariantError::ParentMismatch {
                            child: *child,
                            parent: id,
                        })
                    }
                }
            }
        }
        if let Some((id, _)) = self.arena.iter().find(|(id, _)| !visited.contains(id)) {
            return Err(InvariantError::UnreachableNode(id));
        }
        if counted != self.len {
            return Err(InvariantError::LengthMismatch {
                counted,
                expected: self.len,
            });
        }
        Ok(())
    }
}

impl<T, V> fmt::Debug for Tree<T, V>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn fmt_node<T: fmt::Debug, V>(
            arena: &NodeArena<Node<T, V>>,
            id: NodeId,
            f: &mut fmt::Formatter,
        ) -> fmt::Result {
            for (label, child) in &arena[id].edges {
                write!(f, "({:?} ", label)?;
                fmt_node(arena, *child, f)?;
                write!(f, ")")?;
            }
            Ok(())
        }
        fmt_node(&self.arena, self.root, f)
    }
}

#[cfg(test)]
mod tests {
    use super::{bounded_common_prefix, locate, Location, Tree};
    use crate::error::InvariantError;
    use crate::trie::config::TrieConfig;

    fn tree() -> Tree<u8, ()> {
        Tree::new(TrieConfig::default())
    }

    fn merging_tree() -> Tree<u8, ()> {
        Tree::new(TrieConfig::default().with_merge_on_remove(true))
    }

    #[test]
    fn test_bounded_common_prefix() {
        assert_eq!(bounded_common_prefix(b"012345", b"asdfx30123xbsw", 6, 14), 4);
        assert_eq!(bounded_common_prefix(b"012345", b"asdfx30123xbsw", 6, 8), 2);
        assert_eq!(bounded_common_prefix(b"abc", b"abcdef", 0, 6), 3);
        assert_eq!(bounded_common_prefix(b"abc", b"xbc", 0, 3), 0);
        assert_eq!(bounded_common_prefix(b"abc", b"abc", 3, 3), 0);
        assert_eq!(bounded_common_prefix(b"", b"abc", 0, 3), 0);
    }

    #[test]
    fn test_locate_empty_query() {
        let tree = tree();
        assert_eq!(
            locate(&tree.arena, tree.root, b"", 0, 0),
            Location {
                node: tree.root,
                edge: None,
                start: 0,
                end: 0,
            },
        );
    }

    #[test]
    fn test_locate() {
        let mut tree = tree();
        let (abc, _) = tree.insert(b"abc", ());
        tree.insert(b"abd", ());
        let ab = tree.arena[abc].parent.unwrap();

        // Exact landing on an internal node.
        assert_eq!(
            tree.locate(b"ab"),
            Location {
                node: ab,
                edge: None,
                start: 2,
                end: 2,
            },
        );
        // Nothing in common below the internal node.
        assert_eq!(
            tree.locate(b"abx"),
            Location {
                node: ab,
                edge: None,
                start: 2,
                end: 2,
            },
        );
        // Divergence in the middle of the root edge.
        assert_eq!(
            tree.locate(b"ax"),
            Location {
                node: tree.root,
                edge: Some(0),
                start: 0,
                end: 1,
            },
        );
        // Query exhausted in the middle of an edge.
        assert_eq!(
            tree.locate(b"a"),
            Location {
                node: tree.root,
                edge: Some(0),
                start: 0,
                end: 1,
            },
        );
        // Nothing in common at the root.
        assert_eq!(
            tree.locate(b"zz"),
            Location {
                node: tree.root,
                edge: None,
                start: 0,
                end: 0,
            },
        );
    }

    #[test]
    fn test_insert_new_leaf() {
        let mut tree = tree();
        let (leaf, old) = tree.insert(b"abc", ());
        assert_eq!(old, None);
        assert_eq!(tree.arena[tree.root].edges, vec![(b"abc".to_vec(), leaf)]);
        assert_eq!(tree.arena[leaf].parent, Some(tree.root));
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_insert_split_with_leaf() {
        let mut tree = tree();
        let (abc, _) = tree.insert(b"abc", ());
        let (abd, _) = tree.insert(b"abd", ());

        let middle = tree.arena[abc].parent.unwrap();
        assert_eq!(tree.arena[abd].parent, Some(middle));
        assert_eq!(tree.arena[tree.root].edges, vec![(b"ab".to_vec(), middle)]);
        assert_eq!(
            tree.arena[middle].edges,
            vec![(b"c".to_vec(), abc), (b"d".to_vec(), abd)],
        );
        assert!(!tree.arena[middle].is_endpoint());
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_insert_split_at_end_of_key() {
        let mut tree = tree();
        let (abc, _) = tree.insert(b"abc", ());
        let (ab, _) = tree.insert(b"ab", ());

        assert_eq!(tree.arena[abc].parent, Some(ab));
        assert!(tree.arena[ab].is_endpoint());
        assert_eq!(tree.arena[tree.root].edges, vec![(b"ab".to_vec(), ab)]);
        assert_eq!(tree.arena[ab].edges, vec![(b"c".to_vec(), abc)]);
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_insert_split_preserves_subtree() {
        let mut tree = tree();
        let (abcd, _) = tree.insert(b"abcd", ());
        let (abce, _) = tree.insert(b"abce", ());
        let abc = tree.arena[abcd].parent.unwrap();
        tree.insert(b"ax", ());

        assert_eq!(
            tree.arena[abc].edges,
            vec![(b"d".to_vec(), abcd), (b"e".to_vec(), abce)],
        );
        let a = tree.arena[abc].parent.unwrap();
        let label = tree.arena[a].edge_to(abc).map(|edge| edge.0.clone());
        assert_eq!(label, Some(b"bc".to_vec()));
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_insert_existing_returns_old_value() {
        let mut tree: Tree<u8, u32> = Tree::new(TrieConfig::default());
        let (first, old) = tree.insert(b"ab", 1);
        assert_eq!(old, None);
        let (second, old) = tree.insert(b"ab", 2);
        assert_eq!(old, Some(1));
        assert_eq!(first, second);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(b"ab"), Some(&2));
    }

    #[test]
    fn test_remove_prunes_to_empty_root() {
        let mut tree = tree();
        tree.insert(b"abc", ());
        assert_eq!(tree.remove(b"abc"), Some(()));
        assert!(tree.arena[tree.root].is_leaf());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_remove_absent() {
        let mut tree = tree();
        tree.insert(b"abc", ());
        assert_eq!(tree.remove(b"ab"), None);
        assert_eq!(tree.remove(b"abcd"), None);
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove_stops_at_branch_without_merging() {
        let mut tree = tree();
        tree.insert(b"abc", ());
        let (abd, _) = tree.insert(b"abd", ());
        tree.remove(b"abc");

        let middle = tree.arena[abd].parent.unwrap();
        assert_eq!(tree.arena[tree.root].edges, vec![(b"ab".to_vec(), middle)]);
        assert_eq!(tree.arena[middle].edges, vec![(b"d".to_vec(), abd)]);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.validate(), Ok(()));
        assert!(tree.find(b"abd").is_some());
    }

    #[test]
    fn test_remove_merges_single_child() {
        let mut tree = merging_tree();
        tree.insert(b"abc", ());
        let (abd, _) = tree.insert(b"abd", ());
        tree.remove(b"abc");

        assert_eq!(tree.arena[tree.root].edges, vec![(b"abd".to_vec(), abd)]);
        assert_eq!(tree.arena[abd].parent, Some(tree.root));
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_remove_merges_removed_node() {
        let mut tree = merging_tree();
        tree.insert(b"ab", ());
        let (abcd, _) = tree.insert(b"abcd", ());
        tree.remove(b"ab");

        assert_eq!(tree.arena[tree.root].edges, vec![(b"abcd".to_vec(), abcd)]);
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_remove_never_merges_root() {
        let mut tree = merging_tree();
        tree.insert(b"", ());
        tree.insert(b"ab", ());
        tree.remove(b"");

        assert_eq!(tree.arena[tree.root].edges.len(), 1);
        assert_eq!(tree.validate(), Ok(()));
        assert!(tree.find(b"ab").is_some());
    }

    #[test]
    fn test_validate_detects_corruption() {
        let mut tree = tree();
        let (abc, _) = tree.insert(b"abc", ());
        tree.arena[abc].value = None;
        assert_eq!(tree.validate(), Err(InvariantError::DanglingLeaf(abc)));

        let mut tree = tree_with(&[b"abc", b"xyz"]);
        let (label, child) = tree.arena[tree.root].edges[1].clone();
        tree.arena[tree.root].edges[1] = (vec![b'a'], child);
        assert_eq!(label, b"xyz".to_vec());
        assert_eq!(tree.validate(), Err(InvariantError::OverlappingEdges(tree.root)));

        let mut tree = tree_with(&[b"abc"]);
        tree.len = 2;
        assert_eq!(
            tree.validate(),
            Err(InvariantError::LengthMismatch {
                counted: 1,
                expected: 2,
            }),
        );
    }

    fn tree_with(keys: &[&[u8]]) -> Tree<u8, ()> {
        let mut tree = tree();
        for key in keys {
            tree.insert(key, ());
        }
        tree
    }

    #[test]
    fn test_debug_format() {
        let tree = tree_with(&[b"ab", b"ac"]);
        assert_eq!(format!("{:?}", tree), "([97] ([98] )([99] ))");
    }

    #[test]
    fn test_clear() {
        let mut tree = tree_with(&[b"ab", b"ac", b""]);
        tree.clear();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.node_count(), 1);
        assert!(tree.find(b"").is_none());
        assert_eq!(tree.validate(), Ok(()));
    }
}
