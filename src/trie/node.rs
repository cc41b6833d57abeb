use crate::arena::NodeId;

/// An opaque reference to a node of a compressed trie.
///
/// A handle stays valid until the node it names is pruned or merged away by a removal. After
/// that the slot may be reused by a later insertion.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeHandle(pub(crate) NodeId);

impl NodeHandle {
    /// Returns the arena id of the node.
    pub fn id(self) -> NodeId {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct Node<T, V> {
    pub edges: Vec<(Vec<T>, NodeId)>,
    pub parent: Option<NodeId>,
    pub value: Option<V>,
}

impl<T, V> Node<T, V> {
    pub fn new(parent: Option<NodeId>) -> Self {
        Node {
            edges: Vec::new(),
            parent,
            value: None,
        }
    }

    pub fn is_endpoint(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_leaf(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn add_edge(&mut self, label: Vec<T>, child: NodeId) {
        debug_assert!(!label.is_empty());
        self.edges.push((label, child));
    }

    pub fn edge_to(&mut self, child: NodeId) -> Option<&mut (Vec<T>, NodeId)> {
        self.edges.iter_mut().find(|edge| edge.1 == child)
    }

    /// Detaches `child` and returns the label of the edge that led to it.
    pub fn remove_child(&mut self, child: NodeId) -> Option<Vec<T>> {
        let index = self.edges.iter().position(|edge| edge.1 == child)?;
        Some(self.edges.remove(index).0)
    }
}
