//! Slab allocator that backs the trie nodes.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to a slot in a `NodeArena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the raw slot index of the id.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant(Option<NodeId>),
}

/// A growable slab that owns every object allocated in it.
///
/// Freed slots are threaded onto an intrusive free list and reused by later allocations, so a
/// `NodeId` must not be used after the object it refers to has been freed. Lookups with an id that
/// is out of range or vacant return `None` rather than panicking.
///
/// # Examples
///
/// ```
/// use compressed_trie::arena::NodeArena;
///
/// let mut arena = NodeArena::with_capacity(16);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct NodeArena<T> {
    head: Option<NodeId>,
    slots: Vec<Slot<T>>,
    len: usize,
}

impl<T> NodeArena<T> {
    /// Constructs a new, empty `NodeArena<T>`.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Constructs a new, empty `NodeArena<T>` with room for `capacity` objects before it
    /// reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use compressed_trie::arena::NodeArena;
    ///
    /// let arena: NodeArena<u32> = NodeArena::with_capacity(1024);
    /// assert!(arena.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            head: None,
            slots: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Moves `value` into the arena and returns its id. Vacant slots are reused before the arena
    /// grows.
    pub fn allocate(&mut self, value: T) -> NodeId {
        self.len += 1;
        match self.head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                NodeId(self.slots.len() - 1)
            }
            Some(id) => match mem::replace(&mut self.slots[id.0], Slot::Occupied(value)) {
                Slot::Vacant(next) => {
                    self.head = next;
                    id
                }
                Slot::Occupied(_) => panic!("Error: free list points at an occupied slot."),
            },
        }
    }

    /// Deallocates the object behind `id` and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range or refers to a vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use compressed_trie::arena::NodeArena;
    ///
    /// let mut arena = NodeArena::new();
    /// let x = arena.allocate("foo");
    /// assert_eq!(arena.free(x), "foo");
    /// assert_eq!(arena.get(x), None);
    /// ```
    pub fn free(&mut self, id: NodeId) -> T {
        if id.0 >= self.slots.len() {
            panic!("Error: attempting to free invalid slot.");
        }
        match self.slots[id.0] {
            Slot::Vacant(_) => panic!("Error: attempting to free vacant slot."),
            Slot::Occupied(_) => {}
        }
        let old_slot = mem::replace(&mut self.slots[id.0], Slot::Vacant(self.head.take()));
        self.head = Some(id);
        self.len -= 1;
        match old_slot {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to the object behind `id`, or `None` if the slot is vacant
    /// or out of range.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(ref value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the object behind `id`, or `None` if the slot is vacant or
    /// out of range.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(ref mut value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every object in the arena.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.len = 0;
    }

    /// Returns an iterator over the ids and objects of every live slot, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied(ref value) => Some((NodeId(index), value)),
                Slot::Vacant(_) => None,
            })
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for NodeArena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.get(id).expect("Error: node id out of bounds.")
    }
}

impl<T> IndexMut<NodeId> for NodeArena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.get_mut(id).expect("Error: node id out of bounds.")
    }
}
