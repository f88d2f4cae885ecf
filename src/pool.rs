use std::ops::{Index, IndexMut};

use log::{debug, trace};
use slab::Slab;

/// Index of a node slot inside the [`Pool`] arena. Tree links are
/// expressed as `Option<NodeId>`, `None` being the nil (black) link.
pub(crate) type NodeId = usize;

/// Node corresponds to a single entry in the tree.
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) black: bool,             // store: black or red
    pub(crate) left: Option<NodeId>,    // store: left child
    pub(crate) right: Option<NodeId>,   // store: right child
}

impl<K, V> Node<K, V> {
    #[inline]
    pub(crate) fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.black = true
    }

    #[inline]
    pub(crate) fn toggle_link(&mut self) {
        self.black = !self.black
    }

    #[inline]
    pub(crate) fn is_black(&self) -> bool {
        self.black
    }
}

/// Pool of node slots. Released slots are kept on slab's vacant list
/// and handed out again by the next acquire, so a steady mix of
/// inserts and deletes stops allocating once the arena is warm.
pub(crate) struct Pool<K, V> {
    slots: Slab<Node<K, V>>,
    n_free: usize,   // released slots waiting for reuse.
    n_reused: usize, // acquisitions served from a released slot.
}

impl<K, V> Pool<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Pool<K, V> {
        Pool {
            slots: Slab::with_capacity(capacity),
            n_free: 0,
            n_reused: 0,
        }
    }

    /// Take a slot for a fresh entry. The returned node is red with
    /// both links nil, whatever the slot held before.
    pub(crate) fn acquire(&mut self, key: K, value: V) -> NodeId {
        let node = Node {
            key,
            value,
            black: false,
            left: None,
            right: None,
        };
        if self.n_free > 0 {
            self.n_free -= 1;
            self.n_reused += 1;
        } else if self.slots.len() == self.slots.capacity() {
            debug!("pool grow from {} slots", self.slots.capacity());
        }
        let id = self.slots.insert(node);
        trace!("pool acquire slot:{}", id);
        id
    }

    /// Give back a slot, returning the entry it held. The record leaves
    /// the arena, its links and color do not survive into the next
    /// acquire of this slot.
    pub(crate) fn release(&mut self, id: NodeId) -> (K, V) {
        let node = self.slots.remove(id);
        self.n_free += 1;
        trace!("pool release slot:{}", id);
        (node.key, node.value)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.n_free = 0;
    }

    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[inline]
    pub(crate) fn free(&self) -> usize {
        self.n_free
    }

    #[inline]
    pub(crate) fn reused(&self) -> usize {
        self.n_reused
    }
}

impl<K, V> Index<NodeId> for Pool<K, V> {
    type Output = Node<K, V>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<K, V> {
        &self.slots[id]
    }
}

impl<K, V> IndexMut<NodeId> for Pool<K, V> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.slots[id]
    }
}
