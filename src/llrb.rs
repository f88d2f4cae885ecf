use std::{
    borrow::Borrow,
    cmp::{Ord, Ordering},
    mem,
};

use log::debug;
use rand::Rng;

use crate::depth::Depth;
use crate::error::Error;
use crate::pool::{Node, NodeId, Pool};

/// Llrb manage a single instance of in-memory ordered map using
/// [left-leaning-red-black][llrb] tree. Nodes live in a pool owned by
/// the instance, slots released by deletes are reused by later inserts.
///
/// [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree
pub struct Llrb<K, V>
where
    K: Ord,
{
    name: String,
    root: Option<NodeId>,
    pool: Pool<K, V>,
    n_count: usize, // number of entries in the tree.
}

/// Different ways to construct a new Llrb instance.
impl<K, V> Llrb<K, V>
where
    K: Ord,
{
    /// Create an empty instance of Llrb, identified by `name`.
    /// Applications can choose unique names.
    pub fn new<S>(name: S) -> Llrb<K, V>
    where
        S: AsRef<str>,
    {
        Llrb::with_capacity(name, 0)
    }

    /// Create an empty instance of Llrb with room for `capacity` nodes
    /// before the pool has to grow.
    pub fn with_capacity<S>(name: S, capacity: usize) -> Llrb<K, V>
    where
        S: AsRef<str>,
    {
        let name = name.as_ref().to_string();
        debug!("llrb {} created, capacity:{}", name, capacity);
        Llrb {
            name,
            root: Default::default(),
            pool: Pool::with_capacity(capacity),
            n_count: Default::default(),
        }
    }

    /// Create a new instance of Llrb tree and load it with entries
    /// from `iter`. Later entries overwrite earlier ones with the same
    /// key.
    pub fn load_from<S, I>(name: S, iter: I) -> Llrb<K, V>
    where
        S: AsRef<str>,
        I: Iterator<Item = (K, V)>,
    {
        let mut llrb = Llrb::with_capacity(name, iter.size_hint().0);
        for (key, value) in iter {
            llrb.set(key, value);
        }
        llrb
    }
}

/// Maintenance API.
impl<K, V> Llrb<K, V>
where
    K: Ord,
{
    /// Identify this instance. Applications can choose unique names while
    /// creating Llrb instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drop all entries. Pool memory is kept for the next round of
    /// inserts.
    pub fn clear(&mut self) {
        debug!("llrb {} clear, {} entries", self.name, self.n_count);
        self.pool.clear();
        self.root = None;
        self.n_count = 0;
    }

    /// Return quickly with basic statisics, only entries() and pool
    /// related methods are valid with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, mem::size_of::<Node<K, V>>(), &self.pool)
    }
}

/// Write operations on Llrb instance.
impl<K, V> Llrb<K, V>
where
    K: Ord,
{
    /// Create a new {key, value} entry in the index. If key is already
    /// present return error and leave the index untouched.
    pub fn create(&mut self, key: K, value: V) -> Result<(), Error<K>> {
        if self.contains(&key) {
            return Err(Error::OverwriteKey);
        }
        self.set(key, value);
        Ok(())
    }

    /// Set value for key. If there is an existing entry for key,
    /// overwrite the old value with new value and return the old value.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let root = self.root;
        let (root, old_value) = self.upsert(root, key, value);
        self.pool[root].set_black();
        self.root = Some(root);
        if old_value.is_none() {
            self.n_count += 1;
        }
        old_value
    }

    /// Delete key from this instance and return its value. If key is
    /// not present, then delete is effectively a no-op.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if !self.contains(key) {
            return None;
        }
        let root = self.paint_root()?;
        let (root, old_value) = self.do_delete(root, key);
        self.set_root(root);
        self.n_count -= 1;
        Some(old_value)
    }

    /// Delete the smallest entry and return it, no-op on empty index.
    pub fn delete_min(&mut self) -> Option<(K, V)> {
        let root = self.paint_root()?;
        let (root, entry) = self.do_delete_min(root);
        self.set_root(root);
        self.n_count -= 1;
        Some(entry)
    }

    /// Delete the largest entry and return it, no-op on empty index.
    pub fn delete_max(&mut self) -> Option<(K, V)> {
        let root = self.paint_root()?;
        let (root, entry) = self.do_delete_max(root);
        self.set_root(root);
        self.n_count -= 1;
        Some(entry)
    }

    // a root without red children is a 2-node, lend it a red link so
    // that deletes always start from a 3-node or 4-node.
    fn paint_root(&mut self) -> Option<NodeId> {
        let root = self.root?;
        let (left, right) = (self.pool[root].left, self.pool[root].right);
        if !self.is_red(left) && !self.is_red(right) {
            self.pool[root].set_red();
        }
        Some(root)
    }

    fn set_root(&mut self, root: Option<NodeId>) {
        if let Some(root) = root {
            self.pool[root].set_black();
        }
        self.root = root;
    }
}

/// Read operations on Llrb instance.
impl<K, V> Llrb<K, V>
where
    K: Ord,
{
    /// Get the value for key.
    pub fn get<Q>(&self, key: &Q) -> Result<&V, Error<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find(key) {
            Some(node) => Ok(&self.pool[node].value),
            None => Err(Error::NotFound),
        }
    }

    /// Check whether key is present in this instance.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Return the value for the largest key less than or equal to `key`.
    pub fn floor<Q>(&self, key: &Q) -> Result<&V, Error<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut node, mut found) = (self.root, None);
        while let Some(n) = node {
            let nref = &self.pool[n];
            node = match nref.key.borrow().cmp(key) {
                Ordering::Greater => nref.left,
                Ordering::Less => {
                    found = Some(n);
                    nref.right
                }
                Ordering::Equal => return Ok(&nref.value),
            };
        }
        found.map(|n| &self.pool[n].value).ok_or(Error::NotFound)
    }

    /// Return the value for the smallest key greater than or equal to
    /// `key`.
    pub fn ceil<Q>(&self, key: &Q) -> Result<&V, Error<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut node, mut found) = (self.root, None);
        while let Some(n) = node {
            let nref = &self.pool[n];
            node = match nref.key.borrow().cmp(key) {
                Ordering::Less => nref.right,
                Ordering::Greater => {
                    found = Some(n);
                    nref.left
                }
                Ordering::Equal => return Ok(&nref.value),
            };
        }
        found.map(|n| &self.pool[n].value).ok_or(Error::NotFound)
    }

    /// Return the smallest entry.
    pub fn min(&self) -> Result<(&K, &V), Error<K>> {
        let mut node = self.root.ok_or(Error::NotFound)?;
        while let Some(left) = self.pool[node].left {
            node = left;
        }
        let nref = &self.pool[node];
        Ok((&nref.key, &nref.value))
    }

    /// Return the largest entry.
    pub fn max(&self) -> Result<(&K, &V), Error<K>> {
        let mut node = self.root.ok_or(Error::NotFound)?;
        while let Some(right) = self.pool[node].right {
            node = right;
        }
        let nref = &self.pool[node];
        Ok((&nref.key, &nref.value))
    }

    /// Return a random entry from this index.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<(&K, &V)> {
        let mut node = self.root?;

        let mut at_depth = rng.gen::<u8>() % 40;
        loop {
            let nref = &self.pool[node];
            let next = match rng.gen::<u8>() % 2 {
                0 => nref.left,
                _ => nref.right,
            };
            match next {
                Some(next) if at_depth > 0 => {
                    at_depth -= 1;
                    node = next;
                }
                _ => break Some((&nref.key, &nref.value)),
            }
        }
    }

    fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root;
        while let Some(n) = node {
            let nref = &self.pool[n];
            node = match nref.key.borrow().cmp(key) {
                Ordering::Less => nref.right,
                Ordering::Greater => nref.left,
                Ordering::Equal => return Some(n),
            };
        }
        None
    }
}

/// Validation of Llrb instance.
impl<K, V> Llrb<K, V>
where
    K: Clone + Ord,
{
    /// Validate LLRB tree with following rules:
    ///
    /// * Root is black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * No red link leans right.
    /// * Number of blacks should be same under left child and right child.
    /// * Make sure keys are in sorted order.
    /// * Entry count matches the live nodes held by the pool.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, Error<K>> {
        if self.is_red(self.root) {
            return Err(Error::RedRoot);
        }
        if self.n_count != self.pool.live() {
            return Err(Error::CountMismatch(self.n_count, self.pool.live()));
        }

        let node_size = mem::size_of::<Node<K, V>>();
        let mut stats = Stats::new(self.n_count, node_size, &self.pool);
        let mut depths = Depth::new();
        let blacks = self.validate_tree(self.root, false, (None, None), 0, &mut depths)?;
        stats.set_blacks(blacks);
        stats.set_depths(depths);
        debug!("llrb {} validated, {:?}", self.name, stats);
        Ok(stats)
    }

    fn validate_tree(
        &self,
        node: Option<NodeId>,
        fromred: bool,
        (low, high): (Option<&K>, Option<&K>), // keys bounding this subtree
        depth: usize,
        depths: &mut Depth,
    ) -> Result<usize, Error<K>> {
        let node = match node {
            None => {
                depths.sample(depth);
                return Ok(0);
            }
            Some(node) => node,
        };
        let nref = &self.pool[node];
        let red = !nref.is_black();
        if fromred && red {
            return Err(Error::ConsecutiveReds);
        }
        if self.is_red(nref.right) {
            return Err(Error::RightLeaningRed);
        }
        if let Some(low) = low {
            if nref.key.le(low) {
                return Err(Error::SortError(nref.key.clone(), low.clone()));
            }
        }
        if let Some(high) = high {
            if nref.key.ge(high) {
                return Err(Error::SortError(nref.key.clone(), high.clone()));
            }
        }

        let (lb, rb) = ((low, Some(&nref.key)), (Some(&nref.key), high));
        let lblacks = self.validate_tree(nref.left, red, lb, depth + 1, depths)?;
        let rblacks = self.validate_tree(nref.right, red, rb, depth + 1, depths)?;
        if lblacks != rblacks {
            let err = format!("left: {} right: {}", lblacks, rblacks);
            return Err(Error::UnbalancedBlacks(err));
        }
        Ok(lblacks + if red { 0 } else { 1 })
    }
}

impl<K, V> Llrb<K, V>
where
    K: Ord,
{
    fn upsert(&mut self, node: Option<NodeId>, key: K, value: V) -> (NodeId, Option<V>) {
        let node = match node {
            None => return (self.pool.acquire(key, value), None),
            Some(node) => node,
        };

        let old_value = match self.pool[node].key.cmp(&key) {
            Ordering::Greater => {
                let left = self.pool[node].left;
                let (left, o) = self.upsert(left, key, value);
                self.pool[node].left = Some(left);
                o
            }
            Ordering::Less => {
                let right = self.pool[node].right;
                let (right, o) = self.upsert(right, key, value);
                self.pool[node].right = Some(right);
                o
            }
            Ordering::Equal => Some(mem::replace(&mut self.pool[node].value, value)),
        };
        (self.walkuprot_23(node), old_value)
    }

    // key must be present under node.
    fn do_delete<Q>(&mut self, mut node: NodeId, key: &Q) -> (Option<NodeId>, V)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if self.pool[node].key.borrow().gt(key) {
            let left = self.pool[node].left;
            if !self.is_red(left) && !self.is_red(self.left_of(left)) {
                node = self.move_red_left(node);
            }
            let left = link(self.pool[node].left, "do_delete()");
            let (left, old_value) = self.do_delete(left, key);
            self.pool[node].left = left;
            return (Some(self.fixup(node)), old_value);
        }

        if self.is_red(self.pool[node].left) {
            node = self.rotate_right(node);
        }

        if self.pool[node].key.borrow().eq(key) && self.pool[node].right.is_none() {
            let (_, value) = self.pool.release(node);
            return (None, value);
        }

        let right = self.pool[node].right;
        if !self.is_red(right) && !self.is_red(self.left_of(right)) {
            node = self.move_red_right(node);
        }

        let right = link(self.pool[node].right, "do_delete()");
        if self.pool[node].key.borrow().eq(key) {
            // node == key, pull up the successor and drop its node.
            let (right, (skey, svalue)) = self.do_delete_min(right);
            let nref = &mut self.pool[node];
            nref.right = right;
            nref.key = skey;
            let old_value = mem::replace(&mut nref.value, svalue);
            (Some(self.fixup(node)), old_value)
        } else {
            let (right, old_value) = self.do_delete(right, key);
            self.pool[node].right = right;
            (Some(self.fixup(node)), old_value)
        }
    }

    fn do_delete_min(&mut self, mut node: NodeId) -> (Option<NodeId>, (K, V)) {
        let left = self.pool[node].left;
        if left.is_none() {
            return (None, self.pool.release(node));
        }
        if !self.is_red(left) && !self.is_red(self.left_of(left)) {
            node = self.move_red_left(node);
        }
        let left = link(self.pool[node].left, "do_delete_min()");
        let (left, entry) = self.do_delete_min(left);
        self.pool[node].left = left;
        (Some(self.fixup(node)), entry)
    }

    fn do_delete_max(&mut self, mut node: NodeId) -> (Option<NodeId>, (K, V)) {
        if self.is_red(self.pool[node].left) {
            node = self.rotate_right(node);
        }
        let right = self.pool[node].right;
        if right.is_none() {
            return (None, self.pool.release(node));
        }
        if !self.is_red(right) && !self.is_red(self.left_of(right)) {
            node = self.move_red_right(node);
        }
        let right = link(self.pool[node].right, "do_delete_max()");
        let (right, entry) = self.do_delete_max(right);
        self.pool[node].right = right;
        (Some(self.fixup(node)), entry)
    }

    //--------- rotation routines for 2-3 algorithm ----------------

    fn walkuprot_23(&mut self, mut node: NodeId) -> NodeId {
        let (left, right) = (self.pool[node].left, self.pool[node].right);
        if self.is_red(right) && !self.is_red(left) {
            node = self.rotate_left(node);
        }
        let left = self.pool[node].left;
        if self.is_red(left) && self.is_red(self.left_of(left)) {
            node = self.rotate_right(node);
        }
        let (left, right) = (self.pool[node].left, self.pool[node].right);
        if self.is_red(left) && self.is_red(right) {
            self.flip(node)
        }
        node
    }

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    (r)                 (r)  \
    //            /       \                 /     \
    //          left       x             node      xr
    //                    / \            /  \
    //                  xl   xr       left   xl
    //
    fn rotate_left(&mut self, node: NodeId) -> NodeId {
        let x = match self.pool[node].right {
            Some(x) if !self.pool[x].is_black() => x,
            _ => panic!("rotate_left(): rotating a black link ? Call the programmer"),
        };
        self.pool[node].right = self.pool[x].left;
        self.pool[x].left = Some(node);
        self.pool[x].black = self.pool[node].black;
        self.pool[node].set_red();
        x
    }

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //            (r)   \                   (r)  \
    //           /       \                 /      \
    //          x       right             xl      node
    //         / \                                / \
    //       xl   xr                             xr  right
    //
    fn rotate_right(&mut self, node: NodeId) -> NodeId {
        let x = match self.pool[node].left {
            Some(x) if !self.pool[x].is_black() => x,
            _ => panic!("rotate_right(): rotating a black link ? Call the programmer"),
        };
        self.pool[node].left = self.pool[x].right;
        self.pool[x].right = Some(node);
        self.pool[x].black = self.pool[node].black;
        self.pool[node].set_red();
        x
    }

    //        (x)                   (!x)
    //         |                     |
    //        node                  node
    //        / \                   / \
    //      (y) (z)              (!y) (!z)
    //     /      \              /      \
    //   left    right         left    right
    //
    fn flip(&mut self, node: NodeId) {
        let left = link(self.pool[node].left, "flip()");
        let right = link(self.pool[node].right, "flip()");
        self.pool[left].toggle_link();
        self.pool[right].toggle_link();
        self.pool[node].toggle_link();
    }

    fn fixup(&mut self, mut node: NodeId) -> NodeId {
        if self.is_red(self.pool[node].right) {
            node = self.rotate_left(node);
        }
        let left = self.pool[node].left;
        if self.is_red(left) && self.is_red(self.left_of(left)) {
            node = self.rotate_right(node);
        }
        let (left, right) = (self.pool[node].left, self.pool[node].right);
        if self.is_red(left) && self.is_red(right) {
            self.flip(node);
        }
        node
    }

    fn move_red_left(&mut self, mut node: NodeId) -> NodeId {
        self.flip(node);
        let right = link(self.pool[node].right, "move_red_left()");
        if self.is_red(self.pool[right].left) {
            let right = self.rotate_right(right);
            self.pool[node].right = Some(right);
            node = self.rotate_left(node);
            self.flip(node);
        }
        node
    }

    fn move_red_right(&mut self, mut node: NodeId) -> NodeId {
        self.flip(node);
        let left = link(self.pool[node].left, "move_red_right()");
        if self.is_red(self.pool[left].left) {
            node = self.rotate_right(node);
            self.flip(node);
        }
        node
    }

    #[inline]
    fn is_red(&self, node: Option<NodeId>) -> bool {
        node.map_or(false, |node| !self.pool[node].is_black())
    }

    #[inline]
    fn left_of(&self, node: Option<NodeId>) -> Option<NodeId> {
        node.and_then(|node| self.pool[node].left)
    }

    pub(crate) fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.pool[id]
    }
}

// link that the LLRB shape guarantees to be present.
fn link(node: Option<NodeId>, caller: &str) -> NodeId {
    match node {
        Some(node) => node,
        None => panic!("{}: missing link, call the programmer", caller),
    }
}

/// Statistics on [`Llrb`] tree. Serves two purpose:
///
/// * To get partial but quick statistics via [`Llrb::stats`] method.
/// * To get full statisics via [`Llrb::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    pool_capacity: usize,
    pool_free: usize,
    pool_reused: usize,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new<K, V>(entries: usize, node_size: usize, pool: &Pool<K, V>) -> Stats {
        Stats {
            entries,
            node_size,
            pool_capacity: pool.capacity(),
            pool_free: pool.free(),
            pool_reused: pool.reused(),
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in [`Llrb`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head for `Llrb<k,V>`. Node
    /// overhead is constant, the node size varies with key and value
    /// types.
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of node slots the pool can hold without growing.
    #[inline]
    pub fn pool_capacity(&self) -> usize {
        self.pool_capacity
    }

    /// Return number of released slots waiting to be reused.
    #[inline]
    pub fn pool_free(&self) -> usize {
        self.pool_free
    }

    /// Return number of inserts that were served by a released slot.
    #[inline]
    pub fn pool_reused(&self) -> usize {
        self.pool_reused
    }

    /// Return number of black nodes from root to leaf, on both left
    /// and right child.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics.
    pub fn depths(&self) -> Option<Depth> {
        match &self.depths {
            Some(depths) if depths.samples() > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}
