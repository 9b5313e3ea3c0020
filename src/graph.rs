//! KGraph: a keyed collection of nodes, each with exactly `D` labeled
//! connection slots.

use crate::cursor::{ConstCursor, Cursor, Position};
use crate::error::GraphError;
use crate::node::{Node, NodeId};
use crate::node_map::{self, NodeMap};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// Identity of one graph instance. Cursors carry it so they can be checked
/// against the graph they are used with.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct GraphId(u64);

impl GraphId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        GraphId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A graph whose nodes are addressed by key and each own exactly `D`
/// connection slots.
///
/// Slot indices are labels chosen by the caller (for example one per
/// compass direction), not insertion order. A slot is either empty or
/// references a node of the same graph, possibly the node itself.
///
/// Removing a node does not clear slots in other nodes that referenced
/// it. Such slots dangle: traversal through them reports
/// [`GraphError::IteratorReachedEnd`], and `connect` treats them as free.
pub struct KGraph<K, V, const D: usize, S = RandomState> {
    id: GraphId,
    default_value: V,
    nodes: NodeMap<K, V, D, S>,
}

impl<K, V, const D: usize> KGraph<K, V, D>
where
    K: Eq + Hash,
{
    /// Create an empty graph. `default_value` fills nodes created by
    /// [`insert_default`](Self::insert_default) and
    /// [`get_or_insert_default`](Self::get_or_insert_default).
    pub fn new(default_value: V) -> Self {
        Self::with_hasher(default_value, RandomState::new())
    }
}

impl<K, V, const D: usize> Default for KGraph<K, V, D>
where
    K: Eq + Hash,
    V: Default,
{
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<K, V, const D: usize, S> KGraph<K, V, D, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    pub fn with_hasher(default_value: V, hasher: S) -> Self {
        Self {
            id: GraphId::fresh(),
            default_value,
            nodes: NodeMap::with_hasher(hasher),
        }
    }

    /// Number of slots on every node.
    pub fn degree(&self) -> usize {
        D
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    pub fn default_value(&self) -> &V {
        &self.default_value
    }

    /// Insert a node with every slot empty.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), GraphError> {
        self.nodes.insert(key, value)?;
        debug!(len = self.nodes.len(), "inserted node");
        Ok(())
    }

    /// Remove a node and return its value.
    ///
    /// Slots of other nodes that referenced it are left as they are.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, GraphError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.lookup(key)?;
        self.remove_node(id)
    }

    /// Remove the node a cursor points at.
    pub fn remove_at(&mut self, cursor: &Cursor) -> Result<V, GraphError> {
        let id = self.resolve(cursor.position())?;
        self.remove_node(id)
    }

    fn remove_node(&mut self, id: NodeId) -> Result<V, GraphError> {
        let (_key, node) = self.nodes.remove(id).ok_or(GraphError::KeyNotFound)?;
        debug!(len = self.nodes.len(), "removed node");
        Ok(node.value)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.nodes.contains_key(key)
    }

    /// Read a value. Never creates a node.
    pub fn get<Q>(&self, key: &Q) -> Result<&V, GraphError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.lookup(key)?;
        Ok(&self.node(id)?.value)
    }

    /// Mutable access to an existing value. Never creates a node; see
    /// [`get_or_insert_default`](Self::get_or_insert_default) for that.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, GraphError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.lookup(key)?;
        Ok(&mut self.node_mut(id)?.value)
    }

    /// Connect `key_u` through its slot `slot_u` to `key_v` through its slot
    /// `slot_v`. The two indices need not match.
    ///
    /// Connection is a set relation: if any slot of `key_u` already
    /// references `key_v` this fails with `NodesAlreadyConnected`, whatever
    /// the indices.
    pub fn connect<Q>(
        &mut self,
        key_u: &Q,
        key_v: &Q,
        slot_u: usize,
        slot_v: usize,
    ) -> Result<(), GraphError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let u = self.lookup(key_u)?;
        let v = self.lookup(key_v)?;
        Self::check_slot(slot_u)?;
        Self::check_slot(slot_v)?;

        let u_node = self.node(u)?;
        let v_node = self.node(v)?;
        if u_node.links_to(v) {
            return Err(GraphError::NodesAlreadyConnected);
        }
        if self.live_slot(u_node, slot_u).is_some() || self.live_slot(v_node, slot_v).is_some() {
            return Err(GraphError::EdgeAlreadyInUse);
        }

        self.node_mut(u)?.set_slot(slot_u, v);
        self.node_mut(v)?.set_slot(slot_v, u);
        debug!(slot_u, slot_v, "connected nodes");
        Ok(())
    }

    /// Connect a node to itself through `slot`.
    pub fn connect_self<Q>(&mut self, key: &Q, slot: usize) -> Result<(), GraphError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.lookup(key)?;
        Self::check_slot(slot)?;
        match self.live_slot(self.node(id)?, slot) {
            Some(target) if target == id => return Err(GraphError::NodesAlreadyConnected),
            Some(_) => return Err(GraphError::EdgeAlreadyInUse),
            None => {}
        }
        self.node_mut(id)?.set_slot(slot, id);
        debug!(slot, "connected node to itself");
        Ok(())
    }

    /// Clear every slot of `key_u` that references `key_v` and every slot of
    /// `key_v` that references `key_u`.
    pub fn disconnect<Q>(&mut self, key_u: &Q, key_v: &Q) -> Result<(), GraphError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let u = self.lookup(key_u)?;
        let v = self.lookup(key_v)?;
        if !self.linked(u, v)? {
            return Err(GraphError::NodesAreNotConnected);
        }
        let mut cleared = self.node_mut(u)?.unlink(v);
        if u != v {
            cleared += self.node_mut(v)?.unlink(u);
        }
        debug!(cleared, "disconnected nodes");
        Ok(())
    }

    /// True when either node has a slot referencing the other.
    pub fn are_connected<Q>(&self, key_u: &Q, key_v: &Q) -> Result<bool, GraphError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let u = self.lookup(key_u)?;
        let v = self.lookup(key_v)?;
        self.linked(u, v)
    }

    /// Key of the node behind `slot` of `key`, if that slot holds a live node.
    pub fn neighbor<Q>(&self, key: &Q, slot: usize) -> Result<Option<&K>, GraphError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.lookup(key)?;
        Self::check_slot(slot)?;
        Ok(self.node(id)?.slot(slot).and_then(|t| self.nodes.key(t)))
    }

    /// Cursor at the node stored under `key`.
    pub fn begin_at<Q>(&self, key: &Q) -> Result<Cursor, GraphError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.lookup(key)?;
        Ok(Cursor::new(Position::at(self.id, id)))
    }

    /// Read-only cursor at the node stored under `key`.
    pub fn cbegin_at<Q>(&self, key: &Q) -> Result<ConstCursor, GraphError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.begin_at(key).map(ConstCursor::from)
    }

    /// The end sentinel of this graph.
    pub fn end(&self) -> ConstCursor {
        ConstCursor::new(Position::end(self.id))
    }

    pub fn iter(&self) -> Iter<'_, K, V, D> {
        Iter {
            inner: self.nodes.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    // ---- traversal primitives used by cursors ----

    /// The node a cursor position stands on, validated against this graph.
    pub(crate) fn resolve(&self, pos: &Position) -> Result<NodeId, GraphError> {
        if pos.graph != self.id {
            return Err(GraphError::WrongGraph);
        }
        pos.node
            .filter(|&id| self.nodes.is_live(id))
            .ok_or(GraphError::IteratorReachedEnd)
    }

    /// The node reachable from `pos` through `slot`.
    pub(crate) fn step_from(&self, pos: &Position, slot: usize) -> Result<NodeId, GraphError> {
        if pos.graph != self.id {
            return Err(GraphError::WrongGraph);
        }
        Self::check_slot(slot)?;
        let here = self.resolve(pos)?;
        let node = self.node(here)?;
        match self.live_slot(node, slot) {
            Some(next) => Ok(next),
            None => {
                trace!(slot, dangling = node.slot(slot).is_some(), "no node behind slot");
                Err(GraphError::IteratorReachedEnd)
            }
        }
    }

    pub(crate) fn key_at(&self, pos: &Position) -> Result<&K, GraphError> {
        let id = self.resolve(pos)?;
        self.nodes.key(id).ok_or(GraphError::IteratorReachedEnd)
    }

    pub(crate) fn value_at(&self, pos: &Position) -> Result<&V, GraphError> {
        let id = self.resolve(pos)?;
        Ok(&self.node(id)?.value)
    }

    pub(crate) fn value_at_mut(&mut self, pos: &Position) -> Result<&mut V, GraphError> {
        let id = self.resolve(pos)?;
        Ok(&mut self.node_mut(id)?.value)
    }

    // ---- helpers ----

    fn lookup<Q>(&self, key: &Q) -> Result<NodeId, GraphError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.nodes.find(key).ok_or(GraphError::KeyNotFound)
    }

    fn node(&self, id: NodeId) -> Result<&Node<V, D>, GraphError> {
        self.nodes.node(id).ok_or(GraphError::KeyNotFound)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<V, D>, GraphError> {
        self.nodes.node_mut(id).ok_or(GraphError::KeyNotFound)
    }

    #[inline]
    fn check_slot(index: usize) -> Result<(), GraphError> {
        if index < D {
            Ok(())
        } else {
            Err(GraphError::EdgeOutOfRange { index, degree: D })
        }
    }

    /// Slot content if it names a node that is still alive.
    fn live_slot(&self, node: &Node<V, D>, index: usize) -> Option<NodeId> {
        node.slot(index).filter(|&t| self.nodes.is_live(t))
    }

    fn linked(&self, u: NodeId, v: NodeId) -> Result<bool, GraphError> {
        Ok(self.node(u)?.links_to(v) || self.node(v)?.links_to(u))
    }
}

impl<K, V, const D: usize, S> KGraph<K, V, D, S>
where
    K: Eq + Hash,
    V: Clone,
    S: BuildHasher + Clone + Default,
{
    /// Insert a node holding a copy of the default value.
    pub fn insert_default(&mut self, key: K) -> Result<(), GraphError> {
        let value = self.default_value.clone();
        self.insert(key, value)
    }

    /// Mutable access to the value under `key`, creating a node with the
    /// default value first when the key is absent.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V {
        let default_value = &self.default_value;
        let (node, inserted) = self
            .nodes
            .find_or_insert_with(key, || default_value.clone());
        if inserted {
            debug!("auto-vivified node with default value");
        }
        &mut node.value
    }
}

/// A copy has the same keys, values and connections, and is a distinct
/// graph: cursors of the original are rejected by it.
impl<K, V, const D: usize, S> Clone for KGraph<K, V, D, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            id: GraphId::fresh(),
            default_value: self.default_value.clone(),
            nodes: self.nodes.clone(),
        }
    }
}

impl<K, V, const D: usize, S> fmt::Debug for KGraph<K, V, D, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher + Clone + Default,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over `(key, value)` pairs in unspecified order.
pub struct Iter<'a, K, V, const D: usize> {
    inner: node_map::Iter<'a, K, V, D>,
}

impl<'a, K, V, const D: usize> Iterator for Iter<'a, K, V, D> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, k, n)| (k, &n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
