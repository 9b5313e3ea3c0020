//! Cursors: traversal handles that stand on one node of one graph, or on
//! that graph's end.
//!
//! A cursor owns nothing. It records which graph minted it and which node
//! it stands on, and every access goes back through the graph, which
//! re-validates both. [`Cursor`] can reach values mutably;
//! [`ConstCursor`] is the read-only view. A `Cursor` converts into a
//! `ConstCursor`, never the other way.

use crate::error::GraphError;
use crate::graph::{GraphId, KGraph};
use crate::node::NodeId;
use core::hash::{BuildHasher, Hash};

/// Shared representation of both cursor kinds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Position {
    pub(crate) graph: GraphId,
    pub(crate) node: Option<NodeId>,
}

impl Position {
    pub(crate) fn at(graph: GraphId, node: NodeId) -> Self {
        Self {
            graph,
            node: Some(node),
        }
    }

    pub(crate) fn end(graph: GraphId) -> Self {
        Self { graph, node: None }
    }

    fn advance<K, V, const D: usize, S>(
        &mut self,
        graph: &KGraph<K, V, D, S>,
        slot: usize,
    ) -> Result<(), GraphError>
    where
        K: Eq + Hash,
        S: BuildHasher + Clone + Default,
    {
        let next = graph.step_from(self, slot)?;
        self.node = Some(next);
        Ok(())
    }
}

/// Cursor with mutable access to the values it visits.
///
/// Two cursors are equal when they stand on the same node of the same
/// graph, or both stand on the end of the same graph.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Cursor {
    pos: Position,
}

impl Cursor {
    pub(crate) fn new(pos: Position) -> Self {
        Self { pos }
    }

    pub(crate) fn position(&self) -> &Position {
        &self.pos
    }

    /// True when the cursor stands on its graph's end.
    pub fn is_end(&self) -> bool {
        self.pos.node.is_none()
    }

    /// Move to the node behind `slot` of the current node.
    ///
    /// Fails with `EdgeOutOfRange` when `slot` is not below the degree and
    /// with `IteratorReachedEnd` when the cursor is at the end or the slot
    /// holds no live node. On failure the cursor does not move.
    pub fn advance<K, V, const D: usize, S>(
        &mut self,
        graph: &KGraph<K, V, D, S>,
        slot: usize,
    ) -> Result<&mut Self, GraphError>
    where
        K: Eq + Hash,
        S: BuildHasher + Clone + Default,
    {
        self.pos.advance(graph, slot)?;
        Ok(self)
    }

    /// Key of the current node.
    pub fn key<'g, K, V, const D: usize, S>(
        &self,
        graph: &'g KGraph<K, V, D, S>,
    ) -> Result<&'g K, GraphError>
    where
        K: Eq + Hash,
        S: BuildHasher + Clone + Default,
    {
        graph.key_at(&self.pos)
    }

    pub fn value<'g, K, V, const D: usize, S>(
        &self,
        graph: &'g KGraph<K, V, D, S>,
    ) -> Result<&'g V, GraphError>
    where
        K: Eq + Hash,
        S: BuildHasher + Clone + Default,
    {
        graph.value_at(&self.pos)
    }

    pub fn value_mut<'g, K, V, const D: usize, S>(
        &self,
        graph: &'g mut KGraph<K, V, D, S>,
    ) -> Result<&'g mut V, GraphError>
    where
        K: Eq + Hash,
        S: BuildHasher + Clone + Default,
    {
        graph.value_at_mut(&self.pos)
    }
}

/// Read-only cursor. Same traversal and equality as [`Cursor`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ConstCursor {
    pos: Position,
}

impl ConstCursor {
    pub(crate) fn new(pos: Position) -> Self {
        Self { pos }
    }

    pub fn is_end(&self) -> bool {
        self.pos.node.is_none()
    }

    /// See [`Cursor::advance`].
    pub fn advance<K, V, const D: usize, S>(
        &mut self,
        graph: &KGraph<K, V, D, S>,
        slot: usize,
    ) -> Result<&mut Self, GraphError>
    where
        K: Eq + Hash,
        S: BuildHasher + Clone + Default,
    {
        self.pos.advance(graph, slot)?;
        Ok(self)
    }

    pub fn key<'g, K, V, const D: usize, S>(
        &self,
        graph: &'g KGraph<K, V, D, S>,
    ) -> Result<&'g K, GraphError>
    where
        K: Eq + Hash,
        S: BuildHasher + Clone + Default,
    {
        graph.key_at(&self.pos)
    }

    pub fn value<'g, K, V, const D: usize, S>(
        &self,
        graph: &'g KGraph<K, V, D, S>,
    ) -> Result<&'g V, GraphError>
    where
        K: Eq + Hash,
        S: BuildHasher + Clone + Default,
    {
        graph.value_at(&self.pos)
    }
}

impl From<Cursor> for ConstCursor {
    fn from(c: Cursor) -> Self {
        ConstCursor { pos: c.pos }
    }
}

impl PartialEq<ConstCursor> for Cursor {
    fn eq(&self, other: &ConstCursor) -> bool {
        self.pos == other.pos
    }
}

impl PartialEq<Cursor> for ConstCursor {
    fn eq(&self, other: &Cursor) -> bool {
        self.pos == other.pos
    }
}
