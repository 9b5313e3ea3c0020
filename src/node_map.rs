//! NodeMap: keyed arena storage that exclusively owns a graph's nodes.

use crate::error::GraphError;
use crate::guard::AccessGuard;
use crate::node::{Node, NodeId};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use hashbrown::HashTable;
use slotmap::{DefaultKey, SlotMap};
use std::collections::hash_map::RandomState;

#[derive(Clone, Debug)]
struct Entry<K, V, const D: usize> {
    key: K,
    node: Node<V, D>,
    hash: u64,
}

#[derive(Clone)]
pub(crate) struct NodeMap<K, V, const D: usize, S = RandomState> {
    hasher: S,
    index: HashTable<DefaultKey>,
    entries: SlotMap<DefaultKey, Entry<K, V, D>>, // generational keys double as NodeIds
    guard: AccessGuard,
}

/// Iterator over live entries in arena order.
pub(crate) struct Iter<'a, K, V, const D: usize> {
    it: slotmap::basic::Iter<'a, DefaultKey, Entry<K, V, D>>,
}

impl<'a, K, V, const D: usize> Iterator for Iter<'a, K, V, D> {
    type Item = (NodeId, &'a K, &'a Node<V, D>);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it
            .next()
            .map(|(k, e)| (NodeId::new(k), &e.key, &e.node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V, const D: usize, S> NodeMap<K, V, D, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    pub(crate) fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            index: HashTable::new(),
            entries: SlotMap::with_key(),
            guard: AccessGuard::new(),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn find<Q>(&self, q: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.guard.enter();
        let hash = self.make_hash(q);
        self.index
            .find(hash, |&k| {
                self.entries
                    .get(k)
                    .map(|e| e.key.borrow() == q)
                    .unwrap_or(false)
            })
            .map(|&k| NodeId::new(k))
    }

    pub(crate) fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).is_some()
    }

    pub(crate) fn insert(&mut self, key: K, value: V) -> Result<NodeId, GraphError> {
        let _g = self.guard.enter();
        let hash = self.make_hash(&key);
        match self.index.entry(
            hash,
            |&kk| self.entries.get(kk).map(|e| e.key == key).unwrap_or(false),
            |&kk| self.entries.get(kk).map(|e| e.hash).unwrap_or(0),
        ) {
            hashbrown::hash_table::Entry::Occupied(_) => Err(GraphError::KeyAlreadyExists),
            hashbrown::hash_table::Entry::Vacant(v) => {
                let entry = Entry {
                    key,
                    node: Node::new(value),
                    hash,
                };
                let k = self.entries.insert(entry);
                let _ = v.insert(k);
                Ok(NodeId::new(k))
            }
        }
    }

    /// Single-probe lookup that inserts `make()` on a miss. Returns the node
    /// and whether it was created by this call.
    pub(crate) fn find_or_insert_with<F>(&mut self, key: K, make: F) -> (&mut Node<V, D>, bool)
    where
        F: FnOnce() -> V,
    {
        let (k, inserted) = {
            let _g = self.guard.enter();
            let hash = self.make_hash(&key);
            match self.index.entry(
                hash,
                |&kk| self.entries.get(kk).map(|e| e.key == key).unwrap_or(false),
                |&kk| self.entries.get(kk).map(|e| e.hash).unwrap_or(0),
            ) {
                hashbrown::hash_table::Entry::Occupied(o) => (*o.get(), false),
                hashbrown::hash_table::Entry::Vacant(v) => {
                    let entry = Entry {
                        key,
                        node: Node::new(make()),
                        hash,
                    };
                    let k = self.entries.insert(entry);
                    let _ = v.insert(k);
                    (k, true)
                }
            }
        };
        (&mut self.entries[k].node, inserted)
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> Option<(K, Node<V, D>)> {
        let _g = self.guard.enter();
        let k = id.raw();
        let entry = self.entries.remove(k)?;
        if let Ok(slot) = self.index.find_entry(entry.hash, |&kk| kk == k) {
            slot.remove();
        }
        Some((entry.key, entry.node))
    }

    /// True while `id` names a node that has not been removed.
    #[inline]
    pub(crate) fn is_live(&self, id: NodeId) -> bool {
        self.entries.contains_key(id.raw())
    }

    pub(crate) fn key(&self, id: NodeId) -> Option<&K> {
        self.entries.get(id.raw()).map(|e| &e.key)
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node<V, D>> {
        self.entries.get(id.raw()).map(|e| &e.node)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<V, D>> {
        self.entries.get_mut(id.raw()).map(|e| &mut e.node)
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V, D> {
        Iter {
            it: self.entries.iter(),
        }
    }
}
