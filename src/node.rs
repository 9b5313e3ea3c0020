//! Node: a value plus exactly `D` connection slots.

use slotmap::DefaultKey;

/// Stable, generational handle to a node inside one graph's storage.
///
/// A removed node's handle never resolves again, even if its storage is
/// reused by a later insert.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct NodeId(DefaultKey);

impl NodeId {
    pub(crate) fn new(k: DefaultKey) -> Self {
        NodeId(k)
    }
    pub(crate) fn raw(&self) -> DefaultKey {
        self.0
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<V, const D: usize> {
    pub(crate) value: V,
    slots: [Option<NodeId>; D],
}

impl<V, const D: usize> Node<V, D> {
    pub(crate) fn new(value: V) -> Self {
        Self {
            value,
            slots: [None; D],
        }
    }

    /// Raw slot content. May name a node that has since been removed.
    /// Callers check `index < D`.
    #[inline]
    pub(crate) fn slot(&self, index: usize) -> Option<NodeId> {
        self.slots[index]
    }

    #[inline]
    pub(crate) fn set_slot(&mut self, index: usize, target: NodeId) {
        self.slots[index] = Some(target);
    }

    pub(crate) fn links_to(&self, target: NodeId) -> bool {
        self.slots.iter().any(|s| *s == Some(target))
    }

    /// Empty every slot that references `target`; returns how many were cleared.
    pub(crate) fn unlink(&mut self, target: NodeId) -> usize {
        let mut cleared = 0;
        for s in self.slots.iter_mut() {
            if *s == Some(target) {
                *s = None;
                cleared += 1;
            }
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut sm: SlotMap<DefaultKey, ()> = SlotMap::with_key();
        (0..n).map(|_| NodeId::new(sm.insert(()))).collect()
    }

    /// Invariant: a fresh node has exactly `D` slots, all empty.
    #[test]
    fn new_node_has_all_slots_empty() {
        let n: Node<&str, 4> = Node::new("v");
        for i in 0..4 {
            assert_eq!(n.slot(i), None);
        }
        assert_eq!(n.value, "v");
    }

    /// Invariant: `unlink` clears every parallel slot to the same target and
    /// leaves slots to other targets alone.
    #[test]
    fn unlink_clears_parallel_slots_only() {
        let ids = ids(2);
        let (a, b) = (ids[0], ids[1]);
        let mut n: Node<(), 4> = Node::new(());
        n.set_slot(0, a);
        n.set_slot(2, a);
        n.set_slot(3, b);
        assert!(n.links_to(a));

        assert_eq!(n.unlink(a), 2);
        assert!(!n.links_to(a));
        assert_eq!(n.slot(3), Some(b));
        assert_eq!(n.unlink(a), 0);
    }
}
