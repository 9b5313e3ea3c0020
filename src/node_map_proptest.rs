#![cfg(test)]

// Property tests for NodeMap kept inside the crate so they can reach the
// private storage layer.

use crate::error::GraphError;
use crate::node::NodeId;
use crate::node_map::NodeMap;
use proptest::prelude::*;
use std::collections::hash_map::RandomState;
use std::collections::{BTreeSet, HashMap};
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations: indices shrink to earlier keys, the pool
// shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    FindOrInsert(usize, i32),
    Remove(usize),
    Find(usize),
    Link(usize, usize, usize),
    Iterate,
}

const DEGREE: usize = 3;

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=6).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::FindOrInsert(i, v)),
            idx.clone().prop_map(Op::Remove),
            idx.clone().prop_map(Op::Find),
            (idx.clone(), idx.clone(), 0..DEGREE).prop_map(|(a, b, s)| Op::Link(a, b, s)),
            Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// State-machine equivalence against std::collections::HashMap:
// - duplicate keys are rejected; a live key always finds its original id;
// - removed ids never resolve again and never equal a live id;
// - slots written through `node_mut` keep whatever id they were given,
//   and `is_live` decides whether that id still names a node;
// - `len` and iteration agree with the model after every step.
fn run<S: BuildHasher + Clone + Default>(
    mut sut: NodeMap<String, i32, DEGREE, S>,
    pool: Vec<String>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    let mut live: HashMap<String, NodeId> = HashMap::new();
    let mut stale: Vec<NodeId> = Vec::new();

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = pool[i].clone();
                let already = model.contains_key(&k);
                match sut.insert(k.clone(), v) {
                    Ok(id) => {
                        prop_assert!(!already, "insert must fail on duplicate");
                        prop_assert!(!stale.contains(&id), "fresh id must not reuse a stale one");
                        live.insert(k.clone(), id);
                        model.insert(k, v);
                    }
                    Err(e) => {
                        prop_assert_eq!(e, GraphError::KeyAlreadyExists);
                        prop_assert!(already);
                    }
                }
            }
            Op::FindOrInsert(i, v) => {
                let k = pool[i].clone();
                let already = model.contains_key(&k);
                let (node, inserted) = sut.find_or_insert_with(k.clone(), || v);
                prop_assert_eq!(inserted, !already);
                let expected = *model.entry(k.clone()).or_insert(v);
                prop_assert_eq!(node.value, expected);
                if inserted {
                    let id = sut.find(&k).expect("just inserted");
                    live.insert(k, id);
                }
            }
            Op::Remove(i) => {
                let k = &pool[i];
                if let Some(id) = live.remove(k) {
                    let (kk, node) = sut.remove(id).expect("live id removable");
                    prop_assert_eq!(&kk, k);
                    prop_assert_eq!(Some(node.value), model.remove(k));
                    stale.push(id);
                } else {
                    prop_assert!(sut.find(k.as_str()).is_none());
                }
            }
            Op::Find(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.find(k.as_str()), live.get(k).copied());
            }
            Op::Link(a, b, slot) => {
                if let (Some(&u), Some(&v)) = (live.get(&pool[a]), live.get(&pool[b])) {
                    sut.node_mut(u).expect("live").set_slot(slot, v);
                    prop_assert_eq!(sut.node(u).expect("live").slot(slot), Some(v));
                    prop_assert!(sut.is_live(v));
                }
            }
            Op::Iterate => {
                let s_keys: BTreeSet<_> = sut.iter().map(|(_, k, _)| k.clone()).collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        for &id in &stale {
            prop_assert!(!sut.is_live(id));
            prop_assert!(sut.key(id).is_none());
        }
        prop_assert_eq!(sut.len(), model.len());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(NodeMap::with_hasher(RandomState::new()), pool, ops)?;
    }

    // Same invariants when every key collides, stressing equality probing.
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run(NodeMap::with_hasher(ConstBuildHasher), pool, ops)?;
    }
}
