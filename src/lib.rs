//! kgraph: a keyed graph where every node has exactly `k` labeled
//! connection slots, navigated by cursors that move along one slot at a
//! time.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a fixed-degree graph whose slot indices carry meaning (for
//!   example one per compass direction), built in small layers so each
//!   invariant lives in one place.
//! - Layers:
//!   - NodeMap<K, V, D, S>: owns every node in a generational arena and
//!     indexes it by key hash; hands out stable `NodeId`s. Includes a
//!     debug-only guard against reentrant access from `K: Eq/Hash`.
//!   - KGraph<K, V, D, S>: public container. Validates every request
//!     before mutating, wires slots between nodes, auto-vivifies on the
//!     mutable lookup.
//!   - Cursor / ConstCursor: copyable traversal handles that remember
//!     their graph and node; all access goes back through the graph.
//!
//! Constraints
//! - Degree is a const generic: every node of a `KGraph<_, _, D>` has a
//!   `[Option<NodeId>; D]` slot array.
//! - Keys are unique; duplicate inserts fail.
//! - Every failure is a `GraphError`; validation precedes mutation so an
//!   error never leaves a partial change behind.
//! - Single-threaded use; no interior synchronization.
//!
//! Removal and dangling slots
//! - Removing a node does not touch other nodes' slots. A slot still
//!   holding the removed node's `NodeId` dangles. Generational ids make a
//!   dangling slot harmless: it never resolves again, not even after the
//!   same key is reinserted. Traversal through it reports
//!   `IteratorReachedEnd`; `connect` treats it as free; `neighbor` reports
//!   `None`.
//!
//! Cursor identity
//! - Cursors compare equal when they stand on the same node of the same
//!   graph, or on the end of the same graph. Each graph (including each
//!   clone) gets a fresh identity; a cursor used with another graph fails
//!   with `WrongGraph`.
//! - `Cursor` converts into `ConstCursor`; there is no conversion back.
//!
//! Hasher invariants
//! - Each stored entry keeps its precomputed hash; `K: Hash` is never
//!   called after insertion.
//!
//! Logging
//! - Structural mutations emit `tracing` debug events; traversal misses
//!   emit trace events. No subscriber is installed here.

pub mod compass;
mod cursor;
mod error;
mod graph;
mod guard;
mod node;
mod node_map;
mod node_map_proptest;

// Public surface
pub use compass::{CompassGraph, Direction, ParseDirectionError};
pub use cursor::{ConstCursor, Cursor};
pub use error::GraphError;
pub use graph::{Iter, KGraph};
