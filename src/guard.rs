//! Debug-only exclusive-access guard for the node storage.
//!
//! The storage layer calls into user code (`K: Eq + Hash`) while probing
//! its index. If that user code reaches back into the same storage, the
//! index may be observed half-updated. In debug builds, opening a second
//! section while one is live panics. In release builds this is a no-op.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-instance tracker. Guard each storage entry-point with
/// `let _g = self.guard.enter();`.
#[derive(Debug)]
pub(crate) struct AccessGuard {
    #[cfg(debug_assertions)]
    depth: Cell<u32>,
    // Cell alone already makes this !Sync; the marker keeps release
    // builds consistent with debug ones.
    _nosync: PhantomData<Cell<()>>,
}

impl AccessGuard {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            depth: Cell::new(0),
            _nosync: PhantomData,
        }
    }

    /// Open a guarded section. Panics in debug builds when one is already open.
    #[inline]
    pub(crate) fn enter(&self) -> Section<'_> {
        #[cfg(debug_assertions)]
        {
            let d = self.depth.get();
            assert!(d == 0, "nested access into graph storage during key comparison");
            self.depth.set(d + 1);
            Section { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            Section { _z: PhantomData }
        }
    }
}

impl Default for AccessGuard {
    fn default() -> Self {
        Self::new()
    }
}

// A copied storage starts with no open sections.
impl Clone for AccessGuard {
    fn clone(&self) -> Self {
        Self::new()
    }
}

/// RAII section returned by [`AccessGuard::enter`].
pub(crate) struct Section<'a> {
    #[cfg(debug_assertions)]
    owner: &'a AccessGuard,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for Section<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            let d = self.owner.depth.get();
            debug_assert!(d > 0);
            self.owner.depth.set(d - 1);
        }
    }
}
