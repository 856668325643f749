// Tree store abstraction.
//
// A `TreeStore` resolves a revision identifier to one immutable snapshot of
// the hierarchy. All reads go through a scoped handle (`SnapshotGuard`) that
// is released before the calling fetch returns, on every exit path.

pub mod memory;

use crate::entry::EntryMode;
use crate::error::StoreError;

pub use memory::MemoryTreeStore;

/// Revision-addressed store of immutable tree snapshots.
pub trait TreeStore {
    /// Resolve `revision` to a snapshot, acquiring a read handle on the
    /// underlying storage.
    ///
    /// # Errors
    ///
    /// `NotFound` when the revision is unknown, `Io` for storage faults.
    fn open(&self, revision: &str) -> Result<Box<dyn TreeSnapshot + '_>, StoreError>;
}

/// One revision's fixed, queryable tree.
///
/// The boxed snapshot is the scoped read handle; dropping it releases the
/// handle. Implementations must not cache state across snapshots.
pub trait TreeSnapshot {
    /// Mode of the entry at `path`.
    fn stat(&self, path: &str) -> Result<EntryMode, StoreError>;

    /// Immediate (non-recursive) entries of the directory at `path`, or of
    /// the root when `path` is `None`, as unordered `(name, mode)` pairs.
    fn list(&self, path: Option<&str>) -> Result<Vec<(String, EntryMode)>, StoreError>;

    /// Release the read handle. Called once by [`SnapshotGuard`] on drop.
    fn close(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// RAII wrapper releasing a snapshot's read handle when dropped.
///
/// Close failures are logged and suppressed so they never mask an earlier,
/// more specific error from the fetch itself.
pub struct SnapshotGuard<'a> {
    snapshot: Box<dyn TreeSnapshot + 'a>,
}

impl<'a> SnapshotGuard<'a> {
    pub fn open(store: &'a dyn TreeStore, revision: &str) -> Result<Self, StoreError> {
        let snapshot = store.open(revision)?;
        Ok(Self { snapshot })
    }
}

impl<'a> std::ops::Deref for SnapshotGuard<'a> {
    type Target = dyn TreeSnapshot + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.snapshot
    }
}

impl Drop for SnapshotGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.snapshot.close() {
            tracing::warn!("failed to release snapshot handle: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct ClosingSnapshot {
        closed: Rc<Cell<u32>>,
        fail_close: bool,
    }

    impl TreeSnapshot for ClosingSnapshot {
        fn stat(&self, path: &str) -> Result<EntryMode, StoreError> {
            Err(StoreError::not_found("test", Some(path)))
        }

        fn list(&self, _path: Option<&str>) -> Result<Vec<(String, EntryMode)>, StoreError> {
            Ok(vec![])
        }

        fn close(&mut self) -> std::io::Result<()> {
            self.closed.set(self.closed.get() + 1);
            if self.fail_close {
                Err(std::io::Error::other("release failed"))
            } else {
                Ok(())
            }
        }
    }

    struct ClosingStore {
        closed: Rc<Cell<u32>>,
        fail_close: bool,
    }

    impl TreeStore for ClosingStore {
        fn open(&self, _revision: &str) -> Result<Box<dyn TreeSnapshot + '_>, StoreError> {
            Ok(Box::new(ClosingSnapshot {
                closed: Rc::clone(&self.closed),
                fail_close: self.fail_close,
            }))
        }
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let closed = Rc::new(Cell::new(0));
        let store = ClosingStore {
            closed: Rc::clone(&closed),
            fail_close: false,
        };

        {
            let guard = SnapshotGuard::open(&store, "main").unwrap();
            assert!(guard.list(None).unwrap().is_empty());
            assert_eq!(closed.get(), 0);
        }
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_guard_releases_on_error_path() {
        let closed = Rc::new(Cell::new(0));
        let store = ClosingStore {
            closed: Rc::clone(&closed),
            fail_close: false,
        };

        let result = (|| -> Result<EntryMode, StoreError> {
            let guard = SnapshotGuard::open(&store, "main")?;
            guard.stat("nope")
        })();
        assert!(result.is_err());
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_close_failure_is_suppressed() {
        let closed = Rc::new(Cell::new(0));
        let store = ClosingStore {
            closed: Rc::clone(&closed),
            fail_close: true,
        };

        // Dropping the guard must not panic even when close fails.
        let guard = SnapshotGuard::open(&store, "main").unwrap();
        drop(guard);
        assert_eq!(closed.get(), 1);
    }
}
