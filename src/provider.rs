use crate::entry::TreeEntry;
use crate::error::StoreError;
use crate::store::{SnapshotGuard, TreeStore};

/// Fetches and sorts the immediate children of a directory via a
/// [`TreeStore`].
///
/// Every call opens its own scoped snapshot handle and releases it before
/// returning, whether the call succeeds or fails.
pub struct TreeChildProvider<'a> {
    store: &'a dyn TreeStore,
}

impl<'a> TreeChildProvider<'a> {
    pub fn new(store: &'a dyn TreeStore) -> Self {
        Self { store }
    }

    /// Immediate children of the directory at `path` (the root when `None`),
    /// sorted ascending by name. Deterministic across repeated calls against
    /// the same `(revision, path)`.
    ///
    /// # Errors
    ///
    /// `NotFound` when `path` is absent from the snapshot or does not
    /// designate a directory; `Io` for storage faults. An empty directory is
    /// `Ok(vec![])`, never an error.
    pub fn list_children(
        &self,
        revision: &str,
        path: Option<&str>,
    ) -> Result<Vec<TreeEntry>, StoreError> {
        let snapshot = SnapshotGuard::open(self.store, revision)?;

        if let Some(p) = path {
            let mode = snapshot.stat(p)?;
            if !mode.is_tree() {
                tracing::trace!("list_children: {revision}:{p} is not a directory");
                return Err(StoreError::not_found(revision, Some(p)));
            }
        }

        let parent = TreeEntry {
            revision: revision.to_string(),
            path: path.map(str::to_string),
            mode: crate::entry::EntryMode::Directory,
        };

        let mut children: Vec<TreeEntry> = snapshot
            .list(path)?
            .into_iter()
            .map(|(name, mode)| TreeEntry::new(revision, parent.child_path(&name), mode))
            .collect();
        children.sort();
        Ok(children)
    }
}
