use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entry::{split_segments, EntryMode};
use crate::error::StoreError;
use crate::store::{TreeSnapshot, TreeStore};

/// An in-memory `TreeStore`, used by the CLI demo and the tests.
///
/// Each revision is a flat map from normalized path to mode; inserting an
/// entry creates its ancestor directories. Revisions are immutable once
/// browsed: the store hands out read-only snapshots.
#[derive(Debug, Default)]
pub struct MemoryTreeStore {
    revisions: HashMap<String, BTreeMap<String, EntryMode>>,
}

/// One line of a snapshot manifest.
#[derive(Debug, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: String,
    pub mode: EntryMode,
}

impl MemoryTreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry into a revision, creating ancestor directories.
    /// Separators in `path` are normalized (`a//b/` becomes `a/b`).
    pub fn insert(&mut self, revision: &str, path: &str, mode: EntryMode) {
        let tree = self.revisions.entry(revision.to_string()).or_default();
        let segments = split_segments(path);
        let mut cumulative = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if !cumulative.is_empty() {
                cumulative.push('/');
            }
            cumulative.push_str(segment);
            let entry_mode = if i == segments.len() - 1 {
                mode
            } else {
                EntryMode::Directory
            };
            tree.insert(cumulative.clone(), entry_mode);
        }
    }

    /// Build a store from a JSON manifest mapping revisions to entry lists.
    pub fn from_manifest_str(json: &str) -> Result<Self, serde_json::Error> {
        let manifest: HashMap<String, Vec<ManifestEntry>> = serde_json::from_str(json)?;
        let mut store = Self::new();
        for (revision, entries) in manifest {
            // An empty list still registers the revision.
            store.revisions.entry(revision.clone()).or_default();
            for entry in entries {
                store.insert(&revision, &entry.path, entry.mode);
            }
        }
        Ok(store)
    }

    /// Load a manifest file from disk.
    pub fn load_manifest(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_manifest_str(&json)
            .map_err(|e| StoreError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}

impl TreeStore for MemoryTreeStore {
    fn open(&self, revision: &str) -> Result<Box<dyn TreeSnapshot + '_>, StoreError> {
        let entries = self
            .revisions
            .get(revision)
            .ok_or_else(|| StoreError::not_found(revision, None))?;
        Ok(Box::new(MemorySnapshot {
            revision: revision.to_string(),
            entries,
        }))
    }
}

struct MemorySnapshot<'a> {
    revision: String,
    entries: &'a BTreeMap<String, EntryMode>,
}

impl MemorySnapshot<'_> {
    fn normalize(path: &str) -> String {
        split_segments(path).join("/")
    }
}

impl TreeSnapshot for MemorySnapshot<'_> {
    fn stat(&self, path: &str) -> Result<EntryMode, StoreError> {
        let normalized = Self::normalize(path);
        if normalized.is_empty() {
            return Ok(EntryMode::Directory);
        }
        self.entries
            .get(&normalized)
            .copied()
            .ok_or_else(|| StoreError::not_found(&self.revision, Some(path)))
    }

    fn list(&self, path: Option<&str>) -> Result<Vec<(String, EntryMode)>, StoreError> {
        let prefix = match path {
            Some(p) => {
                let normalized = Self::normalize(p);
                if normalized.is_empty() {
                    String::new()
                } else {
                    match self.entries.get(&normalized) {
                        Some(mode) if mode.is_tree() => format!("{normalized}/"),
                        // Absent, or present but not a directory.
                        _ => return Err(StoreError::not_found(&self.revision, Some(p))),
                    }
                }
            }
            None => String::new(),
        };

        let children = self
            .entries
            .range(prefix.clone()..)
            .take_while(|(p, _)| p.starts_with(&prefix))
            .filter(|(p, _)| !p[prefix.len()..].contains('/'))
            .map(|(p, mode)| (p[prefix.len()..].to_string(), *mode))
            .collect();
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> MemoryTreeStore {
        let mut store = MemoryTreeStore::new();
        store.insert("main", "src/app/main.rs", EntryMode::File);
        store.insert("main", "src/app/run.sh", EntryMode::Executable);
        store.insert("main", "README.md", EntryMode::File);
        store.insert("main", "docs", EntryMode::Directory);
        store
    }

    #[test]
    fn test_insert_creates_parents() {
        let store = sample_store();
        let snap = store.open("main").unwrap();
        assert_eq!(snap.stat("src").unwrap(), EntryMode::Directory);
        assert_eq!(snap.stat("src/app").unwrap(), EntryMode::Directory);
        assert_eq!(snap.stat("src/app/main.rs").unwrap(), EntryMode::File);
    }

    #[test]
    fn test_unknown_revision() {
        let store = sample_store();
        assert!(store.open("gone").is_err());
    }

    #[test]
    fn test_list_root() {
        let store = sample_store();
        let snap = store.open("main").unwrap();
        let names: Vec<String> = snap.list(None).unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["README.md", "docs", "src"]);
    }

    #[test]
    fn test_list_subtree_is_immediate_only() {
        let store = sample_store();
        let snap = store.open("main").unwrap();
        let children = snap.list(Some("src")).unwrap();
        assert_eq!(children, vec![("app".to_string(), EntryMode::Directory)]);
    }

    #[test]
    fn test_list_missing_or_file_path() {
        let store = sample_store();
        let snap = store.open("main").unwrap();
        assert!(snap.list(Some("missing/path")).unwrap_err().is_not_found());
        assert!(snap.list(Some("README.md")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_empty_directory_is_ok_not_error() {
        let store = sample_store();
        let snap = store.open("main").unwrap();
        assert_eq!(snap.list(Some("docs")).unwrap(), vec![]);
    }

    #[test]
    fn test_manifest_round_trip() {
        let json = r#"{
            "main": [
                {"path": "a/b/c.txt", "mode": "file"},
                {"path": "a/tool", "mode": "executable"},
                {"path": "link", "mode": "symlink"}
            ],
            "empty": []
        }"#;
        let store = MemoryTreeStore::from_manifest_str(json).unwrap();
        let snap = store.open("main").unwrap();
        assert_eq!(snap.stat("a/b").unwrap(), EntryMode::Directory);
        assert_eq!(snap.stat("link").unwrap(), EntryMode::Symlink);

        let empty = store.open("empty").unwrap();
        assert_eq!(empty.list(None).unwrap(), vec![]);
    }

    #[test]
    fn test_load_manifest_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, r#"{"main": [{"path": "x", "mode": "file"}]}"#).unwrap();

        let store = MemoryTreeStore::load_manifest(&path).unwrap();
        let snap = store.open("main").unwrap();
        assert_eq!(snap.stat("x").unwrap(), EntryMode::File);
    }

    #[test]
    fn test_load_manifest_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            MemoryTreeStore::load_manifest(&path),
            Err(StoreError::Io(_))
        ));
    }
}
