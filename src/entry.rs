use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Raw mode bits, matching the storage layer's on-disk encoding.
const RAW_DIRECTORY: u32 = 0o040000;
const RAW_FILE: u32 = 0o100644;
const RAW_EXECUTABLE: u32 = 0o100755;
const RAW_SYMLINK: u32 = 0o120000;
const RAW_SUBMODULE: u32 = 0o160000;

/// Kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryMode {
    Directory,
    File,
    Executable,
    Symlink,
    Submodule,
}

impl EntryMode {
    /// Decode from raw mode bits. Returns `None` for bits the store
    /// does not produce; callers treat that as corrupt input.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            RAW_DIRECTORY => Some(EntryMode::Directory),
            RAW_FILE => Some(EntryMode::File),
            RAW_EXECUTABLE => Some(EntryMode::Executable),
            RAW_SYMLINK => Some(EntryMode::Symlink),
            RAW_SUBMODULE => Some(EntryMode::Submodule),
            _ => None,
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            EntryMode::Directory => RAW_DIRECTORY,
            EntryMode::File => RAW_FILE,
            EntryMode::Executable => RAW_EXECUTABLE,
            EntryMode::Symlink => RAW_SYMLINK,
            EntryMode::Submodule => RAW_SUBMODULE,
        }
    }

    pub fn is_tree(self) -> bool {
        self == EntryMode::Directory
    }
}

/// Identifies a node (directory or file) in a specific revision's hierarchy.
///
/// `path = None` is the repository root, which is always a directory. A
/// non-root path is its parent's path plus exactly one `/`-separated
/// segment. Entries are compared by path alone: two entries with the same
/// path are the same node regardless of mode, and ordering is plain
/// lexicographic string order (root first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    pub revision: String,
    pub path: Option<String>,
    pub mode: EntryMode,
}

impl TreeEntry {
    pub fn new(revision: impl Into<String>, path: impl Into<String>, mode: EntryMode) -> Self {
        Self {
            revision: revision.into(),
            path: Some(path.into()),
            mode,
        }
    }

    /// The root entry of a revision: no path, directory mode.
    pub fn root(revision: impl Into<String>) -> Self {
        Self {
            revision: revision.into(),
            path: None,
            mode: EntryMode::Directory,
        }
    }

    pub fn is_tree(&self) -> bool {
        self.mode.is_tree()
    }

    /// The entry's display name: the last path segment, or `None` at root.
    pub fn name(&self) -> Option<&str> {
        self.path
            .as_deref()
            .map(|p| p.rsplit('/').next().unwrap_or(p))
    }

    /// Path of a direct child of this entry.
    pub fn child_path(&self, segment: &str) -> String {
        match self.path.as_deref() {
            Some(parent) => format!("{parent}/{segment}"),
            None => segment.to_string(),
        }
    }

    /// The `(revision, path)` pair a caller needs to build a link or a
    /// selection callback for this entry.
    pub fn link_target(&self) -> LinkTarget<'_> {
        LinkTarget {
            revision: &self.revision,
            path: self.path.as_deref(),
        }
    }
}

impl PartialEq for TreeEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for TreeEntry {}

impl PartialOrd for TreeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TreeEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl std::hash::Hash for TreeEntry {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}:{}", self.revision, path),
            None => write!(f, "{}:/", self.revision),
        }
    }
}

/// Navigable target derived from a [`TreeEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTarget<'a> {
    pub revision: &'a str,
    pub path: Option<&'a str>,
}

/// Split a path on `/`, discarding empty segments. Repeated separators and
/// leading/trailing slashes collapse, so `"a//b/"` yields `["a", "b"]`.
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
