use crate::entry::{split_segments, EntryMode, TreeEntry};

/// Ordered ancestor chain from the root to a target's containing directory.
///
/// When the target is a file the trail holds only its ancestor directories
/// and the file name is carried separately as `leaf_name`; the file is a
/// terminal label, not a navigable trail step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbTrail {
    entries: Vec<TreeEntry>,
    leaf_name: Option<String>,
}

impl BreadcrumbTrail {
    /// Root-first trail entries; every entry has directory mode.
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// The file name when the target was a file.
    pub fn leaf_name(&self) -> Option<&str> {
        self.leaf_name.as_deref()
    }

    /// The currently-open directory: the last trail entry when the target
    /// was a directory. Callers render this one as non-navigable.
    pub fn current(&self) -> Option<&TreeEntry> {
        if self.leaf_name.is_none() {
            self.entries.last()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Convert a target into its breadcrumb trail.
///
/// Pure path arithmetic: splits the target path into non-empty segments and
/// emits one directory entry per cumulative prefix, starting at the root.
/// The final segment is skipped when the target is not a directory. Does not
/// touch the store and does not validate existence.
pub fn resolve_trail(target: &TreeEntry) -> BreadcrumbTrail {
    let mut entries = vec![TreeEntry::root(&target.revision)];

    let mut leaf_name = None;
    if let Some(path) = target.path.as_deref() {
        let segments = split_segments(path);
        for (i, segment) in segments.iter().enumerate() {
            if i + 1 == segments.len() && !target.is_tree() {
                leaf_name = Some(segment.to_string());
                break;
            }
            let parent = entries.last().expect("trail starts with the root entry");
            let cumulative = parent.child_path(segment);
            entries.push(TreeEntry::new(
                &target.revision,
                cumulative,
                EntryMode::Directory,
            ));
        }
    }

    BreadcrumbTrail { entries, leaf_name }
}
