use std::collections::{HashMap, HashSet};

use crate::entry::TreeEntry;
use crate::error::StoreError;
use crate::provider::TreeChildProvider;
use crate::store::TreeStore;

/// Fallback bound on singleton-chain auto-descend. The chain is bounded by
/// the snapshot's actual directory depth, but that depth is repository
/// content and therefore externally influenced.
pub const DEFAULT_MAX_DESCEND_DEPTH: usize = 4096;

/// Per-node expansion state within one navigation session.
///
/// `Expanded` is sticky here: collapsing is a pure UI concern handled by the
/// embedding tree widget, not by this controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionState {
    Collapsed,
    Expanded,
}

/// Notified when the user picks a breadcrumb segment or tree node.
pub trait SelectionDispatcher {
    fn on_select(&mut self, entry: &TreeEntry);
}

/// Mediates between an expandable-tree consumer and [`TreeChildProvider`],
/// adding lazy fetching and singleton-chain auto-descend.
///
/// One controller is one navigation session, bound to one revision: its
/// expansion state and children cache start empty and are discarded with it.
pub struct LazyTreeController<'a> {
    provider: TreeChildProvider<'a>,
    revision: String,
    expanded: HashSet<Option<String>>,
    children_cache: HashMap<Option<String>, Vec<TreeEntry>>,
    max_descend_depth: usize,
    dispatcher: Option<Box<dyn SelectionDispatcher + 'a>>,
}

impl<'a> LazyTreeController<'a> {
    pub fn new(store: &'a dyn TreeStore, revision: impl Into<String>) -> Self {
        Self {
            provider: TreeChildProvider::new(store),
            revision: revision.into(),
            expanded: HashSet::new(),
            children_cache: HashMap::new(),
            max_descend_depth: DEFAULT_MAX_DESCEND_DEPTH,
            dispatcher: None,
        }
    }

    pub fn with_max_descend_depth(mut self, depth: usize) -> Self {
        self.max_descend_depth = depth;
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: Box<dyn SelectionDispatcher + 'a>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn revision(&self) -> &str {
        &self.revision
    }

    /// Top-level nodes of the tree view: children of `start_path`, or of the
    /// repository root when `None`.
    pub fn roots(&mut self, start_path: Option<&str>) -> Result<Vec<TreeEntry>, StoreError> {
        self.children_at(start_path)
    }

    /// Whether a node can be expanded. O(1), no I/O.
    pub fn has_children(&self, entry: &TreeEntry) -> bool {
        entry.is_tree()
    }

    /// Children of a directory node, fetched lazily and cached for the rest
    /// of the session.
    pub fn children(&mut self, entry: &TreeEntry) -> Result<Vec<TreeEntry>, StoreError> {
        self.children_at(entry.path.as_deref())
    }

    /// Expand a node, auto-descending through any run of directories that
    /// each contain exactly one child directory. The chain stops at the
    /// first node whose children are empty, more than one, or whose single
    /// child is a file; a single file child is never expanded.
    ///
    /// Expanding an already-expanded node is a no-op for state; cached
    /// children avoid a redundant fetch. Expanding a file is a no-op.
    pub fn expand(&mut self, entry: &TreeEntry) -> Result<(), StoreError> {
        if !entry.is_tree() {
            return Ok(());
        }

        // Iterative on purpose: chain length is repository content, so the
        // walk must not grow the stack with it.
        let mut path = entry.path.clone();
        let mut depth = 0;
        loop {
            self.expanded.insert(path.clone());
            let children = self.children_at(path.as_deref())?;

            match children.as_slice() {
                [only] if only.is_tree() => {
                    if depth >= self.max_descend_depth {
                        tracing::warn!(
                            "auto-descend stopped at depth {depth} below {:?}",
                            entry.path
                        );
                        return Ok(());
                    }
                    depth += 1;
                    tracing::trace!("auto-descend into {:?}", only.path);
                    path = only.path.clone();
                }
                _ => return Ok(()),
            }
        }
    }

    pub fn state(&self, entry: &TreeEntry) -> ExpansionState {
        if self.expanded.contains(&entry.path) {
            ExpansionState::Expanded
        } else {
            ExpansionState::Collapsed
        }
    }

    pub fn is_expanded(&self, entry: &TreeEntry) -> bool {
        self.state(entry) == ExpansionState::Expanded
    }

    /// Paths currently expanded, sorted, root (`None`) first. Mainly for
    /// consumers that rebuild a widget from scratch.
    pub fn expanded_paths(&self) -> Vec<Option<String>> {
        let mut paths: Vec<_> = self.expanded.iter().cloned().collect();
        paths.sort();
        paths
    }

    /// Forward a user selection to the injected dispatcher, if any.
    pub fn on_select(&mut self, entry: &TreeEntry) {
        if let Some(dispatcher) = &mut self.dispatcher {
            dispatcher.on_select(entry);
        }
    }

    fn children_at(&mut self, path: Option<&str>) -> Result<Vec<TreeEntry>, StoreError> {
        let key = path.map(str::to_string);
        if let Some(cached) = self.children_cache.get(&key) {
            tracing::trace!("children cache hit for {key:?}");
            return Ok(cached.clone());
        }

        let children = self.provider.list_children(&self.revision, path)?;
        self.children_cache.insert(key, children.clone());
        Ok(children)
    }
}
