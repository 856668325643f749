use crate::config::NavigatorConfig;
use crate::controller::LazyTreeController;
use crate::entry::TreeEntry;
use crate::resolver::{resolve_trail, BreadcrumbTrail};
use crate::store::TreeStore;

/// Optional host hook: the navigator shows a rename input when one is wired.
pub trait RenameHook {
    fn on_rename(&mut self, entry: &TreeEntry, new_name: &str);
}

/// Optional host hook: invoked when the user asks for a new file under the
/// current directory.
pub trait NewFileHook {
    fn on_new_file(&mut self, parent: &TreeEntry);
}

/// External authorization check gating the "add file" affordance. The
/// navigator treats the answer as an opaque boolean.
pub trait ModifyGate {
    fn can_modify(&self, revision: &str, path: Option<&str>) -> bool;
}

/// What the caller should render after the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastSegment {
    /// A rename hook is wired: an editable name input, pre-filled with the
    /// file name, empty for a directory target.
    NameEdit { initial: String },
    /// Directory target without a rename hook: an "add new file" affordance,
    /// visible only when the target is on a branch and the gate allows
    /// modifying the directory.
    AddFile { visible: bool },
    /// File target without a rename hook: the plain leaf label.
    LeafLabel { name: String },
}

/// Facade over trail resolution and lazy tree expansion for one navigation
/// target, wiring in the optional host hooks.
pub struct FileNavigator<'a> {
    target: TreeEntry,
    repo_name: String,
    on_branch: bool,
    controller: LazyTreeController<'a>,
    rename_hook: Option<Box<dyn RenameHook + 'a>>,
    new_file_hook: Option<Box<dyn NewFileHook + 'a>>,
    modify_gate: Option<Box<dyn ModifyGate + 'a>>,
}

impl<'a> FileNavigator<'a> {
    pub fn new(store: &'a dyn TreeStore, target: TreeEntry, config: &NavigatorConfig) -> Self {
        let controller = LazyTreeController::new(store, target.revision.clone())
            .with_max_descend_depth(config.max_auto_descend_depth);
        Self {
            target,
            repo_name: config.repo_name.clone(),
            on_branch: false,
            controller,
            rename_hook: None,
            new_file_hook: None,
            modify_gate: None,
        }
    }

    /// Mark the target revision as a branch head (as opposed to a tag or a
    /// detached commit). Only branch targets can show the add-file
    /// affordance.
    pub fn on_branch(mut self, on_branch: bool) -> Self {
        self.on_branch = on_branch;
        self
    }

    pub fn with_rename_hook(mut self, hook: Box<dyn RenameHook + 'a>) -> Self {
        self.rename_hook = Some(hook);
        self
    }

    pub fn with_new_file_hook(mut self, hook: Box<dyn NewFileHook + 'a>) -> Self {
        self.new_file_hook = Some(hook);
        self
    }

    pub fn with_modify_gate(mut self, gate: Box<dyn ModifyGate + 'a>) -> Self {
        self.modify_gate = Some(gate);
        self
    }

    pub fn target(&self) -> &TreeEntry {
        &self.target
    }

    /// Breadcrumb trail for the current target.
    pub fn trail(&self) -> BreadcrumbTrail {
        resolve_trail(&self.target)
    }

    /// Display label for a trail or tree entry: its last path segment, or
    /// the repository name at root.
    pub fn label<'e>(&'e self, entry: &'e TreeEntry) -> &'e str {
        entry.name().unwrap_or(self.repo_name.as_str())
    }

    /// The trailing segment after the breadcrumb links, per the original
    /// navigator's rules: a name editor when a rename hook is present, an
    /// add-file affordance for directories, the leaf label otherwise.
    pub fn last_segment(&self) -> LastSegment {
        if self.rename_hook.is_some() {
            let initial = if self.target.is_tree() {
                String::new()
            } else {
                self.target.name().unwrap_or_default().to_string()
            };
            return LastSegment::NameEdit { initial };
        }

        if self.target.is_tree() {
            LastSegment::AddFile {
                visible: self.on_branch && self.can_modify_target(),
            }
        } else {
            LastSegment::LeafLabel {
                name: self.target.name().unwrap_or_default().to_string(),
            }
        }
    }

    pub fn has_rename_hook(&self) -> bool {
        self.rename_hook.is_some()
    }

    pub fn has_new_file_hook(&self) -> bool {
        self.new_file_hook.is_some()
    }

    /// The lazy tree behind the breadcrumb dropdowns.
    pub fn controller(&self) -> &LazyTreeController<'a> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut LazyTreeController<'a> {
        &mut self.controller
    }

    /// Forward a breadcrumb or tree-node pick to the selection dispatcher.
    pub fn select(&mut self, entry: &TreeEntry) {
        self.controller.on_select(entry);
    }

    /// Notify the rename hook of an edited name. No-op when none is wired.
    pub fn request_rename(&mut self, new_name: &str) {
        let target = self.target.clone();
        if let Some(hook) = &mut self.rename_hook {
            hook.on_rename(&target, new_name);
        }
    }

    /// Ask the host to create a file under the target directory. No-op when
    /// no hook is wired.
    pub fn request_new_file(&mut self) {
        let target = self.target.clone();
        if let Some(hook) = &mut self.new_file_hook {
            hook.on_new_file(&target);
        }
    }

    fn can_modify_target(&self) -> bool {
        let Some(gate) = &self.modify_gate else {
            return false;
        };
        // Directories are checked with a trailing separator so the gate can
        // distinguish "inside this directory" from the entry itself.
        let path = self
            .target
            .path
            .as_deref()
            .filter(|_| self.target.is_tree())
            .map(|p| format!("{p}/"));
        gate.can_modify(&self.target.revision, path.as_deref())
    }
}
