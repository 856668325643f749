// Navigation core - exposes all modules for testing

pub mod config;
pub mod controller;
pub mod entry;
pub mod error;
pub mod navigator;
pub mod provider;
pub mod resolver;
pub mod store;

pub use config::NavigatorConfig;
pub use controller::{ExpansionState, LazyTreeController, SelectionDispatcher};
pub use entry::{EntryMode, LinkTarget, TreeEntry};
pub use error::StoreError;
pub use navigator::{FileNavigator, LastSegment, ModifyGate, NewFileHook, RenameHook};
pub use provider::TreeChildProvider;
pub use resolver::{resolve_trail, BreadcrumbTrail};
pub use store::{MemoryTreeStore, SnapshotGuard, TreeSnapshot, TreeStore};
