use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use revnav::{
    EntryMode, FileNavigator, LastSegment, MemoryTreeStore, NavigatorConfig, SnapshotGuard,
    TreeEntry, TreeStore,
};

/// Browse a revision-addressed tree snapshot from the command line.
#[derive(Debug, Parser)]
#[command(name = "revnav", version)]
struct Args {
    /// JSON manifest mapping revisions to entry lists
    manifest: PathBuf,

    /// Revision to browse (branch, tag, or commit identifier)
    #[arg(long, default_value = "main")]
    revision: String,

    /// Target path inside the revision; omit for the repository root
    #[arg(long)]
    path: Option<String>,

    /// Expand the target directory, auto-descending singleton chains
    #[arg(long)]
    expand: bool,

    /// Navigator config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => NavigatorConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => NavigatorConfig::default(),
    };

    let store = MemoryTreeStore::load_manifest(&args.manifest)
        .with_context(|| format!("loading manifest from {}", args.manifest.display()))?;

    let target = resolve_target(&store, &args.revision, args.path.as_deref())?;
    let mut navigator = FileNavigator::new(&store, target.clone(), &config);

    print_trail(&navigator);

    if args.expand {
        navigator
            .controller_mut()
            .expand(&target)
            .context("expanding target")?;
        print_tree(&mut navigator, &target)?;
    }

    Ok(())
}

/// Stat the target so the navigator knows whether it is a file or a
/// directory. The snapshot handle is released before navigation begins.
fn resolve_target(
    store: &MemoryTreeStore,
    revision: &str,
    path: Option<&str>,
) -> Result<TreeEntry> {
    let mode = {
        let snapshot = SnapshotGuard::open(store as &dyn TreeStore, revision)?;
        match path {
            Some(p) => snapshot.stat(p)?,
            None => EntryMode::Directory,
        }
    };
    Ok(match path {
        Some(p) => TreeEntry::new(revision, p, mode),
        None => TreeEntry::root(revision),
    })
}

fn print_trail(navigator: &FileNavigator) {
    let trail = navigator.trail();

    let mut segments: Vec<String> = Vec::new();
    for entry in trail.entries() {
        let label = navigator.label(entry);
        if trail.current() == Some(entry) {
            segments.push(format!("[{label}]"));
        } else {
            segments.push(label.to_string());
        }
    }
    match navigator.last_segment() {
        LastSegment::LeafLabel { name } => segments.push(name),
        LastSegment::NameEdit { initial } => segments.push(format!("<edit:{initial}>")),
        LastSegment::AddFile { visible } => {
            if visible {
                segments.push("<add file>".to_string());
            }
        }
    }

    println!("{}: {}", navigator.target().revision, segments.join(" / "));
}

/// Print the expanded subtree below the target, descending only into nodes
/// the controller actually expanded.
fn print_tree(navigator: &mut FileNavigator, target: &TreeEntry) -> Result<()> {
    if !target.is_tree() {
        return Ok(());
    }

    // Depth-first over expanded nodes, children pre-sorted by the provider.
    let mut stack: Vec<(TreeEntry, usize)> = Vec::new();
    let roots = navigator.controller_mut().roots(target.path.as_deref())?;
    for entry in roots.into_iter().rev() {
        stack.push((entry, 0));
    }

    while let Some((entry, depth)) = stack.pop() {
        let controller = navigator.controller_mut();
        let marker = if !controller.has_children(&entry) {
            "  "
        } else if controller.is_expanded(&entry) {
            "▼ "
        } else {
            "▶ "
        };
        println!(
            "{}{marker}{}",
            "  ".repeat(depth),
            entry.name().unwrap_or_default()
        );

        if controller.is_expanded(&entry) {
            let children = controller.children(&entry)?;
            for child in children.into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }
    Ok(())
}
