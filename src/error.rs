use thiserror::Error;

/// Errors surfaced by tree store access.
///
/// A failed listing is always distinguishable from an empty directory:
/// an empty directory is `Ok(vec![])`, never an error, and an error never
/// yields a partial result.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The revision is unknown, the path is absent from the snapshot, or
    /// the path does not designate a directory where one is required.
    #[error("not found: {target}")]
    NotFound { target: String },

    /// The underlying store is unreachable or corrupt. Not retried within
    /// a single browse action.
    #[error("store I/O failure")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub(crate) fn not_found(revision: &str, path: Option<&str>) -> Self {
        StoreError::NotFound {
            target: match path {
                Some(p) => format!("{revision}:{p}"),
                None => format!("{revision}:/"),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
