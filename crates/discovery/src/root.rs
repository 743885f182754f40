//! Search roots and the pluggable remote-source collaborator.

use std::path::PathBuf;

/// A search root as the caller supplied it: already a local directory, or an
/// opaque source a `SourceFetcher` must materialize first.
#[derive(Debug, Clone)]
pub enum Root {
    Local(PathBuf),
    Remote(String),
}

/// Materializes a remote search root (`file://`, or any opaque URI) into a
/// local directory. No implementation ships in this crate; callers plug in
/// their own, e.g. backed by a git clone or an archive download.
pub trait SourceFetcher: Send + Sync {
    fn materialize(&self, source: &str) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>>;
}

/// Resolve `root` to a local directory, or `None` if it should be skipped
/// silently: a local root that doesn't exist, or a remote root with no
/// fetcher supplied (or whose fetcher failed).
pub fn resolve_root(root: &Root, fetcher: Option<&dyn SourceFetcher>) -> Option<PathBuf> {
    match root {
        Root::Local(path) => {
            if path.is_dir() {
                Some(path.clone())
            } else {
                tracing::debug!(path = %path.display(), "search root does not exist; skipped");
                None
            }
        }
        Root::Remote(source) => {
            let Some(fetcher) = fetcher else {
                tracing::warn!(source = %source, "remote search root given but no SourceFetcher supplied; skipped");
                return None;
            };
            match fetcher.materialize(source) {
                Ok(path) => Some(path),
                Err(error) => {
                    tracing::warn!(source = %source, %error, "failed to materialize remote search root; skipped");
                    None
                }
            }
        }
    }
}
