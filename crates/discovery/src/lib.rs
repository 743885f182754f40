//! Enumerates task/rule/command/skill candidates across every agent's
//! directory conventions and every search root, and resolves the single
//! task a run targets.

pub mod candidates;
pub mod resolve;
pub mod root;
pub mod walk;

pub use candidates::{discover, Candidates};
pub use resolve::{resolve_task, ResolveError};
pub use root::{resolve_root, Root, SourceFetcher};
