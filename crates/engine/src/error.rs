//! The composed engine error, gathering every leaf crate's taxonomy via
//! `#[from]`, plus the orchestrator's own pipeline-fatal variants.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Markdown(#[from] context_engine_markdown::MarkdownError),
    #[error(transparent)]
    Params(#[from] context_engine_params::ParamsError),
    #[error(transparent)]
    Task(#[from] context_engine_task::TaskError),
    #[error(transparent)]
    UnknownAgent(#[from] context_engine_agents::UnknownAgent),
    #[error(transparent)]
    Resolve(#[from] context_engine_discovery::ResolveError),
    #[error(transparent)]
    Bootstrap(#[from] context_engine_bootstrap::BootstrapError),

    #[error("command `{0}` not found")]
    CommandNotFound(String),

    #[error("skill at {path} is invalid: {reason}")]
    SkillInvalid { path: PathBuf, reason: String },

    #[error("run cancelled")]
    Cancelled,
}
