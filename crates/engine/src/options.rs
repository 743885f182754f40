//! `EngineOptions`: the ambient configuration surface for one `Engine`.
//!
//! Resolved from, in increasing precedence: defaults, `~/.context-engine/config.toml`
//! (global), `./context-engine.toml` (project), `CONTEXT_ENGINE_*` environment
//! variables, then explicit overrides — mirroring the teacher's own
//! CLI > ENV > file config-file loader.

use crate::cancel::CancellationToken;
use context_engine_agents::AgentId;
use context_engine_discovery::Root;
use context_engine_expander::{ShellRunner, SystemShellRunner};
use context_engine_params::Params;
use context_engine_selector::Selectors;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolved options for one `Engine` instance.
pub struct EngineOptions {
    pub params: Params,
    pub selectors: Selectors,
    pub agent: AgentId,
    pub search_paths: Vec<Root>,
    pub resume: bool,
    pub bootstrap: bool,
    pub user_prompt: Option<String>,
    pub shell: Arc<dyn ShellRunner>,
    pub cancellation: CancellationToken,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            params: Params::new(),
            selectors: Selectors::new(),
            agent: AgentId::Generic,
            search_paths: vec![Root::Local(PathBuf::from("."))],
            resume: false,
            bootstrap: true,
            user_prompt: None,
            shell: Arc::new(SystemShellRunner),
            cancellation: CancellationToken::new(),
        }
    }
}

/// Explicit, caller-supplied overrides: the highest-precedence layer.
/// Fields left `None` fall through to env, then file, then default.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub search_paths: Option<Vec<String>>,
    pub agent: Option<String>,
    pub bootstrap: Option<bool>,
    pub resume: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct FileFields {
    search_paths: Option<Vec<String>>,
    agent: Option<String>,
    bootstrap: Option<bool>,
    resume: Option<bool>,
}

fn load_file(path: &Path) -> FileFields {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|raw| toml::from_str(&raw).ok())
        .unwrap_or_default()
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    match env_string(key)?.to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Classify a search-path string as a local directory or an opaque remote
/// source, by prefix: `file://`, `/`, `./`, `../`, or bare relative ⇒ local.
fn classify_root(raw: &str) -> Root {
    if let Some(local) = raw.strip_prefix("file://") {
        return Root::Local(PathBuf::from(local));
    }
    if raw.starts_with('/') || raw.starts_with("./") || raw.starts_with("../") || !raw.contains("://") {
        return Root::Local(PathBuf::from(raw));
    }
    Root::Remote(raw.to_string())
}

/// Resolve `EngineOptions` from the config-file/env/explicit layers.
/// `params`/`selectors`/`user_prompt`/`shell` have no config-file or env
/// representation; callers set them directly on the returned value.
pub fn resolve(explicit: Overrides) -> EngineOptions {
    let global = dirs::home_dir()
        .map(|home| home.join(".context-engine").join("config.toml"))
        .map(|path| load_file(&path))
        .unwrap_or_default();
    let project = load_file(Path::new("context-engine.toml"));

    let search_paths = explicit
        .search_paths
        .or_else(|| env_string("CONTEXT_ENGINE_SEARCH_PATHS").map(|v| v.split(',').map(str::to_string).collect()))
        .or(project.search_paths)
        .or(global.search_paths)
        .unwrap_or_else(|| vec![".".to_string()]);

    let agent_str = explicit
        .agent
        .or_else(|| env_string("CONTEXT_ENGINE_AGENT"))
        .or(project.agent)
        .or(global.agent)
        .unwrap_or_default();

    let bootstrap = explicit
        .bootstrap
        .or_else(|| env_bool("CONTEXT_ENGINE_BOOTSTRAP"))
        .or(project.bootstrap)
        .or(global.bootstrap)
        .unwrap_or(true);

    let resume = explicit
        .resume
        .or_else(|| env_bool("CONTEXT_ENGINE_RESUME"))
        .or(project.resume)
        .or(global.resume)
        .unwrap_or(false);

    let agent = AgentId::parse(&agent_str).unwrap_or(AgentId::Generic);

    EngineOptions {
        search_paths: search_paths.iter().map(|s| classify_root(s)).collect(),
        agent,
        bootstrap,
        resume,
        ..EngineOptions::default()
    }
}
