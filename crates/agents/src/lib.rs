//! The closed set of agent identifiers, each with its own directory
//! conventions for rules/commands/skills/tasks. All paths are relative;
//! an absolute path anywhere in a caller-supplied override is a
//! configuration error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown agent `{given}`; valid options: {valid}")]
pub struct UnknownAgent {
    pub given: String,
    pub valid: String,
}

/// The closed set of recognized agent identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentId {
    /// `""`: the generic, cross-agent `.agents` convention.
    Generic,
    Cursor,
    Opencode,
    Copilot,
    Claude,
    Gemini,
    Augment,
    Windsurf,
    Codex,
}

impl AgentId {
    pub const ALL: [AgentId; 9] = [
        AgentId::Generic,
        AgentId::Cursor,
        AgentId::Opencode,
        AgentId::Copilot,
        AgentId::Claude,
        AgentId::Gemini,
        AgentId::Augment,
        AgentId::Windsurf,
        AgentId::Codex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentId::Generic => "",
            AgentId::Cursor => "cursor",
            AgentId::Opencode => "opencode",
            AgentId::Copilot => "copilot",
            AgentId::Claude => "claude",
            AgentId::Gemini => "gemini",
            AgentId::Augment => "augment",
            AgentId::Windsurf => "windsurf",
            AgentId::Codex => "codex",
        }
    }

    /// Parse an agent identifier, or `UnknownAgent` listing valid options.
    pub fn parse(value: &str) -> Result<Self, UnknownAgent> {
        AgentId::ALL
            .into_iter()
            .find(|agent| agent.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownAgent {
                given: value.to_string(),
                valid: AgentId::ALL
                    .iter()
                    .map(|a| if a.as_str().is_empty() { "(generic)" } else { a.as_str() })
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// This agent's directory conventions.
    pub fn paths(&self) -> AgentPaths {
        match self {
            AgentId::Generic => AgentPaths {
                rules_paths: vec![PathBuf::from(".agents/rules")],
                skills_path: Some(PathBuf::from(".agents/skills")),
                commands_path: Some(PathBuf::from(".agents/commands")),
                tasks_path: Some(PathBuf::from(".agents/tasks")),
            },
            AgentId::Cursor => AgentPaths {
                rules_paths: vec![PathBuf::from(".cursor/rules")],
                skills_path: None,
                commands_path: None,
                tasks_path: None,
            },
            AgentId::Opencode => AgentPaths {
                rules_paths: vec![PathBuf::from(".opencode/rules")],
                skills_path: Some(PathBuf::from(".opencode/skills")),
                commands_path: Some(PathBuf::from(".opencode/commands")),
                tasks_path: None,
            },
            AgentId::Copilot => AgentPaths {
                rules_paths: vec![
                    PathBuf::from(".github/copilot-instructions"),
                    PathBuf::from(".github/agents"),
                ],
                skills_path: None,
                commands_path: Some(PathBuf::from(".github/prompts")),
                tasks_path: None,
            },
            AgentId::Claude => AgentPaths {
                rules_paths: vec![PathBuf::from(".claude/rules")],
                skills_path: Some(PathBuf::from(".claude/skills")),
                commands_path: Some(PathBuf::from(".claude/commands")),
                tasks_path: None,
            },
            AgentId::Gemini => AgentPaths {
                rules_paths: vec![PathBuf::from(".gemini/rules")],
                skills_path: None,
                commands_path: Some(PathBuf::from(".gemini/commands")),
                tasks_path: None,
            },
            AgentId::Augment => AgentPaths {
                rules_paths: vec![PathBuf::from(".augment/rules")],
                skills_path: None,
                commands_path: None,
                tasks_path: None,
            },
            AgentId::Windsurf => AgentPaths {
                rules_paths: vec![PathBuf::from(".windsurf/rules")],
                skills_path: None,
                commands_path: Some(PathBuf::from(".windsurf/workflows")),
                tasks_path: None,
            },
            AgentId::Codex => AgentPaths {
                rules_paths: vec![PathBuf::from(".codex/rules")],
                skills_path: Some(PathBuf::from(".codex/skills")),
                commands_path: Some(PathBuf::from(".codex/commands")),
                tasks_path: None,
            },
        }
    }
}

/// Per-agent relative directory conventions.
#[derive(Debug, Clone, Default)]
pub struct AgentPaths {
    pub rules_paths: Vec<PathBuf>,
    pub skills_path: Option<PathBuf>,
    pub commands_path: Option<PathBuf>,
    pub tasks_path: Option<PathBuf>,
}
