//! Loads a markdown file into typed frontmatter plus a verbatim body.
//!
//! Deserialization is YAML-based (`serde_yaml`); the raw frontmatter map is
//! also preserved per file so callers get passthrough access to keys the
//! typed struct doesn't model (`mcp_server`, custom selector sugar, etc).

pub mod frontmatter;
pub mod loader;

pub use frontmatter::{
    BaseFields, CommandFrontMatter, FrontMatter, RawValue, RuleFrontMatter, ScalarOrList,
    SkillFrontMatter, TaskFrontMatter,
};
pub use loader::{load, Markdown, MarkdownError, Result};
