//! Skill frontmatter validation: required `name`/`description` and their
//! length limits.

pub mod common;
pub mod skill;

pub use common::{Severity, ValidationIssue, ValidationResult};
pub use skill::validate_skill;
