//! `SKILL.md` frontmatter validation: required `name`/`description`, within
//! their length limits.

use crate::common::{ValidationIssue, ValidationResult};
use context_engine_markdown::SkillFrontMatter;
use std::path::Path;

const MAX_NAME_LEN: usize = 64;
const MAX_DESCRIPTION_LEN: usize = 1024;

/// Validate a loaded skill's frontmatter. `path` is only used to populate
/// the result's `path` field, not read again.
pub fn validate_skill(path: &Path, frontmatter: &SkillFrontMatter) -> ValidationResult {
    let name = frontmatter.fields.name.clone();
    let mut result = ValidationResult::new(path.to_path_buf(), name.clone());

    if name.is_empty() {
        result.add_issue(ValidationIssue::error("skill is missing a `name`"));
    } else if name.chars().count() > MAX_NAME_LEN {
        result.add_issue(ValidationIssue::error(format!(
            "skill name is {} characters, exceeds the {MAX_NAME_LEN} limit",
            name.chars().count()
        )));
    }

    let description = &frontmatter.fields.description;
    if description.is_empty() {
        result.add_issue(ValidationIssue::error("skill is missing a `description`"));
    } else if description.chars().count() > MAX_DESCRIPTION_LEN {
        result.add_issue(ValidationIssue::error(format!(
            "skill description is {} characters, exceeds the {MAX_DESCRIPTION_LEN} limit",
            description.chars().count()
        )));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn frontmatter(name: &str, description: &str) -> SkillFrontMatter {
        SkillFrontMatter {
            fields: context_engine_markdown::BaseFields {
                id: "skills/writer".into(),
                name: name.into(),
                description: description.into(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn valid_skill_has_no_issues() {
        let fm = frontmatter("writer", "writes prose");
        let result = validate_skill(&PathBuf::from("writer/SKILL.md"), &fm);
        assert!(result.is_valid());
    }

    #[test]
    fn missing_name_is_an_error() {
        let fm = frontmatter("", "writes prose");
        let result = validate_skill(&PathBuf::from("writer/SKILL.md"), &fm);
        assert!(!result.is_valid());
    }

    #[test]
    fn name_over_limit_is_an_error() {
        let fm = frontmatter(&"x".repeat(65), "writes prose");
        let result = validate_skill(&PathBuf::from("writer/SKILL.md"), &fm);
        assert!(!result.is_valid());
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn description_over_limit_is_an_error() {
        let fm = frontmatter("writer", &"x".repeat(1025));
        let result = validate_skill(&PathBuf::from("writer/SKILL.md"), &fm);
        assert!(!result.is_valid());
    }
}
