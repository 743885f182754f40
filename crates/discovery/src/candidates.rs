//! Enumerating task/rule/command/skill candidates across every agent's
//! directory conventions, for every search root.

use crate::root::{resolve_root, Root, SourceFetcher};
use crate::walk::{walk_markdown_files, walk_skill_files};
use context_engine_agents::AgentId;
use std::collections::HashSet;
use std::path::PathBuf;

/// Every task/rule/command/skill candidate found across `roots`, in
/// caller-supplied root order, then deterministic per-root walk order.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    pub tasks: Vec<PathBuf>,
    pub rules: Vec<PathBuf>,
    pub commands: Vec<PathBuf>,
    pub skills: Vec<PathBuf>,
}

/// Enumerate candidates across `roots`. A non-existent local root, or a
/// remote root with no usable fetcher, contributes nothing and is skipped
/// silently.
pub fn discover(roots: &[Root], fetcher: Option<&dyn SourceFetcher>) -> Candidates {
    let mut candidates = Candidates::default();
    let mut seen_tasks = HashSet::new();
    let mut seen_rules = HashSet::new();
    let mut seen_commands = HashSet::new();
    let mut seen_skills = HashSet::new();

    for root in roots {
        let Some(local) = resolve_root(root, fetcher) else {
            continue;
        };

        for agent in AgentId::ALL {
            let paths = agent.paths();

            if let Some(tasks_path) = &paths.tasks_path {
                walk_markdown_files(&local.join(tasks_path), &mut candidates.tasks, &mut seen_tasks);
            }
            for rules_path in &paths.rules_paths {
                walk_markdown_files(&local.join(rules_path), &mut candidates.rules, &mut seen_rules);
            }
            if let Some(commands_path) = &paths.commands_path {
                walk_markdown_files(
                    &local.join(commands_path),
                    &mut candidates.commands,
                    &mut seen_commands,
                );
            }
            if let Some(skills_path) = &paths.skills_path {
                walk_skill_files(&local.join(skills_path), &mut candidates.skills, &mut seen_skills);
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, write};
    use tempfile::tempdir;

    #[test]
    fn enumerates_tasks_rules_commands_skills_across_agents() {
        let dir = tempdir().unwrap();
        create_dir_all(dir.path().join(".agents/tasks")).unwrap();
        create_dir_all(dir.path().join(".agents/rules")).unwrap();
        create_dir_all(dir.path().join(".agents/commands")).unwrap();
        create_dir_all(dir.path().join(".agents/skills/writer")).unwrap();
        create_dir_all(dir.path().join(".claude/rules")).unwrap();

        write(dir.path().join(".agents/tasks/deploy.md"), "t").unwrap();
        write(dir.path().join(".agents/rules/style.md"), "r").unwrap();
        write(dir.path().join(".agents/commands/build.md"), "c").unwrap();
        write(dir.path().join(".agents/skills/writer/SKILL.md"), "s").unwrap();
        write(dir.path().join(".claude/rules/extra.md"), "r2").unwrap();

        let roots = vec![Root::Local(dir.path().to_path_buf())];
        let candidates = discover(&roots, None);

        assert_eq!(candidates.tasks.len(), 1);
        assert_eq!(candidates.rules.len(), 2);
        assert_eq!(candidates.commands.len(), 1);
        assert_eq!(candidates.skills.len(), 1);
    }

    #[test]
    fn nonexistent_root_contributes_nothing() {
        let roots = vec![Root::Local(PathBuf::from("/no/such/root"))];
        let candidates = discover(&roots, None);
        assert!(candidates.tasks.is_empty());
        assert!(candidates.rules.is_empty());
    }

    #[test]
    fn root_order_is_preserved() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        create_dir_all(first.path().join(".agents/rules")).unwrap();
        create_dir_all(second.path().join(".agents/rules")).unwrap();
        write(first.path().join(".agents/rules/a.md"), "a").unwrap();
        write(second.path().join(".agents/rules/b.md"), "b").unwrap();

        let roots = vec![
            Root::Local(first.path().to_path_buf()),
            Root::Local(second.path().to_path_buf()),
        ];
        let candidates = discover(&roots, None);
        assert!(candidates.rules[0].ends_with("a.md"));
        assert!(candidates.rules[1].ends_with("b.md"));
    }
}
