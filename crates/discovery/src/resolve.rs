//! Task resolution: exactly one candidate must match `task_name` plus the
//! caller's selectors.

use context_engine_markdown::{Markdown, MarkdownError, TaskFrontMatter};
use context_engine_selector::{canonicalize, Selectors, Subject};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Markdown(#[from] MarkdownError),
    #[error("no task candidate matched `{0}`")]
    TaskNotFound(String),
    #[error("ambiguous task `{name}`: matches {candidates:?}")]
    AmbiguousTask {
        name: String,
        candidates: Vec<PathBuf>,
    },
}

/// Adapts a task's raw frontmatter content map into a `Subject`, with a
/// synthetic `task_name` key derived from the candidate's file basename
/// (frontmatter has no such field of its own).
struct CandidateSubject<'a> {
    content: &'a std::collections::BTreeMap<String, serde_yaml::Value>,
    task_name: &'a str,
}

impl Subject for CandidateSubject<'_> {
    fn values(&self, key: &str) -> Option<Vec<String>> {
        if key == "task_name" {
            return Some(vec![self.task_name.to_string()]);
        }
        self.content.get(key).map(canonicalize)
    }
}

fn task_name_of(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Resolve the single task candidate matching `requested_name` under
/// `cli_selectors ∪ {task_name: requested_name}`. Zero matches is
/// `TaskNotFound`; more than one is `AmbiguousTask` naming every match.
pub fn resolve_task(
    candidates: &[PathBuf],
    requested_name: &str,
    cli_selectors: &Selectors,
) -> Result<(PathBuf, Markdown<TaskFrontMatter>), ResolveError> {
    let mut selectors = cli_selectors.clone();
    selectors.set_value("task_name", requested_name);

    let mut matches = Vec::new();
    for path in candidates {
        let markdown: Markdown<TaskFrontMatter> = context_engine_markdown::load(path, "tasks")?;
        let name = task_name_of(path);
        let subject = CandidateSubject {
            content: &markdown.frontmatter.content,
            task_name: &name,
        };
        if selectors.matches(&subject).0 {
            matches.push((path.clone(), markdown));
        }
    }

    match matches.len() {
        0 => Err(ResolveError::TaskNotFound(requested_name.to_string())),
        1 => Ok(matches.into_iter().next().unwrap()),
        _ => Err(ResolveError::AmbiguousTask {
            name: requested_name.to_string(),
            candidates: matches.into_iter().map(|(p, _)| p).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::write;
    use tempfile::tempdir;

    #[test]
    fn resolves_unique_task_by_name() {
        let dir = tempdir().unwrap();
        write(dir.path().join("deploy.md"), "Deploy body\n").unwrap();
        write(dir.path().join("build.md"), "Build body\n").unwrap();

        let candidates = vec![dir.path().join("deploy.md"), dir.path().join("build.md")];
        let selectors = Selectors::new();
        let (path, markdown) = resolve_task(&candidates, "deploy", &selectors).unwrap();
        assert!(path.ends_with("deploy.md"));
        assert_eq!(markdown.body, "Deploy body\n");
    }

    #[test]
    fn zero_matches_is_task_not_found() {
        let dir = tempdir().unwrap();
        write(dir.path().join("build.md"), "Build body\n").unwrap();
        let candidates = vec![dir.path().join("build.md")];
        let selectors = Selectors::new();
        let err = resolve_task(&candidates, "deploy", &selectors).unwrap_err();
        assert!(matches!(err, ResolveError::TaskNotFound(_)));
    }

    #[test]
    fn two_same_named_files_across_roots_is_ambiguous() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        write(first.path().join("deploy.md"), "one\n").unwrap();
        write(second.path().join("deploy.md"), "two\n").unwrap();

        let candidates = vec![
            first.path().join("deploy.md"),
            second.path().join("deploy.md"),
        ];
        let selectors = Selectors::new();
        let err = resolve_task(&candidates, "deploy", &selectors).unwrap_err();
        assert!(matches!(err, ResolveError::AmbiguousTask { .. }));
    }

    #[test]
    fn selectors_narrow_the_match() {
        let dir = tempdir().unwrap();
        write(
            dir.path().join("deploy.md"),
            "---\nlanguages: [rust]\n---\nRust deploy\n",
        )
        .unwrap();
        write(
            dir.path().join("deploy-go.md"),
            "---\nlanguages: [go]\n---\nGo deploy\n",
        )
        .unwrap();

        let candidates = vec![dir.path().join("deploy.md"), dir.path().join("deploy-go.md")];
        let mut selectors = Selectors::new();
        selectors.set_value("languages", "rust");

        let mut count_matching = 0;
        for name in ["deploy", "deploy-go"] {
            if resolve_task(&candidates, name, &selectors).is_ok() {
                count_matching += 1;
            }
        }
        assert_eq!(count_matching, 1);
    }
}
