//! Three-state frontmatter/body split and YAML deserialization.

use crate::frontmatter::FrontMatter;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkdownError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML frontmatter in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, MarkdownError>;

/// A parsed markdown file: typed frontmatter, raw body, and estimated token count.
#[derive(Debug, Clone)]
pub struct Markdown<T> {
    pub frontmatter: T,
    pub body: String,
    pub tokens: usize,
}

/// Split `content` into an optional raw frontmatter block and the body.
///
/// state 0 (start): first line exactly `---` enters frontmatter; otherwise
/// the whole input is body, written verbatim with every line terminated by
/// `\n` (the round-trip invariant deliberately normalizes a missing final
/// newline).
/// state 1 (frontmatter): accumulate until a line exactly `---`.
/// state 2 (body): every subsequent line, verbatim, newline-terminated.
fn split_frontmatter(content: &str) -> (Option<String>, String) {
    let mut lines = content.lines();
    let Some(first) = lines.next() else {
        return (None, String::new());
    };

    if first != "---" {
        let mut body = String::new();
        body.push_str(first);
        body.push('\n');
        for line in lines {
            body.push_str(line);
            body.push('\n');
        }
        return (None, body);
    }

    let mut frontmatter = String::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line == "---" {
            closed = true;
            break;
        }
        frontmatter.push_str(line);
        frontmatter.push('\n');
    }

    if !closed {
        // No closing delimiter: there was never really a frontmatter block.
        let mut body = String::from("---\n");
        body.push_str(&frontmatter);
        for line in lines {
            body.push_str(line);
            body.push('\n');
        }
        return (None, body);
    }

    let mut body = String::new();
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }
    (Some(frontmatter), body)
}

/// Load and parse a markdown file into `Markdown<T>`.
///
/// `type_plural` is one of `tasks`, `rules`, `commands`, `skills`, `files`;
/// it seeds the default `id` (`<type_plural>/<basename>`) when the
/// frontmatter omits one.
pub fn load<T>(path: &Path, type_plural: &str) -> Result<Markdown<T>>
where
    T: FrontMatter + for<'de> serde::Deserialize<'de> + Default,
{
    let raw = fs::read_to_string(path).map_err(|source| MarkdownError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = raw.len(), "loading markdown");

    let (frontmatter_raw, body) = split_frontmatter(&raw);

    let mut frontmatter: T = match &frontmatter_raw {
        Some(raw) if !raw.trim().is_empty() => {
            serde_yaml::from_str(raw).map_err(|source| MarkdownError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        }
        _ => T::default(),
    };

    let content: BTreeMap<String, crate::frontmatter::RawValue> = match &frontmatter_raw {
        Some(raw) if !raw.trim().is_empty() => {
            serde_yaml::from_str(raw).map_err(|source| MarkdownError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        }
        _ => BTreeMap::new(),
    };
    frontmatter.set_content(content);

    if frontmatter.id().is_empty() {
        let basename = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        frontmatter.set_id(format!("{type_plural}/{basename}"));
    }

    let tokens = context_engine_tokens::estimate_tokens(&body);

    Ok(Markdown {
        frontmatter,
        body,
        tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::TaskFrontMatter;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_frontmatter_and_body() {
        let file = write_temp("---\nname: simple\ndescription: a task\n---\nHello\nWorld");
        let parsed: Markdown<TaskFrontMatter> = load(file.path(), "tasks").unwrap();
        assert_eq!(parsed.frontmatter.fields.name, "simple");
        assert_eq!(parsed.body, "Hello\nWorld\n");
        assert!(parsed.tokens > 0);
    }

    #[test]
    fn defaults_id_from_basename() {
        let file = write_temp("Body only, no frontmatter.\n");
        let parsed: Markdown<TaskFrontMatter> = load(file.path(), "tasks").unwrap();
        let basename = file.path().file_stem().unwrap().to_str().unwrap();
        assert_eq!(parsed.frontmatter.fields.id, format!("tasks/{basename}"));
    }

    #[test]
    fn body_without_frontmatter_is_written_verbatim() {
        let file = write_temp("no frontmatter here");
        let parsed: Markdown<TaskFrontMatter> = load(file.path(), "tasks").unwrap();
        assert_eq!(parsed.body, "no frontmatter here\n");
    }

    #[test]
    fn unclosed_frontmatter_is_treated_as_body() {
        let file = write_temp("---\nname: oops\nno closing delimiter");
        let parsed: Markdown<TaskFrontMatter> = load(file.path(), "tasks").unwrap();
        assert!(parsed.body.starts_with("---\n"));
        assert_eq!(parsed.frontmatter.fields.name, "");
    }

    #[test]
    fn content_map_mirrors_raw_keys() {
        let file = write_temp("---\nname: x\ndescription: y\ncustom_key: z\n---\nbody\n");
        let parsed: Markdown<TaskFrontMatter> = load(file.path(), "tasks").unwrap();
        assert!(parsed.frontmatter.content.contains_key("custom_key"));
    }
}
