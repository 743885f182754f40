//! Runs a rule's bootstrap script before the rule's selector re-test.
//!
//! A rule is bootstrapped at most once per engine run; the orchestrator is
//! responsible for that bookkeeping, this crate only runs a single script
//! once invoked. Reuses `ShellRunner` from the expander crate so a caller
//! supplying a test double implements it once for both expansion and
//! bootstrap.

use context_engine_expander::ShellRunner;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to prepare bootstrap script for {rule_path}: {source}")]
    Io {
        rule_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("bootstrap for {rule_path} exited with status {exit_status:?}")]
    Failed {
        rule_path: PathBuf,
        exit_status: Option<i32>,
    },
}

enum Script {
    Inline(String),
    Sibling(PathBuf),
}

fn sibling_bootstrap_path(rule_path: &Path) -> PathBuf {
    let basename = rule_path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let dir = rule_path.parent().unwrap_or_else(|| Path::new("."));
    dir.join(format!("{basename}-bootstrap"))
}

/// Which bootstrap applies to this rule, if any. Inline (the rule's own
/// frontmatter `bootstrap` key) takes precedence over a sibling file.
fn resolve(rule_path: &Path, inline_bootstrap: Option<&str>) -> Option<Script> {
    if let Some(text) = inline_bootstrap {
        return Some(Script::Inline(text.to_string()));
    }
    let sibling = sibling_bootstrap_path(rule_path);
    sibling.is_file().then_some(Script::Sibling(sibling))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

fn shell_quote(path: &Path) -> String {
    format!("'{}'", path.to_string_lossy().replace('\'', "'\\''"))
}

/// Run `rule_path`'s bootstrap, if it has one. Returns `Ok(true)` if a
/// script ran, `Ok(false)` if the rule has neither an inline nor a sibling
/// bootstrap. The script runs with the rule's directory as its working
/// directory; non-zero exit is `BootstrapError::Failed`.
pub fn run(
    rule_path: &Path,
    inline_bootstrap: Option<&str>,
    shell: &dyn ShellRunner,
) -> Result<bool, BootstrapError> {
    let Some(script) = resolve(rule_path, inline_bootstrap) else {
        return Ok(false);
    };

    let _temp_file_guard;
    let script_path = match script {
        Script::Inline(text) => {
            let mut file = tempfile::NamedTempFile::new().map_err(|source| BootstrapError::Io {
                rule_path: rule_path.to_path_buf(),
                source,
            })?;
            file.write_all(text.as_bytes())
                .map_err(|source| BootstrapError::Io {
                    rule_path: rule_path.to_path_buf(),
                    source,
                })?;
            let path = file.path().to_path_buf();
            _temp_file_guard = Some(file);
            path
        }
        Script::Sibling(path) => {
            _temp_file_guard = None;
            path
        }
    };

    make_executable(&script_path).map_err(|source| BootstrapError::Io {
        rule_path: rule_path.to_path_buf(),
        source,
    })?;

    let rule_dir = rule_path.parent().unwrap_or_else(|| Path::new("."));
    let command = format!("cd {} && {}", shell_quote(rule_dir), shell_quote(&script_path));

    let output = shell.run(&command).map_err(|source| BootstrapError::Io {
        rule_path: rule_path.to_path_buf(),
        source,
    })?;

    if !output.stderr.is_empty() {
        tracing::warn!(
            rule = %rule_path.display(),
            stderr = %String::from_utf8_lossy(&output.stderr),
            "bootstrap stderr"
        );
    }

    if !output.status.success() {
        return Err(BootstrapError::Failed {
            rule_path: rule_path.to_path_buf(),
            exit_status: output.status.code(),
        });
    }

    Ok(true)
}
