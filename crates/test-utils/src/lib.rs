//! Shared test fixtures for context-engine crates.
//!
//! Builds a generic `.agents/{tasks,rules,commands,skills}` tree in a temp
//! directory, matching the generic agent's directory conventions, so tests
//! across crates can write fixtures the same way.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for an environment variable; restores the prior value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.previous {
            Some(value) => std::env::set_var(self.key, value),
            None => std::env::remove_var(self.key),
        }
    }
}

pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    match value {
        Some(value) => std::env::set_var(key, value),
        None => std::env::remove_var(key),
    }
    EnvVarGuard { key, previous }
}

/// A temp project tree with `.agents/{tasks,rules,commands,skills}` ready
/// to populate via the `write_*` helpers.
pub struct ProjectFixture {
    pub dir: tempfile::TempDir,
}

impl ProjectFixture {
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::tempdir()?;
        for sub in ["tasks", "rules", "commands", "skills"] {
            std::fs::create_dir_all(dir.path().join(".agents").join(sub))?;
        }
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn write_task(&self, name: &str, frontmatter: &str, body: &str) -> PathBuf {
        self.write(
            &format!(".agents/tasks/{name}.md"),
            &render(frontmatter, body),
        )
    }

    pub fn write_rule(&self, name: &str, frontmatter: &str, body: &str) -> PathBuf {
        self.write(
            &format!(".agents/rules/{name}.md"),
            &render(frontmatter, body),
        )
    }

    pub fn write_command(&self, name: &str, frontmatter: &str, body: &str) -> PathBuf {
        self.write(
            &format!(".agents/commands/{name}.md"),
            &render(frontmatter, body),
        )
    }

    pub fn write_skill(&self, name: &str, frontmatter: &str, body: &str) -> PathBuf {
        self.write(
            &format!(".agents/skills/{name}/SKILL.md"),
            &render(frontmatter, body),
        )
    }
}

fn render(frontmatter: &str, body: &str) -> String {
    if frontmatter.trim().is_empty() {
        body.to_string()
    } else {
        format!("---\n{frontmatter}\n---\n{body}")
    }
}
