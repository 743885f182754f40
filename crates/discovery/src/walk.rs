//! Deterministic, extension-filtered directory walking.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn has_markdown_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md") | Some("mdc")
    )
}

fn push_unique(path: &Path, out: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>) {
    let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if seen.insert(key) {
        out.push(path.to_path_buf());
    }
}

/// Every `.md`/`.mdc` file under `dir`, recursively, in lexicographic
/// walk order. Missing or non-directory `dir` is skipped silently.
pub fn walk_markdown_files(dir: &Path, out: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>) {
    if !dir.is_dir() {
        return;
    }
    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_file() && has_markdown_extension(entry.path()) {
            push_unique(entry.path(), out, seen);
        }
    }
}

/// Every `SKILL.md` one directory level under `skills_dir`
/// (`skills_dir/*/SKILL.md`), in lexicographic order.
pub fn walk_skill_files(skills_dir: &Path, out: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>) {
    if !skills_dir.is_dir() {
        return;
    }
    let Ok(entries) = fs::read_dir(skills_dir) else {
        return;
    };
    let mut entries: Vec<_> = entries.filter_map(|e| e.ok()).collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let skill_md = path.join("SKILL.md");
        if skill_md.is_file() {
            push_unique(&skill_md, out, seen);
        }
    }
}
