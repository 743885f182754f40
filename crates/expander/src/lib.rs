//! Single-pass expansion of `${name}`, `` !`cmd` ``, and `@path` syntax.
//!
//! Scanned left-to-right; substituted text is never rescanned, so a
//! parameter value containing `${...}` can't trigger a second round of
//! expansion. Unknown parameters and missing `@path` files are left
//! literal and logged, never an error; a shell command's non-zero exit
//! substitutes whatever output it produced and logs, it doesn't fail the
//! expansion.

pub mod shell;

pub use shell::{ShellRunner, SystemShellRunner};

use context_engine_params::Params;
use std::path::Path;

/// Expand `body` against `params`, resolving `@path` references relative to
/// `base_dir`. If `enabled` is false (frontmatter `expand: false`), returns
/// `body` unchanged.
pub fn expand(
    body: &str,
    params: &Params,
    base_dir: &Path,
    shell: &dyn ShellRunner,
    enabled: bool,
) -> String {
    if !enabled {
        return body.to_string();
    }

    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len());
    let mut i = 0usize;
    let mut prev: Option<char> = None;

    while i < chars.len() {
        let c = chars[i];

        if c == '$' && chars.get(i + 1) == Some(&'{') {
            if let Some(end) = find_closing(&chars, i + 2, '}') {
                let name: String = chars[i + 2..end].iter().collect();
                match params.value(name.trim()) {
                    Some(value) => out.push_str(value),
                    None => {
                        tracing::warn!(name = %name, "unknown parameter in ${{}} expansion; left literal");
                        out.extend(&chars[i..=end]);
                    }
                }
                i = end + 1;
                prev = Some('}');
                continue;
            }
            out.push(c);
            i += 1;
            prev = Some(c);
            continue;
        }

        if c == '!' && chars.get(i + 1) == Some(&'`') {
            if let Some(end) = find_closing(&chars, i + 2, '`') {
                let cmd: String = chars[i + 2..end].iter().collect();
                if !cmd.is_empty() {
                    match shell.run(&cmd) {
                        Ok(output) => {
                            out.push_str(&String::from_utf8_lossy(&output.stdout));
                            if !output.status.success() {
                                tracing::warn!(
                                    cmd = %cmd,
                                    status = ?output.status.code(),
                                    "shell command exited non-zero; substituted partial output"
                                );
                            }
                        }
                        Err(error) => {
                            tracing::warn!(cmd = %cmd, %error, "failed to execute shell command");
                        }
                    }
                }
                i = end + 1;
                prev = Some('`');
                continue;
            }
            out.push(c);
            i += 1;
            prev = Some(c);
            continue;
        }

        if c == '@' && prev.map(|p| p.is_whitespace()).unwrap_or(true) {
            let (path, consumed) = read_path(&chars, i + 1);
            if !path.is_empty() && !path.contains('\0') {
                match std::fs::read_to_string(base_dir.join(&path)) {
                    Ok(contents) => {
                        out.push_str(&contents);
                        i = i + 1 + consumed;
                        prev = Some(' ');
                        continue;
                    }
                    Err(_) => {
                        tracing::warn!(path = %path, "file for @path expansion not found; left literal");
                    }
                }
            }
        }

        out.push(c);
        prev = Some(c);
        i += 1;
    }

    out
}

/// Scan for the next unescaped `closing` char starting at `start`.
fn find_closing(chars: &[char], start: usize, closing: char) -> Option<usize> {
    let mut i = start;
    while i < chars.len() {
        if chars[i] == closing {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Read a path token starting at `start`: terminates at unescaped
/// whitespace; `\ ` denotes a literal space. Returns the decoded path and
/// the number of source chars consumed.
fn read_path(chars: &[char], start: usize) -> (String, usize) {
    let mut path = String::new();
    let mut i = start;
    while i < chars.len() {
        let c = chars[i];
        if c == '\\' && chars.get(i + 1) == Some(&' ') {
            path.push(' ');
            i += 2;
            continue;
        }
        if c.is_whitespace() {
            break;
        }
        path.push(c);
        i += 1;
    }
    (path, i - start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::process::{ExitStatus, Output};
    use tempfile::tempdir;

    struct FakeShell {
        stdout: &'static str,
        success: bool,
    }

    impl ShellRunner for FakeShell {
        fn run(&self, _cmd: &str) -> std::io::Result<Output> {
            #[cfg(unix)]
            let status = {
                use std::os::unix::process::ExitStatusExt;
                ExitStatus::from_raw(if self.success { 0 } else { 1 << 8 })
            };
            #[cfg(not(unix))]
            let status = std::process::Command::new("true").status().unwrap();
            Ok(Output {
                status,
                stdout: self.stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
            })
        }
    }

    #[test]
    fn expands_known_parameter() {
        let mut params = Params::new();
        params.insert("env", "prod".into());
        let out = expand(
            "Environment: ${env}\n",
            &params,
            Path::new("."),
            &SystemShellRunner,
            true,
        );
        assert_eq!(out, "Environment: prod\n");
    }

    #[test]
    fn unknown_parameter_left_literal() {
        let params = Params::new();
        let out = expand(
            "Value: ${missing}",
            &params,
            Path::new("."),
            &SystemShellRunner,
            true,
        );
        assert_eq!(out, "Value: ${missing}");
    }

    #[test]
    fn unclosed_brace_left_literal() {
        let params = Params::new();
        let out = expand("Value: ${oops", &params, Path::new("."), &SystemShellRunner, true);
        assert_eq!(out, "Value: ${oops");
    }

    #[test]
    fn disabled_expansion_is_no_op() {
        let mut params = Params::new();
        params.insert("x", "1".into());
        let out = expand("X: ${x}", &params, Path::new("."), &SystemShellRunner, false);
        assert_eq!(out, "X: ${x}");
    }

    #[test]
    fn shell_substitutes_stdout() {
        let params = Params::new();
        let shell = FakeShell { stdout: "hello", success: true };
        let out = expand("Say: !`echo hi`", &params, Path::new("."), &shell, true);
        assert_eq!(out, "Say: hello");
    }

    #[test]
    fn shell_failure_still_substitutes_partial_output() {
        let params = Params::new();
        let shell = FakeShell { stdout: "partial", success: false };
        let out = expand("Out: !`boom`", &params, Path::new("."), &shell, true);
        assert_eq!(out, "Out: partial");
    }

    #[test]
    fn at_path_substitutes_file_contents() {
        let dir = tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("included.md")).unwrap();
        file.write_all(b"included text").unwrap();

        let params = Params::new();
        let out = expand("Body: @included.md", &params, dir.path(), &SystemShellRunner, true);
        assert_eq!(out, "Body: included text");
    }

    #[test]
    fn missing_path_left_literal() {
        let params = Params::new();
        let out = expand("Body: @nope.md", &params, Path::new("."), &SystemShellRunner, true);
        assert_eq!(out, "Body: @nope.md");
    }

    #[test]
    fn email_like_at_is_not_expansion() {
        let params = Params::new();
        let out = expand("contact me@host.com", &params, Path::new("."), &SystemShellRunner, true);
        assert_eq!(out, "contact me@host.com");
    }

    #[test]
    fn expansion_is_not_recursive() {
        let mut params = Params::new();
        params.insert("inject", "${not_expanded}".into());
        let out = expand("${inject}", &params, Path::new("."), &SystemShellRunner, true);
        assert_eq!(out, "${not_expanded}");
    }
}
