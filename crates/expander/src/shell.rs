//! Injectable shell-command executor, shared between `` !`cmd` `` expansion
//! and the bootstrap runner so callers supplying a test double implement it
//! once.

use std::process::{Command, Output};

pub trait ShellRunner: Send + Sync {
    fn run(&self, cmd: &str) -> std::io::Result<Output>;
}

/// Executes `cmd` through the platform shell (`sh -c`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShellRunner;

impl ShellRunner for SystemShellRunner {
    fn run(&self, cmd: &str) -> std::io::Result<Output> {
        Command::new("sh").arg("-c").arg(cmd).output()
    }
}
