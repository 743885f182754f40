//! A cooperative cancellation token checked between discovery/bootstrap/
//! expansion steps.
//!
//! `Run` is synchronous and each subprocess call (`ShellRunner::run`)
//! blocks to completion, so cancellation is coarse: it's observed between
//! rules, between commands, and between skills, not by killing an
//! in-flight subprocess.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
