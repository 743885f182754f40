//! Shared issue/result types for skill validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Severity {
    /// Prevents the skill from being usable.
    Error,
    /// Doesn't block use but is worth surfacing.
    Warning,
}

/// A single validation issue found in a skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Result of validating a single skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub path: PathBuf,
    pub name: String,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new(path: PathBuf, name: String) -> Self {
        Self {
            path,
            name,
            issues: Vec::new(),
        }
    }

    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Error).count()
    }
}
