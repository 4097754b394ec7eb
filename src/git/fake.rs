//! A scripted stand-in for the real `git` executable.
//!
//! Every invocation answers with the same output and exit status, and is
//! recorded so tests can assert on the exact argument vectors.

use crate::error::{GitError, Result};
use crate::git::executor::{CommandOutput, Executor, ExitStatus, Invocation};
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug)]
pub struct ScriptedExecutor {
    output: String,
    status: ExitStatus,
    located: Option<PathBuf>,
    invocations: Mutex<Vec<Vec<String>>>,
}

impl ScriptedExecutor {
    /// Answer every invocation with `output` and the given exit code
    pub fn new(output: impl Into<String>, exit_code: i32) -> Self {
        Self {
            output: output.into(),
            status: ExitStatus::from_code(exit_code),
            located: None,
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Shorthand for a zero exit status
    pub fn succeeding(output: impl Into<String>) -> Self {
        Self::new(output, 0)
    }

    /// Report `path` from [`Executor::locate`] instead of searching `PATH`
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.located = Some(path.into());
        self
    }

    /// Argument vectors seen so far, oldest first
    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.invocations
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }

    /// The most recent argument vector, if any
    pub fn last_invocation(&self) -> Option<Vec<String>> {
        self.invocations().pop()
    }

    fn record(&self, invocation: &Invocation) {
        if let Ok(mut seen) = self.invocations.lock() {
            seen.push(invocation.argv().to_vec());
        }
    }
}

impl Executor for ScriptedExecutor {
    fn run_loudly(&self, invocation: &Invocation) -> Result<ExitStatus> {
        self.record(invocation);
        Ok(self.status)
    }

    fn combined_output(&self, invocation: &Invocation) -> Result<CommandOutput> {
        self.record(invocation);
        Ok(CommandOutput::new(self.output.clone(), self.status))
    }

    fn locate(&self, program: &str) -> Result<PathBuf> {
        self.located
            .clone()
            .ok_or_else(|| GitError::ExecutableNotFound(program.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_invocations() {
        let fake = ScriptedExecutor::succeeding("ok\n");
        fake.combined_output(&Invocation::git(["status"])).unwrap();
        fake.run_loudly(&Invocation::git(["push"])).unwrap();

        assert_eq!(
            fake.invocations(),
            vec![vec!["git", "status"], vec!["git", "push"]]
        );
        assert_eq!(fake.last_invocation().unwrap(), vec!["git", "push"]);
    }

    #[test]
    fn test_scripted_status() {
        let fake = ScriptedExecutor::new("boom", 3);
        let output = fake.combined_output(&Invocation::git(["log"])).unwrap();
        assert_eq!(output.text, "boom");
        assert_eq!(output.status.code(), Some(3));
    }

    #[test]
    fn test_locate() {
        let fake = ScriptedExecutor::succeeding("");
        assert!(matches!(
            fake.locate("git"),
            Err(GitError::ExecutableNotFound(_))
        ));

        let fake = fake.with_location("/usr/bin/git");
        assert_eq!(fake.locate("git").unwrap(), PathBuf::from("/usr/bin/git"));
    }
}
