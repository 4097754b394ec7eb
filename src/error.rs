use std::io;
use std::num::ParseIntError;
use thiserror::Error;

use crate::git::executor::ExitStatus;

/// Errors that can occur during git operations
#[derive(Debug, Error)]
pub enum GitError {
    /// The process ran but exited unsuccessfully. Displays as the bare exit
    /// status; the captured output is kept for callers that want it.
    #[error("{status}")]
    CommandFailed { status: ExitStatus, output: String },

    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Executable not found in PATH: {0}")]
    ExecutableNotFound(String),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<GitError>,
    },

    /// Raw tool output used verbatim as the message
    #[error("{0}")]
    Output(String),

    #[error("{0}")]
    NoOutput(String),

    #[error("Unrecognized output: {0}")]
    Unrecognized(String),

    #[error("{0}")]
    InvalidCount(#[from] ParseIntError),

    #[error("Current branch has no upstream: {0}")]
    NoUpstream(String),

    #[error("Unable to locate upstream branch")]
    UpstreamNotFound,

    #[error("Unable to determine upstream for ref {0}")]
    UpstreamUnresolved(String),

    #[error("No tracking branch available.")]
    NoTrackingBranch,

    #[error("Unable to locate branch in git output.\nGit output:\n{0}")]
    BranchNotListed(String),

    #[error("Failed to checkout {target}. Repository will be left in {current} branch.")]
    CheckoutFailed {
        target: String,
        current: String,
        #[source]
        source: Box<GitError>,
    },

    #[error("Empty command")]
    EmptyCommand,

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl GitError {
    /// Wrap this error with a leading context message
    pub fn context(self, context: impl Into<String>) -> Self {
        GitError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Captured tool output, when the failure carries any
    pub fn output(&self) -> Option<&str> {
        match self {
            GitError::CommandFailed { output, .. } => Some(output),
            GitError::Output(output) | GitError::BranchNotListed(output) => Some(output),
            GitError::Context { source, .. } | GitError::CheckoutFailed { source, .. } => {
                source.output()
            }
            _ => None,
        }
    }

    /// Exit status of the underlying process, if it ran to completion
    pub fn exit_status(&self) -> Option<ExitStatus> {
        match self {
            GitError::CommandFailed { status, .. } => Some(*status),
            GitError::Context { source, .. } | GitError::CheckoutFailed { source, .. } => {
                source.exit_status()
            }
            _ => None,
        }
    }

    /// Replace an execution failure with its raw captured output
    pub(crate) fn into_raw_output(self) -> Self {
        match self {
            GitError::CommandFailed { output, .. } => GitError::Output(output),
            other => other,
        }
    }
}

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;
