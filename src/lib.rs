//! Typed access to the `git` command line.
//!
//! Each operation runs `git` once, parses its porcelain output and returns a
//! plain value. [`Controller`] groups them behind a mockable trait.

pub mod config;
pub mod error;
pub mod git;
pub mod trace;

// Re-export commonly used types for convenience
pub use config::Settings;
pub use error::{GitError, Result};
pub use git::{
    AheadBehind, AheadOfOrigin, Controller, Executor, GitController, Invocation, ScriptedExecutor,
    SystemExecutor,
};
pub use trace::{TraceConfig, TraceSink};
