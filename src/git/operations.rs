//! One function per git operation.
//!
//! Each builds a fixed argument vector, runs it through a [`CommandRunner`]
//! and parses the combined output. None of them depend on each other.

use crate::error::{GitError, Result};
use crate::git::executor::{Executor, Invocation};
use crate::git::parser::{self, AheadBehind, AheadOfOrigin};
use crate::trace::TraceConfig;
use std::path::PathBuf;

/// An executor paired with the trace configuration consulted before each run
#[derive(Clone, Copy)]
pub struct CommandRunner<'a> {
    executor: &'a dyn Executor,
    trace: &'a TraceConfig,
}

impl<'a> CommandRunner<'a> {
    pub fn new(executor: &'a dyn Executor, trace: &'a TraceConfig) -> Self {
        Self { executor, trace }
    }

    /// Run with the caller's stdio attached; non-zero exit is an error
    pub fn run_loudly(&self, invocation: &Invocation) -> Result<()> {
        self.trace.emit(invocation);
        let status = self.executor.run_loudly(invocation)?;
        if status.success() {
            Ok(())
        } else {
            Err(GitError::CommandFailed {
                status,
                output: String::new(),
            })
        }
    }

    /// Run and return combined stdout and stderr; non-zero exit is an error
    pub fn output(&self, invocation: &Invocation) -> Result<String> {
        self.trace.emit(invocation);
        self.executor.combined_output(invocation)?.into_result()
    }

    pub fn locate(&self, program: &str) -> Result<PathBuf> {
        self.executor.locate(program)
    }
}

/// Run an arbitrary command line with the caller's stdio attached
pub fn run_supplied_executable_with_args(
    runner: &CommandRunner<'_>,
    command: &[String],
) -> Result<()> {
    let invocation = Invocation::new(command.iter().cloned())?;
    runner.run_loudly(&invocation)
}

/// Path of the `git` executable
pub fn which_git(runner: &CommandRunner<'_>) -> Result<PathBuf> {
    runner.locate("git")
}

/// Name of the checked-out branch, e.g. `main`
pub fn get_branch(runner: &CommandRunner<'_>) -> Result<String> {
    let output = runner.output(&Invocation::git(["rev-parse", "--abbrev-ref", "HEAD"]))?;
    parser::parse_single_value(&output, "Could not find branch in output string.")
}

/// Full ref HEAD points at, e.g. `refs/heads/main`
pub fn get_ref_for_head(runner: &CommandRunner<'_>) -> Result<String> {
    let output = runner
        .output(&Invocation::git(["symbolic-ref", "-q", "HEAD"]))
        .map_err(|e| e.context("Could not identify upstream for ref HEAD"))?;
    parser::parse_single_value(&output, "Could not identify branch in output string.")
}

/// Short name of the upstream configured for `reference`
pub fn get_upstream_for_ref(runner: &CommandRunner<'_>, reference: &str) -> Result<String> {
    let output = runner
        .output(&Invocation::git([
            "for-each-ref",
            "--format=%(upstream:short)",
            reference,
        ]))
        .map_err(|e| e.context(format!("Unable to identify upstream for {}", reference)))?;
    parser::parse_upstream_short(&output, reference)
}

/// Upstream of the current branch, read from `git branch -vv`
///
/// Prefer [`get_upstream_for_ref`], which reads plumbing output.
pub fn get_tracking_branch(runner: &CommandRunner<'_>) -> Result<String> {
    let output = runner.output(&Invocation::git(["branch", "-vv"]))?;
    parser::parse_tracking_branch(&output)
}

/// True when the working tree differs from HEAD, or when the check itself fails
pub fn has_uncommitted_changes(runner: &CommandRunner<'_>) -> bool {
    runner
        .output(&Invocation::git(["diff", "HEAD", "--exit-code"]))
        .is_err()
}

/// Commits `reference` is ahead of and behind its upstream
pub fn ref_is_ahead_behind(runner: &CommandRunner<'_>, reference: &str) -> Result<AheadBehind> {
    let output = runner.output(&Invocation::git([
        "for-each-ref",
        "--format=%(upstream:track)",
        reference,
    ]))?;
    parser::parse_ahead_behind(&output)
}

/// Whether `branch` is ahead of its tracking branch, read from `git branch -vv`
///
/// Prefer [`ref_is_ahead_behind`].
pub fn branch_is_ahead_of_origin(
    runner: &CommandRunner<'_>,
    branch: &str,
) -> Result<AheadOfOrigin> {
    let output = runner.output(&Invocation::git(["branch", "-vv"]))?;
    parser::parse_ahead_of_origin(&output, branch)
}

pub fn checkout(
    runner: &CommandRunner<'_>,
    current_branch: &str,
    target_branch: &str,
) -> Result<()> {
    runner
        .run_loudly(&Invocation::git(["checkout", target_branch]))
        .map_err(|e| GitError::CheckoutFailed {
            target: target_branch.to_string(),
            current: current_branch.to_string(),
            source: Box::new(e),
        })
}

/// Fast-forward the local `branch` from `origin`, pruning stale refs
pub fn fetch(runner: &CommandRunner<'_>, branch: &str) -> Result<()> {
    let refspec = format!("{0}:{0}", branch);
    runner.run_loudly(&Invocation::git(["fetch", "-p", "origin", refspec.as_str()]))
}

/// Pull the local `src_branch` into the current one
///
/// Without rebase an empty argument stays in the rebase slot.
pub fn pull(runner: &CommandRunner<'_>, src_branch: &str, rebase: bool) -> Result<()> {
    let rebase_flag = if rebase { "--rebase" } else { "" };
    runner.run_loudly(&Invocation::git(["pull", rebase_flag, ".", src_branch]))
}

/// Hard-reset to `origin/<target_branch>`
pub fn reset_target(runner: &CommandRunner<'_>, target_branch: &str) -> Result<()> {
    let upstream = format!("origin/{}", target_branch);
    runner.run_loudly(&Invocation::git(["reset", "--hard", upstream.as_str()]))
}

pub fn delete_branch(runner: &CommandRunner<'_>, source_branch: &str) -> Result<()> {
    runner.run_loudly(&Invocation::git(["branch", "-D", source_branch]))
}

/// Squash-merge `source_branch` into the current branch
pub fn merge_source_to_target(runner: &CommandRunner<'_>, source_branch: &str) -> Result<()> {
    runner.run_loudly(&Invocation::git(["merge", "--squash", source_branch]))
}

pub fn commit(runner: &CommandRunner<'_>) -> Result<()> {
    runner.run_loudly(&Invocation::git(["commit"]))
}

pub fn push(runner: &CommandRunner<'_>) -> Result<()> {
    runner.run_loudly(&Invocation::git(["push"]))
}

/// Whether the current directory is inside a working tree
///
/// A failing command reports its raw output as the error message.
pub fn is_inside_work_tree(runner: &CommandRunner<'_>) -> Result<bool> {
    let output = runner
        .output(&Invocation::git(["rev-parse", "--is-inside-work-tree"]))
        .map_err(GitError::into_raw_output)?;
    parser::parse_work_tree_flag(&output)
}

/// Root directory of the working tree
pub fn get_top_level(runner: &CommandRunner<'_>) -> Result<String> {
    let output = runner
        .output(&Invocation::git(["rev-parse", "--show-toplevel"]))
        .map_err(GitError::into_raw_output)?;
    parser::parse_single_value(&output, "No output from git command.")
}

/// Hash of `HEAD~`
pub fn get_parent_commit(runner: &CommandRunner<'_>) -> Result<String> {
    let output = runner
        .output(&Invocation::git(["rev-parse", "HEAD~"]))
        .map_err(|e| e.context("Failed to identify parent commit"))?;
    parser::parse_single_value(&output, "No revision found.")
}

/// Hash of `HEAD`
pub fn get_head_commit(runner: &CommandRunner<'_>) -> Result<String> {
    let output = runner
        .output(&Invocation::git(["rev-parse", "HEAD"]))
        .map_err(|e| e.context("Failed to identify HEAD commit"))?;
    parser::parse_single_value(&output, "No revision found.")
}

/// Number of merge commits between `ancestor_commit` and HEAD on `current_branch`
pub fn count_commits_with_gt_one_parent(
    runner: &CommandRunner<'_>,
    current_branch: &str,
    ancestor_commit: &str,
) -> Result<usize> {
    let branches = format!("--branches={}", current_branch);
    let range = format!("{}..HEAD", ancestor_commit);
    let output = runner
        .output(&Invocation::git([
            "rev-list",
            "--count",
            "--min-parents=2",
            branches.as_str(),
            "--ancestry-path",
            range.as_str(),
        ]))
        .map_err(|e| e.context("Parent Count Check"))?;
    parser::parse_count(&output, ancestor_commit)
}

/// Common ancestor of `parent_commit` and `target_branch`
pub fn get_merge_base(
    runner: &CommandRunner<'_>,
    parent_commit: &str,
    target_branch: &str,
) -> Result<String> {
    let output = runner.output(&Invocation::git(["merge-base", target_branch, parent_commit]))?;
    parser::parse_single_value(&output, "Failed to identify the merge base")
}

/// Decorated one-line graph from `merge_target` (exclusive) up to HEAD
pub fn get_graph_to_head(
    runner: &CommandRunner<'_>,
    current_branch: &str,
    merge_target: &str,
    num_lines: usize,
) -> Result<String> {
    let branches = format!("--branches={}", current_branch);
    let range = format!("{}..HEAD", merge_target);
    let output = runner.output(&Invocation::git([
        "log",
        "--decorate",
        "--oneline",
        "--graph",
        "--all",
        branches.as_str(),
        "--ancestry-path",
        range.as_str(),
    ]))?;
    Ok(parser::parse_graph(&output, num_lines))
}

/// Hash of the newest commit on `branch`
pub fn get_last_commit_on_branch(runner: &CommandRunner<'_>, branch: &str) -> Result<String> {
    let output = runner.output(&Invocation::git(["log", branch, "-n1", "--format=format:%H"]))?;
    parser::parse_single_value(&output, "Failed to identify final commit on branch.")
}

pub fn get_global_config_setting(runner: &CommandRunner<'_>, setting: &str) -> Result<String> {
    let output = runner.output(&Invocation::git(["config", "--global", "--get", setting]))?;
    parser::parse_single_value(&output, "No setting found.")
}

pub fn get_config_setting(runner: &CommandRunner<'_>, setting: &str) -> Result<String> {
    let output = runner.output(&Invocation::git(["config", "--get", setting]))?;
    parser::parse_single_value(&output, "No setting found.")
}

/// Succeeds when git runs a trivial command without failing
pub fn git_can_execute(runner: &CommandRunner<'_>) -> Result<()> {
    runner.output(&Invocation::git(["config", "--list"])).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::fake::ScriptedExecutor;

    fn argv_of<F>(f: F) -> Vec<String>
    where
        F: FnOnce(&CommandRunner<'_>) -> Result<()>,
    {
        let fake = ScriptedExecutor::succeeding("mocked text\n");
        let trace = TraceConfig::default();
        f(&CommandRunner::new(&fake, &trace)).unwrap();
        fake.last_invocation().unwrap()
    }

    #[test]
    fn test_pull_argv() {
        assert_eq!(
            argv_of(|r| pull(r, "feature", true)),
            vec!["git", "pull", "--rebase", ".", "feature"]
        );
        assert_eq!(
            argv_of(|r| pull(r, "feature", false)),
            vec!["git", "pull", "", ".", "feature"]
        );
    }

    #[test]
    fn test_pass_through_argv() {
        assert_eq!(
            argv_of(|r| checkout(r, "main", "feature")),
            vec!["git", "checkout", "feature"]
        );
        assert_eq!(
            argv_of(|r| fetch(r, "main")),
            vec!["git", "fetch", "-p", "origin", "main:main"]
        );
        assert_eq!(
            argv_of(|r| reset_target(r, "main")),
            vec!["git", "reset", "--hard", "origin/main"]
        );
        assert_eq!(
            argv_of(|r| delete_branch(r, "feature")),
            vec!["git", "branch", "-D", "feature"]
        );
        assert_eq!(
            argv_of(|r| merge_source_to_target(r, "feature")),
            vec!["git", "merge", "--squash", "feature"]
        );
        assert_eq!(argv_of(|r| commit(r)), vec!["git", "commit"]);
        assert_eq!(argv_of(|r| push(r)), vec!["git", "push"]);
    }

    #[test]
    fn test_supplied_command_verbatim() {
        let command = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(
            argv_of(|r| run_supplied_executable_with_args(r, &command)),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_supplied_command_empty() {
        let fake = ScriptedExecutor::succeeding("");
        let trace = TraceConfig::default();
        let runner = CommandRunner::new(&fake, &trace);

        let result = run_supplied_executable_with_args(&runner, &[]);
        assert!(matches!(result, Err(GitError::EmptyCommand)));
        assert!(fake.invocations().is_empty());
    }

    #[test]
    fn test_count_argv() {
        let fake = ScriptedExecutor::succeeding("0\n");
        let trace = TraceConfig::default();
        let runner = CommandRunner::new(&fake, &trace);

        count_commits_with_gt_one_parent(&runner, "current", "abc123").unwrap();
        assert_eq!(
            fake.last_invocation().unwrap(),
            vec![
                "git",
                "rev-list",
                "--count",
                "--min-parents=2",
                "--branches=current",
                "--ancestry-path",
                "abc123..HEAD"
            ]
        );
    }

    #[test]
    fn test_loud_failure_has_empty_output() {
        let fake = ScriptedExecutor::new("ignored", 1);
        let trace = TraceConfig::default();
        let runner = CommandRunner::new(&fake, &trace);

        let err = push(&runner).unwrap_err();
        assert_eq!(err.to_string(), "exit status 1");
        assert_eq!(err.output(), Some(""));
    }
}
