use crate::error::Result;
use crate::git::executor::{Executor, SystemExecutor};
use crate::git::operations::{self, CommandRunner};
use crate::git::parser::{AheadBehind, AheadOfOrigin};
use crate::trace::TraceConfig;
use std::path::{Path, PathBuf};

/// Every git operation as a method, so callers can mock the whole surface
pub trait Controller {
    fn run_supplied_executable_with_args(&self, command: &[String]) -> Result<()>;
    fn which_git(&self) -> Result<PathBuf>;
    fn get_branch(&self) -> Result<String>;
    fn get_ref_for_head(&self) -> Result<String>;
    /// Upstream of `reference`, e.g. `origin/main` for `refs/heads/main`
    fn get_upstream_for_ref(&self, reference: &str) -> Result<String>;
    /// Prefer [`Controller::get_upstream_for_ref`]
    fn get_tracking_branch(&self) -> Result<String>;
    fn has_uncommitted_changes(&self) -> bool;
    fn ref_is_ahead_behind(&self, reference: &str) -> Result<AheadBehind>;
    /// Prefer [`Controller::ref_is_ahead_behind`]
    fn branch_is_ahead_of_origin(&self, branch: &str) -> Result<AheadOfOrigin>;
    fn is_inside_work_tree(&self) -> Result<bool>;
    fn get_top_level(&self) -> Result<String>;
    fn get_parent_commit(&self) -> Result<String>;
    fn get_head_commit(&self) -> Result<String>;
    fn count_commits_with_gt_one_parent(
        &self,
        current_branch: &str,
        ancestor_commit: &str,
    ) -> Result<usize>;
    fn get_merge_base(&self, parent_commit: &str, target_branch: &str) -> Result<String>;
    fn get_graph_to_head(
        &self,
        current_branch: &str,
        merge_target: &str,
        num_lines: usize,
    ) -> Result<String>;
    fn get_last_commit_on_branch(&self, branch: &str) -> Result<String>;
    fn get_global_config_setting(&self, setting: &str) -> Result<String>;
    fn get_config_setting(&self, setting: &str) -> Result<String>;
    fn git_can_execute(&self) -> Result<()>;
    fn checkout(&self, current_branch: &str, target_branch: &str) -> Result<()>;
    fn fetch(&self, branch: &str) -> Result<()>;
    fn pull(&self, src_branch: &str, rebase: bool) -> Result<()>;
    fn reset_target(&self, target_branch: &str) -> Result<()>;
    fn delete_branch(&self, source_branch: &str) -> Result<()>;
    fn merge_source_to_target(&self, source_branch: &str) -> Result<()>;
    fn commit(&self) -> Result<()>;
    fn push(&self) -> Result<()>;
}

/// [`Controller`] backed by an [`Executor`], `git` on the system by default
#[derive(Debug)]
pub struct GitController<E = SystemExecutor> {
    executor: E,
    trace: TraceConfig,
}

impl GitController<SystemExecutor> {
    /// Run git in the current working directory of the process
    pub fn new() -> Self {
        Self::with_executor(SystemExecutor::new())
    }

    /// Run git inside `working_dir`
    pub fn in_dir<P: AsRef<Path>>(working_dir: P) -> Self {
        Self::with_executor(SystemExecutor::in_dir(working_dir))
    }
}

impl Default for GitController<SystemExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Executor> GitController<E> {
    pub fn with_executor(executor: E) -> Self {
        Self {
            executor,
            trace: TraceConfig::default(),
        }
    }

    pub fn with_trace(mut self, trace: TraceConfig) -> Self {
        self.trace = trace;
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Whether commands are traced before they run
    pub fn trace(&self) -> bool {
        self.trace.is_enabled()
    }

    pub fn set_trace(&mut self, enabled: bool) {
        self.trace.set_enabled(enabled);
    }

    pub fn trace_config(&self) -> &TraceConfig {
        &self.trace
    }

    pub fn trace_config_mut(&mut self) -> &mut TraceConfig {
        &mut self.trace
    }

    fn runner(&self) -> CommandRunner<'_> {
        CommandRunner::new(&self.executor, &self.trace)
    }
}

impl<E: Executor> Controller for GitController<E> {
    fn run_supplied_executable_with_args(&self, command: &[String]) -> Result<()> {
        operations::run_supplied_executable_with_args(&self.runner(), command)
    }

    fn which_git(&self) -> Result<PathBuf> {
        operations::which_git(&self.runner())
    }

    fn get_branch(&self) -> Result<String> {
        operations::get_branch(&self.runner())
    }

    fn get_ref_for_head(&self) -> Result<String> {
        operations::get_ref_for_head(&self.runner())
    }

    fn get_upstream_for_ref(&self, reference: &str) -> Result<String> {
        operations::get_upstream_for_ref(&self.runner(), reference)
    }

    fn get_tracking_branch(&self) -> Result<String> {
        operations::get_tracking_branch(&self.runner())
    }

    fn has_uncommitted_changes(&self) -> bool {
        operations::has_uncommitted_changes(&self.runner())
    }

    fn ref_is_ahead_behind(&self, reference: &str) -> Result<AheadBehind> {
        operations::ref_is_ahead_behind(&self.runner(), reference)
    }

    fn branch_is_ahead_of_origin(&self, branch: &str) -> Result<AheadOfOrigin> {
        operations::branch_is_ahead_of_origin(&self.runner(), branch)
    }

    fn is_inside_work_tree(&self) -> Result<bool> {
        operations::is_inside_work_tree(&self.runner())
    }

    fn get_top_level(&self) -> Result<String> {
        operations::get_top_level(&self.runner())
    }

    fn get_parent_commit(&self) -> Result<String> {
        operations::get_parent_commit(&self.runner())
    }

    fn get_head_commit(&self) -> Result<String> {
        operations::get_head_commit(&self.runner())
    }

    fn count_commits_with_gt_one_parent(
        &self,
        current_branch: &str,
        ancestor_commit: &str,
    ) -> Result<usize> {
        operations::count_commits_with_gt_one_parent(
            &self.runner(),
            current_branch,
            ancestor_commit,
        )
    }

    fn get_merge_base(&self, parent_commit: &str, target_branch: &str) -> Result<String> {
        operations::get_merge_base(&self.runner(), parent_commit, target_branch)
    }

    fn get_graph_to_head(
        &self,
        current_branch: &str,
        merge_target: &str,
        num_lines: usize,
    ) -> Result<String> {
        operations::get_graph_to_head(&self.runner(), current_branch, merge_target, num_lines)
    }

    fn get_last_commit_on_branch(&self, branch: &str) -> Result<String> {
        operations::get_last_commit_on_branch(&self.runner(), branch)
    }

    fn get_global_config_setting(&self, setting: &str) -> Result<String> {
        operations::get_global_config_setting(&self.runner(), setting)
    }

    fn get_config_setting(&self, setting: &str) -> Result<String> {
        operations::get_config_setting(&self.runner(), setting)
    }

    fn git_can_execute(&self) -> Result<()> {
        operations::git_can_execute(&self.runner())
    }

    fn checkout(&self, current_branch: &str, target_branch: &str) -> Result<()> {
        operations::checkout(&self.runner(), current_branch, target_branch)
    }

    fn fetch(&self, branch: &str) -> Result<()> {
        operations::fetch(&self.runner(), branch)
    }

    fn pull(&self, src_branch: &str, rebase: bool) -> Result<()> {
        operations::pull(&self.runner(), src_branch, rebase)
    }

    fn reset_target(&self, target_branch: &str) -> Result<()> {
        operations::reset_target(&self.runner(), target_branch)
    }

    fn delete_branch(&self, source_branch: &str) -> Result<()> {
        operations::delete_branch(&self.runner(), source_branch)
    }

    fn merge_source_to_target(&self, source_branch: &str) -> Result<()> {
        operations::merge_source_to_target(&self.runner(), source_branch)
    }

    fn commit(&self) -> Result<()> {
        operations::commit(&self.runner())
    }

    fn push(&self) -> Result<()> {
        operations::push(&self.runner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::fake::ScriptedExecutor;

    #[test]
    fn test_trace_toggle() {
        let mut controller = GitController::with_executor(ScriptedExecutor::succeeding(""));
        assert!(!controller.trace());

        controller.set_trace(true);
        controller.set_trace(true);
        assert!(controller.trace());

        controller.set_trace(false);
        assert!(!controller.trace());
    }

    #[test]
    fn test_usable_as_trait_object() {
        let controller = GitController::with_executor(ScriptedExecutor::succeeding("main\n"));
        let dynamic: &dyn Controller = &controller;

        assert_eq!(dynamic.get_branch().unwrap(), "main");
        assert_eq!(
            controller.executor().last_invocation().unwrap(),
            vec!["git", "rev-parse", "--abbrev-ref", "HEAD"]
        );
    }

    #[test]
    fn test_in_dir() {
        let controller = GitController::in_dir("/tmp/repo");
        assert_eq!(controller.executor().working_dir(), Some(Path::new("/tmp/repo")));
    }
}
