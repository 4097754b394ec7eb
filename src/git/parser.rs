use crate::error::{GitError, Result};
use regex::Regex;
use std::sync::LazyLock;

macro_rules! lazy_regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($pattern).unwrap());
    };
}

// for-each-ref --format=%(upstream:track): [ahead 2, behind 3]
lazy_regex!(RE_TRACK_AHEAD, r"\[.*ahead (\d+).*\]");
lazy_regex!(RE_TRACK_BEHIND, r"\[.*behind (\d+).*\]");

// branch -vv: * main abc1234 [origin/main: ahead 2] Commit message
lazy_regex!(RE_CURRENT_BRANCH, r"^\*\s");
lazy_regex!(RE_CURRENT_UPSTREAM, r"^\*\s+\S+\s+\S+\s+\[([^\]:]+)");
lazy_regex!(RE_LISTED_BRANCH, r"^\*?\s+(\S+)\s+");
lazy_regex!(RE_LISTED_UPSTREAM, r"^\*?\s+\S+\s+\S+\s+\[");
lazy_regex!(RE_LISTED_AHEAD, r"^\*?\s+\S+\s+\S+\s+\[[^\]]+: ahead\s+(\d+)[^\]]*\]");

const NOT_A_REPOSITORY: &str = "fatal: Not a git repository";

/// Commits on a ref and its upstream that the other lacks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AheadBehind {
    pub ahead: usize,
    pub behind: usize,
}

/// Whether a branch is ahead of its tracking branch, with the matched count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AheadOfOrigin {
    pub ahead: bool,
    /// The commit count as printed by git; empty when not ahead
    pub proof: String,
}

/// Split captured output into lines, in order
pub fn lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines()
}

/// First line of the output, or `NoOutput(on_empty)` when there is none
pub fn first_line<'a>(output: &'a str, on_empty: &str) -> Result<&'a str> {
    lines(output)
        .next()
        .ok_or_else(|| GitError::NoOutput(on_empty.to_string()))
}

/// First line of the output with surrounding whitespace removed
pub fn parse_single_value(output: &str, on_empty: &str) -> Result<String> {
    first_line(output, on_empty).map(|line| line.trim().to_string())
}

/// Parse `rev-list --count` output
pub fn parse_count(output: &str, ancestor_commit: &str) -> Result<usize> {
    let line = first_line(
        output,
        &format!("Failed to identify path from {} to head.", ancestor_commit),
    )?;
    Ok(line.trim().parse::<usize>()?)
}

/// Parse `rev-parse --is-inside-work-tree` output
pub fn parse_work_tree_flag(output: &str) -> Result<bool> {
    let line = first_line(output, "No output from git command.")?;

    match line {
        "true" => Ok(true),
        "false" => Ok(false),
        _ if line.starts_with(NOT_A_REPOSITORY) => Ok(false),
        _ => Err(GitError::Unrecognized(line.to_string())),
    }
}

/// Parse `for-each-ref --format=%(upstream:track)` output
///
/// Either count may be missing; a line with neither yields zeros.
pub fn parse_ahead_behind(output: &str) -> Result<AheadBehind> {
    let line = first_line(
        output,
        "No output while determining branch ahead/behind tracking branch.",
    )?;

    let count = |re: &Regex| {
        re.captures(line)
            .and_then(|caps| caps[1].parse::<usize>().ok())
            .unwrap_or(0)
    };

    Ok(AheadBehind {
        ahead: count(&*RE_TRACK_AHEAD),
        behind: count(&*RE_TRACK_BEHIND),
    })
}

/// Parse `for-each-ref --format=%(upstream:short)` output for `reference`
pub fn parse_upstream_short(output: &str, reference: &str) -> Result<String> {
    let line = first_line(
        output,
        &format!("Could not identify upstream for ref {}", reference),
    )?
    .trim();

    if line.is_empty() {
        return Err(GitError::UpstreamUnresolved(reference.to_string()));
    }
    Ok(line.to_string())
}

/// Find the upstream of the current branch in `branch -vv` output
pub fn parse_tracking_branch(output: &str) -> Result<String> {
    for line in lines(output) {
        if let Some(caps) = RE_CURRENT_UPSTREAM.captures(line) {
            return Ok(caps[1].to_string());
        }
        if RE_CURRENT_BRANCH.is_match(line) {
            return Err(GitError::NoUpstream(line.to_string()));
        }
    }
    Err(GitError::UpstreamNotFound)
}

/// Check whether `branch` is ahead of its upstream in `branch -vv` output
pub fn parse_ahead_of_origin(output: &str, branch: &str) -> Result<AheadOfOrigin> {
    let listed = lines(output).find(|line| {
        RE_LISTED_BRANCH
            .captures(line)
            .is_some_and(|caps| &caps[1] == branch)
    });

    let Some(line) = listed else {
        return Err(GitError::BranchNotListed(output.to_string()));
    };

    if !RE_LISTED_UPSTREAM.is_match(line) {
        return Err(GitError::NoTrackingBranch);
    }

    Ok(match RE_LISTED_AHEAD.captures(line) {
        Some(caps) => AheadOfOrigin {
            ahead: true,
            proof: caps[1].to_string(),
        },
        None => AheadOfOrigin::default(),
    })
}

/// Join `log --graph` output back together, keeping at most `max_lines` lines
pub fn parse_graph(output: &str, max_lines: usize) -> String {
    lines(output).take(max_lines).collect::<Vec<_>>().join("\n")
}
