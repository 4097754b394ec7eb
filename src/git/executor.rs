use crate::error::{GitError, Result};
use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A fully built command line: program name followed by its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    argv: Vec<String>,
}

impl Invocation {
    /// Build an invocation from a complete argument vector
    pub fn new<I, S>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        if argv.is_empty() {
            return Err(GitError::EmptyCommand);
        }
        Ok(Self { argv })
    }

    /// Build a `git` invocation with the given arguments
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = vec!["git".to_string()];
        argv.extend(args.into_iter().map(Into::into));
        Self { argv }
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    /// Program and arguments, in order
    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

/// How a process finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    code: Option<i32>,
}

impl ExitStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// A process that was terminated before producing an exit code
    pub fn terminated() -> Self {
        Self { code: None }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {}", code),
            None => write!(f, "signal: terminated"),
        }
    }
}

/// Combined stdout and stderr of a finished process
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub text: String,
    pub status: ExitStatus,
}

impl CommandOutput {
    pub fn new(text: impl Into<String>, status: ExitStatus) -> Self {
        Self {
            text: text.into(),
            status,
        }
    }

    /// Turn a non-zero exit into `GitError::CommandFailed`, keeping the text
    pub fn into_result(self) -> Result<String> {
        if self.status.success() {
            Ok(self.text)
        } else {
            Err(GitError::CommandFailed {
                status: self.status,
                output: self.text,
            })
        }
    }
}

/// Runs invocations as external processes
///
/// Operations only ever talk to this trait, so tests can swap in
/// [`ScriptedExecutor`](crate::git::fake::ScriptedExecutor) instead of the real `git`.
pub trait Executor {
    /// Run with stdin, stdout and stderr inherited from the caller
    fn run_loudly(&self, invocation: &Invocation) -> Result<ExitStatus>;

    /// Run to completion, capturing stdout and stderr as one stream
    fn combined_output(&self, invocation: &Invocation) -> Result<CommandOutput>;

    /// Resolve a program name to an executable path
    fn locate(&self, program: &str) -> Result<PathBuf> {
        find_executable(program, &search_path())
            .ok_or_else(|| GitError::ExecutableNotFound(program.to_string()))
    }
}

impl<E: Executor + ?Sized> Executor for &E {
    fn run_loudly(&self, invocation: &Invocation) -> Result<ExitStatus> {
        (**self).run_loudly(invocation)
    }

    fn combined_output(&self, invocation: &Invocation) -> Result<CommandOutput> {
        (**self).combined_output(invocation)
    }

    fn locate(&self, program: &str) -> Result<PathBuf> {
        (**self).locate(program)
    }
}

/// Executes commands with `std::process`
#[derive(Debug, Clone, Default)]
pub struct SystemExecutor {
    working_dir: Option<PathBuf>,
}

impl SystemExecutor {
    /// Run commands in the current working directory of the process
    pub fn new() -> Self {
        Self::default()
    }

    /// Run commands inside the given directory
    pub fn in_dir<P: AsRef<Path>>(working_dir: P) -> Self {
        Self {
            working_dir: Some(working_dir.as_ref().to_path_buf()),
        }
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    fn command(&self, invocation: &Invocation) -> Command {
        let mut command = Command::new(invocation.program());
        command.args(invocation.args());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

fn spawn_error(invocation: &Invocation, source: io::Error) -> GitError {
    GitError::Spawn {
        program: invocation.program().to_string(),
        source,
    }
}

impl Executor for SystemExecutor {
    fn run_loudly(&self, invocation: &Invocation) -> Result<ExitStatus> {
        let status = self
            .command(invocation)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| spawn_error(invocation, e))?;

        Ok(status.into())
    }

    fn combined_output(&self, invocation: &Invocation) -> Result<CommandOutput> {
        // Both streams share one pipe so their interleaving is preserved
        let (mut reader, writer) = io::pipe()?;

        let mut command = self.command(invocation);
        command
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);

        let mut child = command.spawn().map_err(|e| spawn_error(invocation, e))?;
        // The command still holds write ends of the pipe; reading would never hit EOF
        drop(command);

        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let status = child.wait()?;

        Ok(CommandOutput::new(
            String::from_utf8_lossy(&bytes).into_owned(),
            status.into(),
        ))
    }
}

/// Directories listed in `PATH`
pub fn search_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Find `program` in `dirs`; names containing a path separator are checked as given
pub fn find_executable(program: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let as_given = Path::new(program);
    if as_given.components().count() > 1 {
        return is_executable(as_given).then(|| as_given.to_path_buf());
    }

    dirs.iter().find_map(|dir| {
        candidate_names(program)
            .into_iter()
            .map(|name| dir.join(name))
            .find(|candidate| is_executable(candidate))
    })
}

#[cfg(windows)]
fn candidate_names(program: &str) -> Vec<String> {
    vec![program.to_string(), format!("{}.exe", program)]
}

#[cfg(not(windows))]
fn candidate_names(program: &str) -> Vec<String> {
    vec![program.to_string()]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
