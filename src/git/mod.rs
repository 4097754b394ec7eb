pub mod controller;
pub mod executor;
pub mod fake;
pub mod operations;
pub mod parser;

// Re-export commonly used types
pub use controller::{Controller, GitController};
pub use executor::{CommandOutput, Executor, ExitStatus, Invocation, SystemExecutor};
pub use fake::ScriptedExecutor;
pub use operations::CommandRunner;
pub use parser::{AheadBehind, AheadOfOrigin};
