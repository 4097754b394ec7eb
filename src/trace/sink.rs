use chrono::Local;

/// Receives one rendered line per traced command
pub trait TraceSink: Send + Sync {
    fn emit(&self, line: &str);
}

impl<F> TraceSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, line: &str) {
        self(line)
    }
}

/// Writes timestamped lines to stderr, like a plain process logger
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl StderrSink {
    /// Render `line` with the local timestamp prefix
    pub fn format_line(line: &str) -> String {
        format!("{} {}", Local::now().format("%Y/%m/%d %H:%M:%S"), line)
    }
}

impl TraceSink for StderrSink {
    fn emit(&self, line: &str) {
        eprintln!("{}", Self::format_line(line));
    }
}

/// Forwards lines as `tracing` events, leaving formatting to the subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn emit(&self, line: &str) {
        tracing::info!(target: "gitops_shell", "{}", line);
    }
}
