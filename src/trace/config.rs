use crate::git::executor::Invocation;
use crate::trace::sink::{StderrSink, TraceSink};
use std::fmt;
use std::sync::Arc;

/// Prefix placed before every traced command line
pub const DEFAULT_PREFIX: &str = "Running: ";

/// Controls whether commands are reported before they run, and where
///
/// Tracing starts disabled. Toggling it only affects commands dispatched
/// afterwards.
#[derive(Clone)]
pub struct TraceConfig {
    enabled: bool,
    prefix: String,
    sink: Arc<dyn TraceSink>,
}

impl TraceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `sink` instead of the stderr logger
    pub fn with_sink<S: TraceSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn enable(&mut self) {
        self.set_enabled(true);
    }

    pub fn disable(&mut self) {
        self.set_enabled(false);
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    pub fn set_sink<S: TraceSink + 'static>(&mut self, sink: S) {
        self.sink = Arc::new(sink);
    }

    pub fn set_shared_sink(&mut self, sink: Arc<dyn TraceSink>) {
        self.sink = sink;
    }

    /// Report `invocation` to the sink; does nothing at all while disabled
    pub fn emit(&self, invocation: &Invocation) {
        if !self.enabled {
            return;
        }
        self.sink.emit(&format!("{}{}", self.prefix, invocation));
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            prefix: DEFAULT_PREFIX.to_string(),
            sink: Arc::new(StderrSink),
        }
    }
}

impl fmt::Debug for TraceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceConfig")
            .field("enabled", &self.enabled)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
