pub mod config;
pub mod history;
pub mod sink;

pub use config::{DEFAULT_PREFIX, TraceConfig};
pub use history::HistoryFileSink;
pub use sink::{StderrSink, TraceSink, TracingSink};
