pub mod settings;

pub use settings::{ConfigError, GitSettings, Settings, SinkKind, TraceSettings};
