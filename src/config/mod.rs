//! Startup configuration: runtime settings from the environment and the
//! monitored source list from a file.

pub mod app;
pub mod sources;

pub use app::{ConfigError, MonitorConfig};
pub use sources::{load_sources, Source};
