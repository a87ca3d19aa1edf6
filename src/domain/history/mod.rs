//! Request history domain - per-request log entries and aggregate statistics

mod entry;
mod repository;
mod stats;

pub use entry::{LogEntry, SNIPPET_MAX_CHARS};
pub use repository::RequestLog;
pub use stats::{GatewayStats, ModelUsageStat};
