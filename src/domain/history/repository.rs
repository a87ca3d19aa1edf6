use std::fmt::Debug;

use async_trait::async_trait;

use super::{GatewayStats, LogEntry};
use crate::domain::DomainError;

/// Store for routed-request history
#[async_trait]
pub trait RequestLog: Send + Sync + Debug {
    /// Append an entry
    async fn record(&self, entry: LogEntry) -> Result<(), DomainError>;

    /// Entries newest first, skipping `offset` and returning at most `limit`
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<LogEntry>, DomainError>;

    /// Aggregate statistics over every stored entry
    async fn stats(&self) -> Result<GatewayStats, DomainError>;

    /// Number of stored entries
    async fn count(&self) -> Result<usize, DomainError>;

    /// Remove every entry
    async fn clear(&self) -> Result<(), DomainError>;
}
