//! In-memory request log

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::history::{GatewayStats, LogEntry, RequestLog};
use crate::domain::routing::ModelRegistry;
use crate::domain::DomainError;

pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// Append-only request log that drops the oldest entries past `max_entries`
#[derive(Debug)]
pub struct InMemoryRequestLog {
    entries: RwLock<VecDeque<LogEntry>>,
    max_entries: usize,
    registry: Arc<ModelRegistry>,
}

impl InMemoryRequestLog {
    pub fn new(registry: Arc<ModelRegistry>, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            max_entries: max_entries.max(1),
            registry,
        }
    }

    pub fn with_defaults(registry: Arc<ModelRegistry>) -> Self {
        Self::new(registry, DEFAULT_MAX_ENTRIES)
    }
}

#[async_trait]
impl RequestLog for InMemoryRequestLog {
    async fn record(&self, entry: LogEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().map_err(|e| {
            DomainError::internal(format!("Failed to acquire write lock: {}", e))
        })?;

        entries.push_back(entry);
        while entries.len() > self.max_entries {
            entries.pop_front();
        }

        Ok(())
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<LogEntry>, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::internal(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn stats(&self) -> Result<GatewayStats, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::internal(format!("Failed to acquire read lock: {}", e))
        })?;

        let snapshot: Vec<LogEntry> = entries.iter().cloned().collect();
        Ok(GatewayStats::compute(&snapshot, &self.registry))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::internal(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries.len())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut entries = self.entries.write().map_err(|e| {
            DomainError::internal(format!("Failed to acquire write lock: {}", e))
        })?;

        entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::classification::{ClassifierMode, TaskType};
    use crate::domain::routing::ModelName;

    fn entry(id: &str, model: ModelName, cost: f64) -> LogEntry {
        LogEntry {
            request_id: id.to_string(),
            timestamp: Utc::now(),
            prompt_snippet: format!("prompt {}", id),
            classifier_mode: ClassifierMode::Heuristic,
            complexity_score: 2,
            task_type: TaskType::SimpleQa,
            routed_model: model,
            latency_ms: 100,
            cost,
        }
    }

    fn log(max_entries: usize) -> InMemoryRequestLog {
        InMemoryRequestLog::new(Arc::new(ModelRegistry::standard()), max_entries)
    }

    #[tokio::test]
    async fn test_list_is_newest_first_with_pagination() {
        let log = log(100);
        for id in ["a", "b", "c", "d"] {
            log.record(entry(id, ModelName::Gpt4oMini, 0.0001)).await.unwrap();
        }

        let ids = |entries: Vec<LogEntry>| -> Vec<String> {
            entries.into_iter().map(|e| e.request_id).collect()
        };

        assert_eq!(ids(log.list(2, 0).await.unwrap()), vec!["d", "c"]);
        assert_eq!(ids(log.list(2, 2).await.unwrap()), vec!["b", "a"]);
        assert!(log.list(10, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_oldest_entries_are_dropped_past_limit() {
        let log = log(2);
        for id in ["a", "b", "c"] {
            log.record(entry(id, ModelName::Gpt4oMini, 0.0001)).await.unwrap();
        }

        assert_eq!(log.count().await.unwrap(), 2);
        let listed = log.list(10, 0).await.unwrap();
        assert_eq!(listed[1].request_id, "b");
    }

    #[tokio::test]
    async fn test_stats_after_wraparound() {
        let log = log(2);
        log.record(entry("a", ModelName::Gpt4o, 0.01)).await.unwrap();
        log.record(entry("b", ModelName::Gpt4oMini, 0.000375)).await.unwrap();
        log.record(entry("c", ModelName::Gpt4oMini, 0.000375)).await.unwrap();

        let stats = log.stats().await.unwrap();

        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.model_usage.len(), 1);
        assert_eq!(stats.model_usage[0].model, ModelName::Gpt4oMini);
        assert_eq!(stats.savings_percent, 96.25);
    }

    #[tokio::test]
    async fn test_empty_stats_and_clear() {
        let log = log(10);
        assert_eq!(log.stats().await.unwrap().total_requests, 0);

        log.record(entry("a", ModelName::Gpt4o, 0.01)).await.unwrap();
        log.clear().await.unwrap();

        assert_eq!(log.count().await.unwrap(), 0);
    }
}
