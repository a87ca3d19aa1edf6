use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::classification::{ClassifierMode, TaskType};
use crate::domain::gateway::RouteResponse;
use crate::domain::routing::ModelName;

/// Longest prompt snippet stored in a log entry
pub const SNIPPET_MAX_CHARS: usize = 120;

/// Compact record of one routed request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub prompt_snippet: String,
    pub classifier_mode: ClassifierMode,
    pub complexity_score: u8,
    pub task_type: TaskType,
    pub routed_model: ModelName,
    pub latency_ms: u64,
    pub cost: f64,
}

impl LogEntry {
    pub fn from_response(response: &RouteResponse) -> Self {
        Self {
            request_id: response.request_id.clone(),
            timestamp: response.timestamp,
            prompt_snippet: snippet(&response.prompt),
            classifier_mode: response.classification.classifier_mode(),
            complexity_score: response.classification.complexity_score(),
            task_type: response.classification.task_type(),
            routed_model: response.routing.model,
            latency_ms: response.response.latency_ms,
            cost: response.response.cost,
        }
    }
}

fn snippet(prompt: &str) -> String {
    if prompt.chars().count() > SNIPPET_MAX_CHARS {
        let head: String = prompt.chars().take(SNIPPET_MAX_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        prompt.to_string()
    }
}
