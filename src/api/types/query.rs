use serde::Deserialize;

use super::ApiError;

pub const DEFAULT_LOGS_LIMIT: usize = 50;
pub const MAX_LOGS_LIMIT: usize = 200;

/// Pagination for `GET /logs`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LogsQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    DEFAULT_LOGS_LIMIT
}

impl Default for LogsQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LOGS_LIMIT,
            offset: 0,
        }
    }
}

impl LogsQuery {
    /// Reject a limit outside 1..=200
    pub fn validate(self) -> Result<Self, ApiError> {
        if self.limit == 0 || self.limit > MAX_LOGS_LIMIT {
            return Err(ApiError::bad_request(format!(
                "limit must be between 1 and {}",
                MAX_LOGS_LIMIT
            ))
            .with_param("limit"));
        }

        Ok(self)
    }
}
