use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Recognised prompt task categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    #[serde(alias = "simple_qa")]
    SimpleQa,
    Translation,
    Code,
    Analysis,
    Creative,
    Math,
    Reasoning,
    General,
}

impl TaskType {
    /// Every category, in declaration order
    pub const ALL: [TaskType; 8] = [
        TaskType::SimpleQa,
        TaskType::Translation,
        TaskType::Code,
        TaskType::Analysis,
        TaskType::Creative,
        TaskType::Math,
        TaskType::Reasoning,
        TaskType::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SimpleQa => "simple-qa",
            Self::Translation => "translation",
            Self::Code => "code",
            Self::Analysis => "analysis",
            Self::Creative => "creative",
            Self::Math => "math",
            Self::Reasoning => "reasoning",
            Self::General => "general",
        }
    }

    /// Lenient lookup used for external replies: case-insensitive, `_` and `-`
    /// are interchangeable
    pub fn parse_lenient(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|t| t.as_str() == normalized)
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s)
            .ok_or_else(|| DomainError::validation(format!("Unknown task type '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_separators() {
        assert_eq!(TaskType::parse_lenient("simple-qa"), Some(TaskType::SimpleQa));
        assert_eq!(TaskType::parse_lenient("simple_qa"), Some(TaskType::SimpleQa));
        assert_eq!(TaskType::parse_lenient("  CODE "), Some(TaskType::Code));
        assert_eq!(TaskType::parse_lenient("poetry"), None);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("weather".parse::<TaskType>().is_err());
        assert_eq!("math".parse::<TaskType>().unwrap(), TaskType::Math);
    }

    #[test]
    fn test_serialization_is_kebab_case() {
        let json = serde_json::to_string(&TaskType::SimpleQa).unwrap();
        assert_eq!(json, "\"simple-qa\"");

        let parsed: TaskType = serde_json::from_str("\"simple_qa\"").unwrap();
        assert_eq!(parsed, TaskType::SimpleQa);
    }
}
