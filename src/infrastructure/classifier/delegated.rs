//! Classifier that delegates scoring to an external text service

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::classification::{
    ClassificationResult, Classifier, ClassifierBackend, ClassifierMode, TaskType,
};
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::routing::round_to;
use crate::domain::DomainError;

const DEFAULT_SCORE: i64 = 5;
const DEFAULT_CONFIDENCE: f64 = 0.8;
const DEFAULT_REASONING: &str = "LLM classification";
const BLANK_REASONING: &str = "LLM classification (no reasoning provided)";

const MAX_TOKENS: u32 = 300;
const TEMPERATURE: f32 = 0.3;

/// Classifier backed by an `LlmProvider`
#[derive(Debug, Clone)]
pub struct DelegatedClassifier {
    provider: Arc<dyn LlmProvider>,
    backend: ClassifierBackend,
    model: String,
}

impl DelegatedClassifier {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        backend: ClassifierBackend,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            backend,
            model: model.into(),
        }
    }

    pub fn backend(&self) -> ClassifierBackend {
        self.backend
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, text: &str) -> LlmRequest {
        LlmRequest::builder()
            .system(system_instruction())
            .user(format!("Classify this prompt:\n\n{}", text))
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
            .build()
    }
}

#[async_trait]
impl Classifier for DelegatedClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult, DomainError> {
        debug!(
            backend = %self.backend,
            model = %self.model,
            "Delegating classification"
        );

        let request = self.build_request(text);

        let response = self
            .provider
            .chat(&self.model, request)
            .await
            .map_err(|e| {
                warn!(backend = %self.backend, error = %e, "Classifier backend call failed");
                DomainError::classifier_unavailable(self.backend.as_str(), e.to_string())
            })?;

        parse_reply(response.content())
    }

    fn mode(&self) -> ClassifierMode {
        ClassifierMode::Delegated
    }
}

/// Instruction sent with every delegated classification
pub fn system_instruction() -> String {
    let categories: Vec<&str> = TaskType::ALL.iter().map(|t| t.as_str()).collect();

    format!(
        r#"You are a prompt complexity classifier for an AI gateway.

Given a user prompt, analyze it and return a JSON object with exactly these fields:

{{
  "complexity_score": <integer 1-10>,
  "task_type": "<one of: {}>",
  "reasoning": "<1-2 sentence explanation of why you assigned this score and type>",
  "confidence": <float 0.0-1.0>
}}

Scoring guidelines:
- 1-3: Simple factual questions, definitions, basic translations, yes/no questions
- 4-6: Moderate tasks like standard code generation, creative writing, straightforward analysis
- 7-10: Complex multi-step reasoning, advanced math, system design, nuanced long-form analysis

Task type definitions:
- simple-qa: Factual questions, definitions, lookups
- translation: Language translation requests
- code: Programming, debugging, code generation
- analysis: Comparing, evaluating, critiquing, reviewing
- creative: Poetry, stories, essays, artistic writing
- math: Calculations, proofs, equations, statistics
- reasoning: Logic, philosophy, thought experiments, complex explanations
- general: Anything that doesn't fit the above categories

IMPORTANT: Return ONLY the raw JSON object, no markdown fences, no extra text."#,
        categories.join(", ")
    )
}

/// Parse a structured classification reply.
///
/// Missing or malformed fields fall back to defaults; only an unparsable
/// or non-object reply is an error.
pub fn parse_reply(raw: &str) -> Result<ClassificationResult, DomainError> {
    let cleaned = strip_fences(raw);

    let value: Value = serde_json::from_str(&cleaned).map_err(|e| {
        warn!("Failed to parse classifier reply: {} - Reply: {}", e, raw);
        DomainError::classification(format!("Classifier returned invalid JSON: {}", e), raw)
    })?;

    let Value::Object(fields) = value else {
        return Err(DomainError::classification(
            "Classifier reply is not a JSON object",
            raw,
        ));
    };

    let score = field(&fields, &["complexity_score", "score"])
        .and_then(as_integer)
        .unwrap_or(DEFAULT_SCORE);

    let task_type = field(&fields, &["task_type", "category"])
        .and_then(Value::as_str)
        .and_then(TaskType::parse_lenient)
        .unwrap_or(TaskType::General);

    let confidence = field(&fields, &["confidence"])
        .and_then(as_float)
        .unwrap_or(DEFAULT_CONFIDENCE);
    let confidence = round_to(confidence.clamp(0.0, 1.0), 2);

    let reasoning = match field(&fields, &["reasoning", "rationale"]) {
        None | Some(Value::Null) => DEFAULT_REASONING.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => BLANK_REASONING.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    Ok(ClassificationResult::new(
        score,
        task_type,
        confidence,
        reasoning,
        ClassifierMode::Delegated,
    ))
}

/// Remove markdown code fence lines around a reply
fn strip_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    trimmed
        .lines()
        .filter(|line| !line.trim().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn field<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| fields.get(*name))
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

fn as_float(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;

    fn classifier(provider: MockLlmProvider) -> DelegatedClassifier {
        DelegatedClassifier::new(Arc::new(provider), ClassifierBackend::Anthropic, "claude-haiku")
    }

    #[test]
    fn test_parse_well_formed_reply() {
        let raw = r#"{"complexity_score": 7, "task_type": "reasoning", "reasoning": "Multi-step logic", "confidence": 0.9}"#;

        let result = parse_reply(raw).unwrap();

        assert_eq!(result.complexity_score(), 7);
        assert_eq!(result.task_type(), TaskType::Reasoning);
        assert_eq!(result.reasoning(), "Multi-step logic");
        assert_eq!(result.confidence(), 0.9);
        assert_eq!(result.classifier_mode(), ClassifierMode::Delegated);
    }

    #[test]
    fn test_parse_fenced_reply() {
        let raw = "```json\n{\"complexity_score\": 3, \"task_type\": \"simple_qa\"}\n```";

        let result = parse_reply(raw).unwrap();

        assert_eq!(result.complexity_score(), 3);
        assert_eq!(result.task_type(), TaskType::SimpleQa);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let result = parse_reply("{}").unwrap();

        assert_eq!(result.complexity_score(), 5);
        assert_eq!(result.task_type(), TaskType::General);
        assert_eq!(result.confidence(), 0.8);
        assert_eq!(result.reasoning(), "LLM classification");
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let raw = r#"{"complexity_score": 42, "task_type": "poetry", "confidence": 3.5, "reasoning": "  "}"#;

        let result = parse_reply(raw).unwrap();

        assert_eq!(result.complexity_score(), 10);
        assert_eq!(result.task_type(), TaskType::General);
        assert_eq!(result.confidence(), 1.0);
        assert_eq!(result.reasoning(), "LLM classification (no reasoning provided)");
    }

    #[test]
    fn test_alias_keys_and_string_numbers() {
        let raw = r#"{"score": "8", "category": "Math", "rationale": "proof", "confidence": "0.456"}"#;

        let result = parse_reply(raw).unwrap();

        assert_eq!(result.complexity_score(), 8);
        assert_eq!(result.task_type(), TaskType::Math);
        assert_eq!(result.reasoning(), "proof");
        assert_eq!(result.confidence(), 0.46);
    }

    #[test]
    fn test_non_numeric_score_falls_back() {
        let result = parse_reply(r#"{"complexity_score": "high"}"#).unwrap();
        assert_eq!(result.complexity_score(), 5);
    }

    #[test]
    fn test_malformed_reply_carries_raw_text() {
        let raw = "I think this is a 7 out of 10";

        let err = parse_reply(raw).unwrap_err();

        assert!(matches!(err, DomainError::ClassificationError { .. }));
        assert_eq!(err.raw_reply(), Some(raw));
    }

    #[test]
    fn test_non_object_reply_is_error() {
        let err = parse_reply("[1, 2, 3]").unwrap_err();
        assert_eq!(err.raw_reply(), Some("[1, 2, 3]"));
    }

    #[test]
    fn test_system_instruction_lists_categories() {
        let instruction = system_instruction();

        for task_type in TaskType::ALL {
            assert!(instruction.contains(task_type.as_str()));
        }
        assert!(instruction.contains("no markdown fences"));
    }

    #[tokio::test]
    async fn test_classify_sends_instruction_and_prompt() {
        let provider = Arc::new(MockLlmProvider::new("anthropic").with_text(
            r#"{"complexity_score": 2, "task_type": "translation", "reasoning": "basic", "confidence": 0.95}"#,
        ));
        let classifier = DelegatedClassifier::new(
            provider.clone(),
            ClassifierBackend::Anthropic,
            "claude-haiku",
        );

        let result = classifier.classify("Translate hello into French").await.unwrap();

        assert_eq!(result.task_type(), TaskType::Translation);
        assert_eq!(result.complexity_score(), 2);

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "claude-haiku");
        assert_eq!(requests[0].1.max_tokens, Some(300));
        assert!(requests[0].1.system_text().is_some());
        assert_eq!(
            requests[0].1.conversation().next().map(|m| m.content.as_str()),
            Some("Classify this prompt:\n\nTranslate hello into French")
        );
    }

    #[tokio::test]
    async fn test_provider_failure_is_classifier_unavailable() {
        let classifier = classifier(MockLlmProvider::new("anthropic").with_error("HTTP 401"));

        let err = classifier.classify("anything").await.unwrap_err();

        match err {
            DomainError::ClassifierUnavailable { backend, message } => {
                assert_eq!(backend, "anthropic");
                assert!(message.contains("HTTP 401"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_reply_propagates() {
        let classifier = classifier(MockLlmProvider::new("anthropic").with_text("not json"));

        let err = classifier.classify("anything").await.unwrap_err();

        assert_eq!(err.raw_reply(), Some("not json"));
    }
}
