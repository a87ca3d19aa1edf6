use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::http_client::HttpClientTrait;
use crate::domain::llm::{LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage};
use crate::domain::DomainError;

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anthropic messages API adapter
#[derive(Debug)]
pub struct AnthropicProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
}

impl<C: HttpClientTrait> AnthropicProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_ANTHROPIC_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            api_key: api_key.into(),
            base_url,
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> Value {
        let messages: Vec<AnthropicMessage> = request
            .conversation()
            .map(AnthropicMessage::from_domain)
            .collect();

        let mut body = json!({
            "model": model,
            "messages": messages,
            "max_tokens": request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        });

        if let Some(system) = request.system_text() {
            body["system"] = json!(system);
        }

        if let Some(temp) = request.temperature {
            body["temperature"] = json!(temp);
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("x-api-key", self.api_key.as_str()),
            ("anthropic-version", ANTHROPIC_VERSION),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: Value) -> Result<LlmResponse, DomainError> {
        let response: AnthropicResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("anthropic", format!("Failed to parse response: {}", e))
        })?;

        let content = response
            .content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        let usage = Usage::new(response.usage.input_tokens, response.usage.output_tokens);

        Ok(LlmResponse::new(response.id, response.model, Message::assistant(content))
            .with_usage(usage))
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for AnthropicProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.messages_url();
        let body = self.build_request(model, &request);
        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

impl AnthropicMessage {
    fn from_domain(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::Assistant => "assistant",
            _ => "user",
        };

        Self {
            role,
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    id: String,
    model: String,
    content: Vec<AnthropicContentBlock>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct AnthropicContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "https://api.anthropic.com/v1/messages";

    fn message_reply(text: &str) -> Value {
        json!({
            "id": "msg_123",
            "type": "message",
            "role": "assistant",
            "model": "claude-3-5-sonnet-20241022",
            "content": [{ "type": "text", "text": text }],
            "stop_reason": "end_turn",
            "usage": { "input_tokens": 12, "output_tokens": 30 }
        })
    }

    #[tokio::test]
    async fn test_anthropic_chat() {
        let client = MockHttpClient::new().with_response(TEST_URL, message_reply("Hello!"));
        let provider = AnthropicProvider::new(client, "test-api-key");

        let request = LlmRequest::builder().user("Hi").build();
        let response = provider
            .chat("claude-3-5-sonnet-20241022", request)
            .await
            .unwrap();

        assert_eq!(response.id, "msg_123");
        assert_eq!(response.content(), "Hello!");
        assert_eq!(response.usage.unwrap().total_tokens, 42);
    }

    #[tokio::test]
    async fn test_system_messages_move_to_top_level() {
        let client = MockHttpClient::new().with_response(TEST_URL, message_reply("{}"));
        let provider = AnthropicProvider::new(client, "key");

        let request = LlmRequest::builder()
            .system("You are a classifier")
            .user("Classify this")
            .max_tokens(300)
            .build();
        provider.chat("claude-haiku", request).await.unwrap();

        let sent = provider.client.sent();
        let (_, headers, body) = &sent[0];

        assert!(headers.contains(&("x-api-key".to_string(), "key".to_string())));
        assert_eq!(body["system"], "You are a classifier");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["max_tokens"], 300);
    }

    #[tokio::test]
    async fn test_default_max_tokens() {
        let client = MockHttpClient::new().with_response(TEST_URL, message_reply("ok"));
        let provider = AnthropicProvider::new(client, "key");

        provider
            .chat("claude-haiku", LlmRequest::builder().user("x").build())
            .await
            .unwrap();

        let sent = provider.client.sent();
        assert_eq!(sent[0].2["max_tokens"], 4096);
        assert!(sent[0].2.get("system").is_none());
    }

    #[tokio::test]
    async fn test_anthropic_error_handling() {
        let client = MockHttpClient::new().with_error(TEST_URL, "HTTP 401 Unauthorized");
        let provider = AnthropicProvider::new(client, "bad-key");

        let result = provider
            .chat("claude-haiku", LlmRequest::builder().user("x").build())
            .await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }
}
