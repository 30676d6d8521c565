use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AzureOpenAiSettings;
use crate::domain::{
    CompletionProvider, DomainError, FinishReason, GenerationRequest, GenerationResponse,
    Message, MessageRole, Usage,
};
use crate::infrastructure::http::{HttpCallError, HttpClientTrait};

const PROVIDER_NAME: &str = "azure_openai";

/// Azure OpenAI chat completion provider. Deployment-addressed endpoints,
/// `api-key` header authentication.
#[derive(Debug)]
pub struct AzureOpenAiProvider<C: HttpClientTrait> {
    client: C,
    settings: AzureOpenAiSettings,
}

impl<C: HttpClientTrait> AzureOpenAiProvider<C> {
    pub fn new(client: C, settings: AzureOpenAiSettings) -> Self {
        Self { client, settings }
    }

    fn build_url(&self, deployment: &str) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.settings.endpoint.trim_end_matches('/'),
            deployment,
            self.settings.api_version
        )
    }

    fn build_request(&self, request: &GenerationRequest) -> serde_json::Value {
        let messages: Vec<AzureMessage> = request
            .messages
            .iter()
            .map(AzureMessage::from_domain)
            .collect();

        let mut body = serde_json::json!({
            "messages": messages,
            "stream": false,
        });

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        if let Some(top_p) = request.top_p {
            body["top_p"] = serde_json::json!(top_p);
        }

        if let Some(ref stop) = request.stop {
            body["stop"] = serde_json::json!(stop);
        }

        if let Some(presence_penalty) = request.presence_penalty {
            body["presence_penalty"] = serde_json::json!(presence_penalty);
        }

        if let Some(frequency_penalty) = request.frequency_penalty {
            body["frequency_penalty"] = serde_json::json!(frequency_penalty);
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("api-key", self.settings.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<GenerationResponse, DomainError> {
        let response: AzureResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider(PROVIDER_NAME, format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider(PROVIDER_NAME, "No choices in response"))?;

        let message = Message::assistant(choice.message.content.unwrap_or_default());

        let mut generation = GenerationResponse::new(response.id, response.model, message);

        if let Some(reason) = choice.finish_reason {
            generation = generation.with_finish_reason(parse_finish_reason(&reason));
        }

        if let Some(usage) = response.usage {
            generation = generation.with_usage(Usage::new(
                usage.prompt_tokens,
                usage.completion_tokens,
            ));
        }

        Ok(generation)
    }
}

/// Translate an HTTP failure into the domain taxonomy. Quota exhaustion and
/// rate limiting both arrive as 429; the error body tells them apart.
pub(crate) fn map_http_error(provider: &'static str, error: HttpCallError) -> DomainError {
    match error {
        HttpCallError::Status { status: 429, body } => {
            if body.contains("quota") || body.contains("insufficient_quota") {
                DomainError::quota_exceeded(provider)
            } else {
                DomainError::rate_limited(provider)
            }
        }
        other => DomainError::provider(provider, other.to_string()),
    }
}

#[async_trait]
impl<C: HttpClientTrait> CompletionProvider for AzureOpenAiProvider<C> {
    async fn complete(
        &self,
        deployment: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, DomainError> {
        let url = self.build_url(deployment);
        let body = self.build_request(&request);

        let response = self
            .client
            .post_json(&url, self.headers(), &body)
            .await
            .map_err(|e| map_http_error(PROVIDER_NAME, e))?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

fn parse_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    }
}

// Azure OpenAI API types

#[derive(Debug, Serialize)]
struct AzureMessage {
    role: String,
    content: String,
}

impl AzureMessage {
    fn from_domain(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };

        Self {
            role: role.to_string(),
            content: message.content().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AzureResponse {
    id: String,
    model: String,
    choices: Vec<AzureChoice>,
    usage: Option<AzureUsage>,
}

#[derive(Debug, Deserialize)]
struct AzureChoice {
    message: AzureResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AzureResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AzureUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
