use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Completer, CompletionConfig};
use crate::error::{CompletionError, DocgenError, Result};

/// OpenAI-compatible chat-completions client (OpenRouter by default).
pub struct OpenRouterClient {
    endpoint: String,
    config: CompletionConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
    code: Option<u16>,
}

impl OpenRouterClient {
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| DocgenError::InvalidConfig(format!("API key: {}", e)))?;
        headers.insert(AUTHORIZATION, bearer);
        let title = HeaderValue::from_str(&config.app_title)
            .map_err(|e| DocgenError::InvalidConfig(format!("app title: {}", e)))?;
        headers.insert("x-title", title);

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| DocgenError::Completion(CompletionError::Http(e)))?;

        Ok(Self {
            endpoint: format!(
                "{}/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            config,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }
}

/// Extract the generated text from a response body.
fn parse_response(status: u16, body: &str) -> std::result::Result<String, CompletionError> {
    if !(200..300).contains(&status) {
        return Err(CompletionError::Api {
            status,
            body: body.to_string(),
        });
    }

    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

    // OpenRouter reports some upstream failures inside a 200 body.
    if let Some(error) = response.error {
        return Err(CompletionError::Api {
            status: error.code.unwrap_or(status),
            body: error.message,
        });
    }

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(CompletionError::EmptyResponse)
}

#[async_trait]
impl Completer for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> std::result::Result<String, CompletionError> {
        let request = self.build_request(prompt);
        debug!(
            "POST {} model={} prompt_bytes={}",
            self.endpoint,
            self.config.model,
            prompt.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_response(status, &body)
    }
}
