mod openrouter;

pub use openrouter::OpenRouterClient;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::{CompletionError, DocgenError, Result};

/// One prompt in, one generated text out. A single request per call.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, prompt: &str) -> std::result::Result<String, CompletionError>;
}

/// Request parameters shared by every call of a run.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub app_title: String,
    pub timeout_secs: Option<u64>,
}

impl CompletionConfig {
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key().ok_or(DocgenError::MissingApiKey)?;
        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_response_tokens,
            app_title: config.app_title.clone(),
            timeout_secs: config.timeout_secs,
        })
    }
}

pub fn create_completer(config: &Config) -> Result<Box<dyn Completer>> {
    let completion = CompletionConfig::from_config(config)?;
    Ok(Box::new(OpenRouterClient::new(completion)?))
}
