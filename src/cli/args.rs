use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, FileConfig};
use crate::error::Result;

#[derive(Parser, Debug, Default)]
#[command(name = "docgen")]
#[command(version, about = "Fold a codebase into merged developer documentation, one token-bounded chunk at a time")]
pub struct Args {
    /// Root of the source tree to document
    #[arg(long, env = "PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// API key for the completion service
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Where to write the merged documentation
    #[arg(short, long, env = "DOCGEN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Model identifier
    #[arg(long, env = "DOCGEN_MODEL")]
    pub model: Option<String>,

    /// Chat-completions API base URL
    #[arg(long, env = "DOCGEN_BASE_URL")]
    pub base_url: Option<String>,

    /// Tokens per chunk sent to the model
    #[arg(long)]
    pub input_tokens: Option<usize>,

    /// Response length cap per call
    #[arg(long)]
    pub max_response_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// TOML file with configuration overrides
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Collect and chunk only; print statistics without calling the model
    #[arg(long)]
    pub dry_run: bool,

    /// Debug-level diagnostics
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Warnings and errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Defaults, then the config file, then flags and environment.
    pub fn to_config(&self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(path) = &self.config {
            config = config.merge_file(FileConfig::load(path)?);
        }

        if let Some(dir) = &self.project_dir {
            config.project_dir = dir.clone();
        }
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(limit) = self.input_tokens {
            config.input_token_limit = limit;
        }
        if let Some(limit) = self.max_response_tokens {
            config.max_response_tokens = limit;
        }
        if let Some(t) = self.temperature {
            config.temperature = t;
        }
        if self.timeout.is_some() {
            config.timeout_secs = self.timeout;
        }

        Ok(config)
    }
}
