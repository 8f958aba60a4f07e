use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocgenError>;

#[derive(Debug, Error)]
pub enum DocgenError {
    #[error("OPENROUTER_API_KEY is not set (export it or add it to .env)")]
    MissingApiKey,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to load config file {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a single completion request.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("completion service returned no content")]
    EmptyResponse,

    #[error("invalid completion response: {0}")]
    InvalidResponse(String),
}
