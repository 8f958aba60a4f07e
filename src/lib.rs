//! Fold a source tree into merged developer documentation.
//!
//! Sources are collected, encoded once with `cl100k_base` and cut into
//! token-bounded chunks. Each chunk is sent to a chat-completion model together
//! with the documentation produced for the chunk before it, and the last
//! response is written out as the merged document.

pub mod chunk;
pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod generate;
pub mod llm;
pub mod scan;
pub mod types;

pub use chunk::{Chunk, Tokenizer};
pub use config::Config;
pub use error::{CompletionError, DocgenError, Result};
pub use generate::{accumulate, build_prompt, Accumulation};
pub use llm::{create_completer, Completer, OpenRouterClient};
pub use scan::collect_sources;
pub use types::{SourceBlob, SourceFile};
