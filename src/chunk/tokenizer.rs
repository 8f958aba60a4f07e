//! Token-level chunking.
//!
//! The blob is encoded once with `cl100k_base` and cut into fixed windows of
//! token ids, so every chunk fits the model's input budget exactly. Windows
//! are a pure partition of the encoded sequence: no overlap, no gaps, and
//! only the last one may be short.

use tiktoken_rs::{cl100k_base, CoreBPE};

use crate::error::{DocgenError, Result};

pub type TokenId = u32;

/// Most tokens a window edge can cut into one multi-byte character.
const MAX_EDGE_TOKENS: usize = 3;

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// One window of the token sequence and its decoded text.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub index: usize,
    pub tokens: Vec<TokenId>,
    pub text: String,
}

impl Chunk {
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

pub struct Tokenizer {
    bpe: CoreBPE,
}

impl Tokenizer {
    pub fn cl100k() -> Result<Self> {
        let bpe = cl100k_base().map_err(|e| DocgenError::Tokenizer(e.to_string()))?;
        Ok(Self { bpe })
    }

    /// Special-token text is encoded as plain text.
    pub fn encode(&self, text: &str) -> Vec<TokenId> {
        self.bpe.encode_ordinary(text)
    }

    pub fn count(&self, text: &str) -> usize {
        self.encode(text).len()
    }

    /// Decode a token slice, replacing characters cut by the slice edges
    /// with U+FFFD instead of failing.
    pub fn decode(&self, tokens: &[TokenId]) -> String {
        if tokens.is_empty() {
            return String::new();
        }
        if let Ok(text) = self.bpe.decode(tokens.to_vec()) {
            return text;
        }

        for trimmed in 1..=(2 * MAX_EDGE_TOKENS) {
            for head in 0..=trimmed.min(MAX_EDGE_TOKENS) {
                let tail = trimmed - head;
                if tail > MAX_EDGE_TOKENS || head + tail >= tokens.len() {
                    continue;
                }
                let inner = &tokens[head..tokens.len() - tail];
                if let Ok(text) = self.bpe.decode(inner.to_vec()) {
                    let mut out = String::with_capacity(text.len() + 6);
                    if head > 0 {
                        out.push(REPLACEMENT);
                    }
                    out.push_str(&text);
                    if tail > 0 {
                        out.push(REPLACEMENT);
                    }
                    return out;
                }
            }
        }

        REPLACEMENT.to_string()
    }

    /// Partition `text` into windows of at most `max_tokens` tokens.
    pub fn split(&self, text: &str, max_tokens: usize) -> Result<Vec<Chunk>> {
        if max_tokens == 0 {
            return Err(DocgenError::InvalidConfig(
                "chunk size must be greater than zero".to_string(),
            ));
        }

        let tokens = self.encode(text);
        let chunks = tokens
            .chunks(max_tokens)
            .enumerate()
            .map(|(index, window)| Chunk {
                index,
                tokens: window.to_vec(),
                text: self.decode(window),
            })
            .collect();

        Ok(chunks)
    }
}
