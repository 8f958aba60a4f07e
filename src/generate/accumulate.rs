//! Sequential fold of chunks into one merged document.
//!
//! Each prompt embeds the output of the previous call, so calls run strictly
//! one after another. A failed call contributes an empty "previous" value to
//! the next prompt and the run carries on.

use log::{debug, warn};

use crate::chunk::Chunk;
use crate::error::CompletionError;
use crate::llm::Completer;

use super::prompt::build_prompt;

#[derive(Debug, Clone)]
pub struct ChunkFailure {
    pub index: usize,
    pub error: String,
}

/// Result of folding every chunk.
#[derive(Debug, Clone, Default)]
pub struct Accumulation {
    /// Output of the last call; empty if there were no chunks or it failed.
    pub output: String,
    /// Completion calls made.
    pub steps: usize,
    pub failures: Vec<ChunkFailure>,
}

impl Accumulation {
    pub fn succeeded(&self) -> usize {
        self.steps - self.failures.len()
    }
}

/// Fold `chunks` through `completer` in index order.
///
/// `on_step` runs once per chunk, after its call returns.
pub async fn accumulate<C, F>(chunks: &[Chunk], completer: &C, mut on_step: F) -> Accumulation
where
    C: Completer + ?Sized,
    F: FnMut(usize, &Result<String, CompletionError>),
{
    let mut acc = Accumulation::default();

    for chunk in chunks {
        let prompt = build_prompt(chunk.index, &acc.output, &chunk.text);
        debug!(
            "chunk {}: {} tokens, prompt {} bytes",
            chunk.index + 1,
            chunk.token_count(),
            prompt.len()
        );

        let result = completer.complete(&prompt).await;
        acc.steps += 1;
        on_step(chunk.index, &result);

        acc.output = match result {
            Ok(text) => text,
            Err(e) => {
                warn!("chunk {} failed: {}", chunk.index + 1, e);
                acc.failures.push(ChunkFailure {
                    index: chunk.index,
                    error: e.to_string(),
                });
                String::new()
            }
        };
    }

    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Records every prompt and answers "doc N", failing on chosen calls.
    struct StubCompleter {
        prompts: Mutex<Vec<String>>,
        fail_on: HashSet<usize>,
    }

    impl StubCompleter {
        fn new(fail_on: &[usize]) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                fail_on: fail_on.iter().copied().collect(),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Completer for StubCompleter {
        async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
            let mut prompts = self.prompts.lock().unwrap();
            let call = prompts.len();
            prompts.push(prompt.to_string());
            if self.fail_on.contains(&call) {
                Err(CompletionError::Api {
                    status: 500,
                    body: "boom".to_string(),
                })
            } else {
                Ok(format!("doc {}", call))
            }
        }
    }

    fn chunks(n: usize) -> Vec<Chunk> {
        (0..n)
            .map(|index| Chunk {
                index,
                tokens: vec![index as u32],
                text: format!("chunk-body-{}", index),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_calls_once_per_chunk_in_order() {
        let stub = StubCompleter::new(&[]);
        let mut seen = Vec::new();

        let acc = accumulate(&chunks(4), &stub, |i, _| seen.push(i)).await;

        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(acc.steps, 4);
        assert_eq!(acc.output, "doc 3");
        assert!(acc.failures.is_empty());

        let prompts = stub.prompts();
        assert_eq!(prompts.len(), 4);
        for (i, prompt) in prompts.iter().enumerate() {
            assert!(prompt.contains(&format!("chunk-body-{}", i)));
        }
    }

    #[tokio::test]
    async fn test_previous_output_feeds_next_prompt() {
        let stub = StubCompleter::new(&[]);
        accumulate(&chunks(3), &stub, |_, _| {}).await;

        let prompts = stub.prompts();
        assert!(prompts[0].contains("(none yet)"));
        assert!(prompts[1].contains("doc 0"));
        assert!(prompts[2].contains("doc 1"));
        assert!(!prompts[2].contains("doc 0"));
    }

    #[tokio::test]
    async fn test_failure_leaves_empty_previous_and_continues() {
        let stub = StubCompleter::new(&[1]);
        let mut outcomes = Vec::new();

        let acc = accumulate(&chunks(3), &stub, |_, r| outcomes.push(r.is_ok())).await;

        assert_eq!(outcomes, vec![true, false, true]);
        assert_eq!(acc.steps, 3);
        assert_eq!(acc.succeeded(), 2);
        assert_eq!(acc.failures.len(), 1);
        assert_eq!(acc.failures[0].index, 1);
        assert_eq!(acc.output, "doc 2");

        let prompts = stub.prompts();
        assert!(prompts[2].contains("(none yet)"));
        assert!(!prompts[2].contains("doc 0"));
    }

    #[tokio::test]
    async fn test_last_failure_gives_empty_output() {
        let stub = StubCompleter::new(&[1]);
        let acc = accumulate(&chunks(2), &stub, |_, _| {}).await;
        assert_eq!(acc.output, "");
        assert_eq!(acc.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_no_chunks_no_calls() {
        let stub = StubCompleter::new(&[]);
        let mut calls = 0;
        let acc = accumulate(&[], &stub, |_, _| calls += 1).await;

        assert_eq!(calls, 0);
        assert_eq!(acc.steps, 0);
        assert_eq!(acc.output, "");
        assert!(stub.prompts().is_empty());
    }
}
