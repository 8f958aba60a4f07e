mod tokenizer;

pub use tokenizer::{Chunk, TokenId, Tokenizer};
