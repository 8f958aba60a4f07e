mod accumulate;
mod prompt;

pub use accumulate::{accumulate, Accumulation, ChunkFailure};
pub use prompt::build_prompt;
