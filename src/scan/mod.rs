mod filter;
mod walker;

pub use filter::is_source_file;
pub use walker::collect_sources;
