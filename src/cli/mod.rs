mod args;
mod run;
mod theme;

pub use args::Args;
pub use run::{prepare, run, run_with, Prepared};
pub use theme::{print_error, print_success, print_warning};
