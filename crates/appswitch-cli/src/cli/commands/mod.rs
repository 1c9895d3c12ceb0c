//! CLI command handlers, one per file.

mod completions;
mod drivers;
mod open;

pub use completions::run_completions;
pub use drivers::run_drivers;
pub use open::run_open;
