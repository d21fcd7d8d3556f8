//! CLI command handlers. Each command is in its own file.

mod compare;
mod digest;
mod fetch;
mod seq;

pub use compare::run_compare;
pub use digest::run_digest;
pub use fetch::run_fetch;
pub use seq::run_seq;
