mod args;
mod commands;
mod handlers;
pub mod presentation;
pub mod types;

pub use args::{Cli, usage};
pub use commands::run;
