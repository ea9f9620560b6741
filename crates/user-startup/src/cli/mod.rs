//! # CLI Layer
//!
//! The only place in the codebase that knows about terminal I/O, process exit
//! codes and argument parsing.
//!
//! 1. **Argument Parsing** (`setup.rs`): shell arguments to typed commands via clap
//! 2. **Context Setup and Dispatch** (`commands.rs`): logging, config directory,
//!    `initialize`, then one API call
//! 3. **Output Formatting** (`render.rs`): leveled messages and the entry table

mod commands;
mod render;
mod setup;

pub use commands::run;
