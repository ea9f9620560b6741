//! # user-startup CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/startupapp/`: the library. Registry, platform adapters, commands.
//! - `crates/user-startup/`: this CLI, a client of the `startupapp` API facade.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/user-startup/src/cli/)                   │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Logging, context wiring and dispatch (commands.rs)       │
//! │  - Terminal rendering (render.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/startupapp/src/api.rs)                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from the API inward returns `Result<CmdResult>` and never prints.
//! The CLI owns stdout, stderr and exit codes.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
