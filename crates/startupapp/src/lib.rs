//! # user-startup Architecture
//!
//! user-startup registers shell commands to run when the current user logs in, on
//! whatever mechanism the host OS offers. Like its CLI, this crate is layered so
//! the core never assumes a terminal.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (user-startup crate)                             │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - add / list / remove / open / doctor                      │
//! │  - Keeps registry and OS artifacts in step                  │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                                │
//!                 ▼                                ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Storage Layer (store/)       │ │  Platform Layer           │
//! │  - RegistryStore trait        │ │  (platform/)              │
//! │  - FileStore, InMemoryStore   │ │  - Launcher trait         │
//! └───────────────────────────────┘ │  - Platform, MemLauncher  │
//!                                   └───────────────────────────┘
//! ```
//!
//! The registry is the source of truth; OS artifacts are derived from it. After any
//! operation completes, every registry entry has exactly one artifact and every
//! artifact this tool owns has an entry.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: unit tests against `InMemoryStore` and `MemLauncher`.
//! 2. **Store and platform**: tempdir-backed tests of the real file formats.
//! 3. **API**: dispatch tests only.
//! 4. **CLI**: end-to-end runs of the binary against a temporary config directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`store`]: Registry abstraction and implementations
//! - [`platform`]: OS adapters that install and remove login artifacts
//! - [`model`]: `Entry` and id derivation
//! - [`config`]: Configuration management
//! - [`init`]: Resolves the config directory and wires everything together
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod platform;
pub mod store;
