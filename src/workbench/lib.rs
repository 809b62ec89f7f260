//! # Workbench Architecture
//!
//! Workbench is a **UI-agnostic library** for two pieces of desktop editor
//! plumbing: markdown outlines (table of contents and document symbols) and
//! user-data profiles kept in a key/value state store. The CLI is one client
//! of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, parses loose inputs           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Returns CmdResult values with messages                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────┐  ┌──────────────────────────┐
//! │  outline/                    │  │  profiles/               │
//! │  TOC, slugs, symbol tree     │  │  service, join events    │
//! └──────────────────────────────┘  └──────────────────────────┘
//!                                                │
//!                                                ▼
//!                                   ┌──────────────────────────┐
//!                                   │  store/                  │
//!                                   │  FsBackend, MemBackend   │
//!                                   └──────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process;
//! diagnostics go through the `log` facade and the binary decides where they
//! end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per command family
//! - [`outline`]: Table of contents and document symbols from markdown
//! - [`profiles`]: Profile model, lifecycle events and service
//! - [`store`]: State store abstraction and implementations
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod outline;
pub mod profiles;
pub mod store;
