//! c-lsp Language Server Protocol implementation.
//!
//! This crate provides the LSP server for C documents, wrapping
//! `c-lsp-core` with the tower-lsp framework.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         c-lsp-server                          │
//! │   tower-lsp wrapper, JSON-RPC over stdio or TCP               │
//! │                                                               │
//! │  ┌──────────────┐  ┌─────────────┐  ┌──────────────────────┐  │
//! │  │  server.rs   │  │ convert.rs  │  │   capabilities.rs    │  │
//! │  │LanguageServer│  │ Core ↔ LSP  │  │ Capability / encoding│  │
//! │  └──────┬───────┘  └──────┬──────┘  └──────────────────────┘  │
//! │         │                 │                                   │
//! │         └─────────────────┴─────────────────┐                 │
//! │                                             │                 │
//! │  ┌──────────────────────────────────────────▼──────────────┐  │
//! │  │                      c-lsp-core                         │  │
//! │  │            (Transport-agnostic analysis logic)          │  │
//! │  └─────────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use c_lsp_server::{ServerConfig, Transport};
//!
//! c_lsp_server::run_server(ServerConfig::default()).await?;
//! ```

pub mod capabilities;
pub mod config;
pub mod convert;
pub mod server;

pub use config::{ServerConfig, Transport};
pub use server::{CLanguageServer, run_server, serve};
