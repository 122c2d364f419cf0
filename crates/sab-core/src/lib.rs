//! Core logic for AI-assisted file and folder naming in the SaveAny bot.
//!
//! This crate is intentionally transport-agnostic. The chat-completion
//! backend lives behind the [`chat::ChatClient`] port, implemented in adapter
//! crates (`sab-openai`).

pub mod chat;
pub mod config;
pub mod errors;
pub mod logging;
pub mod naming;

pub use errors::{Error, Result};
pub use naming::{NameGenerator, NameKind, NameOutcome};
