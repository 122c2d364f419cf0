pub mod client;
pub mod types;

pub use client::ChatClient;
pub use types::{ApiError, ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatRole};
