use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::Result;

use super::types::{ChatRequest, ChatResponse};

/// Hexagonal port for a chat-completion backend.
///
/// Implementations own transport concerns: sending the request, racing it
/// against `cancel`, rejecting non-2xx statuses and decoding the body.
/// Interpreting the decoded payload (error object, empty choices) is left to
/// [`ChatResponse::into_candidate`] so every backend fails the same way.
///
/// Implementations must be safe to share between concurrent callers.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, req: ChatRequest, cancel: &CancellationToken)
        -> Result<ChatResponse>;
}
