//! OpenAI-compatible chat adapter for the naming core.
//!
//! Talks to any endpoint that speaks the `chat/completions` shape (OpenAI,
//! OpenRouter, a local llama.cpp or Ollama server, ...).

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use sab_core::{
    chat::{ChatClient, ChatRequest, ChatResponse},
    config::{Config, RenameConfig},
    errors::Error,
    NameGenerator, Result,
};

static SHARED: OnceCell<NameGenerator> = OnceCell::const_new();

#[derive(Clone, Debug)]
pub struct OpenAiChatClient {
    endpoint: String,
    api_key: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl OpenAiChatClient {
    pub fn new(cfg: &RenameConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        // Zero means no client-side deadline; cancellation still applies.
        if !cfg.timeout.is_zero() {
            builder = builder.timeout(cfg.timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("http client build failed: {e}")))?;

        Ok(Self {
            endpoint: cfg.endpoint.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout,
            http,
        })
    }

    async fn send(&self, req: &ChatRequest) -> Result<ChatResponse> {
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(req)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.request_error(e))?;
        debug!(%status, bytes = body.len(), "chat completion response");

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    fn request_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout(self.timeout)
        } else {
            Error::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(
        &self,
        req: ChatRequest,
        cancel: &CancellationToken,
    ) -> Result<ChatResponse> {
        tokio::select! {
          biased;
          _ = cancel.cancelled() => Err(Error::Cancelled),
          resp = self.send(&req) => resp,
        }
    }
}

/// Build a generator backed by [`OpenAiChatClient`].
pub fn generator(cfg: RenameConfig) -> Result<NameGenerator> {
    let client = OpenAiChatClient::new(&cfg)?;
    Ok(NameGenerator::new(cfg, Arc::new(client)))
}

/// Process-wide generator, built from [`Config::load`] on first use.
///
/// Concurrent first callers wait on a single initialization. If loading the
/// config fails, the error is returned and the next caller tries again.
pub async fn shared() -> Result<&'static NameGenerator> {
    SHARED
        .get_or_try_init(|| async {
            let cfg = Config::load()?;
            info!(
                enabled = cfg.ai_rename.enabled,
                model = %cfg.ai_rename.model,
                "initializing shared name generator"
            );
            generator(cfg.ai_rename)
        })
        .await
}

/// Install an explicitly built generator as the shared instance.
///
/// Fails if [`shared`] already initialized one.
pub fn install_shared(generator: NameGenerator) -> Result<&'static NameGenerator> {
    SHARED.set(generator).map_err(|_| {
        Error::Config("shared name generator is already initialized".to_string())
    })?;
    SHARED
        .get()
        .ok_or_else(|| Error::External("shared name generator vanished".to_string()))
}
