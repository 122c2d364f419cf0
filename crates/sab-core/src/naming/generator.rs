use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::{
    chat::{ChatClient, ChatMessage, ChatRequest},
    config::RenameConfig,
    errors::Error,
    Result,
};

use super::{
    prompt::{build_file_prompt, build_folder_prompt},
    sanitize::{sanitize_name, FILE_NAME_MAX_LEN, FOLDER_NAME_MAX_LEN},
};

/// What is being named. Drives the prompt, the length cap and extension handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameKind {
    File,
    Folder,
}

impl NameKind {
    pub fn max_len(self) -> usize {
        match self {
            NameKind::File => FILE_NAME_MAX_LEN,
            NameKind::Folder => FOLDER_NAME_MAX_LEN,
        }
    }

    fn label(self) -> &'static str {
        match self {
            NameKind::File => "file",
            NameKind::Folder => "folder",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameSource {
    /// The model's suggestion, sanitized.
    Generated,
    /// The caller's original/default name, returned unchanged.
    Original,
}

/// Result of a naming request.
///
/// `name` is always usable, even when `error` is set: failures fall back to
/// the caller's name and the error is only there to be logged or surfaced.
#[derive(Debug)]
pub struct NameOutcome {
    pub name: String,
    pub source: NameSource,
    pub error: Option<Error>,
}

impl NameOutcome {
    fn generated(name: String) -> Self {
        Self {
            name,
            source: NameSource::Generated,
            error: None,
        }
    }

    fn original(name: &str) -> Self {
        Self {
            name: name.to_string(),
            source: NameSource::Original,
            error: None,
        }
    }

    fn failed(name: &str, err: Error) -> Self {
        Self {
            name: name.to_string(),
            source: NameSource::Original,
            error: Some(err),
        }
    }

    pub fn is_generated(&self) -> bool {
        self.source == NameSource::Generated
    }

    /// Split into the `(name, error)` pair.
    pub fn into_parts(self) -> (String, Option<Error>) {
        (self.name, self.error)
    }
}

/// Asks a chat model for descriptive file and folder names.
///
/// Cheap to share: config and client are reference-counted and read-only, so
/// any number of tasks may call into one generator at once.
#[derive(Clone)]
pub struct NameGenerator {
    cfg: Arc<RenameConfig>,
    client: Arc<dyn ChatClient>,
}

impl std::fmt::Debug for NameGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameGenerator")
            .field("enabled", &self.cfg.enabled)
            .field("endpoint", &self.cfg.endpoint)
            .field("model", &self.cfg.model)
            .finish_non_exhaustive()
    }
}

impl NameGenerator {
    pub fn new(cfg: impl Into<Arc<RenameConfig>>, client: Arc<dyn ChatClient>) -> Self {
        Self {
            cfg: cfg.into(),
            client,
        }
    }

    pub fn config(&self) -> &RenameConfig {
        &self.cfg
    }

    /// Suggest a new name for a file, keeping its extension.
    ///
    /// Returns `original_file_name` untouched (and makes no request) when
    /// renaming is disabled or `message_text` is empty.
    pub async fn generate_file_name(
        &self,
        cancel: &CancellationToken,
        message_text: &str,
        original_file_name: &str,
    ) -> NameOutcome {
        if !self.cfg.enabled || message_text.is_empty() {
            return NameOutcome::original(original_file_name);
        }

        let (base, ext) = split_extension(original_file_name);
        let prompt = build_file_prompt(&self.cfg, message_text, base);

        let raw = match self.suggest(cancel, prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(original = original_file_name, "AI rename failed: {e}");
                return NameOutcome::failed(original_file_name, e);
            }
        };

        let mut name = sanitize_name(&raw, NameKind::File.max_len());
        if name.is_empty() {
            warn!(
                original = original_file_name,
                attempted = %raw,
                "AI returned empty filename, using original"
            );
            return NameOutcome::original(original_file_name);
        }

        if !name.ends_with(ext) {
            name.push_str(ext);
        }

        info!("AI renamed file: {original_file_name} -> {name}");
        NameOutcome::generated(name)
    }

    /// Suggest a folder name (media groups, albums). No extension handling.
    pub async fn generate_folder_name(
        &self,
        cancel: &CancellationToken,
        message_text: &str,
        default_name: &str,
    ) -> NameOutcome {
        if !self.cfg.enabled || message_text.is_empty() {
            return NameOutcome::original(default_name);
        }

        let prompt = build_folder_prompt(&self.cfg, message_text, default_name);

        let raw = match self.suggest(cancel, prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(original = default_name, "AI folder rename failed: {e}");
                return NameOutcome::failed(default_name, e);
            }
        };

        let name = sanitize_name(&raw, NameKind::Folder.max_len());
        if name.is_empty() {
            warn!(
                original = default_name,
                attempted = %raw,
                "AI returned empty folder name, using default"
            );
            return NameOutcome::original(default_name);
        }

        info!("AI renamed folder: {default_name} -> {name}");
        NameOutcome::generated(name)
    }

    /// Dispatch on `kind`; handy for callers that decide at runtime.
    pub async fn generate(
        &self,
        kind: NameKind,
        cancel: &CancellationToken,
        message_text: &str,
        name: &str,
    ) -> NameOutcome {
        tracing::debug!(kind = kind.label(), "generating name");
        match kind {
            NameKind::File => self.generate_file_name(cancel, message_text, name).await,
            NameKind::Folder => self.generate_folder_name(cancel, message_text, name).await,
        }
    }

    async fn suggest(&self, cancel: &CancellationToken, prompt: String) -> Result<String> {
        let req = self.build_request(prompt);
        let resp = self.client.complete(req, cancel).await?;
        resp.into_candidate()
    }

    fn build_request(&self, prompt: String) -> ChatRequest {
        ChatRequest {
            model: self.cfg.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: Some(self.cfg.max_tokens).filter(|n| *n > 0),
            temperature: Some(self.cfg.temperature).filter(|t| *t != 0.0),
        }
    }
}

/// Split `name` into `(base, ext)` where `ext` starts at the last `.` of the
/// final path segment. `ext` is empty when that segment has no dot.
pub fn split_extension(name: &str) -> (&str, &str) {
    let seg_start = name.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);
    match name[seg_start..].rfind('.') {
        Some(dot) => name.split_at(seg_start + dot),
        None => (name, ""),
    }
}
