use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_TOKENS: u32 = 100;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Process configuration for the naming service.
///
/// Only the AI rename section lives here; storage, Telegram and hook settings
/// belong to the host application.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub ai_rename: RenameConfig,
}

/// Settings for model-assisted file and folder naming.
///
/// When `enabled` is false every other field is ignored and the generator is
/// a pass-through.
#[derive(Clone, Debug, PartialEq)]
pub struct RenameConfig {
    pub enabled: bool,
    /// OpenAI-compatible chat completion URL (the full path, not a base URL).
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    /// Custom prompt with two `%s` slots: message text, then original name.
    /// Empty means the built-in templates.
    pub prompt_template: String,
    /// Zero disables the client timeout.
    pub timeout: Duration,
    /// Zero omits `max_tokens` from the request.
    pub max_tokens: u32,
    /// Zero omits `temperature` from the request.
    pub temperature: f32,
    /// Language the built-in templates ask for. `None` leaves it to the model.
    pub language: Option<String>,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            prompt_template: String::new(),
            timeout: DEFAULT_TIMEOUT,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            language: None,
        }
    }
}

impl Config {
    /// Load from the process environment, seeding it from `./.env` first.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (env, test maps, ...).
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ai_rename = RenameConfig::from_lookup(&get);
        ai_rename.validate()?;
        Ok(Self { ai_rename })
    }
}

impl RenameConfig {
    pub fn from_lookup<F>(get: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();

        let api_key = get("AI_RENAME_API_KEY")
            .and_then(non_empty)
            .or_else(|| get("OPENAI_API_KEY").and_then(non_empty))
            .unwrap_or_default();

        Self {
            enabled: parse_bool(get("AI_RENAME_ENABLE")).unwrap_or(d.enabled),
            endpoint: get("AI_RENAME_ENDPOINT")
                .map(|s| s.trim().to_string())
                .unwrap_or(d.endpoint),
            model: get("AI_RENAME_MODEL")
                .map(|s| s.trim().to_string())
                .unwrap_or(d.model),
            api_key,
            prompt_template: get("AI_RENAME_PROMPT").unwrap_or_default(),
            timeout: parse_u64(get("AI_RENAME_TIMEOUT_MS"))
                .map(Duration::from_millis)
                .unwrap_or(d.timeout),
            max_tokens: parse_u32(get("AI_RENAME_MAX_TOKENS")).unwrap_or(d.max_tokens),
            temperature: parse_f32(get("AI_RENAME_TEMPERATURE")).unwrap_or(d.temperature),
            language: get("AI_RENAME_LANGUAGE").and_then(non_empty),
        }
    }

    /// Check the fields a live request depends on. Disabled configs always pass.
    pub fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::Config(format!(
                "AI_RENAME_ENDPOINT must be an http(s) URL, got {endpoint:?}"
            )));
        }
        if self.model.trim().is_empty() {
            return Err(Error::Config(
                "AI_RENAME_MODEL is required when AI rename is enabled".to_string(),
            ));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(Error::Config(format!(
                "AI_RENAME_TEMPERATURE must be a non-negative number, got {}",
                self.temperature
            )));
        }

        Ok(())
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim().trim_start_matches("export ").trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn parse_bool(v: Option<String>) -> Option<bool> {
    v.map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn parse_u64(v: Option<String>) -> Option<u64> {
    v.and_then(|s| s.trim().parse::<u64>().ok())
}

fn parse_u32(v: Option<String>) -> Option<u32> {
    v.and_then(|s| s.trim().parse::<u32>().ok())
}

fn parse_f32(v: Option<String>) -> Option<f32> {
    v.and_then(|s| s.trim().parse::<f32>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn empty_env_yields_disabled_defaults() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.ai_rename, RenameConfig::default());
        assert!(!cfg.ai_rename.enabled);
    }

    #[test]
    fn reads_all_rename_fields() {
        let cfg = Config::from_lookup(lookup(&[
            ("AI_RENAME_ENABLE", "yes"),
            ("AI_RENAME_ENDPOINT", " http://localhost:8080/v1/chat/completions "),
            ("AI_RENAME_MODEL", "qwen2.5"),
            ("AI_RENAME_API_KEY", "sk-test"),
            ("AI_RENAME_PROMPT", "name %s from %s"),
            ("AI_RENAME_TIMEOUT_MS", "1500"),
            ("AI_RENAME_MAX_TOKENS", "64"),
            ("AI_RENAME_TEMPERATURE", "0.2"),
            ("AI_RENAME_LANGUAGE", "Chinese"),
        ]))
        .unwrap();

        let r = cfg.ai_rename;
        assert!(r.enabled);
        assert_eq!(r.endpoint, "http://localhost:8080/v1/chat/completions");
        assert_eq!(r.model, "qwen2.5");
        assert_eq!(r.api_key, "sk-test");
        assert_eq!(r.prompt_template, "name %s from %s");
        assert_eq!(r.timeout, Duration::from_millis(1500));
        assert_eq!(r.max_tokens, 64);
        assert!((r.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(r.language.as_deref(), Some("Chinese"));
    }

    #[test]
    fn api_key_falls_back_to_openai_key() {
        let r = RenameConfig::from_lookup(&lookup(&[
            ("AI_RENAME_API_KEY", "  "),
            ("OPENAI_API_KEY", "sk-shared"),
        ]));
        assert_eq!(r.api_key, "sk-shared");
    }

    #[test]
    fn unparsable_numbers_keep_defaults() {
        let r = RenameConfig::from_lookup(&lookup(&[
            ("AI_RENAME_TIMEOUT_MS", "soon"),
            ("AI_RENAME_MAX_TOKENS", "-1"),
        ]));
        assert_eq!(r.timeout, DEFAULT_TIMEOUT);
        assert_eq!(r.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn validation_only_applies_when_enabled() {
        let disabled = RenameConfig {
            endpoint: "not a url".to_string(),
            model: String::new(),
            ..RenameConfig::default()
        };
        assert!(disabled.validate().is_ok());

        let enabled = RenameConfig {
            enabled: true,
            ..disabled
        };
        assert!(matches!(enabled.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn enabled_config_requires_model() {
        let r = RenameConfig {
            enabled: true,
            model: " ".to_string(),
            ..RenameConfig::default()
        };
        let err = r.validate().unwrap_err().to_string();
        assert!(err.contains("AI_RENAME_MODEL"));
    }

    #[test]
    fn dotenv_parsing_strips_quotes_and_comments() {
        let parsed = parse_dotenv(
            "# comment\nAI_RENAME_ENABLE=true\nexport AI_RENAME_MODEL=\"gpt-4o\"\nbroken line\nAI_RENAME_PROMPT='x %s y %s'\n",
        );
        assert_eq!(
            parsed,
            vec![
                ("AI_RENAME_ENABLE".to_string(), "true".to_string()),
                ("AI_RENAME_MODEL".to_string(), "gpt-4o".to_string()),
                ("AI_RENAME_PROMPT".to_string(), "x %s y %s".to_string()),
            ]
        );
    }
}
