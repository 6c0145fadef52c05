//! Provider configuration.
//!
//! Values come from the environment (after `.env` is loaded by the binary)
//! and from command-line overrides. The configuration is read once and
//! passed explicitly to the provider constructors.

use deck_core::ProviderKind;
use std::time::Duration;

/// Preferred variable for the LLM credential.
pub const API_KEY_VAR: &str = "PROVIDER_API_KEY";
/// Fallback variable for the LLM credential.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_VAR: &str = "OPENAI_MODEL";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

pub const DEFAULT_GOOGLE_BASE_URL: &str = "https://translate.googleapis.com";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Default timeout for translation requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause before each free-web request, to stay under its throttling.
const DEFAULT_GOOGLE_DELAY: Duration = Duration::from_millis(500);

/// Settings for building a translator.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,

    /// Credential for the LLM backend.
    pub api_key: Option<String>,

    /// Override for the backend's base URL.
    pub base_url: Option<String>,

    /// Model name for the LLM backend.
    pub model: Option<String>,

    pub timeout: Duration,

    /// Delay before each request. `None` uses the backend default.
    pub request_delay: Option<Duration>,

    pub temperature: f32,
    pub max_tokens: u32,
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            api_key: None,
            base_url: None,
            model: None,
            timeout: DEFAULT_TIMEOUT,
            request_delay: None,
            temperature: 0.3,
            max_tokens: 1024,
        }
    }

    /// Build a configuration from process environment variables.
    pub fn from_env(kind: ProviderKind) -> Self {
        Self::from_lookup(kind, |name| std::env::var(name).ok())
    }

    /// Build a configuration from any variable lookup.
    pub fn from_lookup(kind: ProviderKind, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(kind);
        config.api_key = non_empty(API_KEY_VAR).or_else(|| non_empty(OPENAI_API_KEY_VAR));
        if kind == ProviderKind::OpenAi {
            config.model = non_empty(MODEL_VAR);
            config.base_url = non_empty(BASE_URL_VAR);
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = Some(delay);
        self
    }

    pub fn effective_base_url(&self) -> &str {
        match (&self.base_url, self.kind) {
            (Some(url), _) => url.as_str(),
            (None, ProviderKind::Google) => DEFAULT_GOOGLE_BASE_URL,
            (None, ProviderKind::OpenAi) => DEFAULT_OPENAI_BASE_URL,
        }
    }

    pub fn effective_model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_OPENAI_MODEL)
    }

    pub fn effective_request_delay(&self) -> Duration {
        self.request_delay.unwrap_or(match self.kind {
            ProviderKind::Google => DEFAULT_GOOGLE_DELAY,
            ProviderKind::OpenAi => Duration::ZERO,
        })
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(ProviderKind::default())
    }
}
