//! Translation backends for the slide-deck translator.
//!
//! Both backends implement [`deck_core::Translator`]; callers pick one with
//! [`build_translator`] and never see which is active.

pub mod config;
pub mod google;
mod http;
pub mod openai;

pub use config::ProviderConfig;
pub use google::GoogleTranslator;
pub use openai::OpenAiTranslator;

use deck_core::{Error, ProviderKind, Result, Translator};

/// Build the translator selected by `config`.
///
/// Fails with [`Error::MissingCredential`] when the LLM backend is selected
/// without an API key, so the run stops before any request is sent.
pub fn build_translator(config: &ProviderConfig) -> Result<Box<dyn Translator>> {
    match config.kind {
        ProviderKind::Google => {
            log::debug!("Using free web translation at {}", config.effective_base_url());
            Ok(Box::new(GoogleTranslator::new(config)?))
        }
        ProviderKind::OpenAi => {
            let api_key = config.api_key.clone().ok_or_else(|| Error::MissingCredential {
                provider: "OpenAI".to_string(),
                variable: config::API_KEY_VAR.to_string(),
            })?;
            let translator = OpenAiTranslator::new(api_key, config)?;
            log::debug!(
                "Using {} model {} at {}",
                translator.name(),
                translator.model(),
                config.effective_base_url()
            );
            Ok(Box::new(translator))
        }
    }
}
