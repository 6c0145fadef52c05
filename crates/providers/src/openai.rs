//! LLM translation backend (OpenAI-compatible chat completions).

use crate::config::{ProviderConfig, API_KEY_VAR};
use crate::http::{build_client, status_error, transport_error};
use deck_core::language::display_name;
use deck_core::{Error, ProviderError, Translator};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// Translator backed by a chat completion model.
pub struct OpenAiTranslator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiTranslator {
    /// Create a translator. The credential is passed in explicitly; an empty
    /// key is rejected here, before any request is made.
    pub fn new(api_key: impl Into<String>, config: &ProviderConfig) -> Result<Self, Error> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::MissingCredential {
                provider: "OpenAI".to_string(),
                variable: API_KEY_VAR.to_string(),
            });
        }

        Ok(Self {
            client: build_client(config)?,
            api_key,
            base_url: config.effective_base_url().trim_end_matches('/').to_string(),
            model: config.effective_model().to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Translator for OpenAiTranslator {
    fn name(&self) -> &str {
        "OpenAI"
    }

    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let prompt = system_prompt(source_lang, target_lang);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(transport_error)?;

        if !(200..300).contains(&status) {
            return Err(status_error(status, &body));
        }

        parse_response(&body)
    }
}

/// Instruction sent ahead of every text.
pub fn system_prompt(source_lang: &str, target_lang: &str) -> String {
    format!(
        "You are a professional translator. Translate the following text from {} to {}. \
         Preserve meaning and tone. Return only the translated text, no explanations or additional text.",
        display_name(source_lang),
        display_name(target_lang)
    )
}

/// Take the first choice of a chat completion response.
pub fn parse_response(body: &str) -> Result<String, ProviderError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ProviderError::EmptyResponse)?;

    let content = content.trim();
    if content.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    Ok(content.to_string())
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}
