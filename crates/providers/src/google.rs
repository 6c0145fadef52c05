//! Free web translation backend (Google's public `gtx` endpoint).

use crate::config::ProviderConfig;
use crate::http::{build_client, status_error, transport_error};
use deck_core::{Error, ProviderError, Translator};
use reqwest::blocking::Client;
use serde_json::Value;
use std::thread;
use std::time::Duration;

/// Translator backed by the free Google Translate web endpoint.
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
    delay: Duration,
}

impl GoogleTranslator {
    pub fn new(config: &ProviderConfig) -> Result<Self, Error> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.effective_base_url().trim_end_matches('/').to_string(),
            delay: config.effective_request_delay(),
        })
    }
}

impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "Google Translate"
    }

    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        let url = format!("{}/translate_a/single", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(match status {
                400 => bad_request_error(source_lang, target_lang, &body),
                _ => status_error(status, &body),
            });
        }

        let body: Value = response
            .json()
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        parse_response(&body)
    }
}

/// A 400 means an unknown language only when the body says so; an overlong
/// query string is rejected with the same status.
fn bad_request_error(source_lang: &str, target_lang: &str, body: &str) -> ProviderError {
    if body.to_lowercase().contains("language") {
        ProviderError::UnsupportedLanguage(format!("{} -> {}", source_lang, target_lang))
    } else {
        status_error(400, body)
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The body is `[[["<translated>", "<original>", ...], ...], ...]`; long
/// inputs come back split into several segments.
pub fn parse_response(body: &Value) -> Result<String, ProviderError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::MalformedResponse("missing translation segments".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_single_segment() {
        let body = json!([[["Hello world", "Hola mundo", null, null, 10]], null, "es"]);
        assert_eq!(parse_response(&body).unwrap(), "Hello world");
    }

    #[test]
    fn test_parse_joins_segments() {
        let body = json!([
            [
                ["Good morning. ", "Buenos días. ", null, null, 3],
                ["How are you?", "¿Cómo estás?", null, null, 3]
            ],
            null,
            "es"
        ]);
        assert_eq!(parse_response(&body).unwrap(), "Good morning. How are you?");
    }

    #[test]
    fn test_parse_rejects_unexpected_shapes() {
        assert!(matches!(
            parse_response(&json!({"error": "nope"})),
            Err(ProviderError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_response(&json!([null, null, "es"])),
            Err(ProviderError::MalformedResponse(_))
        ));
        assert_eq!(parse_response(&json!([[]])), Err(ProviderError::EmptyResponse));
    }

    #[test]
    fn test_bad_request_is_only_a_language_error_when_it_says_so() {
        assert_eq!(
            bad_request_error("xx", "en", "Invalid source language: xx"),
            ProviderError::UnsupportedLanguage("xx -> en".to_string())
        );
        assert!(matches!(
            bad_request_error("es", "en", "<html>Your client has issued a malformed or illegal request.</html>"),
            ProviderError::Api { status: 400, .. }
        ));
    }

    #[test]
    fn test_unreachable_backend_is_a_provider_error() {
        let config = ProviderConfig::default()
            .with_base_url("http://127.0.0.1:9")
            .with_request_delay(Duration::ZERO)
            .with_timeout(Duration::from_secs(2));
        let translator = GoogleTranslator::new(&config).unwrap();

        let result = translator.translate("Hola mundo", "es", "en");
        assert!(matches!(
            result,
            Err(ProviderError::Network(_)) | Err(ProviderError::Timeout)
        ));
    }
}
