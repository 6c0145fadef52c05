//! HTTP plumbing shared by the backends.

use crate::config::ProviderConfig;
use deck_core::{Error, ProviderError};
use reqwest::blocking::Client;

/// Build the blocking client used for every request of a run.
pub(crate) fn build_client(config: &ProviderConfig) -> Result<Client, Error> {
    Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!("deck-translator/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::InvalidConfig(format!("Failed to build HTTP client: {}", e)))
}

/// Map a transport failure.
pub(crate) fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Network(e.to_string())
    }
}

/// Map a non-success HTTP status.
pub(crate) fn status_error(status: u16, body: &str) -> ProviderError {
    let message = error_message(body);
    match status {
        401 | 403 => ProviderError::Authentication(message),
        429 => ProviderError::RateLimited,
        _ => ProviderError::Api { status, message },
    }
}

/// Pull `error.message` out of a JSON error body, or fall back to the body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(401, r#"{"error":{"message":"Incorrect API key provided"}}"#),
            ProviderError::Authentication(msg) if msg == "Incorrect API key provided"
        ));
        assert_eq!(status_error(429, ""), ProviderError::RateLimited);
        assert_eq!(
            status_error(500, "upstream failure\n"),
            ProviderError::Api {
                status: 500,
                message: "upstream failure".to_string()
            }
        );
    }
}
