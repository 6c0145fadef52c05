//! Error types for slide-deck translation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors. Any of these aborts the run before the output is written.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read a file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid or corrupted file.
    #[error("Invalid or corrupted file: {0}")]
    CorruptedFile(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing or writing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// The selected provider needs a credential that was not configured.
    #[error("Missing API key for {provider}: set {variable} in the environment or a .env file")]
    MissingCredential {
        provider: String,
        variable: String,
    },

    /// The output file or directory could not be written.
    #[error("Cannot write output {}: {source}", path.display())]
    OutputNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A run handle does not refer to a live run.
    #[error("Invalid run handle: {0}")]
    InvalidHandle(String),

    /// A pipeline stage was invoked out of order.
    #[error("Pipeline is {current}, cannot start {next}")]
    InvalidTransition { current: String, next: String },

    /// The provider token given on the command line is not known.
    #[error("Unknown translation provider '{0}' (expected 'google' or 'openai')")]
    UnknownProvider(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Per-request translation failures.
///
/// These never abort a run: the affected text keeps its original content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Transport failure while talking to the backend.
    #[error("Network error: {0}")]
    Network(String),

    /// The request exceeded the transport timeout.
    #[error("Translation request timed out")]
    Timeout,

    /// The backend throttled the request.
    #[error("Rate limited by provider")]
    RateLimited,

    /// The credential was rejected.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The backend does not support the language pair.
    #[error("Unsupported language pair: {0}")]
    UnsupportedLanguage(String),

    /// The backend returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be understood.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The backend answered with no translation.
    #[error("Empty response from provider")]
    EmptyResponse,
}
