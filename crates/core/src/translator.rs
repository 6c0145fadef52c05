//! The translation capability implemented by every backend.

use crate::error::ProviderError;
use crate::types::TranslationRequest;

/// A text-in, text-out translation backend.
pub trait Translator {
    /// Provider name for display and logging.
    fn name(&self) -> &str;

    /// Translate `text` from `source_lang` to `target_lang`.
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError>;

    /// Translate a prepared request.
    fn translate_request(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        self.translate(&request.text, &request.source_lang, &request.target_lang)
    }
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        (**self).translate(text, source_lang, target_lang)
    }
}
