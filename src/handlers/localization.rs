use async_trait::async_trait;
use hello_core::error::SkillError;
use hello_core::i18n::language_of;
use hello_core::input::HandlerInput;
use hello_core::traits::RequestInterceptor;
use tracing::{debug, warn};

/// Selects the request's string table from the `language` part of its
/// `language-REGION` locale. Languages without a table fall back to the
/// catalog's default language.
pub struct LocalizationInterceptor;

#[async_trait]
impl RequestInterceptor for LocalizationInterceptor {
    async fn process(&self, input: &mut HandlerInput<'_>) -> Result<(), SkillError> {
        let locale = input
            .request()
            .locale
            .clone()
            .ok_or(SkillError::MissingLocale)?;
        let mut language = language_of(&locale);
        if !input.catalog().has_language(&language) {
            let fallback = input.catalog().default_language().to_string();
            warn!("no string table for locale {locale}, falling back to {fallback}");
            language = fallback;
        }
        debug!("locale {locale} -> {language}");
        input.set_language(language);
        Ok(())
    }
}
