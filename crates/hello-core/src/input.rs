//! Per-request handler input.

use crate::envelope::{Request, RequestEnvelope, RequestKind};
use crate::error::SkillError;
use crate::i18n::{interpolate, Catalog};
use crate::response::ResponseBuilder;

/// Everything a handler sees for one invocation: the envelope, the string
/// catalog, and the language selected for this request.
///
/// The selected language lives here rather than in process-wide state, so
/// concurrent invocations never observe each other's locale.
pub struct HandlerInput<'a> {
    envelope: RequestEnvelope,
    catalog: &'a Catalog,
    language: Option<String>,
}

impl<'a> HandlerInput<'a> {
    pub fn new(envelope: RequestEnvelope, catalog: &'a Catalog) -> Self {
        Self {
            envelope,
            catalog,
            language: None,
        }
    }

    pub fn request(&self) -> &Request {
        &self.envelope.request
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn is_request_type(&self, request_type: &str) -> bool {
        self.envelope.request.request_type == request_type
    }

    /// True for intent requests whose intent is `name`.
    pub fn is_intent_name(&self, name: &str) -> bool {
        self.envelope.request.intent_name() == Some(name)
    }

    pub fn intent_name(&self) -> Option<&str> {
        self.envelope.request.intent_name()
    }

    pub fn kind(&self) -> RequestKind {
        self.envelope.request.kind()
    }

    /// Language selected by the localization interceptor, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = Some(language.into());
    }

    /// Look up `key` in the selected language.
    pub fn t(&self, key: &str) -> Result<String, SkillError> {
        self.t_with(key, &[])
    }

    /// Look up `key` in the selected language and fill its placeholders.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> Result<String, SkillError> {
        let language = self
            .language
            .as_deref()
            .ok_or(SkillError::LanguageNotSelected)?;
        let template = self.catalog.lookup(language, key)?;
        Ok(interpolate(template, args))
    }

    /// Look up `key` in the selected language, then in the catalog's
    /// default language.
    pub fn t_or_default(&self, key: &str) -> Option<String> {
        self.t(key).ok().or_else(|| {
            self.catalog
                .lookup(self.catalog.default_language(), key)
                .ok()
                .map(str::to_string)
        })
    }

    pub fn response_builder(&self) -> ResponseBuilder {
        ResponseBuilder::new()
    }
}
