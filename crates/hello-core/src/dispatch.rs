//! Dispatcher: routes one request envelope through interceptors, request
//! handlers, and exception handlers.
//!
//! Routing is a linear scan in registration order: the first handler whose
//! predicate matches wins. Interceptor failures, handler failures, and
//! requests no handler accepts all go to the exception handlers.

use tracing::{debug, warn};

use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::error::SkillError;
use crate::i18n::Catalog;
use crate::input::HandlerInput;
use crate::response::Response;
use crate::traits::{ExceptionHandler, RequestHandler, RequestInterceptor};

/// Assembles a [`Skill`].
pub struct SkillBuilder {
    catalog: Catalog,
    skill_id: Option<String>,
    interceptors: Vec<Box<dyn RequestInterceptor>>,
    handlers: Vec<Box<dyn RequestHandler>>,
    exception_handlers: Vec<Box<dyn ExceptionHandler>>,
}

impl SkillBuilder {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            skill_id: None,
            interceptors: Vec::new(),
            handlers: Vec::new(),
            exception_handlers: Vec::new(),
        }
    }

    /// Reject requests addressed to any other application id.
    pub fn skill_id(mut self, id: impl Into<String>) -> Self {
        self.skill_id = Some(id.into());
        self
    }

    /// Register a request handler. Order matters: earlier handlers win.
    pub fn add_request_handler(mut self, handler: impl RequestHandler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn add_global_request_interceptor(
        mut self,
        interceptor: impl RequestInterceptor + 'static,
    ) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    pub fn add_exception_handler(mut self, handler: impl ExceptionHandler + 'static) -> Self {
        self.exception_handlers.push(Box::new(handler));
        self
    }

    pub fn build(self) -> Result<Skill, SkillError> {
        if self.handlers.is_empty() {
            return Err(SkillError::Config(
                "skill has no request handlers".to_string(),
            ));
        }
        if self.exception_handlers.is_empty() {
            warn!("skill built without exception handlers; faults will reach the caller");
        }
        Ok(Skill {
            catalog: self.catalog,
            skill_id: self.skill_id,
            interceptors: self.interceptors,
            handlers: self.handlers,
            exception_handlers: self.exception_handlers,
        })
    }
}

/// A built, immutable skill. Safe to share across concurrent invocations.
pub struct Skill {
    catalog: Catalog,
    skill_id: Option<String>,
    interceptors: Vec<Box<dyn RequestInterceptor>>,
    handlers: Vec<Box<dyn RequestHandler>>,
    exception_handlers: Vec<Box<dyn ExceptionHandler>>,
}

impl Skill {
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Registered handler names, in dispatch order.
    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Run one request to completion.
    ///
    /// Returns `Err` only for a skill-id mismatch or a fault no exception
    /// handler accepted.
    pub async fn invoke(&self, envelope: RequestEnvelope) -> Result<ResponseEnvelope, SkillError> {
        self.verify_skill_id(&envelope)?;

        debug!(
            request_type = %envelope.request.request_type,
            request_id = %envelope.request.request_id,
            locale = envelope.request.locale.as_deref().unwrap_or("-"),
            "dispatching request"
        );

        let mut input = HandlerInput::new(envelope, &self.catalog);
        let response = match self.route(&mut input).await {
            Ok(response) => response,
            Err(fault) => self.recover(&input, fault).await?,
        };
        Ok(ResponseEnvelope::new(response))
    }

    fn verify_skill_id(&self, envelope: &RequestEnvelope) -> Result<(), SkillError> {
        let Some(expected) = self.skill_id.as_deref() else {
            return Ok(());
        };
        let actual = envelope.application_id().unwrap_or_default();
        if actual != expected {
            return Err(SkillError::SkillIdMismatch {
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }

    async fn route(&self, input: &mut HandlerInput<'_>) -> Result<Response, SkillError> {
        for interceptor in &self.interceptors {
            interceptor.process(input).await?;
        }

        let input = &*input;
        let handler = self
            .handlers
            .iter()
            .find(|h| h.can_handle(input))
            .ok_or_else(|| SkillError::NoHandler {
                request_type: input.request().request_type.clone(),
            })?;

        debug!(handler = handler.name(), "handler selected");
        handler.handle(input).await
    }

    async fn recover(
        &self,
        input: &HandlerInput<'_>,
        fault: SkillError,
    ) -> Result<Response, SkillError> {
        match self
            .exception_handlers
            .iter()
            .find(|h| h.can_handle(input, &fault))
        {
            Some(handler) => handler.handle(input, &fault).await,
            None => Err(fault),
        }
    }
}
