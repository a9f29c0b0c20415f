use crate::{error::SkillError, input::HandlerInput, response::Response};
use async_trait::async_trait;

/// Request handler, one per spoken command.
///
/// The dispatcher asks each registered handler, in order, whether it can
/// handle the request; the first that says yes produces the response.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Human-readable handler name, used in logs.
    fn name(&self) -> &str;

    /// Pure predicate over the request.
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool;

    /// Build the response.
    async fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, SkillError>;
}

/// Runs before handler selection on every request.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    async fn process(&self, input: &mut HandlerInput<'_>) -> Result<(), SkillError>;
}

/// Turns a fault raised during dispatch into a response.
#[async_trait]
pub trait ExceptionHandler: Send + Sync {
    fn can_handle(&self, input: &HandlerInput<'_>, error: &SkillError) -> bool;

    async fn handle(
        &self,
        input: &HandlerInput<'_>,
        error: &SkillError,
    ) -> Result<Response, SkillError>;
}
