//! Intent handlers: launch, hello, help, cancel/stop, session end, reflector.

use async_trait::async_trait;
use hello_core::envelope::{RequestKind, LAUNCH_REQUEST, SESSION_ENDED_REQUEST};
use hello_core::error::SkillError;
use hello_core::input::HandlerInput;
use hello_core::response::Response;
use hello_core::traits::RequestHandler;
use tracing::info;

pub const HELLO_WORLD_INTENT: &str = "HelloWorldIntent";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";

/// Skill launch: welcome and wait for a reply.
pub struct LaunchRequestHandler;

#[async_trait]
impl RequestHandler for LaunchRequestHandler {
    fn name(&self) -> &str {
        "launch"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_request_type(LAUNCH_REQUEST)
    }

    async fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, SkillError> {
        let speech = input.t("WELCOME_MESSAGE")?;
        Ok(input.response_builder().speak(&speech).ask(&speech).response())
    }
}

pub struct HelloWorldIntentHandler;

#[async_trait]
impl RequestHandler for HelloWorldIntentHandler {
    fn name(&self) -> &str {
        "hello_world"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_intent_name(HELLO_WORLD_INTENT)
    }

    async fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, SkillError> {
        let speech = input.t("HELLO_MSG")?;
        Ok(input.response_builder().speak(&speech).response())
    }
}

pub struct HelpIntentHandler;

#[async_trait]
impl RequestHandler for HelpIntentHandler {
    fn name(&self) -> &str {
        "help"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_intent_name(HELP_INTENT)
    }

    async fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, SkillError> {
        let speech = input.t("HELP_MSG")?;
        Ok(input.response_builder().speak(&speech).ask(&speech).response())
    }
}

/// Cancel and Stop share one goodbye.
pub struct CancelOrStopIntentHandler;

#[async_trait]
impl RequestHandler for CancelOrStopIntentHandler {
    fn name(&self) -> &str {
        "cancel_or_stop"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_intent_name(CANCEL_INTENT) || input.is_intent_name(STOP_INTENT)
    }

    async fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, SkillError> {
        let speech = input.t("GOODBYE_MSG")?;
        Ok(input.response_builder().speak(&speech).response())
    }
}

/// Session ended by the platform. Nothing may be spoken; log why.
pub struct SessionEndedRequestHandler;

#[async_trait]
impl RequestHandler for SessionEndedRequestHandler {
    fn name(&self) -> &str {
        "session_ended"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_request_type(SESSION_ENDED_REQUEST)
    }

    async fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, SkillError> {
        let request = input.request();
        let reason = request.reason.as_deref().unwrap_or("UNKNOWN");
        match request.error {
            Some(ref err) => info!(
                "session ended: {reason} ({}: {})",
                err.error_type, err.message
            ),
            None => info!("session ended: {reason}"),
        }
        Ok(input.response_builder().response())
    }
}

/// Echoes any intent not claimed earlier. Must be registered last.
pub struct IntentReflectorHandler;

#[async_trait]
impl RequestHandler for IntentReflectorHandler {
    fn name(&self) -> &str {
        "reflector"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.kind() == RequestKind::Intent
    }

    async fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, SkillError> {
        let intent_name = input.intent_name().unwrap_or_default();
        let speech = input.t_with("REFLECTOR_MSG", &[("intent_name", intent_name)])?;
        Ok(input.response_builder().speak(&speech).response())
    }
}
