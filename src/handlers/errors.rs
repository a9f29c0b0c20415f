use async_trait::async_trait;
use hello_core::envelope::RequestKind;
use hello_core::error::SkillError;
use hello_core::input::HandlerInput;
use hello_core::response::Response;
use hello_core::traits::ExceptionHandler;
use tracing::error;

/// Spoken when even the default language has no `ERROR` string.
const LAST_RESORT: &str = "Sorry, I had trouble doing what you asked. Please try again.";

/// Catches every fault: routing misses, interceptor and handler failures.
///
/// Logs the fault and apologizes in the request's language, or the default
/// language when none was selected. Session-ended requests get an empty
/// response, since nothing may be spoken after the session closed. Never fails.
pub struct CatchAllExceptionHandler;

#[async_trait]
impl ExceptionHandler for CatchAllExceptionHandler {
    fn can_handle(&self, _input: &HandlerInput<'_>, _error: &SkillError) -> bool {
        true
    }

    async fn handle(
        &self,
        input: &HandlerInput<'_>,
        err: &SkillError,
    ) -> Result<Response, SkillError> {
        let request = input.request();
        error!(
            request_type = %request.request_type,
            request_id = %request.request_id,
            "request failed: {err}"
        );

        if input.kind() == RequestKind::SessionEnded {
            return Ok(input.response_builder().response());
        }

        let speech = input
            .t_or_default("ERROR")
            .unwrap_or_else(|| LAST_RESORT.to_string());
        Ok(input.response_builder().speak(&speech).ask(&speech).response())
    }
}
