//! Skill handlers: the fixed vocabulary of spoken commands and the
//! catch-all that apologizes for everything else.

mod errors;
mod intents;
mod localization;


pub use errors::CatchAllExceptionHandler;
pub use intents::{
    CancelOrStopIntentHandler, HelloWorldIntentHandler, HelpIntentHandler, IntentReflectorHandler,
    LaunchRequestHandler, SessionEndedRequestHandler,
};
pub use localization::LocalizationInterceptor;

use hello_core::config::SkillConfig;
use hello_core::dispatch::{Skill, SkillBuilder};
use hello_core::error::SkillError;
use hello_core::i18n::Catalog;

/// Assemble the skill. Handlers are tried top to bottom; the reflector
/// comes last so it never shadows a named intent.
pub fn build_skill(catalog: Catalog, cfg: &SkillConfig) -> Result<Skill, SkillError> {
    let mut builder = SkillBuilder::new(catalog)
        .add_request_handler(LaunchRequestHandler)
        .add_request_handler(HelloWorldIntentHandler)
        .add_request_handler(HelpIntentHandler)
        .add_request_handler(CancelOrStopIntentHandler)
        .add_request_handler(SessionEndedRequestHandler)
        .add_request_handler(IntentReflectorHandler)
        .add_global_request_interceptor(LocalizationInterceptor)
        .add_exception_handler(CatchAllExceptionHandler);

    if let Some(ref id) = cfg.skill_id {
        builder = builder.skill_id(id.clone());
    }

    builder.build()
}
