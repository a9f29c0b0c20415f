//! Wire types for the voice platform's JSON request and response envelopes.
//!
//! Only the fields the skill reads are modelled; unknown fields are ignored
//! on input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::SkillError;
use crate::response::Response;

pub const LAUNCH_REQUEST: &str = "LaunchRequest";
pub const INTENT_REQUEST: &str = "IntentRequest";
pub const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";

/// Envelope version emitted on every response.
pub const RESPONSE_VERSION: &str = "1.0";

/// An incoming request envelope, as delivered by the hosting runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub context: Option<Context>,
    pub request: Request,
}

impl RequestEnvelope {
    /// Parse an envelope from raw JSON.
    pub fn from_json(raw: &str) -> Result<Self, SkillError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Application id the request was addressed to.
    ///
    /// `context.System.application` wins over `session.application`; the
    /// session is absent on some request types.
    pub fn application_id(&self) -> Option<&str> {
        self.context
            .as_ref()
            .and_then(|c| c.system.as_ref())
            .and_then(|s| s.application.as_ref())
            .or_else(|| self.session.as_ref().and_then(|s| s.application.as_ref()))
            .map(|a| a.application_id.as_str())
    }
}

fn default_version() -> String {
    RESPONSE_VERSION.to_string()
}

/// Session info attached to in-session requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub application: Option<Application>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
}

/// Device/runtime context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    #[serde(rename = "System", default)]
    pub system: Option<SystemState>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemState {
    #[serde(default)]
    pub application: Option<Application>,
    #[serde(default)]
    pub user: Option<User>,
}

/// The request body proper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Discriminator, e.g. `LaunchRequest` or `IntentRequest`.
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// `language-REGION`, e.g. `en-US`.
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
    /// Why the session ended (`SessionEndedRequest` only).
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub error: Option<RequestError>,
}

impl Request {
    pub fn kind(&self) -> RequestKind {
        match self.request_type.as_str() {
            LAUNCH_REQUEST => RequestKind::Launch,
            INTENT_REQUEST => RequestKind::Intent,
            SESSION_ENDED_REQUEST => RequestKind::SessionEnded,
            _ => RequestKind::Other,
        }
    }

    /// Intent name, for intent requests only.
    pub fn intent_name(&self) -> Option<&str> {
        match self.kind() {
            RequestKind::Intent => self.intent.as_ref().map(|i| i.name.as_str()),
            _ => None,
        }
    }
}

/// Coarse classification of [`Request::request_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Launch,
    Intent,
    SessionEnded,
    Other,
}

/// A recognized spoken command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub confirmation_status: Option<String>,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Error details reported with a `SessionEndedRequest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestError {
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
}

/// The outgoing envelope returned to the hosting runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub user_agent: String,
    pub response: Response,
}

impl ResponseEnvelope {
    pub fn new(response: Response) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            user_agent: format!("hello-skill/{}", env!("CARGO_PKG_VERSION")),
            response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_intent_request() {
        let raw = r#"{
            "version": "1.0",
            "session": {
                "new": true,
                "sessionId": "amzn1.echo-api.session.1",
                "application": { "applicationId": "amzn1.ask.skill.abc" },
                "user": { "userId": "amzn1.ask.account.xyz" }
            },
            "context": {
                "System": {
                    "application": { "applicationId": "amzn1.ask.skill.abc" },
                    "device": { "deviceId": "ignored" }
                }
            },
            "request": {
                "type": "IntentRequest",
                "requestId": "amzn1.echo-api.request.1",
                "timestamp": "2019-03-26T19:58:28Z",
                "locale": "en-US",
                "intent": {
                    "name": "HelloWorldIntent",
                    "confirmationStatus": "NONE",
                    "slots": {}
                }
            }
        }"#;
        let env = RequestEnvelope::from_json(raw).unwrap();
        assert_eq!(env.request.kind(), RequestKind::Intent);
        assert_eq!(env.request.intent_name(), Some("HelloWorldIntent"));
        assert_eq!(env.request.locale.as_deref(), Some("en-US"));
        assert!(env.request.timestamp.is_some());
        assert!(env.session.as_ref().unwrap().new);
        assert_eq!(env.application_id(), Some("amzn1.ask.skill.abc"));
    }

    #[test]
    fn test_parse_minimal_launch_request() {
        let raw = r#"{"request": {"type": "LaunchRequest", "locale": "de-DE"}}"#;
        let env = RequestEnvelope::from_json(raw).unwrap();
        assert_eq!(env.version, "1.0");
        assert_eq!(env.request.kind(), RequestKind::Launch);
        assert_eq!(env.request.intent_name(), None);
        assert_eq!(env.application_id(), None);
    }

    #[test]
    fn test_application_id_falls_back_to_session() {
        let raw = r#"{
            "session": { "application": { "applicationId": "from-session" } },
            "request": { "type": "LaunchRequest" }
        }"#;
        let env = RequestEnvelope::from_json(raw).unwrap();
        assert_eq!(env.application_id(), Some("from-session"));
    }

    #[test]
    fn test_intent_name_ignored_outside_intent_requests() {
        let raw = r#"{"request": {"type": "LaunchRequest", "intent": {"name": "HelloWorldIntent"}}}"#;
        let env = RequestEnvelope::from_json(raw).unwrap();
        assert_eq!(env.request.intent_name(), None);
    }

    #[test]
    fn test_unknown_request_type_is_other() {
        let raw = r#"{"request": {"type": "CanFulfillIntentRequest"}}"#;
        let env = RequestEnvelope::from_json(raw).unwrap();
        assert_eq!(env.request.kind(), RequestKind::Other);
    }

    #[test]
    fn test_session_ended_reason_and_error() {
        let raw = r#"{"request": {
            "type": "SessionEndedRequest",
            "reason": "ERROR",
            "error": {"type": "INVALID_RESPONSE", "message": "bad ssml"}
        }}"#;
        let env = RequestEnvelope::from_json(raw).unwrap();
        assert_eq!(env.request.kind(), RequestKind::SessionEnded);
        assert_eq!(env.request.reason.as_deref(), Some("ERROR"));
        assert_eq!(env.request.error.unwrap().error_type, "INVALID_RESPONSE");
    }

    #[test]
    fn test_missing_request_is_error() {
        let err = RequestEnvelope::from_json(r#"{"version": "1.0"}"#).unwrap_err();
        assert!(matches!(err, SkillError::Serialization(_)));
    }

    #[test]
    fn test_response_envelope_shape() {
        let env = ResponseEnvelope::new(Response::default());
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["version"], "1.0");
        assert!(json["userAgent"].as_str().unwrap().starts_with("hello-skill/"));
        assert!(json["response"].is_object());
    }
}
