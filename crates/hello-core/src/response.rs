//! Spoken responses and the builder handlers use to assemble them.

use serde::{Deserialize, Serialize};

/// A spoken response: speech, optional reprompt, and the session flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    /// `Some(false)` keeps the session open awaiting a reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

impl Response {
    /// Raw SSML speech payload.
    pub fn speech(&self) -> Option<&str> {
        self.output_speech.as_ref().map(OutputSpeech::content)
    }

    /// Raw reprompt payload.
    pub fn reprompt_speech(&self) -> Option<&str> {
        self.reprompt.as_ref().map(|r| r.output_speech.content())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

impl OutputSpeech {
    /// Wrap `text` in a `<speak>` element, escaping XML special characters.
    pub fn ssml(text: &str) -> Self {
        Self::Ssml {
            ssml: format!("<speak>{}</speak>", escape_xml(text)),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Ssml { ssml } => ssml,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Builds a [`Response`].
///
/// ```
/// use hello_core::response::ResponseBuilder;
///
/// let response = ResponseBuilder::new()
///     .speak("Hello World!")
///     .ask("Anything else?")
///     .response();
/// assert_eq!(response.should_end_session, Some(false));
/// ```
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    response: Response,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spoken output.
    pub fn speak(mut self, text: &str) -> Self {
        self.response.output_speech = Some(OutputSpeech::ssml(text));
        self
    }

    /// Set the reprompt and keep the session open.
    pub fn ask(mut self, reprompt: &str) -> Self {
        self.response.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::ssml(reprompt),
        });
        self.response.should_end_session = Some(false);
        self
    }

    pub fn response(self) -> Response {
        self.response
    }
}
