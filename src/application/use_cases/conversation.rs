use tracing::{debug, warn};

use crate::application::{build_prompt, GenerativeClient};
use crate::domain::{
    DomainError, GenerateContentRequest, GenerateContentResponse, Message, Transcript,
};

/// Shown when the model answers without any text.
pub const EMPTY_REPLY_FALLBACK: &str =
    "I apologize, but I'm unable to process your request at the moment. Please try again.";

/// Shown when the request itself fails.
pub const TRANSPORT_FAILURE_FALLBACK: &str =
    "I apologize, but I'm experiencing technical difficulties. Please try again in a moment.";

/// Owns the transcript, the pending flag and the input buffer.
///
/// A send is split in two so an event loop can keep rendering while the
/// request is in flight: [`begin_send`](Self::begin_send) records the user
/// turn and hands back the prompt envelope, and
/// [`complete`](Self::complete) records the assistant turn and clears the
/// pending flag whatever the outcome. [`send`](Self::send) runs both
/// halves around a client call.
#[derive(Debug, Default)]
pub struct ConversationController {
    transcript: Transcript,
    pending: bool,
    input: String,
}

impl ConversationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_char(&mut self, c: char) {
        if !self.pending {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if !self.pending {
            self.input.pop();
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    /// Record a user turn and build its prompt envelope.
    ///
    /// Returns `None` without touching any state while a request is pending
    /// or when `text` is blank.
    pub fn begin_send(&mut self, text: &str) -> Option<GenerateContentRequest> {
        if self.pending {
            debug!("Ignoring send while a request is pending");
            return None;
        }

        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.transcript.push(Message::user(text));
        self.input.clear();
        self.pending = true;

        Some(build_prompt(self.transcript.messages()))
    }

    /// Record the assistant turn for the pending request.
    pub fn complete(&mut self, outcome: Result<GenerateContentResponse, DomainError>) {
        if !self.pending {
            warn!("Dropping reply that arrived with no request pending");
            return;
        }

        let reply = match outcome {
            Ok(response) => match response.reply_text() {
                Some(text) => text.to_string(),
                None => {
                    debug!("Model returned no reply text");
                    EMPTY_REPLY_FALLBACK.to_string()
                }
            },
            Err(e) => {
                warn!("Error fetching response: {}", e);
                TRANSPORT_FAILURE_FALLBACK.to_string()
            }
        };

        self.transcript.push(Message::assistant(reply));
        self.pending = false;
    }

    /// Send `text` through `client` and wait for the reply.
    ///
    /// Returns `false` when the send was rejected (pending or blank input).
    pub async fn send(&mut self, text: &str, client: &dyn GenerativeClient) -> bool {
        let Some(request) = self.begin_send(text) else {
            return false;
        };

        let outcome = client.generate(&request).await;
        self.complete(outcome);
        true
    }

    /// Start over from the welcome message. Ignored while pending.
    pub fn reset(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.transcript.reset();
        true
    }
}
